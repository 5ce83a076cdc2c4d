use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::PathError;

/// Owns the shell's notion of "where am I".
///
/// The current directory is stored in absolute form and only rendered
/// home-relative (leading `~`) on demand, so resolution never has to undo
/// the display substitution against a possibly stale home value.
pub struct PathResolver {
    current: PathBuf,
    home: Option<PathBuf>,
}

impl PathResolver {
    pub fn new(start: PathBuf, home: Option<PathBuf>) -> Self {
        Self { current: start, home }
    }

    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Home-relative display form. Falls back to the absolute path when the
    /// home directory is unknown or is not a prefix of the current one.
    pub fn display(&self) -> String {
        if let Some(home) = &self.home {
            // strip_prefix works per component, so /home/userx never
            // matches a home of /home/user.
            if let Ok(rest) = self.current.strip_prefix(home) {
                return if rest.as_os_str().is_empty() {
                    "~".to_string()
                } else {
                    format!("~/{}", rest.display())
                };
            }
        }
        self.current.display().to_string()
    }

    /// Computes the absolute directory a path expression denotes, without
    /// touching the filesystem.
    ///
    /// `~` and `~/...` resolve against the home directory (any other `~`
    /// form is invalid, as is `~` itself when no home is known), a leading
    /// `/` replaces the base entirely, and anything else is appended to the
    /// current directory. The walk treats `.` as a no-op and `..` as
    /// removing the last component; climbing above the root is an error,
    /// not a silent no-op.
    pub fn resolve(&self, target: &str) -> Result<PathBuf, PathError> {
        let invalid = || PathError::InvalidPath(target.to_string());

        let (mut components, rest) = if let Some(after) = target.strip_prefix('~') {
            if !(after.is_empty() || after.starts_with('/')) || after.starts_with("//") {
                return Err(invalid());
            }
            let home = self.home.as_ref().ok_or_else(invalid)?;
            (split_components(home), after)
        } else if target.starts_with('/') {
            (Vec::new(), target)
        } else {
            (split_components(&self.current), target)
        };

        for segment in rest.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    if components.pop().is_none() {
                        return Err(invalid());
                    }
                }
                name => components.push(name.to_string()),
            }
        }

        // An empty component list denotes the root, which keeps its
        // separator; every other result is built without a trailing one.
        if components.is_empty() {
            Ok(PathBuf::from("/"))
        } else {
            Ok(PathBuf::from(format!("/{}", components.join("/"))))
        }
    }

    /// Resolves `target`, confirms it names an existing directory, then
    /// changes the process working directory and the stored state. On any
    /// failure the stored state is left untouched.
    pub fn change_directory(&mut self, target: &str) -> Result<(), PathError> {
        let resolved = self.resolve(target)?;
        let shown = resolved.display().to_string();

        let meta = fs::metadata(&resolved).map_err(|err| match err.kind() {
            ErrorKind::NotFound => PathError::NotFound(shown.clone()),
            ErrorKind::PermissionDenied => PathError::PermissionDenied(shown.clone()),
            _ => PathError::Io(err),
        })?;
        if !meta.is_dir() {
            return Err(PathError::NotADirectory(shown));
        }

        env::set_current_dir(&resolved)?;
        self.current = resolved;
        Ok(())
    }
}

fn split_components(path: &Path) -> Vec<String> {
    path.to_string_lossy()
        .split('/')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
