use super::Shell;
use crate::error::{ShellError, MAX_LINE_LENGTH};
use crate::path::PathResolver;
use crate::process::{Outcome, PipelineExecutor};
use crate::syntax;
use crate::token::tokenize;

pub(crate) trait CommandHandler {
    fn dispatch_line(&mut self, line: &str) -> Result<Outcome, ShellError>;
}

impl CommandHandler for Shell {
    fn dispatch_line(&mut self, line: &str) -> Result<Outcome, ShellError> {
        dispatch(&self.executor, &mut self.resolver, line)
    }
}

/// Routes one completed input line: validate first, then hand it to the
/// pipeline executor, the path resolver, or a single-command spawn. Every
/// rejection path returns before anything executes.
pub(crate) fn dispatch(
    executor: &PipelineExecutor,
    resolver: &mut PathResolver,
    line: &str,
) -> Result<Outcome, ShellError> {
    if line.trim().is_empty() {
        return Ok(Outcome::Continue);
    }
    if line.chars().count() > MAX_LINE_LENGTH {
        return Err(ShellError::LineTooLong(MAX_LINE_LENGTH));
    }

    syntax::validate(line)?;

    if line.contains('|') {
        return Ok(executor.run_pipeline(line, resolver)?);
    }

    let tokens = tokenize(line);
    match tokens.first().copied() {
        Some("cd") => {
            if let Some(target) = tokens.get(1) {
                resolver.change_directory(target)?;
            }
            Ok(Outcome::Continue)
        }
        Some(_) if tokens.contains(&"exit") => Ok(Outcome::Exit),
        Some(_) => {
            executor.run_command(&tokens)?;
            Ok(Outcome::Continue)
        }
        None => Ok(Outcome::Continue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::Flags;
    use std::env;
    use std::path::PathBuf;

    fn fixtures() -> (PipelineExecutor, PathResolver) {
        (
            PipelineExecutor::new(&Flags::default()),
            PathResolver::new(PathBuf::from("/"), None),
        )
    }

    #[test]
    fn test_blank_line_is_a_noop() {
        let (exec, mut res) = fixtures();
        assert_eq!(dispatch(&exec, &mut res, "").unwrap(), Outcome::Continue);
        assert_eq!(dispatch(&exec, &mut res, "   ").unwrap(), Outcome::Continue);
    }

    #[test]
    fn test_overlong_line_is_discarded_whole() {
        let (exec, mut res) = fixtures();
        let line = "x".repeat(MAX_LINE_LENGTH + 44);
        assert!(matches!(
            dispatch(&exec, &mut res, &line),
            Err(ShellError::LineTooLong(_))
        ));
    }

    #[test]
    fn test_syntax_rejection_blocks_execution() {
        let (exec, mut res) = fixtures();
        let out = env::temp_dir().join("rill_dispatch_syntax_test");
        let _ = std::fs::remove_file(&out);

        // A malformed pipe rejects the whole line, so the redirection
        // never runs and the file never appears.
        let line = format!("echo hi > {} | ", out.display());
        assert!(matches!(
            dispatch(&exec, &mut res, &line),
            Err(ShellError::Syntax(_))
        ));
        assert!(!out.exists());
    }

    #[test]
    fn test_exit_token_terminates() {
        let (exec, mut res) = fixtures();
        assert_eq!(dispatch(&exec, &mut res, "exit").unwrap(), Outcome::Exit);
    }

    #[test]
    fn test_cd_routes_to_resolver() {
        let (exec, mut res) = fixtures();
        let temp = env::temp_dir();
        dispatch(&exec, &mut res, &format!("cd {}", temp.display())).unwrap();
        assert_eq!(res.current(), temp.as_path());
    }

    #[test]
    fn test_cd_failure_surfaces_path_error() {
        let (exec, mut res) = fixtures();
        assert!(matches!(
            dispatch(&exec, &mut res, "cd /no/such/dir/here"),
            Err(ShellError::Path(_))
        ));
    }

    #[test]
    fn test_single_command_runs() {
        let (exec, mut res) = fixtures();
        assert_eq!(dispatch(&exec, &mut res, "true").unwrap(), Outcome::Continue);
        assert!(matches!(
            dispatch(&exec, &mut res, "false"),
            Err(ShellError::Process(_))
        ));
    }
}
