use std::fmt;

mod resolver;

pub use resolver::PathResolver;

#[derive(Debug)]
pub enum PathError {
    InvalidPath(String),
    NotFound(String),
    NotADirectory(String),
    PermissionDenied(String),
    Io(std::io::Error),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::InvalidPath(path) => write!(f, "invalid path specified: {}", path),
            PathError::NotFound(path) => write!(f, "no such directory: {}", path),
            PathError::NotADirectory(path) => write!(f, "not a directory: {}", path),
            PathError::PermissionDenied(path) => write!(f, "permission denied: {}", path),
            PathError::Io(err) => write!(f, "failed to retrieve folder information: {}", err),
        }
    }
}

impl From<std::io::Error> for PathError {
    fn from(err: std::io::Error) -> Self {
        PathError::Io(err)
    }
}

impl std::error::Error for PathError {}
