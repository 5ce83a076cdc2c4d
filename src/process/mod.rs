use std::fmt;

pub mod pipeline;
pub mod signal;

pub use pipeline::{Outcome, PipelineExecutor};

#[derive(Debug)]
pub enum ProcessError {
    Spawn(nix::Error),
    Plumbing(nix::Error),
    AbnormalExit { pid: i32, code: i32 },
    Killed { pid: i32, signal: i32 },
    SignalError(String),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Spawn(err) => write!(f, "failed to create child process: {}", err),
            ProcessError::Plumbing(err) => write!(f, "failed to set up pipe plumbing: {}", err),
            ProcessError::AbnormalExit { pid, code } => {
                write!(f, "child with pid {} exited abnormally with status {}", pid, code)
            }
            ProcessError::Killed { pid, signal } => {
                write!(f, "child with pid {} was terminated by signal {}", pid, signal)
            }
            ProcessError::SignalError(msg) => write!(f, "signal error: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}
