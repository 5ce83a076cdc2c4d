use crate::path::PathError;
use crate::process::ProcessError;
use crate::syntax::SyntaxError;

pub const MAX_LINE_LENGTH: usize = 256;

#[derive(Debug)]
pub enum ShellError {
    Readline(rustyline::error::ReadlineError),
    Io(std::io::Error),
    Syntax(SyntaxError),
    Path(PathError),
    Process(ProcessError),
    LineTooLong(usize),
    FlagError(String),
    CtrlC(String),
}

impl From<rustyline::error::ReadlineError> for ShellError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        ShellError::Readline(err)
    }
}

impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Io(err)
    }
}

impl From<ctrlc::Error> for ShellError {
    fn from(err: ctrlc::Error) -> Self {
        ShellError::CtrlC(err.to_string())
    }
}

impl From<SyntaxError> for ShellError {
    fn from(err: SyntaxError) -> Self {
        ShellError::Syntax(err)
    }
}

impl From<PathError> for ShellError {
    fn from(err: PathError) -> Self {
        ShellError::Path(err)
    }
}

impl From<ProcessError> for ShellError {
    fn from(err: ProcessError) -> Self {
        ShellError::Process(err)
    }
}

impl std::fmt::Display for ShellError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShellError::Readline(e) => write!(f, "Readline error: {}", e),
            ShellError::Io(e) => write!(f, "IO error: {}", e),
            ShellError::Syntax(e) => write!(f, "Command improperly formatted: {}", e),
            ShellError::Path(e) => write!(f, "cd: {}", e),
            ShellError::Process(e) => write!(f, "{}", e),
            ShellError::LineTooLong(limit) => write!(
                f,
                "Line length exceeded allowed size of {}, dropping input",
                limit
            ),
            ShellError::FlagError(msg) => write!(f, "Flag error: {}", msg),
            ShellError::CtrlC(msg) => write!(f, "Ctrl-C error: {}", msg),
        }
    }
}

impl std::error::Error for ShellError {}
