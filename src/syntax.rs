use std::fmt;

/// Reason a line was rejected before any execution was attempted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    EmptyToken,
    PipeAtEdge,
    MissingCdArgument,
    TrailingAfterCdArgument(String),
    MissingRedirectTarget(char),
    OperatorAsOperand(String),
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::EmptyToken => write!(f, "empty token: check for repeated or edge spaces"),
            SyntaxError::PipeAtEdge => write!(f, "a pipe must have a command on both sides"),
            SyntaxError::MissingCdArgument => write!(f, "cd requires exactly one path argument"),
            SyntaxError::TrailingAfterCdArgument(tok) => {
                write!(f, "unexpected '{}' after cd argument, only a pipe may follow", tok)
            }
            SyntaxError::MissingRedirectTarget(op) => {
                write!(f, "'{}' must be followed by a file name", op)
            }
            SyntaxError::OperatorAsOperand(tok) => {
                write!(f, "'{}' cannot appear where a plain word is required", tok)
            }
        }
    }
}

impl std::error::Error for SyntaxError {}

/// Scanner state over the token stream. The grammar is flat, so a single
/// left-to-right pass with no look-ahead suffices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Start of the line or right after a pipe: a command word is required.
    StageStart,
    /// Inside a stage after at least one plain word.
    Word,
    /// The single argument that must follow `cd`.
    CdArg,
    /// `cd` consumed its argument: only a pipe may follow.
    CdDone,
    /// The file name that must follow `<` or `>`.
    Filename(char),
}

/// Checks a raw input line against the shell's restricted grammar: tokens
/// separated by single spaces, `cd` taking exactly one argument, pipes
/// standing alone between stages, redirection operators each followed by a
/// file name. Rejection rejects the line as a whole.
pub fn validate(line: &str) -> Result<(), SyntaxError> {
    let mut state = Scan::StageStart;

    for token in line.split(' ') {
        state = match state {
            Scan::StageStart => match token {
                "" => return Err(SyntaxError::EmptyToken),
                "|" => return Err(SyntaxError::PipeAtEdge),
                "<" | ">" => return Err(SyntaxError::OperatorAsOperand(token.to_string())),
                "cd" => Scan::CdArg,
                _ => Scan::Word,
            },
            Scan::Word => match token {
                "" => return Err(SyntaxError::EmptyToken),
                "|" => Scan::StageStart,
                "<" => Scan::Filename('<'),
                ">" => Scan::Filename('>'),
                "cd" => Scan::CdArg,
                _ => Scan::Word,
            },
            Scan::CdArg => match token {
                "" | "|" | "<" | ">" => return Err(SyntaxError::MissingCdArgument),
                _ => Scan::CdDone,
            },
            Scan::CdDone => match token {
                "|" => Scan::StageStart,
                _ => return Err(SyntaxError::TrailingAfterCdArgument(token.to_string())),
            },
            Scan::Filename(op) => match token {
                "" | "|" | "<" | ">" => return Err(SyntaxError::MissingRedirectTarget(op)),
                _ => Scan::Word,
            },
        };
    }

    // States that still owe a token when the line ends.
    match state {
        Scan::Word | Scan::CdDone => Ok(()),
        Scan::StageStart => Err(SyntaxError::PipeAtEdge),
        Scan::CdArg => Err(SyntaxError::MissingCdArgument),
        Scan::Filename(op) => Err(SyntaxError::MissingRedirectTarget(op)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_simple_commands() {
        assert!(validate("ls").is_ok());
        assert!(validate("ls -la /tmp").is_ok());
        assert!(validate("echo hello world").is_ok());
    }

    #[test]
    fn test_accepts_pipelines() {
        assert!(validate("ls | grep foo").is_ok());
        assert!(validate("ls | grep foo | wc -l").is_ok());
    }

    #[test]
    fn test_accepts_redirections() {
        assert!(validate("echo hi > out.txt").is_ok());
        assert!(validate("sort < in.txt").is_ok());
        assert!(validate("sort < in.txt > out.txt").is_ok());
        assert!(validate("cat f | sort > out.txt").is_ok());
    }

    #[test]
    fn test_accepts_cd_forms() {
        assert!(validate("cd /tmp").is_ok());
        assert!(validate("cd ~").is_ok());
        assert!(validate("cd x | ls").is_ok());
    }

    #[test]
    fn test_rejects_edge_pipes() {
        assert_eq!(validate("| ls"), Err(SyntaxError::PipeAtEdge));
        assert_eq!(validate("ls |"), Err(SyntaxError::PipeAtEdge));
        assert_eq!(validate("ls | | wc"), Err(SyntaxError::PipeAtEdge));
    }

    #[test]
    fn test_rejects_empty_tokens() {
        assert_eq!(validate("ls  -la"), Err(SyntaxError::EmptyToken));
        assert_eq!(validate(" ls"), Err(SyntaxError::EmptyToken));
        assert_eq!(validate("ls "), Err(SyntaxError::EmptyToken));
    }

    #[test]
    fn test_rejects_bad_cd_arity() {
        assert_eq!(validate("cd"), Err(SyntaxError::MissingCdArgument));
        assert_eq!(validate("cd | ls"), Err(SyntaxError::MissingCdArgument));
        assert!(matches!(
            validate("cd a b"),
            Err(SyntaxError::TrailingAfterCdArgument(_))
        ));
    }

    #[test]
    fn test_cd_rule_applies_anywhere() {
        // The grammar treats a `cd` token specially wherever it appears.
        assert!(validate("echo cd x").is_ok());
        assert!(matches!(
            validate("echo cd"),
            Err(SyntaxError::MissingCdArgument)
        ));
    }

    #[test]
    fn test_rejects_dangling_redirections() {
        assert_eq!(validate("echo hi >"), Err(SyntaxError::MissingRedirectTarget('>')));
        assert_eq!(validate("sort <"), Err(SyntaxError::MissingRedirectTarget('<')));
        assert_eq!(
            validate("echo hi > | wc"),
            Err(SyntaxError::MissingRedirectTarget('>'))
        );
    }

    #[test]
    fn test_rejects_operator_as_command() {
        assert!(matches!(validate("> out"), Err(SyntaxError::OperatorAsOperand(_))));
        assert!(matches!(validate("ls | < in"), Err(SyntaxError::OperatorAsOperand(_))));
    }
}
