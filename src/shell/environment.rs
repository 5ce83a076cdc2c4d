use std::env;
use std::path::PathBuf;

/// Read-only identity handed to the prompt and the path resolver. Missing
/// values fall back to harmless defaults instead of aborting startup.
pub(crate) struct Environment {
    pub user: String,
    pub host: String,
    pub home: Option<PathBuf>,
}

impl Environment {
    pub fn discover() -> Self {
        Environment {
            user: env::var("USER").unwrap_or_else(|_| "unknown".to_string()),
            host: hostname(),
            home: dirs::home_dir(),
        }
    }
}

fn hostname() -> String {
    let mut buf = [0u8; 64];
    let rc = unsafe { libc::gethostname(buf.as_mut_ptr().cast(), buf.len()) };
    if rc != 0 {
        return "localhost".to_string();
    }
    let len = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
    String::from_utf8_lossy(&buf[..len]).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_never_panics_and_fills_identity() {
        let env = Environment::discover();
        assert!(!env.user.is_empty());
        assert!(!env.host.is_empty());
    }

    #[test]
    fn test_hostname_is_nul_terminated() {
        assert!(!hostname().contains('\0'));
    }
}
