use std::io::Write;

use inksac::prelude::*;

/// Renders the prompt and error diagnostics, degrading to plain text when
/// the terminal reports no color support or the user asked for none.
pub(crate) struct PromptStyle {
    colors_enabled: bool,
}

impl PromptStyle {
    pub fn new(want_color: bool) -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            colors_enabled: want_color && !matches!(support, ColorSupport::NoColor),
        }
    }

    /// `user@host:dir> `, identity in green, directory in blue.
    pub fn render(&self, user: &str, host: &str, dir: &str) -> String {
        if !self.colors_enabled {
            return format!("{}@{}:{}> ", user, host, dir);
        }

        let identity_style = Style::builder().foreground(Color::Green).bold().build();
        let dir_style = Style::builder().foreground(Color::Blue).bold().build();

        format!(
            "{}:{}> ",
            format!("{}@{}", user, host).style(identity_style),
            dir.to_string().style(dir_style)
        )
    }

    pub fn error(&self, message: &str) -> String {
        if !self.colors_enabled {
            return format!("ERROR: {}", message);
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        format!("{} {}", "ERROR:".to_string().style(error_style), message)
    }

    pub fn clear_screen(&self) {
        print!("\x1B[1;1H\x1B[2J");
        let _ = std::io::stdout().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> PromptStyle {
        PromptStyle {
            colors_enabled: false,
        }
    }

    #[test]
    fn test_plain_prompt_shape() {
        assert_eq!(plain().render("amy", "box", "~/src"), "amy@box:~/src> ");
    }

    #[test]
    fn test_plain_error_prefix() {
        assert_eq!(plain().error("boom"), "ERROR: boom");
    }
}
