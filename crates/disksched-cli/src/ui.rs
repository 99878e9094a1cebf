//! UI helpers for CLI display.

use console::style;

/// Title shown above the interactive prompt.
pub const TITLE: &str = "DISK SCHEDULER SIMULATOR";

/// Prompt printed before each filename is read.
pub const PROMPT: &str = "Enter filename: ";

/// Check if color output is disabled via `NO_COLOR` env var.
#[must_use]
pub fn is_color_disabled() -> bool {
    std::env::var("NO_COLOR").is_ok()
}

/// Banner text for interactive sessions.
#[must_use]
pub fn banner(quit_word: &str) -> String {
    let rule = "-".repeat(TITLE.len() + 8);
    format!("{rule}\n    {TITLE}    \nType '{quit_word}' to exit\n{rule}")
}

fn styled_banner(quit_word: &str) -> String {
    let text = banner(quit_word);
    if is_color_disabled() {
        text
    } else {
        style(text).bold().cyan().to_string()
    }
}

/// Banner followed by [`PROMPT`], shown before every filename is read.
#[must_use]
pub fn banner_prompt(quit_word: &str) -> String {
    format!("{}\n{PROMPT}", styled_banner(quit_word))
}

/// Print an error message.
pub fn print_error(text: &str) {
    if is_color_disabled() {
        eprintln!("[ERROR] {text}");
    } else {
        eprintln!("{} {text}", style("[ERROR]").red().bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_names_quit_word() {
        let text = banner("STOP");
        assert!(text.contains(TITLE));
        assert!(text.contains("Type 'STOP' to exit"));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn banner_prompt_ends_with_prompt() {
        let text = banner_prompt("QUIT");
        assert!(text.contains(TITLE));
        assert!(text.contains("Type 'QUIT' to exit"));
        assert!(text.ends_with(&format!("\n{PROMPT}")));
    }

    #[test]
    fn print_error_does_not_panic() {
        print_error("Something went wrong");
        print_error("");
    }
}
