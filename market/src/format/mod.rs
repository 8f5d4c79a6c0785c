use indicatif::{ProgressBar, ProgressStyle};
use libmarket::config::ColorChoice;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use std::time::Duration;

/// Decide whether to colorize a stream given the user's choice
pub fn should_color(choice: ColorChoice, is_terminal: bool) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => is_terminal && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Format an error line, with a red mark when colors are enabled
pub fn error_line(message: &str, color: bool) -> String {
    if color {
        format!("{} {}", "✗".red().bold(), message)
    } else {
        format!("✗ {}", message)
    }
}

/// Print an error message on stderr
pub fn error(choice: ColorChoice, message: &str) {
    let color = should_color(choice, std::io::stderr().is_terminal());
    eprintln!("{}", error_line(message, color));
}

/// Render an error followed by its sources: `outer: cause: root cause`
///
/// A cause is skipped only when the segment just before it already ends
/// with the same text, as reqwest and hyper errors often repeat their inner
/// error in their own message.
pub fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut previous = message.clone();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !previous.ends_with(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        previous = cause_text;
        source = cause.source();
    }
    message
}

/// Create a spinner on stderr, hidden when stderr is not a terminal
pub fn spinner(message: &str) -> ProgressBar {
    if !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
