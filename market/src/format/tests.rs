use super::*;
use libmarket::MarketError;

#[test]
fn test_should_color_always_and_never() {
    assert!(should_color(ColorChoice::Always, false));
    assert!(should_color(ColorChoice::Always, true));
    assert!(!should_color(ColorChoice::Never, true));
    assert!(!should_color(ColorChoice::Never, false));
}

#[test]
fn test_should_color_auto_without_terminal() {
    assert!(!should_color(ColorChoice::Auto, false));
}

#[test]
fn test_error_line_plain() {
    assert_eq!(error_line("boom", false), "✗ boom");
}

#[test]
fn test_error_line_colored_keeps_message() {
    let line = error_line("boom", true);
    assert!(line.ends_with(" boom"));
    assert!(line.contains('✗'));
    assert!(line.contains("\u{1b}["));
}

#[test]
fn test_error_chain_without_source() {
    let err = MarketError::decode("image with empty id");
    assert_eq!(error_chain(&err), "Decode error: image with empty id");
}

#[test]
fn test_error_chain_appends_sources() {
    let io_err = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let err = MarketError::network_with_source("Failed to connect to http://x", io_err);
    assert_eq!(
        error_chain(&err),
        "Network error: Failed to connect to http://x: refused"
    );
}

#[test]
fn test_error_chain_keeps_cause_found_inside_outer_message() {
    let io_err = std::io::Error::other("timed out");
    let err = MarketError::network_with_source("Request to http://x timed out after 5 seconds", io_err);
    assert_eq!(
        error_chain(&err),
        "Network error: Request to http://x timed out after 5 seconds: timed out"
    );
}

#[derive(Debug)]
struct Wrapped(std::io::Error);

impl std::fmt::Display for Wrapped {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "client error: {}", self.0)
    }
}

impl std::error::Error for Wrapped {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}

#[test]
fn test_error_chain_skips_cause_repeated_by_its_parent() {
    let wrapped = Wrapped(std::io::Error::other("connection reset"));
    let err = MarketError::network_with_source("Failed to read response", wrapped);
    assert_eq!(
        error_chain(&err),
        "Network error: Failed to read response: client error: connection reset"
    );
}

#[test]
fn test_spinner_can_be_finished() {
    let spinner = spinner("Fetching");
    spinner.set_message("Fetched 1 page");
    spinner.finish_and_clear();
}
