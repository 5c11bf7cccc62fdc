use std::sync::LazyLock;

use regex::Regex;

/// Script tag openers, `javascript:` URIs and inline `on*=` handlers.
static SCRIPT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<script|javascript:|on\w+=").expect("Invalid script pattern regex")
});

/// Reject input that obviously carries script.
///
/// A coarse filter in front of the escaped renderer, not a replacement
/// for it: plenty of hostile markup gets through, and escaping is what
/// keeps it inert.
pub fn validate_input(input: &str) -> bool {
    !SCRIPT_PATTERN.is_match(input)
}
