//! Input validation for the create-server form
//!
//! The URL grammar is intentionally permissive: it accepts bare hostnames,
//! dotted-quad IPv4 addresses, an optional scheme, port, path, query and
//! fragment. Anything the grammar rejects gets the shared inline message.

use regex::Regex;
use std::sync::LazyLock;

/// Maximum length of a server display name, in characters
pub const SERVER_NAME_MAX_LENGTH: usize = 100;

/// Inline error messages shared between validators and their callers
pub mod messages {
    pub const INVALID_URL: &str = "Please enter a valid IP address or URL.";
    pub const EMPTY_NAME: &str = "Please enter a name for your server.";
    pub const NAME_TOO_LONG: &str = "Server name cannot exceed 100 characters.";
}

// Anchored so partial matches never pass. Grammar: optional http(s) scheme,
// then either dotted domain labels ending in a 2+ letter TLD or an IPv4
// dotted quad, then optional port, path segments, query and fragment.
static SERVER_URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(https?://)?",
        r"((([a-z\d]([a-z\d-]*[a-z\d])*)\.?)+[a-z]{2,}|((\d{1,3}\.){3}\d{1,3}))",
        r"(:\d+)?(/[-a-z\d%_.~+]*)*",
        r"(\?[;&a-z\d%_.~+=-]*)?",
        r"(#[-a-z\d_]*)?$",
    ))
    .expect("server URL pattern must compile")
});

/// Check whether the input is an acceptable Jenkins server URL or IP.
///
/// Pure and stateless; empty and malformed input return `false`.
pub fn is_valid_server_url(input: &str) -> bool {
    SERVER_URL_PATTERN.is_match(input)
}

/// Validate a server display name against the centralized policy.
///
/// Returns the inline error message for an invalid name, `None` when the
/// name is acceptable. Whitespace-only names count as empty.
pub fn server_name_error(name: &str) -> Option<&'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        Some(messages::EMPTY_NAME)
    } else if trimmed.chars().count() > SERVER_NAME_MAX_LENGTH {
        Some(messages::NAME_TOO_LONG)
    } else {
        None
    }
}
