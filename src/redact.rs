//! Redaction of credentials before they reach a log line.
//!
//! Pasted curl commands usually come straight out of a logged-in browser
//! session, so header values and URLs are masked before `tracing` sees them.

use std::borrow::Cow;

pub const REDACTED: &str = "[REDACTED]";

/// Maximum length of a logged value before truncation.
pub const MAX_VALUE_LENGTH: usize = 200;

const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "proxy-authorization",
    "cookie",
    "set-cookie",
];

const SENSITIVE_NAME_PARTS: &[&str] = &["token", "secret", "key", "session", "auth", "csrf"];

fn is_sensitive_name(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    SENSITIVE_HEADERS.contains(&lower.as_str())
        || SENSITIVE_NAME_PARTS.iter().any(|part| lower.contains(part))
}

fn is_credential_value(value: &str) -> bool {
    let lower = value.trim_start().to_ascii_lowercase();
    lower.starts_with("bearer ") || lower.starts_with("basic ")
}

/// Header value as it may appear in logs.
pub fn redact_header<'a>(name: &str, value: &'a str) -> Cow<'a, str> {
    if is_sensitive_name(name) || is_credential_value(value) {
        return Cow::Borrowed(REDACTED);
    }
    truncate(value)
}

/// Removes userinfo (username:password) from URLs before logging.
pub fn redact_url(url: &str) -> Cow<'_, str> {
    if let Some(scheme_end) = url.find("://") {
        let rest = &url[scheme_end + 3..];
        let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        if let Some(at_pos) = rest[..authority_end].rfind('@') {
            let scheme = &url[..scheme_end + 3];
            let host_part = &rest[at_pos + 1..];
            return Cow::Owned(format!("{scheme}{REDACTED}@{host_part}"));
        }
    }
    truncate(url)
}

/// Handles UTF-8 char boundaries so multi-byte values never split.
fn truncate(value: &str) -> Cow<'_, str> {
    if value.len() <= MAX_VALUE_LENGTH {
        return Cow::Borrowed(value);
    }
    let mut end = MAX_VALUE_LENGTH;
    while end > 0 && !value.is_char_boundary(end) {
        end -= 1;
    }
    Cow::Owned(format!(
        "{}...[truncated {} bytes]",
        &value[..end],
        value.len() - end
    ))
}
