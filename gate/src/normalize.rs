//! Login failure classification.
//!
//! The backend error taxonomy is free text, so login failures are bucketed by
//! literal substring rules into three user-facing messages. Rules are checked
//! in order; the first match wins.

#[cfg(test)]
#[path = "normalize_test.rs"]
mod normalize_test;

pub const INVALID_CREDENTIALS: &str = "Invalid email and/or password.";
pub const NOT_AUTHORIZED: &str = "You are not authorized to access this resource.";
pub const UNREACHABLE: &str = "Unable to authenticate with the server. Please try again.";

const CREDENTIAL_PATTERNS: &[&str] = &["invalid email", "invalid", "credential"];
const AUTHORIZATION_PATTERNS: &[&str] = &["forbidden", "unauthor"];

/// Map a raw backend error message to a user-readable login failure.
#[must_use]
pub fn normalize_auth_error(raw: &str) -> &'static str {
    let normalized = raw.to_lowercase();

    if CREDENTIAL_PATTERNS.iter().any(|p| normalized.contains(p)) {
        return INVALID_CREDENTIALS;
    }

    if AUTHORIZATION_PATTERNS.iter().any(|p| normalized.contains(p)) {
        return NOT_AUTHORIZED;
    }

    UNREACHABLE
}
