//! Request bodies, query strings and response shapes of the route handlers.
//!
//! Body fields are optional at the serde level so that a missing field is
//! reported by name instead of as a generic decoding failure.

pub mod account;
pub mod dashboard;
pub mod interaction;
pub mod learning;
pub mod progress;
pub mod public;
pub mod quiz;
pub mod users;

/// Names of the checks that failed, in declaration order.
fn missing(checks: &[(&'static str, bool)]) -> Vec<&'static str> {
    checks
        .iter()
        .filter(|(_, is_missing)| *is_missing)
        .map(|(name, _)| *name)
        .collect()
}

/// Blank strings count as missing.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
