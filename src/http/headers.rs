//! Header lookup helpers.
//!
//! # Responsibilities
//! - Case-insensitive header lookup over gateway header maps
//! - Case-insensitive header replacement on outgoing maps
//!
//! # Design Decisions
//! - Gateways deliver headers with whatever casing the client sent, so no
//!   casing convention is assumed
//! - A missing header reads as an empty string, never an error

use std::collections::HashMap;

pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
pub const ACCESS_CONTROL_ALLOW_METHODS: &str = "Access-Control-Allow-Methods";
pub const ACCESS_CONTROL_ALLOW_HEADERS: &str = "Access-Control-Allow-Headers";
pub const ACCESS_CONTROL_REQUEST_HEADERS: &str = "access-control-request-headers";
pub const CONTENT_TYPE: &str = "Content-Type";

/// Returns the value of the first header whose name matches `name` ignoring
/// ASCII case, or `""` when no header matches.
pub fn header_value<'a>(headers: &'a HashMap<String, String>, name: &str) -> &'a str {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
        .unwrap_or("")
}

/// Sets `name` to `value`, dropping every existing entry that differs from
/// `name` only by case.
pub fn replace_header(headers: &mut HashMap<String, String>, name: &str, value: &str) {
    headers.retain(|key, _| !key.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value.to_string());
}
