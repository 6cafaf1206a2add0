//! Media types used by the directory interface

pub const JSON: &str = "application/json";
/// Collection (list) responses
pub const JSON_LD: &str = "application/ld+json";
/// Single Thing Description bodies
pub const THING_DESCRIPTION: &str = "application/td+json";
/// PATCH request bodies
pub const MERGE_PATCH: &str = "application/merge-patch+json";

/// Media type of a Content-Type value, without parameters, lowercased.
pub fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

/// Whether two Content-Type values carry the same media type.
pub fn same_media_type(a: &str, b: &str) -> bool {
    essence(a) == essence(b)
}
