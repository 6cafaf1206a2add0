//! Thing identifiers

use uuid::Uuid;

/// Marker carried by identifiers the directory mints for anonymous TDs.
pub const BLANK_NODE_MARKER: &str = "_:";

/// Mint a fresh, globally unique client-side identifier.
pub fn new_identifier() -> String {
    format!("urn:uuid:{}", Uuid::new_v4())
}

/// Whether `id` is a system-generated blank-node identifier.
pub fn is_system_generated(id: &str) -> bool {
    id.contains(BLANK_NODE_MARKER)
}
