//! Thing Description model for directory conformance testing
//!
//! A Thing Description (TD) is kept as dynamic JSON rather than a fixed schema:
//! only `title` is mandatory and everything else is free-form. This crate holds
//! the reusable pieces the conformance scenarios are built on:
//!
//! - **Builder**: minimal, valid TD fixtures, optionally carrying an `id`
//! - **Merge-patch oracle**: predicts the document a directory must hold after
//!   a JSON merge patch (RFC 7396)
//! - **Semantic equality**: deep comparison that ignores key order and numeric
//!   representation, reporting the first differing location
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use tdd_model::{builder, equality, merge_patch, MergePatchDocument};
//!
//! let td = builder::build(Some("urn:uuid:0b1a"));
//! let patch: MergePatchDocument = serde_json::from_value(json!({"title": "lamp"})).unwrap();
//! let expected = merge_patch::apply(&td, &patch);
//!
//! assert_eq!(expected["title"], "lamp");
//! assert!(equality::equal(&expected, &merge_patch::apply(&expected, &patch)));
//! ```

pub mod builder;
pub mod equality;
pub mod error;
pub mod identifier;
pub mod merge_patch;
pub mod validation;

pub use builder::{build, ThingBuilder};
pub use equality::{adopt_fields, adopt_system_fields, equal, first_difference, Difference};
pub use error::{ModelError, ModelResult};
pub use identifier::{is_system_generated, new_identifier};
pub use merge_patch::{apply, merge_value};
pub use validation::validate_minimum;

/// A Thing Description document.
pub type ThingDescription = serde_json::Map<String, serde_json::Value>;

/// A JSON merge-patch document.
pub type MergePatchDocument = serde_json::Map<String, serde_json::Value>;

/// Well-known TD field names.
pub mod fields {
    pub const ID: &str = "id";
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const PROPERTIES: &str = "properties";
    pub const FORMS: &str = "forms";
    pub const HREF: &str = "href";
    pub const REGISTRATION: &str = "registration";
    pub const CONTEXT: &str = "@context";
    pub const SECURITY: &str = "security";
    pub const SECURITY_DEFINITIONS: &str = "securityDefinitions";

    /// Fields assigned by the directory that a client cannot predict.
    pub const SYSTEM_MANAGED: [&str; 2] = [ID, REGISTRATION];
}
