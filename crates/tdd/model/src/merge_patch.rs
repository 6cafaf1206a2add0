//! Merge-patch oracle
//!
//! Predicts the document a directory must hold after applying a JSON merge
//! patch (RFC 7396):
//!
//! - a `null` member removes the key from the target (no-op if absent)
//! - an object member merged onto an object is merged recursively
//! - anything else replaces the target member wholesale; arrays are never
//!   merged element-wise
//! - keys the patch does not mention are untouched
//!
//! The oracle does not enforce minimum validity. A patch that removes `title`
//! yields a document without one, and it is up to the caller to expect the
//! directory to reject it.

use crate::{MergePatchDocument, ThingDescription};
use serde_json::Value;
use tracing::trace;

/// Apply `patch` to a copy of `target`.
pub fn apply(target: &ThingDescription, patch: &MergePatchDocument) -> ThingDescription {
    let mut result = target.clone();
    apply_in_place(&mut result, patch);
    result
}

/// Apply `patch` to `target` in place.
pub fn apply_in_place(target: &mut ThingDescription, patch: &MergePatchDocument) {
    for (key, patch_value) in patch {
        match patch_value {
            Value::Null => {
                if target.remove(key).is_some() {
                    trace!(key = key.as_str(), "merge patch removed member");
                }
            }
            Value::Object(_) => {
                merge_value(
                    target.entry(key.clone()).or_insert(Value::Null),
                    patch_value,
                );
            }
            replacement => {
                target.insert(key.clone(), replacement.clone());
            }
        }
    }
}

/// Merge `patch` into an arbitrary JSON value.
///
/// A non-object patch replaces the target outright, as does an object patch
/// applied to a non-object target.
pub fn merge_value(target: &mut Value, patch: &Value) {
    let Value::Object(patch_members) = patch else {
        *target = patch.clone();
        return;
    };
    match target {
        Value::Object(target_members) => apply_in_place(target_members, patch_members),
        _ => *target = Value::Object(without_nulls(patch_members)),
    }
}

// A patch object landing where no object existed is merged onto `{}`, so its
// null members vanish rather than being stored.
fn without_nulls(members: &MergePatchDocument) -> MergePatchDocument {
    let mut result = MergePatchDocument::new();
    apply_in_place(&mut result, members);
    result
}
