//! Semantic equality of Thing Descriptions
//!
//! Two documents are equal when they are field-for-field identical under JSON
//! semantics:
//!
//! - objects: same key set, members recursively equal; key order is ignored
//! - arrays: same length, elements recursively equal in order
//! - numbers: compared by value, so `1`, `1.0` and `1.00` are equal
//! - other scalars: same type and value; `null` equals only `null`
//!
//! No field is excluded implicitly. Fields the directory assigns (`id`,
//! `registration`) must be copied into the expectation first, see
//! [`adopt_system_fields`].

use crate::{fields, ThingDescription};
use serde::Serialize;
use serde_json::{Number, Value};
use std::fmt;

/// Whether two TDs are semantically equal.
pub fn equal(expected: &ThingDescription, actual: &ThingDescription) -> bool {
    objects_equal(expected, actual)
}

/// Whether two JSON values are semantically equal.
pub fn values_equal(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Object(a), Value::Object(b)) => objects_equal(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| values_equal(x, y))
        }
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

fn objects_equal(a: &ThingDescription, b: &ThingDescription) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .all(|(key, value)| b.get(key).is_some_and(|other| values_equal(value, other)))
}

/// Integers compare exactly; a float on either side compares as `f64`.
fn numbers_equal(a: &Number, b: &Number) -> bool {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (a.as_u64(), b.as_u64()) {
        return x == y;
    }
    if a.is_f64() || b.is_f64() {
        if let (Some(x), Some(y)) = (a.as_f64(), b.as_f64()) {
            return x == y;
        }
    }
    false
}

/// The first location where two documents differ
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Difference {
    /// JSON pointer to the differing member (`""` for the document root)
    pub pointer: String,
    /// Value in the expected document, `None` if the member is missing there
    pub expected: Option<Value>,
    /// Value in the actual document, `None` if the member is missing there
    pub actual: Option<Value>,
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let render = |value: &Option<Value>| match value {
            Some(v) => v.to_string(),
            None => "<missing>".to_string(),
        };
        let pointer = if self.pointer.is_empty() {
            "/"
        } else {
            self.pointer.as_str()
        };
        write!(
            f,
            "at {}: expected {}, got {}",
            pointer,
            render(&self.expected),
            render(&self.actual)
        )
    }
}

/// Locate the first difference between two TDs, or `None` if they are equal.
///
/// Object members are visited in sorted key order so the reported location
/// does not depend on serialization order.
pub fn first_difference(
    expected: &ThingDescription,
    actual: &ThingDescription,
) -> Option<Difference> {
    let mut pointer = String::new();
    object_difference(expected, actual, &mut pointer)
}

fn value_difference(expected: &Value, actual: &Value, pointer: &mut String) -> Option<Difference> {
    match (expected, actual) {
        (Value::Object(a), Value::Object(b)) => object_difference(a, b, pointer),
        (Value::Array(a), Value::Array(b)) if a.len() == b.len() => {
            a.iter().zip(b).enumerate().find_map(|(index, (x, y))| {
                let len = pointer.len();
                pointer.push('/');
                pointer.push_str(&index.to_string());
                let found = value_difference(x, y, pointer);
                pointer.truncate(len);
                found
            })
        }
        _ if values_equal(expected, actual) => None,
        _ => Some(Difference {
            pointer: pointer.clone(),
            expected: Some(expected.clone()),
            actual: Some(actual.clone()),
        }),
    }
}

fn object_difference(
    expected: &ThingDescription,
    actual: &ThingDescription,
    pointer: &mut String,
) -> Option<Difference> {
    let mut keys: Vec<&String> = expected.keys().chain(actual.keys()).collect();
    keys.sort();
    keys.dedup();

    keys.into_iter().find_map(|key| {
        let len = pointer.len();
        pointer.push('/');
        pointer.push_str(&escape_pointer_token(key));
        let found = match (expected.get(key), actual.get(key)) {
            (Some(x), Some(y)) => value_difference(x, y, pointer),
            (x, y) => Some(Difference {
                pointer: pointer.clone(),
                expected: x.cloned(),
                actual: y.cloned(),
            }),
        };
        pointer.truncate(len);
        found
    })
}

fn escape_pointer_token(token: &str) -> String {
    token.replace('~', "~0").replace('/', "~1")
}

/// Copy the directory-assigned fields from a retrieved TD into an expectation.
///
/// A field the retrieved document lacks is removed from the expectation too.
pub fn adopt_system_fields(expected: &mut ThingDescription, actual: &ThingDescription) {
    adopt_fields(expected, actual, &fields::SYSTEM_MANAGED);
}

/// Copy the named fields from `actual` into `expected`.
pub fn adopt_fields(expected: &mut ThingDescription, actual: &ThingDescription, names: &[&str]) {
    for name in names {
        match actual.get(*name) {
            Some(value) => {
                expected.insert((*name).to_string(), value.clone());
            }
            None => {
                expected.remove(*name);
            }
        }
    }
}
