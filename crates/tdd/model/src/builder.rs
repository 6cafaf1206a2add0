//! Thing Description fixtures
//!
//! Every fixture satisfies [`validate_minimum`](crate::validate_minimum) so that
//! a failing scenario points at the directory feature under test, never at a
//! malformed fixture.

use crate::{fields, ThingDescription};
use serde_json::{json, Value};

/// TD 1.0 context URI.
pub const TD_CONTEXT: &str = "https://www.w3.org/2019/wot/td/v1";

/// Title given to fixtures that do not set one.
pub const DEFAULT_TITLE: &str = "example thing";

/// Build a minimal TD, with `id` set only when an identifier is given.
pub fn build(identifier: Option<&str>) -> ThingDescription {
    let mut builder = ThingBuilder::new();
    if let Some(id) = identifier {
        builder = builder.id(id);
    }
    builder.build()
}

/// Fluent builder for TD fixtures
#[derive(Debug, Clone)]
pub struct ThingBuilder {
    id: Option<String>,
    title: String,
    description: Option<String>,
    properties: Vec<(String, Vec<String>)>,
}

impl ThingBuilder {
    /// Start from the default fixture: no id, default title.
    pub fn new() -> Self {
        Self {
            id: None,
            title: DEFAULT_TITLE.to_string(),
            description: None,
            properties: Vec::new(),
        }
    }

    /// Set the client-supplied identifier.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Override the title. Empty titles fall back to the default.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        if !title.is_empty() {
            self.title = title;
        }
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a property affordance with one form per href, in order.
    pub fn property<I, S>(mut self, name: impl Into<String>, hrefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties
            .push((name.into(), hrefs.into_iter().map(Into::into).collect()));
        self
    }

    pub fn build(self) -> ThingDescription {
        let mut td = ThingDescription::new();
        td.insert(fields::CONTEXT.to_string(), json!(TD_CONTEXT));
        if let Some(id) = self.id {
            td.insert(fields::ID.to_string(), Value::String(id));
        }
        td.insert(fields::TITLE.to_string(), Value::String(self.title));
        if let Some(description) = self.description {
            td.insert(fields::DESCRIPTION.to_string(), Value::String(description));
        }
        td.insert(
            fields::SECURITY_DEFINITIONS.to_string(),
            json!({ "nosec_sc": { "scheme": "nosec" } }),
        );
        td.insert(fields::SECURITY.to_string(), json!(["nosec_sc"]));

        if !self.properties.is_empty() {
            let properties = self
                .properties
                .into_iter()
                .map(|(name, hrefs)| (name, affordance(&hrefs)))
                .collect::<serde_json::Map<_, _>>();
            td.insert(fields::PROPERTIES.to_string(), Value::Object(properties));
        }

        td
    }
}

impl Default for ThingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// An interaction affordance with one `{ "href": .. }` form per href.
pub fn affordance<S: AsRef<str>>(hrefs: &[S]) -> Value {
    let forms = hrefs
        .iter()
        .map(|href| json!({ "href": href.as_ref() }))
        .collect::<Vec<_>>();
    json!({ "forms": forms })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate_minimum;

    #[test]
    fn test_build_with_identifier() {
        let td = build(Some("urn:uuid:1234"));
        assert_eq!(td["id"], "urn:uuid:1234");
        assert!(validate_minimum(&td).is_ok());
    }

    #[test]
    fn test_build_anonymous_has_no_id() {
        let td = build(None);
        assert!(!td.contains_key("id"));
        assert!(!td.contains_key("registration"));
        assert!(validate_minimum(&td).is_ok());
    }

    #[test]
    fn test_empty_title_keeps_default() {
        let td = ThingBuilder::new().title("").build();
        assert_eq!(td["title"], DEFAULT_TITLE);
    }

    #[test]
    fn test_properties_keep_form_order() {
        let td = ThingBuilder::new()
            .description("a lamp")
            .property(
                "status",
                ["https://mylamp.example.com/status", "coaps://mylamp.example.com/status"],
            )
            .build();

        assert_eq!(td["description"], "a lamp");
        let forms = td["properties"]["status"]["forms"].as_array().unwrap();
        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0]["href"], "https://mylamp.example.com/status");
        assert_eq!(forms[1]["href"], "coaps://mylamp.example.com/status");
    }
}
