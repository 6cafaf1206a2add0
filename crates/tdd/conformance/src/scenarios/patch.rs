//! Partial update scenarios
//!
//! Each [`PatchCase`] is a fixture, a merge patch and the status the directory
//! must answer with. One runner drives every case: create the fixture, PATCH
//! it, then compare the stored TD with the expectation the merge-patch oracle
//! computes from the pre-image. When the directory must reject the patch the
//! pre-image itself stays the expectation; the computed document is never
//! used.

use super::{cleanup, create_thing, retrieve_thing, Steps};
use crate::assertions::{assert_semantic_eq, assert_status};
use crate::reports::TestResult;
use serde_json::{json, Value};
use tdd_client::DirectoryClient;
use tdd_model::{
    adopt_fields, build, fields, merge_patch, new_identifier, MergePatchDocument, ThingBuilder,
    ThingDescription,
};

/// How the stored TD relates to the pre-image after the PATCH
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Stored TD equals the pre-image with the patch merged in
    Merge,
    /// Stored TD equals the pre-image
    Unchanged,
}

/// One partial update case
pub struct PatchCase {
    pub name: &'static str,
    pub fixture: fn(&str) -> ThingDescription,
    pub patch: MergePatchDocument,
    pub expected_status: u16,
    pub transform: Transform,
}

impl PatchCase {
    /// The TD the directory should hold after the PATCH.
    pub fn expectation(&self, pre_image: &ThingDescription) -> ThingDescription {
        match self.transform {
            Transform::Merge => merge_patch::apply(pre_image, &self.patch),
            Transform::Unchanged => pre_image.clone(),
        }
    }
}

fn document(value: Value) -> MergePatchDocument {
    match value {
        Value::Object(map) => map,
        _ => MergePatchDocument::new(),
    }
}

fn plain(id: &str) -> ThingDescription {
    build(Some(id))
}

fn described(id: &str) -> ThingDescription {
    ThingBuilder::new()
        .id(id)
        .description("a thing with a description")
        .build()
}

fn with_status_property(id: &str) -> ThingDescription {
    ThingBuilder::new()
        .id(id)
        .property("status", ["https://example.com/status"])
        .build()
}

/// The partial update table.
pub fn cases() -> Vec<PatchCase> {
    vec![
        PatchCase {
            name: "update_title",
            fixture: plain,
            patch: document(json!({ "title": "patched title" })),
            expected_status: 200,
            transform: Transform::Merge,
        },
        PatchCase {
            name: "remove_description",
            fixture: described,
            patch: document(json!({ "description": null })),
            expected_status: 200,
            transform: Transform::Merge,
        },
        PatchCase {
            name: "remove_absent_description",
            fixture: plain,
            patch: document(json!({ "description": null })),
            expected_status: 200,
            transform: Transform::Merge,
        },
        PatchCase {
            name: "add_property",
            fixture: with_status_property,
            patch: document(json!({
                "properties": {
                    "brightness": { "forms": [{ "href": "https://example.com/brightness" }] }
                }
            })),
            expected_status: 200,
            transform: Transform::Merge,
        },
        PatchCase {
            name: "replace_forms_array",
            fixture: with_status_property,
            patch: document(json!({
                "properties": {
                    "status": {
                        "forms": [
                            { "href": "https://example.com/status/1" },
                            { "href": "https://example.com/status/2" }
                        ]
                    }
                }
            })),
            expected_status: 200,
            transform: Transform::Merge,
        },
        PatchCase {
            name: "remove_mandatory_title",
            fixture: plain,
            patch: document(json!({ "title": null })),
            expected_status: 400,
            transform: Transform::Unchanged,
        },
    ]
}

pub async fn run(client: &DirectoryClient) -> Vec<TestResult> {
    let mut results = Vec::new();
    for case in cases() {
        results.extend(run_case(client, &case).await);
    }
    results
}

/// Drive one case against the directory.
pub async fn run_case(client: &DirectoryClient, case: &PatchCase) -> Vec<TestResult> {
    let mut steps = Steps::new(format!("patch/{}", case.name));
    let id = new_identifier();
    let fixture = (case.fixture)(&id);

    if steps
        .require("setup", create_thing(client, &id, &fixture).await)
        .is_none()
    {
        return steps.finish();
    }
    patch_and_verify(client, case, &id, &mut steps).await;
    cleanup(client, &id).await;
    steps.finish()
}

async fn patch_and_verify(client: &DirectoryClient, case: &PatchCase, id: &str, steps: &mut Steps) {
    let Some(pre_image) = steps.require("setup", retrieve_thing(client, id).await) else {
        return;
    };
    let mut expected = case.expectation(&pre_image);

    let Some(response) = steps.require(
        "request",
        client.patch(id, &case.patch).await.map_err(Into::into),
    ) else {
        return;
    };
    let status = assert_status(&response, case.expected_status);
    if case.expected_status == 400 {
        steps.record_rejection("status_code", status);
    } else {
        steps.record("status_code", status);
    }

    let outcome = async {
        let stored = retrieve_thing(client, id).await?;
        adopt_fields(&mut expected, &stored, &[fields::REGISTRATION]);
        assert_semantic_eq(&expected, &stored)
    }
    .await;
    steps.record("result", outcome);
}
