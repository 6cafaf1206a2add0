//! End-to-end lifecycle of one TD

use super::{create_thing, retrieve_thing, Steps};
use crate::assertions::{assert_semantic_eq, assert_status};
use crate::reports::TestResult;
use serde_json::json;
use tdd_client::DirectoryClient;
use tdd_model::{adopt_fields, build, fields, new_identifier, MergePatchDocument};

pub async fn run(client: &DirectoryClient) -> Vec<TestResult> {
    lifecycle(client).await
}

/// Create, remove an absent description, attempt to remove the title, delete.
pub async fn lifecycle(client: &DirectoryClient) -> Vec<TestResult> {
    let mut steps = Steps::new("lifecycle");
    let id = new_identifier();
    let mut td = build(Some(&id));

    if !steps.record("create", create_thing(client, &id, &td).await) {
        return steps.finish();
    }

    let mut remove_description = MergePatchDocument::new();
    remove_description.insert(fields::DESCRIPTION.to_string(), json!(null));
    let patched = async {
        let response = client.patch(&id, &remove_description).await?;
        assert_status(&response, 200)
    }
    .await;
    steps.record("remove_absent_description", patched);

    let unchanged = async {
        let stored = retrieve_thing(client, &id).await?;
        adopt_fields(&mut td, &stored, &[fields::REGISTRATION]);
        assert_semantic_eq(&td, &stored)
    }
    .await;
    steps.record("unchanged_after_description_removal", unchanged);

    let mut remove_title = MergePatchDocument::new();
    remove_title.insert(fields::TITLE.to_string(), json!(null));
    let rejected = async { assert_status(&client.patch(&id, &remove_title).await?, 400) }.await;
    steps.record_rejection("remove_title", rejected);

    let deleted = async { assert_status(&client.delete(&id).await?, 200) }.await;
    steps.record("delete", deleted);

    let gone = async { assert_status(&client.retrieve(&id).await?, 404) }.await;
    steps.record("retrieve_after_delete", gone);
    steps.finish()
}
