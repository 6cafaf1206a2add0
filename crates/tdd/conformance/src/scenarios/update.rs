//! Full replacement scenario

use super::{cleanup, create_thing, retrieve_thing, Steps};
use crate::assertions::{assert_semantic_eq, assert_status};
use crate::reports::TestResult;
use tdd_client::DirectoryClient;
use tdd_model::{adopt_fields, build, fields, new_identifier, ThingBuilder};

pub const UPDATED_TITLE: &str = "updated title";

pub async fn run(client: &DirectoryClient) -> Vec<TestResult> {
    replace(client).await
}

/// PUT over an existing TD replaces it; only `registration` is server-owned.
pub async fn replace(client: &DirectoryClient) -> Vec<TestResult> {
    let mut steps = Steps::new("update");
    let id = new_identifier();

    if steps
        .require("setup", create_thing(client, &id, &build(Some(&id))).await)
        .is_none()
    {
        return steps.finish();
    }

    let mut replacement = ThingBuilder::new().id(&id).title(UPDATED_TITLE).build();

    if let Some(response) = steps.require(
        "request",
        client.replace(&id, &replacement).await.map_err(Into::into),
    ) {
        steps.record("status_code", assert_status(&response, 200));

        let outcome = async {
            let stored = retrieve_thing(client, &id).await?;
            adopt_fields(&mut replacement, &stored, &[fields::REGISTRATION]);
            assert_semantic_eq(&replacement, &stored)
        }
        .await;
        steps.record("result", outcome);
    }
    cleanup(client, &id).await;
    steps.finish()
}
