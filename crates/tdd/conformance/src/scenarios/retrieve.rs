//! Retrieval scenarios

use super::{cleanup, create_thing, Steps};
use crate::assertions::{assert_media_type, assert_semantic_eq, assert_status};
use crate::error::ScenarioError;
use crate::reports::TestResult;
use tdd_client::{media, DirectoryClient, DirectoryResponse};
use tdd_model::{adopt_fields, build, fields, new_identifier, ThingDescription};

pub async fn run(client: &DirectoryClient) -> Vec<TestResult> {
    let mut results = Vec::new();
    results.extend(retrieve(client).await);
    results.extend(retrieve_td(client).await);
    results.extend(retrieve_missing(client).await);
    results
}

/// GET `/things/{id}` returns the stored TD as `application/td+json`.
pub async fn retrieve(client: &DirectoryClient) -> Vec<TestResult> {
    let mut steps = Steps::new("retrieve");
    let id = new_identifier();
    let td = build(Some(&id));

    if steps
        .require("setup", create_thing(client, &id, &td).await)
        .is_none()
    {
        return steps.finish();
    }

    if let Some(response) = steps.require(
        "request",
        client.retrieve(&id).await.map_err(Into::into),
    ) {
        check_stored(&mut steps, &response, td);
    }
    cleanup(client, &id).await;
    steps.finish()
}

/// GET `/td/{id}` returns the stored TD as `application/td+json`.
pub async fn retrieve_td(client: &DirectoryClient) -> Vec<TestResult> {
    let mut steps = Steps::new("retrieve_td");
    let id = new_identifier();
    let td = build(Some(&id));

    if steps
        .require("setup", create_thing(client, &id, &td).await)
        .is_none()
    {
        return steps.finish();
    }

    if let Some(response) = steps.require(
        "request",
        client.retrieve_td(&id).await.map_err(Into::into),
    ) {
        check_stored(&mut steps, &response, td);
    }
    cleanup(client, &id).await;
    steps.finish()
}

fn check_stored(steps: &mut Steps, response: &DirectoryResponse, mut expected: ThingDescription) {
    steps.record("status_code", assert_status(response, 200));
    steps.record(
        "content_type",
        assert_media_type(response, media::THING_DESCRIPTION),
    );

    let outcome = response
        .thing()
        .map_err(|e| ScenarioError::InvalidPayload(e.to_string()))
        .and_then(|stored| {
            adopt_fields(&mut expected, &stored, &[fields::REGISTRATION]);
            assert_semantic_eq(&expected, &stored)
        });
    steps.record("result", outcome);
}

/// GET of an identifier that was never created yields 404.
pub async fn retrieve_missing(client: &DirectoryClient) -> Vec<TestResult> {
    let mut steps = Steps::new("retrieve_missing");
    let id = new_identifier();

    let outcome = async {
        let response = client.retrieve(&id).await?;
        assert_status(&response, 404)
    }
    .await;
    steps.record("status_code", outcome);
    steps.finish()
}
