//! Deletion scenarios

use super::{create_thing, Steps};
use crate::assertions::assert_status;
use crate::reports::TestResult;
use tdd_client::DirectoryClient;
use tdd_model::{build, new_identifier};

pub async fn run(client: &DirectoryClient) -> Vec<TestResult> {
    let mut results = Vec::new();
    results.extend(delete_existing(client).await);
    results.extend(delete_twice(client).await);
    results.extend(delete_missing(client).await);
    results
}

/// DELETE then GET: 200 and then 404.
pub async fn delete_existing(client: &DirectoryClient) -> Vec<TestResult> {
    let mut steps = Steps::new("delete_existing");
    let id = new_identifier();

    if steps
        .require("setup", create_thing(client, &id, &build(Some(&id))).await)
        .is_none()
    {
        return steps.finish();
    }

    let deleted = async { assert_status(&client.delete(&id).await?, 200) }.await;
    steps.record("status_code", deleted);

    let gone = async { assert_status(&client.retrieve(&id).await?, 404) }.await;
    steps.record("retrieve_after_delete", gone);
    steps.finish()
}

/// The second DELETE of one TD yields 404.
pub async fn delete_twice(client: &DirectoryClient) -> Vec<TestResult> {
    let mut steps = Steps::new("delete_twice");
    let id = new_identifier();

    if steps
        .require("setup", create_thing(client, &id, &build(Some(&id))).await)
        .is_none()
    {
        return steps.finish();
    }

    let first = async { assert_status(&client.delete(&id).await?, 200) }.await;
    steps.record("first_delete", first);

    let second = async { assert_status(&client.delete(&id).await?, 404) }.await;
    steps.record("second_delete", second);
    steps.finish()
}

/// DELETE of an identifier that was never created yields 404.
pub async fn delete_missing(client: &DirectoryClient) -> Vec<TestResult> {
    let mut steps = Steps::new("delete_missing");
    let id = new_identifier();

    let outcome = async { assert_status(&client.delete(&id).await?, 404) }.await;
    steps.record("status_code", outcome);
    steps.finish()
}
