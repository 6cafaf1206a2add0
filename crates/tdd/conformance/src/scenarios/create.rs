//! Creation scenarios: anonymous POST and explicit PUT

use super::{cleanup, retrieve_thing, Steps};
use crate::assertions::{assert_semantic_eq, assert_status};
use crate::error::{ScenarioError, StepResult};
use crate::reports::TestResult;
use tdd_client::{identifier_from_location, DirectoryClient, DirectoryResponse};
use tdd_model::{
    adopt_fields, adopt_system_fields, build, fields, is_system_generated, new_identifier,
};

pub async fn run(client: &DirectoryClient) -> Vec<TestResult> {
    let mut results = Vec::new();
    results.extend(create_anonymous(client).await);
    results.extend(create_with_id(client).await);
    results.extend(create_id_mismatch());
    results.extend(post_with_id(client).await);
    results
}

/// POST without an id: 201, a blank-node identifier in Location, and the
/// stored TD equals the submitted one once `id` and `registration` are adopted.
pub async fn create_anonymous(client: &DirectoryClient) -> Vec<TestResult> {
    let mut steps = Steps::new("create_anonymous");
    let mut td = build(None);

    let Some(response) = steps.require(
        "request",
        client.create_anonymous(&td).await.map_err(Into::into),
    ) else {
        return steps.finish();
    };
    steps.record("status_code", assert_status(&response, 201));

    let location = system_generated_id(&response);
    let id = location.as_ref().ok().cloned();
    steps.record("location_header", location.map(|_| ()));

    let Some(id) = id else {
        steps.skip("result", "no system-generated identifier to retrieve");
        if let Some(location) = response.location().filter(|l| !l.trim().is_empty()) {
            cleanup(client, &identifier_from_location(location)).await;
        }
        return steps.finish();
    };

    let outcome = async {
        let stored = retrieve_thing(client, &id).await?;
        adopt_system_fields(&mut td, &stored);
        assert_semantic_eq(&td, &stored)
    }
    .await;
    steps.record("result", outcome);
    cleanup(client, &id).await;
    steps.finish()
}

fn system_generated_id(response: &DirectoryResponse) -> StepResult<String> {
    let location = response
        .location()
        .filter(|l| !l.trim().is_empty())
        .ok_or(ScenarioError::MissingLocation)?;
    if !is_system_generated(location) {
        return Err(ScenarioError::NotSystemGenerated(location.to_string()));
    }
    Ok(identifier_from_location(location))
}

/// PUT under a fresh id: 201, and the stored TD equals the submitted one once
/// `registration` is adopted.
pub async fn create_with_id(client: &DirectoryClient) -> Vec<TestResult> {
    let mut steps = Steps::new("create_with_id");
    let id = new_identifier();
    let mut td = build(Some(&id));

    if let Some(response) = steps.require(
        "request",
        client.create(&id, &td).await.map_err(Into::into),
    ) {
        steps.record("status_code", assert_status(&response, 201));

        let outcome = async {
            let stored = retrieve_thing(client, &id).await?;
            adopt_fields(&mut td, &stored, &[fields::REGISTRATION]);
            assert_semantic_eq(&td, &stored)
        }
        .await;
        steps.record("result", outcome);
    }
    cleanup(client, &id).await;
    steps.finish()
}

/// PUT whose body id differs from the path id.
///
/// Rejecting this is not normative behavior for directories, so the case is
/// reported but never run.
pub fn create_id_mismatch() -> Vec<TestResult> {
    let mut steps = Steps::new("create_id_mismatch");
    steps.skip(
        "status_code",
        "rejecting a PUT whose body id differs from the path is not normative",
    );
    steps.finish()
}

/// POST of a TD that already carries an id must be rejected with 400.
pub async fn post_with_id(client: &DirectoryClient) -> Vec<TestResult> {
    let mut steps = Steps::new("post_with_id");
    let id = new_identifier();
    let td = build(Some(&id));

    let outcome = async {
        let response = client.create_anonymous(&td).await?;
        if response.is_success() {
            // accepted by mistake; remove whatever was stored
            if let Some(location) = response.location() {
                cleanup(client, &identifier_from_location(location)).await;
            }
        }
        assert_status(&response, 400)
    }
    .await;
    steps.record_rejection("status_code", outcome);
    steps.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdd_client::header::{HeaderMap, HeaderValue, LOCATION};
    use tdd_client::{Bytes, StatusCode};

    fn created(location: Option<&str>) -> DirectoryResponse {
        let mut headers = HeaderMap::new();
        if let Some(location) = location {
            headers.insert(LOCATION, HeaderValue::from_str(location).unwrap());
        }
        DirectoryResponse::new(StatusCode::CREATED, headers, Bytes::new())
    }

    #[test]
    fn test_location_with_blank_node() {
        let id = system_generated_id(&created(Some("/things/_:f00d"))).unwrap();
        assert_eq!(id, "_:f00d");
    }

    #[test]
    fn test_location_missing_or_not_blank_node() {
        assert!(matches!(
            system_generated_id(&created(None)),
            Err(ScenarioError::MissingLocation)
        ));
        assert!(matches!(
            system_generated_id(&created(Some("/things/urn:uuid:1"))),
            Err(ScenarioError::NotSystemGenerated(_))
        ));
    }

    #[test]
    fn test_id_mismatch_is_skipped() {
        let results = create_id_mismatch();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].status, crate::reports::TestStatus::Skipped);
    }
}
