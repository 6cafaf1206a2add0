//! Listing scenario

use super::{cleanup, create_thing, Steps};
use crate::assertions::{assert_media_type, assert_status};
use crate::error::{ScenarioError, StepResult};
use crate::reports::TestResult;
use serde_json::Value;
use tdd_client::{media, DirectoryClient, DirectoryResponse};
use tdd_model::{build, new_identifier, validation};

pub async fn run(client: &DirectoryClient) -> Vec<TestResult> {
    list(client).await
}

/// GET `/things`: 200, `application/ld+json`, and an array of TDs that each
/// carry a non-empty title. One TD is created first so the list is not empty.
pub async fn list(client: &DirectoryClient) -> Vec<TestResult> {
    let mut steps = Steps::new("list");
    let id = new_identifier();

    if steps
        .require("setup", create_thing(client, &id, &build(Some(&id))).await)
        .is_none()
    {
        return steps.finish();
    }

    if let Some(response) = steps.require("request", client.list().await.map_err(Into::into)) {
        steps.record("status_code", assert_status(&response, 200));
        steps.record("content_type", assert_media_type(&response, media::JSON_LD));
        steps.record("items", check_items(&response));
    }

    cleanup(client, &id).await;
    steps.finish()
}

/// Every listed item must be a TD with a non-empty title.
pub fn check_items(response: &DirectoryResponse) -> StepResult {
    let items = response
        .things()
        .map_err(|e| ScenarioError::InvalidPayload(e.to_string()))?;
    items.iter().enumerate().try_for_each(check_item)
}

fn check_item((index, item): (usize, &Value)) -> StepResult {
    validation::validate_value(item)
        .map(|_| ())
        .map_err(|e| ScenarioError::InvalidListItem {
            index,
            reason: e.to_string(),
            item: serde_json::to_string_pretty(item).unwrap_or_else(|_| item.to_string()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tdd_client::header::HeaderMap;
    use tdd_client::{Bytes, StatusCode};

    fn listed(body: &str) -> DirectoryResponse {
        DirectoryResponse::new(StatusCode::OK, HeaderMap::new(), Bytes::from(body.to_string()))
    }

    #[test]
    fn test_items_with_titles() {
        let response = listed(r#"[{"title": "a"}, {"title": "b", "id": "urn:uuid:1"}]"#);
        assert!(check_items(&response).is_ok());
        assert!(check_items(&listed("[]")).is_ok());
    }

    #[test]
    fn test_item_without_title() {
        let response = listed(r#"[{"title": "a"}, {"id": "urn:uuid:2"}]"#);
        match check_items(&response) {
            Err(ScenarioError::InvalidListItem { index, item, .. }) => {
                assert_eq!(index, 1);
                assert!(item.contains("urn:uuid:2"));
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_body_not_an_array() {
        assert!(matches!(
            check_items(&listed(r#"{"title": "a"}"#)),
            Err(ScenarioError::InvalidPayload(_))
        ));
    }
}
