//! Raw directory responses

use crate::error::ClientResult;
use crate::media;
use bytes::Bytes;
use reqwest::header::{HeaderMap, CONTENT_TYPE, LOCATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tdd_model::ThingDescription;

/// Status, headers and body of one directory round-trip
#[derive(Debug, Clone)]
pub struct DirectoryResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Bytes,
}

impl DirectoryResponse {
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Read the full body of a reqwest response.
    pub(crate) async fn read(response: reqwest::Response) -> ClientResult<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        Ok(Self::new(status, headers, body))
    }

    pub fn status(&self) -> u16 {
        self.status.as_u16()
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Raw Content-Type header value.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }

    /// Content-Type without parameters, lowercased.
    pub fn media_type(&self) -> Option<String> {
        self.content_type().map(media::essence)
    }

    /// Location header value.
    pub fn location(&self) -> Option<&str> {
        self.headers.get(LOCATION).and_then(|v| v.to_str().ok())
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body as text, with invalid UTF-8 replaced.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> ClientResult<T> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Decode the body as a single Thing Description.
    pub fn thing(&self) -> ClientResult<ThingDescription> {
        self.json()
    }

    /// Decode the body as a collection of Thing Descriptions.
    pub fn things(&self) -> ClientResult<Vec<serde_json::Value>> {
        self.json()
    }
}
