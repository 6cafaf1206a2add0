//! Directory operations over HTTP

use crate::config::DirectoryConfig;
use crate::error::{ClientError, ClientResult};
use crate::media;
use crate::response::DirectoryResponse;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};
use tdd_model::{MergePatchDocument, ThingDescription};
use tracing::debug;

/// Path of the TD collection
pub const THINGS_PATH: &str = "/things";
/// Alias path for retrieving a single TD
pub const TD_PATH: &str = "/td";

/// HTTP client for the directory under test
pub struct DirectoryClient {
    client: Client,
    config: DirectoryConfig,
}

impl DirectoryClient {
    /// Create a client. Every request is bounded by the configured deadlines.
    pub fn new(config: DirectoryConfig) -> ClientResult<Self> {
        reqwest::Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;

        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// POST a TD without an identifier; the directory mints one.
    pub async fn create_anonymous(&self, td: &ThingDescription) -> ClientResult<DirectoryResponse> {
        let body = serde_json::to_vec(td)?;
        self.send(
            Method::POST,
            &format!("{}/", THINGS_PATH),
            Some((media::THING_DESCRIPTION, body)),
        )
        .await
    }

    /// PUT a TD under a client-chosen identifier.
    pub async fn create(&self, id: &str, td: &ThingDescription) -> ClientResult<DirectoryResponse> {
        self.put(id, td).await
    }

    /// PUT a TD over an existing one.
    pub async fn replace(&self, id: &str, td: &ThingDescription) -> ClientResult<DirectoryResponse> {
        self.put(id, td).await
    }

    /// PATCH a TD with a merge-patch document.
    pub async fn patch(
        &self,
        id: &str,
        patch: &MergePatchDocument,
    ) -> ClientResult<DirectoryResponse> {
        self.patch_raw(id, serde_json::to_vec(patch)?).await
    }

    /// PATCH a TD with a pre-serialized merge-patch body.
    pub async fn patch_raw(&self, id: &str, body: Vec<u8>) -> ClientResult<DirectoryResponse> {
        self.send(
            Method::PATCH,
            &thing_path(THINGS_PATH, id),
            Some((media::MERGE_PATCH, body)),
        )
        .await
    }

    /// GET a TD from the collection path.
    pub async fn retrieve(&self, id: &str) -> ClientResult<DirectoryResponse> {
        self.send(Method::GET, &thing_path(THINGS_PATH, id), None)
            .await
    }

    /// GET a TD through the `/td/{id}` alias.
    pub async fn retrieve_td(&self, id: &str) -> ClientResult<DirectoryResponse> {
        self.send(Method::GET, &thing_path(TD_PATH, id), None).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<DirectoryResponse> {
        self.send(Method::DELETE, &thing_path(THINGS_PATH, id), None)
            .await
    }

    /// GET the whole collection.
    pub async fn list(&self) -> ClientResult<DirectoryResponse> {
        self.send(Method::GET, THINGS_PATH, None).await
    }

    async fn put(&self, id: &str, td: &ThingDescription) -> ClientResult<DirectoryResponse> {
        let body = serde_json::to_vec(td)?;
        self.send(
            Method::PUT,
            &thing_path(THINGS_PATH, id),
            Some((media::THING_DESCRIPTION, body)),
        )
        .await
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<(&str, Vec<u8>)>,
    ) -> ClientResult<DirectoryResponse> {
        let url = self.config.url(path);
        let mut request = self.client.request(method.clone(), &url);
        if let Some((content_type, bytes)) = body {
            request = request.header(CONTENT_TYPE, content_type).body(bytes);
        }

        let response = DirectoryResponse::read(request.send().await?).await?;
        debug!(
            method = %method,
            path = path,
            status = response.status(),
            "directory round-trip"
        );
        Ok(response)
    }
}

fn thing_path(prefix: &str, id: &str) -> String {
    format!("{}/{}", prefix, id)
}

/// Extract the identifier from a `Location` header.
///
/// Accepts an absolute URL or path ending in `/things/{id}` or `/td/{id}`, or
/// the bare identifier itself.
pub fn identifier_from_location(location: &str) -> String {
    let location = location.trim();
    [THINGS_PATH, TD_PATH]
        .iter()
        .filter_map(|prefix| {
            let marker = format!("{}/", prefix);
            location
                .rfind(&marker)
                .map(|index| &location[index + marker.len()..])
        })
        .next()
        .unwrap_or(location)
        .to_string()
}
