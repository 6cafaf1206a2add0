//! HTTP driver for Thing Description directories
//!
//! [`DirectoryClient`] issues the directory operations (create, retrieve,
//! replace, patch, delete, list) and hands back the raw
//! [`DirectoryResponse`]: status, headers and body. Non-2xx statuses are not
//! errors at this layer; deciding what is fatal belongs to the caller. Only
//! transport failures (connect, deadline, body read) surface as
//! [`ClientError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use tdd_client::{DirectoryClient, DirectoryConfig};
//!
//! let client = DirectoryClient::new(DirectoryConfig::new("http://localhost:8081"))?;
//! let td = tdd_model::build(Some("urn:uuid:0b1a"));
//! let response = client.create("urn:uuid:0b1a", &td).await?;
//! assert_eq!(response.status(), 201);
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod media;
pub mod response;

pub use config::DirectoryConfig;
pub use driver::{identifier_from_location, DirectoryClient};
pub use error::{ClientError, ClientResult};
pub use response::DirectoryResponse;

pub use bytes::Bytes;
pub use reqwest::{header, StatusCode};
