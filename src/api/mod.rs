//
//  artifactory-client
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! Typed access to the Artifactory REST API.
//!
//! ## Architecture
//!
//! - [`client`]: base URL handling, request building, execution and decoding
//! - [`common`]: the error taxonomy, response metadata and body decoders
//! - [`hooks`]: the request observer injected into the client
//! - [`v1`]: storage, deploy/download, search, replication, system, users
//! - [`v2`]: permission targets
//!
//! [`Artifactory`] bundles both service groups over one shared [`Client`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use artifactory_client::api::{Artifactory, Client};
//! use artifactory_client::auth::Credential;
//!
//! # async fn run() -> Result<(), artifactory_client::api::ApiError> {
//! let client = Client::builder("https://repo.example.com/artifactory")
//!     .credential(Credential::api_key("AKC..."))
//!     .build()?;
//! let rt = Artifactory::new(client);
//!
//! let (info, response) = rt.v1.artifacts.file_info("libs-local", "app/1.0/app.jar").await?;
//! println!("{} {:?}", response.status, info.checksums);
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiError`]. Failures after a response arrived
//! carry its [`ApiResponse`], so the status and headers are available on
//! both the success and the error path.

pub mod client;
pub mod common;
pub mod hooks;
pub mod v1;
pub mod v2;

use std::sync::Arc;

pub use client::{Body, Client, ClientBuilder, Request};
pub use common::{ApiError, ApiResponse, ErrorEnvelope};
pub use hooks::{
    NoopObserver, RequestEvent, RequestObserver, ResponseEvent, TracingObserver, TransferDirection,
    TransferEvent,
};

use v1::V1;
use v2::V2;

/// Container for every service group of an Artifactory instance.
#[derive(Debug, Clone)]
pub struct Artifactory {
    /// Services under `/api/...`.
    pub v1: V1,
    /// Services under `/api/v2/...`.
    pub v2: V2,
    client: Arc<Client>,
}

impl Artifactory {
    /// Creates the service groups over `client`.
    pub fn new(client: Client) -> Self {
        Self::from_shared(Arc::new(client))
    }

    /// Creates the service groups over an already shared client.
    pub fn from_shared(client: Arc<Client>) -> Self {
        Self {
            v1: V1::new(Arc::clone(&client)),
            v2: V2::new(Arc::clone(&client)),
            client,
        }
    }

    /// The client shared by all services, for endpoints not wrapped here.
    pub fn client(&self) -> &Arc<Client> {
        &self.client
    }
}
