//
//  artifactory-client
//  api/v1/system.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! System endpoints: health check and server version.

use std::sync::Arc;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::Client;
use crate::api::common::{media_types, ApiError, ApiResponse};

/// Server version information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Product version, e.g. `7.71.3`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Build revision.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Installed add-ons.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub addons: Option<Vec<String>>,
    /// License hash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
}

/// System endpoints.
#[derive(Debug, Clone)]
pub struct SystemService {
    client: Arc<Client>,
}

impl SystemService {
    /// Creates the service over a shared client.
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// Checks that the server is up.
    ///
    /// `GET /api/system/ping`; a healthy server answers `OK`.
    pub async fn ping(&self) -> Result<(String, ApiResponse), ApiError> {
        let request = self
            .client
            .new_request(Method::GET, "api/system/ping", None)?
            .accept(media_types::TEXT)?;

        let (text, response) = self.client.execute_text(request).await?;
        Ok((text.trim().to_string(), response))
    }

    /// Returns the server version and installed add-ons.
    ///
    /// `GET /api/system/version`.
    pub async fn version(&self) -> Result<(VersionInfo, ApiResponse), ApiError> {
        let request = self
            .client
            .new_request(Method::GET, "api/system/version", None)?
            .accept(media_types::VERSION)?;

        self.client.execute_decode(request).await
    }
}
