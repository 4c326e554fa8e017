//
//  artifactory-client
//  api/v2/security.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Permission targets under `/api/v2/security/permissions`.
//!
//! A permission target grants actions on a set of resources (repositories,
//! builds or release bundles) to users and groups:
//!
//! ```json
//! {
//!   "name": "deployers",
//!   "repo": {
//!     "repositories": ["libs-local"],
//!     "include_patterns": ["**"],
//!     "actions": {"users": {"ci": ["read", "write"]}}
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::Client;
use crate::api::common::{ApiError, ApiResponse};

/// Entry of the permission target listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTargetSummary {
    /// Permission target name.
    pub name: String,
    /// Link to the full permission target resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

/// A permission target.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionTarget {
    /// Permission target name, also used as the URL key.
    pub name: String,
    /// Repository permissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<PermissionResource>,
    /// Build info permissions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build: Option<PermissionResource>,
    /// Release bundle permissions.
    #[serde(
        rename = "releaseBundle",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub release_bundle: Option<PermissionResource>,
}

/// Resources covered by a permission target and who may act on them.
///
/// An empty list and an absent one are distinct and both survive a
/// fetch-then-replace cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionResource {
    /// Repository keys, or `ANY`, `ANY LOCAL`, `ANY REMOTE`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repositories: Option<Vec<String>>,
    /// Ant-style patterns of paths covered, e.g. `**`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_patterns: Option<Vec<String>>,
    /// Ant-style patterns of paths excluded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_patterns: Option<Vec<String>>,
    /// Who may do what on the resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<PermissionActions>,
}

/// Granted actions keyed by user or group name.
///
/// Action names are `read`, `write`, `annotate`, `delete`, `manage`,
/// `managedXrayMeta` and `distribute`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionActions {
    /// Actions granted per user name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<BTreeMap<String, Vec<String>>>,
    /// Actions granted per group name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<BTreeMap<String, Vec<String>>>,
}

/// Permission target endpoints.
#[derive(Debug, Clone)]
pub struct SecurityService {
    client: Arc<Client>,
}

impl SecurityService {
    /// Creates the service over a shared client.
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// Lists all permission targets.
    pub async fn list_permission_targets(
        &self,
    ) -> Result<(Vec<PermissionTargetSummary>, ApiResponse), ApiError> {
        let request = self
            .client
            .new_request(Method::GET, "api/v2/security/permissions", None)?;
        self.client.execute_decode(request).await
    }

    /// Returns a permission target.
    pub async fn get_permission_target(
        &self,
        name: &str,
    ) -> Result<(PermissionTarget, ApiResponse), ApiError> {
        let request = self
            .client
            .new_request(Method::GET, &permission_path(name), None)?;
        self.client.execute_decode(request).await
    }

    /// Creates a permission target.
    ///
    /// `POST /api/v2/security/permissions/{name}`; fails with 409 when it
    /// already exists.
    pub async fn create_permission_target(
        &self,
        target: &PermissionTarget,
    ) -> Result<ApiResponse, ApiError> {
        let request =
            self.client
                .new_json_request(Method::POST, &permission_path(&target.name), target)?;
        self.client.execute_empty(request).await
    }

    /// Replaces an existing permission target.
    ///
    /// `PUT /api/v2/security/permissions/{name}`.
    pub async fn replace_permission_target(
        &self,
        target: &PermissionTarget,
    ) -> Result<ApiResponse, ApiError> {
        let request =
            self.client
                .new_json_request(Method::PUT, &permission_path(&target.name), target)?;
        self.client.execute_empty(request).await
    }

    /// Deletes a permission target.
    pub async fn delete_permission_target(&self, name: &str) -> Result<ApiResponse, ApiError> {
        let request = self
            .client
            .new_request(Method::DELETE, &permission_path(name), None)?;
        self.client.execute_empty(request).await
    }

    /// Returns whether a permission target exists.
    ///
    /// A 404 maps to `Ok(false)`; other failures are returned.
    pub async fn permission_target_exists(&self, name: &str) -> Result<bool, ApiError> {
        let request = self
            .client
            .new_request(Method::HEAD, &permission_path(name), None)?;
        match self.client.execute_empty(request).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

fn permission_path(name: &str) -> String {
    format!("api/v2/security/permissions/{}", name)
}
