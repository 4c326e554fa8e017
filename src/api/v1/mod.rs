//
//  artifactory-client
//  api/v1/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Artifactory REST API v1
//!
//! Endpoints rooted at `{base}/api/...` plus the repository content root
//! `{base}/{repo}/{path}` used for deploy and download.
//!
//! ## Module Organization
//!
//! - [`artifacts`] - Storage info, upload, download, delete
//! - [`search`] - AQL queries
//! - [`replication`] - Replication configuration (single and multi-push)
//! - [`system`] - Ping and version
//! - [`security`] - Users
//!
//! All services share one [`Client`]; the groups are cheap to clone.

use std::sync::Arc;

use crate::api::client::Client;

pub mod artifacts;
pub mod replication;
pub mod search;
pub mod security;
pub mod system;

pub use artifacts::{matrix_params, ArtifactService, Checksums, FileInfo, Property};
pub use replication::{ReplicationConfig, ReplicationService, SingleReplicationConfig};
pub use search::{search_query, AqlProperty, AqlRange, AqlResult, AqlSearchResults};
pub use security::{SecurityService, User, UserSummary};
pub use system::{SystemService, VersionInfo};

/// The v1 service group.
#[derive(Debug, Clone)]
pub struct V1 {
    /// Storage, deploy, download and search.
    pub artifacts: ArtifactService,
    /// Repository replication.
    pub replication: ReplicationService,
    /// User management.
    pub security: SecurityService,
    /// Health check and version.
    pub system: SystemService,
}

impl V1 {
    /// Creates every v1 service over the same client.
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            artifacts: ArtifactService::new(Arc::clone(&client)),
            replication: ReplicationService::new(Arc::clone(&client)),
            security: SecurityService::new(Arc::clone(&client)),
            system: SystemService::new(client),
        }
    }
}
