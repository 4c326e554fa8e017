//
//  artifactory-client
//  api/v2/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Artifactory REST API v2
//!
//! Endpoints rooted at `{base}/api/v2/...`. Only the security resources
//! (permission targets) live here.

use std::sync::Arc;

use crate::api::client::Client;

pub mod security;

pub use security::{
    PermissionActions, PermissionResource, PermissionTarget, PermissionTargetSummary,
    SecurityService,
};

/// The v2 service group.
#[derive(Debug, Clone)]
pub struct V2 {
    /// Permission targets.
    pub security: SecurityService,
}

impl V2 {
    /// Creates every v2 service over the same client.
    pub fn new(client: Arc<Client>) -> Self {
        Self {
            security: SecurityService::new(client),
        }
    }
}
