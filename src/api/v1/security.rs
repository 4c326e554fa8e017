//
//  artifactory-client
//  api/v1/security.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! User management under `/api/security/users`.

use std::sync::Arc;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::Client;
use crate::api::common::{media_types, ApiError, ApiResponse};

/// Entry of the user listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User name.
    pub name: String,
    /// Link to the full user resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    /// `internal`, `ldap`, `saml`...
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
}

/// A user account.
///
/// `password` is write-only: the server never returns it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// User name, also used as the URL key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address. Required when creating a user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Password. Required when creating an internal user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Whether the user is an administrator.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<bool>,
    /// Whether the user may edit their own profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_updatable: Option<bool>,
    /// Whether web UI login is blocked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disable_ui_access: Option<bool>,
    /// Whether the internal password is disabled, e.g. for SSO users.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_password_disabled: Option<bool>,
    /// ISO 8601 timestamp of the last login.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_logged_in: Option<String>,
    /// Authentication realm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm: Option<String>,
    /// Groups the user belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,
}

/// User management endpoints.
#[derive(Debug, Clone)]
pub struct SecurityService {
    client: Arc<Client>,
}

impl SecurityService {
    /// Creates the service over a shared client.
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// Lists all users.
    pub async fn list_users(&self) -> Result<(Vec<UserSummary>, ApiResponse), ApiError> {
        let request = self
            .client
            .new_request(Method::GET, "api/security/users", None)?
            .accept(media_types::USERS)?;

        self.client.execute_decode(request).await
    }

    /// Returns a single user.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] (status 404) when the user does not exist.
    pub async fn get_user(&self, username: &str) -> Result<(User, ApiResponse), ApiError> {
        let request = self
            .client
            .new_request(Method::GET, &user_path(username), None)?
            .accept(media_types::USER)?;

        self.client.execute_decode(request).await
    }

    /// Creates a user or replaces an existing one.
    ///
    /// `PUT /api/security/users/{name}`. Creating requires `email` and
    /// `password`.
    pub async fn create_or_replace_user(
        &self,
        username: &str,
        user: &User,
    ) -> Result<ApiResponse, ApiError> {
        let request = self
            .client
            .new_json_request(Method::PUT, &user_path(username), user)?;
        self.client.execute_empty(request).await
    }

    /// Updates the fields of an existing user that are set in `user`.
    ///
    /// `POST /api/security/users/{name}`.
    pub async fn update_user(&self, username: &str, user: &User) -> Result<ApiResponse, ApiError> {
        let request = self
            .client
            .new_json_request(Method::POST, &user_path(username), user)?;
        self.client.execute_empty(request).await
    }

    /// Removes a user.
    pub async fn delete_user(&self, username: &str) -> Result<ApiResponse, ApiError> {
        let request = self
            .client
            .new_request(Method::DELETE, &user_path(username), None)?;
        self.client.execute_empty(request).await
    }
}

fn user_path(username: &str) -> String {
    format!("api/security/users/{}", username)
}
