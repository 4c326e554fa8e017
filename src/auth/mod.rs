//
//  artifactory-client
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! This module provides the credential strategies supported by the Artifactory
//! REST API and turns them into a configured HTTP transport.
//!
//! ## Supported Authentication Methods
//!
//! - **Basic Authentication**: Username/password, sent as `Authorization: Basic ...`.
//! - **API Key**: Sent in the `X-JFrog-Art-Api` header.
//! - **Access Token**: Sent as `Authorization: Bearer ...`.
//!
//! A credential is static: it is attached to every outgoing request and never
//! refreshed. Expired or revoked credentials surface as `401`/`403` responses
//! from the server, not as local errors.
//!
//! ## Example
//!
//! ```rust,no_run
//! use artifactory_client::auth::Credential;
//!
//! let credential = Credential::basic("admin", "password");
//! let http = credential.http_client()?;
//! # Ok::<(), artifactory_client::api::ApiError>(())
//! ```

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::{Client, ClientBuilder};

use crate::api::ApiError;

/// Header used by Artifactory for API key authentication.
pub const API_KEY_HEADER: &str = "X-JFrog-Art-Api";

/// Represents the credential strategies accepted by Artifactory.
///
/// # Variants
///
/// - `Basic`: Standard HTTP Basic authentication with username and password.
/// - `ApiKey`: An Artifactory API key, sent in the [`API_KEY_HEADER`] header.
/// - `Bearer`: An access token, sent as a bearer token.
///
/// # Example
///
/// ```rust
/// use artifactory_client::auth::Credential;
///
/// let basic = Credential::basic("admin", "password");
/// let key = Credential::api_key("AKCp8...");
/// let token = Credential::bearer("eyJ2ZXIiOiIyIi...");
/// ```
///
/// # Notes
///
/// - The `Debug` output never contains the secret part of a credential.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// Basic HTTP authentication with username and password.
    Basic {
        /// The username for authentication.
        username: String,
        /// The password for authentication.
        password: String,
    },
    /// Artifactory API key authentication.
    ApiKey {
        /// The API key generated from the user profile.
        key: String,
    },
    /// Access token authentication.
    Bearer {
        /// The access token string.
        token: String,
    },
}

impl Credential {
    /// Creates a [`Credential::Basic`] from a username and password.
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Creates a [`Credential::ApiKey`].
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::ApiKey { key: key.into() }
    }

    /// Creates a [`Credential::Bearer`].
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Returns the header name and value this credential adds to a request.
    ///
    /// The value is marked sensitive so it is never printed by `reqwest` or
    /// `http` debug output.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidHeader`] when the credential contains bytes
    /// that are not allowed in an HTTP header value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use artifactory_client::auth::Credential;
    ///
    /// let (name, value) = Credential::basic("admin", "password").header()?;
    /// assert_eq!(name.as_str(), "authorization");
    /// assert_eq!(value.to_str().unwrap(), "Basic YWRtaW46cGFzc3dvcmQ=");
    /// # Ok::<(), artifactory_client::api::ApiError>(())
    /// ```
    pub fn header(&self) -> Result<(HeaderName, HeaderValue), ApiError> {
        let (name, raw) = match self {
            Self::Basic { username, password } => {
                let encoded = STANDARD.encode(format!("{}:{}", username, password));
                (AUTHORIZATION, format!("Basic {}", encoded))
            }
            Self::ApiKey { key } => (HeaderName::from_static("x-jfrog-art-api"), key.clone()),
            Self::Bearer { token } => (AUTHORIZATION, format!("Bearer {}", token)),
        };

        let mut value = HeaderValue::from_str(&raw).map_err(|_| ApiError::InvalidHeader {
            name: name.to_string(),
        })?;
        value.set_sensitive(true);

        Ok((name, value))
    }

    /// Returns a `reqwest` client builder preloaded with this credential.
    ///
    /// Use this when further transport options (timeouts, proxies, TLS roots)
    /// need to be configured before the client is built.
    pub fn client_builder(&self) -> Result<ClientBuilder, ApiError> {
        let (name, value) = self.header()?;
        let mut headers = HeaderMap::new();
        headers.insert(name, value);

        Ok(Client::builder().default_headers(headers))
    }

    /// Builds an HTTP client that attaches this credential to every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential cannot be encoded as a header or if
    /// the TLS backend fails to initialise.
    pub fn http_client(&self) -> Result<Client, ApiError> {
        Ok(self.client_builder()?.build()?)
    }

    /// Returns a short name for the credential type, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Basic { .. } => "basic",
            Self::ApiKey { .. } => "api-key",
            Self::Bearer { .. } => "bearer",
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .field("password", &"<redacted>")
                .finish(),
            Self::ApiKey { .. } => f.debug_struct("ApiKey").field("key", &"<redacted>").finish(),
            Self::Bearer { .. } => f
                .debug_struct("Bearer")
                .field("token", &"<redacted>")
                .finish(),
        }
    }
}
