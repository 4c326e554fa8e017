//
//  artifactory-client
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types for the Artifactory REST API
//!
//! This module provides the types shared by every API group: the error
//! taxonomy, response metadata, the server error envelope and the media types
//! used for content negotiation.
//!
//! # Overview
//!
//! - [`ApiError`] - Unified error type for all API operations
//! - [`ApiResponse`] - Status, headers and URL of a completed response
//! - [`ErrorEnvelope`] - The `{"errors": [...]}` body returned on failures
//! - [`media_types`] - `Accept` values for endpoints with versioned schemas
//! - Decoding helpers (re-exported from the [`decode`] submodule)
//!
//! # Example
//!
//! ```rust
//! use artifactory_client::api::common::ApiError;
//!
//! fn describe(err: &ApiError) -> String {
//!     match err.status() {
//!         Some(status) => format!("server answered {}", status),
//!         None => format!("request did not complete: {}", err),
//!     }
//! }
//! ```

use std::path::PathBuf;

use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

mod decode;

pub use decode::*;

/// Media types used for `Accept` negotiation.
///
/// Artifactory serves several JSON schema versions from the same endpoint;
/// these values select the representation this crate decodes.
pub mod media_types {
    /// Representation of `GET /api/storage/{repo}/{path}`.
    pub const FILE_INFO: &str = "application/vnd.org.jfrog.artifactory.storage.FileInfo+json";

    /// Representation of `GET /api/replications/{repo}`.
    pub const REPLICATION_CONFIG: &str =
        "application/vnd.org.jfrog.artifactory.replications.ReplicationConfigRequest+json";

    /// Representation of `GET /api/security/users`.
    pub const USERS: &str = "application/vnd.org.jfrog.artifactory.security.Users+json";

    /// Representation of `GET /api/security/users/{name}`.
    pub const USER: &str = "application/vnd.org.jfrog.artifactory.security.User+json";

    /// Representation of `GET /api/system/version`.
    pub const VERSION: &str = "application/vnd.org.jfrog.artifactory.system.Version+json";

    /// Plain JSON.
    pub const JSON: &str = "application/json";

    /// Plain text, used for AQL query bodies.
    pub const TEXT: &str = "text/plain";
}

/// Maximum number of body characters kept in error messages.
pub const BODY_SNIPPET_LEN: usize = 512;

/// Unified error type for all Artifactory API operations.
///
/// Variants fall into four groups:
///
/// | Group | Variants | Meaning |
/// |-------|----------|---------|
/// | Request build | `InvalidBaseUrl`, `InvalidPath`, `Encode`, `InvalidHeader` | Nothing was sent |
/// | Transport | `Transport` | Network, DNS, TLS or timeout failure |
/// | HTTP status | `Status` | Server answered with a non-2xx status |
/// | Decode | `Decode` | Body is not valid JSON for the target type |
///
/// `MissingSink` and `Io` cover local preconditions of the transfer methods.
///
/// Every variant raised after a response arrived carries that response's
/// [`ApiResponse`], so status and headers stay inspectable on the error path.
///
/// # Example
///
/// ```rust,no_run
/// use artifactory_client::api::common::ApiError;
///
/// fn handle<T>(result: Result<T, ApiError>) {
///     match result {
///         Ok(_) => println!("done"),
///         Err(e) if e.is_not_found() => println!("no such artifact"),
///         Err(ApiError::Status { response, message, .. }) => {
///             eprintln!("{} failed with {}: {}", response.url, response.status, message);
///         }
///         Err(e) => eprintln!("error: {}", e),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// The configured base URL could not be parsed or cannot carry a path.
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// A request path did not resolve to a location beneath the base URL.
    #[error("Path '{path}' does not resolve beneath base URL {base}")]
    InvalidPath {
        /// The path as given by the caller.
        path: String,
        /// The client's base URL.
        base: String,
    },

    /// The request body could not be serialized to JSON.
    #[error("Failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A header name or value contained bytes not allowed by HTTP.
    #[error("Invalid value for header '{name}'")]
    InvalidHeader {
        /// The header that failed to encode.
        name: String,
    },

    /// A network-level error occurred during the request.
    ///
    /// This covers connection failures, timeouts, DNS resolution errors,
    /// TLS failures and bodies interrupted mid-stream.
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    ///
    /// `message` is the first message of the error envelope when the body
    /// parses as one, otherwise the raw body text.
    #[error("API error ({}): {message}", .response.status)]
    Status {
        /// Metadata of the failed response.
        response: ApiResponse,
        /// Human readable failure message.
        message: String,
        /// The structured error envelope, when the body contained one.
        envelope: Option<ErrorEnvelope>,
    },

    /// A successful response body could not be decoded into the target type.
    #[error("Failed to decode response from {}: {source} (body: {snippet})", .response.url)]
    Decode {
        /// Metadata of the response whose body failed to decode.
        response: ApiResponse,
        /// The beginning of the offending body.
        snippet: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A download was requested without a destination.
    #[error("Download target is required")]
    MissingSink,

    /// A local file or sink operation failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The local path, or a description of the sink.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ApiError {
    /// Returns the HTTP status associated with this error, if a response arrived.
    pub fn status(&self) -> Option<StatusCode> {
        self.response().map(|r| r.status)
    }

    /// Returns the response metadata associated with this error, if any.
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            Self::Status { response, .. } | Self::Decode { response, .. } => Some(response),
            _ => None,
        }
    }

    /// True for `404 Not Found` responses.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(StatusCode::NOT_FOUND)
    }

    /// True for `401 Unauthorized` and `403 Forbidden` responses.
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }

    /// True when the request failed before or during transport.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Builds a [`ApiError::Status`] from a failed response and its body.
    pub(crate) fn from_status(response: ApiResponse, body: &str) -> Self {
        let envelope = serde_json::from_str::<ErrorEnvelope>(body)
            .ok()
            .filter(|e| !e.errors.is_empty());

        let message = match envelope.as_ref().and_then(|e| e.first_message()) {
            Some(message) => message.to_string(),
            None if body.trim().is_empty() => response
                .status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
            None => snippet(body),
        };

        Self::Status {
            response,
            message,
            envelope,
        }
    }
}

/// Status, headers and final URL of a completed response.
///
/// Returned next to every decoded result, and carried inside every error that
/// happened after the server answered.
///
/// # Example
///
/// ```rust,no_run
/// # async fn example(artifactory: artifactory_client::Artifactory) -> Result<(), artifactory_client::api::ApiError> {
/// let (_info, response) = artifactory.v1.artifacts.file_info("libs-release", "a/b.jar").await?;
/// println!("{} -> {}", response.url, response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
    /// The final URL, after any redirects.
    pub url: Url,
}

impl ApiResponse {
    /// Captures the metadata of a `reqwest` response without consuming its body.
    pub fn from_response(response: &reqwest::Response) -> Self {
        Self {
            status: response.status(),
            headers: response.headers().clone(),
            url: response.url().clone(),
        }
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// The error body returned by Artifactory on failed requests.
///
/// ```json
/// {"errors": [{"status": 404, "message": "Not Found"}]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// The reported errors, usually exactly one.
    pub errors: Vec<ErrorDetail>,
}

impl ErrorEnvelope {
    /// Returns the first error message, if any.
    pub fn first_message(&self) -> Option<&str> {
        self.errors.iter().find_map(|e| e.message.as_deref())
    }
}

/// A single entry of an [`ErrorEnvelope`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// The HTTP status the server associated with this error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Human readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Truncates a body to [`BODY_SNIPPET_LEN`] characters for error messages.
pub(crate) fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(BODY_SNIPPET_LEN) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}
