//
//  artifactory-client
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Artifactory Client Library
//!
//! A typed async client for the JFrog Artifactory REST API.
//!
//! ## Features
//!
//! - **Artifacts**: storage info, streaming download, deploy with checksums and properties
//! - **Search**: AQL queries and a name-pattern file search
//! - **Replication**: single and multi-push replication configuration
//! - **Security**: users (v1) and permission targets (v2)
//! - **System**: ping and version
//!
//! ## Module Structure
//!
//! - [`api`]: client, error taxonomy, observer hook and the v1/v2 services
//! - [`auth`]: credentials and HTTP client construction
//! - [`config`]: TOML and environment configuration
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use artifactory_client::{Artifactory, Client, Credential};
//!
//! # async fn run() -> Result<(), artifactory_client::ApiError> {
//! let client = Client::builder("https://repo.example.com/artifactory")
//!     .credential(Credential::basic("admin", "password"))
//!     .build()?;
//! let rt = Artifactory::new(client);
//!
//! let (found, _) = rt.v1.artifacts.search_files("libs-local", "*.jar").await?;
//! for item in &found.results {
//!     println!("{:?}", item.item_path());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The library emits `tracing` events through the injected
//! [`RequestObserver`](api::RequestObserver) and never installs a subscriber.

/// HTTP client, error types and API services.
pub mod api;

/// Credentials and transport construction.
pub mod auth;

/// Configuration file and environment handling.
pub mod config;

pub use api::{ApiError, ApiResponse, Artifactory, Client};
pub use auth::Credential;
pub use config::ClientConfig;

/// Library version from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default `User-Agent` header value.
pub const USER_AGENT: &str = concat!("artifactory-client/", env!("CARGO_PKG_VERSION"));
