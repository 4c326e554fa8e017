//
//  artifactory-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration
//!
//! Connection settings loaded from a TOML file in the platform config
//! directory, optionally overlaid with environment variables, and turned into
//! a ready [`Artifactory`] handle.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/artifactory-client/config.toml`
//! - **macOS**: `~/Library/Application Support/artifactory-client/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\artifactory-client\config\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! url = "https://repo.example.com/artifactory"
//! timeout_secs = 60
//!
//! [auth]
//! username = "admin"
//! password = "password"
//! ```
//!
//! ## Environment Overlay
//!
//! | Variable | Field |
//! |----------|-------|
//! | `ARTIFACTORY_URL` | `url` |
//! | `ARTIFACTORY_USER` | `auth.username` |
//! | `ARTIFACTORY_PASSWD` | `auth.password` |
//! | `ARTIFACTORY_API_KEY` | `auth.api_key` |
//! | `ARTIFACTORY_ACCESS_TOKEN` | `auth.token` |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use artifactory_client::config::ClientConfig;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let rt = ClientConfig::load()?.with_env().connect(None)?;
//! let (pong, _) = rt.v1.system.ping().await?;
//! println!("{}", pong);
//! # Ok(())
//! # }
//! ```

mod file;

pub use file::*;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::{Artifactory, Client, RequestObserver};
use crate::auth::Credential;

/// Name of the configuration file inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Environment variable overriding the base URL.
pub const ENV_URL: &str = "ARTIFACTORY_URL";
/// Environment variable holding the Basic auth username.
pub const ENV_USER: &str = "ARTIFACTORY_USER";
/// Environment variable holding the Basic auth password.
pub const ENV_PASSWORD: &str = "ARTIFACTORY_PASSWD";
/// Environment variable holding an API key.
pub const ENV_API_KEY: &str = "ARTIFACTORY_API_KEY";
/// Environment variable holding an access token.
pub const ENV_ACCESS_TOKEN: &str = "ARTIFACTORY_ACCESS_TOKEN";

/// Connection settings for an Artifactory instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL including the context path, e.g.
    /// `https://repo.example.com/artifactory`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Credentials; all empty means anonymous access.
    #[serde(default)]
    pub auth: AuthConfig,

    /// Whole-request deadline. No deadline when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    /// Overrides the default `User-Agent`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

/// Credentials section of the configuration.
///
/// At most one kind is used; see [`ClientConfig::credential`].
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Basic auth username, paired with `password`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Basic auth password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// API key sent in the `X-JFrog-Art-Api` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Access token sent as a bearer token.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<redacted>");
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("api_key", &redact(&self.api_key))
            .field("token", &redact(&self.token))
            .finish()
    }
}

impl ClientConfig {
    /// Creates a configuration for `url` without credentials.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    /// Loads the configuration from the default location.
    ///
    /// A missing file is not an error; defaults are returned.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if config_exists(&path) {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads the configuration from `path`, which must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = read_config_file(path)?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Parses a configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Saves the configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        write_config_file(path, &content)
    }

    /// Returns the path of the default configuration file.
    ///
    /// The file may not exist.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "artifactory-client")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Overlays values from the process environment.
    ///
    /// Variables that are set (and non-empty) replace the file values.
    pub fn with_env(self) -> Self {
        self.with_env_from(|key| std::env::var(key).ok())
    }

    /// Overlays values from `lookup`, which maps a variable name to its value.
    pub fn with_env_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_URL) {
            self.url = Some(url);
        }
        if let Some(username) = get(ENV_USER) {
            self.auth.username = Some(username);
        }
        if let Some(password) = get(ENV_PASSWORD) {
            self.auth.password = Some(password);
        }
        if let Some(key) = get(ENV_API_KEY) {
            self.auth.api_key = Some(key);
        }
        if let Some(token) = get(ENV_ACCESS_TOKEN) {
            self.auth.token = Some(token);
        }
        self
    }

    /// Picks the credential to use: access token, then API key, then
    /// username and password. `None` when nothing usable is configured.
    pub fn credential(&self) -> Option<Credential> {
        let auth = &self.auth;
        if let Some(token) = &auth.token {
            return Some(Credential::bearer(token.clone()));
        }
        if let Some(key) = &auth.api_key {
            return Some(Credential::api_key(key.clone()));
        }
        match (&auth.username, &auth.password) {
            (Some(user), Some(password)) => Some(Credential::basic(user.clone(), password.clone())),
            _ => None,
        }
    }

    /// Builds an [`Artifactory`] handle from this configuration.
    ///
    /// `observer` replaces the default tracing observer when given.
    ///
    /// # Errors
    ///
    /// Fails when no URL is configured or the client cannot be built.
    pub fn connect(&self, observer: Option<Arc<dyn RequestObserver>>) -> Result<Artifactory> {
        let url = self
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .with_context(|| format!("No Artifactory URL configured (set `url` or {})", ENV_URL))?;

        let mut builder = Client::builder(url);
        if let Some(credential) = self.credential() {
            builder = builder.credential(credential);
        }
        if let Some(secs) = self.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent.clone());
        }
        if let Some(observer) = observer {
            builder = builder.observer(observer);
        }

        let client = builder
            .build()
            .with_context(|| format!("Failed to create client for {}", url))?;
        Ok(Artifactory::new(client))
    }
}
