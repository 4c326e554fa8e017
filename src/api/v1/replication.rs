//
//  artifactory-client
//  api/v1/replication.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Repository replication configuration.
//!
//! Two families of endpoints exist. The multi-push endpoints under
//! `/api/replications/multiple/{repo}` take a [`ReplicationConfig`] holding
//! every target at once. The single endpoints under `/api/replications/{repo}`
//! take one [`SingleReplicationConfig`].
//!
//! Reading goes through the single endpoint, which answers with a bare object
//! when one target is configured and with an array otherwise. Both shapes are
//! assembled into a [`ReplicationConfig`].

use std::fmt;
use std::sync::Arc;

use reqwest::Method;
use serde::{Deserialize, Serialize};

use crate::api::client::Client;
use crate::api::common::{media_types, ApiError, ApiResponse};

/// One replication target of a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleReplicationConfig {
    /// Source repository key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo_key: Option<String>,
    /// URL of the target repository.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Socket timeout towards the target, in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub socket_timeout_millis: Option<i64>,
    /// Username on the target instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Password on the target instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Whether this target is replicated to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Whether deletions are propagated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_deletes: Option<bool>,
    /// Whether properties are propagated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_properties: Option<bool>,
    /// Whether download statistics are propagated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sync_statistics: Option<bool>,
    /// Only paths below this prefix are replicated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_prefix: Option<String>,
    /// Schedule. Only meaningful when reading; writes set it on the aggregate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_exp: Option<String>,
    /// Whether changes are pushed as they happen, besides the schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_event_replication: Option<bool>,
}

/// Replication configuration of a repository with all of its targets.
///
/// `repo_key` is carried in the URL and is never serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplicationConfig {
    /// Source repository key.
    #[serde(skip)]
    pub repo_key: Option<String>,
    /// Cron schedule applied to every target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron_exp: Option<String>,
    /// Whether changes are pushed as they happen, besides the schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_event_replication: Option<bool>,
    /// `None` when the repository has no targets.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replications: Option<Vec<SingleReplicationConfig>>,
}

impl ReplicationConfig {
    /// Assembles the aggregate from the targets returned by the server.
    ///
    /// Repo key, schedule and event flag are taken from the targets in order,
    /// so the last target wins when they disagree.
    pub fn from_targets(targets: Vec<SingleReplicationConfig>) -> Self {
        let mut config = Self::default();
        if targets.is_empty() {
            return config;
        }

        for target in &targets {
            config.repo_key = target.repo_key.clone();
            config.cron_exp = target.cron_exp.clone();
            config.enable_event_replication = target.enable_event_replication;
        }
        config.replications = Some(targets);
        config
    }
}

impl fmt::Display for ReplicationConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Replication configuration endpoints.
#[derive(Debug, Clone)]
pub struct ReplicationService {
    client: Arc<Client>,
}

impl ReplicationService {
    /// Creates the service over a shared client.
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// Creates or replaces the multi-push configuration of a local repository.
    ///
    /// `PUT /api/replications/multiple/{repo}`.
    pub async fn set_repository_replication_config(
        &self,
        repo_key: &str,
        config: &ReplicationConfig,
    ) -> Result<ApiResponse, ApiError> {
        self.send(Method::PUT, &multiple_path(repo_key), config).await
    }

    /// Updates the multi-push configuration of a local repository.
    ///
    /// `POST /api/replications/multiple/{repo}`.
    pub async fn update_repository_replication_config(
        &self,
        repo_key: &str,
        config: &ReplicationConfig,
    ) -> Result<ApiResponse, ApiError> {
        self.send(Method::POST, &multiple_path(repo_key), config).await
    }

    /// Adds or replaces a single replication target.
    ///
    /// `PUT /api/replications/{repo}`.
    pub async fn set_single_repository_replication_config(
        &self,
        repo_key: &str,
        config: &SingleReplicationConfig,
    ) -> Result<ApiResponse, ApiError> {
        self.send(Method::PUT, &single_path(repo_key), config).await
    }

    /// Updates an existing single replication target.
    ///
    /// `POST /api/replications/{repo}`.
    pub async fn update_single_repository_replication_config(
        &self,
        repo_key: &str,
        config: &SingleReplicationConfig,
    ) -> Result<ApiResponse, ApiError> {
        self.send(Method::POST, &single_path(repo_key), config).await
    }

    /// Deletes the replication configuration of a repository.
    ///
    /// `DELETE /api/replications/{repo}`.
    pub async fn delete_repository_replication_config(
        &self,
        repo_key: &str,
    ) -> Result<ApiResponse, ApiError> {
        let request = self
            .client
            .new_request(Method::DELETE, &single_path(repo_key), None)?;
        self.client.execute_empty(request).await
    }

    /// Returns the replication configuration of a repository.
    ///
    /// `GET /api/replications/{repo}`. A single-object and a one-element array
    /// response produce the same [`ReplicationConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] (usually 404) when the repository has no
    /// replication configured, and [`ApiError::Decode`] when the body is
    /// neither shape.
    pub async fn get_repository_replication_config(
        &self,
        repo_key: &str,
    ) -> Result<(ReplicationConfig, ApiResponse), ApiError> {
        let (targets, response) = self.get_replication_targets(repo_key).await?;
        Ok((ReplicationConfig::from_targets(targets), response))
    }

    /// Returns the raw list of replication targets of a repository.
    pub async fn get_replication_targets(
        &self,
        repo_key: &str,
    ) -> Result<(Vec<SingleReplicationConfig>, ApiResponse), ApiError> {
        let request = self
            .client
            .new_request(Method::GET, &single_path(repo_key), None)?
            .accept(media_types::REPLICATION_CONFIG)?;

        self.client.execute_one_or_many(request).await
    }

    async fn send<T: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &T,
    ) -> Result<ApiResponse, ApiError> {
        let request = self.client.new_json_request(method, path, body)?;
        self.client.execute_empty(request).await
    }
}

fn single_path(repo_key: &str) -> String {
    format!("api/replications/{}", repo_key)
}

fn multiple_path(repo_key: &str) -> String {
    format!("api/replications/multiple/{}", repo_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    const SINGLE: &str = r#"{
        "repoKey": "libs-local",
        "url": "https://mirror.example.com/artifactory/libs-local",
        "socketTimeoutMillis": 15000,
        "username": "replicator",
        "enabled": true,
        "syncDeletes": false,
        "syncProperties": true,
        "syncStatistics": false,
        "pathPrefix": "",
        "cronExp": "0 0 12 * * ?",
        "enableEventReplication": true
    }"#;

    fn service(base: &str) -> ReplicationService {
        ReplicationService::new(Arc::new(Client::builder(base).build().unwrap()))
    }

    #[tokio::test]
    async fn test_object_and_one_element_array_give_same_config() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/replications/libs-local")
            .match_header("accept", media_types::REPLICATION_CONFIG)
            .with_status(200)
            .with_body(SINGLE)
            .create_async()
            .await;
        server
            .mock("GET", "/api/replications/libs-array")
            .with_status(200)
            .with_body(format!("[{}]", SINGLE))
            .create_async()
            .await;

        let replication = service(&server.url());
        let (from_object, _) = replication
            .get_repository_replication_config("libs-local")
            .await
            .unwrap();
        let (from_array, _) = replication
            .get_repository_replication_config("libs-array")
            .await
            .unwrap();

        assert_eq!(from_object, from_array);
        assert_eq!(from_object.repo_key.as_deref(), Some("libs-local"));
        assert_eq!(from_object.cron_exp.as_deref(), Some("0 0 12 * * ?"));
        assert_eq!(from_object.enable_event_replication, Some(true));

        let targets = from_object.replications.unwrap();
        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].socket_timeout_millis, Some(15000));
        assert_eq!(targets[0].password, None);
    }

    #[tokio::test]
    async fn test_multiple_targets_last_wins() {
        let mut server = mockito::Server::new_async().await;
        let body = json!([
            {"repoKey": "libs-local", "url": "https://a/artifactory/libs-local", "cronExp": "0 0 1 * * ?"},
            {"repoKey": "libs-local", "url": "https://b/artifactory/libs-local", "cronExp": "0 0 2 * * ?", "enableEventReplication": false}
        ]);
        server
            .mock("GET", "/api/replications/libs-local")
            .with_status(200)
            .with_body(body.to_string())
            .create_async()
            .await;

        let (config, _) = service(&server.url())
            .get_repository_replication_config("libs-local")
            .await
            .unwrap();

        assert_eq!(config.cron_exp.as_deref(), Some("0 0 2 * * ?"));
        assert_eq!(config.enable_event_replication, Some(false));
        let urls: Vec<_> = config
            .replications
            .unwrap()
            .into_iter()
            .map(|r| r.url.unwrap())
            .collect();
        assert_eq!(
            urls,
            vec!["https://a/artifactory/libs-local", "https://b/artifactory/libs-local"]
        );
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/replications/missing")
            .with_status(404)
            .with_body(r#"{"errors": [{"status": 404, "message": "Could not find replication"}]}"#)
            .create_async()
            .await;

        let err = service(&server.url())
            .get_repository_replication_config("missing")
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(err.to_string().contains("Could not find replication"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/replications/libs-local")
            .with_status(200)
            .with_body(r#"{"repoKey": 42}"#)
            .create_async()
            .await;

        let err = service(&server.url())
            .get_repository_replication_config("libs-local")
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Decode { .. }));
        assert_eq!(err.status().unwrap(), 200);
    }

    #[tokio::test]
    async fn test_multi_push_set_and_update() {
        let mut server = mockito::Server::new_async().await;
        let config = ReplicationConfig {
            repo_key: Some("libs-local".to_string()),
            cron_exp: Some("0 0 12 * * ?".to_string()),
            enable_event_replication: Some(true),
            replications: Some(vec![SingleReplicationConfig {
                url: Some("https://mirror/artifactory/libs-local".to_string()),
                enabled: Some(true),
                ..Default::default()
            }]),
        };
        let expected = json!({
            "cronExp": "0 0 12 * * ?",
            "enableEventReplication": true,
            "replications": [{"url": "https://mirror/artifactory/libs-local", "enabled": true}]
        });

        let put = server
            .mock("PUT", "/api/replications/multiple/libs-local")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(expected.clone()))
            .with_status(201)
            .create_async()
            .await;
        let post = server
            .mock("POST", "/api/replications/multiple/libs-local")
            .match_body(Matcher::Json(expected))
            .with_status(200)
            .create_async()
            .await;

        let replication = service(&server.url());
        let created = replication
            .set_repository_replication_config("libs-local", &config)
            .await
            .unwrap();
        assert_eq!(created.status, 201);
        replication
            .update_repository_replication_config("libs-local", &config)
            .await
            .unwrap();

        put.assert_async().await;
        post.assert_async().await;
    }

    #[tokio::test]
    async fn test_single_set_update_delete() {
        let mut server = mockito::Server::new_async().await;
        let target = SingleReplicationConfig {
            url: Some("https://mirror/artifactory/libs-local".to_string()),
            username: Some("replicator".to_string()),
            ..Default::default()
        };
        let expected = json!({"url": "https://mirror/artifactory/libs-local", "username": "replicator"});

        let put = server
            .mock("PUT", "/api/replications/libs-local")
            .match_body(Matcher::Json(expected.clone()))
            .with_status(200)
            .create_async()
            .await;
        let post = server
            .mock("POST", "/api/replications/libs-local")
            .match_body(Matcher::Json(expected))
            .with_status(200)
            .create_async()
            .await;
        let delete = server
            .mock("DELETE", "/api/replications/libs-local")
            .with_status(200)
            .create_async()
            .await;

        let replication = service(&server.url());
        replication
            .set_single_repository_replication_config("libs-local", &target)
            .await
            .unwrap();
        replication
            .update_single_repository_replication_config("libs-local", &target)
            .await
            .unwrap();
        replication
            .delete_repository_replication_config("libs-local")
            .await
            .unwrap();

        put.assert_async().await;
        post.assert_async().await;
        delete.assert_async().await;
    }

    #[test]
    fn test_from_targets_empty() {
        let config = ReplicationConfig::from_targets(Vec::new());
        assert_eq!(config, ReplicationConfig::default());
        assert!(config.replications.is_none());
    }

    #[test]
    fn test_display_omits_repo_key() {
        let config = ReplicationConfig {
            repo_key: Some("libs-local".to_string()),
            cron_exp: Some("0 0 12 * * ?".to_string()),
            ..Default::default()
        };
        let shown = config.to_string();
        assert!(shown.contains("\"cronExp\": \"0 0 12 * * ?\""));
        assert!(!shown.contains("libs-local"));
    }
}
