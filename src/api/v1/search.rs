//
//  artifactory-client
//  api/v1/search.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! AQL search endpoints.
//!
//! Queries are posted as plain text to `/api/search/aql`:
//!
//! ```text
//! items.find({"repo": "libs-local", "name": {"$match": "*.zip"}}).include("name","repo","path","size")
//! ```
//!
//! The server answers with a `results` array and a `range` block. Only the
//! fields named in `.include(...)` are present on each result, which is why
//! every field of [`AqlResult`] is optional.

use reqwest::header::CONTENT_TYPE;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::artifacts::ArtifactService;
use crate::api::client::Body;
use crate::api::common::{media_types, opt_u64_from_str_or_num, ApiError, ApiResponse};

/// Builds the query used by [`ArtifactService::search_files`].
///
/// Matches files (not folders) anywhere in `repo_key` whose name matches
/// `pattern`, where `*` and `?` are wildcards. Neither argument is escaped.
///
/// ```rust
/// use artifactory_client::api::v1::search_query;
///
/// let query = search_query("libs-local", "app-*.zip");
/// assert!(query.starts_with(r#"items.find({"repo": "libs-local","#));
/// assert!(query.contains(r#""name": {"$match": "app-*.zip"}"#));
/// ```
pub fn search_query(repo_key: &str, pattern: &str) -> String {
    format!(
        r#"items.find({{"repo": "{}","path": {{"$ne": "."}},"$or": [{{"$and":[{{"path": {{"$match": "*"}},"name": {{"$match": "{}"}}}}]}}]}}).include("name","repo","path","actual_md5","actual_sha1","size","type","property")"#,
        repo_key, pattern
    )
}

/// Response of an AQL search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AqlSearchResults {
    /// Matching items. Empty when nothing matched.
    #[serde(default)]
    pub results: Vec<AqlResult>,
    /// Paging information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<AqlRange>,
}

/// Paging block of an AQL response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AqlRange {
    /// Offset of the first returned item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_pos: Option<u64>,
    /// Offset after the last returned item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_pos: Option<u64>,
    /// Number of items matched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Limit applied by the query, when one was set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
}

/// A single item returned by an AQL search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AqlResult {
    /// Repository key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Folder containing the item, relative to the repository root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Item name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `file` or `folder`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,
    /// Size in bytes.
    #[serde(
        default,
        deserialize_with = "opt_u64_from_str_or_num",
        skip_serializing_if = "Option::is_none"
    )]
    pub size: Option<u64>,
    /// ISO 8601 creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    /// ISO 8601 modification timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<String>,
    /// MD5 of the stored content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_md5: Option<String>,
    /// SHA-1 of the stored content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_sha1: Option<String>,
    /// Item properties.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<AqlProperty>>,
}

impl AqlResult {
    /// Path of the item inside its repository (`path/name`), usable with
    /// the download and storage methods.
    pub fn item_path(&self) -> Option<String> {
        let name = self.name.as_deref()?;
        match self.path.as_deref() {
            None | Some("") | Some(".") => Some(name.to_string()),
            Some(path) => Some(format!("{}/{}", path.trim_end_matches('/'), name)),
        }
    }

    /// Returns the value of the first property named `key`.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties
            .as_deref()?
            .iter()
            .find(|p| p.key.as_deref() == Some(key))
            .and_then(|p| p.value.as_deref())
    }
}

/// A property of an AQL result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AqlProperty {
    /// Property name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Property value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl ArtifactService {
    /// Runs a raw AQL query.
    ///
    /// `POST /api/search/aql` with the query as a `text/plain` body. No
    /// matches yield an empty `results` vector, not an error.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] for non-2xx responses (for example a
    /// malformed query), with no results attached.
    pub async fn search_by_aql(
        &self,
        query: &str,
    ) -> Result<(AqlSearchResults, ApiResponse), ApiError> {
        let request = self
            .client
            .new_request(Method::POST, "api/search/aql", Some(Body::text(query)))?
            .header(CONTENT_TYPE.as_str(), media_types::TEXT)?;
        self.client.execute_decode(request).await
    }

    /// Searches `repo_key` for files whose name matches `pattern`.
    ///
    /// Builds the query with [`search_query`] and runs it through
    /// [`search_by_aql`](Self::search_by_aql).
    pub async fn search_files(
        &self,
        repo_key: &str,
        pattern: &str,
    ) -> Result<(AqlSearchResults, ApiResponse), ApiError> {
        self.search_by_aql(&search_query(repo_key, pattern)).await
    }
}
