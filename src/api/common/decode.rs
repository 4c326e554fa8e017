//
//  artifactory-client
//  api/common/decode.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Response body decoding.
//!
//! Some Artifactory endpoints return a bare JSON object when exactly one item
//! matches and an array of the same object shape when several do. The
//! replication configuration endpoint is the main example:
//!
//! ```json
//! {"repoKey": "libs-local", "url": "https://mirror/artifactory/libs-local"}
//! ```
//!
//! versus
//!
//! ```json
//! [{"repoKey": "libs-local", "url": "https://a/..."}, {"repoKey": "libs-local", "url": "https://b/..."}]
//! ```
//!
//! [`decode_one_or_many`] hides that irregularity. The buffered body is parsed
//! once into a [`serde_json::Value`] to classify its outer shape, then decoded a
//! second time into the concrete element type. Both shapes come out as a `Vec`.
//!
//! # Example
//!
//! ```rust
//! use artifactory_client::api::common::decode_one_or_many;
//! use serde::Deserialize;
//!
//! #[derive(Debug, PartialEq, Deserialize)]
//! struct Item { name: String }
//!
//! let one: Vec<Item> = decode_one_or_many(br#"{"name": "a"}"#).unwrap();
//! let many: Vec<Item> = decode_one_or_many(br#"[{"name": "a"}]"#).unwrap();
//! assert_eq!(one, many);
//! ```

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

/// Outer shape of a JSON document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    /// A JSON array.
    Array,
    /// A JSON object.
    Object,
    /// A string, number, boolean or `null`.
    Scalar,
}

/// Classifies the outer shape of a JSON document.
///
/// # Errors
///
/// Returns the parse error when `body` is not valid JSON.
pub fn classify(body: &[u8]) -> Result<JsonShape, serde_json::Error> {
    let value: Value = serde_json::from_slice(body)?;

    Ok(match value {
        Value::Array(_) => JsonShape::Array,
        Value::Object(_) => JsonShape::Object,
        _ => JsonShape::Scalar,
    })
}

/// Decodes a body that may hold either one `T` or an array of `T`.
///
/// An array decodes element-wise; anything else decodes as a single `T` and
/// is wrapped in a one-element `Vec`. An empty (or whitespace-only) body
/// decodes to an empty `Vec`.
///
/// # Errors
///
/// Returns the parse error when the body is not valid JSON or does not match
/// the shape of `T`.
pub fn decode_one_or_many<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    match classify(body)? {
        JsonShape::Array => serde_json::from_slice(body),
        JsonShape::Object | JsonShape::Scalar => Ok(vec![serde_json::from_slice(body)?]),
    }
}

/// Deserializes an optional unsigned integer sent either as a JSON number or
/// as a decimal string.
///
/// The storage API reports file sizes as strings (`"size": "13400"`) while the
/// search API reports them as numbers. Use with
/// `#[serde(default, deserialize_with = "...")]`.
pub fn opt_u64_from_str_or_num<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u64),
        Str(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Num(n)) => Ok(Some(n)),
        Some(Raw::Str(s)) => s.trim().parse().map(Some).map_err(de::Error::custom),
    }
}
