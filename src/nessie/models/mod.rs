//! Wire models for the Nessie REST API
//!
//! This module contains the data shapes exchanged with a Nessie server.
//! These models provide a typed representation of the JSON wire format,
//! allowing the rest of the crate to work with Rust values instead of raw
//! `serde_json::Value` trees.
//!
//! Two of the entities are discriminated unions on the wire: a JSON object
//! with a `type` field that selects the variant shape. Those live in their
//! own submodules ([`reference`] and [`contents`]) together with codec
//! functions that implement the discriminator dispatch.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub mod contents;
pub mod reference;

pub use contents::{Contents, ContentsType, DeltaLakeTable, IcebergTable, SqlView};
pub use reference::{Branch, Hash, Reference, ReferenceType, Tag};

/// Errors raised while mapping JSON payloads onto the wire models
#[derive(Error, Debug)]
pub enum ModelError {
    /// The `type` discriminator does not match any variant of the union
    #[error("no variant of {union} exists with 'type={discriminator}'")]
    UnrecognizedVariant {
        /// Name of the union type being decoded
        union: &'static str,
        /// The offending discriminator value as found on the wire
        discriminator: String,
    },

    /// The discriminator was recognized but the remaining fields did not
    /// decode as the selected variant's shape
    #[error("invalid {union} payload: {source}")]
    InvalidPayload {
        /// Name of the union type being decoded
        union: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ModelError {
    pub(crate) fn unrecognized_variant(union: &'static str, discriminator: &str) -> Self {
        ModelError::UnrecognizedVariant {
            union,
            discriminator: discriminator.to_string(),
        }
    }
}

/// Extracts the `type` discriminator of a union payload for dispatching.
///
/// String values are returned as-is. A missing field is reported as `null`,
/// matching how the wire contract renders an absent discriminator in error
/// messages; non-string values are rendered as their JSON text.
pub(crate) fn discriminator_of(json: &Value) -> String {
    match json.get("type") {
        Some(Value::String(tag)) => tag.clone(),
        Some(other) => other.to_string(),
        None => "null".to_string(),
    }
}

/// Decodes the non-discriminator fields of a union payload as variant `T`.
pub(crate) fn decode_variant<T: DeserializeOwned>(
    union: &'static str,
    json: Value,
) -> Result<T, ModelError> {
    serde_json::from_value(json).map_err(|source| ModelError::InvalidPayload { union, source })
}

/// Encodes a variant payload and merges the `type` discriminator back in.
pub(crate) fn encode_variant<T: Serialize>(discriminator: &str, payload: &T) -> Value {
    // The wire models serialize to JSON objects; anything else would be a
    // bug in the model definitions themselves.
    let mut fields = match serde_json::to_value(payload) {
        Ok(Value::Object(fields)) => fields,
        _ => Map::new(),
    };
    fields.insert(
        "type".to_string(),
        Value::String(discriminator.to_string()),
    );
    Value::Object(fields)
}

/// Server configuration as reported by the config endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NessieConfiguration {
    /// Name of the branch new clients should work against by default
    pub default_branch: Option<String>,

    /// Version of the Nessie API specification the server implements
    pub version: Option<String>,
}

/// Metadata attached to a single commit
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitMeta {
    /// Hash of this commit
    pub hash: Option<String>,

    /// Identity of the committer recorded by the server
    pub committer: Option<String>,

    /// Identity of the author as supplied by the client
    pub author: Option<String>,

    /// Sign-off line, if any
    pub signed_off_by: Option<String>,

    /// Commit message
    pub message: String,

    /// Server-side commit timestamp
    pub commit_time: Option<DateTime<Utc>>,

    /// Free-form key/value properties attached to the commit
    #[serde(default)]
    pub properties: HashMap<String, String>,
}

/// One page of the commit log of a reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogResponse {
    /// Opaque continuation token; present when more commits are available
    pub token: Option<String>,

    /// Commits in this page, newest first
    #[serde(default)]
    pub operations: Vec<CommitMeta>,
}

/// One page of the entries (live keys) reachable from a reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntriesResponse {
    /// Opaque continuation token; present when more entries are available
    pub token: Option<String>,

    /// Entries in this page
    #[serde(default)]
    pub entries: Vec<Entry>,
}

/// A single live key and the kind of contents stored under it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    /// Key the contents are stored under
    pub name: ContentsKey,

    /// Contents kind discriminator, e.g. `ICEBERG_TABLE` or `UNKNOWN`
    #[serde(rename = "type")]
    pub kind: String,
}

/// Hierarchical key addressing a contents object
///
/// Keys are a list of path elements. On the wire they travel as a JSON
/// object with an `elements` array; in URL paths they are rendered as the
/// dot-joined, percent-encoded element list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentsKey {
    /// Path elements of the key, outermost first
    pub elements: Vec<String>,
}

impl ContentsKey {
    /// Creates a key from its path elements
    pub fn new<I, S>(elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ContentsKey {
            elements: elements.into_iter().map(Into::into).collect(),
        }
    }

    /// Renders the key as a URL path segment
    ///
    /// Elements are individually percent-encoded and joined with `.`, the
    /// format the contents endpoints expect in the request path.
    pub fn to_path_string(&self) -> String {
        self.elements
            .iter()
            .map(|element| urlencoding::encode(element).into_owned())
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Request body for merging commits from another reference into a branch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MergeRequest {
    /// Hash the commits to merge are taken up to, exclusive of anything
    /// beyond it
    pub from_hash: String,
}

/// Request body for transplanting individual commits onto a branch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transplant {
    /// Hashes of the commits to transplant, oldest first
    pub hashes_to_transplant: Vec<String>,
}
