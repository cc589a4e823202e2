//! The `Reference` discriminated union and its JSON codec
//!
//! A Nessie reference names a point in the commit history. On the wire it
//! is a JSON object whose `type` field selects one of three shapes:
//!
//! - `BRANCH` — a mutable named reference that commits advance
//! - `TAG` — an immutable named reference
//! - `HASH` — a detached reference addressing a commit directly
//!
//! The codec in this module dispatches on that discriminator. Two
//! behaviors are part of the wire contract other generated clients rely on
//! and are preserved here deliberately:
//!
//! - decoding a JSON `null` passes it through unchanged (see
//!   [`Reference::from_json_opt`]) rather than failing, while
//! - decoding a non-null object with an unknown `type` fails with
//!   [`ModelError::UnrecognizedVariant`] naming the offending value.

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

use super::{decode_variant, discriminator_of, encode_variant, ModelError};

/// Discriminator values of the `Reference` union
///
/// Parsing an unknown string fails, which is what turns a bad `type` field
/// into [`ModelError::UnrecognizedVariant`] during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
pub enum ReferenceType {
    /// Immutable named reference
    #[strum(serialize = "TAG")]
    Tag,
    /// Mutable named reference
    #[strum(serialize = "BRANCH")]
    Branch,
    /// Detached commit hash
    #[strum(serialize = "HASH")]
    Hash,
}

/// A mutable named reference pointing at a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    /// Branch name
    pub name: String,

    /// Hash of the commit the branch currently points at
    ///
    /// Absent when the branch is used to name a target that does not exist
    /// yet, e.g. in a create-reference request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// An immutable named reference pointing at a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name
    pub name: String,

    /// Hash of the commit the tag points at
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

/// A detached reference addressing a commit by hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hash {
    /// Hash of the addressed commit
    pub hash: String,
}

/// A Nessie reference: exactly one of a tag, a branch, or a detached hash
///
/// The enum is closed; every value carries exactly one variant shape, which
/// is what the wire contract's "exactly one discriminator at a time"
/// invariant maps to in Rust.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    /// A `type: "TAG"` reference
    Tag(Tag),
    /// A `type: "BRANCH"` reference
    Branch(Branch),
    /// A `type: "HASH"` reference
    Hash(Hash),
}

/// Union name used in codec error messages
const UNION: &str = "Reference";

impl Reference {
    /// Returns the discriminator of this reference
    pub fn reference_type(&self) -> ReferenceType {
        match self {
            Reference::Tag(_) => ReferenceType::Tag,
            Reference::Branch(_) => ReferenceType::Branch,
            Reference::Hash(_) => ReferenceType::Hash,
        }
    }

    /// Returns the reference name, if the variant carries one
    ///
    /// Detached hashes are anonymous, so this is `None` for
    /// [`Reference::Hash`].
    pub fn name(&self) -> Option<&str> {
        match self {
            Reference::Tag(tag) => Some(&tag.name),
            Reference::Branch(branch) => Some(&branch.name),
            Reference::Hash(_) => None,
        }
    }

    /// Returns the commit hash the reference points at, if known
    pub fn hash(&self) -> Option<&str> {
        match self {
            Reference::Tag(tag) => tag.hash.as_deref(),
            Reference::Branch(branch) => branch.hash.as_deref(),
            Reference::Hash(hash) => Some(&hash.hash),
        }
    }

    /// Decodes a reference from a JSON value, dispatching on `type`
    ///
    /// # Errors
    ///
    /// - [`ModelError::UnrecognizedVariant`] when `type` is absent or not
    ///   one of `TAG`, `BRANCH`, `HASH`
    /// - [`ModelError::InvalidPayload`] when the discriminator is known but
    ///   the remaining fields do not decode as that variant's shape
    pub fn from_json(json: Value) -> Result<Reference, ModelError> {
        let discriminator = discriminator_of(&json);
        let reference_type = ReferenceType::from_str(&discriminator)
            .map_err(|_| ModelError::unrecognized_variant(UNION, &discriminator))?;

        match reference_type {
            ReferenceType::Tag => Ok(Reference::Tag(decode_variant(UNION, json)?)),
            ReferenceType::Branch => Ok(Reference::Branch(decode_variant(UNION, json)?)),
            ReferenceType::Hash => Ok(Reference::Hash(decode_variant(UNION, json)?)),
        }
    }

    /// Decodes an optional reference, passing JSON `null` through as `None`
    ///
    /// Note the asymmetry: `null` is accepted unchanged while any non-null
    /// value with an unrecognized discriminator fails. Other clients of the
    /// same API expect exactly this behavior, so it is kept as-is.
    pub fn from_json_opt(json: Value) -> Result<Option<Reference>, ModelError> {
        if json.is_null() {
            return Ok(None);
        }
        Reference::from_json(json).map(Some)
    }

    /// Encodes the reference as a JSON object carrying its `type` field
    pub fn to_json(&self) -> Value {
        match self {
            Reference::Tag(tag) => encode_variant(ReferenceType::Tag.as_ref(), tag),
            Reference::Branch(branch) => encode_variant(ReferenceType::Branch.as_ref(), branch),
            Reference::Hash(hash) => encode_variant(ReferenceType::Hash.as_ref(), hash),
        }
    }

    /// Encodes an optional reference, mapping `None` to JSON `null`
    pub fn to_json_opt(reference: Option<&Reference>) -> Value {
        match reference {
            Some(reference) => reference.to_json(),
            None => Value::Null,
        }
    }
}

impl From<Branch> for Reference {
    fn from(branch: Branch) -> Self {
        Reference::Branch(branch)
    }
}

impl From<Tag> for Reference {
    fn from(tag: Tag) -> Self {
        Reference::Tag(tag)
    }
}

impl From<Hash> for Reference {
    fn from(hash: Hash) -> Self {
        Reference::Hash(hash)
    }
}

// Serialize/Deserialize delegate to the codec so the union nests inside
// larger response models with the same discriminator semantics.

impl Serialize for Reference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Reference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = Value::deserialize(deserializer)?;
        Reference::from_json(json).map_err(serde::de::Error::custom)
    }
}
