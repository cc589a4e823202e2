//! The `Contents` discriminated union and its JSON codec
//!
//! Contents are the objects stored under a [`super::ContentsKey`]. Like
//! [`super::Reference`], the wire shape is a JSON object discriminated by a
//! `type` field, and the codec follows the same contract: `null` passes
//! through on the optional decode path, any other unrecognized
//! discriminator fails with [`ModelError::UnrecognizedVariant`].

use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

use super::{decode_variant, discriminator_of, encode_variant, ModelError};

/// Discriminator values of the `Contents` union
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, AsRefStr)]
pub enum ContentsType {
    /// Iceberg table pointer
    #[strum(serialize = "ICEBERG_TABLE")]
    IcebergTable,
    /// Delta Lake table pointer
    #[strum(serialize = "DELTA_LAKE_TABLE")]
    DeltaLakeTable,
    /// Stored SQL view
    #[strum(serialize = "SQL_VIEW")]
    SqlView,
}

/// Pointer to the current metadata of an Iceberg table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IcebergTable {
    /// Location of the table's current metadata file
    pub metadata_location: String,
}

/// Pointer to the state of a Delta Lake table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeltaLakeTable {
    /// Locations of the table's metadata files, newest first
    #[serde(default)]
    pub metadata_location_history: Vec<String>,

    /// Locations of the table's checkpoint files, newest first
    #[serde(default)]
    pub checkpoint_location_history: Vec<String>,

    /// Contents of the `_last_checkpoint` file, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_checkpoint: Option<String>,
}

/// A SQL view stored as its defining text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SqlView {
    /// The view's defining SQL text
    pub sql_text: String,

    /// SQL dialect the text is written in
    pub dialect: String,
}

/// Contents stored under a key: exactly one of the known table/view shapes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contents {
    /// A `type: "ICEBERG_TABLE"` object
    IcebergTable(IcebergTable),
    /// A `type: "DELTA_LAKE_TABLE"` object
    DeltaLakeTable(DeltaLakeTable),
    /// A `type: "SQL_VIEW"` object
    SqlView(SqlView),
}

/// Union name used in codec error messages
const UNION: &str = "Contents";

impl Contents {
    /// Returns the discriminator of this contents object
    pub fn contents_type(&self) -> ContentsType {
        match self {
            Contents::IcebergTable(_) => ContentsType::IcebergTable,
            Contents::DeltaLakeTable(_) => ContentsType::DeltaLakeTable,
            Contents::SqlView(_) => ContentsType::SqlView,
        }
    }

    /// Decodes a contents object from a JSON value, dispatching on `type`
    pub fn from_json(json: Value) -> Result<Contents, ModelError> {
        let discriminator = discriminator_of(&json);
        let contents_type = ContentsType::from_str(&discriminator)
            .map_err(|_| ModelError::unrecognized_variant(UNION, &discriminator))?;

        match contents_type {
            ContentsType::IcebergTable => {
                Ok(Contents::IcebergTable(decode_variant(UNION, json)?))
            }
            ContentsType::DeltaLakeTable => {
                Ok(Contents::DeltaLakeTable(decode_variant(UNION, json)?))
            }
            ContentsType::SqlView => Ok(Contents::SqlView(decode_variant(UNION, json)?)),
        }
    }

    /// Decodes optional contents, passing JSON `null` through as `None`
    pub fn from_json_opt(json: Value) -> Result<Option<Contents>, ModelError> {
        if json.is_null() {
            return Ok(None);
        }
        Contents::from_json(json).map(Some)
    }

    /// Encodes the contents as a JSON object carrying its `type` field
    pub fn to_json(&self) -> Value {
        match self {
            Contents::IcebergTable(table) => {
                encode_variant(ContentsType::IcebergTable.as_ref(), table)
            }
            Contents::DeltaLakeTable(table) => {
                encode_variant(ContentsType::DeltaLakeTable.as_ref(), table)
            }
            Contents::SqlView(view) => encode_variant(ContentsType::SqlView.as_ref(), view),
        }
    }

    /// Encodes optional contents, mapping `None` to JSON `null`
    pub fn to_json_opt(contents: Option<&Contents>) -> Value {
        match contents {
            Some(contents) => contents.to_json(),
            None => Value::Null,
        }
    }
}

impl Serialize for Contents {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Contents {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = Value::deserialize(deserializer)?;
        Contents::from_json(json).map_err(serde::de::Error::custom)
    }
}
