use crate::domain::decode::{null_as_default, ObjectOrNull};
use crate::utils::error::{DocgenError, Result};
use serde::{Deserialize, Serialize};

/// Decoded request body describing one document to render.
///
/// Only a JSON object (or `null`) decodes. Missing or `null` fields take their
/// zero value, keys match case-insensitively, unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ObjectOrNull<PayloadFields>")]
pub struct Payload {
    pub title: String,
    pub date: String,
    pub name: String,
    pub items: Vec<Item>,
    #[serde(rename = "type")]
    pub doc_type: String,
}

/// One line entry. `unit_price` is in currency minor units.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ObjectOrNull<ItemFields>")]
pub struct Item {
    pub title: String,
    pub unit_price: i64,
    pub quantity: u64,
    pub unit: String,
}

impl Payload {
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(DocgenError::InvalidPayload)
    }
}

// Keys arrive lower-cased, so field names here must stay lower-case.
#[derive(Default, Deserialize)]
#[serde(default)]
struct PayloadFields {
    #[serde(deserialize_with = "null_as_default")]
    title: String,
    #[serde(deserialize_with = "null_as_default")]
    date: String,
    #[serde(deserialize_with = "null_as_default")]
    name: String,
    #[serde(deserialize_with = "null_as_default")]
    items: Vec<Item>,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    doc_type: String,
}

#[derive(Default, Deserialize)]
#[serde(default)]
struct ItemFields {
    #[serde(deserialize_with = "null_as_default")]
    title: String,
    #[serde(deserialize_with = "null_as_default")]
    unit_price: i64,
    #[serde(deserialize_with = "null_as_default")]
    quantity: u64,
    #[serde(deserialize_with = "null_as_default")]
    unit: String,
}

impl From<ObjectOrNull<PayloadFields>> for Payload {
    fn from(ObjectOrNull(fields): ObjectOrNull<PayloadFields>) -> Self {
        Self {
            title: fields.title,
            date: fields.date,
            name: fields.name,
            items: fields.items,
            doc_type: fields.doc_type,
        }
    }
}

impl From<ObjectOrNull<ItemFields>> for Item {
    fn from(ObjectOrNull(fields): ObjectOrNull<ItemFields>) -> Self {
        Self {
            title: fields.title,
            unit_price: fields.unit_price,
            quantity: fields.quantity,
            unit: fields.unit,
        }
    }
}
