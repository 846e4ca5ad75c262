//! The module contains the `Record` type, a single expense or income entry of
//! the document, and the inputs used to create or patch one.
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Amount, EngineError, ResultEngine};

/// Whether a record takes money out or brings it in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Expense,
    Income,
}

/// One entry of the document.
///
/// Older documents may lack `title`, `details` or even `date`; those fields
/// read as empty instead of failing the whole load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(
        default,
        serialize_with = "serialize_date",
        deserialize_with = "deserialize_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<NaiveDate>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<RecordKind>,
    pub amount: Amount,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub details: serde_json::Value,
}

impl Record {
    /// Kind used by aggregations: records without a kind are expenses.
    pub fn effective_kind(&self) -> RecordKind {
        self.kind.unwrap_or(RecordKind::Expense)
    }

    /// Shallow merge: every field present in `patch` overrides the current one.
    pub fn apply(&mut self, patch: RecordPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(date) = patch.date {
            self.date = Some(date);
        }
        if let Some(kind) = patch.kind {
            self.kind = Some(kind);
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(details) = patch.details {
            self.details = details;
        }
    }
}

/// Input for a new record, as received from a client.
///
/// Every field is optional here; [`crate::ValidationPolicy`] decides what is
/// required.
#[derive(Clone, Debug, Default)]
pub struct NewRecord {
    pub title: Option<String>,
    pub date: Option<String>,
    pub kind: Option<RecordKind>,
    pub amount: Option<Amount>,
    pub category: Option<String>,
    pub details: Option<serde_json::Value>,
}

/// Fields to merge into an existing record. The id is not patchable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordPatch {
    pub title: Option<String>,
    pub date: Option<NaiveDate>,
    pub kind: Option<RecordKind>,
    pub amount: Option<Amount>,
    pub category: Option<String>,
    pub details: Option<serde_json::Value>,
}

/// Parses a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DDTHH:MM:SS`; for
/// timestamps only the date part is kept.
pub fn parse_date(value: &str) -> ResultEngine<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(datetime.date());
    }
    Err(EngineError::Validation(format!("invalid date: {value:?}")))
}

fn serialize_date<S: Serializer>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error> {
    match date {
        Some(date) => serializer.collect_str(&date.format("%Y-%m-%d")),
        None => serializer.serialize_none(),
    }
}

fn deserialize_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|raw| parse_date(&raw).map_err(<D::Error as serde::de::Error>::custom))
        .transpose()
}
