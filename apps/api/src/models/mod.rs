//! Domain records and the wire shapes they are parsed from.
//!
//! recruitment-service payloads are loose: field names drift between
//! endpoints, related records are sometimes nested and sometimes flattened to
//! ids, and lists arrive bare or paginated. Each `Raw*` struct absorbs that
//! looseness and is converted exactly once into a typed record.

pub mod application;
pub mod candidate;
pub mod interview;
pub mod job;
pub mod screening;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::status::UnknownStatus;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatus),

    #[error("{record} record is missing '{field}'")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("{record} record has invalid '{field}': {reason}")]
    InvalidField {
        record: &'static str,
        field: &'static str,
        reason: String,
    },
}

impl RecordError {
    pub(crate) fn missing(record: &'static str, field: &'static str) -> Self {
        Self::MissingField { record, field }
    }

    pub(crate) fn invalid(record: &'static str, field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            record,
            field,
            reason: reason.into(),
        }
    }
}

/// A list payload, either a bare array or a paginated wrapper.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawList<T> {
    Plain(Vec<T>),
    Paged { items: Vec<T> },
    Rows { rows: Vec<T> },
}

impl<T> RawList<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            RawList::Plain(items) | RawList::Paged { items } | RawList::Rows { rows: items } => {
                items
            }
        }
    }
}

/// Converts every row of a listing, dropping rows that fail validation.
/// A single malformed row should not blank an entire listing view.
pub fn convert_rows<R, T>(rows: Vec<R>) -> Vec<T>
where
    T: TryFrom<R, Error = RecordError>,
{
    rows.into_iter()
        .filter_map(|row| match T::try_from(row) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Skipping malformed upstream row: {e}");
                None
            }
        })
        .collect()
}

pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
