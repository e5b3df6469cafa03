use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use time::{
    format_description::{well_known::Rfc3339, FormatItem},
    macros::format_description,
    OffsetDateTime,
};
use uuid::Uuid;

use crate::models::{
    types::{FieldValue, UtcDateTime},
    Submission, SubmissionId, SubmissionStatus,
};

/// Same shape as `Date.toISOString()`, e.g. `2024-05-01T10:20:30.123Z`.
const TIMESTAMP_FORMAT: &[FormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
);

pub trait StorageConvertible: Sized {
    type StoredType;

    fn to_stored(&self) -> Result<Self::StoredType, ToStoredConversionError>;

    fn from_stored(value: &Self::StoredType) -> Result<Self, FromStoredConversionError>;
}

#[derive(Debug, Error)]
pub enum FromStoredConversionError {
    #[error("Failed to parse datetime: {0}")]
    DateTime(#[from] time::error::Parse),
    #[error("Invalid id: {0}")]
    InvalidId(#[from] uuid::Error),
}

#[derive(Debug, Error)]
pub enum ToStoredConversionError {
    #[error("Failed to format datetime")]
    DateTime(#[from] time::error::Format),
}

/// A submission as it is laid out in the submissions file.
///
/// Keys this service does not know about end up in `extra` and are written back as they were.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSubmission {
    pub id: String,
    pub artist_name: FieldValue,
    pub track_title: FieldValue,
    pub genre: FieldValue,
    pub track_link: FieldValue,
    pub email: FieldValue,
    pub submitted_at: String,
    pub status: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StorageConvertible for UtcDateTime {
    type StoredType = String;

    fn to_stored(&self) -> Result<Self::StoredType, ToStoredConversionError> {
        let string = OffsetDateTime::from(*self).format(TIMESTAMP_FORMAT)?;
        Ok(string)
    }

    fn from_stored(value: &Self::StoredType) -> Result<Self, FromStoredConversionError> {
        let datetime = OffsetDateTime::parse(value, &Rfc3339)?;
        Ok(UtcDateTime::from(datetime))
    }
}

impl StorageConvertible for SubmissionId {
    type StoredType = String;

    fn to_stored(&self) -> Result<Self::StoredType, ToStoredConversionError> {
        Ok(self.to_string())
    }

    fn from_stored(value: &Self::StoredType) -> Result<Self, FromStoredConversionError> {
        Ok(SubmissionId(Uuid::parse_str(value)?))
    }
}

impl StorageConvertible for SubmissionStatus {
    type StoredType = String;

    fn to_stored(&self) -> Result<Self::StoredType, ToStoredConversionError> {
        Ok(self.as_str().to_string())
    }

    fn from_stored(value: &Self::StoredType) -> Result<Self, FromStoredConversionError> {
        Ok(SubmissionStatus::from_str(value)
            .unwrap_or_else(|_| SubmissionStatus::Other(value.clone())))
    }
}

impl StorageConvertible for Submission {
    type StoredType = StoredSubmission;

    fn to_stored(&self) -> Result<Self::StoredType, ToStoredConversionError> {
        Ok(StoredSubmission {
            id: self.id.to_stored()?,
            artist_name: self.artist_name.clone(),
            track_title: self.track_title.clone(),
            genre: self.genre.clone(),
            track_link: self.track_link.clone(),
            email: self.email.clone(),
            submitted_at: self.submitted_at.to_stored()?,
            status: self.status.to_stored()?,
            extra: self.extra.clone(),
        })
    }

    fn from_stored(value: &Self::StoredType) -> Result<Self, FromStoredConversionError> {
        Ok(Submission {
            id: SubmissionId::from_stored(&value.id)?,
            artist_name: value.artist_name.clone(),
            track_title: value.track_title.clone(),
            genre: value.genre.clone(),
            track_link: value.track_link.clone(),
            email: value.email.clone(),
            submitted_at: UtcDateTime::from_stored(&value.submitted_at)?,
            status: SubmissionStatus::from_stored(&value.status)?,
            extra: value.extra.clone(),
        })
    }
}
