use std::fmt::Display;

use serde_json::{Map, Value};
use strum::EnumString;
use uuid::Uuid;

use super::types::{FieldValue, UtcDateTime};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubmissionId(pub Uuid);

impl Display for SubmissionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review state of a submission.
///
/// Intake only ever creates `Pending` submissions. Moderators change the state outside of
/// this service and may use states of their own, which are kept as they are.
#[derive(Clone, Debug, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum SubmissionStatus {
    Pending,
    Approved,
    Rejected,
    #[strum(default)]
    Other(String),
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &str {
        match self {
            SubmissionStatus::Pending => "pending",
            SubmissionStatus::Approved => "approved",
            SubmissionStatus::Rejected => "rejected",
            SubmissionStatus::Other(status) => status,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub id: SubmissionId,
    pub artist_name: FieldValue,
    pub track_title: FieldValue,
    pub genre: FieldValue,
    pub track_link: FieldValue,
    pub email: FieldValue,
    pub submitted_at: UtcDateTime,
    pub status: SubmissionStatus,
    /// Keys added to the stored record by other tools, carried through rewrites untouched.
    pub extra: Map<String, Value>,
}

/// A validated submission that has not been assigned an id yet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewSubmission {
    pub artist_name: FieldValue,
    pub track_title: FieldValue,
    pub genre: FieldValue,
    pub track_link: FieldValue,
    pub email: FieldValue,
}

impl NewSubmission {
    pub fn into_pending(self, id: SubmissionId, submitted_at: UtcDateTime) -> Submission {
        Submission {
            id,
            artist_name: self.artist_name,
            track_title: self.track_title,
            genre: self.genre,
            track_link: self.track_link,
            email: self.email,
            submitted_at,
            status: SubmissionStatus::Pending,
            extra: Map::new(),
        }
    }
}
