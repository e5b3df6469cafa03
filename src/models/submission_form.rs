use serde::Deserialize;
use serde_json::Value;

use super::{types::FieldValue, NewSubmission};

/// The submission payload exactly as the client sent it.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionForm {
    #[serde(default)]
    pub artist_name: Value,
    #[serde(default)]
    pub track_title: Value,
    #[serde(default)]
    pub genre: Value,
    #[serde(default)]
    pub track_link: Value,
    #[serde(default)]
    pub email: Value,
}

impl SubmissionForm {
    /// Checks that every field is present, returning the wire names of the missing ones otherwise.
    pub fn validate(&self) -> Result<NewSubmission, Vec<&'static str>> {
        let mut missing = Vec::new();

        let mut field = |name: &'static str, value: &Value| {
            let field = FieldValue::from_value(value);
            if field.is_none() {
                missing.push(name);
            }
            field
        };

        let artist_name = field("artistName", &self.artist_name);
        let track_title = field("trackTitle", &self.track_title);
        let genre = field("genre", &self.genre);
        let track_link = field("trackLink", &self.track_link);
        let email = field("email", &self.email);

        match (artist_name, track_title, genre, track_link, email) {
            (Some(artist_name), Some(track_title), Some(genre), Some(track_link), Some(email)) => {
                Ok(NewSubmission {
                    artist_name,
                    track_title,
                    genre,
                    track_link,
                    email,
                })
            }
            _ => Err(missing),
        }
    }
}
