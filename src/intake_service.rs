use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::{
    models::{SubmissionForm, SubmissionId},
    repository::{StorageError, SubmissionRepository},
    utils::{Clock, IdGenerator},
};

pub const ACCEPTED_MESSAGE: &str = "Track submitted! We'll review and notify you within 48 hours.";

#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("Missing required fields: {}", missing.join(", "))]
    Validation { missing: Vec<&'static str> },
    #[error("Could not store submission: {0}")]
    Internal(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionAccepted {
    pub id: SubmissionId,
    pub message: &'static str,
}

/// Turns submission forms into pending submissions.
pub struct SubmissionIntake {
    repository: Arc<SubmissionRepository>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl SubmissionIntake {
    pub fn new(
        repository: Arc<SubmissionRepository>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> SubmissionIntake {
        SubmissionIntake {
            repository,
            clock,
            ids,
        }
    }

    #[tracing::instrument(skip_all)]
    pub async fn submit(&self, form: &SubmissionForm) -> Result<SubmissionAccepted, IntakeError> {
        let new_submission = form.validate().map_err(|missing| {
            warn!("Rejected submission, missing fields: {}", missing.join(", "));
            IntakeError::Validation { missing }
        })?;

        let submission = new_submission.into_pending(self.ids.next_id(), self.clock.now());
        let submission = self.repository.add_submission(submission).await?;

        info!(
            "Accepted \"{}\" by {} at {} (id {})",
            submission.track_title, submission.artist_name, submission.submitted_at, submission.id
        );

        Ok(SubmissionAccepted {
            id: submission.id,
            message: ACCEPTED_MESSAGE,
        })
    }
}
