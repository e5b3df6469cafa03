use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::models::Submission;

use super::store::{StorageError, SubmissionStore};

pub struct SubmissionRepository {
    store: Arc<dyn SubmissionStore>,
    // Held across the whole load-append-save cycle; the store rewrites the collection wholesale.
    write_lock: Mutex<()>,
}

impl SubmissionRepository {
    pub fn new(store: Arc<dyn SubmissionStore>) -> SubmissionRepository {
        SubmissionRepository {
            store,
            write_lock: Mutex::new(()),
        }
    }

    #[tracing::instrument(skip(self, submission), fields(id = %submission.id))]
    pub async fn add_submission(&self, submission: Submission) -> Result<Submission, StorageError> {
        let _guard = self.write_lock.lock().await;

        let mut submissions = self.store.load().await?;
        submissions.push(submission.clone());
        self.store.save(&submissions).await?;

        debug!("Collection now holds {} submissions", submissions.len());
        Ok(submission)
    }
}
