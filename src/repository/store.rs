use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

use crate::models::Submission;

use super::conversion::{
    FromStoredConversionError, StorageConvertible, StoredSubmission, ToStoredConversionError,
};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Submissions file {} is corrupt: {source}", path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not encode submissions: {0}")]
    Encode(#[from] serde_json::Error),
    #[error(transparent)]
    FromStored(#[from] FromStoredConversionError),
    #[error(transparent)]
    ToStored(#[from] ToStoredConversionError),
}

fn io_err(path: &Path) -> impl FnOnce(std::io::Error) -> StorageError {
    let path = path.to_path_buf();
    move |source| StorageError::Io { path, source }
}

/// Durable home of the submission collection.
///
/// Both operations work on the whole collection at once, so callers are responsible
/// for serializing a load with the save that follows it.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn load(&self) -> Result<Vec<Submission>, StorageError>;

    async fn save(&self, submissions: &[Submission]) -> Result<(), StorageError>;
}

/// Keeps submissions as a pretty-printed JSON array in a single file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> JsonFileStore {
        JsonFileStore { path: path.into() }
    }

    async fn ensure_parent_dir(&self) -> Result<(), StorageError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => tokio::fs::create_dir_all(dir)
                .await
                .map_err(io_err(dir)),
            _ => Ok(()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

#[async_trait]
impl SubmissionStore for JsonFileStore {
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    async fn load(&self) -> Result<Vec<Submission>, StorageError> {
        self.ensure_parent_dir().await?;

        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("No submissions file yet, starting with an empty collection");
                return Ok(Vec::new());
            }
            Err(err) => return Err(io_err(&self.path)(err)),
        };

        let stored: Vec<StoredSubmission> =
            serde_json::from_slice(&contents).map_err(|source| StorageError::Corrupt {
                path: self.path.clone(),
                source,
            })?;

        let submissions = stored
            .iter()
            .map(Submission::from_stored)
            .collect::<Result<Vec<_>, _>>()?;

        debug!("Loaded {} submissions", submissions.len());
        Ok(submissions)
    }

    #[tracing::instrument(skip(self, submissions), fields(path = %self.path.display(), count = submissions.len()))]
    async fn save(&self, submissions: &[Submission]) -> Result<(), StorageError> {
        self.ensure_parent_dir().await?;

        let stored = submissions
            .iter()
            .map(Submission::to_stored)
            .collect::<Result<Vec<_>, _>>()?;
        let contents = serde_json::to_vec_pretty(&stored)?;

        // Written next to the target and renamed over it, so readers never see half a file.
        let temp_path = self.temp_path();
        tokio::fs::write(&temp_path, contents)
            .await
            .map_err(io_err(&temp_path))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(io_err(&self.path))?;

        Ok(())
    }
}
