mod conversion;
mod store;
mod submission_repository;

pub use store::{JsonFileStore, StorageError, SubmissionStore};
pub use submission_repository::SubmissionRepository;

#[cfg(test)]
pub use store::memory::MemoryStore;
