mod submission;
mod submission_form;

pub mod types;

pub use submission::{NewSubmission, Submission, SubmissionId, SubmissionStatus};
pub use submission_form::SubmissionForm;
