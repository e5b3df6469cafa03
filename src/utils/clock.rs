use time::OffsetDateTime;
use uuid::Uuid;

use crate::models::{types::UtcDateTime, SubmissionId};

pub trait Clock: Send + Sync {
    fn now(&self) -> UtcDateTime;
}

pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> SubmissionId;
}

/// Wall clock, at the millisecond precision submissions are stored with.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> UtcDateTime {
        UtcDateTime::from(OffsetDateTime::now_utc()).truncate_to_millis()
    }
}

/// Random v4 UUIDs.
#[derive(Debug, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next_id(&self) -> SubmissionId {
        SubmissionId(Uuid::new_v4())
    }
}
