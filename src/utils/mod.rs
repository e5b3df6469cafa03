mod clock;

pub use clock::{Clock, IdGenerator, SystemClock, UuidGenerator};

#[cfg(test)]
pub use clock::fixed;
