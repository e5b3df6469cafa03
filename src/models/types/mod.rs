mod field_value;
mod utc_datetime;

pub use field_value::FieldValue;
pub use utc_datetime::UtcDateTime;
