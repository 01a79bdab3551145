pub mod duration;
pub mod record;
pub mod trigger;

pub use duration::Duration;
pub use record::{SeizureRecord, StoredRecord};
