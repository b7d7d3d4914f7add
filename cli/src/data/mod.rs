pub mod recorder;
pub mod records;
pub mod store;

pub use recorder::StepRecorder;
pub use records::{DailySteps, ExpiryStatus, Location, Supplement, Unit, DATE_FORMAT};
pub use store::{days_ago, now_timestamp, now_timestamp_millis, today, Store, StoreError};
