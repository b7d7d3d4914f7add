//! Session-relative step counting for stride.
//!
//! Step sensors report a lifetime count that only grows until the device
//! reboots. [`StepDeltaCounter`] turns that into "steps since the last reset"
//! against a baseline kept in a [`BaselineStore`], so restarting the process
//! does not produce phantom steps. [`StepSession`] adds the listener
//! lifecycle around a [`StepSensor`].
//!
//! # Example
//!
//! ```
//! use stride_steps::{MemoryStore, StepDeltaCounter};
//!
//! let mut counter = StepDeltaCounter::new(MemoryStore::new())?;
//! counter.on_reading(1000.0);
//! counter.on_reading(1050.0);
//! assert_eq!(counter.steps(), 50);
//! # Ok::<(), std::convert::Infallible>(())
//! ```

mod counter;
mod sensor;
mod session;
mod store;

pub use counter::{CounterState, StepDeltaCounter, BASELINE_KEY};
pub use sensor::{ReplaySensor, SensorError, StepSensor};
pub use session::{SensorStatus, SessionError, StepSession};
pub use store::{BaselineStore, MemoryStore};
