//! Calorie intake and expenditure tracking for stride.
//!
//! Meals and physical activities are immutable records with a derived
//! kilocalorie value. [`EnergyBalanceTracker`] holds them in insertion order
//! and computes totals on read.
//!
//! # Example
//!
//! ```
//! use stride_energy::{Activity, EnergyBalanceTracker, Meal};
//!
//! let mut tracker = EnergyBalanceTracker::new();
//! tracker.add_consumed(Meal::new("Oatmeal", 250.0, 100.0)?);
//! tracker.add_expended(Activity::new("Walking", 4.0, 30.0, 70.0)?);
//!
//! assert!(tracker.net_balance() > 0.0);
//! # Ok::<(), stride_energy::EnergyError>(())
//! ```

mod activity;
mod error;
mod meal;
mod tracker;

pub use activity::Activity;
pub use error::{EnergyError, Result};
pub use meal::Meal;
pub use tracker::{Balance, EnergyBalanceTracker, EnergySummary};
