use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::store::BaselineStore;

/// Preference key the baseline is stored under.
pub const BASELINE_KEY: &str = "previous_total_steps";

/// Whether the counter has a baseline to measure against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterState {
    /// No baseline; the next reading becomes the baseline.
    Uninitialized,
    /// Readings are measured against the baseline.
    Tracking,
}

impl CounterState {
    pub fn label(&self) -> &'static str {
        match self {
            CounterState::Uninitialized => "Waiting for first reading",
            CounterState::Tracking => "Tracking",
        }
    }
}

/// Converts a lifetime hardware step count into steps since the last reset.
///
/// The baseline is loaded from the store on construction and only written
/// back by [`persist_baseline`](Self::persist_baseline) or
/// [`reset`](Self::reset). The session count itself is never persisted and
/// starts at 0 in every process.
#[derive(Debug)]
pub struct StepDeltaCounter<S> {
    store: S,
    baseline: Option<f32>,
    current: u32,
}

impl<S: BaselineStore> StepDeltaCounter<S> {
    /// Creates a counter and loads any previously persisted baseline.
    pub fn new(store: S) -> Result<Self, S::Error> {
        let mut counter = Self {
            store,
            baseline: None,
            current: 0,
        };
        counter.load_baseline()?;
        Ok(counter)
    }

    /// Reloads the baseline from the store. A missing or unusable value
    /// leaves the counter uninitialized.
    pub fn load_baseline(&mut self) -> Result<Option<f32>, S::Error> {
        let stored = self.store.get_float(BASELINE_KEY)?;
        self.baseline = stored.filter(|v| v.is_finite() && *v >= 0.0);
        if stored.is_some() && self.baseline.is_none() {
            warn!(value = ?stored, "Ignoring invalid persisted step baseline");
        }
        debug!(baseline = ?self.baseline, "Loaded step baseline");
        Ok(self.baseline)
    }

    /// Feeds a lifetime count from the sensor and returns the session count.
    pub fn on_reading(&mut self, lifetime_count: f32) -> u32 {
        if !lifetime_count.is_finite() || lifetime_count < 0.0 {
            warn!(lifetime_count, "Discarding invalid step reading");
            return self.current;
        }

        match self.baseline {
            None => {
                debug!(baseline = lifetime_count, "Established step baseline");
                self.baseline = Some(lifetime_count);
                self.current = 0;
            }
            Some(baseline) if lifetime_count < baseline => {
                // Lifetime counter went backwards, which means the device rebooted.
                debug!(
                    previous_baseline = baseline,
                    baseline = lifetime_count,
                    "Step counter regressed, re-baselining"
                );
                self.baseline = Some(lifetime_count);
                self.current = 0;
            }
            Some(baseline) => {
                self.current = (lifetime_count - baseline).floor() as u32;
            }
        }

        trace!(lifetime_count, steps = self.current, "Step reading");
        self.current
    }

    /// Steps since the baseline, as of the last reading.
    pub fn steps(&self) -> u32 {
        self.current
    }

    pub fn baseline(&self) -> Option<f32> {
        self.baseline
    }

    pub fn state(&self) -> CounterState {
        match self.baseline {
            Some(_) => CounterState::Tracking,
            None => CounterState::Uninitialized,
        }
    }

    /// Writes the baseline to the store. An uninitialized counter removes the key.
    pub fn persist_baseline(&mut self) -> Result<(), S::Error> {
        match self.baseline {
            Some(baseline) => self.store.put_float(BASELINE_KEY, baseline)?,
            None => self.store.remove(BASELINE_KEY)?,
        }
        debug!(baseline = ?self.baseline, "Persisted step baseline");
        Ok(())
    }

    /// Zeroes the session. The next reading becomes the new baseline.
    pub fn reset(&mut self) -> Result<(), S::Error> {
        self.baseline = None;
        self.current = 0;
        self.persist_baseline()
    }

    /// Zeroes the session at a known lifetime count and persists it.
    pub fn reset_at(&mut self, lifetime_count: f32) -> Result<(), S::Error> {
        self.baseline = None;
        self.on_reading(lifetime_count);
        self.persist_baseline()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
