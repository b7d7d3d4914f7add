use serde::Serialize;
use tracing::{debug, info, warn};

use crate::counter::StepDeltaCounter;
use crate::sensor::{SensorError, StepSensor};
use crate::store::BaselineStore;

/// Outcome of [`StepSession::start_listening`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorStatus {
    Listening,
    /// The device has no step sensor. Returned only from the first start.
    Unavailable,
    /// Sensor is missing and that was already reported.
    Degraded,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError<E: std::error::Error + 'static> {
    #[error("Failed to persist step baseline: {0}")]
    Store(#[source] E),

    #[error(transparent)]
    Sensor(#[from] SensorError),
}

/// A step counter bound to a sensor for one listening lifecycle.
///
/// When the sensor is missing the session is degraded: it reports that
/// once and afterwards [`steps`](Self::steps) is always 0.
pub struct StepSession<P, S> {
    counter: StepDeltaCounter<P>,
    sensor: S,
    degraded: bool,
    reported_unavailable: bool,
}

impl<P: BaselineStore, S: StepSensor> StepSession<P, S> {
    pub fn new(counter: StepDeltaCounter<P>, sensor: S) -> Self {
        let degraded = !sensor.is_available();
        Self {
            counter,
            sensor,
            degraded,
            reported_unavailable: false,
        }
    }

    pub fn start_listening(&mut self) -> Result<SensorStatus, SessionError<P::Error>> {
        if self.degraded {
            return Ok(self.report_unavailable());
        }
        if self.sensor.is_subscribed() {
            return Ok(SensorStatus::Listening);
        }

        match self.sensor.subscribe() {
            Ok(()) => {
                debug!(baseline = ?self.counter.baseline(), "Step sensor subscribed");
                Ok(SensorStatus::Listening)
            }
            Err(SensorError::Unavailable) => {
                self.degraded = true;
                Ok(self.report_unavailable())
            }
            Err(e) => Err(e.into()),
        }
    }

    fn report_unavailable(&mut self) -> SensorStatus {
        if self.reported_unavailable {
            return SensorStatus::Degraded;
        }
        self.reported_unavailable = true;
        warn!("Step counter sensor is not available; steps will stay at 0");
        SensorStatus::Unavailable
    }

    /// Feeds every pending sensor reading into the counter.
    pub fn pump(&mut self) -> usize {
        if self.degraded {
            return 0;
        }
        let mut processed = 0;
        while let Some(reading) = self.sensor.next_reading() {
            self.counter.on_reading(reading);
            processed += 1;
        }
        processed
    }

    /// Unsubscribes and persists the baseline so the next process resumes from it.
    pub fn stop_listening(&mut self) -> Result<(), SessionError<P::Error>> {
        self.sensor.unsubscribe();
        self.counter
            .persist_baseline()
            .map_err(SessionError::Store)?;
        debug!(steps = self.steps(), "Step sensor unsubscribed");
        Ok(())
    }

    /// Zeroes the session count.
    ///
    /// Re-baselines directly when the sensor can be queried. Otherwise stops
    /// listening, clears the baseline and, if the session was listening,
    /// subscribes again so the next delivered reading becomes the baseline.
    pub fn reset(&mut self) -> Result<(), SessionError<P::Error>> {
        if self.degraded {
            return Ok(());
        }

        if let Some(reading) = self.sensor.current_reading() {
            self.counter
                .reset_at(reading)
                .map_err(SessionError::Store)?;
            info!(baseline = reading, "Step session reset");
            return Ok(());
        }

        let was_listening = self.sensor.is_subscribed();
        self.sensor.unsubscribe();
        self.counter.reset().map_err(SessionError::Store)?;
        if was_listening {
            self.sensor.subscribe()?;
            info!("Step session reset, waiting for next reading");
        } else {
            info!("Step session reset while stopped");
        }
        Ok(())
    }

    pub fn steps(&self) -> u32 {
        if self.degraded {
            0
        } else {
            self.counter.steps()
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn counter(&self) -> &StepDeltaCounter<P> {
        &self.counter
    }

    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn into_parts(self) -> (StepDeltaCounter<P>, S) {
        (self.counter, self.sensor)
    }
}
