use chrono::NaiveDate;
use serde::Serialize;
use stride_steps::{
    CounterState, SensorError, SensorStatus, SessionError, StepDeltaCounter, StepSensor,
    StepSession,
};
use tracing::{debug, info};

use crate::data::{now_timestamp, DailySteps, Store, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum RecorderError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sensor(#[from] SensorError),
}

impl From<SessionError<StoreError>> for RecorderError {
    fn from(err: SessionError<StoreError>) -> Self {
        match err {
            SessionError::Store(e) => RecorderError::Store(e),
            SessionError::Sensor(e) => RecorderError::Sensor(e),
        }
    }
}

/// Result of one listening session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub date: NaiveDate,
    pub status: SensorStatus,
    pub readings: usize,
    pub steps: u32,
    pub baseline: Option<f32>,
    pub state: CounterState,
    /// Whether a daily snapshot was written.
    pub recorded: bool,
}

/// Runs step sessions against the store and keeps the daily snapshot current.
pub struct StepRecorder<'a> {
    store: &'a mut Store,
}

impl<'a> StepRecorder<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    /// Starts listening on `sensor`, drains its readings, stops (persisting the
    /// baseline) and records the resulting count for `date`.
    pub fn record_session<S: StepSensor>(
        &mut self,
        sensor: S,
        date: NaiveDate,
    ) -> Result<SessionReport, RecorderError> {
        let counter = StepDeltaCounter::new(&mut *self.store)?;
        let mut session = StepSession::new(counter, sensor);

        let status = session.start_listening()?;
        let readings = session.pump();
        let steps = session.steps();
        session.stop_listening()?;

        let baseline = session.counter().baseline();
        let state = session.counter().state();
        drop(session);

        let recorded = status == SensorStatus::Listening && readings > 0;
        if recorded {
            self.store.upsert_daily_steps(&DailySteps {
                date,
                steps,
                recorded_at: now_timestamp(),
            })?;
            info!(%date, steps, readings, "Recorded daily steps");
        } else {
            debug!(?status, readings, "Nothing to record");
        }

        Ok(SessionReport {
            date,
            status,
            readings,
            steps,
            baseline,
            state,
            recorded,
        })
    }

    /// Clears the baseline so the next session starts from 0.
    pub fn reset(&mut self) -> Result<(), RecorderError> {
        let mut counter = StepDeltaCounter::new(&mut *self.store)?;
        counter.reset()?;
        info!("Step baseline cleared");
        Ok(())
    }
}
