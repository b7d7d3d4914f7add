//! Step sensor seam.

use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SensorError {
    #[error("Step counter sensor is not available on this device")]
    Unavailable,

    #[error("Failed to subscribe to step sensor: {0}")]
    Subscribe(String),
}

/// Source of lifetime step counts.
///
/// Readings are delivered one at a time; `next_reading` drains whatever
/// the platform pushed since the last call.
pub trait StepSensor {
    /// Whether the device has a step counter at all.
    fn is_available(&self) -> bool;

    fn subscribe(&mut self) -> Result<(), SensorError>;

    fn unsubscribe(&mut self);

    fn is_subscribed(&self) -> bool;

    /// Next pending lifetime count, if any.
    fn next_reading(&mut self) -> Option<f32>;

    /// Synchronously queries the current lifetime count.
    ///
    /// Most platforms can only push readings, so the default is `None`.
    fn current_reading(&mut self) -> Option<f32> {
        None
    }
}

/// Sensor that replays a fixed sequence of lifetime counts.
///
/// Readings are only delivered while subscribed. Used for feeding
/// recorded counts from the command line and in tests.
#[derive(Debug, Clone, Default)]
pub struct ReplaySensor {
    pending: VecDeque<f32>,
    last_delivered: Option<f32>,
    available: bool,
    subscribed: bool,
    queryable: bool,
    subscribe_count: u32,
}

impl ReplaySensor {
    pub fn new(readings: impl IntoIterator<Item = f32>) -> Self {
        Self {
            pending: readings.into_iter().collect(),
            available: true,
            ..Self::default()
        }
    }

    /// A sensor reporting itself as missing from the device.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// Enables [`StepSensor::current_reading`], answering with the last delivered count.
    pub fn queryable(mut self) -> Self {
        self.queryable = true;
        self
    }

    pub fn push(&mut self, lifetime_count: f32) {
        self.pending.push_back(lifetime_count);
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// How many times `subscribe` succeeded.
    pub fn subscribe_count(&self) -> u32 {
        self.subscribe_count
    }
}

impl StepSensor for ReplaySensor {
    fn is_available(&self) -> bool {
        self.available
    }

    fn subscribe(&mut self) -> Result<(), SensorError> {
        if !self.available {
            return Err(SensorError::Unavailable);
        }
        self.subscribed = true;
        self.subscribe_count += 1;
        Ok(())
    }

    fn unsubscribe(&mut self) {
        self.subscribed = false;
    }

    fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    fn next_reading(&mut self) -> Option<f32> {
        if !self.subscribed {
            return None;
        }
        let reading = self.pending.pop_front()?;
        self.last_delivered = Some(reading);
        Some(reading)
    }

    fn current_reading(&mut self) -> Option<f32> {
        if self.queryable {
            self.last_delivered
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_only_delivers_while_subscribed() {
        let mut sensor = ReplaySensor::new([1.0, 2.0]);
        assert_eq!(sensor.next_reading(), None);

        sensor.subscribe().unwrap();
        assert_eq!(sensor.next_reading(), Some(1.0));

        sensor.unsubscribe();
        assert_eq!(sensor.next_reading(), None);
        assert_eq!(sensor.pending(), 1);
    }

    #[test]
    fn test_unavailable_refuses_subscription() {
        let mut sensor = ReplaySensor::unavailable();
        assert!(!sensor.is_available());
        assert_eq!(sensor.subscribe(), Err(SensorError::Unavailable));
    }

    #[test]
    fn test_current_reading_requires_queryable() {
        let mut sensor = ReplaySensor::new([7.0]);
        sensor.subscribe().unwrap();
        sensor.next_reading();
        assert_eq!(sensor.current_reading(), None);

        let mut sensor = ReplaySensor::new([7.0]).queryable();
        sensor.subscribe().unwrap();
        sensor.next_reading();
        assert_eq!(sensor.current_reading(), Some(7.0));
    }
}
