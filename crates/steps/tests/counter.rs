use pretty_assertions::assert_eq;
use stride_steps::*;

#[test]
fn first_reading_is_zero_then_counts() {
    let mut counter = StepDeltaCounter::new(MemoryStore::new()).unwrap();
    counter.on_reading(1000.0);
    assert_eq!(counter.steps(), 0);
    counter.on_reading(1050.0);
    assert_eq!(counter.steps(), 50);
}

#[test]
fn restart_resumes_from_persisted_baseline() {
    let mut store = MemoryStore::with_value(BASELINE_KEY, 1050.0);

    let mut counter = StepDeltaCounter::new(&mut store).unwrap();
    counter.on_reading(1070.0);
    assert_eq!(counter.steps(), 20);
    counter.persist_baseline().unwrap();
    drop(counter);

    // Second restart, same baseline
    let mut counter = StepDeltaCounter::new(&mut store).unwrap();
    assert_eq!(counter.steps(), 0);
    counter.on_reading(1100.0);
    assert_eq!(counter.steps(), 50);
}

#[test]
fn baseline_only_written_on_persist() {
    let mut store = MemoryStore::new();
    {
        let mut counter = StepDeltaCounter::new(&mut store).unwrap();
        counter.on_reading(300.0);
        counter.on_reading(320.0);
    }
    assert_eq!(store.get(BASELINE_KEY), None);

    let mut counter = StepDeltaCounter::new(&mut store).unwrap();
    counter.on_reading(300.0);
    counter.persist_baseline().unwrap();
    assert_eq!(counter.into_store().get(BASELINE_KEY), Some(300.0));
}

#[test]
fn regression_rebaselines_instead_of_going_negative() {
    let mut counter = StepDeltaCounter::new(MemoryStore::with_value(BASELINE_KEY, 1000.0)).unwrap();
    counter.on_reading(1050.0);
    assert_eq!(counter.steps(), 50);

    counter.on_reading(200.0);
    assert_eq!(counter.steps(), 0);
    assert_eq!(counter.baseline(), Some(200.0));

    counter.on_reading(230.0);
    assert_eq!(counter.steps(), 30);
}

#[test]
fn reset_then_same_reading_is_zero() {
    let mut counter = StepDeltaCounter::new(MemoryStore::new()).unwrap();
    counter.on_reading(500.0);
    counter.on_reading(640.0);
    assert_eq!(counter.steps(), 140);

    counter.reset().unwrap();
    assert_eq!(counter.state(), CounterState::Uninitialized);
    assert_eq!(counter.steps(), 0);

    counter.on_reading(640.0);
    assert_eq!(counter.steps(), 0);
    counter.on_reading(655.0);
    assert_eq!(counter.steps(), 15);
}

#[test]
fn session_pumps_and_persists_on_stop() {
    let mut store = MemoryStore::new();
    let counter = StepDeltaCounter::new(&mut store).unwrap();
    let mut session = StepSession::new(counter, ReplaySensor::new([1000.0, 1010.0, 1042.0]));

    assert_eq!(session.start_listening().unwrap(), SensorStatus::Listening);
    assert_eq!(session.pump(), 3);
    assert_eq!(session.steps(), 42);

    session.stop_listening().unwrap();
    assert!(!session.sensor().is_subscribed());
    drop(session);

    assert_eq!(store.get(BASELINE_KEY), Some(1000.0));
}

#[test]
fn session_reset_restarts_subscription() {
    let counter = StepDeltaCounter::new(MemoryStore::new()).unwrap();
    let mut session = StepSession::new(counter, ReplaySensor::new([10.0, 60.0]));
    session.start_listening().unwrap();
    session.pump();
    assert_eq!(session.steps(), 50);

    session.reset().unwrap();
    assert_eq!(session.steps(), 0);
    assert_eq!(session.sensor().subscribe_count(), 2);
    assert!(session.sensor().is_subscribed());
    assert_eq!(session.counter().store().get(BASELINE_KEY), None);

    // Next reading re-establishes the baseline
    session.sensor_mut().push(60.0);
    session.sensor_mut().push(75.0);
    session.pump();
    assert_eq!(session.steps(), 15);
    assert_eq!(session.counter().baseline(), Some(60.0));
}

#[test]
fn session_reset_while_stopped_stays_stopped() {
    let counter = StepDeltaCounter::new(MemoryStore::with_value(BASELINE_KEY, 500.0)).unwrap();
    let mut session = StepSession::new(counter, ReplaySensor::new([900.0]));

    session.reset().unwrap();
    assert!(!session.sensor().is_subscribed());
    assert_eq!(session.sensor().subscribe_count(), 0);
    assert_eq!(session.pump(), 0);
    assert_eq!(session.counter().store().get(BASELINE_KEY), None);

    // Starting afterwards treats the first reading as the new baseline
    session.start_listening().unwrap();
    session.pump();
    assert_eq!(session.steps(), 0);
    assert_eq!(session.counter().baseline(), Some(900.0));
}

#[test]
fn session_reset_uses_synchronous_query_when_available() {
    let counter = StepDeltaCounter::new(MemoryStore::new()).unwrap();
    let sensor = ReplaySensor::new([10.0, 60.0]).queryable();
    let mut session = StepSession::new(counter, sensor);
    session.start_listening().unwrap();
    session.pump();

    session.reset().unwrap();
    assert_eq!(session.steps(), 0);
    assert_eq!(session.sensor().subscribe_count(), 1);
    assert_eq!(session.counter().store().get(BASELINE_KEY), Some(60.0));

    session.sensor_mut().push(61.0);
    session.pump();
    assert_eq!(session.steps(), 1);
}

#[test]
fn missing_sensor_degrades_and_reports_once() {
    let counter = StepDeltaCounter::new(MemoryStore::with_value(BASELINE_KEY, 10.0)).unwrap();
    let mut session = StepSession::new(counter, ReplaySensor::unavailable());

    assert!(session.is_degraded());
    assert_eq!(session.start_listening().unwrap(), SensorStatus::Unavailable);
    assert_eq!(session.start_listening().unwrap(), SensorStatus::Degraded);
    assert_eq!(session.pump(), 0);
    assert_eq!(session.steps(), 0);

    session.reset().unwrap();
    session.stop_listening().unwrap();
    assert_eq!(session.counter().store().get(BASELINE_KEY), Some(10.0));
}
