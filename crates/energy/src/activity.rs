use serde::{Deserialize, Serialize};

use crate::error::{finite, positive, Result};

/// Oxygen uptake per kilogram per minute at rest (ml), i.e. one MET.
const RESTING_O2_ML_PER_KG_MIN: f32 = 3.5;

/// Kilocalories per ml of O2 is about 1/200 once the ml-to-litre and
/// 5 kcal/l factors are folded together.
const KCAL_DIVISOR: f32 = 200.0;

/// A physical activity with the data needed to estimate burned calories.
///
/// `met` is the Metabolic Equivalent of Task, e.g. 8.0 for running,
/// 4.0 for brisk walking, 2.5 for light walking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Activity {
    name: String,
    met: f32,
    duration_minutes: f32,
    weight_kg: f32,
}

impl Activity {
    /// Creates an activity. MET, duration and body mass must all be positive,
    /// and the burned calories they imply must fit in an `f32`.
    pub fn new(
        name: impl Into<String>,
        met: f32,
        duration_minutes: f32,
        weight_kg: f32,
    ) -> Result<Self> {
        let activity = Self {
            name: name.into(),
            met: positive("met", met)?,
            duration_minutes: positive("duration_minutes", duration_minutes)?,
            weight_kg: positive("weight_kg", weight_kg)?,
        };
        finite("kcal_burned", activity.kcal_burned())?;
        Ok(activity)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn met(&self) -> f32 {
        self.met
    }

    pub fn duration_minutes(&self) -> f32 {
        self.duration_minutes
    }

    pub fn weight_kg(&self) -> f32 {
        self.weight_kg
    }

    /// Estimated energy burned: `(met * 3.5 * weight_kg / 200) * duration_minutes`.
    pub fn kcal_burned(&self) -> f32 {
        (self.met * RESTING_O2_ML_PER_KG_MIN * self.weight_kg / KCAL_DIVISOR)
            * self.duration_minutes
    }
}

#[derive(Deserialize)]
struct RawActivity {
    name: String,
    met: f32,
    duration_minutes: f32,
    weight_kg: f32,
}

impl<'de> Deserialize<'de> for Activity {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawActivity::deserialize(deserializer)?;
        Activity::new(raw.name, raw.met, raw.duration_minutes, raw.weight_kg)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EnergyError;

    #[test]
    fn test_kcal_burned() {
        // 8 MET * 3.5 * 70 / 200 = 9.8 kcal/min
        let run = Activity::new("Running", 8.0, 30.0, 70.0).unwrap();
        assert!((run.kcal_burned() - 294.0).abs() < 1e-2);

        let walk = Activity::new("Light walking", 2.5, 60.0, 80.0).unwrap();
        assert!((walk.kcal_burned() - 210.0).abs() < 1e-2);
    }

    #[test]
    fn test_rejects_non_positive() {
        assert_eq!(
            Activity::new("Idle", 0.0, 30.0, 70.0),
            Err(EnergyError::NotPositive {
                field: "met",
                value: 0.0
            })
        );
        assert!(Activity::new("Run", 8.0, -1.0, 70.0).is_err());
        assert!(Activity::new("Run", 8.0, 30.0, 0.0).is_err());
        assert!(Activity::new("Run", f32::INFINITY, 30.0, 70.0).is_err());
    }

    #[test]
    fn test_rejects_overflowing_kcal() {
        assert_eq!(
            Activity::new("Endless", 1e20, 1e20, 1e20),
            Err(EnergyError::NotFinite {
                field: "kcal_burned",
                value: f32::INFINITY
            })
        );

        let json = r#"{"name":"Endless","met":1e20,"duration_minutes":1e20,"weight_kg":1e20}"#;
        assert!(serde_json::from_str::<Activity>(json).is_err());
    }
}
