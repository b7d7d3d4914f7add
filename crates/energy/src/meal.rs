use serde::{Deserialize, Serialize};

use crate::error::{non_negative, EnergyError, Result};

/// A logged meal with its nutritional information.
///
/// Fields are private so a `Meal` can only exist with a non-negative
/// derived energy value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meal {
    name: String,
    weight_grams: f32,
    kcal_per_100g: f32,
}

impl Meal {
    /// Creates a meal.
    ///
    /// Rejects a negative or non-finite weight or density, and any input whose
    /// derived calories would be negative or non-finite.
    pub fn new(name: impl Into<String>, weight_grams: f32, kcal_per_100g: f32) -> Result<Self> {
        let weight_grams = non_negative("weight_grams", weight_grams)?;
        let kcal_per_100g = non_negative("kcal_per_100g", kcal_per_100g)?;

        let calories = (weight_grams / 100.0) * kcal_per_100g;
        if !calories.is_finite() {
            return Err(EnergyError::NotFinite {
                field: "total_kcal",
                value: calories,
            });
        }
        if calories < 0.0 {
            return Err(EnergyError::NegativeCalories(calories));
        }

        Ok(Self {
            name: name.into(),
            weight_grams,
            kcal_per_100g,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn weight_grams(&self) -> f32 {
        self.weight_grams
    }

    pub fn kcal_per_100g(&self) -> f32 {
        self.kcal_per_100g
    }

    /// Total energy of the meal: `weight_grams / 100 * kcal_per_100g`.
    pub fn total_kcal(&self) -> f32 {
        (self.weight_grams / 100.0) * self.kcal_per_100g
    }
}

#[derive(Deserialize)]
struct RawMeal {
    name: String,
    weight_grams: f32,
    kcal_per_100g: f32,
}

impl<'de> Deserialize<'de> for Meal {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawMeal::deserialize(deserializer)?;
        Meal::new(raw.name, raw.weight_grams, raw.kcal_per_100g).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_kcal() {
        let meal = Meal::new("Chicken Salad", 350.0, 120.0).unwrap();
        assert!((meal.total_kcal() - 420.0).abs() < 1e-3);
    }

    #[test]
    fn test_zero_weight_is_zero_kcal() {
        let meal = Meal::new("Water", 0.0, 0.0).unwrap();
        assert_eq!(meal.total_kcal(), 0.0);

        let meal = Meal::new("Nothing", 0.0, 450.0).unwrap();
        assert_eq!(meal.total_kcal(), 0.0);
    }

    #[test]
    fn test_rejects_negative_inputs() {
        assert_eq!(
            Meal::new("Bad", -10.0, 100.0),
            Err(EnergyError::Negative {
                field: "weight_grams",
                value: -10.0
            })
        );
        assert!(matches!(
            Meal::new("Bad", 100.0, -5.0),
            Err(EnergyError::Negative {
                field: "kcal_per_100g",
                ..
            })
        ));
        // Both negative would multiply out positive; still rejected.
        assert!(Meal::new("Bad", -100.0, -50.0).is_err());
    }

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            Meal::new("Bad", f32::NAN, 100.0),
            Err(EnergyError::NotFinite { .. })
        ));
        assert!(matches!(
            Meal::new("Bad", f32::MAX, f32::MAX),
            Err(EnergyError::NotFinite {
                field: "total_kcal",
                ..
            })
        ));
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Meal =
            serde_json::from_str(r#"{"name":"Rice","weight_grams":200.0,"kcal_per_100g":130.0}"#)
                .unwrap();
        assert!((ok.total_kcal() - 260.0).abs() < 1e-3);

        let bad = serde_json::from_str::<Meal>(
            r#"{"name":"Rice","weight_grams":-200.0,"kcal_per_100g":130.0}"#,
        );
        assert!(bad.is_err());
    }
}
