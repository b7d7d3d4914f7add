use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use stride_energy::{Activity, Meal};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Step count snapshot for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySteps {
    pub date: NaiveDate,
    pub steps: u32,
    pub recorded_at: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoggedMeal {
    pub id: i64,
    pub date: NaiveDate,
    pub meal: Meal,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoggedActivity {
    pub id: i64,
    pub date: NaiveDate,
    pub activity: Activity,
}

/// Unit a supplement's capacity is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[value(alias = "cl")]
    Centilitre,
    #[value(alias = "ml")]
    Millilitre,
    #[value(alias = "l")]
    Litre,
    #[value(alias = "g")]
    Gram,
    #[value(alias = "kg")]
    Kilogram,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Centilitre => "centilitre",
            Unit::Millilitre => "millilitre",
            Unit::Litre => "litre",
            Unit::Gram => "gram",
            Unit::Kilogram => "kilogram",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Centilitre => "cl",
            Unit::Millilitre => "ml",
            Unit::Litre => "l",
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown unit: {0}")]
pub struct UnknownUnit(pub String);

impl FromStr for Unit {
    type Err = UnknownUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "centilitre" | "cl" => Ok(Unit::Centilitre),
            "millilitre" | "milliliter" | "ml" => Ok(Unit::Millilitre),
            "litre" | "liter" | "l" => Ok(Unit::Litre),
            "gram" | "g" => Ok(Unit::Gram),
            "kilogram" | "kg" => Ok(Unit::Kilogram),
            _ => Err(UnknownUnit(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    Expired,
    ExpiringSoon,
    Fresh,
}

impl ExpiryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "EXPIRED",
            ExpiryStatus::ExpiringSoon => "expiring soon",
            ExpiryStatus::Fresh => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplement {
    pub id: Option<i64>,
    pub name: String,
    pub capacity: u32,
    pub unit: Unit,
    /// Path or URL of a picture of the package.
    pub picture: Option<String>,
    pub expires_on: NaiveDate,
}

impl Supplement {
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.expires_on - today).num_days()
    }

    /// An item expiring today counts as expiring soon, not expired.
    pub fn expiry_status(&self, today: NaiveDate, reminder_days: u32) -> ExpiryStatus {
        let days = self.days_until_expiry(today);
        if days < 0 {
            ExpiryStatus::Expired
        } else if days <= reminder_days as i64 {
            ExpiryStatus::ExpiringSoon
        } else {
            ExpiryStatus::Fresh
        }
    }
}

/// One GPS fix. `timestamp` is milliseconds since the Unix epoch and
/// `accuracy` the horizontal accuracy radius in metres, when known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: Option<i64>,
    pub latitude: f64,
    pub longitude: f64,
    pub timestamp: i64,
    pub accuracy: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum InvalidLocation {
    #[error("Latitude must be between -90 and 90, got {0}")]
    Latitude(f64),

    #[error("Longitude must be between -180 and 180, got {0}")]
    Longitude(f64),

    #[error("Accuracy must be a non-negative number of metres, got {0}")]
    Accuracy(f32),
}

impl Location {
    pub fn new(
        latitude: f64,
        longitude: f64,
        timestamp: i64,
        accuracy: Option<f32>,
    ) -> Result<Self, InvalidLocation> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(InvalidLocation::Latitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(InvalidLocation::Longitude(longitude));
        }
        if let Some(a) = accuracy {
            if !a.is_finite() || a < 0.0 {
                return Err(InvalidLocation::Accuracy(a));
            }
        }

        Ok(Self {
            id: None,
            latitude,
            longitude,
            timestamp,
            accuracy,
        })
    }

    pub fn recorded_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn vitamin_d(expires_on: &str) -> Supplement {
        Supplement {
            id: None,
            name: "Vitamin D".to_string(),
            capacity: 60,
            unit: Unit::Gram,
            picture: None,
            expires_on: date(expires_on),
        }
    }

    #[test]
    fn test_expiry_status() {
        let today = date("2026-03-10");
        assert_eq!(
            vitamin_d("2026-03-09").expiry_status(today, 14),
            ExpiryStatus::Expired
        );
        assert_eq!(
            vitamin_d("2026-03-10").expiry_status(today, 14),
            ExpiryStatus::ExpiringSoon
        );
        assert_eq!(
            vitamin_d("2026-03-24").expiry_status(today, 14),
            ExpiryStatus::ExpiringSoon
        );
        assert_eq!(
            vitamin_d("2026-03-25").expiry_status(today, 14),
            ExpiryStatus::Fresh
        );
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("ml".parse::<Unit>(), Ok(Unit::Millilitre));
        assert_eq!("Liter".parse::<Unit>(), Ok(Unit::Litre));
        assert_eq!(
            "cup".parse::<Unit>(),
            Err(UnknownUnit("cup".to_string()))
        );
        for unit in [Unit::Centilitre, Unit::Gram, Unit::Kilogram] {
            assert_eq!(unit.as_str().parse::<Unit>(), Ok(unit));
        }
    }

    #[test]
    fn test_location_bounds() {
        let fix = Location::new(52.2297, 21.0122, 1_767_225_600_000, Some(4.5)).unwrap();
        assert_eq!(fix.id, None);
        assert_eq!(
            fix.recorded_at().map(|t| t.date_naive()),
            Some(date("2026-01-01"))
        );

        assert!(Location::new(-90.0, 180.0, 0, None).is_ok());
        assert_eq!(
            Location::new(90.5, 0.0, 0, None),
            Err(InvalidLocation::Latitude(90.5))
        );
        assert_eq!(
            Location::new(0.0, -181.0, 0, None),
            Err(InvalidLocation::Longitude(-181.0))
        );
        assert!(Location::new(f64::NAN, 0.0, 0, None).is_err());
        assert_eq!(
            Location::new(0.0, 0.0, 0, Some(-1.0)),
            Err(InvalidLocation::Accuracy(-1.0))
        );
    }
}
