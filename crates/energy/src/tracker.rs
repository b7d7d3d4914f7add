use serde::Serialize;

use crate::{Activity, Meal};

/// Direction of the net calorie balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Balance {
    Surplus,
    Deficit,
    Even,
}

impl Balance {
    pub fn from_net(net_kcal: f32) -> Self {
        if net_kcal > 0.0 {
            Balance::Surplus
        } else if net_kcal < 0.0 {
            Balance::Deficit
        } else {
            Balance::Even
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Balance::Surplus => "Surplus",
            Balance::Deficit => "Deficit",
            Balance::Even => "Even",
        }
    }
}

/// Snapshot of a tracker's aggregates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergySummary {
    pub consumed_kcal: f32,
    pub expended_kcal: f32,
    pub net_kcal: f32,
    pub balance: Balance,
    pub meal_count: usize,
    pub activity_count: usize,
}

/// Tracks calorie intake from meals and expenditure from activities.
///
/// Records are append-only and kept in insertion order. Totals are
/// recomputed on every read.
#[derive(Debug, Clone, Default)]
pub struct EnergyBalanceTracker {
    meals: Vec<Meal>,
    activities: Vec<Activity>,
}

impl EnergyBalanceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a tracker from previously recorded meals and activities.
    pub fn from_records(
        meals: impl IntoIterator<Item = Meal>,
        activities: impl IntoIterator<Item = Activity>,
    ) -> Self {
        Self {
            meals: meals.into_iter().collect(),
            activities: activities.into_iter().collect(),
        }
    }

    pub fn add_consumed(&mut self, meal: Meal) {
        self.meals.push(meal);
    }

    pub fn add_expended(&mut self, activity: Activity) {
        self.activities.push(activity);
    }

    pub fn meals(&self) -> &[Meal] {
        &self.meals
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn is_empty(&self) -> bool {
        self.meals.is_empty() && self.activities.is_empty()
    }

    /// Sum of calories from all recorded meals.
    pub fn total_consumed(&self) -> f32 {
        self.meals
            .iter()
            .map(|m| m.total_kcal() as f64)
            .sum::<f64>() as f32
    }

    /// Sum of calories burned across all recorded activities.
    pub fn total_expended(&self) -> f32 {
        self.activities
            .iter()
            .map(|a| a.kcal_burned() as f64)
            .sum::<f64>() as f32
    }

    /// Intake minus expenditure. Positive is a surplus, negative a deficit.
    pub fn net_balance(&self) -> f32 {
        self.total_consumed() - self.total_expended()
    }

    pub fn summary(&self) -> EnergySummary {
        let consumed_kcal = self.total_consumed();
        let expended_kcal = self.total_expended();
        let net_kcal = consumed_kcal - expended_kcal;

        EnergySummary {
            consumed_kcal,
            expended_kcal,
            net_kcal,
            balance: Balance::from_net(net_kcal),
            meal_count: self.meals.len(),
            activity_count: self.activities.len(),
        }
    }
}

impl Extend<Meal> for EnergyBalanceTracker {
    fn extend<T: IntoIterator<Item = Meal>>(&mut self, iter: T) {
        self.meals.extend(iter);
    }
}

impl Extend<Activity> for EnergyBalanceTracker {
    fn extend<T: IntoIterator<Item = Activity>>(&mut self, iter: T) {
        self.activities.extend(iter);
    }
}
