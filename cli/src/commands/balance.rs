use color_eyre::eyre::{Result, WrapErr};
use serde_json::json;
use stride_energy::{Balance, EnergyBalanceTracker};

use crate::commands::{parse_date, truncate_str};
use crate::config::UserConfig;
use crate::data::Store;

pub fn run(date: Option<String>, json: bool, config: &UserConfig) -> Result<()> {
    let date = parse_date(date.as_deref())?;
    let store = Store::open().wrap_err("Failed to open stride database")?;
    let tracker = store.tracker_for_date(date)?;

    if json {
        let doc = json!({
            "date": date,
            "meals": tracker.meals(),
            "activities": tracker.activities(),
            "summary": tracker.summary(),
            "goal_kcal": config.daily_kcal_goal,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    print!("{}", render(&tracker, &date.to_string(), config.daily_kcal_goal));
    Ok(())
}

fn render(tracker: &EnergyBalanceTracker, date: &str, goal_kcal: u32) -> String {
    let mut out = String::new();
    out.push_str(&format!("Energy Balance ({})\n", date));
    out.push_str(&format!("{}\n", "=".repeat(50)));

    if tracker.is_empty() {
        out.push_str("Nothing logged for this day.\n");
        return out;
    }

    if !tracker.meals().is_empty() {
        out.push_str("Meals\n");
        for meal in tracker.meals() {
            out.push_str(&format!(
                "  {:<28} {:>7.0} g {:>8.0} kcal\n",
                truncate_str(meal.name(), 28),
                meal.weight_grams(),
                meal.total_kcal()
            ));
        }
    }

    if !tracker.activities().is_empty() {
        out.push_str("Activities\n");
        for activity in tracker.activities() {
            out.push_str(&format!(
                "  {:<28} {:>5.0} min {:>8.0} kcal\n",
                truncate_str(activity.name(), 28),
                activity.duration_minutes(),
                activity.kcal_burned()
            ));
        }
    }

    let summary = tracker.summary();
    out.push_str(&format!("{}\n", "-".repeat(50)));
    out.push_str(&format!("Eaten:     {:>8.0} kcal\n", summary.consumed_kcal));
    out.push_str(&format!("Burned:    {:>8.0} kcal\n", summary.expended_kcal));
    out.push_str(&format!(
        "Net:       {:>+8.0} kcal ({})\n",
        summary.net_kcal,
        summary.balance.label()
    ));

    if goal_kcal > 0 {
        let remaining = goal_kcal as f32 - summary.net_kcal;
        if summary.balance == Balance::Surplus && remaining < 0.0 {
            out.push_str(&format!("Goal:      {:>8.0} kcal over\n", -remaining));
        } else {
            out.push_str(&format!("Goal:      {:>8.0} kcal left\n", remaining));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stride_energy::{Activity, Meal};

    #[test]
    fn test_render_totals() {
        let tracker = EnergyBalanceTracker::from_records(
            [Meal::new("Pasta", 250.0, 100.0).unwrap()],
            [Activity::new("Walk", 4.0, 25.0, 80.0).unwrap()],
        );
        let out = render(&tracker, "2026-05-01", 2000);

        assert!(out.contains("Eaten:          250 kcal"));
        assert!(out.contains("Burned:         140 kcal"));
        assert!(out.contains("Net:           +110 kcal (Surplus)"));
        assert!(out.contains("Goal:          1890 kcal left"));
    }

    #[test]
    fn test_render_empty() {
        let out = render(&EnergyBalanceTracker::new(), "2026-05-01", 2000);
        assert!(out.contains("Nothing logged"));
    }
}
