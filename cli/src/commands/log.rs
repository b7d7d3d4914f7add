use color_eyre::eyre::{Result, WrapErr};
use stride_energy::{Activity, Meal};
use tracing::debug;

use crate::cli::{ActivityCommands, MealCommands};
use crate::commands::parse_date;
use crate::config::UserConfig;
use crate::data::Store;

pub fn run_meal(command: MealCommands) -> Result<()> {
    let MealCommands::Add {
        name,
        grams,
        kcal_per_100g,
        date,
    } = command;

    let date = parse_date(date.as_deref())?;
    let meal = Meal::new(name, grams, kcal_per_100g).wrap_err("Invalid meal")?;

    let store = Store::open().wrap_err("Failed to open stride database")?;
    let id = store.insert_meal(date, &meal)?;
    debug!(id, %date, kcal = meal.total_kcal(), "Logged meal");

    println!(
        "Logged {} ({:.0} g): {:.0} kcal on {}",
        meal.name(),
        meal.weight_grams(),
        meal.total_kcal(),
        date
    );
    Ok(())
}

pub fn run_activity(command: ActivityCommands, config: &UserConfig) -> Result<()> {
    let ActivityCommands::Add {
        name,
        met,
        minutes,
        weight_kg,
        date,
    } = command;

    let date = parse_date(date.as_deref())?;
    let weight_kg = weight_kg.unwrap_or(config.body_weight_kg);
    let activity = Activity::new(name, met, minutes, weight_kg).wrap_err("Invalid activity")?;

    let store = Store::open().wrap_err("Failed to open stride database")?;
    let id = store.insert_activity(date, &activity)?;
    debug!(id, %date, kcal = activity.kcal_burned(), "Logged activity");

    println!(
        "Logged {} ({:.0} min): {:.0} kcal burned on {}",
        activity.name(),
        activity.duration_minutes(),
        activity.kcal_burned(),
        date
    );
    Ok(())
}
