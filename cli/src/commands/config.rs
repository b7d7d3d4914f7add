use std::path::Path;

use color_eyre::eyre::{bail, eyre, Result, WrapErr};

use crate::config::{config_path, UserConfig};
use crate::data::Store;

pub fn run(path: bool, reset: bool, edit: bool, set: Option<String>) -> Result<()> {
    let config_file = config_path();

    if path {
        println!("{}", config_file.display());
        return Ok(());
    }

    if reset {
        UserConfig::default().save()?;
        println!("Config reset to defaults at: {}", config_file.display());
        return Ok(());
    }

    if let Some(assignment) = set {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| eyre!("Expected KEY=VALUE, got '{}'", assignment))?;
        let (key, value) = (key.trim(), value.trim());

        let updated = apply_setting(&UserConfig::load(), key, value)?;
        updated.save()?;
        println!("{} = {}", key, value);
        return Ok(());
    }

    if edit {
        let editor = std::env::var("EDITOR").unwrap_or_else(|_| "nano".to_string());

        if !config_file.exists() {
            UserConfig::default().save()?;
        }

        std::process::Command::new(editor)
            .arg(&config_file)
            .status()?;

        return Ok(());
    }

    show(&UserConfig::load(), &config_file)
}

fn show(config: &UserConfig, config_file: &Path) -> Result<()> {
    println!("Config file: {}", config_file.display());
    println!();
    println!("{}", toml::to_string_pretty(config)?);

    match Store::open() {
        Ok(store) => {
            let stats = store.get_stats()?;
            println!("Database: {} ({})", store.path().display(), stats.size_formatted());
            println!(
                "  {} step days, {} meals, {} activities, {} supplements, {} locations",
                stats.daily_steps_count,
                stats.meal_count,
                stats.activity_count,
                stats.supplement_count,
                stats.location_count
            );
        }
        Err(e) => eprintln!("Failed to open database: {}", e),
    }

    Ok(())
}

/// Returns `config` with one key replaced. Nested keys use dots, as in
/// `steps.daily_goal`.
pub fn apply_setting(config: &UserConfig, key: &str, raw: &str) -> Result<UserConfig> {
    let mut doc = toml::Value::try_from(config)?;

    let mut slot = &mut doc;
    for part in key.split('.') {
        slot = slot
            .get_mut(part)
            .ok_or_else(|| eyre!("Unknown config key '{}'", key))?;
    }
    if slot.is_table() {
        bail!("'{}' is a section; set one of its keys instead", key);
    }
    *slot = parse_value(raw);

    doc.try_into::<UserConfig>()
        .wrap_err_with(|| format!("Invalid value '{}' for {}", raw, key))
}

/// Parses `raw` as a TOML value, treating anything unparsable as a bare string.
fn parse_value(raw: &str) -> toml::Value {
    toml::from_str::<toml::Table>(&format!("value = {}", raw))
        .ok()
        .and_then(|mut table| table.remove("value"))
        .unwrap_or_else(|| toml::Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn test_apply_setting_top_level_and_nested() {
        let config = UserConfig::default();

        let updated = apply_setting(&config, "body_weight_kg", "82.5").unwrap();
        assert_eq!(updated.body_weight_kg, 82.5);

        let updated = apply_setting(&updated, "steps.daily_goal", "8000").unwrap();
        assert_eq!(updated.steps.daily_goal, 8000);
        assert_eq!(updated.body_weight_kg, 82.5);

        let updated = apply_setting(&updated, "log_level", "debug").unwrap();
        assert_eq!(updated.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_apply_setting_integer_for_float_field() {
        let updated = apply_setting(&UserConfig::default(), "body_weight_kg", "90").unwrap();
        assert_eq!(updated.body_weight_kg, 90.0);
    }

    #[test]
    fn test_apply_setting_rejects_bad_input() {
        let config = UserConfig::default();
        assert!(apply_setting(&config, "body_weight", "80").is_err());
        assert!(apply_setting(&config, "steps.goal", "80").is_err());
        assert!(apply_setting(&config, "steps", "80").is_err());
        assert!(apply_setting(&config, "daily_kcal_goal", "lots").is_err());
        assert!(apply_setting(&config, "log_level", "loud").is_err());
    }
}
