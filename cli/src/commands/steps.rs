use std::io::{self, IsTerminal, Read};

use color_eyre::eyre::{bail, Result, WrapErr};
use stride_steps::{ReplaySensor, SensorStatus, StepDeltaCounter};

use crate::cli::StepsCommands;
use crate::config::UserConfig;
use crate::data::{self, StepRecorder, Store};

pub fn run(command: Option<StepsCommands>, config: &UserConfig) -> Result<()> {
    let mut store = Store::open().wrap_err("Failed to open stride database")?;

    match command.unwrap_or(StepsCommands::Show) {
        StepsCommands::Feed { values, json } => feed(&mut store, values, json),
        StepsCommands::Show => show(&mut store, config),
        StepsCommands::Reset { yes } => reset(&mut store, yes),
        StepsCommands::History { days, json } => {
            history(&store, days.unwrap_or(config.steps.history_days), json)
        }
    }
}

fn feed(store: &mut Store, values: Vec<f32>, json: bool) -> Result<()> {
    let readings = if values.is_empty() {
        let stdin = io::stdin();
        if stdin.is_terminal() {
            eprintln!("Enter lifetime step counts separated by whitespace, then Ctrl-D:");
        }
        let mut input = String::new();
        stdin
            .lock()
            .read_to_string(&mut input)
            .wrap_err("Failed to read readings from stdin")?;
        parse_readings(&input)?
    } else {
        values
    };

    let report =
        StepRecorder::new(store).record_session(ReplaySensor::new(readings), data::today())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report.status {
        SensorStatus::Unavailable | SensorStatus::Degraded => {
            println!("Step counter sensor is not available on this device.");
        }
        SensorStatus::Listening => {
            println!("Readings:  {}", report.readings);
            println!("Steps:     {}", report.steps);
            if let Some(baseline) = report.baseline {
                println!("Baseline:  {:.0}", baseline);
            }
        }
    }

    Ok(())
}

fn parse_readings(input: &str) -> Result<Vec<f32>> {
    input
        .split_whitespace()
        .map(|token| {
            token
                .parse::<f32>()
                .wrap_err_with(|| format!("Invalid step reading '{}'", token))
        })
        .collect()
}

fn show(store: &mut Store, config: &UserConfig) -> Result<()> {
    let counter = StepDeltaCounter::new(&mut *store)?;
    let state = counter.state();
    let baseline = counter.baseline();
    drop(counter);

    println!("Step Counter");
    println!("{}", "=".repeat(40));
    println!("State:       {}", state.label());
    match baseline {
        Some(b) => println!("Baseline:    {:.0}", b),
        None => println!("Baseline:    (none)"),
    }

    let today = data::today();
    match store.get_daily_steps_for(today)? {
        Some(entry) => {
            let goal = config.steps.daily_goal.max(1);
            let percent = entry.steps as f32 / goal as f32 * 100.0;
            println!(
                "Today:       {} / {} ({:.0}%)",
                entry.steps, config.steps.daily_goal, percent
            );
        }
        None => println!("Today:       no steps recorded"),
    }

    Ok(())
}

fn reset(store: &mut Store, yes: bool) -> Result<()> {
    if !yes {
        print!("Reset the step counter? Today's recorded steps are kept. [y/N] ");
        io::Write::flush(&mut io::stdout())?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Cancelled.");
            return Ok(());
        }
    }

    StepRecorder::new(store).reset()?;
    println!("Step counter reset. The next reading starts from 0.");
    Ok(())
}

fn history(store: &Store, days: u32, json: bool) -> Result<()> {
    if days == 0 {
        bail!("--days must be at least 1");
    }
    let Some(from) = data::days_ago(days - 1) else {
        bail!("--days {} reaches past the earliest supported date", days);
    };
    let to = data::today();
    let entries = store.get_daily_steps(from, to)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("Steps ({} to {})", from, to);
    println!("{}", "=".repeat(30));

    if entries.is_empty() {
        println!("No steps recorded for this period.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}  {:>8}", entry.date, entry.steps);
    }

    let total: u64 = entries.iter().map(|e| e.steps as u64).sum();
    println!("{}", "-".repeat(30));
    println!("Total       {:>8}", total);
    println!("Daily avg   {:>8}", total / entries.len() as u64);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_readings() {
        assert_eq!(
            parse_readings("1000 1050.5\n1100\n").unwrap(),
            vec![1000.0, 1050.5, 1100.0]
        );
        assert!(parse_readings("").unwrap().is_empty());
        assert!(parse_readings("1000 lots").is_err());
    }

    #[test]
    fn test_history_rejects_unrepresentable_range() {
        let store = Store::open_in_memory().unwrap();
        assert!(history(&store, 0, false).is_err());
        assert!(history(&store, 4_000_000_000, false).is_err());
        assert!(history(&store, 7, false).is_ok());
    }
}
