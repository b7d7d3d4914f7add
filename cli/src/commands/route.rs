use chrono::Local;
use color_eyre::eyre::{Result, WrapErr};
use tracing::debug;

use crate::cli::RouteCommands;
use crate::data::{self, Location, Store};

pub fn run(command: Option<RouteCommands>) -> Result<()> {
    let store = Store::open().wrap_err("Failed to open stride database")?;

    match command.unwrap_or(RouteCommands::List {
        limit: None,
        json: false,
    }) {
        RouteCommands::Add { lat, lon, accuracy } => {
            let location = Location::new(lat, lon, data::now_timestamp_millis(), accuracy)?;
            let id = store.insert_location(&location)?;
            debug!(id, lat, lon, "Recorded location");
            println!("Recorded {:.5}, {:.5} (#{})", lat, lon, id);
        }
        RouteCommands::List { limit, json } => {
            let locations = store.get_locations(limit)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&locations)?);
            } else {
                print_list(&locations);
            }
        }
    }

    Ok(())
}

fn print_list(locations: &[Location]) {
    if locations.is_empty() {
        println!("No locations recorded.");
        return;
    }

    println!(
        "{:<20} {:>10} {:>11} {:>9}",
        "Recorded", "Latitude", "Longitude", "Accuracy"
    );
    println!("{}", "-".repeat(53));
    for location in locations {
        println!("{}", format_row(location));
    }
}

fn format_row(location: &Location) -> String {
    let when = location
        .recorded_at()
        .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let accuracy = location
        .accuracy
        .map(|a| format!("{:.1} m", a))
        .unwrap_or_else(|| "-".to_string());

    format!(
        "{:<20} {:>10.5} {:>11.5} {:>9}",
        when, location.latitude, location.longitude, accuracy
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_row_columns() {
        let fix = Location::new(-33.86882, 151.20929, 1_767_225_600_000, Some(3.4)).unwrap();
        let row = format_row(&fix);
        assert!(row.ends_with("  -33.86882   151.20929     3.4 m"), "{row}");

        let unknown = Location::new(0.0, 0.0, i64::MAX, None).unwrap();
        assert!(format_row(&unknown).starts_with("-    "));
        assert!(format_row(&unknown).ends_with("        -"));
    }
}
