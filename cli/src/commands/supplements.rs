use color_eyre::eyre::{bail, Result, WrapErr};
use tracing::debug;

use crate::cli::SupplementCommands;
use crate::commands::{parse_date, truncate_str};
use crate::config::UserConfig;
use crate::data::{self, ExpiryStatus, Store, Supplement};

pub fn run(command: Option<SupplementCommands>, config: &UserConfig) -> Result<()> {
    let cmd = command.unwrap_or(SupplementCommands::List {
        name: None,
        expiring: false,
    });

    let store = Store::open().wrap_err("Failed to open stride database")?;

    match cmd {
        SupplementCommands::Add {
            name,
            capacity,
            unit,
            expires,
            picture,
        } => {
            if name.trim().is_empty() {
                bail!("Supplement name cannot be empty");
            }
            if capacity == 0 {
                bail!("Capacity must be positive");
            }

            let supplement = Supplement {
                id: None,
                name: name.trim().to_string(),
                capacity,
                unit,
                picture,
                expires_on: parse_date(Some(&expires))?,
            };
            let id = store.insert_supplement(&supplement)?;
            debug!(id, name = %supplement.name, "Added supplement");
            println!("Added {} (#{})", supplement.name, id);
        }
        SupplementCommands::List { name, expiring } => {
            let supplements = match name {
                Some(n) => store.get_supplements_by_name(&n)?,
                None => store.get_supplements()?,
            };
            print_list(&supplements, expiring, config.supplement_reminder_days);
        }
        SupplementCommands::Remove { id } => match store.get_supplement(id)? {
            Some(supplement) => {
                store.delete_supplement(id)?;
                println!("Removed {} (#{})", supplement.name, id);
            }
            None => bail!("No supplement with id {}", id),
        },
    }

    Ok(())
}

fn print_list(supplements: &[Supplement], expiring_only: bool, reminder_days: u32) {
    let today = data::today();

    let rows: Vec<_> = supplements
        .iter()
        .map(|s| (s, s.expiry_status(today, reminder_days)))
        .filter(|(_, status)| !expiring_only || *status != ExpiryStatus::Fresh)
        .collect();

    if rows.is_empty() {
        println!("No supplements.");
        return;
    }

    println!(
        "{:<5} {:<26} {:>10} {:<12} {}",
        "ID", "Name", "Amount", "Expires", ""
    );
    println!("{}", "-".repeat(64));
    for (supplement, status) in rows {
        println!(
            "{:<5} {:<26} {:>7} {:<2} {:<12} {}",
            supplement.id.unwrap_or_default(),
            truncate_str(&supplement.name, 26),
            supplement.capacity,
            supplement.unit.symbol(),
            supplement.expires_on.to_string(),
            status.label()
        );
    }
}
