use clap::Subcommand;

use crate::data::Unit;

#[derive(Debug, Subcommand)]
pub enum SupplementCommands {
    Add {
        name: String,

        #[arg(short, long)]
        capacity: u32,

        #[arg(short, long, value_enum)]
        unit: Unit,

        /// Expiry date (YYYY-MM-DD)
        #[arg(short, long)]
        expires: String,

        #[arg(short, long)]
        picture: Option<String>,
    },

    #[command(alias = "ls")]
    List {
        #[arg(short, long)]
        name: Option<String>,

        /// Only show expired or soon expiring items
        #[arg(long)]
        expiring: bool,
    },

    #[command(alias = "rm")]
    Remove { id: i64 },
}
