mod route;
mod steps;
mod supplements;

pub use route::RouteCommands;
pub use steps::StepsCommands;
pub use supplements::SupplementCommands;

use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Count steps from lifetime sensor readings
    Steps {
        #[command(subcommand)]
        command: Option<StepsCommands>,
    },

    /// Log a meal
    Meal {
        #[command(subcommand)]
        command: MealCommands,
    },

    /// Log a physical activity
    #[command(alias = "act")]
    Activity {
        #[command(subcommand)]
        command: ActivityCommands,
    },

    /// Show calories eaten, burned and the net balance for a day
    #[command(alias = "bal")]
    Balance {
        /// Day to show (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,

        #[arg(long)]
        json: bool,
    },

    #[command(alias = "supp")]
    Supplements {
        #[command(subcommand)]
        command: Option<SupplementCommands>,
    },

    /// Record and list GPS location history
    Route {
        #[command(subcommand)]
        command: Option<RouteCommands>,
    },

    /// Show or change the configuration
    Config {
        #[arg(long)]
        path: bool,

        #[arg(long)]
        reset: bool,

        #[arg(short, long)]
        edit: bool,

        /// Change one setting, e.g. `steps.daily_goal=8000`
        #[arg(long, value_name = "KEY=VALUE")]
        set: Option<String>,
    },

    /// Show the log written by `stride steps feed`
    Logs {
        #[arg(short, long, default_value_t = 50)]
        lines: usize,

        #[arg(short, long)]
        follow: bool,

        /// List the kept daily log files
        #[arg(long)]
        list: bool,

        /// Day to show (YYYY-MM-DD), defaults to the newest file
        #[arg(short, long)]
        date: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum MealCommands {
    Add {
        name: String,

        #[arg(short, long)]
        grams: f32,

        #[arg(short, long = "kcal-per-100g")]
        kcal_per_100g: f32,

        #[arg(short, long)]
        date: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ActivityCommands {
    Add {
        name: String,

        /// Intensity, e.g. 8 for running, 4 for brisk walking
        #[arg(long)]
        met: f32,

        #[arg(short, long)]
        minutes: f32,

        /// Defaults to body_weight_kg from the config
        #[arg(short, long)]
        weight_kg: Option<f32>,

        #[arg(short, long)]
        date: Option<String>,
    },
}

#[derive(Debug, Parser)]
#[command(name = "stride", version, verbatim_doc_comment)]
/// Track steps, calories and supplements.
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(long, global = true)]
    pub log_level: Option<String>,
}
