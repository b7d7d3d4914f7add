use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum StepsCommands {
    /// Feed lifetime counts (from --value or stdin) and record today's steps
    Feed {
        #[arg(short, long = "value")]
        values: Vec<f32>,

        #[arg(long)]
        json: bool,
    },

    Show,

    Reset {
        #[arg(short = 'y', long)]
        yes: bool,
    },

    History {
        #[arg(short, long)]
        days: Option<u32>,

        #[arg(long)]
        json: bool,
    },
}
