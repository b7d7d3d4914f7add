use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub enum RouteCommands {
    /// Record a GPS fix taken now
    Add {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,

        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// Horizontal accuracy radius in metres
        #[arg(short, long)]
        accuracy: Option<f32>,
    },

    /// Show recorded fixes, newest first
    #[command(alias = "ls")]
    List {
        #[arg(short = 'n', long)]
        limit: Option<u32>,

        #[arg(long)]
        json: bool,
    },
}
