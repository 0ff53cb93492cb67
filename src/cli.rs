use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "complaint-desk")]
#[command(about = "Submit complaints and browse previously submitted ones")]
#[command(version)]
pub struct Cli {
    /// Base URL of the complaint service (overrides COMPLAINT_DESK_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List submitted complaints
    List {
        /// Maximum number of complaints to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Submit a new complaint
    Submit {
        /// Complaint title
        #[arg(short, long)]
        title: String,

        /// Complaint body
        #[arg(short, long)]
        body: String,
    },

    /// Launch the terminal UI (default)
    Tui,
}

impl Cli {
    /// Whether this invocation draws the terminal UI
    pub fn is_tui(&self) -> bool {
        matches!(self.command, None | Some(Commands::Tui))
    }
}
