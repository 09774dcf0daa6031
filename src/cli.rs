use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about = "golf club handicap tracker")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the backend server
    Serve {
        /// Port number (optional, defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Recreate the database with the default game types and grades
    Setup,
    /// Print active players grouped by grade
    Grades,
}
