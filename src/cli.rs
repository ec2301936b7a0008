// cli.rs
use clap::{Parser, Subcommand};

/// Student accommodation map around the campus.
#[derive(Debug, Parser)]
#[command(name = "accommodation_map", version, about)]
pub struct Cli {
    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the interactive map with its filter controls.
    Serve {
        /// Address to bind, overrides ACCOM_ADDR.
        #[arg(long)]
        addr: Option<String>,
    },

    /// Render the map once for the given selection and exit.
    Render {
        /// Location to include. Repeat for several.
        #[arg(long = "location")]
        locations: Vec<String>,

        /// Room type to include. Repeat for several.
        #[arg(long = "room")]
        rooms: Vec<String>,
    },
}
