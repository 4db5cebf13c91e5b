use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::settings::Preset;

#[derive(Parser, Debug)]
#[command(author, version, about = "tournament rating engine")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Rate a tournament described in a JSON file and print the new ratings
    Rate {
        /// Path to the tournament JSON file
        file: PathBuf,
        /// Algorithm revision to rate with
        #[arg(short, long, value_enum, default_value_t = Preset::Legacy)]
        preset: Preset,
        /// Do not award bonuses, whatever the file says
        #[arg(long)]
        no_bonuses: bool,
    },
}
