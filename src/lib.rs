pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod rating;
pub mod services;
pub mod util;

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::settings::{AppConfig, Preset};
use crate::services::rating::RatingService;

pub use errors::RatingError;
pub use rating::{Player, PlayerAttrs, PlayerType, RatedResult, RatingMode, Tournament};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_rate(file: &Path, preset: Preset, no_bonuses: bool) -> Result<()> {
    let config = AppConfig::with_preset(preset);
    let service = RatingService::new(config);
    let report = service.run(file, no_bonuses)?;
    println!("{report}");
    Ok(())
}
