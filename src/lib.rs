pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod scoring;
pub mod services;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::path::Path;

use crate::cli::Command;
use crate::config::AppConfig;
use crate::domain::CampId;
use crate::services::ScoringService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn service() -> Result<ScoringService> {
    let config = AppConfig::from_env()?;
    Ok(ScoringService::new(config))
}

pub fn handle_normalize(results: &Path) -> Result<()> {
    let output = service()?.normalize(results)?;
    println!("{output}");
    Ok(())
}

pub fn handle_score(event: &Path, results: &Path, clubs: Option<&Path>, json: bool) -> Result<()> {
    let output = service()?.score(event, results, clubs, json)?;
    print!("{output}");
    Ok(())
}

pub fn handle_leaderboard(
    camp_id: CampId,
    events: &Path,
    results: &Path,
    clubs: Option<&Path>,
    json: bool,
) -> Result<()> {
    let output = service()?.leaderboard(camp_id, events, results, clubs, json)?;
    print!("{output}");
    Ok(())
}

pub fn handle_detail(event: &Path, result: &Path) -> Result<()> {
    let output = service()?.detail(event, result)?;
    print!("{output}");
    Ok(())
}
