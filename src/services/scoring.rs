use anyhow::{Context, Result};
use log::{info, warn};
use std::path::Path;

use super::{loader, report};
use crate::config::AppConfig;
use crate::domain::{CampId, Club, Event, NormalizedResult, RankedEntry};
use crate::scoring::{self, build_sheet};

/// Runs the scoring engine over exported backend data
pub struct ScoringService {
    config: AppConfig,
}

impl ScoringService {
    pub fn new(config: AppConfig) -> Self {
        colored::control::set_override(config.report.color);
        Self { config }
    }

    /// Normalized results as pretty JSON
    pub fn normalize(&self, results_path: &Path) -> Result<String> {
        let results = scoring::normalize_all(loader::load_results(results_path)?);
        serde_json::to_string_pretty(&results).context("Failed to serialize normalized results")
    }

    /// Per-event totals and ranking, or the bulk submission payload when `json` is set
    pub fn score(
        &self,
        event_path: &Path,
        results_path: &Path,
        clubs_path: Option<&Path>,
        json: bool,
    ) -> Result<String> {
        let event = loader::load_event(event_path)?;
        let results = scoring::normalize_all(loader::load_results(results_path)?);
        let clubs = match clubs_path {
            Some(path) => loader::load_clubs(path)?,
            None => clubs_from_results(&results),
        };

        info!(
            "Scoring event {} ({}) for {} clubs",
            event.id,
            event.name,
            clubs.len()
        );
        let sheet = build_sheet(&event, &clubs, &results, &self.config);
        let violations = sheet.violations(&event);
        for violation in &violations {
            warn!("{}", violation);
        }

        if json {
            return serde_json::to_string_pretty(&sheet.to_payload())
                .context("Failed to serialize bulk results payload");
        }

        let ranked: Vec<RankedEntry> = scoring::rank(&sheet.rows, &self.config.ranking);
        Ok(report::render_event_ranking(&event, &ranked, &violations))
    }

    pub fn leaderboard(
        &self,
        camp_id: CampId,
        events_path: &Path,
        results_path: &Path,
        clubs_path: Option<&Path>,
        json: bool,
    ) -> Result<String> {
        let events = loader::load_events(events_path)?;
        let results = scoring::normalize_all(loader::load_results(results_path)?);
        let clubs = match clubs_path {
            Some(path) => loader::load_clubs(path)?,
            None => Vec::new(),
        };

        let board = scoring::aggregate(camp_id, &events, &clubs, &results, &self.config);

        if json {
            return serde_json::to_string_pretty(&board).context("Failed to serialize leaderboard");
        }
        Ok(report::render_leaderboard(&board))
    }

    pub fn detail(&self, event_path: &Path, result_path: &Path) -> Result<String> {
        let event = loader::load_event(event_path)?;
        let result = scoring::normalize(loader::load_result(result_path)?);

        if let Some(message) = event_mismatch(&result, &event) {
            warn!("{}", message);
        }

        let detail = scoring::result_detail(&result, &event);
        Ok(report::render_detail(&detail))
    }
}

fn event_mismatch(result: &NormalizedResult, event: &Event) -> Option<String> {
    (result.event_id != 0 && result.event_id != event.id).then(|| {
        format!(
            "Result is for event {} but event {} was given",
            result.event_id, event.id
        )
    })
}

/// Clubs named by the results themselves, first occurrence wins
fn clubs_from_results(results: &[NormalizedResult]) -> Vec<Club> {
    let mut clubs: Vec<Club> = Vec::new();
    for result in results {
        if clubs.iter().any(|c| c.id == result.club_id) {
            continue;
        }
        clubs.push(Club {
            id: result.club_id,
            name: result.club_name().unwrap_or_default().to_string(),
            ..Default::default()
        });
    }
    clubs
}
