use colored::{ColoredString, Colorize};

use crate::domain::{Event, RankedEntry};
use crate::scoring::ranking::{Medal, ordinal};
use crate::scoring::{CampLeaderboard, ResultDetail, ScoreViolation};

const NAME_WIDTH: usize = 28;
const SCORE_WIDTH: usize = 10;

fn medal_style(rank: usize, text: String) -> ColoredString {
    match Medal::from_rank(rank) {
        Some(Medal::Gold) => text.yellow().bold(),
        Some(Medal::Silver) => text.white().bold(),
        Some(Medal::Bronze) => text.red().bold(),
        None => text.normal(),
    }
}

fn position(rank: usize) -> ColoredString {
    medal_style(rank, format!("{:>5}", ordinal(rank)))
}

fn truncate(name: &str, width: usize) -> String {
    if name.chars().count() <= width {
        return name.to_string();
    }
    let mut cut: String = name.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

pub fn render_event_ranking(
    event: &Event,
    ranked: &[RankedEntry],
    violations: &[ScoreViolation],
) -> String {
    let max = event
        .max_score
        .map(|m| format!(" (max {})", m))
        .unwrap_or_default();
    let title = format!("{} [{}]{}", event.name, event.event_type.as_str(), max);
    let mut out = format!("{}\n", title.bold());

    for entry in ranked {
        let flagged = violations.iter().any(|v| v.club_id == entry.club_id);
        let score = format!("{:>width$.2}", entry.total_score, width = SCORE_WIDTH);
        out.push_str(&format!(
            "{}  {:<name$}{}\n",
            position(entry.rank),
            truncate(&entry.club_name, NAME_WIDTH),
            if flagged { score.red() } else { score.normal() },
            name = NAME_WIDTH
        ));
    }

    for violation in violations {
        out.push_str(&format!("{}\n", violation.to_string().red()));
    }

    out
}

pub fn render_leaderboard(board: &CampLeaderboard) -> String {
    let mut header = format!("{:>5}  {:<name$}", "#", "Club", name = NAME_WIDTH);
    for event in &board.events {
        header.push_str(&format!(
            "{:>width$}",
            truncate(&event.name, SCORE_WIDTH - 1),
            width = SCORE_WIDTH
        ));
    }
    header.push_str(&format!("{:>width$}", "Total", width = SCORE_WIDTH));
    let mut out = format!("{}\n", header.bold());

    for standing in &board.standings {
        out.push_str(&format!(
            "{}  {:<name$}",
            position(standing.rank),
            truncate(&standing.club.name, NAME_WIDTH),
            name = NAME_WIDTH
        ));
        for event in &board.events {
            out.push_str(&format!(
                "{:>width$.2}",
                standing.event_score(event.id),
                width = SCORE_WIDTH
            ));
        }
        let total = format!("{:>width$.2}", standing.total_score, width = SCORE_WIDTH);
        out.push_str(&format!("{}\n", medal_style(standing.rank, total)));
    }

    out
}

pub fn render_detail(detail: &ResultDetail) -> String {
    let date = detail
        .event_date
        .map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut out = format!("{}\n", format!("{} ({})", detail.event_name, date).bold());

    for item in &detail.items {
        out.push_str(&format!(
            "  {:<name$}{:>8.2}{:>7.0}%{:>9.2}\n",
            truncate(&item.name, NAME_WIDTH),
            item.score,
            item.percentage,
            item.weighted_score,
            name = NAME_WIDTH
        ));
    }

    let rank = detail.rank.map(ordinal).unwrap_or_else(|| "-".to_string());
    out.push_str(&format!(
        "  Total: {:.2}  Rank: {}\n",
        detail.total_score, rank
    ));
    out
}
