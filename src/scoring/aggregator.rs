use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, HashSet};

use log::{debug, info, warn};
use serde::Serialize;

use super::calculator::compute_total;
use super::collation::compare_names;
use super::ranking::{self, Rankable, fallback_name};
use crate::config::AppConfig;
use crate::domain::{CampId, Club, ClubId, ClubRef, Event, EventId, EventRef, NormalizedResult};

/// Score of one club on one event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventScore {
    pub event: EventRef,
    pub score: f64,
}

/// One row of the camp leaderboard
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubStanding {
    pub club: ClubRef,
    pub total_score: f64,
    pub event_results: Vec<EventScore>,
    pub rank: usize,
}

impl ClubStanding {
    /// Score for the event, 0 when the club has not been scored on it
    pub fn event_score(&self, event_id: EventId) -> f64 {
        self.event_results
            .iter()
            .find(|r| r.event.id == event_id)
            .map(|r| r.score)
            .unwrap_or(0.0)
    }
}

impl Rankable for ClubStanding {
    fn club_id(&self) -> ClubId {
        self.club.id
    }

    fn display_name(&self) -> Cow<'_, str> {
        fallback_name(&self.club.name, self.club.id)
    }

    fn total_score(&self) -> f64 {
        self.total_score
    }
}

/// Camp-wide ranking with the events used as columns
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampLeaderboard {
    pub camp_id: CampId,
    pub events: Vec<EventRef>,
    pub standings: Vec<ClubStanding>,
}

/// Sums every club's event totals across the camp and ranks the clubs.
///
/// Totals are recomputed from the event definitions. A result whose event is not
/// defined at all falls back to the total stored with it; a result for an event
/// of another camp is left out, as is any result of a club listed under another camp.
pub fn aggregate(
    camp_id: CampId,
    events: &[Event],
    clubs: &[Club],
    results: &[NormalizedResult],
    config: &AppConfig,
) -> CampLeaderboard {
    let definitions: HashMap<EventId, &Event> = events.iter().map(|e| (e.id, e)).collect();

    let (members, outsiders): (Vec<&Club>, Vec<&Club>) = clubs
        .iter()
        .partition(|c| c.camp.as_ref().is_none_or(|camp| camp.id == camp_id));
    let outsiders: HashSet<ClubId> = outsiders.into_iter().map(|c| c.id).collect();

    let mut rows: BTreeMap<ClubId, (ClubRef, Vec<EventScore>)> = members
        .into_iter()
        .map(|c| (c.id, (c.to_ref(), Vec::new())))
        .collect();

    for result in results {
        if outsiders.contains(&result.club_id) {
            debug!(
                "Result of club {} skipped, the club is not part of camp {}",
                result.club_id, camp_id
            );
            continue;
        }

        let Some(event_score) = score_result(camp_id, result, &definitions, config) else {
            continue;
        };

        let (club, scores) = rows.entry(result.club_id).or_insert_with(|| {
            (
                result.club.clone().unwrap_or(ClubRef {
                    id: result.club_id,
                    name: String::new(),
                }),
                Vec::new(),
            )
        });

        if scores.iter().any(|s| s.event.id == event_score.event.id) {
            warn!(
                "Club {} has more than one result for event {}, keeping the first",
                club.id, event_score.event.id
            );
            continue;
        }
        scores.push(event_score);
    }

    let columns = event_columns(&rows, config);
    let standings = rank_standings(rows, &columns, config);

    info!(
        "Aggregated {} clubs over {} events for camp {}",
        standings.len(),
        columns.len(),
        camp_id
    );

    CampLeaderboard {
        camp_id,
        events: columns,
        standings,
    }
}

fn score_result(
    camp_id: CampId,
    result: &NormalizedResult,
    definitions: &HashMap<EventId, &Event>,
    config: &AppConfig,
) -> Option<EventScore> {
    match definitions.get(&result.event_id) {
        Some(event) if event.camp.is_some() && !event.belongs_to(camp_id) => {
            debug!(
                "Result for event {} skipped, the event is not part of camp {}",
                event.id, camp_id
            );
            None
        }
        Some(event) => Some(EventScore {
            event: EventRef::from(*event),
            score: compute_total(event, result.entries(), &config.scoring),
        }),
        None => {
            warn!(
                "Event {} is not defined, using the stored total of club {}",
                result.event_id, result.club_id
            );
            let event = result.event.clone().unwrap_or_else(|| EventRef {
                id: result.event_id,
                name: format!("Event {}", result.event_id),
                ..Default::default()
            });
            Some(EventScore {
                event,
                score: result.total_score,
            })
        }
    }
}

/// Distinct events across all rows, alphabetical by name
fn event_columns(
    rows: &BTreeMap<ClubId, (ClubRef, Vec<EventScore>)>,
    config: &AppConfig,
) -> Vec<EventRef> {
    let mut columns: Vec<EventRef> = Vec::new();
    for (_, scores) in rows.values() {
        for score in scores {
            if !columns.iter().any(|c| c.id == score.event.id) {
                columns.push(score.event.clone());
            }
        }
    }

    columns.sort_by(|a, b| {
        compare_names(&a.name, &b.name, config.ranking.collation).then(a.id.cmp(&b.id))
    });
    columns
}

fn rank_standings(
    rows: BTreeMap<ClubId, (ClubRef, Vec<EventScore>)>,
    columns: &[EventRef],
    config: &AppConfig,
) -> Vec<ClubStanding> {
    let unranked: Vec<ClubStanding> = rows
        .into_values()
        .map(|(club, mut event_results)| {
            event_results.sort_by_key(|r| columns.iter().position(|c| c.id == r.event.id));
            ClubStanding {
                total_score: sum_scores(&event_results, config),
                club,
                event_results,
                rank: 0,
            }
        })
        .collect();

    ranking::order(&unranked, &config.ranking)
        .into_iter()
        .enumerate()
        .map(|(idx, standing)| ClubStanding {
            rank: idx + 1,
            ..standing.clone()
        })
        .collect()
}

fn sum_scores(event_results: &[EventScore], config: &AppConfig) -> f64 {
    let total: f64 = event_results.iter().map(|r| r.score).sum();
    super::calculator::round_to(total, config.scoring.decimal_places)
}
