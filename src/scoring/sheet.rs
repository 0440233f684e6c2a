use std::borrow::Cow;

use serde::Serialize;

use super::calculator::compute_total;
use super::ranking::{self, Rankable, fallback_name};
use super::validation::{ScoreViolation, validate_totals};
use crate::api::{BulkResultsPayload, SubmittedItem, SubmittedResult};
use crate::config::AppConfig;
use crate::domain::{
    Club, ClubEntries, ClubId, ClubRef, Event, EventId, EventType, NormalizedResult,
    RawMemberBasedEntry, RawScoreEntry,
};

/// Values of one club for every item of the event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetRow {
    pub club: ClubRef,
    pub scores: Vec<RawScoreEntry>,
    pub member_based_scores: Vec<RawMemberBasedEntry>,
    pub total_score: f64,
    pub rank: usize,
}

impl SheetRow {
    pub fn entries(&self) -> ClubEntries<'_> {
        ClubEntries::new(&self.scores, &self.member_based_scores)
    }
}

impl Rankable for SheetRow {
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

/// Scoring sheet of one event, rows ordered by current standing
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringSheet {
    pub event_id: EventId,
    pub event_type: EventType,
    pub rows: Vec<SheetRow>,
}

/// Builds one row per club, pre-filled from the club's existing result.
///
/// Items without a stored value start at 0; member-based items default their
/// denominator to the number of club members with the item's characteristics.
pub fn build_sheet(
    event: &Event,
    clubs: &[Club],
    existing: &[NormalizedResult],
    config: &AppConfig,
) -> ScoringSheet {
    let rows: Vec<SheetRow> = clubs
        .iter()
        .map(|club| {
            let previous = existing
                .iter()
                .find(|r| r.club_id == club.id && r.event_id == event.id);
            build_row(event, club, previous, config)
        })
        .collect();

    let rows = ranking::order(&rows, &config.ranking)
        .into_iter()
        .enumerate()
        .map(|(idx, row)| SheetRow {
            rank: idx + 1,
            ..row.clone()
        })
        .collect();

    ScoringSheet {
        event_id: event.id,
        event_type: event.event_type,
        rows,
    }
}

fn build_row(
    event: &Event,
    club: &Club,
    previous: Option<&NormalizedResult>,
    config: &AppConfig,
) -> SheetRow {
    let stored = previous.map(|r| r.entries()).unwrap_or_default();

    let (scores, member_based_scores): (Vec<RawScoreEntry>, Vec<RawMemberBasedEntry>) =
        match event.event_type {
            EventType::Regular => (
                event
                    .items
                    .iter()
                    .map(|item| RawScoreEntry {
                        event_item_id: item.id,
                        score: stored.score_for(item.id).map(|s| s.score).unwrap_or(0.0),
                    })
                    .collect(),
                Vec::new(),
            ),
            EventType::MemberBased => (
                Vec::new(),
                event
                    .member_based_items
                    .iter()
                    .map(|item| {
                        stored
                            .member_based_for(item.id)
                            .copied()
                            .unwrap_or(RawMemberBasedEntry {
                                event_item_id: item.id,
                                match_count: 0,
                                total_with_characteristic: club.members_with(item),
                            })
                    })
                    .collect(),
            ),
            EventType::Unknown => (Vec::new(), Vec::new()),
        };

    let total_score = compute_total(
        event,
        ClubEntries::new(&scores, &member_based_scores),
        &config.scoring,
    );

    SheetRow {
        club: club.to_ref(),
        scores,
        member_based_scores,
        total_score,
        rank: 0,
    }
}

impl ScoringSheet {
    pub fn violations(&self, event: &Event) -> Vec<ScoreViolation> {
        validate_totals(event, self.rows.iter().map(|r| (r.club.id, r.total_score)))
    }

    pub fn to_payload(&self) -> BulkResultsPayload {
        let results = self
            .rows
            .iter()
            .map(|row| SubmittedResult {
                club_id: row.club.id,
                total_score: row.total_score,
                items: match self.event_type {
                    EventType::MemberBased => row
                        .member_based_scores
                        .iter()
                        .copied()
                        .map(SubmittedItem::MemberBased)
                        .collect(),
                    _ => row
                        .scores
                        .iter()
                        .copied()
                        .map(SubmittedItem::Regular)
                        .collect(),
                },
            })
            .collect();

        BulkResultsPayload {
            event_id: self.event_id,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Characteristic, EventItem, MemberBasedEventItem, MemberCounts};

    fn clubs() -> Vec<Club> {
        vec![
            Club {
                id: 1,
                name: "Orion".to_string(),
                members: MemberCounts {
                    minors_count: 10,
                    guests_count: 2,
                    ..Default::default()
                },
                ..Default::default()
            },
            Club {
                id: 2,
                name: "Antares".to_string(),
                members: MemberCounts {
                    minors_count: 6,
                    ..Default::default()
                },
                ..Default::default()
            },
        ]
    }

    fn regular_event() -> Event {
        Event {
            id: 3,
            event_type: EventType::Regular,
            max_score: Some(10.0),
            items: vec![
                EventItem {
                    id: 31,
                    ..Default::default()
                },
                EventItem {
                    id: 32,
                    ..Default::default()
                },
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_regular_sheet_prefills_existing_scores() {
        let event = regular_event();
        let existing = vec![NormalizedResult {
            event_id: 3,
            club_id: 1,
            scores: vec![RawScoreEntry {
                event_item_id: 32,
                score: 6.5,
            }],
            ..Default::default()
        }];

        let sheet = build_sheet(&event, &clubs(), &existing, &AppConfig::new());

        assert_eq!(sheet.rows[0].club.name, "Orion");
        assert_eq!(sheet.rows[0].rank, 1);
        assert_eq!(
            sheet.rows[0].scores,
            vec![
                RawScoreEntry {
                    event_item_id: 31,
                    score: 0.0
                },
                RawScoreEntry {
                    event_item_id: 32,
                    score: 6.5
                },
            ]
        );
        assert_eq!(sheet.rows[0].total_score, 6.5);
        assert_eq!(sheet.rows[1].club.name, "Antares");
        assert_eq!(sheet.rows[1].total_score, 0.0);
    }

    #[test]
    fn test_member_based_sheet_defaults_denominator() {
        let event = Event {
            id: 4,
            event_type: EventType::MemberBased,
            max_score: Some(100.0),
            member_based_items: vec![MemberBasedEventItem {
                id: 41,
                applicable_characteristics: [Characteristic::Minors, Characteristic::Guests]
                    .into_iter()
                    .collect(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let sheet = build_sheet(&event, &clubs(), &[], &AppConfig::new());

        // both totals are 0, so the order is alphabetical
        assert_eq!(sheet.rows[0].club.name, "Antares");
        assert_eq!(sheet.rows[0].member_based_scores[0].total_with_characteristic, 6);
        assert_eq!(sheet.rows[1].member_based_scores[0].total_with_characteristic, 12);
        assert!(sheet.rows.iter().all(|r| r.scores.is_empty()));
    }

    #[test]
    fn test_payload_and_violations() {
        let event = regular_event();
        let existing = vec![NormalizedResult {
            event_id: 3,
            club_id: 2,
            scores: vec![
                RawScoreEntry {
                    event_item_id: 31,
                    score: 8.0,
                },
                RawScoreEntry {
                    event_item_id: 32,
                    score: 4.0,
                },
            ],
            ..Default::default()
        }];

        let sheet = build_sheet(&event, &clubs(), &existing, &AppConfig::new());
        let violations = sheet.violations(&event);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].club_id, 2);

        let payload = sheet.to_payload();
        assert_eq!(payload.event_id, 3);
        assert_eq!(payload.results.len(), 2);
        assert_eq!(payload.results[0].club_id, 2);
        assert_eq!(payload.results[0].total_score, 12.0);
        assert_eq!(payload.results[0].items.len(), 2);
    }

    #[test]
    fn test_results_of_other_events_are_not_used() {
        let event = regular_event();
        let existing = vec![NormalizedResult {
            event_id: 99,
            club_id: 1,
            scores: vec![RawScoreEntry {
                event_item_id: 31,
                score: 5.0,
            }],
            ..Default::default()
        }];

        let sheet = build_sheet(&event, &clubs(), &existing, &AppConfig::new());
        assert!(sheet.rows.iter().all(|r| r.total_score == 0.0));
    }
}
