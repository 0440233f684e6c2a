use chrono::NaiveDate;
use serde::Serialize;

use super::calculator::item_percentage;
use crate::domain::{Event, EventItemId, EventType, NormalizedResult};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailLine {
    pub name: String,
    pub percentage: f64,
    pub score: f64,
    pub weighted_score: f64,
}

/// Item-by-item view of one club's result for one event
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultDetail {
    pub event_name: String,
    pub event_date: Option<NaiveDate>,
    pub total_score: f64,
    pub rank: Option<usize>,
    pub items: Vec<DetailLine>,
}

pub fn result_detail(result: &NormalizedResult, event: &Event) -> ResultDetail {
    let items = match event.event_type {
        EventType::MemberBased => member_based_lines(result, event),
        _ => regular_lines(result, event),
    };

    ResultDetail {
        event_name: event_name(result, event),
        event_date: event.parsed_date(),
        total_score: result.total_score,
        rank: result.rank,
        items,
    }
}

fn regular_lines(result: &NormalizedResult, event: &Event) -> Vec<DetailLine> {
    let entries = result.entries();
    event
        .items
        .iter()
        .map(|item| {
            let score = entries.score_for(item.id).map(|s| s.score).unwrap_or(0.0);
            line(item_name(&item.name, item.id), item.percentage, score)
        })
        .collect()
}

fn member_based_lines(result: &NormalizedResult, event: &Event) -> Vec<DetailLine> {
    let entries = result.entries();
    event
        .member_based_items
        .iter()
        .map(|item| {
            let mut name = item_name(&item.name, item.id);
            let mut score = 0.0;
            if let Some(entry) = entries.member_based_for(item.id) {
                if entry.total_with_characteristic > 0 {
                    name.push_str(&format!(
                        " ({}/{})",
                        entry.match_count, entry.total_with_characteristic
                    ));
                }
                score = item_percentage(entry) as f64;
            }
            line(name, item.percentage, score)
        })
        .collect()
}

fn line(name: String, percentage: Option<f64>, score: f64) -> DetailLine {
    let percentage = percentage.unwrap_or(0.0);
    DetailLine {
        name,
        percentage,
        score,
        weighted_score: score * percentage / 100.0,
    }
}

fn item_name(name: &str, id: EventItemId) -> String {
    if name.is_empty() {
        format!("Item {}", id)
    } else {
        name.to_string()
    }
}

fn event_name(result: &NormalizedResult, event: &Event) -> String {
    if !event.name.is_empty() {
        return event.name.clone();
    }
    result
        .event
        .as_ref()
        .map(|e| e.name.clone())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| "Unknown event".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EventItem, MemberBasedEventItem, RawMemberBasedEntry, RawScoreEntry};
    use approx::assert_relative_eq;

    #[test]
    fn test_regular_detail_lines() {
        let event = Event {
            id: 1,
            name: "Nudos".to_string(),
            date: Some("2024-05-04".to_string()),
            event_type: EventType::Regular,
            items: vec![
                EventItem {
                    id: 1,
                    name: "Amarre".to_string(),
                    percentage: Some(40.0),
                },
                EventItem {
                    id: 2,
                    name: String::new(),
                    percentage: None,
                },
            ],
            ..Default::default()
        };
        let result = NormalizedResult {
            event_id: 1,
            total_score: 8.0,
            rank: Some(2),
            scores: vec![RawScoreEntry {
                event_item_id: 1,
                score: 8.0,
            }],
            ..Default::default()
        };

        let detail = result_detail(&result, &event);

        assert_eq!(detail.event_name, "Nudos");
        assert_eq!(detail.event_date, NaiveDate::from_ymd_opt(2024, 5, 4));
        assert_eq!(detail.rank, Some(2));
        assert_eq!(detail.items.len(), 2);
        assert_relative_eq!(detail.items[0].weighted_score, 3.2);
        assert_eq!(detail.items[1].name, "Item 2");
        assert_eq!(detail.items[1].score, 0.0);
    }

    #[test]
    fn test_member_based_detail_lines() {
        let event = Event {
            id: 2,
            event_type: EventType::MemberBased,
            member_based_items: vec![
                MemberBasedEventItem {
                    id: 5,
                    name: "Uniforme completo".to_string(),
                    percentage: Some(50.0),
                    ..Default::default()
                },
                MemberBasedEventItem {
                    id: 6,
                    name: "Biblia".to_string(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let result = NormalizedResult {
            event_id: 2,
            event: Some(crate::domain::EventRef {
                id: 2,
                name: "Inspección".to_string(),
                ..Default::default()
            }),
            member_based_scores: vec![
                RawMemberBasedEntry {
                    event_item_id: 5,
                    match_count: 3,
                    total_with_characteristic: 4,
                },
                RawMemberBasedEntry {
                    event_item_id: 6,
                    match_count: 0,
                    total_with_characteristic: 0,
                },
            ],
            ..Default::default()
        };

        let detail = result_detail(&result, &event);

        assert_eq!(detail.event_name, "Inspección");
        assert_eq!(detail.event_date, None);
        assert_eq!(detail.items[0].name, "Uniforme completo (3/4)");
        assert_relative_eq!(detail.items[0].score, 75.0);
        assert_relative_eq!(detail.items[0].weighted_score, 37.5);
        assert_eq!(detail.items[1].name, "Biblia");
        assert_eq!(detail.items[1].score, 0.0);
    }
}
