use log::{debug, warn};

use crate::config::ScoringSettings;
use crate::domain::{ClubEntries, Event, EventType, RawMemberBasedEntry};

/// Calculates a club's total for one event.
///
/// REGULAR events sum the entered points. MEMBER_BASED events average the per-item
/// match ratios, round that average to a whole percent, then scale it by the
/// event's max score. Unknown event types score 0.
pub fn compute_total(event: &Event, entries: ClubEntries<'_>, settings: &ScoringSettings) -> f64 {
    match event.event_type {
        EventType::Regular => regular_total(event, entries, settings),
        EventType::MemberBased => member_based_total(event, entries, settings),
        EventType::Unknown => {
            warn!(
                "Event {} ({}) has an unknown scoring type, scoring 0",
                event.id, event.name
            );
            0.0
        }
    }
}

fn regular_total(event: &Event, entries: ClubEntries<'_>, settings: &ScoringSettings) -> f64 {
    report_orphan_entries(event, entries.scores.iter().map(|s| s.event_item_id));

    let total: f64 = event
        .items
        .iter()
        .filter_map(|item| entries.score_for(item.id))
        .map(|entry| entry.score)
        .sum();

    round_to(total, settings.decimal_places)
}

fn member_based_total(event: &Event, entries: ClubEntries<'_>, settings: &ScoringSettings) -> f64 {
    report_orphan_entries(event, entries.member_based.iter().map(|s| s.event_item_id));

    let ratios: Vec<f64> = event
        .member_based_items
        .iter()
        .filter_map(|item| entries.member_based_for(item.id))
        .filter_map(match_ratio)
        .collect();

    let average = average_percentage(&ratios).round();
    let max_score = event.max_score_or(settings.default_max_score);

    round_to(average * max_score / 100.0, settings.decimal_places)
}

/// Percentage of members matching, or `None` when nobody has the characteristic
pub fn match_ratio(entry: &RawMemberBasedEntry) -> Option<f64> {
    if entry.total_with_characteristic == 0 {
        return None;
    }
    Some(entry.match_count as f64 / entry.total_with_characteristic as f64 * 100.0)
}

/// Whole-number percentage of one member-based entry, 0 when the denominator is 0
pub fn item_percentage(entry: &RawMemberBasedEntry) -> u32 {
    match_ratio(entry).map(|r| r.round() as u32).unwrap_or(0)
}

fn average_percentage(ratios: &[f64]) -> f64 {
    if ratios.is_empty() {
        return 0.0;
    }
    ratios.iter().sum::<f64>() / ratios.len() as f64
}

fn report_orphan_entries(event: &Event, item_ids: impl Iterator<Item = u64>) {
    for item_id in item_ids {
        let known = match event.event_type {
            EventType::MemberBased => event.member_based_item(item_id).is_some(),
            _ => event.item(item_id).is_some(),
        };
        if !known {
            debug!(
                "Entry for item {} is not part of event {}, ignoring it",
                item_id, event.id
            );
        }
    }
}

/// Rounds half away from zero at the given number of decimals
///
/// Negative zero comes out as `0.0`, so empty sums compare and print like any other zero.
pub fn round_to(value: f64, decimal_places: u32) -> f64 {
    let factor = 10f64.powi(decimal_places as i32);
    (value * factor).round() / factor + 0.0
}
