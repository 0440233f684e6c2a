use log::{debug, warn};

use crate::api::{
    BackendResult, DecodedResult, EntriesShape, NestedEntry, NestedMemberBasedEntry,
    NestedScoreEntry,
};
use crate::domain::{EventId, NormalizedResult, RawMemberBasedEntry, RawScoreEntry};

/// Converts a backend result, in either shape, into the canonical form.
///
/// Flat input passes through unchanged, so normalizing the flat encoding of a
/// normalized result yields the same result.
pub fn normalize(raw: BackendResult) -> NormalizedResult {
    normalize_decoded(DecodedResult::from(raw))
}

pub fn normalize_all(raw: Vec<BackendResult>) -> Vec<NormalizedResult> {
    raw.into_iter().map(normalize).collect()
}

fn normalize_decoded(decoded: DecodedResult) -> NormalizedResult {
    let event_id = resolve_event_id(&decoded);
    let club_id = resolve_club_id(&decoded);

    let scores = match decoded.regular {
        EntriesShape::Flat(scores) => scores,
        EntriesShape::Nested(items) => convert_nested_scores(items, event_id),
        EntriesShape::Missing => Vec::new(),
    };

    let member_based_scores = match decoded.member_based {
        EntriesShape::Flat(scores) => scores,
        EntriesShape::Nested(items) => convert_nested_member_based(items, event_id),
        EntriesShape::Missing => Vec::new(),
    };

    NormalizedResult {
        id: decoded.id,
        event_id,
        club_id,
        event: decoded.event,
        club: decoded.club,
        total_score: decoded.total_score.unwrap_or(0.0),
        scores,
        member_based_scores,
        rank: decoded.rank,
    }
}

fn resolve_event_id(decoded: &DecodedResult) -> EventId {
    if let Some(event_id) = decoded.event_id {
        return event_id;
    }

    match decoded.event.as_ref().map(|e| e.id).filter(|id| *id != 0) {
        Some(event_id) => {
            debug!("Taking eventId {} from the embedded event", event_id);
            event_id
        }
        None => {
            warn!("Result {:?} carries no event reference, using 0", decoded.id);
            0
        }
    }
}

fn resolve_club_id(decoded: &DecodedResult) -> u64 {
    decoded
        .club_id
        .or_else(|| decoded.club.as_ref().map(|c| c.id).filter(|id| *id != 0))
        .unwrap_or_else(|| {
            warn!("Result {:?} carries no club reference, using 0", decoded.id);
            0
        })
}

fn convert_nested_scores(items: Vec<NestedScoreEntry>, event_id: EventId) -> Vec<RawScoreEntry> {
    items
        .iter()
        .filter(|item| belongs_to_event(*item, event_id, "Item"))
        .map(|item| RawScoreEntry {
            event_item_id: entry_item_id(item),
            score: item.score.unwrap_or_else(|| {
                debug!("Item {:?} has no score, using 0", item.item_id());
                0.0
            }),
        })
        .collect()
}

fn convert_nested_member_based(
    items: Vec<NestedMemberBasedEntry>,
    event_id: EventId,
) -> Vec<RawMemberBasedEntry> {
    items
        .iter()
        .filter(|item| belongs_to_event(*item, event_id, "MemberBasedItem"))
        .map(|item| RawMemberBasedEntry {
            event_item_id: entry_item_id(item),
            match_count: item.match_count.unwrap_or(0),
            total_with_characteristic: item.total_with_characteristic.unwrap_or(0),
        })
        .collect()
}

/// Entries whose embedded item names a different event are dropped
fn belongs_to_event(entry: &impl NestedEntry, event_id: EventId, kind: &str) -> bool {
    match entry.owner_event_id() {
        Some(owner) if event_id != 0 && owner != event_id => {
            warn!(
                "{} {:?} belongs to event {}, but the result is for event {}; dropping it",
                kind,
                entry.item_id(),
                owner,
                event_id
            );
            false
        }
        _ => true,
    }
}

fn entry_item_id(entry: &impl NestedEntry) -> u64 {
    entry.item_id().unwrap_or_else(|| {
        warn!("Nested entry has no item reference, using item id 0");
        0
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> BackendResult {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_nested_items_are_flattened() {
        let result = normalize(decode(
            r#"{
                "eventId": 5,
                "clubId": 2,
                "totalScore": 17.5,
                "items": [
                    {"eventItem": {"id": 40, "name": "Amarre"}, "score": 10},
                    {"eventItem": {"id": 41, "name": "Nudo"}, "score": 7.5}
                ]
            }"#,
        ));

        assert_eq!(result.event_id, 5);
        assert_eq!(result.club_id, 2);
        assert_eq!(result.total_score, 17.5);
        assert_eq!(
            result.scores,
            vec![
                RawScoreEntry { event_item_id: 40, score: 10.0 },
                RawScoreEntry { event_item_id: 41, score: 7.5 },
            ]
        );
        assert!(result.member_based_scores.is_empty());
    }

    #[test]
    fn test_event_id_recovered_from_embedded_event() {
        let result = normalize(decode(
            r#"{"event": {"id": 8, "name": "Fogata"}, "club": {"id": 3, "name": "Orion"}}"#,
        ));
        assert_eq!(result.event_id, 8);
        assert_eq!(result.club_id, 3);
    }

    #[test]
    fn test_cross_event_items_are_dropped() {
        let result = normalize(decode(
            r#"{
                "eventId": 5,
                "clubId": 1,
                "items": [
                    {"eventItem": {"id": 1, "event": {"id": 5}}, "score": 4},
                    {"eventItem": {"id": 2, "event": {"id": 7}}, "score": 9},
                    {"eventItem": {"id": 3}, "score": 1}
                ],
                "memberBasedItems": [
                    {"eventItem": {"id": 10, "event": {"id": 7}}, "matchCount": 1, "totalWithCharacteristic": 2}
                ]
            }"#,
        ));

        let ids: Vec<u64> = result.scores.iter().map(|s| s.event_item_id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(result.member_based_scores.is_empty());
    }

    #[test]
    fn test_nested_member_based_entries() {
        let result = normalize(decode(
            r#"{
                "eventId": 6,
                "clubId": 1,
                "memberBasedItems": [
                    {"eventItem": {"id": 10}, "matchCount": 3, "totalWithCharacteristic": 4},
                    {"eventItem": {"id": 11}, "matchCount": 2}
                ]
            }"#,
        ));

        assert_eq!(
            result.member_based_scores,
            vec![
                RawMemberBasedEntry {
                    event_item_id: 10,
                    match_count: 3,
                    total_with_characteristic: 4
                },
                RawMemberBasedEntry {
                    event_item_id: 11,
                    match_count: 2,
                    total_with_characteristic: 0
                },
            ]
        );
    }

    #[test]
    fn test_shape_mismatch_defaults() {
        let result = normalize(decode(r#"{"items": [{"score": null}, {"eventItemId": 4}]}"#));
        assert_eq!(result.event_id, 0);
        assert_eq!(result.club_id, 0);
        assert_eq!(result.total_score, 0.0);
        assert_eq!(
            result.scores,
            vec![
                RawScoreEntry { event_item_id: 0, score: 0.0 },
                RawScoreEntry { event_item_id: 4, score: 0.0 },
            ]
        );
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize(decode(
            r#"{
                "id": 12,
                "event": {"id": 5, "name": "Nudos"},
                "club": {"id": 2, "name": "Orion"},
                "totalScore": 9,
                "rank": 1,
                "items": [
                    {"eventItem": {"id": 1, "event": {"id": 5}}, "score": 4},
                    {"eventItem": {"id": 2, "event": {"id": 9}}, "score": 5}
                ],
                "memberBasedItems": [
                    {"eventItem": {"id": 3}, "matchCount": 1, "totalWithCharacteristic": 2}
                ]
            }"#,
        ));
        let twice = normalize(BackendResult::from(&once));
        assert_eq!(once, twice);
    }
}
