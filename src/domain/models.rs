use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::characteristics::{Characteristic, MemberCounts};

pub type CampId = u64;
pub type ClubId = u64;
pub type EventId = u64;
pub type EventItemId = u64;

/// Scoring scheme of an event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Judges enter points per item, the total is their sum
    Regular,
    /// Items are ratios of members matching a characteristic
    MemberBased,
    /// Anything the backend sends that this crate does not know how to score
    #[default]
    #[serde(other)]
    Unknown,
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::Regular => "REGULAR",
            EventType::MemberBased => "MEMBER_BASED",
            EventType::Unknown => "UNKNOWN",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationType {
    #[default]
    Total,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampRef {
    pub id: CampId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Criterion of a REGULAR event.
///
/// `percentage` is informational only; totals are a plain sum of entered scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    #[serde(default)]
    pub id: EventItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
}

/// Criterion of a MEMBER_BASED event
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberBasedEventItem {
    #[serde(default)]
    pub id: EventItemId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub percentage: Option<f64>,
    #[serde(default)]
    pub applicable_characteristics: BTreeSet<Characteristic>,
    #[serde(default)]
    pub calculation_type: CalculationType,
    #[serde(default)]
    pub is_required: bool,
}

/// Scored activity within a camp
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camp: Option<CampRef>,
    #[serde(rename = "type", default)]
    pub event_type: EventType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<f64>,
    #[serde(default)]
    pub items: Vec<EventItem>,
    #[serde(default)]
    pub member_based_items: Vec<MemberBasedEventItem>,
}

impl Event {
    pub fn max_score_or(&self, default: f64) -> f64 {
        self.max_score.filter(|m| *m > 0.0).unwrap_or(default)
    }

    pub fn item(&self, id: EventItemId) -> Option<&EventItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn member_based_item(&self, id: EventItemId) -> Option<&MemberBasedEventItem> {
        self.member_based_items.iter().find(|i| i.id == id)
    }

    pub fn belongs_to(&self, camp_id: CampId) -> bool {
        self.camp.as_ref().is_some_and(|c| c.id == camp_id)
    }

    /// Calendar date of the event, accepting the formats the backend has been seen to emit.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_event_date)
    }
}

pub fn parse_event_date(date_str: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.date_naive());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }

    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()
}

/// Participating club with its membership counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Club {
    pub id: ClubId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(flatten)]
    pub members: MemberCounts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camp: Option<CampRef>,
}

impl Club {
    pub fn characteristic(&self, characteristic: Characteristic) -> u32 {
        self.members.get(characteristic)
    }

    /// Number of members counted by any of the item's characteristics
    pub fn members_with(&self, item: &MemberBasedEventItem) -> u32 {
        item.applicable_characteristics
            .iter()
            .map(|c| self.characteristic(*c))
            .sum()
    }

    pub fn to_ref(&self) -> ClubRef {
        ClubRef {
            id: self.id,
            name: self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRef {
    pub id: ClubId,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRef {
    pub id: EventId,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<EventType>,
}

impl From<&Event> for EventRef {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            name: event.name.clone(),
            date: event.date.clone(),
            event_type: Some(event.event_type),
        }
    }
}

/// Points entered for one REGULAR item
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawScoreEntry {
    pub event_item_id: EventItemId,
    pub score: f64,
}

/// Counts entered for one MEMBER_BASED item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawMemberBasedEntry {
    pub event_item_id: EventItemId,
    pub match_count: u32,
    #[serde(alias = "totalCharacteristics")]
    pub total_with_characteristic: u32,
}

/// Borrowed view of the values a club has entered for one event
#[derive(Debug, Clone, Copy, Default)]
pub struct ClubEntries<'a> {
    pub scores: &'a [RawScoreEntry],
    pub member_based: &'a [RawMemberBasedEntry],
}

impl<'a> ClubEntries<'a> {
    pub fn new(scores: &'a [RawScoreEntry], member_based: &'a [RawMemberBasedEntry]) -> Self {
        Self {
            scores,
            member_based,
        }
    }

    pub fn score_for(&self, item_id: EventItemId) -> Option<&'a RawScoreEntry> {
        self.scores.iter().find(|s| s.event_item_id == item_id)
    }

    pub fn member_based_for(&self, item_id: EventItemId) -> Option<&'a RawMemberBasedEntry> {
        self.member_based.iter().find(|s| s.event_item_id == item_id)
    }
}

/// Shape-independent scoring record of one club for one event
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub event_id: EventId,
    pub club_id: ClubId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<ClubRef>,
    pub total_score: f64,
    pub scores: Vec<RawScoreEntry>,
    pub member_based_scores: Vec<RawMemberBasedEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
}

impl NormalizedResult {
    pub fn entries(&self) -> ClubEntries<'_> {
        ClubEntries::new(&self.scores, &self.member_based_scores)
    }

    pub fn club_name(&self) -> Option<&str> {
        self.club
            .as_ref()
            .map(|c| c.name.as_str())
            .filter(|n| !n.is_empty())
    }
}

/// Position of a club in a ranking
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub club_id: ClubId,
    pub club_name: String,
    pub total_score: f64,
    pub rank: usize,
}
