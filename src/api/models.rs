use serde::{Deserialize, Serialize};

use crate::domain::{
    ClubId, ClubRef, EventId, EventItemId, EventRef, NormalizedResult, RawMemberBasedEntry,
    RawScoreEntry,
};

// --- Incoming Structures ---

/// Result record as returned by the backend.
///
/// Entries may arrive flat (`scores`, `memberBasedScores`) or nested under
/// `items`/`memberBasedItems` with an embedded `eventItem`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackendResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<EventId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club_id: Option<ClubId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub club: Option<ClubRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scores: Option<Vec<RawScoreEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<NestedScoreEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_based_scores: Option<Vec<RawMemberBasedEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_based_items: Option<Vec<NestedMemberBasedEntry>>,
}

/// Item reference embedded in a nested entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbeddedItem {
    pub id: EventItemId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<OwnerEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnerEvent {
    pub id: EventId,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NestedScoreEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_item: Option<EmbeddedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_item_id: Option<EventItemId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NestedMemberBasedEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_item: Option<EmbeddedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_item_id: Option<EventItemId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_count: Option<u32>,
    #[serde(
        alias = "totalCharacteristics",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_with_characteristic: Option<u32>,
}

/// Common view over nested entries, used by the normalizer
pub trait NestedEntry {
    fn embedded(&self) -> Option<&EmbeddedItem>;
    fn loose_item_id(&self) -> Option<EventItemId>;

    fn item_id(&self) -> Option<EventItemId> {
        self.embedded()
            .map(|i| i.id)
            .filter(|id| *id != 0)
            .or(self.loose_item_id())
    }

    /// Event the embedded item says it belongs to, if it says so
    fn owner_event_id(&self) -> Option<EventId> {
        self.embedded()
            .and_then(|i| i.event.as_ref())
            .map(|e| e.id)
            .filter(|id| *id != 0)
    }
}

impl NestedEntry for NestedScoreEntry {
    fn embedded(&self) -> Option<&EmbeddedItem> {
        self.event_item.as_ref()
    }

    fn loose_item_id(&self) -> Option<EventItemId> {
        self.event_item_id
    }
}

impl NestedEntry for NestedMemberBasedEntry {
    fn embedded(&self) -> Option<&EmbeddedItem> {
        self.event_item.as_ref()
    }

    fn loose_item_id(&self) -> Option<EventItemId> {
        self.event_item_id
    }
}

/// How one list of entries arrived from the backend
#[derive(Debug, Clone, PartialEq)]
pub enum EntriesShape<N, F> {
    Flat(Vec<F>),
    Nested(Vec<N>),
    Missing,
}

impl<N, F> EntriesShape<N, F> {
    /// Flat entries win when both forms are present
    fn select(flat: Option<Vec<F>>, nested: Option<Vec<N>>) -> Self {
        match (flat, nested) {
            (Some(flat), _) => EntriesShape::Flat(flat),
            (None, Some(nested)) => EntriesShape::Nested(nested),
            (None, None) => EntriesShape::Missing,
        }
    }
}

/// Backend result decoded once into explicit shapes
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedResult {
    pub id: Option<u64>,
    pub event_id: Option<EventId>,
    pub club_id: Option<ClubId>,
    pub event: Option<EventRef>,
    pub club: Option<ClubRef>,
    pub total_score: Option<f64>,
    pub rank: Option<usize>,
    pub regular: EntriesShape<NestedScoreEntry, RawScoreEntry>,
    pub member_based: EntriesShape<NestedMemberBasedEntry, RawMemberBasedEntry>,
}

impl From<BackendResult> for DecodedResult {
    fn from(raw: BackendResult) -> Self {
        Self {
            id: raw.id,
            event_id: raw.event_id.filter(|id| *id != 0),
            club_id: raw.club_id.filter(|id| *id != 0),
            event: raw.event,
            club: raw.club,
            total_score: raw.total_score,
            rank: raw.rank,
            regular: EntriesShape::select(raw.scores, raw.items),
            member_based: EntriesShape::select(raw.member_based_scores, raw.member_based_items),
        }
    }
}

impl From<&NormalizedResult> for BackendResult {
    /// Flat encoding, the shape the normalizer passes through unchanged
    fn from(result: &NormalizedResult) -> Self {
        Self {
            id: result.id,
            event_id: Some(result.event_id),
            club_id: Some(result.club_id),
            event: result.event.clone(),
            club: result.club.clone(),
            total_score: Some(result.total_score),
            rank: result.rank,
            scores: Some(result.scores.clone()),
            items: None,
            member_based_scores: Some(result.member_based_scores.clone()),
            member_based_items: None,
        }
    }
}

// --- Outgoing Structures ---

/// One entered value in a bulk submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SubmittedItem {
    Regular(RawScoreEntry),
    MemberBased(RawMemberBasedEntry),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedResult {
    pub club_id: ClubId,
    pub total_score: f64,
    pub items: Vec<SubmittedItem>,
}

/// Body for saving every club's result of one event at once
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkResultsPayload {
    pub event_id: EventId,
    pub results: Vec<SubmittedResult>,
}
