use std::borrow::Cow;

use serde::Serialize;

use super::collation::collation_key;
use crate::config::RankingSettings;
use crate::domain::{ClubId, ClubRef, NormalizedResult, RankedEntry};

/// Anything that can take a place in a club ranking
pub trait Rankable {
    fn club_id(&self) -> ClubId;
    fn display_name(&self) -> Cow<'_, str>;
    fn total_score(&self) -> f64;
}

/// A club paired with a score, the plainest thing to rank
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubTotal {
    pub club: ClubRef,
    pub total_score: f64,
}

impl ClubTotal {
    pub fn new(club: ClubRef, total_score: f64) -> Self {
        Self { club, total_score }
    }
}

impl Rankable for ClubTotal {
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

impl Rankable for NormalizedResult {
    fn club_id(&self) -> ClubId {
        self.club_id
    }

    fn display_name(&self) -> Cow<'_, str> {
        match self.club_name() {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("Club {}", self.club_id)),
        }
    }

    fn total_score(&self) -> f64 {
        self.total_score
    }
}

pub(crate) fn fallback_name(name: &str, club_id: ClubId) -> Cow<'_, str> {
    if name.is_empty() {
        Cow::Owned(format!("Club {}", club_id))
    } else {
        Cow::Borrowed(name)
    }
}

/// Sorts by score descending, then by name under the configured collation.
///
/// The sort is stable: entries equal on both keys keep their input order.
pub fn order<'a, T: Rankable>(entries: &'a [T], settings: &RankingSettings) -> Vec<&'a T> {
    let mut keyed: Vec<_> = entries
        .iter()
        .map(|e| {
            let key = collation_key(&e.display_name(), settings.collation);
            (sort_score(e.total_score()), key, e)
        })
        .collect();

    keyed.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

    keyed.into_iter().map(|(_, _, entry)| entry).collect()
}

/// `total_cmp` orders -0.0 below 0.0; both must tie so the name decides
fn sort_score(score: f64) -> f64 {
    if score == 0.0 {
        0.0
    } else {
        score
    }
}

/// Ranks entries; the rank is the 1-based position, ties get distinct ranks.
pub fn rank<T: Rankable>(entries: &[T], settings: &RankingSettings) -> Vec<RankedEntry> {
    order(entries, settings)
        .into_iter()
        .enumerate()
        .map(|(idx, entry)| RankedEntry {
            club_id: entry.club_id(),
            club_name: entry.display_name().into_owned(),
            total_score: entry.total_score(),
            rank: idx + 1,
        })
        .collect()
}

/// Podium position of the first three ranks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    pub fn from_rank(rank: usize) -> Option<Self> {
        match rank {
            1 => Some(Medal::Gold),
            2 => Some(Medal::Silver),
            3 => Some(Medal::Bronze),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Medal::Gold => "gold",
            Medal::Silver => "silver",
            Medal::Bronze => "bronze",
        }
    }
}

/// Spanish ordinal abbreviation: 1er, 2do, 3er, 4to...
pub fn ordinal(rank: usize) -> String {
    let suffix = match rank {
        1 | 3 => "er",
        2 => "do",
        _ => "to",
    };
    format!("{}{}", rank, suffix)
}
