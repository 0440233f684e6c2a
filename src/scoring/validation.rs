use std::fmt;

use serde::Serialize;

use crate::domain::{ClubId, Event};

/// A club total above the event's declared maximum
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreViolation {
    pub club_id: ClubId,
    pub total_score: f64,
    pub max_score: f64,
}

impl fmt::Display for ScoreViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Club {}: total score ({}) exceeds the maximum allowed ({})",
            self.club_id, self.total_score, self.max_score
        )
    }
}

/// Only events that declare a max score can be exceeded
pub fn exceeds_max_score(event: &Event, total: f64) -> bool {
    event.max_score.is_some_and(|max| max > 0.0 && total > max)
}

pub fn validate_totals(
    event: &Event,
    totals: impl IntoIterator<Item = (ClubId, f64)>,
) -> Vec<ScoreViolation> {
    let Some(max_score) = event.max_score.filter(|m| *m > 0.0) else {
        return Vec::new();
    };

    totals
        .into_iter()
        .filter(|(_, total)| exceeds_max_score(event, *total))
        .map(|(club_id, total_score)| ScoreViolation {
            club_id,
            total_score,
            max_score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(max_score: Option<f64>) -> Event {
        Event {
            id: 1,
            max_score,
            ..Default::default()
        }
    }

    #[test]
    fn test_exceeds_only_above_max() {
        let e = event(Some(50.0));
        assert!(!exceeds_max_score(&e, 50.0));
        assert!(exceeds_max_score(&e, 50.01));
    }

    #[test]
    fn test_no_max_never_exceeds() {
        let e = event(None);
        assert!(!exceeds_max_score(&e, 1_000.0));
        assert!(validate_totals(&e, vec![(1, 1_000.0)]).is_empty());
    }

    #[test]
    fn test_validate_collects_violations() {
        let e = event(Some(20.0));
        let violations = validate_totals(&e, vec![(1, 10.0), (2, 25.0), (3, 20.0)]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].club_id, 2);
        assert_eq!(
            violations[0].to_string(),
            "Club 2: total score (25) exceeds the maximum allowed (20)"
        );
    }
}
