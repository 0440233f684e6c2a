pub mod aggregator;
pub mod calculator;
pub mod collation;
pub mod detail;
pub mod normalizer;
pub mod ranking;
pub mod sheet;
pub mod validation;

pub use aggregator::{CampLeaderboard, ClubStanding, EventScore, aggregate};
pub use calculator::{compute_total, item_percentage, round_to};
pub use detail::{ResultDetail, result_detail};
pub use normalizer::{normalize, normalize_all};
pub use ranking::{ClubTotal, Medal, Rankable, rank};
pub use sheet::{ScoringSheet, SheetRow, build_sheet};
pub use validation::{ScoreViolation, exceeds_max_score, validate_totals};
