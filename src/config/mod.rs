pub mod settings;

pub use settings::{AppConfig, Collation, RankingSettings, ReportSettings, ScoringSettings};
