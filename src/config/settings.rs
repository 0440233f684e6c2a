use std::str::FromStr;

use crate::errors::ScoringError;

/// Collation used to break ties between clubs with equal scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Collation {
    /// Spanish: accents and case ignored, `ñ` sorts as its own letter after `n`
    #[default]
    Spanish,
    /// Accents and case ignored, `ñ` treated as `n`
    Root,
}

impl FromStr for Collation {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "es" | "es-es" | "spanish" => Ok(Collation::Spanish),
            "root" | "und" => Ok(Collation::Root),
            _ => Err(ScoringError::UnknownCollation(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoringSettings {
    pub default_max_score: f64,
    pub decimal_places: u32,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            default_max_score: 100.0,
            decimal_places: 2,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RankingSettings {
    pub collation: Collation,
}

#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub color: bool,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self { color: true }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub scoring: ScoringSettings,
    pub ranking: RankingSettings,
    pub report: ReportSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with overrides taken from the process environment
    pub fn from_env() -> Result<Self, ScoringError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScoringError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(value) = lookup("CAMP_SCORING_DEFAULT_MAX_SCORE") {
            config.scoring.default_max_score = parse_max_score(&value)?;
        }

        if let Some(value) = lookup("CAMP_SCORING_COLLATION") {
            config.ranking.collation = value.parse()?;
        }

        if lookup("NO_COLOR").is_some() {
            config.report.color = false;
        }

        Ok(config)
    }
}

fn parse_max_score(value: &str) -> Result<f64, ScoringError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| ScoringError::InvalidSetting {
            key: "CAMP_SCORING_DEFAULT_MAX_SCORE",
            value: value.to_string(),
        })
}
