pub mod loader;
pub mod report;
pub mod scoring;

pub use scoring::ScoringService;
