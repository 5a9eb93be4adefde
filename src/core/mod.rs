// Core algorithm exports
pub mod categories;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use categories::{CategoryError, DifficultyTier, TrekCategories, TrekCategory};
pub use filters::{matches_interest, TrekProfile};
pub use matcher::Matcher;
pub use scoring::{calculate_match_score, default_reason, ScoreBreakdown};
