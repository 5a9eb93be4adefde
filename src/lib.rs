//! Trek Match - trek recommendation service
//!
//! This library provides the matching engine that ranks treks against a
//! user's age, health, fitness, experience and trek-type interests, plus the
//! catalog, weather and HTTP plumbing around it.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{Matcher, ScoreBreakdown, TrekCategories, calculate_match_score};
pub use crate::models::{MatchResult, PreferenceSet, RankThresholds, Trek, TrekMatchRequest};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        let trek = Trek::new("Karnala Fort", Some("Easy"));
        let breakdown = matcher.score(&trek, &PreferenceSet::default());
        assert!(breakdown.score <= 100);
    }
}
