use std::sync::Arc;

use crate::core::categories::TrekCategories;
use crate::core::scoring::{calculate_match_score, ScoreBreakdown};
use crate::models::{MatchResult, PreferenceSet, RankThresholds, Trek};

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Score every trek independently
/// 2. Drop treks below the minimum score
/// 3. Sort by score, highest first (ties keep catalog order)
/// 4. Truncate to the limit
#[derive(Debug, Clone)]
pub struct Matcher {
    categories: Arc<TrekCategories>,
    thresholds: RankThresholds,
}

impl Matcher {
    pub fn new(categories: TrekCategories, thresholds: RankThresholds) -> Self {
        Self {
            categories: Arc::new(categories),
            thresholds,
        }
    }

    pub fn with_default_tables() -> Self {
        Self::new(TrekCategories::default(), RankThresholds::default())
    }

    pub fn categories(&self) -> &TrekCategories {
        &self.categories
    }

    pub fn thresholds(&self) -> RankThresholds {
        self.thresholds
    }

    /// Score a single trek against the preferences
    pub fn score(&self, trek: &Trek, preferences: &PreferenceSet) -> ScoreBreakdown {
        calculate_match_score(trek, preferences, &self.categories)
    }

    /// Rank the catalog using the configured thresholds
    pub fn rank(&self, catalog: &[Trek], preferences: &PreferenceSet) -> Vec<MatchResult> {
        self.rank_with(catalog, preferences, self.thresholds)
    }

    /// Rank the catalog with explicit thresholds
    ///
    /// # Arguments
    /// * `catalog` - Treks to consider, in catalog order
    /// * `preferences` - The user's answers
    /// * `thresholds` - Minimum score to keep and maximum number of results
    ///
    /// # Returns
    /// At most `thresholds.limit` matches in non-increasing score order
    pub fn rank_with(
        &self,
        catalog: &[Trek],
        preferences: &PreferenceSet,
        thresholds: RankThresholds,
    ) -> Vec<MatchResult> {
        let mut matches: Vec<MatchResult> = catalog
            .iter()
            .filter_map(|trek| {
                let breakdown = self.score(trek, preferences);

                if breakdown.score >= thresholds.minimum {
                    Some(MatchResult {
                        trek: trek.clone(),
                        match_score: breakdown.score,
                        reason: breakdown.reason,
                        reasons: breakdown.reasons,
                    })
                } else {
                    None
                }
            })
            .collect();

        // Stable sort: equal scores keep their catalog order
        matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
        matches.truncate(thresholds.limit);

        tracing::debug!(
            "Ranked {} of {} treks (minimum {}, limit {})",
            matches.len(),
            catalog.len(),
            thresholds.minimum,
            thresholds.limit
        );

        matches
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_tables()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AgeGroup, Experience, FitnessLevel, HealthIssue, TrekType};

    fn create_preferences() -> PreferenceSet {
        PreferenceSet {
            age_group: AgeGroup::Over60,
            health_issues: vec![HealthIssue::NoneDeclared],
            fitness_level: FitnessLevel::Low,
            experience: Experience::FirstTime,
            trek_type_interests: vec![TrekType::EasyShort],
        }
    }

    #[test]
    fn test_rank_filters_and_sorts() {
        let matcher = Matcher::with_default_tables();
        let catalog = vec![
            Trek::new("Torna Fort", Some("Hard")),       // 5 + 20 = 25
            Trek::new("Rajgad Fort", Some("Moderate")),  // 5 + 20 + 10 + 15 = 50
            Trek::new("Karnala Fort", Some("Easy")),     // 100
        ];

        let result = matcher.rank(&catalog, &create_preferences());

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].trek.name, "Karnala Fort");
        assert_eq!(result[0].match_score, 100);
        assert_eq!(result[1].trek.name, "Rajgad Fort");
        assert_eq!(result[1].match_score, 50);
    }

    #[test]
    fn test_ties_keep_catalog_order() {
        let matcher = Matcher::with_default_tables();
        let catalog = vec![
            Trek::new("Sondai Fort", Some("Easy")),
            Trek::new("Karnala Fort", Some("Easy")),
            Trek::new("Kalu Waterfall", Some("Easy")),
        ];

        let result = matcher.rank(&catalog, &create_preferences());
        let names: Vec<&str> = result.iter().map(|m| m.trek.name.as_str()).collect();

        assert_eq!(names, vec!["Sondai Fort", "Karnala Fort", "Kalu Waterfall"]);
        assert!(result.iter().all(|m| m.match_score == 100));
    }

    #[test]
    fn test_respects_limit() {
        let matcher = Matcher::with_default_tables();
        let catalog: Vec<Trek> = (0..20)
            .map(|i| Trek::new(format!("Hill {}", i), Some("Easy")))
            .collect();

        let result = matcher.rank_with(
            &catalog,
            &create_preferences(),
            RankThresholds {
                minimum: 0,
                limit: 5,
            },
        );

        assert_eq!(result.len(), 5);
        assert_eq!(result[0].trek.name, "Hill 0");
    }

    #[test]
    fn test_empty_catalog() {
        let matcher = Matcher::default();
        assert!(matcher.rank(&[], &create_preferences()).is_empty());
    }
}
