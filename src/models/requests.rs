use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{
    AgeGroup, Experience, FitnessLevel, HealthIssue, PreferenceSet, TrekType,
};

/// Request to rank the catalog against a user's answers
///
/// Fields arrive as raw form values; see [`TrekMatchRequest::preferences`]
/// for how they are coerced.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TrekMatchRequest {
    #[serde(default)]
    pub age_group: Option<String>,
    #[serde(default)]
    pub health_issues: Vec<String>,
    #[serde(default)]
    pub fitness_level: Option<String>,
    #[serde(default)]
    pub experience: Option<String>,
    #[serde(default, alias = "trek_types")]
    pub trek_type: Vec<String>,
    #[validate(range(max = 100))]
    #[serde(default)]
    pub minimum: Option<u8>,
    #[validate(range(min = 1, max = 50))]
    #[serde(default)]
    pub limit: Option<usize>,
}

impl TrekMatchRequest {
    /// Build the preference set the engine consumes
    ///
    /// Unknown or missing single-select answers fall back to the enum
    /// defaults. Unknown multi-select tags are dropped and repeats collapsed.
    pub fn preferences(&self) -> PreferenceSet {
        PreferenceSet {
            age_group: self
                .age_group
                .as_deref()
                .and_then(AgeGroup::from_tag)
                .unwrap_or_default(),
            health_issues: collect_tags(&self.health_issues, HealthIssue::from_tag),
            fitness_level: self
                .fitness_level
                .as_deref()
                .and_then(FitnessLevel::from_tag)
                .unwrap_or_default(),
            experience: self
                .experience
                .as_deref()
                .and_then(Experience::from_tag)
                .unwrap_or_default(),
            trek_type_interests: collect_tags(&self.trek_type, TrekType::from_tag),
        }
    }
}

fn collect_tags<T, F>(raw: &[String], parse: F) -> Vec<T>
where
    T: PartialEq,
    F: Fn(&str) -> Option<T>,
{
    let mut tags = Vec::with_capacity(raw.len());
    for tag in raw.iter().filter_map(|value| parse(value.trim())) {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

/// Query parameters for the weather endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct WeatherQuery {
    #[validate(length(max = 200))]
    pub city: Option<String>,
    #[validate(length(max = 200))]
    pub region: Option<String>,
}
