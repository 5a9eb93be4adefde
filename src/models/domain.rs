use serde::{Deserialize, Serialize};

/// Difficulty assumed for treks whose record carries no label
pub const DEFAULT_DIFFICULTY: &str = "Moderate";

/// Trek record as supplied by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trek {
    pub name: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(rename = "baseVillage", alias = "base_village", default)]
    pub base_village: Option<String>,
}

impl Trek {
    pub fn new(name: impl Into<String>, difficulty: Option<&str>) -> Self {
        Self {
            name: name.into(),
            difficulty: difficulty.map(str::to_string),
            region: None,
            base_village: None,
        }
    }

    /// Difficulty label, falling back to "Moderate" when absent or blank
    pub fn difficulty_label(&self) -> &str {
        self.difficulty
            .as_deref()
            .filter(|label| !label.is_empty())
            .unwrap_or(DEFAULT_DIFFICULTY)
    }
}

/// Age bracket declared by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "under_18")]
    Under18,
    #[serde(rename = "18_40")]
    From18To40,
    #[serde(rename = "41_60")]
    From41To60,
    #[default]
    #[serde(rename = "over_60")]
    Over60,
}

impl AgeGroup {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "under_18" => Some(Self::Under18),
            "18_40" => Some(Self::From18To40),
            "41_60" => Some(Self::From41To60),
            "over_60" => Some(Self::Over60),
            _ => None,
        }
    }
}

/// Health condition tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthIssue {
    /// "none": the user reported no conditions
    #[serde(rename = "none")]
    NoneDeclared,
    AsthmaBreathing,
    HeartBp,
    SurgeryInjury,
    Diabetes,
    JointKnee,
}

impl HealthIssue {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "none" => Some(Self::NoneDeclared),
            "asthma_breathing" => Some(Self::AsthmaBreathing),
            "heart_bp" => Some(Self::HeartBp),
            "surgery_injury" => Some(Self::SurgeryInjury),
            "diabetes" => Some(Self::Diabetes),
            "joint_knee" => Some(Self::JointKnee),
            _ => None,
        }
    }

    /// Conditions that restrict the user to gentle treks
    pub fn is_critical(self) -> bool {
        matches!(self, Self::AsthmaBreathing | Self::HeartBp | Self::SurgeryInjury)
    }

    pub fn is_moderate(self) -> bool {
        matches!(self, Self::Diabetes | Self::JointKnee)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitnessLevel {
    Low,
    Medium,
    #[default]
    High,
}

impl FitnessLevel {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Experience {
    FirstTime,
    FewTreks,
    #[default]
    Experienced,
}

impl Experience {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "first_time" => Some(Self::FirstTime),
            "few_treks" => Some(Self::FewTreks),
            "experienced" => Some(Self::Experienced),
            _ => None,
        }
    }
}

/// Kind of trek the user is interested in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrekType {
    EasyShort,
    ScenicWaterfall,
    FortHistory,
    AdventureLong,
}

impl TrekType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "easy_short" => Some(Self::EasyShort),
            "scenic_waterfall" => Some(Self::ScenicWaterfall),
            "fort_history" => Some(Self::FortHistory),
            "adventure_long" => Some(Self::AdventureLong),
            _ => None,
        }
    }
}

/// User preferences for one matching request
///
/// Multi-select fields keep the order in which the user picked the tags and
/// hold each tag at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceSet {
    #[serde(rename = "ageGroup")]
    pub age_group: AgeGroup,
    #[serde(rename = "healthIssues", default)]
    pub health_issues: Vec<HealthIssue>,
    #[serde(rename = "fitnessLevel")]
    pub fitness_level: FitnessLevel,
    pub experience: Experience,
    #[serde(rename = "trekTypeInterests", default)]
    pub trek_type_interests: Vec<TrekType>,
}

/// Scored trek returned by the ranking pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub trek: Trek,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    pub reason: String,
    /// Every reason produced while scoring, in evaluation order
    #[serde(default)]
    pub reasons: Vec<String>,
}

/// Ranking cut-offs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankThresholds {
    pub minimum: u8,
    pub limit: usize,
}

impl Default for RankThresholds {
    fn default() -> Self {
        Self {
            minimum: 40,
            limit: 6,
        }
    }
}
