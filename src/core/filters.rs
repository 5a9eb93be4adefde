use crate::core::categories::{DifficultyTier, TrekCategories, TrekCategory};
use crate::models::{Trek, TrekType};

/// Static classification of a single trek
///
/// Derived from the trek's name and difficulty label only, so every trek can
/// be classified (and scored) independently of the rest of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrekProfile {
    pub tier: Option<DifficultyTier>,
    pub easy: bool,
    pub waterfall: bool,
    pub fort: bool,
    pub adventure: bool,
    pub scenic: bool,
}

impl TrekProfile {
    pub fn classify(trek: &Trek, categories: &TrekCategories) -> Self {
        let name = trek.name.as_str();
        Self {
            tier: categories.tier_of(trek.difficulty_label()),
            easy: categories.contains(TrekCategory::Easy, name),
            waterfall: categories.contains(TrekCategory::Waterfall, name),
            fort: categories.contains(TrekCategory::Fort, name),
            adventure: categories.contains(TrekCategory::Adventure, name),
            scenic: categories.contains(TrekCategory::Scenic, name),
        }
    }

    /// Easy by tier or listed as an easy trek
    #[inline]
    pub fn is_gentle(&self) -> bool {
        self.easy || self.tier == Some(DifficultyTier::Easy)
    }

    #[inline]
    pub fn is_moderate_tier(&self) -> bool {
        self.tier == Some(DifficultyTier::Moderate)
    }

    #[inline]
    pub fn is_hard_tier(&self) -> bool {
        self.tier == Some(DifficultyTier::Hard)
    }

    #[inline]
    pub fn is_easy_or_moderate_tier(&self) -> bool {
        matches!(self.tier, Some(DifficultyTier::Easy | DifficultyTier::Moderate))
    }
}

/// Check whether a trek fits one of the user's trek-type interests
#[inline]
pub fn matches_interest(profile: &TrekProfile, interest: TrekType) -> bool {
    match interest {
        TrekType::EasyShort => profile.is_gentle(),
        TrekType::ScenicWaterfall => profile.scenic,
        TrekType::FortHistory => profile.fort,
        TrekType::AdventureLong => profile.adventure || profile.is_hard_tier(),
    }
}
