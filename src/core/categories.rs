//! Static reference data used to classify treks.
//!
//! Categories map a tag to the set of trek names that belong to it, and
//! difficulty tiers map a tier to the difficulty labels that fall into it.
//! Lookups are exact string matches. The bundled defaults can be replaced by
//! a TOML file of the form:
//!
//! ```toml
//! [categories]
//! easy = ["Karnala Fort"]
//! waterfall = ["Randha Falls"]
//!
//! [difficulty]
//! easy = ["Easy", "Easy–Moderate"]
//! moderate = ["Moderate"]
//! hard = ["Hard", "Challenging"]
//! ```

use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading category tables
#[derive(Debug, Error)]
pub enum CategoryError {
    #[error("Failed to read category file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid category file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Name-based trek category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrekCategory {
    Easy,
    Waterfall,
    Fort,
    Adventure,
    Scenic,
}

/// Difficulty band a label belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DifficultyTier {
    Easy,
    Moderate,
    Hard,
}

const EASY_TREKS: &[&str] = &[
    "Karnala Fort",
    "Arthur's Seat Trail",
    "Peb–Matheran One Tree Hill",
];

const WATERFALL_TREKS: &[&str] = &[
    "Devkund Waterfall",
    "Randha Falls",
    "Thoseghar Waterfalls",
    "Kalu Waterfall",
    "Nanemachi Waterfall",
];

const FORT_TREKS: &[&str] = &[
    "Rajgad Fort",
    "Lohagad-Visapur Fort",
    "Tikona Fort",
    "Torna Fort",
    "Rajmachi Fort",
    "Irshalgad Fort",
    "Sondai Fort",
    "Harihar Fort",
    "Ratangad Fort",
    "Ajinkyatara–Sajjangad Forts",
    "Harishchandragad Fort",
    "Prabalgad–Kalavantin Durg",
];

const ADVENTURE_TREKS: &[&str] = &[
    "Kalsubai Peak",
    "Alang–Madan–Kulang (AMK) Forts",
    "Harishchandragad Fort",
    "Anjaneri–Brahmagiri Hills",
    "Andharban Jungle Trek",
    "Adrai Jungle Trek",
];

// Waterfalls are scenic as well; they are merged in by `Default`.
const SCENIC_TREKS: &[&str] = &["Kaas Plateau", "Savlya Ghat", "Duke's Nose"];

const EASY_LABELS: &[&str] = &["Easy", "Easy–Moderate"];
const MODERATE_LABELS: &[&str] = &["Moderate"];
const HARD_LABELS: &[&str] = &["Hard", "Challenging"];

/// Lookup tables mapping trek names to categories and labels to tiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrekCategories {
    members: HashMap<TrekCategory, HashSet<String>>,
    tiers: HashMap<DifficultyTier, HashSet<String>>,
}

impl TrekCategories {
    /// Create empty tables; nothing is categorised until entries are added.
    pub fn empty() -> Self {
        Self {
            members: HashMap::new(),
            tiers: HashMap::new(),
        }
    }

    /// Add trek names to a category while consuming `self`.
    pub fn with_category<I, S>(mut self, category: TrekCategory, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members
            .entry(category)
            .or_default()
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Add difficulty labels to a tier while consuming `self`.
    pub fn with_tier<I, S>(mut self, tier: DifficultyTier, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tiers
            .entry(tier)
            .or_default()
            .extend(labels.into_iter().map(Into::into));
        self
    }

    pub fn contains(&self, category: TrekCategory, trek_name: &str) -> bool {
        self.members
            .get(&category)
            .is_some_and(|names| names.contains(trek_name))
    }

    /// Tier for a difficulty label, if the label is known
    pub fn tier_of(&self, label: &str) -> Option<DifficultyTier> {
        [DifficultyTier::Easy, DifficultyTier::Moderate, DifficultyTier::Hard]
            .into_iter()
            .find(|tier| {
                self.tiers
                    .get(tier)
                    .is_some_and(|labels| labels.contains(label))
            })
    }

    /// Number of trek names listed under a category
    pub fn category_len(&self, category: TrekCategory) -> usize {
        self.members.get(&category).map_or(0, HashSet::len)
    }

    /// Parse tables from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, CategoryError> {
        let file: CategoryFile = toml::from_str(contents)?;
        Ok(file.into())
    }

    /// Load tables from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CategoryError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let categories = Self::from_toml_str(&contents)?;
        tracing::debug!("Loaded category tables from {}", path.as_ref().display());
        Ok(categories)
    }
}

impl Default for TrekCategories {
    fn default() -> Self {
        Self::empty()
            .with_category(TrekCategory::Easy, EASY_TREKS.iter().copied())
            .with_category(TrekCategory::Waterfall, WATERFALL_TREKS.iter().copied())
            .with_category(TrekCategory::Fort, FORT_TREKS.iter().copied())
            .with_category(TrekCategory::Adventure, ADVENTURE_TREKS.iter().copied())
            .with_category(TrekCategory::Scenic, SCENIC_TREKS.iter().copied())
            .with_category(TrekCategory::Scenic, WATERFALL_TREKS.iter().copied())
            .with_tier(DifficultyTier::Easy, EASY_LABELS.iter().copied())
            .with_tier(DifficultyTier::Moderate, MODERATE_LABELS.iter().copied())
            .with_tier(DifficultyTier::Hard, HARD_LABELS.iter().copied())
    }
}

#[derive(Debug, Default, Deserialize)]
struct CategoryFile {
    #[serde(default)]
    categories: CategoryLists,
    #[serde(default)]
    difficulty: TierLists,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CategoryLists {
    easy: Vec<String>,
    waterfall: Vec<String>,
    fort: Vec<String>,
    adventure: Vec<String>,
    scenic: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TierLists {
    easy: Vec<String>,
    moderate: Vec<String>,
    hard: Vec<String>,
}

impl From<CategoryFile> for TrekCategories {
    fn from(file: CategoryFile) -> Self {
        let CategoryFile {
            categories,
            difficulty,
        } = file;

        Self::empty()
            .with_category(TrekCategory::Easy, categories.easy)
            .with_category(TrekCategory::Waterfall, categories.waterfall)
            .with_category(TrekCategory::Fort, categories.fort)
            .with_category(TrekCategory::Adventure, categories.adventure)
            .with_category(TrekCategory::Scenic, categories.scenic)
            .with_tier(DifficultyTier::Easy, difficulty.easy)
            .with_tier(DifficultyTier::Moderate, difficulty.moderate)
            .with_tier(DifficultyTier::Hard, difficulty.hard)
    }
}
