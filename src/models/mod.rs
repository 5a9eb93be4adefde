// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AgeGroup, Experience, FitnessLevel, HealthIssue, MatchResult, PreferenceSet, RankThresholds,
    Trek, TrekType, DEFAULT_DIFFICULTY,
};
pub use requests::{TrekMatchRequest, WeatherQuery};
pub use responses::{ErrorResponse, HealthResponse, TrekListResponse, TrekMatchResponse};
