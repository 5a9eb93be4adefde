use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, Trek};

/// Response for the trek match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrekMatchResponse {
    pub matches: Vec<MatchResult>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Response for the catalog listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrekListResponse {
    pub treks: Vec<Trek>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub treks: usize,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
