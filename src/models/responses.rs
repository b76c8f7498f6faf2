use serde::{Deserialize, Serialize};
use crate::models::domain::{Profile, Relation};

/// Response carrying a list of profiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfilesResponse {
    pub profiles: Vec<Profile>,
    pub total: usize,
}

impl From<Vec<Profile>> for ProfilesResponse {
    fn from(profiles: Vec<Profile>) -> Self {
        Self {
            total: profiles.len(),
            profiles,
        }
    }
}

/// Response for relation creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelationResponse {
    pub success: bool,
    pub relation: Relation,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
