use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::SearchCriteria;

/// Request to create a relation from the path profile to a target
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RelationRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "target_id", rename = "targetId")]
    pub target_id: i64,
}

/// Request to draw random match candidates
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RandomMatchesRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "profile_id", rename = "profileId")]
    pub profile_id: i64,
    #[validate(range(min = 1))]
    #[serde(alias = "search_id", rename = "searchId", default)]
    pub search_id: Option<i64>,
}

/// Request to store a saved search for the path profile
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSearchRequest {
    #[validate(range(min = 18, max = 100))]
    #[serde(rename = "minAge", default)]
    pub min_age: Option<i32>,
    #[validate(range(min = 18, max = 100))]
    #[serde(rename = "maxAge", default)]
    pub max_age: Option<i32>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(rename = "interestedIn", default)]
    pub interested_in: Option<String>,
    #[validate(length(equal = 5))]
    #[serde(default)]
    pub zipcode: Option<String>,
    #[validate(range(min = 36, max = 90))]
    #[serde(rename = "minHeightIn", default)]
    pub min_height_in: Option<i32>,
    #[validate(range(min = 36, max = 90))]
    #[serde(rename = "maxHeightIn", default)]
    pub max_height_in: Option<i32>,
}

impl From<CreateSearchRequest> for SearchCriteria {
    fn from(req: CreateSearchRequest) -> Self {
        SearchCriteria {
            min_age: req.min_age,
            max_age: req.max_age,
            sex: req.sex,
            interested_in: req.interested_in,
            zipcode: req.zipcode,
            min_height_in: req.min_height_in,
            max_height_in: req.max_height_in,
        }
    }
}

/// Request to toggle a profile's global opt-out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetHiddenRequest {
    pub hidden: bool,
}
