use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque profile identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileId(pub i64);

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Saved search identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchId(pub i64);

impl fmt::Display for SearchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user's dating profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "nickName")]
    pub nick_name: String,
    pub age: i32,
    pub sex: String,
    #[serde(rename = "interestedIn")]
    pub interested_in: String,
    pub zipcode: String,
    #[serde(rename = "heightIn")]
    pub height_in: i32,
    /// Opted out of browsing entirely: invisible to everyone
    #[serde(default)]
    pub hidden: bool,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Attributes for a profile that has not been stored yet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProfile {
    #[serde(rename = "userId")]
    pub user_id: i64,
    #[serde(rename = "nickName")]
    pub nick_name: String,
    pub age: i32,
    pub sex: String,
    #[serde(rename = "interestedIn")]
    pub interested_in: String,
    pub zipcode: String,
    #[serde(rename = "heightIn", default = "default_height_in")]
    pub height_in: i32,
    #[serde(default)]
    pub hidden: bool,
}

fn default_height_in() -> i32 { 65 }

/// Kind tag of a directed relation between two profiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    Hide,
    Wink,
    Favorite,
    View,
}

impl RelationKind {
    /// Winks and favorites exist at most once per ordered pair.
    pub fn is_unique(self) -> bool {
        matches!(self, RelationKind::Wink | RelationKind::Favorite)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::Hide => "hide",
            RelationKind::Wink => "wink",
            RelationKind::Favorite => "favorite",
            RelationKind::View => "view",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RelationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hide" => Ok(RelationKind::Hide),
            "wink" => Ok(RelationKind::Wink),
            "favorite" => Ok(RelationKind::Favorite),
            "view" => Ok(RelationKind::View),
            other => Err(format!("unknown relation kind: {}", other)),
        }
    }
}

/// Directed relation row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relation {
    #[serde(rename = "sourceId")]
    pub source_id: ProfileId,
    #[serde(rename = "targetId")]
    pub target_id: ProfileId,
    pub kind: RelationKind,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Attribute constraints of a saved search. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCriteria {
    #[serde(rename = "minAge", default)]
    pub min_age: Option<i32>,
    #[serde(rename = "maxAge", default)]
    pub max_age: Option<i32>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(rename = "interestedIn", default)]
    pub interested_in: Option<String>,
    #[serde(default)]
    pub zipcode: Option<String>,
    #[serde(rename = "minHeightIn", default)]
    pub min_height_in: Option<i32>,
    #[serde(rename = "maxHeightIn", default)]
    pub max_height_in: Option<i32>,
}

/// A profile's saved search. `id` is `None` while the search is transient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedSearch {
    #[serde(default)]
    pub id: Option<SearchId>,
    #[serde(rename = "ownerId")]
    pub owner_id: ProfileId,
    pub criteria: SearchCriteria,
}

impl SavedSearch {
    /// A search that has not been stored
    pub fn transient(owner_id: ProfileId, criteria: SearchCriteria) -> Self {
        Self {
            id: None,
            owner_id,
            criteria,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_kinds() {
        assert!(RelationKind::Wink.is_unique());
        assert!(RelationKind::Favorite.is_unique());
        assert!(!RelationKind::Hide.is_unique());
        assert!(!RelationKind::View.is_unique());
    }

    #[test]
    fn test_relation_kind_parse() {
        assert_eq!("Favorite".parse::<RelationKind>(), Ok(RelationKind::Favorite));
        assert_eq!("hide".parse::<RelationKind>(), Ok(RelationKind::Hide));
        assert!("poke".parse::<RelationKind>().is_err());
    }

    #[test]
    fn test_transient_search() {
        let search = SavedSearch::transient(ProfileId(1), SearchCriteria::default());
        assert!(!search.is_persisted());

        let stored = SavedSearch { id: Some(SearchId(4)), ..search };
        assert!(stored.is_persisted());
    }

    #[test]
    fn test_new_profile_defaults() {
        let json = r#"{"userId":1,"nickName":"sam","age":30,"sex":"Male","interestedIn":"Female","zipcode":"12345"}"#;
        let profile: NewProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.height_in, 65);
        assert!(!profile.hidden);
    }
}
