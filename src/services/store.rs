use async_trait::async_trait;

use crate::error::Result;
use crate::models::{NewProfile, Profile, ProfileId, Relation, RelationKind, SavedSearch, SearchCriteria, SearchId};

/// Profile records
///
/// Listings are ordered newest first (ties broken by descending ID).
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn insert_profile(&self, profile: NewProfile) -> Result<Profile>;

    async fn get_profile(&self, id: ProfileId) -> Result<Option<Profile>>;

    /// Every profile with `hidden == false`
    async fn list_unhidden(&self) -> Result<Vec<Profile>>;

    /// Profiles for the given IDs; unknown IDs are skipped
    async fn get_profiles(&self, ids: &[ProfileId]) -> Result<Vec<Profile>>;

    /// Returns false if the profile does not exist
    async fn set_hidden(&self, id: ProfileId, hidden: bool) -> Result<bool>;

    /// Delete a profile along with every relation it takes part in and every
    /// search it owns. Returns false if the profile does not exist.
    async fn delete_profile(&self, id: ProfileId) -> Result<bool>;
}

/// Directed relations between profiles, partitioned by kind
///
/// Creation semantics per kind:
/// - wink, favorite: unique per ordered pair, a repeat is `ConstraintViolation`
/// - hide: a repeat is a no-op and keeps the original timestamp
/// - view: a repeat refreshes the timestamp
#[async_trait]
pub trait RelationStore: Send + Sync {
    async fn create_relation(
        &self,
        source: ProfileId,
        target: ProfileId,
        kind: RelationKind,
    ) -> Result<Relation>;

    async fn find_relation(
        &self,
        source: ProfileId,
        target: ProfileId,
        kind: RelationKind,
    ) -> Result<Option<Relation>>;

    /// Returns false if no such relation existed
    async fn delete_relation(
        &self,
        source: ProfileId,
        target: ProfileId,
        kind: RelationKind,
    ) -> Result<bool>;

    /// Targets of `source`'s outgoing relations of `kind`
    async fn targets_of(&self, source: ProfileId, kind: RelationKind) -> Result<Vec<ProfileId>>;

    /// Sources of the incoming relations of `kind` pointing at `target`
    async fn sources_of(&self, target: ProfileId, kind: RelationKind) -> Result<Vec<ProfileId>>;
}

/// Saved searches and their resolution to profiles
#[async_trait]
pub trait SearchStore: Send + Sync {
    async fn create_search(&self, owner: ProfileId, criteria: SearchCriteria) -> Result<SavedSearch>;

    async fn get_search(&self, id: SearchId) -> Result<Option<SavedSearch>>;

    /// Unhidden profiles matching `criteria`, newest first, at most `limit`
    async fn resolve_search(&self, criteria: &SearchCriteria, limit: usize) -> Result<Vec<Profile>>;
}
