use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::core::filters::matches_criteria;
use crate::error::{Error, Result};
use crate::models::{NewProfile, Profile, ProfileId, Relation, RelationKind, SavedSearch, SearchCriteria, SearchId};
use crate::services::store::{ProfileStore, RelationStore, SearchStore};

type RelationKey = (ProfileId, ProfileId, RelationKind);

#[derive(Default)]
struct Inner {
    next_profile_id: i64,
    next_search_id: i64,
    profiles: HashMap<ProfileId, Profile>,
    relations: HashMap<RelationKey, DateTime<Utc>>,
    searches: HashMap<SearchId, SavedSearch>,
}

impl Inner {
    fn ensure_profile(&self, id: ProfileId) -> Result<()> {
        if self.profiles.contains_key(&id) {
            Ok(())
        } else {
            Err(Error::ProfileNotFound(id))
        }
    }

    /// Newest first, ties by descending ID
    fn ordered<'a>(&self, profiles: impl Iterator<Item = &'a Profile>) -> Vec<Profile> {
        let mut out: Vec<Profile> = profiles.cloned().collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        out
    }
}

/// In-process store implementing every store trait
///
/// One lock guards all tables, so the per-pair uniqueness checks are
/// serialized the way a database constraint would serialize them.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored relation rows of `kind`
    pub async fn relation_count(&self, kind: RelationKind) -> usize {
        let inner = self.inner.read().await;
        inner.relations.keys().filter(|(_, _, k)| *k == kind).count()
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn insert_profile(&self, profile: NewProfile) -> Result<Profile> {
        let mut inner = self.inner.write().await;
        inner.next_profile_id += 1;
        let id = ProfileId(inner.next_profile_id);

        let stored = Profile {
            id,
            user_id: profile.user_id,
            nick_name: profile.nick_name,
            age: profile.age,
            sex: profile.sex,
            interested_in: profile.interested_in,
            zipcode: profile.zipcode,
            height_in: profile.height_in,
            hidden: profile.hidden,
            created_at: Utc::now(),
        };
        inner.profiles.insert(id, stored.clone());

        tracing::debug!("Inserted profile {}", id);
        Ok(stored)
    }

    async fn get_profile(&self, id: ProfileId) -> Result<Option<Profile>> {
        Ok(self.inner.read().await.profiles.get(&id).cloned())
    }

    async fn list_unhidden(&self) -> Result<Vec<Profile>> {
        let inner = self.inner.read().await;
        Ok(inner.ordered(inner.profiles.values().filter(|p| !p.hidden)))
    }

    async fn get_profiles(&self, ids: &[ProfileId]) -> Result<Vec<Profile>> {
        let inner = self.inner.read().await;
        Ok(inner.ordered(ids.iter().filter_map(|id| inner.profiles.get(id))))
    }

    async fn set_hidden(&self, id: ProfileId, hidden: bool) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.profiles.get_mut(&id) {
            Some(profile) => {
                profile.hidden = hidden;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_profile(&self, id: ProfileId) -> Result<bool> {
        let mut inner = self.inner.write().await;
        if inner.profiles.remove(&id).is_none() {
            return Ok(false);
        }

        let before = inner.relations.len();
        inner.relations.retain(|(source, target, _), _| *source != id && *target != id);
        let removed_relations = before - inner.relations.len();
        inner.searches.retain(|_, search| search.owner_id != id);

        tracing::info!("Deleted profile {} and {} relations", id, removed_relations);
        Ok(true)
    }
}

#[async_trait]
impl RelationStore for MemoryStore {
    async fn create_relation(
        &self,
        source: ProfileId,
        target: ProfileId,
        kind: RelationKind,
    ) -> Result<Relation> {
        let mut inner = self.inner.write().await;
        inner.ensure_profile(source)?;
        inner.ensure_profile(target)?;

        let key = (source, target, kind);
        let now = Utc::now();
        let existing = inner.relations.get(&key).copied();
        let created_at = match (existing, kind) {
            (Some(_), k) if k.is_unique() => {
                return Err(Error::ConstraintViolation {
                    kind,
                    source_id: source,
                    target_id: target,
                });
            }
            (Some(existing), RelationKind::Hide) => existing,
            _ => {
                inner.relations.insert(key, now);
                now
            }
        };

        Ok(Relation {
            source_id: source,
            target_id: target,
            kind,
            created_at,
        })
    }

    async fn find_relation(
        &self,
        source: ProfileId,
        target: ProfileId,
        kind: RelationKind,
    ) -> Result<Option<Relation>> {
        let inner = self.inner.read().await;
        Ok(inner.relations.get(&(source, target, kind)).map(|created_at| Relation {
            source_id: source,
            target_id: target,
            kind,
            created_at: *created_at,
        }))
    }

    async fn delete_relation(
        &self,
        source: ProfileId,
        target: ProfileId,
        kind: RelationKind,
    ) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.relations.remove(&(source, target, kind)).is_some())
    }

    async fn targets_of(&self, source: ProfileId, kind: RelationKind) -> Result<Vec<ProfileId>> {
        let inner = self.inner.read().await;
        let mut ids: Vec<ProfileId> = inner
            .relations
            .keys()
            .filter(|(s, _, k)| *s == source && *k == kind)
            .map(|(_, t, _)| *t)
            .collect();
        ids.sort();
        Ok(ids)
    }

    async fn sources_of(&self, target: ProfileId, kind: RelationKind) -> Result<Vec<ProfileId>> {
        let inner = self.inner.read().await;
        let mut ids: Vec<ProfileId> = inner
            .relations
            .keys()
            .filter(|(_, t, k)| *t == target && *k == kind)
            .map(|(s, _, _)| *s)
            .collect();
        ids.sort();
        Ok(ids)
    }
}

#[async_trait]
impl SearchStore for MemoryStore {
    async fn create_search(&self, owner: ProfileId, criteria: SearchCriteria) -> Result<SavedSearch> {
        let mut inner = self.inner.write().await;
        inner.ensure_profile(owner)?;
        inner.next_search_id += 1;
        let id = SearchId(inner.next_search_id);

        let search = SavedSearch {
            id: Some(id),
            owner_id: owner,
            criteria,
        };
        inner.searches.insert(id, search.clone());
        Ok(search)
    }

    async fn get_search(&self, id: SearchId) -> Result<Option<SavedSearch>> {
        Ok(self.inner.read().await.searches.get(&id).cloned())
    }

    async fn resolve_search(&self, criteria: &SearchCriteria, limit: usize) -> Result<Vec<Profile>> {
        let inner = self.inner.read().await;
        let mut matched = inner.ordered(
            inner
                .profiles
                .values()
                .filter(|p| !p.hidden && matches_criteria(p, criteria)),
        );
        matched.truncate(limit);
        Ok(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_profile(nick: &str, age: i32) -> NewProfile {
        NewProfile {
            user_id: 1,
            nick_name: nick.to_string(),
            age,
            sex: "Female".to_string(),
            interested_in: "Male".to_string(),
            zipcode: "02139".to_string(),
            height_in: 64,
            hidden: false,
        }
    }

    #[tokio::test]
    async fn test_hide_is_idempotent() {
        let store = MemoryStore::new();
        let a = store.insert_profile(new_profile("a", 30)).await.unwrap();
        let b = store.insert_profile(new_profile("b", 30)).await.unwrap();

        let first = store.create_relation(a.id, b.id, RelationKind::Hide).await.unwrap();
        let second = store.create_relation(a.id, b.id, RelationKind::Hide).await.unwrap();

        assert_eq!(first.created_at, second.created_at);
        assert_eq!(store.targets_of(a.id, RelationKind::Hide).await.unwrap(), vec![b.id]);
        assert_eq!(store.relation_count(RelationKind::Hide).await, 1);
    }

    #[tokio::test]
    async fn test_wink_is_unique() {
        let store = MemoryStore::new();
        let a = store.insert_profile(new_profile("a", 30)).await.unwrap();
        let b = store.insert_profile(new_profile("b", 30)).await.unwrap();

        store.create_relation(a.id, b.id, RelationKind::Wink).await.unwrap();
        let err = store.create_relation(a.id, b.id, RelationKind::Wink).await.unwrap_err();

        assert!(matches!(err, Error::ConstraintViolation { kind: RelationKind::Wink, .. }));
        assert_eq!(store.relation_count(RelationKind::Wink).await, 1);
        // Reverse direction is a different pair
        store.create_relation(b.id, a.id, RelationKind::Wink).await.unwrap();
    }

    #[tokio::test]
    async fn test_relation_to_unknown_profile() {
        let store = MemoryStore::new();
        let a = store.insert_profile(new_profile("a", 30)).await.unwrap();

        let err = store
            .create_relation(a.id, ProfileId(404), RelationKind::Favorite)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ProfileNotFound(ProfileId(404))));
    }

    #[tokio::test]
    async fn test_delete_cascades() {
        let store = MemoryStore::new();
        let a = store.insert_profile(new_profile("a", 30)).await.unwrap();
        let b = store.insert_profile(new_profile("b", 30)).await.unwrap();
        let c = store.insert_profile(new_profile("c", 30)).await.unwrap();

        store.create_relation(a.id, b.id, RelationKind::Hide).await.unwrap();
        store.create_relation(c.id, a.id, RelationKind::View).await.unwrap();
        store.create_relation(b.id, c.id, RelationKind::Wink).await.unwrap();
        let search = store.create_search(a.id, SearchCriteria::default()).await.unwrap();

        assert!(store.delete_profile(a.id).await.unwrap());
        assert!(!store.delete_profile(a.id).await.unwrap());

        assert!(store.sources_of(b.id, RelationKind::Hide).await.unwrap().is_empty());
        assert!(store.targets_of(c.id, RelationKind::View).await.unwrap().is_empty());
        assert_eq!(store.relation_count(RelationKind::Wink).await, 1);
        assert!(store.get_search(search.id.unwrap()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_saved_searches_get_distinct_ids() {
        let store = MemoryStore::new();
        let a = store.insert_profile(new_profile("a", 30)).await.unwrap();

        let first = store.create_search(a.id, SearchCriteria::default()).await.unwrap();
        let second = store
            .create_search(a.id, SearchCriteria { min_age: Some(40), ..Default::default() })
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        let stored = store.get_search(second.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(stored.id, second.id);
        assert_eq!(stored.criteria.min_age, Some(40));
    }

    #[tokio::test]
    async fn test_resolve_search_caps_and_skips_hidden() {
        let store = MemoryStore::new();
        for i in 0..20 {
            store.insert_profile(new_profile(&format!("p{}", i), 25 + i % 2)).await.unwrap();
        }
        let hidden = store.insert_profile(new_profile("ghost", 25)).await.unwrap();
        store.set_hidden(hidden.id, true).await.unwrap();

        let criteria = SearchCriteria { max_age: Some(25), ..Default::default() };
        let resolved = store.resolve_search(&criteria, 15).await.unwrap();

        assert_eq!(resolved.len(), 10);
        assert!(resolved.iter().all(|p| p.age == 25 && !p.hidden));

        let all = store.resolve_search(&SearchCriteria::default(), 15).await.unwrap();
        assert_eq!(all.len(), 15);
    }
}
