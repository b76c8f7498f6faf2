use std::collections::HashSet;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{ProfileId, Relation, RelationKind};
use crate::services::RelationStore;

/// Directed relations between profiles: hides, winks, favorites and views
///
/// Thin typed layer over a [`RelationStore`]. Uniqueness and idempotency are
/// the store's job; the ledger only names the operations.
#[derive(Clone)]
pub struct RelationLedger {
    store: Arc<dyn RelationStore>,
}

impl RelationLedger {
    pub fn new(store: Arc<dyn RelationStore>) -> Self {
        Self { store }
    }

    /// Record that `source` hid `target`. Hiding again is a no-op.
    pub async fn create_hide(&self, source: ProfileId, target: ProfileId) -> Result<Relation> {
        let relation = self.store.create_relation(source, target, RelationKind::Hide).await?;
        tracing::info!("Profile {} hid profile {}", source, target);
        Ok(relation)
    }

    /// Profiles `profile` has hidden
    pub async fn hides_by(&self, profile: ProfileId) -> Result<HashSet<ProfileId>> {
        Ok(self
            .store
            .targets_of(profile, RelationKind::Hide)
            .await?
            .into_iter()
            .collect())
    }

    /// Profiles that have hidden `profile`
    pub async fn hidden_by(&self, profile: ProfileId) -> Result<HashSet<ProfileId>> {
        Ok(self
            .store
            .sources_of(profile, RelationKind::Hide)
            .await?
            .into_iter()
            .collect())
    }

    pub async fn has_hidden(&self, source: ProfileId, target: ProfileId) -> Result<bool> {
        self.exists(source, target, RelationKind::Hide).await
    }

    /// Fails with `ConstraintViolation` if `source` already winked at `target`
    pub async fn create_wink(&self, source: ProfileId, target: ProfileId) -> Result<Relation> {
        self.store.create_relation(source, target, RelationKind::Wink).await
    }

    pub async fn has_winked(&self, source: ProfileId, target: ProfileId) -> Result<bool> {
        self.exists(source, target, RelationKind::Wink).await
    }

    /// Fails with `ConstraintViolation` if `source` already favorited `target`
    pub async fn create_favorite(&self, source: ProfileId, target: ProfileId) -> Result<Relation> {
        self.store.create_relation(source, target, RelationKind::Favorite).await
    }

    pub async fn has_favorited(&self, source: ProfileId, target: ProfileId) -> Result<bool> {
        self.exists(source, target, RelationKind::Favorite).await
    }

    /// Record that `viewer` looked at `viewed`; repeat views refresh the time
    pub async fn record_view(&self, viewer: ProfileId, viewed: ProfileId) -> Result<Relation> {
        self.store.create_relation(viewer, viewed, RelationKind::View).await
    }

    /// Profiles `profile` has viewed
    pub async fn viewed_profiles(&self, profile: ProfileId) -> Result<Vec<ProfileId>> {
        self.store.targets_of(profile, RelationKind::View).await
    }

    /// Profiles that have viewed `profile`
    pub async fn viewed_by(&self, profile: ProfileId) -> Result<Vec<ProfileId>> {
        self.store.sources_of(profile, RelationKind::View).await
    }

    /// Remove a relation of any kind. Returns false if there was none.
    pub async fn revoke(&self, kind: RelationKind, source: ProfileId, target: ProfileId) -> Result<bool> {
        let removed = self.store.delete_relation(source, target, kind).await?;
        if removed {
            tracing::debug!("Revoked {}: {} -> {}", kind, source, target);
        }
        Ok(removed)
    }

    async fn exists(&self, source: ProfileId, target: ProfileId, kind: RelationKind) -> Result<bool> {
        Ok(self.store.find_relation(source, target, kind).await?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::models::NewProfile;
    use crate::services::{MemoryStore, ProfileStore};

    async fn setup(count: usize) -> (Arc<MemoryStore>, RelationLedger, Vec<ProfileId>) {
        let store = Arc::new(MemoryStore::new());
        let mut ids = Vec::new();
        for i in 0..count {
            let profile = store
                .insert_profile(NewProfile {
                    user_id: i as i64,
                    nick_name: format!("p{}", i),
                    age: 30,
                    sex: "Female".to_string(),
                    interested_in: "Both".to_string(),
                    zipcode: "30301".to_string(),
                    height_in: 65,
                    hidden: false,
                })
                .await
                .unwrap();
            ids.push(profile.id);
        }
        let ledger = RelationLedger::new(store.clone());
        (store, ledger, ids)
    }

    #[tokio::test]
    async fn test_hide_directions() {
        let (_, ledger, ids) = setup(3).await;
        ledger.create_hide(ids[0], ids[1]).await.unwrap();
        ledger.create_hide(ids[2], ids[0]).await.unwrap();

        assert_eq!(ledger.hides_by(ids[0]).await.unwrap(), HashSet::from([ids[1]]));
        assert_eq!(ledger.hidden_by(ids[0]).await.unwrap(), HashSet::from([ids[2]]));
        assert!(ledger.has_hidden(ids[0], ids[1]).await.unwrap());
        // Storage is directional
        assert!(!ledger.has_hidden(ids[1], ids[0]).await.unwrap());
    }

    #[tokio::test]
    async fn test_favorite_twice_leaves_one_row() {
        let (store, ledger, ids) = setup(2).await;

        ledger.create_favorite(ids[0], ids[1]).await.unwrap();
        let err = ledger.create_favorite(ids[0], ids[1]).await.unwrap_err();

        assert!(matches!(err, Error::ConstraintViolation { kind: RelationKind::Favorite, .. }));
        assert!(ledger.has_favorited(ids[0], ids[1]).await.unwrap());
        assert_eq!(store.relation_count(RelationKind::Favorite).await, 1);
    }

    #[tokio::test]
    async fn test_wink_lookup() {
        let (_, ledger, ids) = setup(2).await;

        assert!(!ledger.has_winked(ids[0], ids[1]).await.unwrap());
        ledger.create_wink(ids[0], ids[1]).await.unwrap();
        assert!(ledger.has_winked(ids[0], ids[1]).await.unwrap());
        assert!(!ledger.has_winked(ids[1], ids[0]).await.unwrap());
    }

    #[tokio::test]
    async fn test_views_repeatable() {
        let (store, ledger, ids) = setup(3).await;

        ledger.record_view(ids[0], ids[1]).await.unwrap();
        ledger.record_view(ids[0], ids[1]).await.unwrap();
        ledger.record_view(ids[2], ids[1]).await.unwrap();

        assert_eq!(ledger.viewed_profiles(ids[0]).await.unwrap(), vec![ids[1]]);
        assert_eq!(ledger.viewed_by(ids[1]).await.unwrap(), vec![ids[0], ids[2]]);
        assert_eq!(store.relation_count(RelationKind::View).await, 2);
    }

    #[tokio::test]
    async fn test_revoke() {
        let (_, ledger, ids) = setup(2).await;

        ledger.create_hide(ids[0], ids[1]).await.unwrap();
        assert!(ledger.revoke(RelationKind::Hide, ids[0], ids[1]).await.unwrap());
        assert!(!ledger.revoke(RelationKind::Hide, ids[0], ids[1]).await.unwrap());
        assert!(ledger.hides_by(ids[0]).await.unwrap().is_empty());
    }
}
