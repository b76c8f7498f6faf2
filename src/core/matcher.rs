use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::ledger::RelationLedger;
use crate::core::sampler::CandidateSampler;
use crate::core::visibility::{guard_results, VisibilitySet};
use crate::error::{Error, Result};
use crate::models::{NewProfile, Profile, ProfileId, SavedSearch, SearchCriteria, SearchId};
use crate::services::{ProfileStore, RelationStore, SearchStore};

/// Main orchestrator for browsing and random matching
///
/// # Pipeline
/// 1. Relation ledger lookups (outgoing and incoming hides)
/// 2. Visibility filtering of the unhidden profile pool
/// 3. Random candidate sampling, optionally scoped to a saved search
///
/// Holds only store handles; every call reads current state and keeps
/// nothing between requests.
#[derive(Clone)]
pub struct Matchmaker {
    profiles: Arc<dyn ProfileStore>,
    searches: Arc<dyn SearchStore>,
    ledger: RelationLedger,
    sampler: CandidateSampler,
}

impl Matchmaker {
    pub fn new(
        profiles: Arc<dyn ProfileStore>,
        relations: Arc<dyn RelationStore>,
        searches: Arc<dyn SearchStore>,
        sampler: CandidateSampler,
    ) -> Self {
        Self {
            profiles,
            searches,
            ledger: RelationLedger::new(relations),
            sampler,
        }
    }

    /// Build from one store that backs all three tables
    pub fn with_store<S>(store: Arc<S>, sampler: CandidateSampler) -> Self
    where
        S: ProfileStore + RelationStore + SearchStore + 'static,
    {
        Self::new(store.clone(), store.clone(), store, sampler)
    }

    pub fn ledger(&self) -> &RelationLedger {
        &self.ledger
    }

    pub fn sampler(&self) -> &CandidateSampler {
        &self.sampler
    }

    pub async fn create_profile(&self, profile: NewProfile) -> Result<Profile> {
        self.profiles.insert_profile(profile).await
    }

    pub async fn require_profile(&self, id: ProfileId) -> Result<Profile> {
        self.profiles
            .get_profile(id)
            .await?
            .ok_or(Error::ProfileNotFound(id))
    }

    /// Toggle a profile's global opt-out from browsing
    pub async fn set_hidden(&self, id: ProfileId, hidden: bool) -> Result<()> {
        if !self.profiles.set_hidden(id, hidden).await? {
            return Err(Error::ProfileNotFound(id));
        }
        tracing::info!("Profile {} hidden flag set to {}", id, hidden);
        Ok(())
    }

    /// Delete a profile with all of its relations and saved searches
    pub async fn delete_profile(&self, id: ProfileId) -> Result<()> {
        if !self.profiles.delete_profile(id).await? {
            return Err(Error::ProfileNotFound(id));
        }
        Ok(())
    }

    pub async fn create_search(&self, owner: ProfileId, criteria: SearchCriteria) -> Result<SavedSearch> {
        let search = self.searches.create_search(owner, criteria).await?;
        tracing::debug!("Profile {} saved a search", owner);
        Ok(search)
    }

    pub async fn get_search(&self, id: SearchId) -> Result<SavedSearch> {
        self.searches
            .get_search(id)
            .await?
            .ok_or(Error::SearchNotFound(id))
    }

    /// Hide relations of `requester` in both directions
    pub async fn visibility_for(&self, requester: ProfileId) -> Result<VisibilitySet> {
        self.require_profile(requester).await?;

        let hides_by = self.ledger.hides_by(requester).await?;
        let hidden_by = self.ledger.hidden_by(requester).await?;

        Ok(VisibilitySet::new(requester, hides_by, hidden_by))
    }

    /// All other profiles `requester` may browse, newest first
    pub async fn compute_visible_profiles(&self, requester: ProfileId) -> Result<Vec<Profile>> {
        let visibility = self.visibility_for(requester).await?;
        let pool = self.profiles.list_unhidden().await?;
        let total = pool.len();

        let visible = visibility.filter(pool);

        tracing::debug!(
            "Profile {} can see {} of {} unhidden profiles",
            requester,
            visible.len(),
            total
        );

        Ok(visible)
    }

    /// Profiles blocked from `requester` in either direction
    pub async fn compute_blocked_union(&self, requester: ProfileId) -> Result<Vec<Profile>> {
        let visibility = self.visibility_for(requester).await?;
        let blocked: Vec<ProfileId> = visibility.hidden_pair_union().into_iter().collect();

        self.profiles.get_profiles(&blocked).await
    }

    /// Draw up to three match candidates with a fresh generator
    ///
    /// With a persisted saved search the caller's pool is ignored: the pool is
    /// the search's stored criteria resolved against all profiles, capped, with
    /// profiles blocked in either direction removed. Otherwise the caller's
    /// pool is used as given (it is expected to be visibility-filtered).
    pub async fn sample_candidates(
        &self,
        pool: Vec<Profile>,
        search: Option<&SavedSearch>,
        requester: ProfileId,
    ) -> Result<Vec<Profile>> {
        let working = self.working_pool(pool, search, requester).await?;
        let mut rng = StdRng::from_entropy();
        Ok(self.draw(requester, &working, &mut rng))
    }

    /// Same as [`Matchmaker::sample_candidates`] with a caller-supplied
    /// generator, e.g. a seeded one.
    pub async fn sample_candidates_with_rng<R: Rng + ?Sized>(
        &self,
        pool: Vec<Profile>,
        search: Option<&SavedSearch>,
        requester: ProfileId,
        rng: &mut R,
    ) -> Result<Vec<Profile>> {
        let working = self.working_pool(pool, search, requester).await?;
        Ok(self.draw(requester, &working, rng))
    }

    /// Random matches for `requester`, from a stored search when one is given
    /// and from the requester's visible profiles otherwise
    pub async fn random_matches(
        &self,
        requester: ProfileId,
        search_id: Option<SearchId>,
    ) -> Result<Vec<Profile>> {
        let search = match search_id {
            Some(id) => Some(self.get_search(id).await?),
            None => None,
        };

        let pool = match &search {
            Some(_) => Vec::new(),
            None => self.compute_visible_profiles(requester).await?,
        };

        let matches = self.sample_candidates(pool, search.as_ref(), requester).await?;

        tracing::info!(
            "Drew {} random matches for profile {}{}",
            matches.len(),
            requester,
            search_id.map(|id| format!(" from search {}", id)).unwrap_or_default()
        );

        Ok(matches)
    }

    async fn working_pool(
        &self,
        pool: Vec<Profile>,
        search: Option<&SavedSearch>,
        requester: ProfileId,
    ) -> Result<Vec<Profile>> {
        match search.and_then(|s| s.id) {
            Some(search_id) => {
                let stored = self.get_search(search_id).await?;
                let visibility = self.visibility_for(requester).await?;
                let resolved = self
                    .searches
                    .resolve_search(&stored.criteria, self.sampler.search_pool_limit())
                    .await?;

                Ok(visibility.strip_blocked(resolved))
            }
            None => {
                self.require_profile(requester).await?;
                Ok(pool.into_iter().filter(|p| p.id != requester).collect())
            }
        }
    }

    fn draw<R: Rng + ?Sized>(&self, requester: ProfileId, working: &[Profile], rng: &mut R) -> Vec<Profile> {
        guard_results(requester, self.sampler.draw(working, rng))
    }
}
