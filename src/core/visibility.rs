use std::collections::HashSet;

use crate::models::{Profile, ProfileId};

/// Visibility rules for one requesting profile
///
/// A hide is stored as a single directed row, but its effect is mutual: the
/// requester sees neither the profiles it hid nor the profiles that hid it.
#[derive(Debug, Clone)]
pub struct VisibilitySet {
    requester: ProfileId,
    hides_by: HashSet<ProfileId>,
    hidden_by: HashSet<ProfileId>,
}

impl VisibilitySet {
    pub fn new(
        requester: ProfileId,
        hides_by: impl IntoIterator<Item = ProfileId>,
        hidden_by: impl IntoIterator<Item = ProfileId>,
    ) -> Self {
        Self {
            requester,
            hides_by: hides_by.into_iter().collect(),
            hidden_by: hidden_by.into_iter().collect(),
        }
    }

    pub fn requester(&self) -> ProfileId {
        self.requester
    }

    /// Blocked in either direction, never including the requester itself
    pub fn hidden_pair_union(&self) -> HashSet<ProfileId> {
        self.hides_by
            .union(&self.hidden_by)
            .copied()
            .filter(|id| *id != self.requester)
            .collect()
    }

    #[inline]
    pub fn is_blocked(&self, id: ProfileId) -> bool {
        self.hides_by.contains(&id) || self.hidden_by.contains(&id)
    }

    /// Full visibility check: globally visible, not blocked, not self
    #[inline]
    pub fn allows(&self, profile: &Profile) -> bool {
        !profile.hidden && profile.id != self.requester && !self.is_blocked(profile.id)
    }

    /// Narrow a pool of profiles down to what the requester may browse.
    /// Pool order is preserved; a repeated ID keeps its first occurrence.
    pub fn filter(&self, pool: Vec<Profile>) -> Vec<Profile> {
        let mut seen = HashSet::with_capacity(pool.len());
        let visible = pool
            .into_iter()
            .filter(|p| self.allows(p) && seen.insert(p.id))
            .collect();
        guard_results(self.requester, visible)
    }

    /// Remove blocked profiles and self from a pool that did not come through
    /// [`VisibilitySet::filter`], such as a saved search's resolved profiles.
    pub fn strip_blocked(&self, pool: Vec<Profile>) -> Vec<Profile> {
        pool.into_iter()
            .filter(|p| p.id != self.requester && !self.is_blocked(p.id))
            .collect()
    }
}

/// Final guard on anything handed back to a caller: the requester must not
/// appear, and no profile may appear twice.
///
/// A hit means a logic bug upstream. Debug builds assert; release builds drop
/// the offending entry and log it.
pub fn guard_results(requester: ProfileId, profiles: Vec<Profile>) -> Vec<Profile> {
    let mut seen = HashSet::with_capacity(profiles.len());
    profiles
        .into_iter()
        .filter(|p| {
            if p.id == requester {
                debug_assert!(false, "profile {} appeared in its own result set", requester);
                tracing::error!("Invariant violation: profile {} in its own result set, dropping", requester);
                return false;
            }
            if !seen.insert(p.id) {
                debug_assert!(false, "profile {} appeared twice in a result set", p.id);
                tracing::error!("Invariant violation: duplicate profile {} in result set, dropping", p.id);
                return false;
            }
            true
        })
        .collect()
}
