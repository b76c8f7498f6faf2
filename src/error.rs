use thiserror::Error;

use crate::models::{ProfileId, RelationKind, SearchId};

/// Errors surfaced by the profile, relation and search stores and by the
/// matchmaker built on top of them.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Profile not found: {0}")]
    ProfileNotFound(ProfileId),

    #[error("Saved search not found: {0}")]
    SearchNotFound(SearchId),

    /// A unique relation (wink, favorite) already exists for the ordered pair.
    /// Callers should read this as "already exists", not as a failure.
    #[error("{kind} from {source_id} to {target_id} already exists")]
    ConstraintViolation {
        kind: RelationKind,
        source_id: ProfileId,
        target_id: ProfileId,
    },

    #[error("SQLx error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ProfileNotFound(_) | Error::SearchNotFound(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
