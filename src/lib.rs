//! Match Pool - profile visibility and random match sampling for a dating site
//!
//! This library decides which profiles a member may browse (global opt-out,
//! hides in either direction, never yourself) and draws small random samples
//! of match candidates, optionally scoped to a saved search.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{CandidateSampler, Matchmaker, RelationLedger, VisibilitySet};
pub use crate::error::{Error, Result};
pub use crate::models::{NewProfile, Profile, ProfileId, Relation, RelationKind, SavedSearch, SearchCriteria, SearchId};
