// Core algorithm exports
pub mod filters;
pub mod ledger;
pub mod matcher;
pub mod sampler;
pub mod visibility;

pub use filters::matches_criteria;
pub use ledger::RelationLedger;
pub use matcher::Matchmaker;
pub use sampler::{CandidateSampler, DEFAULT_MAX_CANDIDATES, DEFAULT_SEARCH_POOL_LIMIT};
pub use visibility::VisibilitySet;
