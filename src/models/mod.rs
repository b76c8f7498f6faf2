// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Profile, NewProfile, ProfileId, Relation, RelationKind, SavedSearch, SearchCriteria, SearchId};
pub use requests::{RelationRequest, RandomMatchesRequest, CreateSearchRequest, SetHiddenRequest};
pub use responses::{ProfilesResponse, RelationResponse, HealthResponse, ErrorResponse};
