// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::CandidateRow;
pub use requests::RecommendRequest;
pub use responses::{HealthResponse, RecommendedUser};
