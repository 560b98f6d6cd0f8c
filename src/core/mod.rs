// Core dispatch exports
pub mod queries;
pub mod recommend;

pub use recommend::{
    map_candidates, EmailStrategy, MappingError, QueryVariant, RecommendError, Recommender,
};
