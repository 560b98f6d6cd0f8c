//! Mingle Algo - graph-backed "who to meet" recommendation service
//!
//! This library wraps a small set of parameterized Cypher queries against
//! an external Neo4j graph of users, technologies and tenants, and exposes
//! them through a single HTTP recommendation endpoint.

pub mod auth;
pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::auth::{AuthError, CredentialGate};
pub use crate::core::{EmailStrategy, QueryVariant, Recommender};
pub use crate::models::{CandidateRow, RecommendRequest, RecommendedUser};
pub use crate::services::GraphClient;
