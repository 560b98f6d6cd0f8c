use std::str::FromStr;

use neo4rs::Query;
use thiserror::Error;
use validator::ValidateEmail;

use crate::core::queries;
use crate::models::{CandidateRow, RecommendRequest, RecommendedUser};
use crate::services::GraphClient;

/// Errors escaping the dispatcher (translated to a 500 by the handler)
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("request carries no identity field")]
    MissingIdentity,
}

/// Why a single result row was dropped during mapping
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    #[error("record is missing firstName")]
    MissingFirstName,

    #[error("record email {0:?} is not a valid email address")]
    InvalidEmail(String),
}

/// Ranking strategy for email-identified requests.
///
/// Both were live at different points in the product's history, so the
/// choice is a configuration switch rather than a hardcoded pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailStrategy {
    /// 2:1 weighted direct/indirect shared-technology counts
    Weighted,
    /// Shared-technology count, optionally scoped to the request's tenant
    TenantScoped,
}

#[derive(Debug, Error)]
#[error("unknown email strategy {0:?}, expected \"weighted\" or \"tenant-scoped\"")]
pub struct UnknownStrategy(String);

impl FromStr for EmailStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weighted" => Ok(EmailStrategy::Weighted),
            "tenant-scoped" | "tenant_scoped" => Ok(EmailStrategy::TenantScoped),
            other => Err(UnknownStrategy(other.to_string())),
        }
    }
}

/// The graph query variant a request resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryVariant {
    WeightedMultiHop,
    TenantScoped,
    ExternalIdentity,
}

impl QueryVariant {
    /// Pick the variant from the populated identity field.
    ///
    /// Validation has already rejected requests without an identity, but a
    /// request reaching this point without one is still an error rather
    /// than a panic.
    pub fn select(
        request: &RecommendRequest,
        strategy: EmailStrategy,
    ) -> Result<Self, RecommendError> {
        match (&request.email, &request.diffbot_uri) {
            (Some(_), _) => Ok(match strategy {
                EmailStrategy::Weighted => QueryVariant::WeightedMultiHop,
                EmailStrategy::TenantScoped => QueryVariant::TenantScoped,
            }),
            (None, Some(_)) => Ok(QueryVariant::ExternalIdentity),
            (None, None) => Err(RecommendError::MissingIdentity),
        }
    }

    /// Build the parameterized Cypher for this variant
    pub fn build(self, request: &RecommendRequest) -> Result<Query, RecommendError> {
        match self {
            QueryVariant::WeightedMultiHop => {
                let email = request
                    .email
                    .as_deref()
                    .ok_or(RecommendError::MissingIdentity)?;
                Ok(queries::weighted_multi_hop(
                    email,
                    request.max_recommendations,
                ))
            }
            QueryVariant::TenantScoped => {
                let email = request
                    .email
                    .as_deref()
                    .ok_or(RecommendError::MissingIdentity)?;
                Ok(queries::tenant_scoped(
                    email,
                    request.tenant.as_deref(),
                    request.max_recommendations,
                ))
            }
            QueryVariant::ExternalIdentity => {
                let diffbot_uri = request
                    .diffbot_uri
                    .as_deref()
                    .ok_or(RecommendError::MissingIdentity)?;
                Ok(queries::external_identity(
                    diffbot_uri,
                    request.tenant.as_deref(),
                    request.max_recommendations,
                ))
            }
        }
    }
}

/// Recommendation dispatcher: variant selection, query execution, mapping
#[derive(Debug, Clone)]
pub struct Recommender {
    client: GraphClient,
    strategy: EmailStrategy,
}

impl Recommender {
    pub fn new(client: GraphClient, strategy: EmailStrategy) -> Self {
        Self { client, strategy }
    }

    /// Run the recommendation query for a validated request.
    ///
    /// Store failures have already been absorbed by the executor, so the
    /// result is the mapped candidate list; an error here means the
    /// request should never have reached dispatch.
    pub async fn recommend(
        &self,
        request: &RecommendRequest,
    ) -> Result<Vec<RecommendedUser>, RecommendError> {
        let variant = QueryVariant::select(request, self.strategy)?;
        tracing::debug!(?variant, "Dispatching recommendation query");

        let query = variant.build(request)?;
        let rows = self.client.fetch_candidates(query).await;

        Ok(map_candidates(rows, request.max_recommendations as usize))
    }
}

/// Map raw rows into response users, dropping rows that don't fit.
///
/// The store already ranks and limits, but the limit is enforced again
/// here so an over-returning query can never inflate the response.
pub fn map_candidates(rows: Vec<CandidateRow>, limit: usize) -> Vec<RecommendedUser> {
    let mut users = Vec::with_capacity(rows.len().min(limit));

    for row in rows {
        if users.len() == limit {
            break;
        }
        match map_row(row) {
            Ok(user) => users.push(user),
            Err(reason) => {
                tracing::warn!("Dropping candidate record: {}", reason);
            }
        }
    }

    users
}

fn map_row(row: CandidateRow) -> Result<RecommendedUser, MappingError> {
    let first_name = match row.first_name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(MappingError::MissingFirstName),
    };

    if let Some(email) = &row.email {
        if !email.validate_email() {
            return Err(MappingError::InvalidEmail(email.clone()));
        }
    }

    Ok(RecommendedUser {
        email: row.email,
        diffbot_uri: row.diffbot_uri,
        first_name,
        direct_matches: row.direct_matches,
        indirect_matches: row.indirect_matches,
    })
}
