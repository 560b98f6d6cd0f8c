use neo4rs::{ConfigBuilder, Graph, Query};
use thiserror::Error;

use crate::config::Neo4jSettings;
use crate::models::CandidateRow;

/// Errors that can occur when talking to the graph store
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Neo4j driver error: {0}")]
    Driver(#[from] neo4rs::Error),
}

/// Client for the Neo4j graph store.
///
/// Holds connection settings only. A connection is opened per query and
/// released when the query completes, on success and failure alike; the
/// deployment is low-traffic and stateless, so there is no pool.
#[derive(Debug, Clone)]
pub struct GraphClient {
    settings: Neo4jSettings,
}

impl GraphClient {
    pub fn new(settings: Neo4jSettings) -> Self {
        Self { settings }
    }

    /// Execute one recommendation query and collect its rows.
    ///
    /// Store-level failures are absorbed: the caller sees an empty result
    /// set, never an error. The log line below is the only place where an
    /// unreachable store is distinguishable from zero matches.
    pub async fn fetch_candidates(&self, query: Query) -> Vec<CandidateRow> {
        match self.run(query).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::error!(
                    uri = %self.settings.uri,
                    database = %self.settings.database,
                    "Graph query failed, returning empty result set: {}",
                    e
                );
                Vec::new()
            }
        }
    }

    async fn run(&self, query: Query) -> Result<Vec<CandidateRow>, GraphError> {
        let config = ConfigBuilder::default()
            .uri(self.settings.uri.as_str())
            .user(self.settings.user.as_str())
            .password(self.settings.password.as_str())
            .db(self.settings.database.as_str())
            .build()?;

        // Dropped at the end of this scope, releasing the connection
        // whether or not the query succeeded.
        let graph = Graph::connect(config).await?;

        let mut stream = graph.execute(query).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            rows.push(CandidateRow::from_row(&row));
        }

        tracing::debug!(returned = rows.len(), "Graph query completed");

        Ok(rows)
    }
}
