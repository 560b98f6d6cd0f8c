// Service exports
pub mod graph;

pub use graph::{GraphClient, GraphError};
