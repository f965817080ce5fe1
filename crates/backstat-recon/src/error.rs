//! Error type for reconciliation passes.

use backstat_cluster::ClusterError;
use backstat_model::DecodeError;
use thiserror::Error;

/// A reconciliation pass failed.
///
/// Both variants are fatal to the current request: the engine never mixes
/// stale and fresh data or renders a partial result set.
#[derive(Debug, Error)]
pub enum ReconError {
    #[error(transparent)]
    Query(#[from] ClusterError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}
