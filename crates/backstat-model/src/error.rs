//! Error types for raw record decoding.

use thiserror::Error;

/// A raw cluster record is missing its required structure.
///
/// Optional fields (capacity, replica counts) never produce this; only a
/// record without the metadata every resource carries is malformed.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed workload record: {0}")]
    Workload(String),

    #[error("malformed volume claim record: {0}")]
    VolumeClaim(String),
}
