//! Error types for the cluster query boundary.

use thiserror::Error;

/// A cluster list query failed.
///
/// Any of these is fatal to the reconciliation pass that issued the
/// query; the engine never retries or synthesizes partial results.
#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("malformed response from `{command}`: {source}")]
    MalformedResponse {
        command: String,
        #[source]
        source: serde_json::Error,
    },
}
