//! Cluster query client for backstat.
//!
//! The reconciliation engine only ever issues one kind of request: list
//! all resources of a kind across all namespaces, optionally filtered by
//! a label selector. That contract is the [`ClusterQuery`] trait; the
//! production implementation ([`OcClient`]) shells out to the platform
//! CLI and parses its JSON list envelope.
//!
//! Failures are fatal to the current request by design: no retries, no
//! partial results.

mod client;
mod error;
mod selector;

pub use client::OcClient;
pub use error::ClusterError;
pub use selector::{LabelSelector, ResourceKind};

use serde_json::Value;

/// Read-only list queries against the cluster API.
///
/// Queries always span all namespaces. `selector` filters by label when
/// present; `None` lists every resource of the kind.
pub trait ClusterQuery {
    fn query(
        &self,
        kind: ResourceKind,
        selector: Option<&LabelSelector>,
    ) -> Result<Vec<Value>, ClusterError>;
}
