//! The `oc` CLI client.

use std::process::Command;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::ClusterError;
use crate::selector::{LabelSelector, ResourceKind};
use crate::ClusterQuery;

/// JSON list envelope returned by `oc get ... -o json`.
///
/// A payload without an `items` array is malformed, not empty.
#[derive(Deserialize)]
struct ResourceList {
    items: Vec<Value>,
}

/// Production [`ClusterQuery`] implementation: one blocking
/// `oc get <kind> --all-namespaces -o json [-l <selector>]` per query.
///
/// Blocking is intentional: callers on an async runtime off-load via
/// `spawn_blocking`. There is no timeout: a hanging CLI hangs the request.
#[derive(Debug, Clone)]
pub struct OcClient {
    binary: String,
}

impl OcClient {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for OcClient {
    fn default() -> Self {
        Self::new("oc")
    }
}

impl ClusterQuery for OcClient {
    fn query(
        &self,
        kind: ResourceKind,
        selector: Option<&LabelSelector>,
    ) -> Result<Vec<Value>, ClusterError> {
        let mut args = vec![
            "get".to_string(),
            kind.cli_name().to_string(),
            "--all-namespaces".to_string(),
            "-o".to_string(),
            "json".to_string(),
        ];
        if let Some(selector) = selector {
            args.push("-l".to_string());
            args.push(selector.to_string());
        }
        let command = format!("{} {}", self.binary, args.join(" "));

        debug!(%kind, selector = selector.map(|s| s.to_string()), "listing cluster resources");

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .map_err(|source| ClusterError::Spawn {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ClusterError::CommandFailed {
                command,
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let list: ResourceList = serde_json::from_slice(&output.stdout).map_err(|source| {
            ClusterError::MalformedResponse {
                command: command.clone(),
                source,
            }
        })?;

        debug!(%kind, count = list.items.len(), "query complete");
        Ok(list.items)
    }
}
