//! Raw record views decoded from cluster list responses.
//!
//! The query client hands back untyped JSON records; these types pull out
//! the handful of fields the reconciliation engine reads. Required fields
//! are `metadata.namespace` and `metadata.name`; a record without them is
//! malformed. Everything under `status` is absent-safe.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::DecodeError;

/// Annotation carrying the storage class on volume claims.
pub const STORAGE_CLASS_ANNOTATION: &str = "volume.beta.kubernetes.io/storage-class";

/// A deployment-config-like resource carrying a `backup=<type>` label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWorkload {
    pub namespace: String,
    pub name: String,
    pub available_replicas: u64,
}

impl RawWorkload {
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let doc: WorkloadDoc = serde_json::from_value(value.clone())
            .map_err(|e| DecodeError::Workload(e.to_string()))?;
        Ok(Self {
            namespace: doc.metadata.namespace,
            name: doc.metadata.name,
            available_replicas: doc.status.available_replicas,
        })
    }

    /// A workload counts as available iff it has at least one available
    /// replica.
    pub fn is_available(&self) -> bool {
        self.available_replicas > 0
    }
}

/// A persistent-storage request resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawVolumeClaim {
    pub namespace: String,
    pub name: String,
    pub capacity: Option<String>,
    pub phase: String,
    pub storage_class: Option<String>,
}

impl RawVolumeClaim {
    pub fn from_value(value: &Value) -> Result<Self, DecodeError> {
        let doc: ClaimDoc = serde_json::from_value(value.clone())
            .map_err(|e| DecodeError::VolumeClaim(e.to_string()))?;
        let storage_class = doc
            .metadata
            .annotations
            .get(STORAGE_CLASS_ANNOTATION)
            .cloned();
        Ok(Self {
            namespace: doc.metadata.namespace,
            name: doc.metadata.name,
            capacity: doc.status.capacity.and_then(|c| c.storage),
            phase: doc.status.phase,
            storage_class,
        })
    }

    /// Capacity string for display; `?` when the claim reports none.
    pub fn capacity_label(&self) -> &str {
        self.capacity.as_deref().unwrap_or("?")
    }

    pub fn is_bound(&self) -> bool {
        self.phase == "Bound"
    }

    pub fn has_storage_class(&self, class: &str) -> bool {
        self.storage_class.as_deref() == Some(class)
    }
}

// ── Wire shapes ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct Metadata {
    namespace: String,
    name: String,
    #[serde(default)]
    annotations: HashMap<String, String>,
}

#[derive(Deserialize)]
struct WorkloadDoc {
    metadata: Metadata,
    #[serde(default)]
    status: WorkloadStatus,
}

#[derive(Deserialize, Default)]
struct WorkloadStatus {
    #[serde(
        default,
        rename = "availableReplicas",
        deserialize_with = "count_from_number_or_string"
    )]
    available_replicas: u64,
}

#[derive(Deserialize)]
struct ClaimDoc {
    metadata: Metadata,
    #[serde(default)]
    status: ClaimStatus,
}

#[derive(Deserialize, Default)]
struct ClaimStatus {
    #[serde(default)]
    capacity: Option<ClaimCapacity>,
    #[serde(default)]
    phase: String,
}

#[derive(Deserialize)]
struct ClaimCapacity {
    #[serde(default)]
    storage: Option<String>,
}

/// Replica counts show up both as JSON numbers and as numeric strings;
/// anything else (including null) counts as 0, i.e. not available.
fn count_from_number_or_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
