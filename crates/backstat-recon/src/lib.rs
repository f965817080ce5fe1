//! The backstat reconciliation engine.
//!
//! Consumes raw resource records from the cluster query client, groups
//! them by namespace, and derives the backup-coverage view the dashboard
//! renders. Every workflow is a pure function of its inputs, re-executed
//! per page view; there is no state between requests.
//!
//! The correlation rule at the heart of the databases page: a ceph-backed
//! volume claim counts as backed up iff a workload with the identical
//! name exists in the same namespace. Name equality is the sole join key.

mod engine;
mod error;

pub use engine::{
    database_view, fetch_databases, fetch_nfs, group_by_namespace, merge_dc_with_ceph_pvc,
    nfs_view, reduce_pvc, BACKUP_LABEL,
};
pub use error::ReconError;

use serde::{Deserialize, Serialize};

/// The database kinds inventoried by the dashboard, in the order they are
/// queried and merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    Mysql,
    Postgresql,
    Mongodb,
}

impl DatabaseKind {
    pub const ALL: [DatabaseKind; 3] = [
        DatabaseKind::Mysql,
        DatabaseKind::Postgresql,
        DatabaseKind::Mongodb,
    ];

    /// Label value under the `backup` key, also used as the badge text.
    pub fn label(&self) -> &'static str {
        match self {
            DatabaseKind::Mysql => "mysql",
            DatabaseKind::Postgresql => "postgresql",
            DatabaseKind::Mongodb => "mongodb",
        }
    }
}

/// Storage-class identifiers that make a claim eligible for each page.
/// Fixed configuration, never discovered from the cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageClasses {
    pub ceph: String,
    pub nfs: String,
}

impl Default for StorageClasses {
    fn default() -> Self {
        Self {
            ceph: "ceph".to_string(),
            nfs: "nfs-proxmox-vm".to_string(),
        }
    }
}
