//! backstat-dashboard — server-rendered web UI for backstat.
//!
//! Thin plumbing over the reconciliation engine: axum route handlers
//! that run a reconciliation pass and render the namespace view with
//! Askama templates.
//!
//! # Routes
//!
//! | Route | Handler |
//! |---|---|
//! | `/` | Redirect to `/databases` |
//! | `/databases` | Database inventory + ceph cross-reference |
//! | `/nfs` | NFS claim coverage |
//! | anything else | 404 |

pub mod auth;
pub mod pages;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use backstat_cluster::ClusterQuery;
use backstat_recon::StorageClasses;

use crate::auth::BasicCredentials;

/// Shared state for dashboard handlers.
#[derive(Clone)]
pub struct DashboardState {
    pub client: Arc<dyn ClusterQuery + Send + Sync>,
    pub storage: StorageClasses,
    /// Optional credential pair gating the pages; `None` means open.
    pub auth: Option<BasicCredentials>,
}

/// Build the dashboard router.
pub fn dashboard_router(state: DashboardState) -> Router {
    Router::new()
        .route("/", get(pages::root))
        .route("/databases", get(pages::databases))
        .route("/nfs", get(pages::nfs))
        .fallback(pages::not_found)
        .with_state(state)
}
