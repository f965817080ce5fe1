//! Dashboard page handlers.
//!
//! Each handler runs a reconciliation pass against the cluster and
//! renders the resulting namespace groups. A query failure is fatal to
//! the request: it maps to a 502 error page, never a partial table.

use askama::Template;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use backstat_cluster::ClusterQuery;
use backstat_model::NamespaceGroup;
use backstat_recon::{ReconError, StorageClasses, database_view, nfs_view};
use tracing::error;

use crate::DashboardState;
use crate::auth::RequireAuth;

/// Alert shown on the databases page documenting the correlation rule.
const BACKUP_RULE_ALERT: &str =
    "An item is marked as backup only if the DC name is equal to the PVC name";

#[derive(Template)]
#[template(path = "page.html")]
struct PageTemplate {
    title: &'static str,
    alert: Option<&'static str>,
    groups: Vec<NamespaceGroup>,
    rendered_at: String,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    title: &'static str,
    message: String,
}

fn render<T: Template>(tmpl: T) -> Html<String> {
    Html(tmpl.render().unwrap_or_else(|e| {
        format!("<pre>Template error: {e}</pre>")
    }))
}

fn rendered_at() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

pub async fn root() -> Redirect {
    Redirect::to("/databases")
}

pub async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "NOT FOUND !").into_response()
}

pub async fn databases(_auth: RequireAuth, State(state): State<DashboardState>) -> Response {
    page(state, "Databases", Some(BACKUP_RULE_ALERT), database_view).await
}

pub async fn nfs(_auth: RequireAuth, State(state): State<DashboardState>) -> Response {
    page(state, "NFS", None, nfs_view).await
}

type ViewFn = fn(&dyn ClusterQuery, &StorageClasses) -> Result<Vec<NamespaceGroup>, ReconError>;

async fn page(
    state: DashboardState,
    title: &'static str,
    alert: Option<&'static str>,
    view: ViewFn,
) -> Response {
    let client = state.client.clone();
    let storage = state.storage.clone();

    // Every render is a fresh point-in-time snapshot. The blocking CLI
    // queries run off the async workers.
    let result = tokio::task::spawn_blocking(move || view(client.as_ref(), &storage)).await;

    match result {
        Ok(Ok(groups)) => render(PageTemplate {
            title,
            alert,
            groups,
            rendered_at: rendered_at(),
        })
        .into_response(),
        Ok(Err(err)) => {
            error!(%err, page = title, "reconciliation failed");
            (
                StatusCode::BAD_GATEWAY,
                render(ErrorTemplate {
                    title: "Query failed",
                    message: err.to_string(),
                }),
            )
                .into_response()
        }
        Err(err) => {
            error!(%err, page = title, "reconciliation task failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                render(ErrorTemplate {
                    title: "Internal error",
                    message: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::BasicCredentials;
    use crate::{DashboardState, dashboard_router};
    use axum::body::Body;
    use axum::http::{Request, header};
    use backstat_cluster::{ClusterError, LabelSelector, ResourceKind};
    use backstat_model::STORAGE_CLASS_ANNOTATION;
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[derive(Default)]
    struct FixtureClient {
        responses: HashMap<(ResourceKind, Option<String>), Vec<Value>>,
    }

    impl FixtureClient {
        fn with(mut self, kind: ResourceKind, selector: Option<&str>, records: Vec<Value>) -> Self {
            self.responses
                .insert((kind, selector.map(String::from)), records);
            self
        }
    }

    impl ClusterQuery for FixtureClient {
        fn query(
            &self,
            kind: ResourceKind,
            selector: Option<&LabelSelector>,
        ) -> Result<Vec<Value>, ClusterError> {
            let key = (kind, selector.map(|s| s.to_string()));
            Ok(self.responses.get(&key).cloned().unwrap_or_default())
        }
    }

    struct FailingClient;

    impl ClusterQuery for FailingClient {
        fn query(
            &self,
            _kind: ResourceKind,
            _selector: Option<&LabelSelector>,
        ) -> Result<Vec<Value>, ClusterError> {
            Err(ClusterError::Spawn {
                command: "oc get pvc".to_string(),
                source: std::io::Error::other("connection refused"),
            })
        }
    }

    fn fixture_client() -> FixtureClient {
        FixtureClient::default()
            .with(
                ResourceKind::DeploymentConfig,
                Some("backup=mysql"),
                vec![json!({
                    "metadata": {"namespace": "app1", "name": "db1"},
                    "status": {"availableReplicas": 2}
                })],
            )
            .with(
                ResourceKind::VolumeClaim,
                None,
                vec![json!({
                    "metadata": {
                        "namespace": "app1",
                        "name": "db1",
                        "annotations": {STORAGE_CLASS_ANNOTATION: "ceph"}
                    },
                    "status": {"capacity": {"storage": "5Gi"}, "phase": "Bound"}
                })],
            )
    }

    fn test_state(client: impl ClusterQuery + Send + Sync + 'static) -> DashboardState {
        DashboardState {
            client: Arc::new(client),
            storage: StorageClasses::default(),
            auth: None,
        }
    }

    async fn body_string(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn get(router: axum::Router, uri: &str) -> Response {
        router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn root_redirects_to_databases() {
        let router = dashboard_router(test_state(fixture_client()));
        let resp = get(router, "/").await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/databases");
    }

    #[tokio::test]
    async fn databases_page_renders_reconciled_view() {
        let router = dashboard_router(test_state(fixture_client()));
        let resp = get(router, "/databases").await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_string(resp).await;
        assert!(body.contains("app1"));
        assert!(body.contains("db1"));
        assert!(body.contains("5Gi"));
        assert!(body.contains("Available"));
        assert!(body.contains(BACKUP_RULE_ALERT));
    }

    #[tokio::test]
    async fn nfs_page_renders_empty_view() {
        let router = dashboard_router(test_state(FixtureClient::default()));
        let resp = get(router, "/nfs").await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_string(resp).await;
        assert!(body.contains("NFS"));
        assert!(body.contains("Nothing to show"));
    }

    #[tokio::test]
    async fn query_failure_maps_to_bad_gateway() {
        let router = dashboard_router(test_state(FailingClient));
        let resp = get(router, "/databases").await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body = body_string(resp).await;
        assert!(body.contains("Query failed"));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let router = dashboard_router(test_state(FixtureClient::default()));
        let resp = get(router, "/nope").await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_string(resp).await, "NOT FOUND !");
    }

    #[tokio::test]
    async fn pages_are_gated_when_credentials_configured() {
        let mut state = test_state(fixture_client());
        state.auth = Some(BasicCredentials {
            username: "ops".to_string(),
            password: "s3cret".to_string(),
        });
        let router = dashboard_router(state);

        let resp = get(router.clone(), "/databases").await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));

        let authorized = Request::builder()
            .uri("/databases")
            .header(
                header::AUTHORIZATION,
                format!("Basic {}", STANDARD.encode("ops:s3cret")),
            )
            .body(Body::empty())
            .unwrap();
        let resp = router.oneshot(authorized).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn redirect_stays_open_with_auth_configured() {
        let mut state = test_state(FixtureClient::default());
        state.auth = Some(BasicCredentials {
            username: "ops".to_string(),
            password: "s3cret".to_string(),
        });
        let router = dashboard_router(state);

        let resp = get(router, "/").await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }
}
