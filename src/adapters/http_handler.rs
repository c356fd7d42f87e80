//! HTTP handlers and router assembly.
//!
//! The handlers consume the database only through the [`Database`] port:
//! "make sure the handle is live" and "run a query on it". Everything else
//! (reconnection, probe caching) happens inside the core, so a dropped
//! backend connection is invisible here beyond the error mapping.
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use crate::{
    adapters::middleware::{admin_only, request_id_middleware, request_timing_middleware},
    core::error::DbError,
    ports::database::Database,
};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn Database>,
}

/// Map a database failure onto an HTTP response.
///
/// Connection-level failures become 503 so load balancers back off; a
/// missing row is 404; statement and configuration errors are the
/// service's own fault and become 500.
pub struct ApiError(DbError);

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            DbError::Connection(_) | DbError::NotOpen => StatusCode::SERVICE_UNAVAILABLE,
            DbError::NoRows => StatusCode::NOT_FOUND,
            DbError::Config(_) | DbError::Statement(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!(error = %self.0, status = %status, "request failed");
        (status, self.0.to_string()).into_response()
    }
}

#[derive(Debug, Deserialize)]
struct GreetRequest {
    name: String,
}

#[derive(Debug, Serialize)]
struct GreetResponse {
    greeting: String,
}

async fn handle_health() -> &'static str {
    "OK"
}

async fn handle_greet(Json(req): Json<GreetRequest>) -> Json<GreetResponse> {
    Json(GreetResponse {
        greeting: format!("Hello, {}!", req.name),
    })
}

async fn handle_db_version(State(state): State<AppState>) -> Result<String, ApiError> {
    let version = state.db.engine_version().await?;
    Ok(version)
}

async fn handle_index() -> &'static str {
    "secret stuff"
}

/// Assemble the service router.
pub fn router(db: Arc<dyn Database>) -> Router {
    let state = AppState { db };

    Router::new()
        .route("/health", get(handle_health))
        .route("/greet", post(handle_greet))
        .route("/dbversion", get(handle_db_version))
        .merge(
            Router::new()
                .route("/", get(handle_index))
                .route_layer(middleware::from_fn(admin_only)),
        )
        .layer(middleware::from_fn(request_timing_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::extract::Request;
    use tower::ServiceExt; // for oneshot

    use super::*;
    use crate::core::error::DbResult;

    // Mock database port for testing
    struct MockDatabase {
        version: Option<String>,
    }

    impl MockDatabase {
        fn healthy(version: &str) -> Self {
            Self {
                version: Some(version.to_string()),
            }
        }

        fn unreachable() -> Self {
            Self { version: None }
        }
    }

    #[async_trait]
    impl Database for MockDatabase {
        async fn ready(&self) -> DbResult<()> {
            match self.version {
                Some(_) => Ok(()),
                None => Err(DbError::NotOpen),
            }
        }

        async fn engine_version(&self) -> DbResult<String> {
            self.version.clone().ok_or(DbError::NotOpen)
        }
    }

    fn app(db: MockDatabase) -> Router {
        router(Arc::new(db))
    }

    async fn body_string(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_returns_ok_body() {
        let response = app(MockDatabase::healthy("x"))
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "OK");
    }

    #[tokio::test]
    async fn test_greet_round_trips_json() {
        let response = app(MockDatabase::healthy("x"))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/greet")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"Justin"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed["greeting"], "Hello, Justin!");
    }

    #[tokio::test]
    async fn test_greet_rejects_malformed_json() {
        let response = app(MockDatabase::healthy("x"))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/greet")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_dbversion_reports_engine_version() {
        let response = app(MockDatabase::healthy("8.0.36"))
            .oneshot(
                Request::builder()
                    .uri("/dbversion")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "8.0.36");
    }

    #[tokio::test]
    async fn test_dbversion_maps_connection_failure_to_503() {
        let response = app(MockDatabase::unreachable())
            .oneshot(
                Request::builder()
                    .uri("/dbversion")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_index_is_admin_gated() {
        let app = app(MockDatabase::healthy("x"));

        let hidden = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(hidden.status(), StatusCode::NOT_FOUND);

        let shown = app
            .oneshot(
                Request::builder()
                    .uri("/?admin=true")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(shown.status(), StatusCode::OK);
        assert_eq!(body_string(shown).await, "secret stuff");
    }
}
