//! Application route configuration.

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::employee_routes;
use super::openapi::ApiDoc;
use super::AppState;
use crate::config::{API_VERSION_PREFIX, DOCUMENTATION_PATH, EMPLOYEES_PATH, OPENAPI_JSON_PATH};

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(state.cors_allowed_origin.as_deref());

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(SwaggerUi::new(DOCUMENTATION_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .nest(
            &format!("{}{}", API_VERSION_PREFIX, EMPLOYEES_PATH),
            employee_routes(),
        )
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS for the browser client; any origin when none is configured
fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let allow_origin = match origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => AllowOrigin::exact(value),
        Some(Err(_)) => {
            tracing::warn!("Ignoring invalid CORS origin, allowing any origin");
            AllowOrigin::from(Any)
        }
        None => AllowOrigin::from(Any),
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

/// Root endpoint
async fn root() -> &'static str {
    "Welcome to the Employee Management API"
}

/// Health check response
#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    services: ServiceHealth,
}

/// Individual service health status
#[derive(Serialize)]
struct ServiceHealth {
    database: ServiceStatus,
}

/// Service status
#[derive(Serialize)]
struct ServiceStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint with database connectivity check
async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status_code, database) = match state.database.ping().await {
        Ok(_) => (
            StatusCode::OK,
            ServiceStatus {
                status: "healthy",
                error: None,
            },
        ),
        Err(e) => {
            tracing::error!(error = %e, "Database health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                ServiceStatus {
                    status: "unhealthy",
                    error: Some("unavailable".to_string()),
                },
            )
        }
    };

    let response = HealthResponse {
        status: if status_code == StatusCode::OK {
            "healthy"
        } else {
            "degraded"
        },
        services: ServiceHealth { database },
    };

    (status_code, Json(response))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use sea_orm::DbErr;
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::errors::AppError;
    use crate::infra::Database;
    use crate::services::MockEmployeeService;

    async fn state_with(service: MockEmployeeService) -> AppState {
        let config = Config {
            max_connections: 1,
            ..Config::with_database_url("sqlite::memory:")
        };
        let db = Database::connect_without_migrations(&config).await.unwrap();
        AppState::new(Arc::new(service), Arc::new(db))
    }

    #[tokio::test]
    async fn database_errors_hide_details() {
        let mut service = MockEmployeeService::new();
        service.expect_get_employee().returning(|_| {
            Err(AppError::Database(DbErr::Custom(
                "relation employees does not exist".to_string(),
            )))
        });
        let app = create_router(state_with(service).await);

        let response = app
            .oneshot(Request::get("/v1/employees/3").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(text.contains("DATABASE_ERROR"));
        assert!(!text.contains("relation employees"));
    }

    #[tokio::test]
    async fn unreachable_database_reports_unavailable() {
        let state = state_with(MockEmployeeService::new()).await;
        state.database.close().await.unwrap();
        let app = create_router(state);

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["services"]["database"]["status"], "unhealthy");
        assert_eq!(json["services"]["database"]["error"], "unavailable");
    }

    #[tokio::test]
    async fn configured_origin_is_echoed() {
        let state = state_with(MockEmployeeService::new())
            .await
            .with_cors_origin("http://localhost:3000");
        let app = create_router(state);

        let response = app
            .oneshot(
                Request::get("/")
                    .header(header::ORIGIN, "http://localhost:3000")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
    }
}
