pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::seating::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/tables",
            get(handlers::handle_list_tables).post(handlers::handle_create_table),
        )
        .route("/api/v1/tables/reload", post(handlers::handle_reload_tables))
        .route("/api/v1/tables/:id", delete(handlers::handle_delete_table))
        .route("/api/v1/tables/:id/seats", put(handlers::handle_assign_seats))
        .route(
            "/api/v1/tables/:id/layout",
            get(handlers::handle_table_layout),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::seating::{MemorySheet, SeatingEngine};

    fn test_state() -> AppState {
        let config = Config {
            database_url: None,
            sheet_name: "Tables".to_string(),
            store_timeout: Duration::from_secs(1),
            port: 0,
            rust_log: "debug".to_string(),
        };
        AppState::new(SeatingEngine::new(Arc::new(MemorySheet::new())), config)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(v) => builder
                .header("content-type", "application/json")
                .body(Body::from(v.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_health() {
        let app = build_router(test_state());
        let (status, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["sheet"], "Tables");
    }

    #[tokio::test]
    async fn test_table_lifecycle_over_http() {
        let app = build_router(test_state());

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/tables",
            Some(json!({"id": "Head Table", "shape": "round", "capacity": 4})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["seats"], json!(["", "", "", ""]));

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/v1/tables/Head%20Table/seats",
            Some(json!({"seats": ["Alice", "", "", ""]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["seats"][0], "Alice");

        let (status, body) =
            send(&app, Method::GET, "/api/v1/tables/Head%20Table/layout", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["seats"][0]["label"], "Alice");
        assert_eq!(body["seats"][1]["label"], "2");

        let (_, body) = send(&app, Method::GET, "/api/v1/tables", None).await;
        assert_eq!(body["summary"]["occupied_seats"], 1);
        assert_eq!(body["summary"]["total_seats"], 4);

        let (status, _) =
            send(&app, Method::DELETE, "/api/v1/tables/Head%20Table", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, body) =
            send(&app, Method::GET, "/api/v1/tables/Head%20Table/layout", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_validation_errors_over_http() {
        let app = build_router(test_state());
        let create = json!({"id": "A", "shape": "rectangular", "capacity": 4});
        send(&app, Method::POST, "/api/v1/tables", Some(create.clone())).await;

        let (status, body) = send(&app, Method::POST, "/api/v1/tables", Some(create)).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/tables",
            Some(json!({"id": "B", "shape": "round", "capacity": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/v1/tables/A/seats",
            Some(json!({"seats": ["x"]})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_reload_returns_store_contents() {
        let app = build_router(test_state());
        send(
            &app,
            Method::POST,
            "/api/v1/tables",
            Some(json!({"id": "A", "shape": "round", "capacity": 2})),
        )
        .await;

        let (status, body) = send(&app, Method::POST, "/api/v1/tables/reload", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tables"][0]["id"], "A");
        assert_eq!(body["summary"]["tables"], 1);
    }
}
