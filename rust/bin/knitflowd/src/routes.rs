use axum::routing::get;
use axum::{Json, Router};

use knitflow_core::Module;

/// Merge every module's routes and add `/health`.
pub fn build_router(modules: &[Box<dyn Module>]) -> Router {
    let mut app = Router::new().route("/health", get(health));
    for module in modules {
        app = app.merge(module.routes());
    }
    app
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        let modules: Vec<Box<dyn Module>> = vec![
            Box::new(production::ProductionModule::new(Default::default())),
            Box::new(access::AccessModule::new(
                Arc::new(knitflow_kv::MemoryStore::new()),
                access::navigation(),
            )),
        ];
        build_router(&modules)
    }

    async fn status_of(method: &str, uri: &str, body: &str) -> StatusCode {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        app().oneshot(req).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_modules_are_mounted() {
        assert_eq!(status_of("GET", "/health", "").await, StatusCode::OK);
        assert_eq!(status_of("GET", "/access/navigation", "").await, StatusCode::OK);
        assert_eq!(
            status_of("POST", "/production/rates", r#"{"needle":1,"count":1}"#).await,
            StatusCode::OK
        );
        assert_eq!(status_of("GET", "/nowhere", "").await, StatusCode::NOT_FOUND);
    }
}
