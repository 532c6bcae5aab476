use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use knitflow_core::ServiceError;

use crate::matrix::{set_bulk_permission, set_parent_permission};
use crate::model::{PagePermission, Permission};
use crate::service::AccessService;

pub type AppState = Arc<AccessService>;

/// Build the access API router, nested under `/access`.
pub fn build_router(svc: AppState) -> Router {
    let api = Router::new()
        .route("/navigation", get(navigation))
        .route("/roles", get(list_roles))
        .route(
            "/roles/{role}/pages",
            get(get_pages).put(put_pages).delete(delete_pages),
        )
        .route("/roles/{role}/matrix", get(get_matrix))
        .route("/roles/{role}/bulk", post(bulk_update));

    Router::new().nest("/access", api).with_state(svc)
}

async fn navigation(State(svc): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({ "items": svc.tree() }))
}

async fn list_roles(
    State(svc): State<AppState>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let roles = svc.list_roles()?;
    Ok(Json(serde_json::json!({
        "total": roles.len(),
        "items": roles,
    })))
}

async fn get_pages(
    State(svc): State<AppState>,
    Path(role): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let pages = svc.get_role_pages(&role)?;
    Ok(Json(serde_json::json!({ "role": role, "pages": pages })))
}

async fn put_pages(
    State(svc): State<AppState>,
    Path(role): Path<String>,
    Json(pages): Json<Vec<PagePermission>>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let saved = svc.save_role_pages(&role, &pages)?;
    Ok(Json(serde_json::to_value(saved).map_err(|e| ServiceError::Internal(e.to_string()))?))
}

async fn delete_pages(
    State(svc): State<AppState>,
    Path(role): Path<String>,
) -> Result<StatusCode, ServiceError> {
    svc.delete_role_pages(&role)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn get_matrix(
    State(svc): State<AppState>,
    Path(role): Path<String>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let matrix = svc.role_matrix(&role)?;
    Ok(Json(serde_json::to_value(matrix).map_err(|e| ServiceError::Internal(e.to_string()))?))
}

/// Body for POST /access/roles/{role}/bulk.
///
/// `pageNames` are toggled as-is; `parent` toggles every leaf below it.
/// Unknown pages are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BulkUpdate {
    #[serde(default)]
    page_names: Vec<String>,
    #[serde(default)]
    parent: Option<String>,
    permission: Permission,
    value: bool,
}

async fn bulk_update(
    State(svc): State<AppState>,
    Path(role): Path<String>,
    Json(body): Json<BulkUpdate>,
) -> Result<Json<serde_json::Value>, ServiceError> {
    let saved = svc.update_matrix(&role, |current| {
        let mut matrix = current.clone();
        if let Some(parent) = &body.parent {
            matrix = set_parent_permission(&matrix, parent, body.permission, body.value);
        }
        set_bulk_permission(&matrix, body.page_names.as_slice(), body.permission, body.value)
    })?;
    Ok(Json(serde_json::to_value(saved).map_err(|e| ServiceError::Internal(e.to_string()))?))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use knitflow_kv::MemoryStore;

    use super::*;
    use crate::navigation::navigation;

    fn router() -> Router {
        build_router(Arc::new(AccessService::new(
            Arc::new(MemoryStore::new()),
            navigation(),
        )))
    }

    async fn call(
        router: &Router,
        method: &str,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                req = req.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        let resp = router.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_navigation() {
        let (status, json) = call(&router(), "GET", "/access/navigation", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["items"][0]["href"], "/dashboard");
    }

    #[tokio::test]
    async fn test_put_then_get_matrix() {
        let router = router();
        let (status, json) = call(
            &router,
            "PUT",
            "/access/roles/supervisor/pages",
            Some(serde_json::json!([
                {"pageName": "/production/timing", "canRead": true, "canEdit": true},
                {"pageName": "/production", "canRead": true}
            ])),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["role"], "supervisor");

        let (_, matrix) = call(&router, "GET", "/access/roles/supervisor/matrix", None).await;
        assert_eq!(matrix["/production/timing"]["permissions"]["canEdit"], true);
        assert_eq!(matrix["/production"]["isParent"], true);
        assert_eq!(matrix["/production"]["permissions"]["canRead"], false);
        assert_eq!(matrix["/production"]["children"][0], "/production/sales-orders");

        let (_, roles) = call(&router, "GET", "/access/roles", None).await;
        assert_eq!(roles["items"], serde_json::json!(["supervisor"]));
    }

    #[tokio::test]
    async fn test_bulk_parent_toggle() {
        let router = router();
        let (status, _) = call(
            &router,
            "POST",
            "/access/roles/dispatch/bulk",
            Some(serde_json::json!({
                "parent": "/logistics",
                "pageNames": ["/chat", "/no-such-page"],
                "permission": "canRead",
                "value": true
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, json) = call(&router, "GET", "/access/roles/dispatch/pages", None).await;
        let readable: Vec<&str> = json["pages"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|p| p["canRead"] == true)
            .map(|p| p["pageName"].as_str().unwrap())
            .collect();
        assert_eq!(readable, vec!["/logistics/courier", "/logistics/transport", "/chat"]);
    }

    #[tokio::test]
    async fn test_delete_missing_role() {
        let (status, json) = call(&router(), "DELETE", "/access/roles/ghost/pages", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_role_name() {
        let (status, json) = call(&router(), "GET", "/access/roles/a:b/pages", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_FAILED");
    }
}
