// HTTP resource surface (Axum)
//
// Thin translation layer: parse the request, call the handler, map the
// outcome to a status code. All routes live under /api.

use crate::config::StoreConfig;
use crate::error::TrackerError;
use crate::expenses::ExpenseHandler;
use crate::groups::GroupHandler;
use crate::i18n::{dictionary, Language};
use crate::model::{
    Expense, ExpenseFields, ExpenseSummary, Group, GroupFields, GroupTotals, SubItem,
    SubItemFields,
};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tracing::{error, warn};

/// Shared application state (no lock: concurrent writers race, last one wins)
#[derive(Clone)]
pub struct AppState {
    expenses: Arc<ExpenseHandler>,
    groups: Arc<GroupHandler>,
}

impl AppState {
    pub fn new(expenses: ExpenseHandler, groups: GroupHandler) -> Self {
        AppState {
            expenses: Arc::new(expenses),
            groups: Arc::new(groups),
        }
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(config.expense_handler(), config.group_handler())
    }
}

// ============================================================================
// Request / response bodies
// ============================================================================

#[derive(Deserialize)]
struct UpdateExpenseRequest {
    id: String,
    #[serde(flatten)]
    fields: ExpenseFields,
}

#[derive(Deserialize)]
struct UpdateGroupRequest {
    id: String,
    #[serde(flatten)]
    fields: GroupFields,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateSubItemRequest {
    group_id: String,
    #[serde(flatten)]
    fields: SubItemFields,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateSubItemRequest {
    group_id: String,
    id: String,
    #[serde(flatten)]
    fields: SubItemFields,
}

#[derive(Deserialize)]
struct IdQuery {
    id: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemQuery {
    group_id: Option<String>,
    item_id: Option<String>,
}

#[derive(Deserialize)]
struct LanguageQuery {
    lang: Option<String>,
}

#[derive(Serialize)]
struct SuccessBody {
    success: bool,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Serialize)]
struct TranslationsResponse {
    language: Language,
    direction: &'static str,
    strings: BTreeMap<&'static str, &'static str>,
}

fn success() -> Json<SuccessBody> {
    Json(SuccessBody { success: true })
}

// ============================================================================
// Error mapping
// ============================================================================

/// Handler failure tagged with what was being attempted
pub struct ApiError {
    action: &'static str,
    error: TrackerError,
}

impl ApiError {
    fn new(action: &'static str, error: TrackerError) -> Self {
        ApiError { action, error }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.error {
            e if e.is_not_found() => (StatusCode::NOT_FOUND, e.to_string()),
            TrackerError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to {}", self.action),
            ),
        };

        if status.is_server_error() {
            error!(action = self.action, error = %self.error, "request failed");
        } else {
            warn!(action = self.action, error = %self.error, "request rejected");
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Body extraction failures (bad JSON, wrong content type) become validation errors
fn parse_body<T: DeserializeOwned>(
    action: &'static str,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<T, ApiError> {
    let Json(body) =
        body.map_err(|e| ApiError::new(action, TrackerError::validation(e.body_text())))?;
    serde_json::from_value(body)
        .map_err(|e| ApiError::new(action, TrackerError::validation(e.to_string())))
}

fn required(action: &'static str, name: &str, value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::new(
            action,
            TrackerError::validation(format!("{} is required", name)),
        )),
    }
}

// ============================================================================
// Expense handlers
// ============================================================================

/// GET /api/expenses
async fn list_expenses(State(state): State<AppState>) -> Result<Json<Vec<Expense>>, ApiError> {
    state
        .expenses
        .list()
        .map(Json)
        .map_err(|e| ApiError::new("read expenses", e))
}

/// POST /api/expenses
async fn create_expense(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    const ACTION: &str = "create expense";
    let fields: ExpenseFields = parse_body(ACTION, body)?;
    let expense = state
        .expenses
        .create(fields)
        .map_err(|e| ApiError::new(ACTION, e))?;
    Ok((StatusCode::CREATED, Json(expense)))
}

/// PUT /api/expenses
async fn update_expense(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Expense>, ApiError> {
    const ACTION: &str = "update expense";
    let request: UpdateExpenseRequest = parse_body(ACTION, body)?;
    state
        .expenses
        .update(&request.id, request.fields)
        .map(Json)
        .map_err(|e| ApiError::new(ACTION, e))
}

/// DELETE /api/expenses?id=
async fn delete_expense(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<SuccessBody>, ApiError> {
    const ACTION: &str = "delete expense";
    let id = required(ACTION, "id", query.id)?;
    state
        .expenses
        .delete(&id)
        .map_err(|e| ApiError::new(ACTION, e))?;
    Ok(success())
}

/// GET /api/expenses/summary
async fn expense_summary(
    State(state): State<AppState>,
) -> Result<Json<ExpenseSummary>, ApiError> {
    state
        .expenses
        .summary()
        .map(Json)
        .map_err(|e| ApiError::new("read expenses", e))
}

// ============================================================================
// Group handlers
// ============================================================================

/// GET /api/groups
async fn list_groups(State(state): State<AppState>) -> Result<Json<Vec<Group>>, ApiError> {
    state
        .groups
        .list_groups()
        .map(Json)
        .map_err(|e| ApiError::new("read groups", e))
}

/// POST /api/groups
async fn create_group(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Group>), ApiError> {
    const ACTION: &str = "create group";
    let fields: GroupFields = parse_body(ACTION, body)?;
    let group = state
        .groups
        .create_group(fields)
        .map_err(|e| ApiError::new(ACTION, e))?;
    Ok((StatusCode::CREATED, Json(group)))
}

/// PUT /api/groups
async fn update_group(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Group>, ApiError> {
    const ACTION: &str = "update group";
    let request: UpdateGroupRequest = parse_body(ACTION, body)?;
    state
        .groups
        .update_group(&request.id, request.fields)
        .map(Json)
        .map_err(|e| ApiError::new(ACTION, e))
}

/// DELETE /api/groups?id=
async fn delete_group(
    State(state): State<AppState>,
    Query(query): Query<IdQuery>,
) -> Result<Json<SuccessBody>, ApiError> {
    const ACTION: &str = "delete group";
    let id = required(ACTION, "id", query.id)?;
    state
        .groups
        .delete_group(&id)
        .map_err(|e| ApiError::new(ACTION, e))?;
    Ok(success())
}

/// GET /api/groups/totals
async fn group_totals(State(state): State<AppState>) -> Result<Json<Vec<GroupTotals>>, ApiError> {
    state
        .groups
        .totals()
        .map(Json)
        .map_err(|e| ApiError::new("read groups", e))
}

/// POST /api/groups/items
async fn create_subitem(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<SubItem>), ApiError> {
    const ACTION: &str = "create sub-item";
    let request: CreateSubItemRequest = parse_body(ACTION, body)?;
    let item = state
        .groups
        .create_subitem(&request.group_id, request.fields)
        .map_err(|e| ApiError::new(ACTION, e))?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/groups/items
async fn update_subitem(
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SubItem>, ApiError> {
    const ACTION: &str = "update sub-item";
    let request: UpdateSubItemRequest = parse_body(ACTION, body)?;
    state
        .groups
        .update_subitem(&request.group_id, &request.id, request.fields)
        .map(Json)
        .map_err(|e| ApiError::new(ACTION, e))
}

/// DELETE /api/groups/items?groupId=&itemId=
async fn delete_subitem(
    State(state): State<AppState>,
    Query(query): Query<ItemQuery>,
) -> Result<Json<SuccessBody>, ApiError> {
    const ACTION: &str = "delete sub-item";
    let group_id = required(ACTION, "groupId", query.group_id)?;
    let item_id = required(ACTION, "itemId", query.item_id)?;
    state
        .groups
        .delete_subitem(&group_id, &item_id)
        .map_err(|e| ApiError::new(ACTION, e))?;
    Ok(success())
}

// ============================================================================
// Misc
// ============================================================================

/// GET /api/health
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "OK" }))
}

/// GET /api/translations?lang=ar|en
async fn translations(
    Query(query): Query<LanguageQuery>,
) -> Result<Json<TranslationsResponse>, ApiError> {
    let language = match query.lang {
        Some(code) => code
            .parse::<Language>()
            .map_err(|e| ApiError::new("load translations", e))?,
        None => Language::default(),
    };

    Ok(Json(TranslationsResponse {
        language,
        direction: language.direction(),
        strings: dictionary(language),
    }))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState, web_dir: Option<PathBuf>) -> Router {
    let api_routes = Router::new()
        .route("/health", get(health_check))
        .route(
            "/expenses",
            get(list_expenses)
                .post(create_expense)
                .put(update_expense)
                .delete(delete_expense),
        )
        .route("/expenses/summary", get(expense_summary))
        .route(
            "/groups",
            get(list_groups)
                .post(create_group)
                .put(update_group)
                .delete(delete_group),
        )
        .route("/groups/totals", get(group_totals))
        .route(
            "/groups/items",
            axum::routing::post(create_subitem)
                .put(update_subitem)
                .delete(delete_subitem),
        )
        .route("/translations", get(translations))
        .with_state(state);

    let app = Router::new()
        .nest("/api", api_routes)
        .layer(CorsLayer::permissive());

    match web_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use serde_json::json;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn app(dir: &TempDir) -> Router {
        let config = StoreConfig::new(dir.path());
        router(AppState::from_config(&config), None)
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    #[tokio::test]
    async fn test_expense_rent_scenario() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let (status, list) = send(&app, Method::GET, "/api/expenses", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list, json!([]));

        let (status, created) = send(
            &app,
            Method::POST,
            "/api/expenses",
            Some(json!({
                "description": "Rent",
                "category": "home",
                "amount": "500",
                "date": "2024-01-01",
                "status": "unpaid"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = created["id"].as_str().unwrap().to_string();

        let (_, list) = send(&app, Method::GET, "/api/expenses", None).await;
        let list = list.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["id"], id.as_str());
        assert_eq!(list[0]["description"], "Rent");
        assert_eq!(list[0]["category"], "home");
        assert_eq!(list[0]["amount"].as_f64(), Some(500.0));
        assert_eq!(list[0]["date"], "2024-01-01");
        assert_eq!(list[0]["status"], "unpaid");

        let (status, updated) = send(
            &app,
            Method::PUT,
            "/api/expenses",
            Some(json!({
                "id": id,
                "description": "Rent",
                "category": "home",
                "amount": 500,
                "date": "2024-01-01",
                "status": "paid"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "paid");

        let (_, list) = send(&app, Method::GET, "/api/expenses", None).await;
        assert_eq!(list[0]["status"], "paid");
        assert_eq!(list[0]["description"], "Rent");
        assert_eq!(list[0]["id"], id.as_str());

        let (status, body) =
            send(&app, Method::DELETE, &format!("/api/expenses?id={}", id), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));
    }

    #[tokio::test]
    async fn test_expense_error_statuses() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let (status, _) = send(&app, Method::DELETE, "/api/expenses", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, Method::DELETE, "/api/expenses?id=404", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("not found"));

        let (status, _) = send(
            &app,
            Method::PUT,
            "/api/expenses",
            Some(json!({
                "id": "missing",
                "description": "Rent",
                "category": "home",
                "amount": 1,
                "date": "2024-01-01",
                "status": "paid"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/expenses",
            Some(json!({
                "description": "Rent",
                "category": "luxury",
                "amount": 1,
                "date": "2024-01-01",
                "status": "paid"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_storage_failure_is_500() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("expenses.json"), "not json").unwrap();
        let app = app(&dir);

        let (status, body) = send(&app, Method::GET, "/api/expenses", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to read expenses");
    }

    #[tokio::test]
    async fn test_group_and_items_flow() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let (status, group) = send(
            &app,
            Method::POST,
            "/api/groups",
            Some(json!({ "name": "Kitchen Renovation", "category": "maintenance" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(group["items"], json!([]));
        assert!(group["createdDate"].is_string());
        let group_id = group["id"].as_str().unwrap().to_string();

        let mut item_ids = Vec::new();
        for (amount, status_value) in [(100, "unpaid"), (200, "paid")] {
            let (status, item) = send(
                &app,
                Method::POST,
                "/api/groups/items",
                Some(json!({
                    "groupId": group_id,
                    "description": "Cabinets",
                    "amount": amount,
                    "date": "2024-05-01",
                    "status": status_value
                })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
            item_ids.push(item["id"].as_str().unwrap().to_string());
        }

        let (_, totals) = send(&app, Method::GET, "/api/groups/totals", None).await;
        assert_eq!(totals[0]["total"].as_f64(), Some(300.0));
        assert_eq!(totals[0]["paidTotal"].as_f64(), Some(200.0));

        let (status, updated) = send(
            &app,
            Method::PUT,
            "/api/groups/items",
            Some(json!({
                "groupId": group_id,
                "id": item_ids[0],
                "description": "Cabinets",
                "amount": "100",
                "date": "2024-05-01",
                "status": "paid"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["status"], "paid");

        let (status, renamed) = send(
            &app,
            Method::PUT,
            "/api/groups",
            Some(json!({ "id": group_id, "name": "Kitchen", "category": "home" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(renamed["name"], "Kitchen");
        assert_eq!(renamed["items"].as_array().unwrap().len(), 2);
        assert_eq!(renamed["createdDate"], group["createdDate"]);

        let uri = format!("/api/groups/items?groupId={}&itemId={}", group_id, item_ids[1]);
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let uri = format!("/api/groups?id={}", group_id);
        let (status, _) = send(&app, Method::DELETE, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let (_, groups) = send(&app, Method::GET, "/api/groups", None).await;
        assert_eq!(groups, json!([]));
    }

    #[tokio::test]
    async fn test_subitem_addressing_errors() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/groups/items",
            Some(json!({
                "groupId": "ghost",
                "description": "x",
                "amount": 1,
                "date": "2024-01-01",
                "status": "paid"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, Method::DELETE, "/api/groups/items?groupId=g", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::DELETE, "/api/groups?id=", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_body_is_json_400() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/expenses")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());

        // Missing content type
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/expenses")
            .body(Body::from(r#"{"description":"Rent"}"#))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert!(body["error"].is_string());

        let (_, list) = send(&app, Method::GET, "/api/expenses", None).await;
        assert_eq!(list, json!([]));
    }

    #[tokio::test]
    async fn test_unknown_group_and_item_are_404() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/groups",
            Some(json!({ "id": "ghost", "name": "Kitchen", "category": "home" })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("Group not found"));

        let (status, _) = send(&app, Method::DELETE, "/api/groups?id=ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, group) = send(
            &app,
            Method::POST,
            "/api/groups",
            Some(json!({ "name": "Kitchen", "category": "home" })),
        )
        .await;
        let (status, body) = send(
            &app,
            Method::PUT,
            "/api/groups/items",
            Some(json!({
                "groupId": group["id"],
                "id": "ghost",
                "description": "Cabinets",
                "amount": 10,
                "date": "2024-05-01",
                "status": "paid"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("Sub-item not found"));
    }

    #[tokio::test]
    async fn test_write_failure_is_500() {
        let dir = TempDir::new().unwrap();
        // The data dir is a regular file, so the store file can never be created
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let app = router(AppState::from_config(&StoreConfig::new(&blocker)), None);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/expenses",
            Some(json!({
                "description": "Rent",
                "category": "home",
                "amount": 500,
                "date": "2024-01-01",
                "status": "unpaid"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to create expense");
    }

    #[tokio::test]
    async fn test_translations_and_health() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir);

        let (status, body) = send(&app, Method::GET, "/api/translations?lang=en", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["direction"], "ltr");
        assert_eq!(body["strings"]["app.title"], "Expense Tracker");

        let (_, body) = send(&app, Method::GET, "/api/translations", None).await;
        assert_eq!(body["language"], "ar");

        let (status, _) = send(&app, Method::GET, "/api/translations?lang=fr", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&app, Method::GET, "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
    }
}
