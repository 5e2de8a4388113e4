use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;
use uuid::Uuid;

pub const API_PREFIX: &str = "/api/2.5";
pub const SEEDED_SERVICE_ID: &str = "svc-123";
pub const SEEDED_ACCOUNT_ID: &str = "acc-1";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "companyName")]
    pub company_name: String,
    pub email: String,
    pub status: String,
    #[serde(rename = "twofaEnabled")]
    pub twofa_enabled: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OptionProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OptionMeta {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "readOnly")]
    pub read_only: bool,
    pub property: OptionProperty,
}

impl OptionMeta {
    pub fn boolean(id: &str, name: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            title: title.to_string(),
            kind: "dynamic".to_string(),
            read_only: false,
            property: OptionProperty {
                name: name.to_string(),
                kind: "boolean".to_string(),
            },
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockService {
    pub options: BTreeMap<String, Value>,
    pub metadata: Vec<OptionMeta>,
    pub api_key: Option<String>,
}

#[derive(Clone, Debug)]
pub struct MockState {
    /// Expected bearer token; `None` disables the check.
    pub token: Option<String>,
    pub account: Account,
    pub services: HashMap<String, MockService>,
}

impl MockState {
    /// One account and one service (`svc-123`) with `cors`, `ftp` and
    /// `autoRedirect` options.
    pub fn seeded() -> Self {
        let service = MockService {
            options: BTreeMap::from([
                ("autoRedirect".to_string(), json!(true)),
                ("cors".to_string(), json!(false)),
                ("ftp".to_string(), json!(true)),
            ]),
            metadata: vec![
                OptionMeta::boolean("opt1", "cors", "CORS Settings"),
                OptionMeta::boolean("opt2", "ftp", "FTP Access"),
                OptionMeta::boolean("opt3", "autoRedirect", "Auto Redirect"),
            ],
            api_key: Some(new_api_key()),
        };
        Self {
            token: None,
            account: Account {
                id: SEEDED_ACCOUNT_ID.to_string(),
                company_name: "Example Media".to_string(),
                email: "ops@example.com".to_string(),
                status: "ACTIVE".to_string(),
                twofa_enabled: false,
            },
            services: HashMap::from([(SEEDED_SERVICE_ID.to_string(), service)]),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

pub type Db = Arc<RwLock<MockState>>;

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

fn new_api_key() -> String {
    Uuid::new_v4().simple().to_string()
}

fn error_body(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

fn service_not_found(id: &str) -> (StatusCode, Json<Value>) {
    error_body(StatusCode::NOT_FOUND, &format!("service {id} not found"))
}

pub fn app() -> Router {
    app_with_state(Arc::new(RwLock::new(MockState::seeded())))
}

pub fn app_with_state(db: Db) -> Router {
    let api = Router::new()
        .route("/accounts/me", get(get_current_account))
        .route("/accounts/{id}", get(get_account))
        .route("/services/{id}/options", get(get_options).put(update_options))
        .route("/services/{id}/options/metadata", get(get_options_metadata))
        .route(
            "/services/{id}/options/apikey",
            get(get_api_key).post(regenerate_api_key).delete(delete_api_key),
        )
        .route_layer(middleware::from_fn_with_state(db.clone(), require_token))
        .with_state(db);
    Router::new().nest(API_PREFIX, api)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_state(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(db)).await
}

async fn require_token(State(db): State<Db>, request: Request, next: Next) -> Response {
    let expected = db.read().await.token.clone();
    if let Some(expected) = expected {
        let presented = request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        if presented != Some(expected.as_str()) {
            return error_body(StatusCode::UNAUTHORIZED, "invalid or missing token").into_response();
        }
    }
    next.run(request).await
}

async fn get_current_account(State(db): State<Db>) -> Json<Account> {
    Json(db.read().await.account.clone())
}

async fn get_account(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Account>> {
    let state = db.read().await;
    if state.account.id == id {
        Ok(Json(state.account.clone()))
    } else {
        Err(error_body(StatusCode::NOT_FOUND, &format!("account {id} not found")))
    }
}

async fn get_options(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> ApiResult<Json<BTreeMap<String, Value>>> {
    let state = db.read().await;
    let service = state.services.get(&id).ok_or_else(|| service_not_found(&id))?;
    Ok(Json(service.options.clone()))
}

async fn get_options_metadata(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let state = db.read().await;
    let service = state.services.get(&id).ok_or_else(|| service_not_found(&id))?;
    Ok(Json(json!({
        "meta": { "count": service.metadata.len() },
        "data": service.metadata,
    })))
}

async fn update_options(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<BTreeMap<String, Value>>,
) -> ApiResult<Json<BTreeMap<String, Value>>> {
    let mut state = db.write().await;
    let service = state.services.get_mut(&id).ok_or_else(|| service_not_found(&id))?;

    let unknown: Vec<Value> = input
        .keys()
        .filter(|name| !service.metadata.iter().any(|m| &m.name == *name))
        .map(|name| {
            json!({
                "field": name,
                "code": "OPTION_NOT_AVAILABLE",
                "message": format!("option '{name}' is not available for this service"),
            })
        })
        .collect();
    if !unknown.is_empty() {
        return Err((StatusCode::BAD_REQUEST, Json(json!({ "errors": unknown }))));
    }

    debug!(service = %id, count = input.len(), "updating options");
    service.options.extend(input);
    Ok(Json(service.options.clone()))
}

async fn get_api_key(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    let state = db.read().await;
    let service = state.services.get(&id).ok_or_else(|| service_not_found(&id))?;
    let key = service
        .api_key
        .as_ref()
        .ok_or_else(|| error_body(StatusCode::NOT_FOUND, "no legacy api key"))?;
    Ok(Json(json!({ "apiKey": key })))
}

async fn regenerate_api_key(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    let mut state = db.write().await;
    let service = state.services.get_mut(&id).ok_or_else(|| service_not_found(&id))?;
    let key = new_api_key();
    service.api_key = Some(key.clone());
    Ok((StatusCode::CREATED, Json(json!({ "apiKey": key }))))
}

async fn delete_api_key(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    let mut state = db.write().await;
    let service = state.services.get_mut(&id).ok_or_else(|| service_not_found(&id))?;
    service.api_key = None;
    Ok(StatusCode::NO_CONTENT)
}
