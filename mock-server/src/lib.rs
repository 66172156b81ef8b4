use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

const MAX_BODY: usize = 64 * 1024;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub account_id: String,
    pub groups: Vec<Value>,
    pub mutual: i64,
    pub alias: String,
    pub note: String,
    pub favorite: bool,
    pub created: DateTime<Utc>,
}

impl Friend {
    pub fn new(account_id: &str) -> Self {
        Self {
            account_id: account_id.to_string(),
            groups: Vec::new(),
            mutual: 0,
            alias: String::new(),
            note: String::new(),
            favorite: false,
            created: Utc::now(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingFriend {
    pub account_id: String,
    pub mutual: i64,
    pub favorite: bool,
    pub created: DateTime<Utc>,
}

impl PendingFriend {
    pub fn new(account_id: &str, mutual: i64) -> Self {
        Self {
            account_id: account_id.to_string(),
            mutual,
            favorite: false,
            created: Utc::now(),
        }
    }
}

/// `connections` is served exactly as seeded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestedFriend {
    pub account_id: String,
    pub connections: Value,
    pub mutual: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub accept_invites: String,
    pub mutual_privacy: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            accept_invites: "public".to_string(),
            mutual_privacy: "ALL".to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LimitsReached {
    pub incoming: bool,
    pub outgoing: bool,
    pub accepted: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub friends: Vec<Friend>,
    pub incoming: Vec<PendingFriend>,
    pub outgoing: Vec<PendingFriend>,
    pub suggested: Vec<SuggestedFriend>,
    pub blocklist: Vec<Value>,
    pub settings: Settings,
    pub limits_reached: LimitsReached,
}

/// One account's social graph. Friends are keyed by id so listings are
/// ordered and stable.
#[derive(Clone, Debug, Default)]
pub struct Account {
    pub friends: BTreeMap<String, Friend>,
    pub incoming: Vec<PendingFriend>,
    pub outgoing: Vec<PendingFriend>,
    pub suggested: Vec<SuggestedFriend>,
    pub blocklist: Vec<Value>,
    pub settings: Settings,
    pub limits_reached: LimitsReached,
}

impl Account {
    pub fn with_friend(mut self, friend: Friend) -> Self {
        self.friends.insert(friend.account_id.clone(), friend);
        self
    }

    pub fn with_incoming(mut self, pending: PendingFriend) -> Self {
        self.incoming.push(pending);
        self
    }

    fn summary(&self) -> Summary {
        Summary {
            friends: self.friends.values().cloned().collect(),
            incoming: self.incoming.clone(),
            outgoing: self.outgoing.clone(),
            suggested: self.suggested.clone(),
            blocklist: self.blocklist.clone(),
            settings: self.settings.clone(),
            limits_reached: self.limits_reached,
        }
    }
}

pub type Directory = HashMap<String, Account>;

/// What reached the server, captured before authorization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Clone, Default)]
pub struct MockState {
    directory: Arc<RwLock<Directory>>,
    requests: Arc<RwLock<Vec<RecordedRequest>>>,
}

impl MockState {
    pub fn new(directory: Directory) -> Self {
        Self {
            directory: Arc::new(RwLock::new(directory)),
            requests: Arc::default(),
        }
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().await.clone()
    }

    /// For callers outside the runtime, such as blocking client tests.
    pub fn blocking_requests(&self) -> Vec<RecordedRequest> {
        self.requests.blocking_read().clone()
    }

    pub async fn account(&self, id: &str) -> Option<Account> {
        self.directory.read().await.get(id).cloned()
    }
}

#[derive(Debug)]
pub enum MockError {
    Unauthorized,
    NotFound(String),
    Conflict(String),
    BadRequest(String),
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            MockError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "errors.com.epicgames.common.authentication.authentication_failed",
                "missing or malformed bearer token".to_string(),
            ),
            MockError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                "errors.com.epicgames.friends.friendship_not_found",
                message,
            ),
            MockError::Conflict(message) => (
                StatusCode::CONFLICT,
                "errors.com.epicgames.friends.duplicate_friendship",
                message,
            ),
            MockError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                "errors.com.epicgames.common.invalid_request",
                message,
            ),
        };
        (
            status,
            Json(json!({ "errorCode": code, "errorMessage": message })),
        )
            .into_response()
    }
}

pub fn app() -> Router {
    app_with_state(MockState::default())
}

pub fn app_with_state(state: MockState) -> Router {
    Router::new()
        .route(
            "/friends/api/v1/{account}/friends",
            get(list_friends).delete(remove_all_friends),
        )
        .route(
            "/friends/api/v1/{account}/friends/{friend_id}",
            get(get_friend).post(add_friend).delete(remove_friend),
        )
        .route(
            "/friends/api/v1/{account}/friends/{friend_id}/alias",
            put(set_alias).delete(remove_alias),
        )
        .route("/friends/api/v1/{account}/summary", get(summary))
        .route("/friends/api/v1/{account}/incoming", get(list_incoming))
        .route("/friends/api/v1/{account}/outgoing", get(list_outgoing))
        .route("/friends/api/v1/{account}/suggested", get(list_suggested))
        .layer(middleware::from_fn_with_state(state.clone(), record_and_authorize))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_state(listener, MockState::default()).await
}

pub async fn run_with_state(listener: TcpListener, state: MockState) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_state(state)).await
}

async fn record_and_authorize(State(state): State<MockState>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match axum::body::to_bytes(body, MAX_BODY).await {
        Ok(bytes) => bytes,
        Err(_) => return MockError::BadRequest("unreadable body".to_string()).into_response(),
    };
    let authorization = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    info!(method = %parts.method, path = %parts.uri.path(), "request");
    state.requests.write().await.push(RecordedRequest {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        authorization: authorization.clone(),
        body: String::from_utf8_lossy(&bytes).into_owned(),
    });

    let authorized = authorization
        .as_deref()
        .and_then(|value| value.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());
    if !authorized {
        return MockError::Unauthorized.into_response();
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

async fn list_friends(State(state): State<MockState>, Path(account): Path<String>) -> Json<Vec<Friend>> {
    let directory = state.directory.read().await;
    let friends = directory
        .get(&account)
        .map(|a| a.friends.values().cloned().collect())
        .unwrap_or_default();
    Json(friends)
}

async fn get_friend(
    State(state): State<MockState>,
    Path((account, friend_id)): Path<(String, String)>,
) -> Result<Json<Friend>, MockError> {
    let directory = state.directory.read().await;
    directory
        .get(&account)
        .and_then(|a| a.friends.get(&friend_id))
        .cloned()
        .map(Json)
        .ok_or_else(|| not_friends(&account, &friend_id))
}

/// Accepts a pending incoming request, otherwise records an outgoing one.
async fn add_friend(
    State(state): State<MockState>,
    Path((account, friend_id)): Path<(String, String)>,
) -> Result<StatusCode, MockError> {
    let mut directory = state.directory.write().await;
    let entry = directory.entry(account.clone()).or_default();

    if entry.friends.contains_key(&friend_id)
        || entry.outgoing.iter().any(|p| p.account_id == friend_id)
    {
        return Err(MockError::Conflict(format!(
            "{account} already has a friendship or request with {friend_id}"
        )));
    }

    match entry.incoming.iter().position(|p| p.account_id == friend_id) {
        Some(index) => {
            let pending = entry.incoming.remove(index);
            let friend = Friend {
                mutual: pending.mutual,
                ..Friend::new(&friend_id)
            };
            entry.friends.insert(friend_id, friend);
        }
        None => entry.outgoing.push(PendingFriend::new(&friend_id, 0)),
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Removes a friend, or cancels/declines a pending request with that account.
async fn remove_friend(
    State(state): State<MockState>,
    Path((account, friend_id)): Path<(String, String)>,
) -> Result<StatusCode, MockError> {
    let mut directory = state.directory.write().await;
    let entry = directory
        .get_mut(&account)
        .ok_or_else(|| not_friends(&account, &friend_id))?;

    let before = entry.friends.len() + entry.incoming.len() + entry.outgoing.len();
    entry.friends.remove(&friend_id);
    entry.incoming.retain(|p| p.account_id != friend_id);
    entry.outgoing.retain(|p| p.account_id != friend_id);
    let after = entry.friends.len() + entry.incoming.len() + entry.outgoing.len();

    if before == after {
        return Err(not_friends(&account, &friend_id));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_all_friends(State(state): State<MockState>, Path(account): Path<String>) -> StatusCode {
    if let Some(entry) = state.directory.write().await.get_mut(&account) {
        entry.friends.clear();
    }
    StatusCode::NO_CONTENT
}

/// The alias is the raw request body.
async fn set_alias(
    State(state): State<MockState>,
    Path((account, friend_id)): Path<(String, String)>,
    alias: String,
) -> Result<StatusCode, MockError> {
    if alias.trim().is_empty() {
        return Err(MockError::BadRequest("alias must not be empty".to_string()));
    }
    let mut directory = state.directory.write().await;
    let friend = directory
        .get_mut(&account)
        .and_then(|a| a.friends.get_mut(&friend_id))
        .ok_or_else(|| not_friends(&account, &friend_id))?;
    friend.alias = alias;
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_alias(
    State(state): State<MockState>,
    Path((account, friend_id)): Path<(String, String)>,
) -> Result<StatusCode, MockError> {
    let mut directory = state.directory.write().await;
    let friend = directory
        .get_mut(&account)
        .and_then(|a| a.friends.get_mut(&friend_id))
        .ok_or_else(|| not_friends(&account, &friend_id))?;
    friend.alias.clear();
    Ok(StatusCode::NO_CONTENT)
}

async fn summary(State(state): State<MockState>, Path(account): Path<String>) -> Json<Summary> {
    let directory = state.directory.read().await;
    Json(directory.get(&account).cloned().unwrap_or_default().summary())
}

async fn list_incoming(State(state): State<MockState>, Path(account): Path<String>) -> Json<Vec<PendingFriend>> {
    let directory = state.directory.read().await;
    Json(directory.get(&account).map(|a| a.incoming.clone()).unwrap_or_default())
}

async fn list_outgoing(State(state): State<MockState>, Path(account): Path<String>) -> Json<Vec<PendingFriend>> {
    let directory = state.directory.read().await;
    Json(directory.get(&account).map(|a| a.outgoing.clone()).unwrap_or_default())
}

async fn list_suggested(
    State(state): State<MockState>,
    Path(account): Path<String>,
) -> Json<Vec<SuggestedFriend>> {
    let directory = state.directory.read().await;
    Json(directory.get(&account).map(|a| a.suggested.clone()).unwrap_or_default())
}

fn not_friends(account: &str, friend_id: &str) -> MockError {
    MockError::NotFound(format!("friendship between {account} and {friend_id} does not exist"))
}
