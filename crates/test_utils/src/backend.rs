//! In-process mock of the portal backend
//!
//! An axum server bound to an ephemeral localhost port that speaks the
//! same JSON contract as the real backend: bearer-token auth, per-user
//! ownership of policies and claims, `{"message": ...}` error bodies.
//! Tests seed it directly and can inspect what the client sent.
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = MockBackend::start().await;
//! let token = backend.sign_in(&UserFixtures::ada());
//! backend.insert_policy(TestPolicyBuilder::new().build());
//! let config = ClientConfig::default().with_api_url(backend.url());
//! ```

use axum::{
    extract::{Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::Utc;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use core_kernel::{ClaimId, PolicyId, UserId};
use domain_account::{AuthResponse, LoginRequest, RegisterRequest, User};
use domain_claims::{Claim, ClaimStatus, CreateClaimRequest, UpdateClaimRequest};
use domain_policy::{CreatePolicyRequest, Policy, PolicyStatus, UpdatePolicyRequest};

/// Error answers of the mock backend
#[derive(Debug)]
pub enum MockError {
    Unauthorized,
    NotFound(&'static str),
    BadRequest(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            MockError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            MockError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{} not found", what)),
            MockError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
        };
        (status, Json(ErrorResponse { message })).into_response()
    }
}

#[derive(Debug, Clone)]
struct ForcedFailure {
    status: StatusCode,
    message: Option<String>,
    remaining: usize,
}

#[derive(Debug, Default)]
struct BackendData {
    accounts: Vec<(User, String)>,
    tokens: HashMap<String, UserId>,
    policies: Vec<Policy>,
    claims: Vec<Claim>,
    issued: u64,
    failure: Option<ForcedFailure>,
    last_authorization: Option<String>,
}

impl BackendData {
    fn issue_token(&mut self, user_id: UserId) -> String {
        self.issued += 1;
        let token = format!("token-{}-{}", user_id.get(), self.issued);
        self.tokens.insert(token.clone(), user_id);
        token
    }

    fn next_user_id(&self) -> UserId {
        UserId::new(self.accounts.iter().map(|(u, _)| u.id.get()).max().unwrap_or(0) + 1)
    }

    fn next_policy_id(&self) -> PolicyId {
        PolicyId::new(self.policies.iter().map(|p| p.id.get()).max().unwrap_or(0) + 1)
    }

    fn next_claim_id(&self) -> ClaimId {
        ClaimId::new(self.claims.iter().map(|c| c.id.get()).max().unwrap_or(0) + 1)
    }

    fn owned_policy(&self, user_id: UserId, id: PolicyId) -> Option<&Policy> {
        self.policies.iter().find(|p| p.id == id && p.user_id == user_id)
    }

    fn with_policy(&self, claim: &Claim) -> Claim {
        let mut claim = claim.clone();
        claim.policy = self.policies.iter().find(|p| p.id == claim.policy_id).cloned();
        claim
    }
}

#[derive(Debug, Default)]
struct BackendState {
    data: Mutex<BackendData>,
    requests: AtomicUsize,
}

type Shared = Arc<BackendState>;

/// A running mock backend; the server stops when this is dropped
pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Binds to `127.0.0.1:0` and starts serving
    pub async fn start() -> Self {
        let state: Shared = Arc::new(BackendState::default());
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend address");
        let app = router(state.clone());
        let server = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        Self { addr, state, server }
    }

    /// Base URL to hand to the client
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Adds an account that can sign in with `password`
    pub fn register_user(&self, user: User, password: &str) {
        self.state.data.lock().accounts.push((user, password.to_string()));
    }

    /// Adds the account if needed and issues a valid token for it
    pub fn sign_in(&self, user: &User) -> String {
        let mut data = self.state.data.lock();
        if !data.accounts.iter().any(|(u, _)| u.id == user.id) {
            data.accounts.push((user.clone(), crate::UserFixtures::password().to_string()));
        }
        data.issue_token(user.id)
    }

    pub fn insert_policy(&self, policy: Policy) {
        self.state.data.lock().policies.push(policy);
    }

    pub fn insert_claim(&self, mut claim: Claim) {
        claim.policy = None;
        self.state.data.lock().claims.push(claim);
    }

    /// Snapshot of every stored policy
    pub fn policies(&self) -> Vec<Policy> {
        self.state.data.lock().policies.clone()
    }

    /// Snapshot of every stored claim, without embedded policies
    pub fn claims(&self) -> Vec<Claim> {
        self.state.data.lock().claims.clone()
    }

    /// Number of requests received so far
    pub fn request_count(&self) -> usize {
        self.state.requests.load(Ordering::SeqCst)
    }

    /// `Authorization` header of the most recent request
    pub fn last_authorization(&self) -> Option<String> {
        self.state.data.lock().last_authorization.clone()
    }

    /// Invalidates every issued token, as an expired session would
    pub fn revoke_tokens(&self) {
        self.state.data.lock().tokens.clear();
    }

    /// Makes the next request fail with `status`
    ///
    /// # Arguments
    ///
    /// * `status` - HTTP status to answer with
    /// * `message` - Body `message`; `None` sends an empty body
    pub fn fail_next(&self, status: u16, message: Option<&str>) {
        self.fail_requests(1, status, message);
    }

    /// Makes the next `count` requests fail with `status`
    pub fn fail_requests(&self, count: usize, status: u16, message: Option<&str>) {
        self.state.data.lock().failure = Some(ForcedFailure {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: message.map(str::to_string),
            remaining: count,
        });
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

/// Returns a base URL nothing listens on
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{}", addr)
}

fn router(state: Shared) -> Router {
    let protected = Router::new()
        .route("/api/policies", get(list_policies).post(create_policy))
        .route(
            "/api/policies/:id",
            get(get_policy).put(update_policy).delete(delete_policy),
        )
        .route("/api/claims", get(list_claims).post(create_claim))
        .route(
            "/api/claims/:id",
            get(get_claim).put(update_claim).delete(delete_claim),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), require_token));

    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .merge(protected)
        .layer(middleware::from_fn_with_state(state.clone(), track))
        .with_state(state)
}

/// Counts requests, records the auth header, and applies forced failures
async fn track(State(state): State<Shared>, request: Request, next: Next) -> Response {
    state.requests.fetch_add(1, Ordering::SeqCst);
    let forced = {
        let mut data = state.data.lock();
        data.last_authorization = request
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok())
            .map(str::to_string);
        match data.failure.as_mut() {
            Some(failure) if failure.remaining > 0 => {
                failure.remaining -= 1;
                Some(failure.clone())
            }
            _ => None,
        }
    };

    match forced {
        Some(ForcedFailure { status, message: Some(message), .. }) => {
            (status, Json(ErrorResponse { message })).into_response()
        }
        Some(ForcedFailure { status, message: None, .. }) => status.into_response(),
        None => next.run(request).await,
    }
}

/// Resolves the bearer token to a user
async fn require_token(
    State(state): State<Shared>,
    mut request: Request,
    next: Next,
) -> Result<Response, MockError> {
    let user_id = {
        let header = request
            .headers()
            .get("Authorization")
            .and_then(|h| h.to_str().ok());
        let token = match header {
            Some(header) if header.starts_with("Bearer ") => &header[7..],
            _ => return Err(MockError::Unauthorized),
        };
        *state
            .data
            .lock()
            .tokens
            .get(token)
            .ok_or(MockError::Unauthorized)?
    };
    request.extensions_mut().insert(user_id);
    Ok(next.run(request).await)
}

async fn login(
    State(state): State<Shared>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, MockError> {
    let mut data = state.data.lock();
    let user = data
        .accounts
        .iter()
        .find(|(u, password)| u.email == request.email && *password == request.password)
        .map(|(u, _)| u.clone())
        .ok_or(MockError::Unauthorized)?;
    let token = data.issue_token(user.id);
    Ok(Json(AuthResponse { token, user }))
}

async fn register(
    State(state): State<Shared>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, MockError> {
    let mut data = state.data.lock();
    if data.accounts.iter().any(|(u, _)| u.email == request.email) {
        return Err(MockError::BadRequest("Email is already registered".into()));
    }
    let user = User {
        id: data.next_user_id(),
        email: request.email,
        first_name: request.first_name,
        last_name: request.last_name,
    };
    data.accounts.push((user.clone(), request.password));
    let token = data.issue_token(user.id);
    Ok(Json(AuthResponse { token, user }))
}

async fn list_policies(
    State(state): State<Shared>,
    Extension(user_id): Extension<UserId>,
) -> Json<Vec<Policy>> {
    let data = state.data.lock();
    Json(
        data.policies
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect(),
    )
}

async fn get_policy(
    State(state): State<Shared>,
    Extension(user_id): Extension<UserId>,
    Path(id): Path<i64>,
) -> Result<Json<Policy>, MockError> {
    let data = state.data.lock();
    data.owned_policy(user_id, PolicyId::new(id))
        .cloned()
        .map(Json)
        .ok_or(MockError::NotFound("Policy"))
}

fn check_policy_request(request: &CreatePolicyRequest) -> Result<(), MockError> {
    if request.premium_amount <= Decimal::ZERO {
        return Err(MockError::BadRequest("Premium must be positive".into()));
    }
    if request.end_date <= request.start_date {
        return Err(MockError::BadRequest("End date must be after start date".into()));
    }
    Ok(())
}

async fn create_policy(
    State(state): State<Shared>,
    Extension(user_id): Extension<UserId>,
    Json(request): Json<CreatePolicyRequest>,
) -> Result<(StatusCode, Json<Policy>), MockError> {
    check_policy_request(&request)?;
    let mut data = state.data.lock();
    let policy = Policy {
        id: data.next_policy_id(),
        user_id,
        insurer: request.insurer,
        policy_type: request.policy_type,
        premium_amount: request.premium_amount,
        start_date: request.start_date,
        end_date: request.end_date,
        status: PolicyStatus::Active,
    };
    data.policies.push(policy.clone());
    Ok((StatusCode::CREATED, Json(policy)))
}

async fn update_policy(
    State(state): State<Shared>,
    Extension(user_id): Extension<UserId>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePolicyRequest>,
) -> Result<Json<Policy>, MockError> {
    check_policy_request(&request.details)?;
    let mut data = state.data.lock();
    let policy = data
        .policies
        .iter_mut()
        .find(|p| p.id == PolicyId::new(id) && p.user_id == user_id)
        .ok_or(MockError::NotFound("Policy"))?;
    let details = request.details;
    policy.insurer = details.insurer;
    policy.policy_type = details.policy_type;
    policy.premium_amount = details.premium_amount;
    policy.start_date = details.start_date;
    policy.end_date = details.end_date;
    policy.status = request.status;
    Ok(Json(policy.clone()))
}

async fn delete_policy(
    State(state): State<Shared>,
    Extension(user_id): Extension<UserId>,
    Path(id): Path<i64>,
) -> Result<StatusCode, MockError> {
    let mut data = state.data.lock();
    let before = data.policies.len();
    data.policies
        .retain(|p| !(p.id == PolicyId::new(id) && p.user_id == user_id));
    if data.policies.len() == before {
        return Err(MockError::NotFound("Policy"));
    }
    Ok(StatusCode::NO_CONTENT)
}

async fn list_claims(
    State(state): State<Shared>,
    Extension(user_id): Extension<UserId>,
) -> Json<Vec<Claim>> {
    let data = state.data.lock();
    Json(
        data.claims
            .iter()
            .filter(|c| c.user_id == user_id)
            .map(|c| data.with_policy(c))
            .collect(),
    )
}

async fn get_claim(
    State(state): State<Shared>,
    Extension(user_id): Extension<UserId>,
    Path(id): Path<i64>,
) -> Result<Json<Claim>, MockError> {
    let data = state.data.lock();
    data.claims
        .iter()
        .find(|c| c.id == ClaimId::new(id) && c.user_id == user_id)
        .map(|c| Json(data.with_policy(c)))
        .ok_or(MockError::NotFound("Claim"))
}

async fn create_claim(
    State(state): State<Shared>,
    Extension(user_id): Extension<UserId>,
    Json(request): Json<CreateClaimRequest>,
) -> Result<(StatusCode, Json<Claim>), MockError> {
    if request.claim_amount <= Decimal::ZERO {
        return Err(MockError::BadRequest("Claim amount must be positive".into()));
    }
    let mut data = state.data.lock();
    if data.owned_policy(user_id, request.policy_id).is_none() {
        return Err(MockError::BadRequest("Policy does not belong to this user".into()));
    }
    let claim = Claim {
        id: data.next_claim_id(),
        policy_id: request.policy_id,
        user_id,
        claim_amount: request.claim_amount,
        description: request.description,
        status: ClaimStatus::Submitted,
        submitted_at: Utc::now(),
        policy: None,
    };
    data.claims.push(claim.clone());
    let created = data.with_policy(&claim);
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_claim(
    State(state): State<Shared>,
    Extension(user_id): Extension<UserId>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateClaimRequest>,
) -> Result<Json<Claim>, MockError> {
    let mut data = state.data.lock();
    let claim = data
        .claims
        .iter_mut()
        .find(|c| c.id == ClaimId::new(id) && c.user_id == user_id)
        .ok_or(MockError::NotFound("Claim"))?;
    if claim.status != ClaimStatus::Submitted {
        return Err(MockError::BadRequest("Only submitted claims can be changed".into()));
    }
    claim.claim_amount = request.claim_amount;
    claim.description = request.description;
    let updated = claim.clone();
    Ok(Json(data.with_policy(&updated)))
}

async fn delete_claim(
    State(state): State<Shared>,
    Extension(user_id): Extension<UserId>,
    Path(id): Path<i64>,
) -> Result<StatusCode, MockError> {
    let mut data = state.data.lock();
    let index = data
        .claims
        .iter()
        .position(|c| c.id == ClaimId::new(id) && c.user_id == user_id)
        .ok_or(MockError::NotFound("Claim"))?;
    if data.claims[index].status != ClaimStatus::Submitted {
        return Err(MockError::BadRequest("Only submitted claims can be deleted".into()));
    }
    data.claims.remove(index);
    Ok(StatusCode::NO_CONTENT)
}
