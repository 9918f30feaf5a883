//! Backend API client
//!
//! A reqwest adapter for `PortalApi`. Every request:
//!
//! - carries `Authorization: Bearer <token>` when a session exists
//! - is attempted exactly once, with reqwest's default timeouts
//! - is logged with method, path, status and duration
//!
//! # Error Handling
//!
//! - 2xx -> body decoded into the expected type
//! - 401 -> session cleared, navigator sent to login, `ApiError::Unauthorized`
//! - other status -> `ApiError::Server` with the body's `message`, if any
//! - no response -> `ApiError::Transport`

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Instant;
use tracing::{info, warn};

use core_kernel::{ClaimId, PolicyId};
use domain_account::{AuthResponse, LoginRequest, RegisterRequest};
use domain_claims::{Claim, CreateClaimRequest, UpdateClaimRequest};
use domain_policy::{CreatePolicyRequest, Policy, UpdatePolicyRequest};

use crate::config::ClientConfig;
use crate::error::{ApiError, ApiResult};
use crate::navigation::Navigator;
use crate::ports::PortalApi;
use crate::session::SessionStore;

/// Error body the backend sends with non-2xx answers
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for the portal backend
#[derive(Debug, Clone)]
pub struct PortalClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
    navigator: Navigator,
}

impl PortalClient {
    /// Creates a client for the backend named in `config`
    ///
    /// # Arguments
    ///
    /// * `config` - Supplies the backend base URL
    /// * `session` - Source of the bearer token; cleared on 401
    /// * `navigator` - Sent to the login page on 401
    pub fn new(config: &ClientConfig, session: SessionStore, navigator: Navigator) -> ApiResult<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            base_url: config.base_url().to_string(),
            session,
            navigator,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Sends one request and applies the uniform failure contract
    async fn dispatch(&self, builder: RequestBuilder) -> ApiResult<Response> {
        let request = builder.build()?;
        let method = request.method().clone();
        let path = request.url().path().to_string();
        let started = Instant::now();

        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(e) => {
                warn!(method = %method, path = %path, error = %e, "API request failed");
                return Err(e.into());
            }
        };

        let status = response.status();
        info!(
            method = %method,
            path = %path,
            status = status.as_u16(),
            duration_ms = started.elapsed().as_millis() as u64,
            "API request"
        );

        if status.is_success() {
            return Ok(response);
        }

        let message = read_message(response).await;
        if status == StatusCode::UNAUTHORIZED {
            warn!(path = %path, "Backend rejected credentials; ending session");
            self.session.logout();
            self.navigator.redirect_to_login();
            return Err(ApiError::Unauthorized { message });
        }

        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResult<T> {
        let response = self.dispatch(builder).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

async fn read_message(response: Response) -> Option<String> {
    let body = response.text().await.ok()?;
    serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

#[async_trait]
impl PortalApi for PortalClient {
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse> {
        self.fetch(self.request(Method::POST, "/api/auth/login").json(request))
            .await
    }

    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse> {
        self.fetch(self.request(Method::POST, "/api/auth/register").json(request))
            .await
    }

    async fn list_policies(&self) -> ApiResult<Vec<Policy>> {
        self.fetch(self.request(Method::GET, "/api/policies")).await
    }

    async fn get_policy(&self, id: PolicyId) -> ApiResult<Policy> {
        self.fetch(self.request(Method::GET, &format!("/api/policies/{}", id.get())))
            .await
    }

    async fn create_policy(&self, request: &CreatePolicyRequest) -> ApiResult<Policy> {
        self.fetch(self.request(Method::POST, "/api/policies").json(request))
            .await
    }

    async fn update_policy(&self, id: PolicyId, request: &UpdatePolicyRequest) -> ApiResult<Policy> {
        let path = format!("/api/policies/{}", id.get());
        self.fetch(self.request(Method::PUT, &path).json(request)).await
    }

    async fn delete_policy(&self, id: PolicyId) -> ApiResult<()> {
        let path = format!("/api/policies/{}", id.get());
        self.dispatch(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }

    async fn list_claims(&self) -> ApiResult<Vec<Claim>> {
        self.fetch(self.request(Method::GET, "/api/claims")).await
    }

    async fn get_claim(&self, id: ClaimId) -> ApiResult<Claim> {
        self.fetch(self.request(Method::GET, &format!("/api/claims/{}", id.get())))
            .await
    }

    async fn create_claim(&self, request: &CreateClaimRequest) -> ApiResult<Claim> {
        self.fetch(self.request(Method::POST, "/api/claims").json(request))
            .await
    }

    async fn update_claim(&self, id: ClaimId, request: &UpdateClaimRequest) -> ApiResult<Claim> {
        let path = format!("/api/claims/{}", id.get());
        self.fetch(self.request(Method::PUT, &path).json(request)).await
    }

    async fn delete_claim(&self, id: ClaimId) -> ApiResult<()> {
        let path = format!("/api/claims/{}", id.get());
        self.dispatch(self.request(Method::DELETE, &path)).await?;
        Ok(())
    }
}
