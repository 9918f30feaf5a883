//! The backend port
//!
//! Page controllers are written against `PortalApi` rather than the HTTP
//! client, so the same controller runs against the real backend or any
//! other adapter. One method per resource action; each is a single attempt.

use async_trait::async_trait;

use core_kernel::{ClaimId, PolicyId};
use domain_account::{AuthResponse, LoginRequest, RegisterRequest};
use domain_claims::{Claim, CreateClaimRequest, UpdateClaimRequest};
use domain_policy::{CreatePolicyRequest, Policy, UpdatePolicyRequest};

use crate::error::ApiResult;

#[async_trait]
pub trait PortalApi: Send + Sync {
    /// `POST /api/auth/login`
    async fn login(&self, request: &LoginRequest) -> ApiResult<AuthResponse>;

    /// `POST /api/auth/register`
    async fn register(&self, request: &RegisterRequest) -> ApiResult<AuthResponse>;

    /// `GET /api/policies`
    async fn list_policies(&self) -> ApiResult<Vec<Policy>>;

    /// `GET /api/policies/{id}`
    async fn get_policy(&self, id: PolicyId) -> ApiResult<Policy>;

    /// `POST /api/policies`
    async fn create_policy(&self, request: &CreatePolicyRequest) -> ApiResult<Policy>;

    /// `PUT /api/policies/{id}`
    async fn update_policy(&self, id: PolicyId, request: &UpdatePolicyRequest) -> ApiResult<Policy>;

    /// `DELETE /api/policies/{id}`
    async fn delete_policy(&self, id: PolicyId) -> ApiResult<()>;

    /// `GET /api/claims`
    async fn list_claims(&self) -> ApiResult<Vec<Claim>>;

    /// `GET /api/claims/{id}`
    async fn get_claim(&self, id: ClaimId) -> ApiResult<Claim>;

    /// `POST /api/claims`
    async fn create_claim(&self, request: &CreateClaimRequest) -> ApiResult<Claim>;

    /// `PUT /api/claims/{id}`
    async fn update_claim(&self, id: ClaimId, request: &UpdateClaimRequest) -> ApiResult<Claim>;

    /// `DELETE /api/claims/{id}`
    async fn delete_claim(&self, id: ClaimId) -> ApiResult<()>;
}
