use super::{ApiClient, ApiResult};
use crate::models::{ApiResponse, LoginRequest, LoginResponse, RegisterRequest, User};
use tracing::info;

/// Public account endpoints
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse> {
        self.client.login(credentials).await
    }

    pub async fn register(&self, request: &RegisterRequest) -> ApiResult<ApiResponse<User>> {
        self.client.post("/register", request, false).await
    }

    /// Client-side only: forget the stored token and user
    pub fn logout(&self) -> ApiResult<()> {
        self.client.session().clear()?;
        info!("Cleared stored session");
        Ok(())
    }
}
