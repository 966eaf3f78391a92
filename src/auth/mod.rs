//! Signed-in state shared by every page.

use crate::api::{ApiClient, ApiError, ApiResult};
use crate::models::{LoginRequest, RegisterRequest, Role, User};
use std::fmt;
use tracing::{error, info, warn};

/// Navigation targets. Auth operations answer with where to go next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
    AdminDashboard,
    BoardingHouse,
    BoardingHouseDashboard,
    ProfileOwner,
    OrderTrack,
    Detail(u64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::AdminDashboard => "/admin-dashboard".to_string(),
            Route::BoardingHouse => "/boarding-house".to_string(),
            Route::BoardingHouseDashboard => "/boarding-house-dashboard".to_string(),
            Route::ProfileOwner => "/profile_owner".to_string(),
            Route::OrderTrack => "/order_track".to_string(),
            Route::Detail(id) => format!("/detail/{}", id),
        }
    }

    /// Landing page after login
    pub fn home_for(role: Role) -> Self {
        match role {
            Role::Owner => Route::AdminDashboard,
            Role::Society => Route::Dashboard,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Current user plus the login, register and logout flows
pub struct AuthContext {
    client: ApiClient,
    user: Option<User>,
    loading: bool,
}

impl AuthContext {
    /// Hydrate from the session synchronously. A stored user that cannot be
    /// read counts as signed out.
    pub fn new(client: ApiClient) -> Self {
        let user = match client.session().user() {
            Ok(user) => user,
            Err(err) => {
                error!("Error loading user: {}", err);
                None
            }
        };
        Self {
            client,
            user,
            loading: false,
        }
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_owner(&self) -> bool {
        self.user.as_ref().map(|user| user.role) == Some(Role::Owner)
    }

    pub fn is_society(&self) -> bool {
        self.user.as_ref().map(|user| user.role) == Some(Role::Society)
    }

    /// Log in, persist token and user, and return the role's landing page.
    /// Nothing is written unless the response carries a token.
    pub async fn login(&mut self, credentials: &LoginRequest) -> ApiResult<Route> {
        self.loading = true;
        let result = self.try_login(credentials).await;
        self.loading = false;
        if let Err(err) = &result {
            error!("Login error: {}", err);
        }
        result
    }

    async fn try_login(&mut self, credentials: &LoginRequest) -> ApiResult<Route> {
        let response = self.client.auth().login(credentials).await?;

        let token = response
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::MissingField("Login failed: No token received".to_string()))?;
        let user = response
            .user
            .ok_or_else(|| ApiError::MissingField("Login failed: No user received".to_string()))?;

        match response.expires_in {
            Some(secs) => info!("Signed in as {} ({}), token expires in {}s", user.email, user.role, secs),
            None => info!("Signed in as {} ({})", user.email, user.role),
        }

        self.client.session().save(&token, &user)?;
        let route = Route::home_for(user.role);
        self.user = Some(user);
        Ok(route)
    }

    /// Create an account; on success the next stop is the login page
    pub async fn register(&mut self, request: &RegisterRequest) -> ApiResult<Route> {
        self.loading = true;
        let result = self.try_register(request).await;
        self.loading = false;
        if let Err(err) = &result {
            error!("Registration error: {}", err);
        }
        result
    }

    async fn try_register(&self, request: &RegisterRequest) -> ApiResult<Route> {
        let response = self.client.auth().register(request).await?;
        let message = response.ensure_success()?;
        info!("Registered {} as {}: {}", request.email, request.role, message);
        Ok(Route::Login)
    }

    /// Forget the session locally. The backend is not told.
    pub fn logout(&mut self) -> ApiResult<Route> {
        self.user = None;
        if let Err(err) = self.client.auth().logout() {
            warn!("Failed to clear session: {}", err);
            return Err(err);
        }
        Ok(Route::Login)
    }
}
