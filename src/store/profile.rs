use super::Resource;
use crate::api::{ApiClient, ApiError, ApiResult};
use crate::models::{ProfileUpdateRequest, Role, User};
use tracing::info;

/// The signed-in user's profile.
///
/// The backend has no profile read endpoint, so the snapshot comes from the
/// session and is replaced by whatever an update returns.
pub struct ProfileStore {
    client: ApiClient,
    state: Resource<Option<User>>,
}

impl ProfileStore {
    pub fn new(client: ApiClient) -> Self {
        let mut store = Self {
            client,
            state: Resource::default(),
        };
        store.reload();
        store
    }

    pub fn state(&self) -> &Resource<Option<User>> {
        &self.state
    }

    pub fn user(&self) -> Option<&User> {
        self.state.data.as_ref()
    }

    /// Re-read the user from the session
    pub fn reload(&mut self) {
        self.state.begin();
        let result = self.client.session().user().map_err(ApiError::from);
        self.state.finish("profile", result);
    }

    /// Send the changed fields to the role's profile endpoint. The returned
    /// user becomes the snapshot and is written to the session; a failed
    /// session write is returned as an error after the snapshot is updated.
    pub async fn update(&mut self, request: &ProfileUpdateRequest) -> ApiResult<String> {
        let role = self
            .user()
            .map(|user| user.role)
            .ok_or_else(|| ApiError::MissingField("Not signed in".to_string()))?;

        let response = match role {
            Role::Owner => self.client.owner().update_profile(request).await?,
            Role::Society => self.client.society().update_profile(request).await?,
        };
        let message = response.message.clone();
        let user = response.into_data()?;

        info!("Updated profile for user {}", user.id);
        self.state.finish("profile", Ok(Some(user.clone())));
        self.client.session().set_user(&user)?;
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::{ApiConfig, Method};
    use crate::session::{Session, SessionError, SessionStore, TOKEN_KEY, USER_KEY};
    use std::sync::Arc;
    use crate::store::fixtures::{client, ok};
    use serde_json::json;

    #[tokio::test]
    async fn owner_update_goes_to_admin_route_and_updates_session() {
        let mock = MockTransport::new();
        mock.respond(
            200,
            ok(json!({ "id": 1, "name": "Azura Smk Telkom", "email": "azura@example.com", "phone": "0812", "role": "owner" })),
        );
        let client = client(&mock);

        let mut store = ProfileStore::new(client.clone());
        assert_eq!(store.user().unwrap().name, "Azura");

        store
            .update(&ProfileUpdateRequest {
                name: Some("Azura Smk Telkom".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(store.user().unwrap().name, "Azura Smk Telkom");
        assert_eq!(client.session().user().unwrap().unwrap().name, "Azura Smk Telkom");
        assert_eq!(
            mock.calls(&client.config().base_url),
            vec![(Method::Put, "/admin/update_profile".to_string())]
        );
    }

    #[tokio::test]
    async fn signed_out_update_fails_without_request() {
        let mock = MockTransport::new();
        let client = ApiClient::with_transport(ApiConfig::default(), Session::in_memory(), mock.clone());

        let mut store = ProfileStore::new(client);
        assert!(store.user().is_none());
        assert!(store.update(&ProfileUpdateRequest::default()).await.is_err());
        assert!(mock.requests().is_empty());
    }

    struct ReadOnlyStore;

    impl SessionStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
            Ok(match key {
                TOKEN_KEY => Some("t1".to_string()),
                USER_KEY => Some(json!({ "id": 9, "name": "Rina", "role": "society" }).to_string()),
                _ => None,
            })
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), SessionError> {
            Err(SessionError::Poisoned)
        }

        fn remove(&self, _key: &str) -> Result<(), SessionError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn session_write_failure_is_reported() {
        let mock = MockTransport::new();
        mock.respond(
            200,
            ok(json!({ "id": 9, "name": "Rina Putri", "email": "rina@example.com", "phone": "0813", "role": "society" })),
        );
        let client = ApiClient::with_transport(
            ApiConfig::default(),
            Session::new(Arc::new(ReadOnlyStore)),
            mock.clone(),
        );

        let mut store = ProfileStore::new(client);
        let err = store
            .update(&ProfileUpdateRequest {
                name: Some("Rina Putri".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Session(SessionError::Poisoned)));
        assert_eq!(store.user().unwrap().name, "Rina Putri");
        assert_eq!(
            mock.calls(&ApiConfig::default().base_url),
            vec![(Method::Put, "/society/update_profile".to_string())]
        );
    }
}
