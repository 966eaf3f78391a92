use super::transport::{ApiRequest, HttpTransport, Method, RawResponse, RequestBody, Transport, UploadFile};
use super::{ApiConfig, ApiError, ApiResult, AuthApi, MakerApi, OwnerApi, SocietyApi};
use crate::models::{ApiResponse, LoginRequest, LoginResponse};
use crate::session::Session;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error};

/// Backend client: builds headers, sends requests, decodes envelopes.
///
/// Cheap to clone; clones share the transport and the session.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    config: ApiConfig,
    session: Session,
}

impl ApiClient {
    /// Client talking HTTP through reqwest
    pub fn new(config: ApiConfig, session: Session) -> ApiResult<Self> {
        let transport = Arc::new(HttpTransport::new(config.timeout)?);
        Ok(Self::with_transport(config, session, transport))
    }

    pub fn with_transport(config: ApiConfig, session: Session, transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            config,
            session,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn maker(&self) -> MakerApi<'_> {
        MakerApi::new(self)
    }

    pub fn owner(&self) -> OwnerApi<'_> {
        OwnerApi::new(self)
    }

    pub fn society(&self) -> SocietyApi<'_> {
        SocietyApi::new(self)
    }

    /// `MakerID` always, JSON content type unless multipart, bearer token
    /// when requested and one is stored
    pub fn build_headers(&self, include_auth: bool, multipart: bool) -> ApiResult<Vec<(String, String)>> {
        let mut headers = vec![("MakerID".to_string(), self.config.maker_id.clone())];

        if !multipart {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        if include_auth {
            if let Some(token) = self.session.token()? {
                headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
            }
        }

        Ok(headers)
    }

    async fn dispatch(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody,
        include_auth: bool,
    ) -> ApiResult<RawResponse> {
        let headers = self.build_headers(include_auth, body.is_multipart())?;
        if include_auth {
            let has_token = headers.iter().any(|(name, _)| name == "Authorization");
            debug!("API request {} {} (token attached: {})", method.as_str(), endpoint, has_token);
        } else {
            debug!("API request {} {}", method.as_str(), endpoint);
        }

        let request = ApiRequest {
            method,
            url: self.config.endpoint_url(endpoint),
            headers,
            body,
        };

        self.transport.send(request).await.map_err(|err| {
            error!("API error {}: {}", endpoint, err);
            err
        })
    }

    /// Send a request and decode the standard envelope.
    ///
    /// Non-2xx statuses become `ApiError::Status` carrying the backend's
    /// `message`. The envelope's own success flag is not checked here.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        body: RequestBody,
        include_auth: bool,
    ) -> ApiResult<ApiResponse<T>> {
        let response = self.dispatch(method, endpoint, body, include_auth).await?;
        let value = parse_body(endpoint, &response)?;
        debug!("API response {} {}", endpoint, response.status);

        if !response.is_success() {
            let message = backend_message(&value).unwrap_or_else(|| {
                format!("API request failed with status {}", response.status)
            });
            error!("API error {}: {}", endpoint, message);
            return Err(ApiError::Status {
                status: response.status,
                message,
            });
        }

        serde_json::from_value(value).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, endpoint: &str, include_auth: bool) -> ApiResult<ApiResponse<T>> {
        self.request(Method::Get, endpoint, RequestBody::Empty, include_auth).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
        include_auth: bool,
    ) -> ApiResult<ApiResponse<T>> {
        let body = json_body(endpoint, body)?;
        self.request(Method::Post, endpoint, body, include_auth).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
        include_auth: bool,
    ) -> ApiResult<ApiResponse<T>> {
        let body = json_body(endpoint, body)?;
        self.request(Method::Put, endpoint, body, include_auth).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, endpoint: &str, include_auth: bool) -> ApiResult<ApiResponse<T>> {
        self.request(Method::Delete, endpoint, RequestBody::Empty, include_auth).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        upload: UploadFile,
        include_auth: bool,
    ) -> ApiResult<ApiResponse<T>> {
        self.request(Method::Post, endpoint, RequestBody::Multipart(upload), include_auth)
            .await
    }

    /// `POST /login`. The backend answers with the bare token payload, not the
    /// envelope, so this bypasses `request`.
    pub async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse> {
        let endpoint = "/login";
        let body = json_body(endpoint, credentials)?;
        let response = self.dispatch(Method::Post, endpoint, body, false).await?;
        let value = parse_body(endpoint, &response)?;

        if !response.is_success() {
            let message = backend_message(&value).unwrap_or_else(|| "Login failed".to_string());
            error!("Login API error: {}", message);
            return Err(ApiError::Status {
                status: response.status,
                message,
            });
        }

        serde_json::from_value(value).map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: e.to_string(),
        })
    }
}

/// `path?key=value&...`, form encoded; empty values are dropped
pub(crate) fn with_query(path: &str, pairs: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in pairs {
        if !value.is_empty() {
            serializer.append_pair(key, value);
            any = true;
        }
    }
    if any {
        format!("{}?{}", path, serializer.finish())
    } else {
        path.to_string()
    }
}

fn json_body<B: Serialize>(endpoint: &str, body: &B) -> ApiResult<RequestBody> {
    serde_json::to_value(body)
        .map(RequestBody::Json)
        .map_err(|e| ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: format!("Failed to encode request body: {}", e),
        })
}

/// JSON body of a response. An unparsable error body still yields a status
/// error rather than a decode error.
fn parse_body(endpoint: &str, response: &RawResponse) -> ApiResult<Value> {
    match serde_json::from_str::<Value>(&response.body) {
        Ok(value) => Ok(value),
        Err(_) if !response.is_success() => Ok(Value::Null),
        Err(e) => Err(ApiError::Decode {
            endpoint: endpoint.to_string(),
            message: format!("{}. Response body: {}", e, response.body),
        }),
    }
}

fn backend_message(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::models::{Kos, Role, User};
    use serde_json::json;

    fn client(mock: &Arc<MockTransport>) -> ApiClient {
        ApiClient::with_transport(ApiConfig::default(), Session::in_memory(), mock.clone())
    }

    fn society_user() -> User {
        User {
            id: 9,
            name: "Rina".to_string(),
            email: "rina@example.com".to_string(),
            phone: "0813".to_string(),
            role: Role::Society,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn headers_without_auth() {
        let mock = MockTransport::new();
        let client = client(&mock);
        client.session().save("secret", &society_user()).unwrap();

        let headers = client.build_headers(false, false).unwrap();
        assert_eq!(
            headers,
            vec![
                ("MakerID".to_string(), "1".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ]
        );
    }

    #[test]
    fn multipart_headers_skip_content_type() {
        let mock = MockTransport::new();
        let client = client(&mock);
        client.session().save("secret", &society_user()).unwrap();

        let headers = client.build_headers(true, true).unwrap();
        assert_eq!(
            headers,
            vec![
                ("MakerID".to_string(), "1".to_string()),
                ("Authorization".to_string(), "Bearer secret".to_string()),
            ]
        );
    }

    #[test]
    fn query_strings_are_encoded() {
        assert_eq!(with_query("/society/show_kos", &[("search", "")]), "/society/show_kos");
        assert_eq!(
            with_query("/society/show_kos", &[("search", "puri indah&co")]),
            "/society/show_kos?search=puri+indah%26co"
        );
        assert_eq!(
            with_query("/admin/show_bookings", &[("status", "pending"), ("tgl", "2025-08-10")]),
            "/admin/show_bookings?status=pending&tgl=2025-08-10"
        );
    }

    #[test]
    fn auth_requested_without_token_sends_none() {
        let mock = MockTransport::new();
        let headers = client(&mock).build_headers(true, false).unwrap();
        assert!(headers.iter().all(|(name, _)| name != "Authorization"));
    }

    #[tokio::test]
    async fn non_2xx_carries_backend_message() {
        let mock = MockTransport::new();
        mock.respond(422, json!({ "status": false, "message": "The name field is required." }));

        let err = client(&mock)
            .get::<Vec<Kos>>("/admin/show_kos", true)
            .await
            .unwrap_err();
        match err {
            ApiError::Status { status, message } => {
                assert_eq!(status, 422);
                assert_eq!(message, "The name field is required.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn non_2xx_without_message_is_generic() {
        let mock = MockTransport::new();
        mock.respond_raw(502, "<html>Bad Gateway</html>");

        let err = client(&mock)
            .get::<Vec<Kos>>("/society/show_kos", true)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "API request failed with status 502");
    }

    #[tokio::test]
    async fn garbage_2xx_is_decode_error() {
        let mock = MockTransport::new();
        mock.respond_raw(200, "not json");

        let err = client(&mock)
            .get::<Vec<Kos>>("/society/show_kos", true)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn login_returns_raw_payload_without_auth() {
        let mock = MockTransport::new();
        mock.respond(
            200,
            json!({
                "access_token": "t1",
                "token_type": "bearer",
                "expires_in": 3600,
                "user": { "id": 9, "name": "Rina", "email": "rina@example.com", "phone": "0813", "role": "society" }
            }),
        );

        let client = client(&mock);
        client.session().save("stale", &society_user()).unwrap();
        let response = client
            .login(&LoginRequest {
                email: "rina@example.com".to_string(),
                password: "x".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.access_token.as_deref(), Some("t1"));
        assert_eq!(response.expires_in, Some(3600));

        let request = mock.last_request().unwrap();
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, "https://learn.smktelkom-mlg.sch.id/kos/api/login");
        assert!(request.header("Authorization").is_none());
        assert_eq!(
            request.body,
            RequestBody::Json(json!({ "email": "rina@example.com", "password": "x" }))
        );
    }

    #[tokio::test]
    async fn login_failure_message() {
        let mock = MockTransport::new();
        mock.respond(401, json!({}));

        let err = client(&mock)
            .login(&LoginRequest {
                email: "a@b.com".to_string(),
                password: "wrong".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Login failed");
    }
}
