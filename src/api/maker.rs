use super::{ApiClient, ApiResult};
use crate::models::{ApiResponse, AppMaker, AppMakerRequest};

/// Registration of the consuming application with the multi-tenant backend
pub struct MakerApi<'a> {
    client: &'a ApiClient,
}

impl<'a> MakerApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn register(&self, request: &AppMakerRequest) -> ApiResult<ApiResponse<AppMaker>> {
        self.client.post("/register_app_maker", request, false).await
    }

    /// Maker identified by the configured `MakerID`
    pub async fn get(&self) -> ApiResult<ApiResponse<AppMaker>> {
        self.client.get("/getmaker", false).await
    }
}

#[cfg(test)]
mod tests {
    use crate::api::mock::MockTransport;
    use crate::api::{ApiClient, ApiConfig, Method};
    use crate::models::AppMakerRequest;
    use crate::session::Session;
    use serde_json::json;

    #[tokio::test]
    async fn maker_calls_are_unauthenticated() {
        let mock = MockTransport::new();
        mock.respond(
            200,
            json!({ "status": true, "message": "ok", "data": { "id": 1, "name": "Azura", "school_class": "XI RPL 2" } }),
        );
        mock.respond(
            200,
            json!({ "success": true, "message": "ok", "data": { "id": 1, "name": "Azura", "school_class": "XI RPL 2" } }),
        );

        let client = ApiClient::with_transport(ApiConfig::default(), Session::in_memory(), mock.clone());
        let registered = client
            .maker()
            .register(&AppMakerRequest {
                name: "Azura".to_string(),
                school_class: "XI RPL 2".to_string(),
            })
            .await
            .unwrap()
            .into_data()
            .unwrap();
        let fetched = client.maker().get().await.unwrap().into_data().unwrap();

        assert_eq!(registered, fetched);
        assert_eq!(
            mock.calls(&client.config().base_url),
            vec![
                (Method::Post, "/register_app_maker".to_string()),
                (Method::Get, "/getmaker".to_string()),
            ]
        );
        assert_eq!(mock.requests()[1].header("MakerID"), Some("1"));
    }
}
