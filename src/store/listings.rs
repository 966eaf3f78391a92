use super::Resource;
use crate::api::normalize::{normalize_kos, normalize_kos_list};
use crate::api::{ApiClient, ApiError, ApiResult};
use crate::models::{Kos, KosCreateRequest, KosSearchParams, KosUpdateRequest};
use tracing::{debug, info};

fn search_params(search: &str) -> KosSearchParams {
    KosSearchParams {
        search: if search.is_empty() {
            None
        } else {
            Some(search.to_string())
        },
    }
}

/// Listings visible to renters, with a search term
pub struct KosListStore {
    client: ApiClient,
    search: String,
    state: Resource<Vec<Kos>>,
}

impl KosListStore {
    pub fn new(client: ApiClient, initial_search: Option<&str>) -> Self {
        Self {
            client,
            search: initial_search.unwrap_or_default().to_string(),
            state: Resource::default(),
        }
    }

    pub fn state(&self) -> &Resource<Vec<Kos>> {
        &self.state
    }

    pub fn listings(&self) -> &[Kos] {
        &self.state.data
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Change the search term and fetch again
    pub async fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
        self.refetch().await;
    }

    pub async fn refetch(&mut self) {
        self.state.begin();
        let result = self.fetch().await;
        if let Ok(list) = &result {
            debug!("Fetched {} listings", list.len());
        }
        self.state.finish("kos", result);
    }

    async fn fetch(&self) -> ApiResult<Vec<Kos>> {
        let response = self
            .client
            .society()
            .list_kos(&search_params(&self.search))
            .await?;
        let list = response.into_data()?;
        Ok(normalize_kos_list(list, &self.client.config().storage_url))
    }
}

/// One listing as seen by a renter
pub struct KosDetailStore {
    client: ApiClient,
    id: u64,
    state: Resource<Option<Kos>>,
}

impl KosDetailStore {
    pub fn new(client: ApiClient, id: u64) -> Self {
        Self {
            client,
            id,
            state: Resource::default(),
        }
    }

    pub fn state(&self) -> &Resource<Option<Kos>> {
        &self.state
    }

    pub fn kos(&self) -> Option<&Kos> {
        self.state.data.as_ref()
    }

    /// Fetch the listing. An id of 0 means "nothing selected" and is not fetched.
    pub async fn refetch(&mut self) {
        if self.id == 0 {
            return;
        }
        self.state.begin();
        let result = self.fetch().await;
        self.state.finish("kos detail", result);
    }

    async fn fetch(&self) -> ApiResult<Option<Kos>> {
        let kos = self.client.society().kos_detail(self.id).await?.into_data()?;
        Ok(Some(normalize_kos(kos, &self.client.config().storage_url)))
    }
}

/// The signed-in owner's listings
pub struct OwnerKosStore {
    client: ApiClient,
    search: String,
    state: Resource<Vec<Kos>>,
}

impl OwnerKosStore {
    pub fn new(client: ApiClient, initial_search: Option<&str>) -> Self {
        Self {
            client,
            search: initial_search.unwrap_or_default().to_string(),
            state: Resource::default(),
        }
    }

    pub fn state(&self) -> &Resource<Vec<Kos>> {
        &self.state
    }

    pub fn listings(&self) -> &[Kos] {
        &self.state.data
    }

    pub async fn set_search(&mut self, search: &str) {
        self.search = search.to_string();
        self.refetch().await;
    }

    pub async fn refetch(&mut self) {
        self.state.begin();
        let result = self.fetch().await;
        if let Ok(list) = &result {
            debug!("Fetched {} owner listings", list.len());
        }
        self.state.finish("owner kos", result);
    }

    async fn fetch(&self) -> ApiResult<Vec<Kos>> {
        let response = self
            .client
            .owner()
            .list_kos(&search_params(&self.search))
            .await?;
        let list = response.into_data()?;
        Ok(normalize_kos_list(list, &self.client.config().storage_url))
    }

    pub async fn create_kos(&mut self, request: &KosCreateRequest) -> ApiResult<String> {
        let message = self.client.owner().create_kos(request).await?.into_message();
        info!("Created listing '{}'", request.name);
        self.refetch().await;
        Ok(message)
    }

    pub async fn update_kos(&mut self, id: u64, request: &KosUpdateRequest) -> ApiResult<String> {
        let message = self
            .client
            .owner()
            .update_kos(id, request)
            .await?
            .into_message();
        info!("Updated listing {}", id);
        self.refetch().await;
        Ok(message)
    }

    pub async fn delete_kos(&mut self, id: u64) -> ApiResult<String> {
        let message = self.client.owner().delete_kos(id).await?.into_message();
        info!("Deleted listing {}", id);
        self.refetch().await;
        Ok(message)
    }

    /// Listing by id from the current snapshot
    pub fn find(&self, id: u64) -> Result<&Kos, ApiError> {
        self.state
            .data
            .iter()
            .find(|kos| kos.id == id)
            .ok_or_else(|| ApiError::MissingField(format!("Listing {} is not in the current list", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::api::Method;
    use crate::models::{Gender, Price};
    use crate::store::fixtures::{client, done, gets, kos, ok};
    use serde_json::json;

    #[tokio::test]
    async fn society_list_normalizes_and_searches() {
        let mock = MockTransport::new();
        mock.respond(200, ok(json!([kos(1, "Kost Harmoni"), kos(2, "Kost Putra Idaman")])));
        mock.respond(200, ok(json!([kos(1, "Kost Harmoni")])));
        let client = client(&mock);

        let mut store = KosListStore::new(client.clone(), None);
        assert!(store.state().loading);
        store.refetch().await;
        assert_eq!(store.listings().len(), 2);
        assert_eq!(store.listings()[0].price_per_month, Price::Amount(500000));
        assert!(store.state().is_ready());

        store.set_search("harmoni").await;
        assert_eq!(store.search(), "harmoni");
        assert_eq!(store.listings().len(), 1);
        assert_eq!(
            mock.calls(&client.config().base_url).last().unwrap(),
            &(Method::Get, "/society/show_kos?search=harmoni".to_string())
        );
    }

    #[tokio::test]
    async fn fetch_error_is_recorded_not_raised() {
        let mock = MockTransport::new();
        mock.respond(401, json!({ "message": "Unauthenticated." }));

        let mut store = KosListStore::new(client(&mock), None);
        store.refetch().await;

        assert_eq!(store.state().error.as_deref(), Some("Unauthenticated."));
        assert!(!store.state().loading);
        assert!(store.listings().is_empty());
    }

    #[tokio::test]
    async fn detail_skips_zero_id() {
        let mock = MockTransport::new();
        let mut store = KosDetailStore::new(client(&mock), 0);
        store.refetch().await;
        assert!(mock.requests().is_empty());
        assert!(store.kos().is_none());
    }

    #[tokio::test]
    async fn detail_is_normalized() {
        let mock = MockTransport::new();
        let mut raw = kos(42, "Kost Remaja Sawojajar");
        raw["kos_image"] = json!([{ "id": 3, "kos_id": 42, "file": "front.jpg" }]);
        mock.respond(200, ok(raw));

        let mut store = KosDetailStore::new(client(&mock), 42);
        store.refetch().await;

        let kos = store.kos().unwrap();
        assert_eq!(kos.gender, Gender::All);
        assert_eq!(
            kos.images.as_ref().unwrap()[0].image_url.as_deref(),
            Some("https://learn.smktelkom-mlg.sch.id/kos/storage/front.jpg")
        );
    }

    #[tokio::test]
    async fn delete_refetches_once_and_drops_listing() {
        let mock = MockTransport::new();
        mock.respond(200, ok(json!([kos(41, "Kost Harmoni"), kos(42, "Kost Remaja")])));
        mock.respond(200, done("Kos deleted"));
        mock.respond(200, ok(json!([kos(41, "Kost Harmoni")])));
        let client = client(&mock);

        let mut store = OwnerKosStore::new(client.clone(), None);
        store.refetch().await;
        assert!(store.find(42).is_ok());

        let message = store.delete_kos(42).await.unwrap();
        assert_eq!(message, "Kos deleted");

        assert_eq!(
            mock.calls(&client.config().base_url),
            vec![
                (Method::Get, "/admin/show_kos".to_string()),
                (Method::Delete, "/delete_kos/42".to_string()),
                (Method::Get, "/admin/show_kos".to_string()),
            ]
        );
        assert!(store.listings().iter().all(|kos| kos.id != 42));
        assert!(store.find(42).is_err());
    }

    #[tokio::test]
    async fn failed_mutation_keeps_loaded_listings() {
        let mock = MockTransport::new();
        mock.respond(200, ok(json!([kos(41, "Kost Harmoni"), kos(42, "Kost Remaja")])));
        mock.respond(403, json!({ "status": false, "message": "Forbidden" }));

        let mut store = OwnerKosStore::new(client(&mock), None);
        store.refetch().await;
        let before = store.listings().to_vec();

        let err = store.delete_kos(42).await.unwrap_err();

        assert_eq!(err.to_string(), "Forbidden");
        assert_eq!(gets(&mock), 1);
        assert_eq!(store.listings(), before.as_slice());
        assert!(store.state().error.is_none());
        assert!(store.find(42).is_ok());
    }

    #[tokio::test]
    async fn delete_without_success_flag_still_refetches() {
        let mock = MockTransport::new();
        mock.respond(200, json!({ "message": "Kos deleted" }));
        mock.respond(200, ok(json!([kos(41, "Kost Harmoni")])));

        let mut store = OwnerKosStore::new(client(&mock), None);
        assert_eq!(store.delete_kos(42).await.unwrap(), "Kos deleted");
        assert_eq!(gets(&mock), 1);
        assert!(store.find(42).is_err());
    }

    #[tokio::test]
    async fn odd_rows_do_not_sink_the_list() {
        let mock = MockTransport::new();
        let mut float_price = kos(1, "Kost Harmoni");
        float_price["price_per_month"] = json!(650000.0);
        let mut sql_timestamp = kos(2, "Kost Putra Idaman");
        sql_timestamp["created_at"] = json!("2025-07-20 10:00:00");
        mock.respond(200, ok(json!([float_price, sql_timestamp])));

        let mut store = KosListStore::new(client(&mock), None);
        store.refetch().await;

        assert!(store.state().error.is_none());
        assert_eq!(store.listings().len(), 2);
        assert_eq!(store.listings()[0].price_per_month, Price::Amount(650000));
        assert!(store.listings()[1].created_at.is_some());
    }

    #[tokio::test]
    async fn create_and_update_refetch() {
        let mock = MockTransport::new();
        mock.respond(200, done("created"));
        mock.respond(200, ok(json!([kos(50, "Kost Baru")])));
        mock.respond(200, done("updated"));
        mock.respond(200, ok(json!([kos(50, "Kost Baru Sekali")])));

        let mut store = OwnerKosStore::new(client(&mock), None);
        store
            .create_kos(&KosCreateRequest {
                user_id: 1,
                name: "Kost Baru".to_string(),
                address: "Jalan Klojen".to_string(),
                price_per_month: 600000,
                gender: Gender::Female,
            })
            .await
            .unwrap();
        assert_eq!(gets(&mock), 1);

        store
            .update_kos(
                50,
                &KosUpdateRequest {
                    name: Some("Kost Baru Sekali".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(gets(&mock), 2);
        assert_eq!(store.listings()[0].name, "Kost Baru Sekali");
    }
}
