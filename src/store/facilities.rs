use super::Resource;
use crate::api::{ApiClient, ApiResult};
use crate::models::{Facility, FacilityRequest};
use tracing::info;

/// Facilities of one of the owner's listings
pub struct FacilitiesStore {
    client: ApiClient,
    kos_id: u64,
    state: Resource<Vec<Facility>>,
}

impl FacilitiesStore {
    pub fn new(client: ApiClient, kos_id: u64) -> Self {
        Self {
            client,
            kos_id,
            state: Resource::default(),
        }
    }

    pub fn state(&self) -> &Resource<Vec<Facility>> {
        &self.state
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.state.data
    }

    pub async fn refetch(&mut self) {
        if self.kos_id == 0 {
            return;
        }
        self.state.begin();
        let result = self.fetch().await;
        self.state.finish("facilities", result);
    }

    async fn fetch(&self) -> ApiResult<Vec<Facility>> {
        self.client.owner().list_facilities(self.kos_id).await?.into_data()
    }

    pub async fn add(&mut self, name: &str) -> ApiResult<String> {
        let request = FacilityRequest {
            facility_name: name.to_string(),
        };
        let message = self
            .client
            .owner()
            .create_facility(self.kos_id, &request)
            .await?
            .into_message();
        info!("Added facility '{}' to listing {}", name, self.kos_id);
        self.refetch().await;
        Ok(message)
    }

    pub async fn update(&mut self, id: u64, name: &str) -> ApiResult<String> {
        let request = FacilityRequest {
            facility_name: name.to_string(),
        };
        let message = self
            .client
            .owner()
            .update_facility(id, &request)
            .await?
            .into_message();
        info!("Renamed facility {} to '{}'", id, name);
        self.refetch().await;
        Ok(message)
    }

    pub async fn delete(&mut self, id: u64) -> ApiResult<String> {
        let message = self.client.owner().delete_facility(id).await?.into_message();
        info!("Deleted facility {}", id);
        self.refetch().await;
        Ok(message)
    }
}
