use super::Resource;
use crate::api::{ApiClient, ApiResult};
use crate::models::{Review, ReviewRequest};
use tracing::info;

/// Reviews of one listing, from the renter side
pub struct ReviewsStore {
    client: ApiClient,
    kos_id: u64,
    state: Resource<Vec<Review>>,
}

impl ReviewsStore {
    pub fn new(client: ApiClient, kos_id: u64) -> Self {
        Self {
            client,
            kos_id,
            state: Resource::default(),
        }
    }

    pub fn state(&self) -> &Resource<Vec<Review>> {
        &self.state
    }

    pub fn reviews(&self) -> &[Review] {
        &self.state.data
    }

    pub async fn refetch(&mut self) {
        if self.kos_id == 0 {
            return;
        }
        self.state.begin();
        let result = self.fetch().await;
        self.state.finish("reviews", result);
    }

    async fn fetch(&self) -> ApiResult<Vec<Review>> {
        self.client.society().list_reviews(self.kos_id).await?.into_data()
    }

    pub async fn add_review(&mut self, text: &str) -> ApiResult<String> {
        let request = ReviewRequest {
            review: text.to_string(),
        };
        let message = self
            .client
            .society()
            .create_review(self.kos_id, &request)
            .await?
            .into_message();
        info!("Posted review on listing {}", self.kos_id);
        self.refetch().await;
        Ok(message)
    }

    pub async fn delete_review(&mut self, id: u64) -> ApiResult<String> {
        let message = self.client.society().delete_review(id).await?.into_message();
        info!("Deleted review {}", id);
        self.refetch().await;
        Ok(message)
    }
}
