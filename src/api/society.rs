use super::client::with_query;
use super::{ApiClient, ApiResult};
use crate::models::{
    ApiResponse, Booking, BookingCreateRequest, BookingStatus, Kos, KosSearchParams, ProfileUpdateRequest,
    Review, ReviewRequest, User,
};
use serde_json::Value;

/// Renter endpoints. All calls are authenticated.
pub struct SocietyApi<'a> {
    client: &'a ApiClient,
}

impl<'a> SocietyApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_kos(&self, params: &KosSearchParams) -> ApiResult<ApiResponse<Vec<Kos>>> {
        let search = params.search.as_deref().unwrap_or_default();
        let endpoint = with_query("/society/show_kos", &[("search", search)]);
        self.client.get(&endpoint, true).await
    }

    pub async fn kos_detail(&self, id: u64) -> ApiResult<ApiResponse<Kos>> {
        self.client.get(&format!("/society/detail_kos/{}", id), true).await
    }

    pub async fn list_reviews(&self, kos_id: u64) -> ApiResult<ApiResponse<Vec<Review>>> {
        self.client.get(&format!("/society/show_reviews/{}", kos_id), true).await
    }

    pub async fn create_review(&self, kos_id: u64, request: &ReviewRequest) -> ApiResult<ApiResponse<Review>> {
        self.client
            .post(&format!("/society/store_reviews/{}", kos_id), request, true)
            .await
    }

    pub async fn delete_review(&self, id: u64) -> ApiResult<ApiResponse<Value>> {
        self.client.delete(&format!("/society/delete_review/{}", id), true).await
    }

    pub async fn create_booking(&self, request: &BookingCreateRequest) -> ApiResult<ApiResponse<Booking>> {
        self.client.post("/society/booking", request, true).await
    }

    /// The caller's own bookings, optionally filtered by status
    pub async fn list_bookings(&self, status: Option<BookingStatus>) -> ApiResult<ApiResponse<Vec<Booking>>> {
        let status = status.map(|status| status.as_str()).unwrap_or_default();
        let endpoint = with_query("/society/show_bookings", &[("status", status)]);
        self.client.get(&endpoint, true).await
    }

    /// Booking receipt ("nota")
    pub async fn print_receipt(&self, id: u64) -> ApiResult<ApiResponse<Booking>> {
        self.client.get(&format!("/society/cetak_nota/{}", id), true).await
    }

    pub async fn update_profile(&self, request: &ProfileUpdateRequest) -> ApiResult<ApiResponse<User>> {
        self.client.put("/society/update_profile", request, true).await
    }
}
