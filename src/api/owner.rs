use super::client::with_query;
use super::{ApiClient, ApiResult, UploadFile};
use crate::models::{
    ApiResponse, Booking, BookingDecision, BookingFilterParams, BookingUpdateStatusRequest, Facility,
    FacilityRequest, Kos, KosCreateRequest, KosImage, KosSearchParams, KosUpdateRequest,
    ProfileUpdateRequest, Review, ReviewRequest, User,
};
use serde_json::Value;

/// Owner (admin) endpoints. All calls are authenticated.
pub struct OwnerApi<'a> {
    client: &'a ApiClient,
}

impl<'a> OwnerApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    // Listings

    pub async fn create_kos(&self, request: &KosCreateRequest) -> ApiResult<ApiResponse<Kos>> {
        self.client.post("/admin/store_kos", request, true).await
    }

    pub async fn list_kos(&self, params: &KosSearchParams) -> ApiResult<ApiResponse<Vec<Kos>>> {
        let search = params.search.as_deref().unwrap_or_default();
        let endpoint = with_query("/admin/show_kos", &[("search", search)]);
        self.client.get(&endpoint, true).await
    }

    pub async fn kos_detail(&self, id: u64) -> ApiResult<ApiResponse<Kos>> {
        self.client.get(&format!("/admin/detail_kos/{}", id), true).await
    }

    pub async fn update_kos(&self, id: u64, request: &KosUpdateRequest) -> ApiResult<ApiResponse<Kos>> {
        self.client.put(&format!("/update_kos/{}", id), request, true).await
    }

    pub async fn delete_kos(&self, id: u64) -> ApiResult<ApiResponse<Value>> {
        self.client.delete(&format!("/delete_kos/{}", id), true).await
    }

    // Facilities

    pub async fn list_facilities(&self, kos_id: u64) -> ApiResult<ApiResponse<Vec<Facility>>> {
        self.client.get(&format!("/show_facilities/{}", kos_id), true).await
    }

    pub async fn facility_detail(&self, id: u64) -> ApiResult<ApiResponse<Facility>> {
        self.client.get(&format!("/detail_facility/{}", id), true).await
    }

    pub async fn create_facility(&self, kos_id: u64, request: &FacilityRequest) -> ApiResult<ApiResponse<Facility>> {
        self.client
            .post(&format!("/store_facility/{}", kos_id), request, true)
            .await
    }

    pub async fn update_facility(&self, id: u64, request: &FacilityRequest) -> ApiResult<ApiResponse<Facility>> {
        self.client
            .put(&format!("/update_facility/{}", id), request, true)
            .await
    }

    pub async fn delete_facility(&self, id: u64) -> ApiResult<ApiResponse<Value>> {
        self.client.delete(&format!("/delete_facility/{}", id), true).await
    }

    // Images

    pub async fn list_images(&self, kos_id: u64) -> ApiResult<ApiResponse<Vec<KosImage>>> {
        self.client.get(&format!("/admin/show_image/{}", kos_id), true).await
    }

    pub async fn image_detail(&self, id: u64) -> ApiResult<ApiResponse<KosImage>> {
        self.client.get(&format!("/admin/detail_image/{}", id), true).await
    }

    pub async fn upload_image(&self, kos_id: u64, upload: UploadFile) -> ApiResult<ApiResponse<KosImage>> {
        self.client
            .post_multipart(&format!("/admin/upload_image/{}", kos_id), upload, true)
            .await
    }

    /// Replace the file behind an existing image (multipart POST)
    pub async fn update_image(&self, id: u64, upload: UploadFile) -> ApiResult<ApiResponse<KosImage>> {
        self.client
            .post_multipart(&format!("/admin/update_image/{}", id), upload, true)
            .await
    }

    pub async fn delete_image(&self, id: u64) -> ApiResult<ApiResponse<Value>> {
        self.client.delete(&format!("/admin/delete_image/{}", id), true).await
    }

    // Reviews

    pub async fn list_reviews(&self, kos_id: u64) -> ApiResult<ApiResponse<Vec<Review>>> {
        self.client.get(&format!("/admin/show_reviews/{}", kos_id), true).await
    }

    pub async fn create_review(&self, kos_id: u64, request: &ReviewRequest) -> ApiResult<ApiResponse<Review>> {
        self.client
            .post(&format!("/admin/store_reviews/{}", kos_id), request, true)
            .await
    }

    // Bookings

    pub async fn list_bookings(&self, filter: &BookingFilterParams) -> ApiResult<ApiResponse<Vec<Booking>>> {
        let status = filter.status.map(|status| status.as_str()).unwrap_or_default();
        let date = filter.tgl.map(|date| date.to_string()).unwrap_or_default();
        let endpoint = with_query("/admin/show_bookings", &[("status", status), ("tgl", date.as_str())]);
        self.client.get(&endpoint, true).await
    }

    pub async fn update_booking_status(&self, id: u64, decision: BookingDecision) -> ApiResult<ApiResponse<Booking>> {
        let request = BookingUpdateStatusRequest { status: decision };
        self.client
            .put(&format!("/admin/update_status_booking/{}", id), &request, true)
            .await
    }

    // Profile

    pub async fn update_profile(&self, request: &ProfileUpdateRequest) -> ApiResult<ApiResponse<User>> {
        self.client.put("/admin/update_profile", request, true).await
    }
}
