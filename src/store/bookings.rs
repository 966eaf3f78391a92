use super::Resource;
use crate::api::{ApiClient, ApiResult};
use crate::models::{Booking, BookingCreateRequest, BookingDecision, BookingFilterParams, BookingStatus};
use chrono::NaiveDate;
use tracing::info;

/// The renter's own bookings
pub struct BookingsStore {
    client: ApiClient,
    status: Option<BookingStatus>,
    state: Resource<Vec<Booking>>,
}

impl BookingsStore {
    pub fn new(client: ApiClient, status: Option<BookingStatus>) -> Self {
        Self {
            client,
            status,
            state: Resource::default(),
        }
    }

    pub fn state(&self) -> &Resource<Vec<Booking>> {
        &self.state
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.state.data
    }

    pub async fn refetch(&mut self) {
        self.state.begin();
        let result = self.fetch().await;
        self.state.finish("bookings", result);
    }

    async fn fetch(&self) -> ApiResult<Vec<Booking>> {
        self.client.society().list_bookings(self.status).await?.into_data()
    }

    pub async fn create_booking(&mut self, kos_id: u64, start_date: NaiveDate, end_date: NaiveDate) -> ApiResult<String> {
        let request = BookingCreateRequest {
            kos_id,
            start_date,
            end_date,
        };
        let message = self
            .client
            .society()
            .create_booking(&request)
            .await?
            .into_message();
        info!("Booked listing {} from {} to {}", kos_id, start_date, end_date);
        self.refetch().await;
        Ok(message)
    }
}

/// Bookings across the owner's listings, filtered by status and date
pub struct OwnerBookingsStore {
    client: ApiClient,
    filter: BookingFilterParams,
    state: Resource<Vec<Booking>>,
}

impl OwnerBookingsStore {
    pub fn new(client: ApiClient, filter: BookingFilterParams) -> Self {
        Self {
            client,
            filter,
            state: Resource::default(),
        }
    }

    pub fn state(&self) -> &Resource<Vec<Booking>> {
        &self.state
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.state.data
    }

    pub async fn refetch(&mut self) {
        self.state.begin();
        let result = self.fetch().await;
        self.state.finish("owner bookings", result);
    }

    async fn fetch(&self) -> ApiResult<Vec<Booking>> {
        self.client.owner().list_bookings(&self.filter).await?.into_data()
    }

    /// Ask the backend to accept or reject a booking
    pub async fn update_status(&mut self, id: u64, decision: BookingDecision) -> ApiResult<String> {
        let message = self
            .client
            .owner()
            .update_booking_status(id, decision)
            .await?
            .into_message();
        info!("Booking {} set to {}", id, BookingStatus::from(decision));
        self.refetch().await;
        Ok(message)
    }
}
