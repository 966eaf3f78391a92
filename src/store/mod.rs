//! Resource stores: one per backend collection, each holding the last fetched
//! snapshot plus loading/error state.
//!
//! Every store follows the same contract. `refetch` re-issues the list call
//! and records either the new data or the error message, keeping the previous
//! data on failure. Mutations propagate their own errors and, only on success,
//! call `refetch` exactly once. There is no optimistic update and no cache.

pub mod bookings;
pub mod facilities;
pub mod images;
pub mod listings;
pub mod profile;
pub mod reviews;

use crate::api::ApiResult;
use tracing::warn;

pub use bookings::{BookingsStore, OwnerBookingsStore};
pub use facilities::FacilitiesStore;
pub use images::ImagesStore;
pub use listings::{KosDetailStore, KosListStore, OwnerKosStore};
pub use profile::ProfileStore;
pub use reviews::ReviewsStore;

/// Snapshot of a remote resource
#[derive(Debug, Clone, PartialEq)]
pub struct Resource<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T: Default> Default for Resource<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Resource<T> {
    /// Not fetched yet; starts out loading
    pub fn new(data: T) -> Self {
        Self {
            data,
            loading: true,
            error: None,
        }
    }

    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Record a fetch outcome. `what` names the resource in logs.
    pub(crate) fn finish(&mut self, what: &str, result: ApiResult<T>) {
        match result {
            Ok(data) => self.data = data,
            Err(err) => {
                warn!("Failed to fetch {}: {}", what, err);
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    pub fn is_ready(&self) -> bool {
        !self.loading && self.error.is_none()
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::api::mock::MockTransport;
    use crate::api::{ApiClient, ApiConfig, Method};
    use crate::session::Session;
    use serde_json::{json, Value};
    use std::sync::Arc;

    pub fn client(mock: &Arc<MockTransport>) -> ApiClient {
        let session = Session::in_memory();
        session
            .save(
                "t1",
                &crate::models::User {
                    id: 1,
                    name: "Azura".to_string(),
                    email: "azura@example.com".to_string(),
                    phone: "0812".to_string(),
                    role: crate::models::Role::Owner,
                    created_at: None,
                    updated_at: None,
                },
            )
            .unwrap();
        ApiClient::with_transport(ApiConfig::default(), session, mock.clone())
    }

    pub fn ok(data: Value) -> Value {
        json!({ "status": true, "message": "ok", "data": data })
    }

    pub fn done(message: &str) -> Value {
        json!({ "status": true, "message": message })
    }

    pub fn kos(id: u64, name: &str) -> Value {
        json!({
            "id": id,
            "user_id": 1,
            "name": name,
            "address": "Jalan Sawojajar, Kota Malang",
            "price_per_month": "500000",
            "gender": "all"
        })
    }

    pub fn gets(mock: &MockTransport) -> usize {
        mock.requests()
            .iter()
            .filter(|request| request.method == Method::Get)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ApiError;

    #[test]
    fn failed_fetch_keeps_previous_data() {
        let mut resource = Resource::new(vec![1, 2]);
        resource.begin();
        resource.finish("numbers", Err(ApiError::Rejected("Unauthorized".to_string())));

        assert_eq!(resource.data, vec![1, 2]);
        assert_eq!(resource.error.as_deref(), Some("Unauthorized"));
        assert!(!resource.loading);
        assert!(!resource.is_ready());

        resource.begin();
        assert!(resource.error.is_none());
        resource.finish("numbers", Ok(vec![3]));
        assert_eq!(resource.data, vec![3]);
        assert!(resource.is_ready());
    }
}
