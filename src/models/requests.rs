use super::{BookingStatus, Gender, Role};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KosCreateRequest {
    pub user_id: u64,
    pub name: String,
    pub address: String,
    pub price_per_month: i64,
    pub gender: Gender,
}

/// Partial listing update; absent fields are left out of the body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KosUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_month: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityRequest {
    pub facility_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub review: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreateRequest {
    pub kos_id: u64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Owners may only move a booking to accept or reject
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingDecision {
    Accept,
    Reject,
}

impl From<BookingDecision> for BookingStatus {
    fn from(decision: BookingDecision) -> Self {
        match decision {
            BookingDecision::Accept => BookingStatus::Accept,
            BookingDecision::Reject => BookingStatus::Reject,
        }
    }
}

impl std::str::FromStr for BookingDecision {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept" => Ok(BookingDecision::Accept),
            "reject" => Ok(BookingDecision::Reject),
            other => Err(format!("unknown decision '{}', expected accept or reject", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingUpdateStatusRequest {
    pub status: BookingDecision,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ProfileUpdateRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppMakerRequest {
    pub name: String,
    pub school_class: String,
}

/// Listing search parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KosSearchParams {
    pub search: Option<String>,
}

/// Owner booking filters. `tgl` is a booking date (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingFilterParams {
    pub status: Option<BookingStatus>,
    pub tgl: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_updates_skip_absent_fields() {
        let update = KosUpdateRequest {
            name: Some("Kost Harmoni".to_string()),
            price_per_month: Some(650000),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "name": "Kost Harmoni", "price_per_month": 650000 })
        );
        assert!(ProfileUpdateRequest::default().is_empty());
    }

    #[test]
    fn booking_request_dates_are_iso() {
        let request = BookingCreateRequest {
            kos_id: 5,
            start_date: NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "kos_id": 5, "start_date": "2025-08-01", "end_date": "2025-09-01" })
        );
    }
}
