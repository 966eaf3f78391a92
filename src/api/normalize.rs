//! The one place backend inconsistencies are reconciled.
//!
//! The backend flags success with either `status` or `success`, nests images
//! and facilities under `kos_image` / `kos_facilities`, sends prices as
//! strings, and returns bare file names for images. Everything past this
//! module sees a single shape.

use super::{ApiError, ApiResult};
use crate::models::{ApiResponse, Kos, KosImage, Price};
use tracing::warn;

/// Either convention counts
pub fn is_success<T>(response: &ApiResponse<T>) -> bool {
    response.status == Some(true) || response.success == Some(true)
}

impl<T> ApiResponse<T> {
    /// Payload of a successful envelope
    pub fn into_data(self) -> ApiResult<T> {
        if !is_success(&self) {
            return Err(ApiError::Rejected(self.failure_message()));
        }
        match self.data {
            Some(data) => Ok(data),
            None => Err(ApiError::MissingField(self.failure_message())),
        }
    }

    /// Success check for calls whose payload is irrelevant; returns the
    /// backend message
    pub fn ensure_success(self) -> ApiResult<String> {
        if is_success(&self) {
            Ok(self.message)
        } else {
            Err(ApiError::Rejected(self.failure_message()))
        }
    }

    /// Outcome message of a write. A 2xx status already means the write
    /// landed, so the envelope flags are not consulted.
    pub fn into_message(self) -> String {
        if self.message.is_empty() {
            "Request completed".to_string()
        } else {
            self.message
        }
    }

    fn failure_message(&self) -> String {
        if self.message.is_empty() {
            "Request was not successful".to_string()
        } else {
            self.message.clone()
        }
    }
}

/// Absolute URL for a stored image file
pub fn image_url(storage_url: &str, file: &str) -> String {
    format!("{}{}", storage_url, file)
}

/// Leading integer of a price string: optional whitespace and sign, then
/// digits. `"500000.00"` is `500000`, `"abc"` is `None`.
pub fn parse_price(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(idx, _)| idx)
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

fn normalize_image(image: &KosImage, storage_url: &str) -> KosImage {
    let mut image = image.clone();
    if let Some(file) = &image.file {
        image.image_url = Some(image_url(storage_url, file));
    }
    image
}

/// Reshape a listing for display. Idempotent.
pub fn normalize_kos(mut kos: Kos, storage_url: &str) -> Kos {
    if let Some(raw_images) = &kos.kos_image {
        kos.images = Some(
            raw_images
                .iter()
                .map(|image| normalize_image(image, storage_url))
                .collect(),
        );
    } else if let Some(images) = kos.images.take() {
        kos.images = Some(
            images
                .iter()
                .map(|image| normalize_image(image, storage_url))
                .collect(),
        );
    }

    if let Some(facilities) = &kos.kos_facilities {
        kos.facilities = Some(facilities.clone());
    }

    if let Price::Text(raw) = &kos.price_per_month {
        match parse_price(raw) {
            Some(amount) => kos.price_per_month = Price::Amount(amount),
            None => warn!("Listing {} has unparsable price '{}'", kos.id, raw),
        }
    }

    kos
}

pub fn normalize_kos_list(list: Vec<Kos>, storage_url: &str) -> Vec<Kos> {
    list.into_iter()
        .map(|kos| normalize_kos(kos, storage_url))
        .collect()
}
