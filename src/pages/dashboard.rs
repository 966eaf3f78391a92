use super::price_label;
use crate::models::{Booking, Kos, User};
use crate::store::{KosDetailStore, KosListStore, ReviewsStore};

fn price_text(kos: &Kos) -> String {
    match kos.price_per_month.amount() {
        Some(amount) => price_label(amount),
        None => kos.price_per_month.to_string(),
    }
}

/// Renter home: greeting and listing cards
pub fn render_dashboard(user: Option<&User>, listings: &KosListStore) -> String {
    let mut lines = Vec::new();
    let name = user.map(|user| user.name.as_str()).filter(|name| !name.is_empty());
    lines.push(format!("Welcome back {}!", name.unwrap_or("there")));

    if !listings.search().is_empty() {
        lines.push(format!("Search: \"{}\"", listings.search()));
    }
    lines.push(String::new());

    let state = listings.state();
    if state.loading {
        lines.push("Loading boarding houses...".to_string());
        return lines.join("\n");
    }
    if let Some(error) = &state.error {
        lines.push(format!("Error: {}", error));
        return lines.join("\n");
    }
    if state.data.is_empty() {
        lines.push("No boarding houses found.".to_string());
        return lines.join("\n");
    }

    for (i, kos) in state.data.iter().enumerate() {
        lines.push(format!("{}. {} ({})", i + 1, kos.name, price_text(kos)));
        lines.push(format!("   {}", kos.address));
        lines.push(format!("   For: {}", kos.gender));
        let facilities = kos.facilities.as_deref().unwrap_or_default();
        if !facilities.is_empty() {
            let names: Vec<&str> = facilities.iter().map(|f| f.facility_name.as_str()).collect();
            lines.push(format!("   Facilities: {}", names.join(", ")));
        }
        lines.push(format!("   Detail: /detail/{}", kos.id));
    }

    lines.join("\n")
}

/// Listing detail with photos, facilities and reviews
pub fn render_detail(detail: &KosDetailStore, reviews: &ReviewsStore) -> String {
    let state = detail.state();
    if let Some(error) = &state.error {
        return format!("Error: {}", error);
    }
    let Some(kos) = detail.kos() else {
        return if state.loading {
            "Loading...".to_string()
        } else {
            "Boarding house not found.".to_string()
        };
    };

    let mut lines = vec![
        kos.name.clone(),
        kos.address.clone(),
        format!("{} | for {}", price_text(kos), kos.gender),
    ];

    if let Some(owner) = &kos.owner {
        lines.push(format!("Owner: {} ({})", owner.name, owner.phone));
    }

    let facilities = kos.facilities.as_deref().unwrap_or_default();
    lines.push(String::new());
    lines.push(format!("Facilities ({})", facilities.len()));
    for facility in facilities {
        lines.push(format!("  - {}", facility.facility_name));
    }

    let images = kos.images.as_deref().unwrap_or_default();
    lines.push(format!("Photos ({})", images.len()));
    for image in images {
        if let Some(url) = &image.image_url {
            lines.push(format!("  - {}", url));
        }
    }

    lines.push(String::new());
    let review_state = reviews.state();
    match &review_state.error {
        Some(error) => lines.push(format!("Reviews unavailable: {}", error)),
        None => {
            lines.push(format!("Reviews ({})", review_state.data.len()));
            for review in &review_state.data {
                let author = review
                    .user
                    .as_ref()
                    .map(|user| user.name.clone())
                    .unwrap_or_else(|| format!("user {}", review.user_id));
                lines.push(format!("  #{} {}: {}", review.id, author, review.review));
            }
        }
    }

    lines.join("\n")
}

/// Booking table, shared by the renter and owner views
pub fn render_bookings(bookings: &[Booking]) -> String {
    if bookings.is_empty() {
        return "No bookings.".to_string();
    }
    bookings
        .iter()
        .map(|booking| {
            let place = booking
                .kos
                .as_ref()
                .map(|kos| kos.name.clone())
                .unwrap_or_else(|| format!("kos {}", booking.kos_id));
            let who = booking
                .user
                .as_ref()
                .map(|user| format!(" by {}", user.name))
                .unwrap_or_default();
            format!(
                "#{} {}{}: {} to {} [{}]",
                booking.id, place, who, booking.start_date, booking.end_date, booking.status
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
