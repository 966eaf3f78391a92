//! Per-route screens rendered as plain text.
//!
//! Guards here are a convenience for the client. The backend still decides
//! what a token may do.

pub mod admin;
pub mod boarding_house;
pub mod dashboard;
pub mod order_track;
pub mod placeholder;

use crate::auth::{AuthContext, Route};
use crate::models::Role;

pub use admin::{render_admin_dashboard, render_owner_listings, render_profile, render_sidebar};
pub use boarding_house::{render_boarding_house_dashboard, BoardingEntry, MockBoardingHouseBook};
pub use dashboard::{render_bookings, render_dashboard, render_detail};
pub use order_track::render_order_track;

/// Outcome of a route guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    Allow,
    Redirect(Route),
}

fn guard_role(auth: &AuthContext, required: Role) -> Guard {
    match auth.user() {
        None => Guard::Redirect(Route::Login),
        Some(user) if user.role == required => Guard::Allow,
        Some(user) => Guard::Redirect(Route::home_for(user.role)),
    }
}

/// Owner-only pages: signed-out users go to login, renters to their dashboard
pub fn guard_owner(auth: &AuthContext) -> Guard {
    guard_role(auth, Role::Owner)
}

/// Renter-only pages: signed-out users go to login, owners to the admin dashboard
pub fn guard_society(auth: &AuthContext) -> Guard {
    guard_role(auth, Role::Society)
}

/// Short price label, `500000` -> `500k/month`
pub fn price_label(amount: i64) -> String {
    if amount >= 1000 && amount % 1000 == 0 {
        format!("{}k/month", amount / 1000)
    } else {
        format!("{}/month", amount)
    }
}
