use super::placeholder::{self, PaymentStatus};
use super::price_label;
use crate::auth::Route;
use crate::models::User;
use crate::store::OwnerKosStore;

const SIDEBAR: [(&str, Route); 3] = [
    ("Dashboard", Route::AdminDashboard),
    ("Boarding House", Route::BoardingHouse),
    ("Settings", Route::ProfileOwner),
];

/// Owner navigation with the active entry marked
pub fn render_sidebar(active: Route) -> String {
    SIDEBAR
        .iter()
        .map(|(name, route)| {
            let marker = if *route == active { ">" } else { " " };
            format!("{} {:<16} {}", marker, name, route)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn display_name(user: Option<&User>) -> &str {
    user.map(|user| user.name.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or("Owner")
}

/// Owner home. The statistics and payment table are sample data until the
/// backend grows endpoints for them.
pub fn render_admin_dashboard(user: Option<&User>) -> String {
    let stats = placeholder::owner_stats();
    let mut lines = vec![
        format!("Welcome Back {}!", display_name(user)),
        String::new(),
        format!("Society      {:>4}  total society in boarding house", stats.total_society),
        format!("Reviews      {:>4}  total reviews in boarding house", stats.total_reviews),
        format!("Payments     {:>4}  amount pay in boarding house", stats.total_payment),
        format!("Last update: {}", stats.last_update),
        String::new(),
        "Payment (sample data)".to_string(),
    ];

    for row in placeholder::payments() {
        let status = match row.status {
            PaymentStatus::Done => "done",
            PaymentStatus::Unpaid => "unpaid",
        };
        lines.push(format!(
            "  {} {:<14} {:<26} {:<11} {} {}",
            row.id, row.username, row.email, row.price, row.gender, status
        ));
    }

    lines.join("\n")
}

/// Owner's live listing table
pub fn render_owner_listings(store: &OwnerKosStore) -> String {
    let state = store.state();
    if let Some(error) = &state.error {
        return format!("Error: {}", error);
    }
    if state.loading {
        return "Loading...".to_string();
    }
    if state.data.is_empty() {
        return "No boarding houses yet.".to_string();
    }
    state
        .data
        .iter()
        .map(|kos| {
            let price = kos
                .price_per_month
                .amount()
                .map(price_label)
                .unwrap_or_else(|| kos.price_per_month.to_string());
            format!("#{} {} | {} | {} | {}", kos.id, kos.name, kos.address, price, kos.gender)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings page for the signed-in account
pub fn render_profile(user: Option<&User>) -> String {
    match user {
        None => "Not signed in.".to_string(),
        Some(user) => [
            format!("Name:  {}", user.name),
            format!("Email: {}", user.email),
            format!("Phone: {}", user.phone),
            format!("Role:  {}", user.role),
        ]
        .join("\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockTransport;
    use crate::models::Role;
    use crate::store::fixtures::{client, kos, ok};
    use serde_json::json;

    #[test]
    fn sidebar_marks_active_route() {
        let sidebar = render_sidebar(Route::BoardingHouse);
        let active: Vec<&str> = sidebar.lines().filter(|line| line.starts_with('>')).collect();
        assert_eq!(active.len(), 1);
        assert!(active[0].contains("Boarding House"));
        assert!(active[0].ends_with("/boarding-house"));
    }

    #[test]
    fn admin_dashboard_uses_sample_data() {
        let user = User {
            id: 1,
            name: "Azura Smk Telkom".to_string(),
            email: String::new(),
            phone: String::new(),
            role: Role::Owner,
            created_at: None,
            updated_at: None,
        };
        let page = render_admin_dashboard(Some(&user));
        assert!(page.starts_with("Welcome Back Azura Smk Telkom!"));
        assert!(page.contains("keisya"));
        assert!(render_admin_dashboard(None).starts_with("Welcome Back Owner!"));
    }

    #[tokio::test]
    async fn owner_listing_table() {
        let mock = MockTransport::new();
        mock.respond(200, ok(json!([kos(41, "Kost Harmoni")])));
        let mut store = OwnerKosStore::new(client(&mock), None);
        store.refetch().await;
        assert_eq!(
            render_owner_listings(&store),
            "#41 Kost Harmoni | Jalan Sawojajar, Kota Malang | 500k/month | all"
        );
    }
}
