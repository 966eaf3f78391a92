//! Boarding-house management screens.
//!
//! `MockBoardingHouseBook` is a mock: an in-memory list seeded with sample
//! entries, with add and delete that are never persisted and never reach the
//! API client. Live owner listings go through `store::OwnerKosStore`.

use chrono::Utc;
use tracing::debug;

const SAMPLE_IMAGE: &str = "https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?w=400";

#[derive(Debug, Clone, PartialEq)]
pub struct BoardingEntry {
    pub id: u64,
    pub name: String,
    pub address: String,
    pub price: String,
    pub gender: String,
    pub status: String,
    pub image: String,
    pub about: Option<String>,
}

impl BoardingEntry {
    /// New entry with sample defaults for the fields the form leaves blank
    pub fn draft(name: impl Into<String>, address: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            address: address.into(),
            price: price.into(),
            gender: "L".to_string(),
            status: "Available".to_string(),
            image: SAMPLE_IMAGE.to_string(),
            about: None,
        }
    }

    fn sample(id: u64, about: &str) -> Self {
        Self {
            id,
            about: Some(about.to_string()),
            ..Self::draft(
                "Cluster Puri Indah II",
                "Jalan Sawojajar, Kota Malang",
                "500k/month",
            )
        }
    }

    fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query) || self.address.to_lowercase().contains(&query)
    }
}

/// In-memory stand-in for owner listing management
#[derive(Debug, Clone)]
pub struct MockBoardingHouseBook {
    entries: Vec<BoardingEntry>,
    selected: Option<u64>,
    last_id: u64,
}

impl Default for MockBoardingHouseBook {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBoardingHouseBook {
    /// Seeded with five sample entries, the first one selected
    pub fn new() -> Self {
        let mut entries = vec![BoardingEntry::sample(
            1,
            "SEGO SAMBEL MBK PIT, Perumahan Puri Indah 3. Tutup • Buka hari jam 07:00. Aneka nasi.",
        )];
        entries.extend((2..=5).map(|id| BoardingEntry::sample(id, "Keterangan singkat kos.")));
        Self {
            entries,
            selected: Some(1),
            last_id: 5,
        }
    }

    pub fn entries(&self) -> &[BoardingEntry] {
        &self.entries
    }

    pub fn selected(&self) -> Option<&BoardingEntry> {
        let id = self.selected?;
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Select an entry; unknown ids clear the selection
    pub fn select(&mut self, id: u64) {
        self.selected = self.entries.iter().any(|entry| entry.id == id).then_some(id);
    }

    /// Entries whose name or address contains `query`, case-insensitively.
    /// A blank query returns everything.
    pub fn filtered(&self, query: &str) -> Vec<&BoardingEntry> {
        if query.trim().is_empty() {
            return self.entries.iter().collect();
        }
        self.entries.iter().filter(|entry| entry.matches(query)).collect()
    }

    /// Prepend an entry under a fresh timestamp id and select it
    pub fn add(&mut self, mut entry: BoardingEntry) -> u64 {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or_default();
        let id = now.max(self.last_id + 1);
        self.last_id = id;
        entry.id = id;
        self.entries.insert(0, entry);
        self.selected = Some(id);
        debug!("Mock boarding house added with id {}", id);
        id
    }

    /// Remove the selected entry. Returns it, or `None` when nothing was selected.
    pub fn delete_selected(&mut self) -> Option<BoardingEntry> {
        let id = self.selected.take()?;
        let position = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(position))
    }

    pub fn render(&self, query: &str) -> String {
        let mut lines = vec!["Boarding House (mock data, changes are not saved)".to_string()];
        let rows = self.filtered(query);
        if rows.is_empty() {
            lines.push("No boarding houses match.".to_string());
        }
        for entry in rows {
            let marker = if Some(entry.id) == self.selected { ">" } else { " " };
            lines.push(format!(
                "{} #{} {} | {} | {} | {} | {}",
                marker, entry.id, entry.name, entry.address, entry.price, entry.gender, entry.status
            ));
        }
        if let Some(selected) = self.selected() {
            lines.push(String::new());
            lines.push(format!("Selected: {}", selected.name));
            if let Some(about) = &selected.about {
                lines.push(format!("About: {}", about));
            }
        }
        lines.join("\n")
    }
}

/// Sample boarding-house table for the owner overview, filtered by name
pub fn render_boarding_house_dashboard(search: &str) -> String {
    let rows: Vec<BoardingEntry> = (1..=3)
        .map(|id| BoardingEntry {
            price: "500K/month".to_string(),
            image: "/image/kos.png".to_string(),
            about: None,
            ..BoardingEntry::sample(id, "")
        })
        .filter(|entry| entry.name.to_lowercase().contains(&search.to_lowercase()))
        .collect();

    let mut lines = vec![format!(
        "{:<24} {:<30} {:<11} {:<6} {}",
        "Name", "Address", "Price", "Gender", "Status"
    )];
    for entry in rows {
        lines.push(format!(
            "{:<24} {:<30} {:<11} {:<6} {}",
            entry.name, entry.address, entry.price, entry.gender, entry.status
        ));
    }
    lines.join("\n")
}
