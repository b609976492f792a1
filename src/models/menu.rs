//! Menu records: categories, items, and time-bounded special offers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A menu category, unique per store by its slug `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub store_id: String,
    /// Internal slug-like name, normalized via [`normalize_slug`].
    pub name: String,
    /// Display name shown on the storefront.
    pub display: String,
    pub order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// How many items and special offers reference a category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCounts {
    pub items: usize,
    pub special_items: usize,
}

impl CategoryCounts {
    pub fn is_empty(&self) -> bool {
        self.items == 0 && self.special_items == 0
    }
}

/// A regular menu item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub store_id: String,
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    pub image_url: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A special offer: an item with a previous price and a validity window.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialItem {
    pub id: String,
    pub store_id: String,
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub prev_price: f64,
    pub currency: String,
    pub image_url: String,
    pub available: bool,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SpecialItem {
    /// An offer is active when available and `now` falls inside its window.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.available && self.date_from <= now && now <= self.date_to
    }
}

/// Normalize a raw category name into a slug: lowercase, whitespace runs
/// become `-`, anything outside `[a-z0-9_-]` is stripped, capped at 40 chars.
pub fn normalize_slug(raw: &str) -> String {
    let mut out = String::new();
    let mut last_was_space = false;
    for ch in raw.trim().to_lowercase().chars() {
        if ch.is_whitespace() {
            if !last_was_space {
                out.push('-');
            }
            last_was_space = true;
        } else {
            last_was_space = false;
            if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' || ch == '-' {
                out.push(ch);
            }
        }
    }
    out.chars().take(40).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("  Hot Drinks  "), "hot-drinks");
        assert_eq!(normalize_slug("Grill & BBQ"), "grill--bbq");
        assert_eq!(normalize_slug("UPPER_case-9"), "upper_case-9");
        assert_eq!(normalize_slug("مشاوي"), "");
    }

    #[test]
    fn test_normalize_slug_caps_length() {
        let long = "a".repeat(100);
        assert_eq!(normalize_slug(&long).len(), 40);
    }

    #[test]
    fn test_special_item_active_window() {
        let from = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap();
        let special = SpecialItem {
            id: "s1".to_string(),
            store_id: "store-1".to_string(),
            category_id: "c1".to_string(),
            name: "Winter deal".to_string(),
            description: None,
            price: 5.0,
            prev_price: 8.0,
            currency: "JD".to_string(),
            image_url: "https://cdn.example/s1.jpg".to_string(),
            available: true,
            date_from: from,
            date_to: to,
            created_at: from,
            updated_at: from,
        };

        let inside = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        let before = Utc.with_ymd_and_hms(2025, 12, 31, 12, 0, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap();
        assert!(special.is_active_at(inside));
        assert!(!special.is_active_at(before));
        assert!(!special.is_active_at(after));

        let mut off = special.clone();
        off.available = false;
        assert!(!off.is_active_at(inside));
    }
}
