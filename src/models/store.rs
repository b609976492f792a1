//! Store (tenant) record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::working_hours::WeeklySchedule;

/// Storefront theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Storefront typography style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FontStyle {
    #[default]
    Classic,
    Elegant,
}

/// A tenant store: admin credentials, branding, and working hours.
///
/// Credentials are compared in plaintext, matching the original system;
/// hashing is out of scope here. The password never serializes into API
/// responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub name: String,
    pub description: Option<String>,
    pub brand_color: Option<String>,
    pub banner_url: Option<String>,
    pub logo_url: Option<String>,
    #[serde(default)]
    pub theme_mode: ThemeMode,
    #[serde(default)]
    pub font_style: FontStyle,
    pub currency: String,
    /// IANA timezone identifier, e.g. "Asia/Amman".
    pub timezone: String,
    pub working_hours: Option<WeeklySchedule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
