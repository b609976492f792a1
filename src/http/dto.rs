//! Data Transfer Objects for the HTTP API.
//!
//! Wire names are camelCase to match the storefront client. Patch request
//! bodies use `Option<Option<T>>` for nullable fields so an absent key
//! leaves the field unchanged while an explicit `null` clears it.

use serde::{Deserialize, Serialize};

use crate::db::repository::{
    CategoryPatch, ItemPatch, ItemQuery, NewCategory, NewItem, NewSpecialItem, SpecialItemPatch,
    SpecialItemQuery, StorePatch,
};
use crate::models::working_hours::{OpenStatus, WeeklySchedule};
use crate::models::{
    normalize_slug, Category, CategoryCounts, FontStyle, Item, SpecialItem, Store, ThemeMode,
};
use chrono::{DateTime, Utc};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
}

// =============================================================================
// Auth
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub username: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}

// =============================================================================
// Store
// =============================================================================

/// Partial store update. Absent keys leave fields unchanged; `null` clears
/// the nullable ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStoreRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub brand_color: Option<String>,
    #[serde(default)]
    pub banner_url: Option<Option<String>>,
    #[serde(default)]
    pub logo_url: Option<Option<String>>,
    #[serde(default)]
    pub theme_mode: Option<ThemeMode>,
    #[serde(default)]
    pub font_style: Option<FontStyle>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub working_hours: Option<WeeklySchedule>,
}

impl From<UpdateStoreRequest> for StorePatch {
    fn from(req: UpdateStoreRequest) -> Self {
        StorePatch {
            name: req.name,
            description: req.description,
            brand_color: req.brand_color,
            banner_url: req.banner_url,
            logo_url: req.logo_url,
            theme_mode: req.theme_mode,
            font_style: req.font_style,
            currency: req.currency,
            timezone: req.timezone,
            working_hours: req.working_hours,
        }
    }
}

// =============================================================================
// Categories
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryListQuery {
    /// Attach item/special counts to each category.
    #[serde(default)]
    pub include_counts: bool,
}

/// A category, optionally enriched with reference counts.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    #[serde(flatten)]
    pub category: Category,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counts: Option<CategoryCounts>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryRequest {
    /// Slug; derived from `display` when absent.
    #[serde(default)]
    pub name: Option<String>,
    pub display: String,
    #[serde(default)]
    pub order: Option<i32>,
}

impl CreateCategoryRequest {
    pub fn into_new_category(self) -> NewCategory {
        let slug = match self.name {
            Some(name) if !name.trim().is_empty() => normalize_slug(&name),
            _ => normalize_slug(&self.display),
        };
        NewCategory {
            name: slug,
            display: self.display,
            order: self.order,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub order: Option<i32>,
}

impl From<UpdateCategoryRequest> for CategoryPatch {
    fn from(req: UpdateCategoryRequest) -> Self {
        CategoryPatch {
            name: req.name.map(|n| normalize_slug(&n)),
            display: req.display,
            order: req.order,
        }
    }
}

// =============================================================================
// Items
// =============================================================================

/// Pagination + filter query parameters shared by item listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemListQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub per_page: Option<usize>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub search: Option<String>,
}

impl From<ItemListQuery> for ItemQuery {
    fn from(q: ItemListQuery) -> Self {
        let defaults = ItemQuery::default();
        ItemQuery {
            page: q.page.unwrap_or(defaults.page),
            per_page: q.per_page.unwrap_or(defaults.per_page),
            category_id: q.category_id,
            min_price: q.min_price,
            max_price: q.max_price,
            search: q.search,
        }
    }
}

/// Paginated response envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResponse<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub per_page: usize,
}

/// An item enriched with its category's display name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    #[serde(flatten)]
    pub item: Item,
    pub category_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    #[serde(default)]
    pub currency: Option<String>,
    pub image_url: String,
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

impl CreateItemRequest {
    pub fn into_new_item(self, fallback_currency: &str) -> NewItem {
        NewItem {
            category_id: self.category_id,
            name: self.name,
            description: self.description,
            price: self.price,
            currency: self
                .currency
                .unwrap_or_else(|| fallback_currency.to_string()),
            image_url: self.image_url,
            available: self.available,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
}

impl From<UpdateItemRequest> for ItemPatch {
    fn from(req: UpdateItemRequest) -> Self {
        ItemPatch {
            category_id: req.category_id,
            name: req.name,
            description: req.description,
            price: req.price,
            currency: req.currency,
            image_url: req.image_url,
            available: req.available,
        }
    }
}

// =============================================================================
// Special items
// =============================================================================

// Fields are repeated rather than flattened: query-string deserialization
// cannot see through `#[serde(flatten)]` for numeric fields.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialItemListQuery {
    #[serde(default)]
    pub page: Option<usize>,
    #[serde(default)]
    pub per_page: Option<usize>,
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub active_only: bool,
}

impl From<SpecialItemListQuery> for SpecialItemQuery {
    fn from(q: SpecialItemListQuery) -> Self {
        SpecialItemQuery {
            base: ItemQuery::from(ItemListQuery {
                page: q.page,
                per_page: q.per_page,
                category_id: q.category_id,
                min_price: q.min_price,
                max_price: q.max_price,
                search: q.search,
            }),
            active_only: q.active_only,
            now: None,
        }
    }
}

/// A special offer enriched with its category's display name and the
/// computed active flag.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialItemView {
    #[serde(flatten)]
    pub item: SpecialItem,
    pub category_name: String,
    pub active: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSpecialItemRequest {
    pub category_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub prev_price: f64,
    #[serde(default)]
    pub currency: Option<String>,
    pub image_url: String,
    #[serde(default = "default_true")]
    pub available: bool,
    pub date_from: DateTime<Utc>,
    pub date_to: DateTime<Utc>,
}

impl CreateSpecialItemRequest {
    pub fn into_new_special(self, fallback_currency: &str) -> NewSpecialItem {
        NewSpecialItem {
            category_id: self.category_id,
            name: self.name,
            description: self.description,
            price: self.price,
            prev_price: self.prev_price,
            currency: self
                .currency
                .unwrap_or_else(|| fallback_currency.to_string()),
            image_url: self.image_url,
            available: self.available,
            date_from: self.date_from,
            date_to: self.date_to,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSpecialItemRequest {
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub prev_price: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub available: Option<bool>,
    #[serde(default)]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(default)]
    pub date_to: Option<DateTime<Utc>>,
}

impl From<UpdateSpecialItemRequest> for SpecialItemPatch {
    fn from(req: UpdateSpecialItemRequest) -> Self {
        SpecialItemPatch {
            category_id: req.category_id,
            name: req.name,
            description: req.description,
            price: req.price,
            prev_price: req.prev_price,
            currency: req.currency,
            image_url: req.image_url,
            available: req.available,
            date_from: req.date_from,
            date_to: req.date_to,
        }
    }
}

// =============================================================================
// Storefront
// =============================================================================

/// Public storefront payload: branding, live open status, and the menu.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuResponse {
    pub store: Store,
    pub open_status: OpenStatus,
    pub categories: Vec<MenuCategory>,
    pub special_items: Vec<SpecialItem>,
}

/// A category with its available items, in display order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuCategory {
    #[serde(flatten)]
    pub category: Category,
    pub items: Vec<Item>,
}

/// Brand settings for the storefront shell. Falls back to defaults when no
/// store exists yet.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandResponse {
    pub name: Option<String>,
    pub brand_color: Option<String>,
    pub logo_url: Option<String>,
    pub theme_mode: ThemeMode,
    pub font_style: FontStyle,
}

impl BrandResponse {
    pub fn from_store(store: &Store) -> Self {
        Self {
            name: Some(store.name.clone()),
            brand_color: store.brand_color.clone(),
            logo_url: store.logo_url.clone(),
            theme_mode: store.theme_mode,
            font_style: store.font_style,
        }
    }
}

impl Default for BrandResponse {
    fn default() -> Self {
        Self {
            name: None,
            brand_color: None,
            logo_url: None,
            theme_mode: ThemeMode::default(),
            font_style: FontStyle::default(),
        }
    }
}

// =============================================================================
// Uploads
// =============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    /// Public URL of the stored object.
    pub url: String,
    /// Storage key, usable for later deletion.
    pub key: String,
}
