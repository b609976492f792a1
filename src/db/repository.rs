//! Repository traits for store and menu persistence.
//!
//! One trait per aggregate so backends can be composed or mocked piecemeal;
//! [`FullRepository`] is the supertrait handlers work against. All traits
//! are `Send + Sync` to work with async Rust.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::error::RepositoryResult;
use crate::models::working_hours::WeeklySchedule;
use crate::models::{Category, CategoryCounts, FontStyle, Item, SpecialItem, Store, ThemeMode};

/// A page of results plus the unpaginated total.
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: usize,
}

/// Partial update for a store record. `None` leaves a field unchanged;
/// for nullable fields the inner `Option` distinguishes "set" from "clear".
#[derive(Debug, Clone, Default)]
pub struct StorePatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub brand_color: Option<String>,
    pub banner_url: Option<Option<String>>,
    pub logo_url: Option<Option<String>>,
    pub theme_mode: Option<ThemeMode>,
    pub font_style: Option<FontStyle>,
    pub currency: Option<String>,
    pub timezone: Option<String>,
    pub working_hours: Option<WeeklySchedule>,
}

#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Look up a store by its admin username (login).
    async fn find_store_by_username(&self, username: &str) -> RepositoryResult<Option<Store>>;

    /// Fetch a store by id; `NotFound` if absent.
    async fn get_store(&self, store_id: &str) -> RepositoryResult<Store>;

    /// The first store by creation time. The public storefront endpoints
    /// read whichever store exists; admin queries are keyed by session.
    async fn first_store(&self) -> RepositoryResult<Option<Store>>;

    async fn insert_store(&self, store: Store) -> RepositoryResult<Store>;

    async fn update_store(&self, store_id: &str, patch: StorePatch) -> RepositoryResult<Store>;
}

/// Input for category creation. `name` is the already-normalized slug.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub display: String,
    /// Explicit order; appended after the current maximum when `None`.
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub display: Option<String>,
    pub order: Option<i32>,
}

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Categories of a store ordered by `order`, then creation time.
    async fn list_categories(&self, store_id: &str) -> RepositoryResult<Vec<Category>>;

    async fn get_category(&self, store_id: &str, id: &str) -> RepositoryResult<Category>;

    /// Item/special counts referencing a category.
    async fn category_counts(
        &self,
        store_id: &str,
        category_id: &str,
    ) -> RepositoryResult<CategoryCounts>;

    /// Create a category; `Conflict` when the slug is taken within the store.
    async fn create_category(
        &self,
        store_id: &str,
        input: NewCategory,
    ) -> RepositoryResult<Category>;

    /// Update a category; slug uniqueness is re-checked on rename.
    async fn update_category(
        &self,
        store_id: &str,
        id: &str,
        patch: CategoryPatch,
    ) -> RepositoryResult<Category>;

    /// Delete a category; `Conflict` while items or specials still
    /// reference it.
    async fn delete_category(&self, store_id: &str, id: &str) -> RepositoryResult<()>;
}

/// Pagination plus filters for item listings. `page` is 1-based.
#[derive(Debug, Clone)]
pub struct ItemQuery {
    pub page: usize,
    pub per_page: usize,
    pub category_id: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    /// Case-insensitive substring match on the item name.
    pub search: Option<String>,
}

impl Default for ItemQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            category_id: None,
            min_price: None,
            max_price: None,
            search: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewItem {
    pub category_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    pub image_url: String,
    pub available: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub image_url: Option<String>,
    pub available: Option<bool>,
}

#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Newest-first paginated listing with filters applied before paging.
    async fn list_items(&self, store_id: &str, query: &ItemQuery) -> RepositoryResult<Paged<Item>>;

    async fn get_item(&self, store_id: &str, id: &str) -> RepositoryResult<Item>;

    /// Create an item; `Validation` when the category is not in the store.
    async fn create_item(&self, store_id: &str, input: NewItem) -> RepositoryResult<Item>;

    async fn update_item(
        &self,
        store_id: &str,
        id: &str,
        patch: ItemPatch,
    ) -> RepositoryResult<Item>;

    async fn delete_item(&self, store_id: &str, id: &str) -> RepositoryResult<()>;
}

/// Item filters plus the special-offer window filter.
#[derive(Debug, Clone, Default)]
pub struct SpecialItemQuery {
    pub base: ItemQuery,
    /// Keep only offers whose window contains `now` and that are available.
    pub active_only: bool,
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone)]
pub struct NewSpecialItem {
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
}

#[derive(Debug, Clone, Default)]
pub struct SpecialItemPatch {
    pub category_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    pub prev_price: Option<f64>,
    pub currency: Option<String>,
    pub image_url: Option<String>,
    pub available: Option<bool>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
}

#[async_trait]
pub trait SpecialItemRepository: Send + Sync {
    async fn list_special_items(
        &self,
        store_id: &str,
        query: &SpecialItemQuery,
    ) -> RepositoryResult<Paged<SpecialItem>>;

    async fn get_special_item(&self, store_id: &str, id: &str) -> RepositoryResult<SpecialItem>;

    async fn create_special_item(
        &self,
        store_id: &str,
        input: NewSpecialItem,
    ) -> RepositoryResult<SpecialItem>;

    async fn update_special_item(
        &self,
        store_id: &str,
        id: &str,
        patch: SpecialItemPatch,
    ) -> RepositoryResult<SpecialItem>;

    async fn delete_special_item(&self, store_id: &str, id: &str) -> RepositoryResult<()>;
}

/// Everything the HTTP layer needs from a backend.
pub trait FullRepository:
    StoreRepository + CategoryRepository + ItemRepository + SpecialItemRepository
{
}

impl<T> FullRepository for T where
    T: StoreRepository + CategoryRepository + ItemRepository + SpecialItemRepository
{
}
