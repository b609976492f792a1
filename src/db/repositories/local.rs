//! In-memory repository for unit testing and local development.
//!
//! All state lives behind a single `parking_lot::RwLock`; reads take the
//! shared lock, writes take the exclusive lock. Good enough for a dev
//! server and deterministic tests; a SQL backend would attach at the same
//! trait seam.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::db::error::{RepositoryError, RepositoryResult};
use crate::db::repository::{
    CategoryPatch, CategoryRepository, ItemPatch, ItemQuery, ItemRepository, NewCategory, NewItem,
    NewSpecialItem, Paged, SpecialItemPatch, SpecialItemQuery, SpecialItemRepository, StorePatch,
    StoreRepository,
};
use crate::models::working_hours::default_working_hours;
use crate::models::{Category, CategoryCounts, Item, SpecialItem, Store};

#[derive(Default)]
struct State {
    stores: Vec<Store>,
    categories: HashMap<String, Category>,
    items: HashMap<String, Item>,
    special_items: HashMap<String, SpecialItem>,
}

/// In-memory implementation of the repository traits.
#[derive(Default)]
pub struct LocalRepository {
    state: RwLock<State>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository pre-seeded with a demo store using the default
    /// working hours, mirroring the original seed script.
    pub fn seeded(username: &str, password: &str, timezone: &str) -> Self {
        let repo = Self::new();
        let now = Utc::now();
        repo.state.write().stores.push(Store {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            password: password.to_string(),
            name: "Demo Restaurant".to_string(),
            description: Some("A customizable demo restaurant".to_string()),
            brand_color: Some("oklch(60% 0.17 264)".to_string()),
            banner_url: None,
            logo_url: None,
            theme_mode: Default::default(),
            font_style: Default::default(),
            currency: "JD".to_string(),
            timezone: timezone.to_string(),
            working_hours: Some(default_working_hours()),
            created_at: now,
            updated_at: now,
        });
        repo
    }

    fn counts_in(state: &State, store_id: &str, category_id: &str) -> CategoryCounts {
        CategoryCounts {
            items: state
                .items
                .values()
                .filter(|i| i.store_id == store_id && i.category_id == category_id)
                .count(),
            special_items: state
                .special_items
                .values()
                .filter(|s| s.store_id == store_id && s.category_id == category_id)
                .count(),
        }
    }

    fn slug_taken(state: &State, store_id: &str, name: &str, except_id: Option<&str>) -> bool {
        state.categories.values().any(|c| {
            c.store_id == store_id && c.name == name && Some(c.id.as_str()) != except_id
        })
    }

    fn require_category(state: &State, store_id: &str, category_id: &str) -> RepositoryResult<()> {
        let ok = state
            .categories
            .get(category_id)
            .is_some_and(|c| c.store_id == store_id);
        if ok {
            Ok(())
        } else {
            Err(RepositoryError::Validation(format!(
                "category {category_id} does not exist in store"
            )))
        }
    }
}

fn matches_item_query(item: &Item, query: &ItemQuery) -> bool {
    if let Some(ref cat) = query.category_id {
        if &item.category_id != cat {
            return false;
        }
    }
    if let Some(min) = query.min_price {
        if item.price < min {
            return false;
        }
    }
    if let Some(max) = query.max_price {
        if item.price > max {
            return false;
        }
    }
    if let Some(ref search) = query.search {
        if !item.name.to_lowercase().contains(&search.to_lowercase()) {
            return false;
        }
    }
    true
}

fn paginate<T>(mut all: Vec<T>, page: usize, per_page: usize) -> Paged<T> {
    let total = all.len();
    let page = page.max(1);
    let per_page = per_page.clamp(1, 50);
    let start = (page - 1) * per_page;
    let items = if start >= total {
        Vec::new()
    } else {
        all.drain(start..(start + per_page).min(total)).collect()
    };
    Paged { items, total }
}

#[async_trait]
impl StoreRepository for LocalRepository {
    async fn find_store_by_username(&self, username: &str) -> RepositoryResult<Option<Store>> {
        let state = self.state.read();
        Ok(state.stores.iter().find(|s| s.username == username).cloned())
    }

    async fn get_store(&self, store_id: &str) -> RepositoryResult<Store> {
        let state = self.state.read();
        state
            .stores
            .iter()
            .find(|s| s.id == store_id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("store", store_id))
    }

    async fn first_store(&self) -> RepositoryResult<Option<Store>> {
        let state = self.state.read();
        Ok(state
            .stores
            .iter()
            .min_by_key(|s| s.created_at)
            .cloned())
    }

    async fn insert_store(&self, store: Store) -> RepositoryResult<Store> {
        let mut state = self.state.write();
        if state.stores.iter().any(|s| s.username == store.username) {
            return Err(RepositoryError::Conflict(format!(
                "username {} is taken",
                store.username
            )));
        }
        state.stores.push(store.clone());
        Ok(store)
    }

    async fn update_store(&self, store_id: &str, patch: StorePatch) -> RepositoryResult<Store> {
        let mut state = self.state.write();
        let store = state
            .stores
            .iter_mut()
            .find(|s| s.id == store_id)
            .ok_or_else(|| RepositoryError::not_found("store", store_id))?;

        if let Some(name) = patch.name {
            store.name = name;
        }
        if let Some(description) = patch.description {
            store.description = description;
        }
        if let Some(brand_color) = patch.brand_color {
            store.brand_color = Some(brand_color);
        }
        if let Some(banner_url) = patch.banner_url {
            store.banner_url = banner_url;
        }
        if let Some(logo_url) = patch.logo_url {
            store.logo_url = logo_url;
        }
        if let Some(theme_mode) = patch.theme_mode {
            store.theme_mode = theme_mode;
        }
        if let Some(font_style) = patch.font_style {
            store.font_style = font_style;
        }
        if let Some(currency) = patch.currency {
            store.currency = currency;
        }
        if let Some(timezone) = patch.timezone {
            store.timezone = timezone;
        }
        if let Some(working_hours) = patch.working_hours {
            store.working_hours = Some(working_hours);
        }
        store.updated_at = Utc::now();
        Ok(store.clone())
    }
}

#[async_trait]
impl CategoryRepository for LocalRepository {
    async fn list_categories(&self, store_id: &str) -> RepositoryResult<Vec<Category>> {
        let state = self.state.read();
        let mut categories: Vec<Category> = state
            .categories
            .values()
            .filter(|c| c.store_id == store_id)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.order.cmp(&b.order).then(a.created_at.cmp(&b.created_at)));
        Ok(categories)
    }

    async fn get_category(&self, store_id: &str, id: &str) -> RepositoryResult<Category> {
        let state = self.state.read();
        state
            .categories
            .get(id)
            .filter(|c| c.store_id == store_id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("category", id))
    }

    async fn category_counts(
        &self,
        store_id: &str,
        category_id: &str,
    ) -> RepositoryResult<CategoryCounts> {
        let state = self.state.read();
        Ok(Self::counts_in(&state, store_id, category_id))
    }

    async fn create_category(
        &self,
        store_id: &str,
        input: NewCategory,
    ) -> RepositoryResult<Category> {
        let mut state = self.state.write();
        if Self::slug_taken(&state, store_id, &input.name, None) {
            return Err(RepositoryError::Conflict(format!(
                "category name {} is taken",
                input.name
            )));
        }
        let order = input.order.unwrap_or_else(|| {
            state
                .categories
                .values()
                .filter(|c| c.store_id == store_id)
                .map(|c| c.order)
                .max()
                .map_or(0, |o| o + 1)
        });
        let now = Utc::now();
        let category = Category {
            id: Uuid::new_v4().to_string(),
            store_id: store_id.to_string(),
            name: input.name,
            display: input.display,
            order,
            created_at: now,
            updated_at: now,
        };
        state.categories.insert(category.id.clone(), category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        store_id: &str,
        id: &str,
        patch: CategoryPatch,
    ) -> RepositoryResult<Category> {
        let mut state = self.state.write();
        if let Some(ref name) = patch.name {
            if Self::slug_taken(&state, store_id, name, Some(id)) {
                return Err(RepositoryError::Conflict(format!(
                    "category name {name} is taken"
                )));
            }
        }
        let category = state
            .categories
            .get_mut(id)
            .filter(|c| c.store_id == store_id)
            .ok_or_else(|| RepositoryError::not_found("category", id))?;
        if let Some(name) = patch.name {
            category.name = name;
        }
        if let Some(display) = patch.display {
            category.display = display;
        }
        if let Some(order) = patch.order {
            category.order = order;
        }
        category.updated_at = Utc::now();
        Ok(category.clone())
    }

    async fn delete_category(&self, store_id: &str, id: &str) -> RepositoryResult<()> {
        let mut state = self.state.write();
        if !state
            .categories
            .get(id)
            .is_some_and(|c| c.store_id == store_id)
        {
            return Err(RepositoryError::not_found("category", id));
        }
        if !Self::counts_in(&state, store_id, id).is_empty() {
            return Err(RepositoryError::Conflict(
                "cannot delete a category that still has items".to_string(),
            ));
        }
        state.categories.remove(id);
        Ok(())
    }
}

#[async_trait]
impl ItemRepository for LocalRepository {
    async fn list_items(&self, store_id: &str, query: &ItemQuery) -> RepositoryResult<Paged<Item>> {
        let state = self.state.read();
        let mut items: Vec<Item> = state
            .items
            .values()
            .filter(|i| i.store_id == store_id && matches_item_query(i, query))
            .cloned()
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(items, query.page, query.per_page))
    }

    async fn get_item(&self, store_id: &str, id: &str) -> RepositoryResult<Item> {
        let state = self.state.read();
        state
            .items
            .get(id)
            .filter(|i| i.store_id == store_id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("item", id))
    }

    async fn create_item(&self, store_id: &str, input: NewItem) -> RepositoryResult<Item> {
        let mut state = self.state.write();
        Self::require_category(&state, store_id, &input.category_id)?;
        let now = Utc::now();
        let item = Item {
            id: Uuid::new_v4().to_string(),
            store_id: store_id.to_string(),
            category_id: input.category_id,
            name: input.name,
            description: input.description,
            price: input.price,
            currency: input.currency,
            image_url: input.image_url,
            available: input.available,
            created_at: now,
            updated_at: now,
        };
        state.items.insert(item.id.clone(), item.clone());
        Ok(item)
    }

    async fn update_item(
        &self,
        store_id: &str,
        id: &str,
        patch: ItemPatch,
    ) -> RepositoryResult<Item> {
        let mut state = self.state.write();
        if let Some(ref category_id) = patch.category_id {
            Self::require_category(&state, store_id, category_id)?;
        }
        let item = state
            .items
            .get_mut(id)
            .filter(|i| i.store_id == store_id)
            .ok_or_else(|| RepositoryError::not_found("item", id))?;
        if let Some(category_id) = patch.category_id {
            item.category_id = category_id;
        }
        if let Some(name) = patch.name {
            item.name = name;
        }
        if let Some(description) = patch.description {
            item.description = description;
        }
        if let Some(price) = patch.price {
            item.price = price;
        }
        if let Some(currency) = patch.currency {
            item.currency = currency;
        }
        if let Some(image_url) = patch.image_url {
            item.image_url = image_url;
        }
        if let Some(available) = patch.available {
            item.available = available;
        }
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    async fn delete_item(&self, store_id: &str, id: &str) -> RepositoryResult<()> {
        let mut state = self.state.write();
        if !state.items.get(id).is_some_and(|i| i.store_id == store_id) {
            return Err(RepositoryError::not_found("item", id));
        }
        state.items.remove(id);
        Ok(())
    }
}

#[async_trait]
impl SpecialItemRepository for LocalRepository {
    async fn list_special_items(
        &self,
        store_id: &str,
        query: &SpecialItemQuery,
    ) -> RepositoryResult<Paged<SpecialItem>> {
        let now = query.now.unwrap_or_else(Utc::now);
        let state = self.state.read();
        let mut specials: Vec<SpecialItem> = state
            .special_items
            .values()
            .filter(|s| {
                s.store_id == store_id
                    && (!query.active_only || s.is_active_at(now))
                    && matches_special_query(s, &query.base)
            })
            .cloned()
            .collect();
        specials.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(specials, query.base.page, query.base.per_page))
    }

    async fn get_special_item(&self, store_id: &str, id: &str) -> RepositoryResult<SpecialItem> {
        let state = self.state.read();
        state
            .special_items
            .get(id)
            .filter(|s| s.store_id == store_id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found("special item", id))
    }

    async fn create_special_item(
        &self,
        store_id: &str,
        input: NewSpecialItem,
    ) -> RepositoryResult<SpecialItem> {
        let mut state = self.state.write();
        Self::require_category(&state, store_id, &input.category_id)?;
        let now = Utc::now();
        let special = SpecialItem {
            id: Uuid::new_v4().to_string(),
            store_id: store_id.to_string(),
            category_id: input.category_id,
            name: input.name,
            description: input.description,
            price: input.price,
            prev_price: input.prev_price,
            currency: input.currency,
            image_url: input.image_url,
            available: input.available,
            date_from: input.date_from,
            date_to: input.date_to,
            created_at: now,
            updated_at: now,
        };
        state
            .special_items
            .insert(special.id.clone(), special.clone());
        Ok(special)
    }

    async fn update_special_item(
        &self,
        store_id: &str,
        id: &str,
        patch: SpecialItemPatch,
    ) -> RepositoryResult<SpecialItem> {
        let mut state = self.state.write();
        if let Some(ref category_id) = patch.category_id {
            Self::require_category(&state, store_id, category_id)?;
        }
        let special = state
            .special_items
            .get_mut(id)
            .filter(|s| s.store_id == store_id)
            .ok_or_else(|| RepositoryError::not_found("special item", id))?;
        if let Some(category_id) = patch.category_id {
            special.category_id = category_id;
        }
        if let Some(name) = patch.name {
            special.name = name;
        }
        if let Some(description) = patch.description {
            special.description = description;
        }
        if let Some(price) = patch.price {
            special.price = price;
        }
        if let Some(prev_price) = patch.prev_price {
            special.prev_price = prev_price;
        }
        if let Some(currency) = patch.currency {
            special.currency = currency;
        }
        if let Some(image_url) = patch.image_url {
            special.image_url = image_url;
        }
        if let Some(available) = patch.available {
            special.available = available;
        }
        if let Some(date_from) = patch.date_from {
            special.date_from = date_from;
        }
        if let Some(date_to) = patch.date_to {
            special.date_to = date_to;
        }
        special.updated_at = Utc::now();
        Ok(special.clone())
    }

    async fn delete_special_item(&self, store_id: &str, id: &str) -> RepositoryResult<()> {
        let mut state = self.state.write();
        if !state
            .special_items
            .get(id)
            .is_some_and(|s| s.store_id == store_id)
        {
            return Err(RepositoryError::not_found("special item", id));
        }
        state.special_items.remove(id);
        Ok(())
    }
}

fn matches_special_query(special: &SpecialItem, query: &ItemQuery) -> bool {
    if let Some(ref cat) = query.category_id {
        if &special.category_id != cat {
            return false;
        }
    }
    if let Some(min) = query.min_price {
        if special.price < min {
            return false;
        }
    }
    if let Some(max) = query.max_price {
        if special.price > max {
            return false;
        }
    }
    if let Some(ref search) = query.search {
        if !special.name.to_lowercase().contains(&search.to_lowercase()) {
            return false;
        }
    }
    true
}
