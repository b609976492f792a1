//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! repository, session codec, and storage layers for business logic.
//! Admin handlers take an [`AdminSession`] argument, which rejects
//! unauthenticated requests before the handler body runs.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::header,
    response::AppendHeaders,
    Json,
};
use chrono::Utc;
use tracing::warn;

use super::auth::{clear_session_cookie, session_cookie, AdminSession};
use super::dto::{
    BrandResponse, CategoryListQuery, CategoryView, CreateCategoryRequest,
    CreateItemRequest, CreateSpecialItemRequest, HealthResponse, ItemListQuery, ItemView,
    LoginRequest, LoginResponse, MenuCategory, MenuResponse, OkResponse, PagedResponse,
    SpecialItemListQuery, SpecialItemView, UpdateCategoryRequest, UpdateItemRequest,
    UpdateSpecialItemRequest, UpdateStoreRequest, UploadResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::repository::{ItemQuery, SpecialItemQuery, StorePatch};
use crate::models::{Category, Item, SpecialItem, Store};
use crate::services::open_status::compute_open_status;
use crate::storage::{key_for_public_url, upload_key};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

type SetCookie = AppendHeaders<[(header::HeaderName, String); 1]>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
    })
}

// =============================================================================
// Storefront (public)
// =============================================================================

/// GET /v1/menu
///
/// The whole storefront payload in one round trip: branding, live open
/// status computed in the store's timezone, categories in display order
/// with their available items, and currently-active special offers.
pub async fn get_menu(State(state): State<AppState>) -> HandlerResult<MenuResponse> {
    let store = state
        .repository
        .first_store()
        .await?
        .ok_or_else(|| AppError::NotFound("no store configured".to_string()))?;

    let timezone = if store.timezone.is_empty() {
        state.default_timezone.clone()
    } else {
        store.timezone.clone()
    };
    let open_status = compute_open_status(store.working_hours.as_deref(), &timezone);

    let categories = state.repository.list_categories(&store.id).await?;
    let items = all_items(&state, &store.id).await?;
    let specials = all_active_specials(&state, &store.id).await?;

    let menu_categories = categories
        .into_iter()
        .map(|category| {
            let items = items
                .iter()
                .filter(|i| i.available && i.category_id == category.id)
                .cloned()
                .collect();
            MenuCategory { category, items }
        })
        .collect();

    Ok(Json(MenuResponse {
        store,
        open_status,
        categories: menu_categories,
        special_items: specials,
    }))
}

/// GET /v1/brand
///
/// Brand settings for the storefront shell. Never errors: with no store
/// configured yet it answers with defaults so the client can still render.
pub async fn get_brand(State(state): State<AppState>) -> HandlerResult<BrandResponse> {
    let brand = match state.repository.first_store().await {
        Ok(Some(store)) => BrandResponse::from_store(&store),
        Ok(None) => BrandResponse::default(),
        Err(e) => {
            warn!(error = %e, "brand lookup failed, serving defaults");
            BrandResponse::default()
        }
    };
    Ok(Json(brand))
}

/// Drain every page of the item listing for the storefront render.
async fn all_items(state: &AppState, store_id: &str) -> Result<Vec<Item>, AppError> {
    let mut query = ItemQuery {
        per_page: 50,
        ..ItemQuery::default()
    };
    let mut out = Vec::new();
    loop {
        let page = state.repository.list_items(store_id, &query).await?;
        if page.items.is_empty() || out.len() + page.items.len() >= page.total {
            out.extend(page.items);
            return Ok(out);
        }
        out.extend(page.items);
        query.page += 1;
    }
}

async fn all_active_specials(
    state: &AppState,
    store_id: &str,
) -> Result<Vec<SpecialItem>, AppError> {
    let now = Utc::now();
    let mut query = SpecialItemQuery {
        base: ItemQuery {
            per_page: 50,
            ..ItemQuery::default()
        },
        active_only: true,
        now: Some(now),
    };
    let mut out = Vec::new();
    loop {
        let page = state.repository.list_special_items(store_id, &query).await?;
        if page.items.is_empty() || out.len() + page.items.len() >= page.total {
            out.extend(page.items);
            return Ok(out);
        }
        out.extend(page.items);
        query.base.page += 1;
    }
}

// =============================================================================
// Auth
// =============================================================================

/// POST /v1/admin/login
///
/// Validates the credentials and installs the session cookie. Bad
/// credentials answer a uniform 401 so usernames cannot be probed.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<(SetCookie, Json<LoginResponse>), AppError> {
    let username = request.username.trim();
    if username.is_empty() || request.password.is_empty() {
        return Err(AppError::BadRequest(
            "username and password are required".to_string(),
        ));
    }

    let store = state
        .repository
        .find_store_by_username(username)
        .await?
        .filter(|store| store.password == request.password)
        .ok_or(AppError::Unauthorized)?;

    let issued = state
        .sessions
        .issue(&store.id, &store.username, state.session_ttl());

    Ok((
        AppendHeaders([(
            header::SET_COOKIE,
            session_cookie(&issued.token, issued.expires_at),
        )]),
        Json(LoginResponse {
            username: store.username,
            expires_at: issued.expires_at,
        }),
    ))
}

/// POST /v1/admin/logout
///
/// Stateless sessions cannot be revoked server-side; this clears the
/// cookie client-side with an already-expired replacement.
pub async fn logout() -> (SetCookie, Json<OkResponse>) {
    (
        AppendHeaders([(header::SET_COOKIE, clear_session_cookie())]),
        Json(OkResponse { ok: true }),
    )
}

// =============================================================================
// Store settings
// =============================================================================

/// GET /v1/admin/store
pub async fn get_store(
    session: AdminSession,
    State(state): State<AppState>,
) -> HandlerResult<Store> {
    let store = state.repository.get_store(session.store_id()).await?;
    Ok(Json(store))
}

/// PATCH /v1/admin/store
pub async fn update_store(
    session: AdminSession,
    State(state): State<AppState>,
    Json(request): Json<UpdateStoreRequest>,
) -> HandlerResult<Store> {
    if let Some(tz) = &request.timezone {
        if tz.parse::<chrono_tz::Tz>().is_err() {
            return Err(AppError::BadRequest(format!("unknown timezone: {tz}")));
        }
    }
    if let Some(hours) = &request.working_hours {
        if hours.iter().any(|d| d.day > 6) {
            return Err(AppError::BadRequest(
                "working hours day must be 0 (Sunday) through 6 (Saturday)".to_string(),
            ));
        }
    }

    let patch = StorePatch::from(request);
    let store = state
        .repository
        .update_store(session.store_id(), patch)
        .await?;
    Ok(Json(store))
}

// =============================================================================
// Categories
// =============================================================================

/// GET /v1/admin/categories
pub async fn list_categories(
    session: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<CategoryListQuery>,
) -> HandlerResult<Vec<CategoryView>> {
    let store_id = session.store_id();
    let categories = state.repository.list_categories(store_id).await?;

    let mut views = Vec::with_capacity(categories.len());
    for category in categories {
        let counts = if query.include_counts {
            Some(
                state
                    .repository
                    .category_counts(store_id, &category.id)
                    .await?,
            )
        } else {
            None
        };
        views.push(CategoryView { category, counts });
    }
    Ok(Json(views))
}

/// POST /v1/admin/categories
pub async fn create_category(
    session: AdminSession,
    State(state): State<AppState>,
    Json(request): Json<CreateCategoryRequest>,
) -> HandlerResult<Category> {
    let input = request.into_new_category();
    if input.name.is_empty() {
        return Err(AppError::BadRequest(
            "category name must contain letters or digits".to_string(),
        ));
    }
    let category = state
        .repository
        .create_category(session.store_id(), input)
        .await?;
    Ok(Json(category))
}

/// PATCH /v1/admin/categories/{id}
pub async fn update_category(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCategoryRequest>,
) -> HandlerResult<Category> {
    let patch = crate::db::repository::CategoryPatch::from(request);
    if matches!(&patch.name, Some(name) if name.is_empty()) {
        return Err(AppError::BadRequest(
            "category name must contain letters or digits".to_string(),
        ));
    }
    let category = state
        .repository
        .update_category(session.store_id(), &id, patch)
        .await?;
    Ok(Json(category))
}

/// DELETE /v1/admin/categories/{id}
///
/// Refused while items or specials still reference the category.
pub async fn delete_category(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<OkResponse> {
    state
        .repository
        .delete_category(session.store_id(), &id)
        .await?;
    Ok(Json(OkResponse { ok: true }))
}

// =============================================================================
// Items
// =============================================================================

/// GET /v1/admin/items
pub async fn list_items(
    session: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<ItemListQuery>,
) -> HandlerResult<PagedResponse<ItemView>> {
    let store_id = session.store_id();
    let query = ItemQuery::from(query);
    let page = state.repository.list_items(store_id, &query).await?;
    let names = category_names(&state, store_id).await?;

    let items = page
        .items
        .into_iter()
        .map(|item| {
            let category_name = names
                .iter()
                .find(|(id, _)| *id == item.category_id)
                .map(|(_, name)| name.clone())
                .unwrap_or_default();
            ItemView {
                item,
                category_name,
            }
        })
        .collect();

    Ok(Json(PagedResponse {
        items,
        total: page.total,
        page: query.page.max(1),
        per_page: query.per_page.clamp(1, 50),
    }))
}

/// POST /v1/admin/items
pub async fn create_item(
    session: AdminSession,
    State(state): State<AppState>,
    Json(request): Json<CreateItemRequest>,
) -> HandlerResult<Item> {
    validate_name_and_price(&request.name, request.price)?;
    let store = state.repository.get_store(session.store_id()).await?;
    let input = request.into_new_item(&store.currency);
    let item = state.repository.create_item(&store.id, input).await?;
    Ok(Json(item))
}

/// PATCH /v1/admin/items/{id}
///
/// When the image URL changes, the previous object is garbage collected
/// from storage if it lives under our public base.
pub async fn update_item(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateItemRequest>,
) -> HandlerResult<Item> {
    let store_id = session.store_id();
    if let Some(price) = request.price {
        validate_price(price)?;
    }

    let previous_image = match &request.image_url {
        Some(_) => Some(state.repository.get_item(store_id, &id).await?.image_url),
        None => None,
    };

    let item = state
        .repository
        .update_item(store_id, &id, request.into())
        .await?;

    if let Some(old_url) = previous_image {
        if old_url != item.image_url {
            gc_image(&state, &old_url).await;
        }
    }
    Ok(Json(item))
}

/// DELETE /v1/admin/items/{id}
pub async fn delete_item(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<OkResponse> {
    let store_id = session.store_id();
    let item = state.repository.get_item(store_id, &id).await?;
    state.repository.delete_item(store_id, &id).await?;
    gc_image(&state, &item.image_url).await;
    Ok(Json(OkResponse { ok: true }))
}

// =============================================================================
// Special items
// =============================================================================

/// GET /v1/admin/special-items
pub async fn list_special_items(
    session: AdminSession,
    State(state): State<AppState>,
    Query(query): Query<SpecialItemListQuery>,
) -> HandlerResult<PagedResponse<SpecialItemView>> {
    let store_id = session.store_id();
    let query = SpecialItemQuery::from(query);
    let page = state
        .repository
        .list_special_items(store_id, &query)
        .await?;
    let names = category_names(&state, store_id).await?;
    let now = Utc::now();

    let items = page
        .items
        .into_iter()
        .map(|item| {
            let category_name = names
                .iter()
                .find(|(id, _)| *id == item.category_id)
                .map(|(_, name)| name.clone())
                .unwrap_or_default();
            let active = item.is_active_at(now);
            SpecialItemView {
                item,
                category_name,
                active,
            }
        })
        .collect();

    Ok(Json(PagedResponse {
        items,
        total: page.total,
        page: query.base.page.max(1),
        per_page: query.base.per_page.clamp(1, 50),
    }))
}

/// POST /v1/admin/special-items
pub async fn create_special_item(
    session: AdminSession,
    State(state): State<AppState>,
    Json(request): Json<CreateSpecialItemRequest>,
) -> HandlerResult<SpecialItem> {
    validate_name_and_price(&request.name, request.price)?;
    validate_price(request.prev_price)?;
    if request.date_from > request.date_to {
        return Err(AppError::BadRequest(
            "dateFrom must not be after dateTo".to_string(),
        ));
    }
    let store = state.repository.get_store(session.store_id()).await?;
    let input = request.into_new_special(&store.currency);
    let item = state.repository.create_special_item(&store.id, input).await?;
    Ok(Json(item))
}

/// PATCH /v1/admin/special-items/{id}
pub async fn update_special_item(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateSpecialItemRequest>,
) -> HandlerResult<SpecialItem> {
    let store_id = session.store_id();
    if let Some(price) = request.price {
        validate_price(price)?;
    }
    if let Some(prev) = request.prev_price {
        validate_price(prev)?;
    }
    if let (Some(from), Some(to)) = (request.date_from, request.date_to) {
        if from > to {
            return Err(AppError::BadRequest(
                "dateFrom must not be after dateTo".to_string(),
            ));
        }
    }

    let previous_image = match &request.image_url {
        Some(_) => Some(
            state
                .repository
                .get_special_item(store_id, &id)
                .await?
                .image_url,
        ),
        None => None,
    };

    let item = state
        .repository
        .update_special_item(store_id, &id, request.into())
        .await?;

    if let Some(old_url) = previous_image {
        if old_url != item.image_url {
            gc_image(&state, &old_url).await;
        }
    }
    Ok(Json(item))
}

/// DELETE /v1/admin/special-items/{id}
pub async fn delete_special_item(
    session: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<OkResponse> {
    let store_id = session.store_id();
    let item = state.repository.get_special_item(store_id, &id).await?;
    state.repository.delete_special_item(store_id, &id).await?;
    gc_image(&state, &item.image_url).await;
    Ok(Json(OkResponse { ok: true }))
}

// =============================================================================
// Uploads
// =============================================================================

/// POST /v1/admin/upload
///
/// Multipart image upload. The first field carrying a file is stored under
/// `uploads/{epoch_millis}-{filename}` and its public URL returned.
pub async fn upload(
    _session: AdminSession,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> HandlerResult<UploadResponse> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("uploaded file is empty".to_string()));
        }

        let key = upload_key(Utc::now().timestamp_millis(), &filename);
        let url = state
            .storage
            .put(&key, bytes.to_vec(), content_type.as_deref())
            .await?;
        return Ok(Json(UploadResponse { url, key }));
    }

    Err(AppError::BadRequest("no file field in upload".to_string()))
}

// =============================================================================
// Helpers
// =============================================================================

async fn category_names(
    state: &AppState,
    store_id: &str,
) -> Result<Vec<(String, String)>, AppError> {
    let categories = state.repository.list_categories(store_id).await?;
    Ok(categories
        .into_iter()
        .map(|c| (c.id, c.display))
        .collect())
}

fn validate_name_and_price(name: &str, price: f64) -> Result<(), AppError> {
    if name.trim().is_empty() {
        return Err(AppError::BadRequest("name is required".to_string()));
    }
    validate_price(price)
}

fn validate_price(price: f64) -> Result<(), AppError> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::BadRequest(
            "price must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}

/// Best-effort storage garbage collection for a replaced or orphaned image.
/// Foreign URLs (not under our public base) are left alone, and storage
/// failures only log: the menu record is already consistent.
async fn gc_image(state: &AppState, url: &str) {
    let Some(key) = key_for_public_url(state.storage.public_base(), url) else {
        return;
    };
    if let Err(e) = state.storage.delete(&key).await {
        warn!(key = %key, error = %e, "failed to delete replaced image");
    }
}
