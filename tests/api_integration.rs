//! End-to-end tests over the library layers: repository, sessions,
//! open-status evaluation, and upload storage working together the way the
//! HTTP handlers drive them.

use chrono::{Duration, Utc};

use qrmenu_rust::db::repositories::LocalRepository;
use qrmenu_rust::db::repository::{
    ItemQuery, NewCategory, NewItem, NewSpecialItem, SpecialItemQuery, StorePatch,
    StoreRepository,
};
use qrmenu_rust::db::{CategoryRepository, ItemRepository, SpecialItemRepository};
use qrmenu_rust::models::normalize_slug;
use qrmenu_rust::services::open_status::compute_open_status;
use qrmenu_rust::services::session::SessionCodec;
use qrmenu_rust::storage::{key_for_public_url, upload_key, FsStorage, ObjectStorage};

#[tokio::test]
async fn test_login_and_session_round_trip() {
    let repo = LocalRepository::seeded("admin", "s3cret", "Asia/Amman");
    let codec = SessionCodec::new("integration-test-secret");

    // Credential check the way the login handler does it.
    let store = repo
        .find_store_by_username("admin")
        .await
        .unwrap()
        .filter(|s| s.password == "s3cret")
        .expect("seeded store should authenticate");

    let issued = codec.issue(&store.id, &store.username, Duration::days(7));
    let payload = codec.verify(&issued.token).expect("fresh token verifies");
    assert_eq!(payload.sub, store.id);
    assert_eq!(payload.username, "admin");

    // A codec keyed differently must reject the same token.
    assert!(SessionCodec::new("other-secret")
        .verify(&issued.token)
        .is_none());
}

#[tokio::test]
async fn test_menu_composition_workflow() {
    let repo = LocalRepository::seeded("admin", "pw", "Asia/Amman");
    let store = repo.first_store().await.unwrap().unwrap();

    let drinks = repo
        .create_category(
            &store.id,
            NewCategory {
                name: normalize_slug("Hot Drinks"),
                display: "Hot Drinks".to_string(),
                order: Some(1),
            },
        )
        .await
        .unwrap();
    let grill = repo
        .create_category(
            &store.id,
            NewCategory {
                name: normalize_slug("Grill"),
                display: "Grill".to_string(),
                order: Some(0),
            },
        )
        .await
        .unwrap();

    for (name, category, available) in [
        ("Mint Tea", &drinks, true),
        ("Espresso", &drinks, true),
        ("Kebab", &grill, true),
        ("Off-menu Kofta", &grill, false),
    ] {
        repo.create_item(
            &store.id,
            NewItem {
                category_id: category.id.clone(),
                name: name.to_string(),
                description: None,
                price: 3.0,
                currency: store.currency.clone(),
                image_url: String::new(),
                available,
            },
        )
        .await
        .unwrap();
    }

    // Categories come back in display order, not creation order.
    let categories = repo.list_categories(&store.id).await.unwrap();
    assert_eq!(categories[0].display, "Grill");
    assert_eq!(categories[1].display, "Hot Drinks");

    // The storefront only shows available items.
    let page = repo
        .list_items(&store.id, &ItemQuery::default())
        .await
        .unwrap();
    assert_eq!(page.total, 4);
    let visible: Vec<_> = page.items.iter().filter(|i| i.available).collect();
    assert_eq!(visible.len(), 3);

    // Open status renders from the seeded default hours (10:00-23:00 daily).
    let status = compute_open_status(store.working_hours.as_deref(), &store.timezone);
    assert!(status.minutes_until_change > 0);
    assert!(!status.label.is_empty());
}

#[tokio::test]
async fn test_active_special_offers_filter() {
    let repo = LocalRepository::seeded("admin", "pw", "Asia/Amman");
    let store = repo.first_store().await.unwrap().unwrap();
    let category = repo
        .create_category(
            &store.id,
            NewCategory {
                name: "deals".to_string(),
                display: "Deals".to_string(),
                order: None,
            },
        )
        .await
        .unwrap();

    let now = Utc::now();
    let windows = [
        ("current", now - Duration::days(1), now + Duration::days(1), true),
        ("expired", now - Duration::days(9), now - Duration::days(2), true),
        ("upcoming", now + Duration::days(2), now + Duration::days(9), true),
        ("disabled", now - Duration::days(1), now + Duration::days(1), false),
    ];
    for (name, from, to, available) in windows {
        repo.create_special_item(
            &store.id,
            NewSpecialItem {
                category_id: category.id.clone(),
                name: name.to_string(),
                description: None,
                price: 4.0,
                prev_price: 6.0,
                currency: store.currency.clone(),
                image_url: String::new(),
                available,
                date_from: from,
                date_to: to,
            },
        )
        .await
        .unwrap();
    }

    let active = repo
        .list_special_items(
            &store.id,
            &SpecialItemQuery {
                active_only: true,
                now: Some(now),
                ..SpecialItemQuery::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(active.total, 1);
    assert_eq!(active.items[0].name, "current");
}

#[tokio::test]
async fn test_store_timezone_update_feeds_open_status() {
    let repo = LocalRepository::seeded("admin", "pw", "Asia/Amman");
    let store = repo.first_store().await.unwrap().unwrap();

    let updated = repo
        .update_store(
            &store.id,
            StorePatch {
                timezone: Some("Europe/Madrid".to_string()),
                ..StorePatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.timezone, "Europe/Madrid");

    // The evaluator accepts the new zone without falling back.
    let status = compute_open_status(updated.working_hours.as_deref(), &updated.timezone);
    assert!(status.minutes_until_change >= 0);
}

#[tokio::test]
async fn test_upload_then_garbage_collect() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FsStorage::new(dir.path(), "http://localhost:8080/uploads");

    let key = upload_key(1_700_000_000_000, "photo of dish.jpg");
    let url = storage
        .put(&key, b"jpegdata".to_vec(), Some("image/jpeg"))
        .await
        .unwrap();
    assert!(url.starts_with("http://localhost:8080/uploads/"));

    // Replacing the image: the old object's key is recovered from its URL
    // and deleted, exactly as the update handlers do.
    let recovered = key_for_public_url(storage.public_base(), &url).unwrap();
    assert_eq!(recovered, key);
    storage.delete(&recovered).await.unwrap();

    // Foreign URLs never resolve to a key.
    assert!(key_for_public_url(storage.public_base(), "https://cdn.example/x.jpg").is_none());
}
