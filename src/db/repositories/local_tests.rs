use chrono::{Duration, Utc};

use crate::db::error::RepositoryError;
use crate::db::repositories::LocalRepository;
use crate::db::repository::{
    CategoryPatch, CategoryRepository, ItemQuery, ItemRepository, NewCategory, NewItem,
    NewSpecialItem, SpecialItemQuery, SpecialItemRepository, StorePatch, StoreRepository,
};

fn repo() -> LocalRepository {
    LocalRepository::seeded("demo", "demo123", "Asia/Amman")
}

async fn store_id(repo: &LocalRepository) -> String {
    repo.first_store().await.unwrap().unwrap().id
}

fn new_item(category_id: &str, name: &str, price: f64) -> NewItem {
    NewItem {
        category_id: category_id.to_string(),
        name: name.to_string(),
        description: None,
        price,
        currency: "JD".to_string(),
        image_url: format!("https://cdn.example/{name}.jpg"),
        available: true,
    }
}

#[tokio::test]
async fn test_seeded_store_login_lookup() {
    let repo = repo();
    let store = repo.find_store_by_username("demo").await.unwrap().unwrap();
    assert_eq!(store.password, "demo123");
    assert_eq!(store.working_hours.as_ref().unwrap().len(), 7);
    assert!(repo.find_store_by_username("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_store_patch_clears_nullable_fields() {
    let repo = repo();
    let id = store_id(&repo).await;

    let updated = repo
        .update_store(
            &id,
            StorePatch {
                name: Some("Renamed".to_string()),
                description: Some(None),
                timezone: Some("Europe/Madrid".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.description, None);
    assert_eq!(updated.timezone, "Europe/Madrid");
    // Untouched fields survive.
    assert_eq!(updated.username, "demo");
}

#[tokio::test]
async fn test_category_slug_uniqueness_per_store() {
    let repo = repo();
    let id = store_id(&repo).await;

    let cat = repo
        .create_category(
            &id,
            NewCategory {
                name: "drinks".to_string(),
                display: "Drinks".to_string(),
                order: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(cat.order, 0);

    let err = repo
        .create_category(
            &id,
            NewCategory {
                name: "drinks".to_string(),
                display: "Other Drinks".to_string(),
                order: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));
}

#[tokio::test]
async fn test_category_order_auto_appends() {
    let repo = repo();
    let id = store_id(&repo).await;

    for (slug, order) in [("a", None), ("b", Some(5)), ("c", None)] {
        let cat = repo
            .create_category(
                &id,
                NewCategory {
                    name: slug.to_string(),
                    display: slug.to_uppercase(),
                    order,
                },
            )
            .await
            .unwrap();
        if slug == "c" {
            assert_eq!(cat.order, 6);
        }
    }

    let listed = repo.list_categories(&id).await.unwrap();
    let orders: Vec<i32> = listed.iter().map(|c| c.order).collect();
    assert_eq!(orders, vec![0, 5, 6]);
}

#[tokio::test]
async fn test_delete_category_refuses_when_nonempty() {
    let repo = repo();
    let id = store_id(&repo).await;
    let cat = repo
        .create_category(
            &id,
            NewCategory {
                name: "meals".to_string(),
                display: "Meals".to_string(),
                order: None,
            },
        )
        .await
        .unwrap();
    repo.create_item(&id, new_item(&cat.id, "Mansaf", 9.5))
        .await
        .unwrap();

    let err = repo.delete_category(&id, &cat.id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));

    let counts = repo.category_counts(&id, &cat.id).await.unwrap();
    assert_eq!(counts.items, 1);
    assert_eq!(counts.special_items, 0);
}

#[tokio::test]
async fn test_delete_empty_category_succeeds() {
    let repo = repo();
    let id = store_id(&repo).await;
    let cat = repo
        .create_category(
            &id,
            NewCategory {
                name: "empty".to_string(),
                display: "Empty".to_string(),
                order: None,
            },
        )
        .await
        .unwrap();
    repo.delete_category(&id, &cat.id).await.unwrap();
    assert!(repo.list_categories(&id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_category_rename_uniqueness_recheck() {
    let repo = repo();
    let id = store_id(&repo).await;
    for slug in ["one", "two"] {
        repo.create_category(
            &id,
            NewCategory {
                name: slug.to_string(),
                display: slug.to_string(),
                order: None,
            },
        )
        .await
        .unwrap();
    }
    let two = repo.list_categories(&id).await.unwrap()[1].clone();
    let err = repo
        .update_category(
            &id,
            &two.id,
            CategoryPatch {
                name: Some("one".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Conflict(_)));

    // Renaming to its own slug is allowed.
    repo.update_category(
        &id,
        &two.id,
        CategoryPatch {
            name: Some("two".to_string()),
            display: Some("Two!".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_item_create_requires_category_in_store() {
    let repo = repo();
    let id = store_id(&repo).await;
    let err = repo
        .create_item(&id, new_item("missing-category", "Orphan", 1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::Validation(_)));
}

#[tokio::test]
async fn test_item_listing_filters_and_pagination() {
    let repo = repo();
    let id = store_id(&repo).await;
    let cat = repo
        .create_category(
            &id,
            NewCategory {
                name: "meals".to_string(),
                display: "Meals".to_string(),
                order: None,
            },
        )
        .await
        .unwrap();

    for i in 0..15 {
        repo.create_item(&id, new_item(&cat.id, &format!("Dish {i}"), i as f64))
            .await
            .unwrap();
    }

    let page1 = repo
        .list_items(
            &id,
            &ItemQuery {
                page: 1,
                per_page: 10,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(page1.total, 15);
    assert_eq!(page1.items.len(), 10);

    let page2 = repo
        .list_items(
            &id,
            &ItemQuery {
                page: 2,
                per_page: 10,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(page2.items.len(), 5);

    let pricey = repo
        .list_items(
            &id,
            &ItemQuery {
                min_price: Some(10.0),
                max_price: Some(12.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(pricey.total, 3);

    let searched = repo
        .list_items(
            &id,
            &ItemQuery {
                search: Some("dish 1".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    // Dish 1, 10..14 match case-insensitively.
    assert_eq!(searched.total, 6);
}

#[tokio::test]
async fn test_pagination_past_end_is_empty() {
    let repo = repo();
    let id = store_id(&repo).await;
    let page = repo
        .list_items(
            &id,
            &ItemQuery {
                page: 99,
                per_page: 10,
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(page.total, 0);
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_special_items_active_only_filter() {
    let repo = repo();
    let id = store_id(&repo).await;
    let cat = repo
        .create_category(
            &id,
            NewCategory {
                name: "offers".to_string(),
                display: "Offers".to_string(),
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
            &id,
            NewSpecialItem {
                category_id: cat.id.clone(),
                name: name.to_string(),
                description: None,
                price: 4.0,
                prev_price: 6.0,
                currency: "JD".to_string(),
                image_url: format!("https://cdn.example/{name}.jpg"),
                available,
                date_from: from,
                date_to: to,
            },
        )
        .await
        .unwrap();
    }

    let all = repo
        .list_special_items(&id, &SpecialItemQuery::default())
        .await
        .unwrap();
    assert_eq!(all.total, 4);

    let active = repo
        .list_special_items(
            &id,
            &SpecialItemQuery {
                active_only: true,
                now: Some(now),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(active.total, 1);
    assert_eq!(active.items[0].name, "current");
}

#[tokio::test]
async fn test_cross_store_isolation() {
    let repo = repo();
    let id = store_id(&repo).await;
    let cat = repo
        .create_category(
            &id,
            NewCategory {
                name: "meals".to_string(),
                display: "Meals".to_string(),
                order: None,
            },
        )
        .await
        .unwrap();
    let item = repo.create_item(&id, new_item(&cat.id, "Dish", 3.0)).await.unwrap();

    // Another tenant cannot see or touch this store's records.
    let err = repo.get_item("other-store", &item.id).await.unwrap_err();
    assert!(err.is_not_found());
    let err = repo.delete_item("other-store", &item.id).await.unwrap_err();
    assert!(err.is_not_found());
}
