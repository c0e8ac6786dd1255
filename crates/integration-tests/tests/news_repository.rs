//! Integration tests for the news repository.
//!
//! These tests require a `PostgreSQL` database on `ADMIN_DATABASE_URL`.
//! The schema is applied automatically.

#![allow(clippy::unwrap_used)]

use newsdesk_admin::db::{NewsRepository, RepositoryError};
use newsdesk_core::{NewsDraft, NewsId, PageRequest, SearchFilter, total_pages};
use newsdesk_integration_tests::{connect_test_database, remove_news, test_pool, unique_marker};

fn draft(news_type: &str, name: &str, url: &str) -> NewsDraft {
    NewsDraft::parse(news_type, name, url).unwrap()
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ADMIN_DATABASE_URL)"]
async fn test_insert_stores_trimmed_values() {
    let pool = test_pool().await;
    let repo = NewsRepository::new(&pool);
    let marker = unique_marker();

    let id = repo
        .insert(&draft(
            "Business",
            &format!("  Quarterly results {marker}  "),
            " https://example.com/results ",
        ))
        .await
        .unwrap();

    let item = repo.get_by_id(id).await.unwrap().unwrap();
    assert_eq!(item.content_name, format!("Quarterly results {marker}"));
    assert_eq!(item.content_url, "https://example.com/results");
    assert_eq!(item.news_type.as_str(), "Business");

    remove_news(&pool, &marker).await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ADMIN_DATABASE_URL)"]
async fn test_twelve_items_paginate_into_three_pages() {
    let pool = test_pool().await;
    let repo = NewsRepository::new(&pool);
    let marker = unique_marker();

    for i in 0..12 {
        repo.insert(&draft(
            "National",
            &format!("Story {i} {marker}"),
            &format!("https://example.com/story/{i}"),
        ))
        .await
        .unwrap();
    }

    let filter = SearchFilter::parse(Some(&marker)).unwrap();
    let page_size = PageRequest::DEFAULT_PAGE_SIZE;
    let count = repo.count(Some(&filter)).await.unwrap();
    assert_eq!(count, 12);
    assert_eq!(total_pages(count, page_size), 3);

    let first = repo
        .list(Some(&filter), i64::from(page_size), PageRequest::new(1).offset(page_size))
        .await
        .unwrap();
    assert_eq!(first.len(), 5);
    // newest first
    assert!(first[0].content_name.starts_with("Story 11 "));

    let last = repo
        .list(Some(&filter), i64::from(page_size), PageRequest::new(3).offset(page_size))
        .await
        .unwrap();
    assert_eq!(last.len(), 2);

    let beyond = repo
        .list(Some(&filter), i64::from(page_size), PageRequest::new(4).offset(page_size))
        .await
        .unwrap();
    assert!(beyond.is_empty());

    remove_news(&pool, &marker).await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ADMIN_DATABASE_URL)"]
async fn test_count_matches_list_length() {
    let pool = test_pool().await;
    let repo = NewsRepository::new(&pool);
    let marker = unique_marker();

    repo.insert(&draft("Business", &format!("Alpha {marker}"), "https://example.com/a"))
        .await
        .unwrap();
    repo.insert(&draft("International", &format!("Beta {marker}"), "https://example.com/b"))
        .await
        .unwrap();

    let filter = SearchFilter::parse(Some(&marker)).unwrap();
    let count = repo.count(Some(&filter)).await.unwrap();
    let items = repo.list(Some(&filter), 100, 0).await.unwrap();
    assert_eq!(usize::try_from(count).unwrap(), items.len());

    // Case-insensitive match on the type column
    let by_type = SearchFilter::parse(Some("iNtErNaTiOnAl")).unwrap();
    let items = repo.list(Some(&by_type), 1000, 0).await.unwrap();
    assert!(items.iter().any(|i| i.content_name == format!("Beta {marker}")));

    remove_news(&pool, &marker).await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ADMIN_DATABASE_URL)"]
async fn test_search_wildcards_are_literal() {
    let pool = test_pool().await;
    let repo = NewsRepository::new(&pool);
    let marker = unique_marker();

    repo.insert(&draft("Business", &format!("Save 50% {marker}"), "https://example.com/sale"))
        .await
        .unwrap();
    repo.insert(&draft("Business", &format!("Save 500 {marker}"), "https://example.com/500"))
        .await
        .unwrap();

    let filter = SearchFilter::parse(Some(&format!("50% {marker}"))).unwrap();
    let items = repo.list(Some(&filter), 100, 0).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].content_name, format!("Save 50% {marker}"));

    remove_news(&pool, &marker).await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ADMIN_DATABASE_URL)"]
async fn test_update_keeps_id_and_timestamp() {
    let pool = test_pool().await;
    let repo = NewsRepository::new(&pool);
    let marker = unique_marker();

    let id = repo
        .insert(&draft("Business", &format!("Draft {marker}"), "https://example.com/draft"))
        .await
        .unwrap();
    let before = repo.get_by_id(id).await.unwrap().unwrap();

    let updated = repo
        .update(
            id,
            &draft("National", &format!("Final {marker}"), "https://example.com/final"),
        )
        .await
        .unwrap();

    assert_eq!(updated.id, id);
    assert_eq!(updated.created_at, before.created_at);
    assert_eq!(updated.news_type.as_str(), "National");
    assert_eq!(updated.content_name, format!("Final {marker}"));

    remove_news(&pool, &marker).await;
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ADMIN_DATABASE_URL)"]
async fn test_update_unknown_id_is_not_found() {
    let pool = test_pool().await;
    let repo = NewsRepository::new(&pool);

    let result = repo
        .update(
            NewsId::new(i32::MAX),
            &draft("Business", "Nothing here", "https://example.com"),
        )
        .await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ADMIN_DATABASE_URL)"]
async fn test_delete_unknown_id_is_not_found() {
    let pool = test_pool().await;
    let repo = NewsRepository::new(&pool);

    let result = repo.delete(NewsId::new(i32::MAX)).await;
    assert!(matches!(result, Err(RepositoryError::NotFound)));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL (ADMIN_DATABASE_URL)"]
async fn test_concurrent_delete_succeeds_once() {
    let pool = test_pool().await;
    let marker = unique_marker();

    let id = NewsRepository::new(&pool)
        .insert(&draft("Business", &format!("Contested {marker}"), "https://example.com/c"))
        .await
        .unwrap();

    let first = NewsRepository::new(&pool);
    let second = NewsRepository::new(&pool);
    let (a, b) = tokio::join!(first.delete(id), second.delete(id));

    let outcomes = [a, b];
    assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        outcomes
            .iter()
            .filter(|r| matches!(r, Err(RepositoryError::NotFound)))
            .count(),
        1
    );
    assert!(NewsRepository::new(&pool).get_by_id(id).await.unwrap().is_none());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[ignore = "Requires PostgreSQL (ADMIN_DATABASE_URL)"]
async fn test_schema_applies_concurrently() {
    let pool = connect_test_database().await;

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..4 {
        let pool = pool.clone();
        tasks.spawn(async move { newsdesk_admin::db::apply_schema(&pool).await });
    }

    while let Some(result) = tasks.join_next().await {
        result.unwrap().unwrap();
    }
}
