//! Tests for CollectionController::load.
//!
//! This module verifies list loading behavior: remote fetches, the query
//! cache, time-to-live expiry, and the failure path that must leave the
//! previous sequence intact.

use super::*;

/// Tests that the first load fetches from the service and stores the result.
///
/// Expected: one service call, items visible, snapshot not stale
#[tokio::test]
async fn first_load_fetches_and_populates() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .with_record(factory::mock_transaction("tx-2", TransactionKind::Income, 3_000_000))
        .build()
        .await?;

    let snapshot = test.controller.load(Query::default(), true).await;

    assert_eq!(test.service.fetch_calls(), 1);
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.total_count, 2);
    assert!(!snapshot.stale, "fresh load is not stale");
    assert!(snapshot.error.is_none());
    assert!(snapshot.synced_at.is_some(), "sync timestamp recorded");

    Ok(())
}

/// Tests that a repeated load of the same query within the TTL is served
/// from the cache.
///
/// Expected: second load issues no service call and returns the same items
#[tokio::test]
async fn repeated_load_hits_cache() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .build()
        .await?;

    let first = test.controller.load(Query::default(), true).await;
    let second = test.controller.load(Query::default(), true).await;

    assert_eq!(test.service.fetch_calls(), 1, "cache hit skips the service");
    assert_eq!(first.items, second.items);
    assert!(!second.stale);

    Ok(())
}

/// Tests that queries with different parameters cache independently.
///
/// Expected: two service calls, one per distinct parameter set
#[tokio::test]
async fn distinct_queries_fetch_separately() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new().build().await?;

    let august = Query::new(TransactionFilters {
        month: Some("2026-08".to_string()),
        ..TransactionFilters::default()
    });
    let september = Query::new(TransactionFilters {
        month: Some("2026-09".to_string()),
        ..TransactionFilters::default()
    });

    test.controller.load(august.clone(), true).await;
    test.controller.load(september, true).await;
    test.controller.load(august, true).await;

    assert_eq!(
        test.service.fetch_calls(),
        2,
        "each parameter set fetches once, the repeat hits its cache entry"
    );

    Ok(())
}

/// Tests that a cache entry past its TTL is refetched.
///
/// Expected: second load issues a second service call
#[tokio::test]
async fn cache_expires_after_ttl() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_config(ControllerConfig::new(0).with_insert_position(InsertPosition::Front))
        .build()
        .await?;

    test.controller.load(Query::default(), true).await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    test.controller.load(Query::default(), true).await;

    assert_eq!(test.service.fetch_calls(), 2, "expired entry is not served");

    Ok(())
}

/// Tests that loading with the cache disabled always fetches.
///
/// Expected: two service calls for two identical loads
#[tokio::test]
async fn uncached_load_always_fetches() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new().build().await?;

    test.controller.load(Query::default(), false).await;
    test.controller.load(Query::default(), false).await;

    assert_eq!(test.service.fetch_calls(), 2);

    Ok(())
}

/// Tests the load failure path.
///
/// Verifies that a failed fetch surfaces the error and an empty result
/// while the previously loaded sequence stays visible in later snapshots.
///
/// Expected: empty failed snapshot; prior items still present afterwards
#[tokio::test]
async fn failed_load_keeps_previous_sequence() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .build()
        .await?;

    test.controller.load(Query::default(), true).await;
    test.service.fail_next_fetch("storage offline");

    let failed = test.controller.load(Query::default(), false).await;

    assert!(failed.items.is_empty(), "failed load returns no items");
    assert!(failed.stale);
    assert!(
        failed.error.as_deref().unwrap_or_default().contains("storage offline"),
        "service error is surfaced"
    );

    let snapshot = test.controller.snapshot().await;
    assert_eq!(snapshot.items.len(), 1, "previous sequence survives the failure");
    assert_eq!(snapshot.items[0].id, "tx-1");

    Ok(())
}

/// Tests that a paginated total is carried through from the service.
///
/// Expected: total_count reports the server total, not the page length
#[tokio::test]
async fn total_count_reflects_server_total() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .with_total_count(42)
        .build()
        .await?;

    let snapshot = test.controller.load(Query::default(), true).await;

    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.total_count, 42);

    Ok(())
}
