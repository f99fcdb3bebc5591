//! Tests for CollectionController::create.
//!
//! This module verifies optimistic creation: the temporary entry, its
//! replacement by the server record, rollback on failure, and cache
//! invalidation after a successful write.

use gamjatokki::resource::grocery_item::GroceryItems;

use super::*;

/// Tests the full optimistic create round trip.
///
/// A new grocery item is visible immediately and ends up carrying the
/// server-assigned id once the write completes.
///
/// Expected: Ok with a srv- id, no temp- ids left in the sequence
#[tokio::test]
async fn create_resolves_temp_entry_to_server_record() -> Result<(), TestError> {
    let test = TestBuilder::<GroceryItems>::new()
        .with_record(factory::mock_grocery_item("g-1", "두부", false))
        .build()
        .await?;
    test.controller.load(Query::default(), true).await;

    let created = test
        .controller
        .create(factory::mock_grocery_item_draft("우유"))
        .await?;

    assert_eq!(created.id, "srv-1");
    assert_eq!(created.name, "우유");

    let snapshot = test.controller.snapshot().await;
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.total_count, 2);
    assert!(
        snapshot.items.iter().all(|item| !item.id.starts_with("temp-")),
        "no temporary ids remain after the write settles"
    );
    assert_eq!(snapshot.items[1].id, "srv-1", "grocery items append at the back");

    Ok(())
}

/// Tests that the insert position follows the controller configuration.
///
/// Expected: the created transaction lands at the front of the sequence
#[tokio::test]
async fn create_inserts_at_configured_position() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .build()
        .await?;
    test.controller.load(Query::default(), true).await;

    test.controller
        .create(factory::mock_transaction_draft(TransactionKind::Expense, 8_500))
        .await?;

    let snapshot = test.controller.snapshot().await;
    assert_eq!(snapshot.items[0].id, "srv-1", "new ledger entries show first");
    assert_eq!(snapshot.items[1].id, "tx-1");

    Ok(())
}

/// Tests the create failure path.
///
/// Verifies that a rejected create removes the optimistic entry and leaves
/// the sequence exactly as it was before the call.
///
/// Expected: Err, sequence deep-equal to the pre-call snapshot
#[tokio::test]
async fn failed_create_rolls_back_optimistic_entry() -> Result<(), TestError> {
    let test = TestBuilder::<GroceryItems>::new()
        .with_record(factory::mock_grocery_item("g-1", "두부", false))
        .build()
        .await?;
    test.controller.load(Query::default(), true).await;
    let before = test.controller.snapshot().await;

    test.service.fail_next_create("quota exceeded");
    let result = test
        .controller
        .create(factory::mock_grocery_item_draft("우유"))
        .await;

    assert!(result.is_err());
    let after = test.controller.snapshot().await;
    assert_eq!(after.items, before.items, "rollback restores the exact sequence");
    assert_eq!(after.total_count, before.total_count);
    assert!(after.error.is_some(), "failure is surfaced on the snapshot");

    Ok(())
}

/// Tests that a successful create invalidates cached query results.
///
/// Expected: a cached load after the create fetches again
#[tokio::test]
async fn create_invalidates_cache() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new().build().await?;
    test.controller.load(Query::default(), true).await;

    test.controller
        .create(factory::mock_transaction_draft(TransactionKind::Income, 3_000_000))
        .await?;
    test.controller.load(Query::default(), true).await;

    assert_eq!(
        test.service.fetch_calls(),
        2,
        "stored page is stale after a write"
    );

    Ok(())
}
