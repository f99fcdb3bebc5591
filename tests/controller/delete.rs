//! Tests for CollectionController::delete.
//!
//! This module verifies optimistic deletion: immediate removal, full
//! sequence restoration (ordering included) on failure, and cache
//! invalidation after a successful delete.

use super::*;

/// Tests that a delete removes the record immediately.
///
/// Expected: Ok, record gone from the sequence, count decremented
#[tokio::test]
async fn delete_removes_record_immediately() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .with_record(factory::mock_transaction("tx-2", TransactionKind::Income, 3_000_000))
        .build()
        .await?;
    test.controller.load(Query::default(), true).await;

    test.controller.delete("tx-1").await?;

    let snapshot = test.controller.snapshot().await;
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].id, "tx-2");
    assert_eq!(snapshot.total_count, 1);

    Ok(())
}

/// Tests the delete failure path.
///
/// Verifies that a rejected delete restores the whole sequence in its
/// original order, not just the removed record.
///
/// Expected: Err, ids back in their original positions
#[tokio::test]
async fn failed_delete_restores_sequence_order() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .with_record(factory::mock_transaction("tx-2", TransactionKind::Income, 3_000_000))
        .with_record(factory::mock_transaction("tx-3", TransactionKind::Expense, 8_500))
        .build()
        .await?;
    test.controller.load(Query::default(), true).await;

    test.service.fail_next_delete("record is referenced");
    let result = test.controller.delete("tx-2").await;

    assert!(result.is_err());
    let snapshot = test.controller.snapshot().await;
    let ids: Vec<_> = snapshot.items.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["tx-1", "tx-2", "tx-3"], "original order restored");
    assert_eq!(snapshot.total_count, 3);
    assert!(snapshot.error.is_some());

    Ok(())
}

/// Tests that deleting an id that was never loaded is a remote-only no-op
/// locally.
///
/// Expected: Ok, sequence unchanged, service called once
#[tokio::test]
async fn delete_of_unloaded_id_leaves_sequence_alone() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .build()
        .await?;
    test.controller.load(Query::default(), true).await;

    test.controller.delete("tx-404").await?;

    let snapshot = test.controller.snapshot().await;
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(test.service.delete_calls(), 1);

    Ok(())
}

/// Tests that a successful delete invalidates cached query results.
///
/// Expected: a cached load after the delete fetches again
#[tokio::test]
async fn delete_invalidates_cache() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .build()
        .await?;
    test.controller.load(Query::default(), true).await;

    test.controller.delete("tx-1").await?;
    test.controller.load(Query::default(), true).await;

    assert_eq!(test.service.fetch_calls(), 2);

    Ok(())
}
