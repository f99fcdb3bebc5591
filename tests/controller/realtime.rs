//! Tests for realtime event handling.
//!
//! This module verifies the event pump wired up by attach: inserts,
//! in-place updates, deletes, suppression of our own create echo, cache
//! invalidation without refetching, and dispose semantics.

use gamjatokki::RealtimeEvent;

use super::*;

/// Tests that a pushed insert joins the sequence without a refetch.
///
/// Expected: new record visible at the configured position, fetch count
/// unchanged
#[tokio::test]
async fn insert_event_joins_sequence_without_refetch() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .with_realtime()
        .build()
        .await?;
    test.controller.load(Query::default(), true).await;

    test.realtime.publish(
        "transactions",
        RealtimeEvent::Insert(factory::mock_transaction("tx-2", TransactionKind::Income, 500_000)),
    );
    settle().await;

    let snapshot = test.controller.snapshot().await;
    assert_eq!(snapshot.items.len(), 2);
    assert_eq!(snapshot.items[0].id, "tx-2", "ledger inserts go to the front");
    assert_eq!(test.service.fetch_calls(), 1, "events never trigger a fetch");

    test.controller.dispose().await;
    Ok(())
}

/// Tests that an insert for an id already in the sequence is dropped.
///
/// Expected: sequence length unchanged
#[tokio::test]
async fn duplicate_insert_event_is_ignored() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .with_realtime()
        .build()
        .await?;
    test.controller.load(Query::default(), true).await;

    test.realtime.publish(
        "transactions",
        RealtimeEvent::Insert(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000)),
    );
    settle().await;

    let snapshot = test.controller.snapshot().await;
    assert_eq!(snapshot.items.len(), 1, "duplicate insert is suppressed");

    test.controller.dispose().await;
    Ok(())
}

/// Tests echo suppression for our own create.
///
/// The server pushes the created record back over the realtime channel;
/// the controller must not show it twice.
///
/// Expected: exactly one record with the server id
#[tokio::test]
async fn echo_of_own_create_is_suppressed() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_realtime()
        .build()
        .await?;
    test.controller.load(Query::default(), true).await;

    let created = test
        .controller
        .create(factory::mock_transaction_draft(TransactionKind::Expense, 8_500))
        .await?;
    test.realtime
        .publish("transactions", RealtimeEvent::Insert(created.clone()));
    settle().await;

    let snapshot = test.controller.snapshot().await;
    let matching = snapshot
        .items
        .iter()
        .filter(|t| t.id == created.id)
        .count();
    assert_eq!(matching, 1, "echo of our own create shows once");

    test.controller.dispose().await;
    Ok(())
}

/// Tests that a pushed update replaces the record in place.
///
/// Expected: same position, new field values
#[tokio::test]
async fn update_event_merges_in_place() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .with_record(factory::mock_transaction("tx-2", TransactionKind::Income, 500_000))
        .with_realtime()
        .build()
        .await?;
    test.controller.load(Query::default(), true).await;

    test.realtime.publish(
        "transactions",
        RealtimeEvent::Update(factory::mock_transaction("tx-2", TransactionKind::Income, 650_000)),
    );
    settle().await;

    let snapshot = test.controller.snapshot().await;
    assert_eq!(snapshot.items[1].id, "tx-2", "position is preserved");
    assert_eq!(snapshot.items[1].amount, 650_000);

    test.controller.dispose().await;
    Ok(())
}

/// Tests that an update for an id outside the sequence is dropped.
///
/// Expected: sequence unchanged
#[tokio::test]
async fn update_event_for_unknown_id_is_ignored() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .with_realtime()
        .build()
        .await?;
    test.controller.load(Query::default(), true).await;

    test.realtime.publish(
        "transactions",
        RealtimeEvent::Update(factory::mock_transaction("tx-404", TransactionKind::Income, 1)),
    );
    settle().await;

    let snapshot = test.controller.snapshot().await;
    assert_eq!(snapshot.items.len(), 1);
    assert_eq!(snapshot.items[0].id, "tx-1");

    test.controller.dispose().await;
    Ok(())
}

/// Tests that a pushed delete removes the record.
///
/// Expected: record gone, count decremented
#[tokio::test]
async fn delete_event_removes_record() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .with_realtime()
        .build()
        .await?;
    test.controller.load(Query::default(), true).await;

    test.realtime
        .publish("transactions", RealtimeEvent::Delete("tx-1".to_string()));
    settle().await;

    let snapshot = test.controller.snapshot().await;
    assert!(snapshot.items.is_empty());
    assert_eq!(snapshot.total_count, 0);

    test.controller.dispose().await;
    Ok(())
}

/// Tests that any event marks cached query results stale.
///
/// Expected: a cached load after the event fetches again
#[tokio::test]
async fn event_invalidates_cache() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .with_realtime()
        .build()
        .await?;
    test.controller.load(Query::default(), true).await;

    test.realtime
        .publish("transactions", RealtimeEvent::Delete("tx-1".to_string()));
    settle().await;
    test.controller.load(Query::default(), true).await;

    assert_eq!(test.service.fetch_calls(), 2, "event dropped the cache entry");

    test.controller.dispose().await;
    Ok(())
}

/// Tests that events for other resources never reach this controller.
///
/// Expected: sequence unchanged
#[tokio::test]
async fn events_for_other_resources_are_not_delivered() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .with_realtime()
        .build()
        .await?;
    test.controller.load(Query::default(), true).await;

    test.realtime
        .publish("grocery_items", RealtimeEvent::Delete("tx-1".to_string()));
    settle().await;

    let snapshot = test.controller.snapshot().await;
    assert_eq!(snapshot.items.len(), 1);

    test.controller.dispose().await;
    Ok(())
}

/// Tests dispose semantics.
///
/// Verifies that dispose releases the subscription, later events are not
/// applied, state stays readable, and a second dispose is harmless.
///
/// Expected: no subscribers left, sequence frozen, no panic on re-dispose
#[tokio::test]
async fn dispose_stops_event_delivery() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_record(factory::mock_transaction("tx-1", TransactionKind::Expense, 12_000))
        .with_realtime()
        .build()
        .await?;
    test.controller.load(Query::default(), true).await;

    test.controller.dispose().await;
    assert_eq!(test.realtime.subscriber_count("transactions"), 0);

    test.realtime
        .publish("transactions", RealtimeEvent::Delete("tx-1".to_string()));
    settle().await;

    let snapshot = test.controller.snapshot().await;
    assert_eq!(snapshot.items.len(), 1, "events after dispose are not applied");

    test.controller.dispose().await;
    Ok(())
}

/// Tests that attaching twice keeps the original subscription.
///
/// Expected: Ok, still a single subscriber
#[tokio::test]
async fn second_attach_is_a_no_op() -> Result<(), TestError> {
    let test = TestBuilder::<Transactions>::new()
        .with_realtime()
        .build()
        .await?;

    test.controller.attach(test.realtime.as_ref()).await?;

    assert_eq!(test.realtime.subscriber_count("transactions"), 1);

    test.controller.dispose().await;
    Ok(())
}
