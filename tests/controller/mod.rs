//! Tests for the collection controller.
//!
//! These tests verify the controller's end-to-end behavior over the mock
//! remote service and the in-process realtime source, including:
//! - Cached and uncached list loading
//! - Optimistic create, update, and delete with rollback on failure
//! - Full refresh bypassing the cache
//! - Realtime event merging and echo suppression

mod create;
mod delete;
mod load;
mod realtime;

use std::time::Duration;

use entity::transaction::{TransactionKind, TransactionPatch};
use gamjatokki::controller::{ControllerConfig, InsertPosition};
use gamjatokki::model::query::Query;
use gamjatokki::resource::transaction::{TransactionFilters, Transactions};
use gamjatokki_test_utils::prelude::*;

/// Give the realtime pump task a chance to drain its channel.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}
