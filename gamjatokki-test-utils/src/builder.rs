//! Declarative test builder for controller tests.
//!
//! This module provides the `TestBuilder` API for configuring a controller
//! under test before execution. The builder pattern allows chaining
//! configuration methods together, with the controller, mock service, and
//! realtime source wired up during the final `build()` call.

use std::sync::Arc;

use gamjatokki::controller::{CollectionController, ControllerConfig};
use gamjatokki::realtime::ChannelRealtimeSource;
use gamjatokki::resource::Resource;

use crate::error::TestError;
use crate::service::MockRemoteService;

/// Builder for declarative controller test initialization.
///
/// Seeds the mock remote service, optionally overrides the controller
/// configuration, and attaches a realtime source when asked. Finalize with
/// `build()` to get a complete [`TestSetup`].
pub struct TestBuilder<R: Resource> {
    records: Vec<R::Entity>,
    total_count: Option<u64>,
    config: Option<ControllerConfig>,
    attach_realtime: bool,
}

impl<R: Resource> TestBuilder<R> {
    /// Create a new TestBuilder with no records and the resource's standard
    /// configuration.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            total_count: None,
            config: None,
            attach_realtime: false,
        }
    }

    /// Seed one server-side record.
    ///
    /// # Arguments
    /// - `entity` - Record returned by the mock service's `fetch_list`
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_record(mut self, entity: R::Entity) -> Self {
        self.records.push(entity);
        self
    }

    /// Seed multiple server-side records.
    pub fn with_records(mut self, entities: Vec<R::Entity>) -> Self {
        self.records.extend(entities);
        self
    }

    /// Report a paginated total instead of the seeded record count.
    pub fn with_total_count(mut self, total_count: u64) -> Self {
        self.total_count = Some(total_count);
        self
    }

    /// Override the controller configuration (tests shrink the TTL or pin
    /// the insert position this way).
    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Attach the controller to the in-process realtime source during
    /// `build()`, so published events flow into the controller.
    pub fn with_realtime(mut self) -> Self {
        self.attach_realtime = true;
        self
    }

    /// Execute the queued configuration and wire up the controller.
    ///
    /// # Returns
    /// - `TestSetup` - Controller, mock service, and realtime source
    pub async fn build(self) -> Result<TestSetup<R>, TestError> {
        let service = Arc::new(MockRemoteService::<R>::with_records(self.records));
        if let Some(total_count) = self.total_count {
            service.set_total_count(total_count);
        }

        let controller = match self.config {
            Some(config) => CollectionController::with_config(service.clone(), config),
            None => CollectionController::new(service.clone()),
        };

        let realtime = Arc::new(ChannelRealtimeSource::new());
        if self.attach_realtime {
            controller.attach(realtime.as_ref()).await?;
        }

        Ok(TestSetup {
            controller,
            service,
            realtime,
        })
    }
}

impl<R: Resource> Default for TestBuilder<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fully wired controller test environment.
pub struct TestSetup<R: Resource> {
    /// Controller under test.
    pub controller: CollectionController<R>,
    /// Mock remote service backing the controller.
    pub service: Arc<MockRemoteService<R>>,
    /// In-process realtime source; publish events here when the builder was
    /// configured `with_realtime()`.
    pub realtime: Arc<ChannelRealtimeSource<R::Entity>>,
}
