//! Realtime event source boundary and in-process channel implementation.
//!
//! External change notifications reach the controller as a stream of
//! [`RealtimeEvent`]s over a channel. Subscribing yields the receiving end
//! plus a [`Subscription`] handle whose teardown is idempotent and also runs
//! on drop, so releasing the channel is a scoped-resource guarantee rather
//! than a callback-bookkeeping exercise.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::Error;
use crate::model::event::RealtimeEvent;

/// Buffered events per subscriber before the publisher starts dropping.
const SUBSCRIBER_CHANNEL_CAPACITY: usize = 64;

/// Handle releasing one realtime subscription.
///
/// `unsubscribe` may be called any number of times; only the first call has
/// an effect. Dropping the handle unsubscribes as well.
pub struct Subscription {
    release: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl Subscription {
    /// Wrap a release action into a subscription handle.
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Mutex::new(Some(Box::new(release))),
        }
    }

    /// Release the subscription. Safe to call repeatedly and on teardown.
    pub fn unsubscribe(&self) {
        let release = match self.release.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(release) = release {
            release();
        }
    }

    /// Whether the subscription has already been released.
    pub fn is_released(&self) -> bool {
        match self.release.lock() {
            Ok(guard) => guard.is_none(),
            Err(poisoned) => poisoned.into_inner().is_none(),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("released", &self.is_released())
            .finish()
    }
}

/// Push channel delivering external change notifications for a resource.
#[async_trait]
pub trait RealtimeSource<E>: Send + Sync {
    /// Open a subscription for `resource`, returning the release handle and
    /// the event receiver.
    async fn subscribe(
        &self,
        resource: &str,
    ) -> Result<(Subscription, mpsc::Receiver<RealtimeEvent<E>>), Error>;
}

type SubscriberMap<E> = HashMap<String, HashMap<u64, mpsc::Sender<RealtimeEvent<E>>>>;

/// In-process realtime source fanning events out over tokio channels.
///
/// Embedders bridge the vendor push connection by calling [`Self::publish`];
/// tests drive it directly. Slow subscribers have events dropped rather than
/// blocking the publisher.
pub struct ChannelRealtimeSource<E> {
    subscribers: Arc<Mutex<SubscriberMap<E>>>,
    next_id: AtomicU64,
}

impl<E: Clone + Send + 'static> ChannelRealtimeSource<E> {
    /// Source with no subscribers.
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Deliver `event` to every live subscriber of `resource`.
    ///
    /// Closed subscriptions are pruned as they are encountered; a full
    /// subscriber buffer drops the event for that subscriber only.
    pub fn publish(&self, resource: &str, event: RealtimeEvent<E>) {
        let mut subscribers = match self.subscribers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let Some(channel) = subscribers.get_mut(resource) else {
            return;
        };

        channel.retain(|_, sender| match sender.try_send(event.clone()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!(resource, kind = event.kind(), "subscriber buffer full, dropping event");
                true
            }
            Err(mpsc::error::TrySendError::Closed(_)) => false,
        });
    }

    /// Number of live subscriptions for `resource`.
    pub fn subscriber_count(&self, resource: &str) -> usize {
        let subscribers = match self.subscribers.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        subscribers.get(resource).map_or(0, HashMap::len)
    }
}

impl<E: Clone + Send + 'static> Default for ChannelRealtimeSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<E: Clone + Send + 'static> RealtimeSource<E> for ChannelRealtimeSource<E> {
    async fn subscribe(
        &self,
        resource: &str,
    ) -> Result<(Subscription, mpsc::Receiver<RealtimeEvent<E>>), Error> {
        let (sender, receiver) = mpsc::channel(SUBSCRIBER_CHANNEL_CAPACITY);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        {
            let mut subscribers = self
                .subscribers
                .lock()
                .map_err(|_| Error::Subscription("subscriber registry poisoned".to_string()))?;
            subscribers
                .entry(resource.to_string())
                .or_default()
                .insert(id, sender);
        }

        let registry = Arc::clone(&self.subscribers);
        let resource = resource.to_string();
        let subscription = Subscription::new(move || {
            let mut subscribers = match registry.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if let Some(channel) = subscribers.get_mut(&resource) {
                channel.remove(&id);
                if channel.is_empty() {
                    subscribers.remove(&resource);
                }
            }
        });

        Ok((subscription, receiver))
    }
}
