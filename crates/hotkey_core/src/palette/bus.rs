//! Selection bus: broadcast "open this todo" between surfaces.
//!
//! # Invariants
//! - `publish` delivers synchronously, in registration order.
//! - Subscriptions live until `unsubscribe`; there is no drop-based release.

use crate::model::todo::TodoId;
use crate::notify::Subscribers;
use log::debug;

/// Handle returned by [`SelectionBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BusSubscription(u64);

/// Single-channel publish/subscribe for selection requests.
///
/// Shared between surfaces as `Rc<SelectionBus>`; holds no state beyond the
/// subscriber list.
#[derive(Default)]
pub struct SelectionBus {
    subscribers: Subscribers<TodoId>,
}

impl SelectionBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that every subscriber surface the todo `id`.
    pub fn publish(&self, id: TodoId) {
        debug!(
            "event=selection_publish module=bus status=ok todo_id={id} subscribers={}",
            self.subscribers.len()
        );
        self.subscribers.notify(&id);
    }

    pub fn subscribe(&self, handler: impl Fn(TodoId) + 'static) -> BusSubscription {
        BusSubscription(self.subscribers.add(move |id: &TodoId| handler(*id)))
    }

    /// Releases a subscription. Returns `false` if it was already released.
    pub fn unsubscribe(&self, subscription: BusSubscription) -> bool {
        self.subscribers.remove(subscription.0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
