//! Ordered handler registry shared by observable values, the selection bus
//! and store change notification.
//!
//! # Invariants
//! - Handlers run in registration order.
//! - Dispatch works on a snapshot: handlers added or removed while a
//!   notification is running take effect from the next notification.
//! - Single-threaded; registries are `!Send`.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

type Handler<E> = Rc<dyn Fn(&E)>;

pub(crate) struct Subscribers<E> {
    next_id: Cell<u64>,
    handlers: RefCell<BTreeMap<u64, Handler<E>>>,
}

impl<E> Default for Subscribers<E> {
    fn default() -> Self {
        Self {
            next_id: Cell::new(1),
            handlers: RefCell::new(BTreeMap::new()),
        }
    }
}

impl<E> Subscribers<E> {
    /// Registers `handler` and returns its registry key.
    pub(crate) fn add(&self, handler: impl Fn(&E) + 'static) -> u64 {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.handlers.borrow_mut().insert(id, Rc::new(handler));
        id
    }

    /// Removes a handler. Returns `false` when the key is unknown.
    pub(crate) fn remove(&self, id: u64) -> bool {
        self.handlers.borrow_mut().remove(&id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.handlers.borrow().len()
    }

    pub(crate) fn notify(&self, event: &E) {
        let snapshot = self
            .handlers
            .borrow()
            .values()
            .cloned()
            .collect::<Vec<_>>();
        for handler in snapshot {
            handler(event);
        }
    }
}
