//! Observable value holder with explicit subscribe/unsubscribe.

use crate::notify::Subscribers;

/// Handle returned by [`Observable::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

/// Value that notifies subscribers, in registration order, on every `set`.
pub struct Observable<T> {
    value: T,
    subscribers: Subscribers<T>,
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            subscribers: Subscribers::default(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and notifies every subscriber with the new value.
    pub fn set(&mut self, value: T) {
        self.value = value;
        self.subscribers.notify(&self.value);
    }

    pub fn subscribe(&self, handler: impl Fn(&T) + 'static) -> ObserverId {
        ObserverId(self.subscribers.add(handler))
    }

    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        self.subscribers.remove(id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Observable;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn subscribers_see_each_new_value_until_unsubscribed() {
        let mut observable = Observable::new(0_u32);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let id = observable.subscribe(move |value| sink.borrow_mut().push(*value));

        observable.set(1);
        observable.set(2);
        assert!(observable.unsubscribe(id));
        observable.set(3);

        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(*observable.get(), 3);
    }
}
