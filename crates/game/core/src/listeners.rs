//! Ordered callback registries.
//!
//! Doors, the question controller, the player and the game state all expose
//! the same "register a callback, get notified on mutation" surface. Callbacks
//! run synchronously on the caller's turn, in registration order.
//!
//! Notification is not reentrant: while a notification is in flight the
//! registry is detached from its owner, so listeners added or removed from
//! inside a callback only take effect for later notifications. A listener may
//! remove itself; it is still called for the notification in flight.

use std::fmt;

/// Token returned on registration, used to remove the listener again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

/// Registry of boxed callbacks of type `F` (usually `dyn FnMut(..)`).
pub struct Listeners<F: ?Sized> {
    next_id: u64,
    entries: Vec<(ListenerId, Box<F>)>,
    /// Ids currently moved out by [`Listeners::detach`].
    in_flight: Vec<ListenerId>,
    /// In-flight ids removed before they were reattached.
    removed: Vec<ListenerId>,
}

impl<F: ?Sized> Listeners<F> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: Vec::new(),
            in_flight: Vec::new(),
            removed: Vec::new(),
        }
    }

    pub fn add(&mut self, listener: Box<F>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    /// Returns false if `id` is not currently registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        match self.entries.iter().position(|(entry, _)| *entry == id) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => match self.in_flight.iter().position(|entry| *entry == id) {
                Some(index) => {
                    self.in_flight.swap_remove(index);
                    self.removed.push(id);
                    true
                }
                None => false,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invokes `call` on every listener in registration order.
    pub fn for_each(&mut self, mut call: impl FnMut(&mut F)) {
        for (_, listener) in &mut self.entries {
            call(listener.as_mut());
        }
    }

    /// Moves the listeners out so they can be called with a borrow of the owner.
    ///
    /// Must be paired with [`Listeners::reattach`].
    pub(crate) fn detach(&mut self) -> Self {
        let entries = std::mem::take(&mut self.entries);
        self.in_flight.extend(entries.iter().map(|(id, _)| *id));
        Self {
            next_id: self.next_id,
            entries,
            in_flight: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Puts detached listeners back in front of any registered meanwhile,
    /// dropping those removed while they were out.
    pub(crate) fn reattach(&mut self, detached: Self) {
        let mut kept = Vec::with_capacity(detached.entries.len());
        for (id, listener) in detached.entries {
            if let Some(index) = self.removed.iter().position(|entry| *entry == id) {
                self.removed.swap_remove(index);
            } else {
                self.in_flight.retain(|entry| *entry != id);
                kept.push((id, listener));
            }
        }
        let added = std::mem::replace(&mut self.entries, kept);
        self.entries.extend(added);
        self.next_id = self.next_id.max(detached.next_id);
    }
}

impl<F: ?Sized> Default for Listeners<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ?Sized> fmt::Debug for Listeners<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("registered", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Callback = dyn FnMut(u32);

    #[test]
    fn notifies_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut listeners: Listeners<Callback> = Listeners::new();

        for tag in 0..3 {
            let seen = Rc::clone(&seen);
            listeners.add(Box::new(move |value| seen.borrow_mut().push((tag, value))));
        }
        listeners.for_each(|listener| listener(7));

        assert_eq!(*seen.borrow(), vec![(0, 7), (1, 7), (2, 7)]);
    }

    #[test]
    fn removing_unknown_listener_reports_false() {
        let mut listeners: Listeners<Callback> = Listeners::new();
        let id = listeners.add(Box::new(|_| {}));

        assert!(listeners.remove(id));
        assert!(!listeners.remove(id));
        assert!(listeners.is_empty());
    }

    #[test]
    fn listeners_added_while_detached_are_kept_after_originals() {
        let mut listeners: Listeners<Callback> = Listeners::new();
        let first = listeners.add(Box::new(|_| {}));

        let detached = listeners.detach();
        let late = listeners.add(Box::new(|_| {}));
        listeners.reattach(detached);

        assert_ne!(first, late);
        assert_eq!(listeners.len(), 2);
        assert!(listeners.remove(first));
        assert!(listeners.remove(late));
    }

    #[test]
    fn listener_removed_while_detached_is_dropped_on_reattach() {
        let mut listeners: Listeners<Callback> = Listeners::new();
        let first = listeners.add(Box::new(|_| {}));
        let second = listeners.add(Box::new(|_| {}));

        let detached = listeners.detach();
        assert!(listeners.remove(first));
        assert!(!listeners.remove(first));
        listeners.reattach(detached);

        assert_eq!(listeners.len(), 1);
        assert!(!listeners.remove(first));
        assert!(listeners.remove(second));
    }
}
