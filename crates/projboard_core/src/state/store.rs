//! Single-threaded item store with snapshot broadcasting.
//!
//! `Store` is a cheap handle; clones share the same state. One store is
//! constructed at assembly time and handed to every component that needs it.
//!
//! # Invariants
//! - Item ids are unique and the sequence is append-only.
//! - `transition` never broadcasts for unknown ids or unchanged status.
//! - The internal borrow is released before any subscriber runs, so a
//!   subscriber may call back into the store.
//! - A mutation made while subscribers run updates state immediately; its
//!   broadcast is folded into the running one, which repeats with a fresh
//!   snapshot until no change is pending. Every subscriber's last snapshot
//!   is therefore the current state.

use crate::model::item::{Item, ItemId, ItemStatus};
use log::{debug, info};
use std::cell::RefCell;
use std::fmt::{Debug, Formatter};
use std::ops::Deref;
use std::rc::Rc;

/// Immutable copy of the item sequence at one point in time.
///
/// All subscribers of one broadcast share the same allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot(Rc<[Item]>);

impl Snapshot {
    fn capture(items: &[Item]) -> Self {
        Self(Rc::from(items))
    }

    pub fn items(&self) -> &[Item] {
        &self.0
    }

    /// Returns whether two snapshots come from the same broadcast.
    pub fn ptr_eq(&self, other: &Snapshot) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for Snapshot {
    type Target = [Item];

    fn deref(&self) -> &[Item] {
        &self.0
    }
}

/// Registration handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

/// Result of a status transition request. None of these are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Status changed and subscribers were notified.
    Moved { from: ItemStatus, to: ItemStatus },
    /// Item already had the requested status.
    Unchanged,
    /// No item with that id; treated as a stale reference.
    NotFound,
}

type Subscriber = Rc<dyn Fn(&Snapshot)>;

#[derive(Default)]
struct StoreInner {
    items: Vec<Item>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
    broadcasting: bool,
    pending: bool,
}

/// Clears the broadcast flags even when a subscriber panics.
struct BroadcastGuard<'a>(&'a RefCell<StoreInner>);

impl Drop for BroadcastGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut inner) = self.0.try_borrow_mut() {
            inner.broadcasting = false;
            inner.pending = false;
        }
    }
}

/// Shared handle to the board's authoritative state.
#[derive(Clone, Default)]
pub struct Store {
    inner: Rc<RefCell<StoreInner>>,
}

impl Debug for Store {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Store")
            .field("items", &inner.items.len())
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` for every future snapshot.
    ///
    /// The callback is not invoked on registration; use [`Store::snapshot`]
    /// to render current state immediately.
    pub fn subscribe(&self, callback: impl Fn(&Snapshot) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        inner.next_subscription += 1;
        let id = SubscriptionId(inner.next_subscription);
        let callback: Subscriber = Rc::new(callback);
        inner.subscribers.push((id, callback));
        debug!(
            "event=subscribe module=store status=ok subscription={} subscribers={}",
            id.0,
            inner.subscribers.len()
        );
        id
    }

    /// Removes a registration. Returns `false` when it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(existing, _)| *existing != id);
        let removed = inner.subscribers.len() != before;
        debug!(
            "event=unsubscribe module=store status={} subscription={}",
            if removed { "ok" } else { "missing" },
            id.0
        );
        removed
    }

    /// Appends a new active item and notifies subscribers.
    ///
    /// Inputs are expected to be validated already.
    pub fn create(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u8,
    ) -> ItemId {
        let item = Item::new(title, description, people);
        let id = item.id();
        self.inner.borrow_mut().items.push(item);
        info!("event=item_created module=store status=ok item_id={id} people={people}");
        self.broadcast();
        id
    }

    /// Moves one item to `status`.
    ///
    /// Unknown ids and same-status requests are silent no-ops without a
    /// broadcast.
    pub fn transition(&self, id: ItemId, status: ItemStatus) -> TransitionOutcome {
        let outcome = {
            let mut inner = self.inner.borrow_mut();
            match inner.items.iter_mut().find(|item| item.id() == id) {
                None => TransitionOutcome::NotFound,
                Some(item) if item.status() == status => TransitionOutcome::Unchanged,
                Some(item) => {
                    let from = item.status();
                    item.set_status(status);
                    TransitionOutcome::Moved { from, to: status }
                }
            }
        };

        match outcome {
            TransitionOutcome::Moved { from, to } => {
                info!(
                    "event=item_moved module=store status=ok item_id={id} from={from} to={to}"
                );
                self.broadcast();
            }
            TransitionOutcome::Unchanged => {
                debug!("event=item_moved module=store status=unchanged item_id={id} to={status}");
            }
            TransitionOutcome::NotFound => {
                debug!("event=item_moved module=store status=not_found item_id={id}");
            }
        }
        outcome
    }

    /// Copies current state without notifying anyone.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.inner.borrow().items)
    }

    pub fn get(&self, id: ItemId) -> Option<Item> {
        self.inner
            .borrow()
            .items
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().items.is_empty()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    fn broadcast(&self) {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.broadcasting {
                inner.pending = true;
                debug!("event=broadcast module=store status=deferred");
                return;
            }
            inner.broadcasting = true;
        }
        let _guard = BroadcastGuard(&self.inner);

        loop {
            let (snapshot, subscribers) = {
                let mut inner = self.inner.borrow_mut();
                inner.pending = false;
                let subscribers = inner
                    .subscribers
                    .iter()
                    .map(|(_, callback)| Rc::clone(callback))
                    .collect::<Vec<_>>();
                (Snapshot::capture(&inner.items), subscribers)
            };

            debug!(
                "event=broadcast module=store status=ok items={} subscribers={}",
                snapshot.len(),
                subscribers.len()
            );
            for callback in subscribers {
                callback(&snapshot);
            }

            if !self.inner.borrow().pending {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Snapshot, Store, TransitionOutcome};
    use crate::model::item::ItemStatus;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(store: &Store) -> Rc<RefCell<Vec<Snapshot>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |snapshot| sink.borrow_mut().push(snapshot.clone()));
        seen
    }

    #[test]
    fn subscribe_does_not_fire_immediately() {
        let store = Store::new();
        store.create("a", "first item", 1);
        let seen = recorder(&store);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn subscribers_share_one_snapshot_in_registration_order() {
        let store = Store::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        let shared = Rc::new(RefCell::new(Vec::<Snapshot>::new()));
        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            let shared = Rc::clone(&shared);
            store.subscribe(move |snapshot| {
                order.borrow_mut().push(tag);
                shared.borrow_mut().push(snapshot.clone());
            });
        }

        store.create("a", "first item", 2);

        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
        let shared = shared.borrow();
        assert!(shared[0].ptr_eq(&shared[1]));
        assert!(shared[1].ptr_eq(&shared[2]));
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let store = Store::new();
        let seen = Rc::new(RefCell::new(0usize));
        let counter = Rc::clone(&seen);
        let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

        store.create("a", "first item", 1);
        assert!(store.unsubscribe(id));
        assert!(!store.unsubscribe(id));
        store.create("b", "second item", 1);

        assert_eq!(*seen.borrow(), 1);
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn subscriber_may_reenter_store() {
        let store = Store::new();
        let handle = store.clone();
        let lengths = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&lengths);
        store.subscribe(move |snapshot| {
            sink.borrow_mut().push(snapshot.len());
            if let Some(first) = snapshot.first() {
                handle.transition(first.id(), ItemStatus::Finished);
            }
        });

        store.create("a", "first item", 1);

        // Create round, then the repeat round carrying the transition.
        assert_eq!(*lengths.borrow(), vec![1, 1]);
        let item = store.snapshot()[0].clone();
        assert_eq!(item.status(), ItemStatus::Finished);
    }

    #[test]
    fn reentrant_change_reaches_every_subscriber_last() {
        let store = Store::new();
        let handle = store.clone();
        store.subscribe(move |snapshot| {
            if let Some(first) = snapshot.first() {
                handle.transition(first.id(), ItemStatus::Finished);
            }
        });
        let second = recorder(&store);
        let third = recorder(&store);

        store.create("a", "first item", 1);

        let current = store.snapshot();
        for seen in [&second, &third] {
            let seen = seen.borrow();
            assert_eq!(seen.len(), 2);
            assert_eq!(seen[0][0].status(), ItemStatus::Active);
            assert_eq!(*seen.last().expect("delivered"), current);
        }
        assert!(second.borrow()[1].ptr_eq(&third.borrow()[1]));
    }

    #[test]
    fn nested_create_is_delivered_after_outer_round() {
        let store = Store::new();
        let handle = store.clone();
        store.subscribe(move |snapshot| {
            if snapshot.len() == 1 {
                handle.create("b", "spawned item", 2);
            }
        });
        let seen = recorder(&store);

        store.create("a", "first item", 1);

        let lengths = seen.borrow().iter().map(|s| s.len()).collect::<Vec<_>>();
        assert_eq!(lengths, vec![1, 2]);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn panicking_subscriber_does_not_wedge_broadcasts() {
        let store = Store::new();
        let id = store.subscribe(|_| panic!("subscriber failure"));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            store.create("a", "first item", 1);
        }));
        assert!(result.is_err());

        store.unsubscribe(id);
        let seen = recorder(&store);
        store.create("b", "second item", 1);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn transition_reports_outcome() {
        let store = Store::new();
        let id = store.create("a", "first item", 3);

        assert_eq!(
            store.transition(id, ItemStatus::Active),
            TransitionOutcome::Unchanged
        );
        assert_eq!(
            store.transition(id, ItemStatus::Finished),
            TransitionOutcome::Moved {
                from: ItemStatus::Active,
                to: ItemStatus::Finished,
            }
        );
        assert_eq!(
            store.transition(uuid::Uuid::new_v4(), ItemStatus::Active),
            TransitionOutcome::NotFound
        );
    }
}
