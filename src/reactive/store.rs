use std::{
    cell::{Cell, RefCell},
    collections::HashMap,
    fmt,
    rc::Rc,
};

use serde_json::Value;

use crate::util::HashMapList;

/// Callback run with the new value of a watched property.
pub type WatchFn = Rc<dyn Fn(&Value)>;

/// Handle to a single watcher registered on a [`Store`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WatchId(u64);

struct Watcher {
    id: WatchId,
    callback: WatchFn,
}

#[derive(Default)]
struct Inner {
    values: RefCell<HashMap<String, Value>>,
    watchers: RefCell<HashMapList<String, Watcher>>,
    next_id: Cell<u64>,
}

/// A reactive object: a set of named properties, each of which can be watched for writes.
///
/// Cloning produces another handle to the same object. Every [`Store::set()`] notifies the
/// watchers of that property, even if the value is identical to the previous one.
#[derive(Clone, Default)]
pub struct Store(Rc<Inner>);

impl Store {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieve the current value of a property, if it has been set.
    pub fn get(&self, property: &str) -> Option<Value> {
        self.0.values.borrow().get(property).cloned()
    }

    /// Write a property and synchronously notify its watchers, in registration order.
    ///
    /// Watchers are snapshotted before dispatch, so callbacks are free to write, watch or
    /// unwatch. A watcher removed by an earlier callback in the same dispatch is skipped.
    pub fn set<P, V>(&self, property: P, value: V)
    where
        P: Into<String>,
        V: Into<Value>,
    {
        let property = property.into();
        let value = value.into();

        self.0
            .values
            .borrow_mut()
            .insert(property.clone(), value.clone());

        let snapshot = self
            .0
            .watchers
            .borrow()
            .get(property.as_str())
            .iter()
            .map(|watcher| (watcher.id, Rc::clone(&watcher.callback)))
            .collect::<Vec<_>>();

        tracing::trace!(%property, watchers = snapshot.len(), "store write");

        for (id, callback) in snapshot {
            if self.is_watching(&property, id) {
                callback(&value);
            }
        }
    }

    /// Register a callback for writes to `property`. The callback is not run for the current
    /// value.
    pub fn watch<P>(&self, property: P, callback: WatchFn) -> WatchId
    where
        P: Into<String>,
    {
        let id = WatchId(self.0.next_id.get());
        self.0.next_id.set(id.0 + 1);

        self.0
            .watchers
            .borrow_mut()
            .insert(property.into(), Watcher { id, callback });

        id
    }

    /// Remove a watcher. Returns `false` if it was not registered.
    pub fn unwatch(&self, id: WatchId) -> bool {
        self.0
            .watchers
            .borrow_mut()
            .retain(|watcher| watcher.id != id)
            > 0
    }

    /// Number of live watchers across all properties.
    pub fn watcher_count(&self) -> usize {
        self.0.watchers.borrow().len()
    }

    /// Whether both handles refer to the same object.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    fn is_watching(&self, property: &str, id: WatchId) -> bool {
        self.0
            .watchers
            .borrow()
            .get(property)
            .iter()
            .any(|watcher| watcher.id == id)
    }
}

impl<P> FromIterator<(P, Value)> for Store
where
    P: Into<String>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (P, Value)>,
    {
        let store = Self::new();
        store.0.values.borrow_mut().extend(
            iter.into_iter()
                .map(|(property, value)| (property.into(), value)),
        );

        store
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("values", &self.0.values.borrow())
            .field("watchers", &self.watcher_count())
            .finish()
    }
}
