use std::{cell::RefCell, fmt, rc::Rc};

use serde_json::Value;

use super::{Store, WatchFn, WatchId};

/// Links reactive objects to callbacks for the lifetime of an anchor node.
pub trait Binder<N> {
    /// Run `callback` whenever `source[property]` is written. The registration lives until
    /// [`Binder::release()`] is called for `anchor`. A missing `source` never fires.
    fn watch(&self, anchor: &N, source: Option<&Store>, property: &str, callback: WatchFn);

    /// Drop every registration made for `anchor`.
    fn release(&self, anchor: &N);
}

struct Registration<N> {
    anchor: N,
    store: Store,
    id: WatchId,
}

/// [`Binder`] backed by [`Store`] watchers.
///
/// If the property already holds a value when the watch is installed, the callback runs
/// immediately with it, before any later writes are delivered.
pub struct StoreBinder<N> {
    registrations: RefCell<Vec<Registration<N>>>,
}

impl<N> StoreBinder<N> {
    pub fn new() -> Self {
        Self {
            registrations: RefCell::new(Vec::new()),
        }
    }

    /// Number of live registrations.
    pub fn len(&self) -> usize {
        self.registrations.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<N> Default for StoreBinder<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Binder<N> for StoreBinder<N>
where
    N: Clone + PartialEq + fmt::Debug,
{
    fn watch(&self, anchor: &N, source: Option<&Store>, property: &str, callback: WatchFn) {
        let Some(store) = source else {
            tracing::debug!(?anchor, property, "no data source to watch");
            return;
        };

        let id = store.watch(property, Rc::clone(&callback));
        self.registrations.borrow_mut().push(Registration {
            anchor: anchor.clone(),
            store: store.clone(),
            id,
        });

        tracing::trace!(?anchor, property, "watch registered");

        if let Some(current) = store.get(property) {
            callback(&current);
        }
    }

    fn release(&self, anchor: &N) {
        let released = {
            let mut registrations = self.registrations.borrow_mut();
            let (released, kept) = registrations
                .drain(..)
                .partition::<Vec<_>, _>(|registration| &registration.anchor == anchor);
            *registrations = kept;

            released
        };

        for Registration { store, id, .. } in released {
            store.unwatch(id);
        }
    }
}

impl<N> fmt::Debug for StoreBinder<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreBinder")
            .field("registrations", &self.len())
            .finish()
    }
}

/// Truthiness of a dynamic value: `null`, `false`, `0`, `NaN` and `""` are falsy.
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(value) => *value,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(string) => !string.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use serde_json::{json, Value};

    use super::{truthy, Binder, StoreBinder};
    use crate::reactive::Store;

    fn counter() -> (Rc<RefCell<Vec<Value>>>, Rc<dyn Fn(&Value)>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let callback = {
            let seen = Rc::clone(&seen);
            Rc::new(move |value: &Value| seen.borrow_mut().push(value.clone())) as Rc<dyn Fn(&Value)>
        };

        (seen, callback)
    }

    #[test]
    fn dispatches_current_value_on_watch() {
        let binder = StoreBinder::new();
        let store = [("loaded", json!(false))].into_iter().collect::<Store>();
        let (seen, callback) = counter();

        binder.watch(&1, Some(&store), "loaded", callback);
        store.set("loaded", true);

        assert_eq!(*seen.borrow(), vec![json!(false), json!(true)]);
    }

    #[test]
    fn unset_property_waits_for_write() {
        let binder = StoreBinder::new();
        let store = Store::new();
        let (seen, callback) = counter();

        binder.watch(&1, Some(&store), "open", callback);
        assert!(seen.borrow().is_empty());

        store.set("open", 1);
        assert_eq!(*seen.borrow(), vec![json!(1)]);
    }

    #[test]
    fn missing_source_never_fires() {
        let binder = StoreBinder::<u32>::new();
        let (seen, callback) = counter();

        binder.watch(&1, None, "open", callback);

        assert!(binder.is_empty());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn release_only_drops_matching_anchor() {
        let binder = StoreBinder::new();
        let store = Store::new();
        let (seen, callback) = counter();

        binder.watch(&1, Some(&store), "size", Rc::clone(&callback));
        binder.watch(&2, Some(&store), "size", callback);
        binder.release(&1);

        store.set("size", "md");
        assert_eq!(binder.len(), 1);
        assert_eq!(store.watcher_count(), 1);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn truthiness() {
        for falsy in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!truthy(&falsy), "{falsy} should be falsy");
        }

        for truthy_value in [json!(true), json!(1), json!("no"), json!([]), json!({})] {
            assert!(truthy(&truthy_value), "{truthy_value} should be truthy");
        }
    }
}
