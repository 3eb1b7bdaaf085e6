use std::{borrow::Borrow, collections::HashMap, hash::Hash};

/// Simple wrapper to make functionality easier for interfacing with `HashMap<K, Vec<T>>`. Handles
/// the logic surrounding initialising a new [Vec] when a new value is inserted with a unique key.
/// Allows for key collisions to be handled by appending the value to a [Vec], rather than over
/// writing it.
#[derive(Debug)]
pub struct HashMapList<K, V>(HashMap<K, Vec<V>>);

impl<K, V> HashMapList<K, V>
where
    K: Eq + Hash,
{
    /// Creates an empty [HashMapList].
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Retrieves a list of values by key. Will return an empty slice if there are no items that
    /// match the provided key.
    pub fn get<Q>(&self, k: &Q) -> &[V]
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.0.get(k).map(|v| v.as_slice()).unwrap_or_default()
    }

    /// Inserts a value with a given key into the collection. If there is no existing [Vec] for the
    /// key, an empty one will be initialised before the value is inserted.
    pub fn insert(&mut self, k: K, v: V) {
        self.0.entry(k).or_default().push(v);
    }

    /// Keeps only the values matching the predicate, dropping any key left without values.
    /// Returns the number of values removed.
    pub fn retain<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(&V) -> bool,
    {
        let mut removed = 0;

        self.0.retain(|_, list| {
            let before = list.len();
            list.retain(&mut keep);
            removed += before - list.len();

            !list.is_empty()
        });

        removed
    }

    /// Total number of values across every key.
    pub fn len(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl<K, V> Default for HashMapList<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
