//! Collection Shapes and the Iteration Core
//!
//! Every higher-order operation in the toolkit accepts either an ordered sequence or a
//! key-indexed mapping. The shape is resolved exactly once, by the `Collection`
//! implementation of the container, and everything downstream is written against
//! the trait.
//!
//! Supported shapes:
//! - Ordered sequences: `[T]`, `[T; N]`, `Vec<T>`, `im::Vector<T>` (index keys)
//! - Key-indexed mappings: `HashMap`, `BTreeMap`, `im::HashMap` (borrowed keys)

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// Uniform iteration capability shared by sequences and mappings.
///
/// `each` visits every element exactly once. Sequences visit in index order; mappings
/// visit in whatever order the underlying map yields, which callers must not rely on.
pub trait Collection {
    /// Element type handed to iterators.
    type Item;
    /// Position of an element: `usize` for sequences, `&K` for mappings.
    type Index<'a>
    where
        Self: 'a;

    /// Invokes `iterator(value, index, collection)` once per element.
    fn each<'a, F>(&'a self, iterator: F)
    where
        F: FnMut(&'a Self::Item, Self::Index<'a>, &'a Self);
}

/// Key-indexed access used by the merge helpers, `pluck` and property sorting.
pub trait Mapping {
    type Key;
    type Value;

    /// Returns the value stored under `key`, if any.
    fn lookup(&self, key: &Self::Key) -> Option<&Self::Value>;

    /// Stores `value` under `key`, replacing any previous value.
    fn assign(&mut self, key: Self::Key, value: Self::Value);

    /// Iterates over the stored key/value pairs in the map's own order.
    fn entries(&self) -> impl Iterator<Item = (&Self::Key, &Self::Value)>;

    /// Returns `true` if a value is stored under `key`.
    fn has_key(&self, key: &Self::Key) -> bool {
        self.lookup(key).is_some()
    }
}

/// Calls `iterator(value, index, collection)` for each element of `collection`.
///
/// This is the single primitive the derived operations are built on.
///
/// # Examples
///
/// ```
/// let mut visited = Vec::new();
/// each(&vec!['a', 'b'], |value, index, _| visited.push((index, *value)));
/// assert_eq!(visited, vec![(0, 'a'), (1, 'b')]);
/// ```
pub fn each<'a, C, F>(collection: &'a C, iterator: F)
where
    C: Collection + ?Sized,
    F: FnMut(&'a C::Item, C::Index<'a>, &'a C),
{
    collection.each(iterator)
}

impl<T> Collection for [T] {
    type Item = T;
    type Index<'a>
        = usize
    where
        Self: 'a;

    fn each<'a, F>(&'a self, mut iterator: F)
    where
        F: FnMut(&'a T, usize, &'a Self),
    {
        for (index, value) in self.iter().enumerate() {
            iterator(value, index, self);
        }
    }
}

impl<T, const N: usize> Collection for [T; N] {
    type Item = T;
    type Index<'a>
        = usize
    where
        Self: 'a;

    fn each<'a, F>(&'a self, mut iterator: F)
    where
        F: FnMut(&'a T, usize, &'a Self),
    {
        for (index, value) in self.iter().enumerate() {
            iterator(value, index, self);
        }
    }
}

impl<T> Collection for Vec<T> {
    type Item = T;
    type Index<'a>
        = usize
    where
        Self: 'a;

    fn each<'a, F>(&'a self, mut iterator: F)
    where
        F: FnMut(&'a T, usize, &'a Self),
    {
        for (index, value) in self.iter().enumerate() {
            iterator(value, index, self);
        }
    }
}

impl<T: Clone> Collection for im::Vector<T> {
    type Item = T;
    type Index<'a>
        = usize
    where
        Self: 'a;

    fn each<'a, F>(&'a self, mut iterator: F)
    where
        F: FnMut(&'a T, usize, &'a Self),
    {
        for (index, value) in self.iter().enumerate() {
            iterator(value, index, self);
        }
    }
}

impl<K, V, S> Collection for HashMap<K, V, S> {
    type Item = V;
    type Index<'a>
        = &'a K
    where
        Self: 'a;

    fn each<'a, F>(&'a self, mut iterator: F)
    where
        F: FnMut(&'a V, &'a K, &'a Self),
    {
        for (key, value) in self.iter() {
            iterator(value, key, self);
        }
    }
}

impl<K, V> Collection for BTreeMap<K, V> {
    type Item = V;
    type Index<'a>
        = &'a K
    where
        Self: 'a;

    fn each<'a, F>(&'a self, mut iterator: F)
    where
        F: FnMut(&'a V, &'a K, &'a Self),
    {
        for (key, value) in self.iter() {
            iterator(value, key, self);
        }
    }
}

impl<K, V, S> Collection for im::HashMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    type Item = V;
    type Index<'a>
        = &'a K
    where
        Self: 'a;

    fn each<'a, F>(&'a self, mut iterator: F)
    where
        F: FnMut(&'a V, &'a K, &'a Self),
    {
        for (key, value) in self.iter() {
            iterator(value, key, self);
        }
    }
}

impl<K, V, S> Mapping for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn assign(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}

impl<K: Ord, V> Mapping for BTreeMap<K, V> {
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn assign(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}

impl<K, V, S> Mapping for im::HashMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    type Key = K;
    type Value = V;

    fn lookup(&self, key: &K) -> Option<&V> {
        self.get(key)
    }

    fn assign(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    fn entries(&self) -> impl Iterator<Item = (&K, &V)> {
        self.iter()
    }
}

/// Truthiness used when `every`/`some` fall back to the identity predicate.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! impl_truthy_for_integers {
    ($($t:ty),*) => {
        $(impl Truthy for $t {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        })*
    };
}

impl_truthy_for_integers!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}
