//! Derived Collection Operations
//!
//! Filtering, mapping and folding over any [`Collection`]. Nothing in this module
//! inspects the shape of its input: everything goes through [`each`], [`reduce`] or
//! another operation defined here.

use crate::error::{FpError, FpResult};
use crate::functional::collection::{each, Collection, Mapping, Truthy};

/// Returns its argument unchanged.
///
/// Serves as the default iterator wherever an operation accepts an optional mapper.
pub fn identity<T>(value: T) -> T {
    value
}

/// Returns the position of the first element equal to `target`, or `None`.
///
/// # Examples
///
/// ```
/// assert_eq!(index_of(&[4, 5, 6], &5), Some(1));
/// assert_eq!(index_of(&[4, 5, 6], &9), None);
/// ```
pub fn index_of<T: PartialEq>(sequence: &[T], target: &T) -> Option<usize> {
    let mut position = None;

    each(sequence, |item, index, _| {
        if position.is_none() && item == target {
            position = Some(index);
        }
    });

    position
}

/// Collects the elements for which `predicate` holds, in iteration order.
pub fn filter<C, P>(collection: &C, mut predicate: P) -> Vec<C::Item>
where
    C: Collection + ?Sized,
    C::Item: Clone,
    P: FnMut(&C::Item) -> bool,
{
    let mut kept = Vec::new();

    each(collection, |item, _, _| {
        if predicate(item) {
            kept.push(item.clone());
        }
    });

    kept
}

/// Collects the elements for which `predicate` does not hold.
///
/// Defined as [`filter`] with the predicate negated, so the two always partition
/// their input.
pub fn reject<C, P>(collection: &C, mut predicate: P) -> Vec<C::Item>
where
    C: Collection + ?Sized,
    C::Item: Clone,
    P: FnMut(&C::Item) -> bool,
{
    filter(collection, |item| !predicate(item))
}

/// Removes repeated elements, keeping the first occurrence of each.
///
/// # Examples
///
/// ```
/// assert_eq!(uniq(&[1, 2, 1, 3, 2]), vec![1, 2, 3]);
/// ```
pub fn uniq<C>(collection: &C) -> Vec<C::Item>
where
    C: Collection + ?Sized,
    C::Item: Clone + PartialEq,
{
    uniq_by(collection, |item| identity(item.clone()))
}

/// Removes elements whose `mapper` key equals the key of an earlier element.
///
/// Keys are compared with `==`; no hashing is required of them. The surviving
/// elements keep their original order.
pub fn uniq_by<C, K, M>(collection: &C, mut mapper: M) -> Vec<C::Item>
where
    C: Collection + ?Sized,
    C::Item: Clone,
    K: PartialEq,
    M: FnMut(&C::Item) -> K,
{
    let mut seen: Vec<K> = Vec::new();
    let mut unique = Vec::new();

    each(collection, |item, _, _| {
        let key = mapper(item);
        if !contains(seen.as_slice(), &key) {
            seen.push(key);
            unique.push(item.clone());
        }
    });

    unique
}

/// Applies `iterator` to every element and collects the results in order.
pub fn map<C, U, F>(collection: &C, mut iterator: F) -> Vec<U>
where
    C: Collection + ?Sized,
    F: FnMut(&C::Item) -> U,
{
    let mut mapped = Vec::new();
    each(collection, |item, _, _| mapped.push(iterator(item)));
    mapped
}

/// Extracts the property `key` from every element.
///
/// Elements lacking the property produce `None` in the corresponding slot.
///
/// # Examples
///
/// ```
/// let people = vec![
///     HashMap::from([("name", "moe"), ("age", "40")]),
///     HashMap::from([("name", "curly")]),
/// ];
/// assert_eq!(pluck(&people, &"age"), vec![Some("40"), None]);
/// ```
pub fn pluck<C, M>(collection: &C, key: &M::Key) -> Vec<Option<M::Value>>
where
    C: Collection<Item = M> + ?Sized,
    M: Mapping,
    M::Value: Clone,
{
    map(collection, |item| item.lookup(key).cloned())
}

/// Folds the collection left to right, starting from `initial`.
///
/// # Examples
///
/// ```
/// assert_eq!(reduce(&[1, 2, 3], |total, n| total + n, 0), 6);
/// ```
pub fn reduce<C, A, F>(collection: &C, iterator: F, initial: A) -> A
where
    C: Collection + ?Sized,
    F: FnMut(A, &C::Item) -> A,
{
    let mut items = Vec::new();
    each(collection, |item, _, _| items.push(item));

    items.into_iter().fold(initial, iterator)
}

/// Folds the collection using its first element as the seed.
///
/// The seed is not passed to `iterator`; folding starts at the second element. The
/// input is left untouched.
///
/// # Errors
///
/// Returns [`FpError::EmptyCollection`] when there is no element to seed from.
///
/// # Examples
///
/// ```
/// assert_eq!(reduce_seedless(&[5], |total, n| total + n * n)?, 5);
/// ```
pub fn reduce_seedless<C, F>(collection: &C, mut iterator: F) -> FpResult<C::Item>
where
    C: Collection + ?Sized,
    C::Item: Clone,
    F: FnMut(C::Item, &C::Item) -> C::Item,
{
    let mut accumulator: Option<C::Item> = None;

    each(collection, |item, _, _| {
        accumulator = Some(match accumulator.take() {
            Some(current) => iterator(current, item),
            None => item.clone(),
        });
    });

    accumulator.ok_or(FpError::EmptyCollection {
        operation: "reduce_seedless",
    })
}

/// Returns `true` if any element equals `target`.
///
/// Once a match is found the remaining elements are skipped without comparison.
pub fn contains<C>(collection: &C, target: &C::Item) -> bool
where
    C: Collection + ?Sized,
    C::Item: PartialEq,
{
    reduce(collection, |found, item| found || item == target, false)
}

/// Returns `true` if every element satisfies `predicate`. Empty collections pass.
pub fn every<C, P>(collection: &C, mut predicate: P) -> bool
where
    C: Collection + ?Sized,
    P: FnMut(&C::Item) -> bool,
{
    reduce(collection, |all, item| all && predicate(item), true)
}

/// [`every`] with the identity predicate: every element must be truthy.
pub fn every_truthy<C>(collection: &C) -> bool
where
    C: Collection + ?Sized,
    C::Item: Truthy,
{
    every(collection, |item| identity(item).is_truthy())
}

/// Returns `true` if at least one element satisfies `predicate`. Empty collections fail.
///
/// Written as `!every(!predicate)` rather than as a separate scan.
pub fn some<C, P>(collection: &C, mut predicate: P) -> bool
where
    C: Collection + ?Sized,
    P: FnMut(&C::Item) -> bool,
{
    !every(collection, |item| !predicate(item))
}

/// [`some`] with the identity predicate: at least one element must be truthy.
pub fn some_truthy<C>(collection: &C) -> bool
where
    C: Collection + ?Sized,
    C::Item: Truthy,
{
    some(collection, |item| identity(item).is_truthy())
}
