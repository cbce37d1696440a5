//! Array Set and Shape Operations
//!
//! Slicing, shuffling, sorting, zipping, flattening and set algebra over ordered
//! sequences. Results are always freshly allocated; inputs passed by reference are
//! never modified.

use itertools::{EitherOrBoth, Itertools};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{FpError, FpResult};
use crate::functional::collection::{Collection, Mapping};
use crate::functional::collection_ops::{contains, every, filter, map, reduce, some};
use crate::functional::methods::Methods;

/// Returns the first element, or `None` for an empty sequence.
pub fn first<T: Clone>(sequence: &[T]) -> Option<T> {
    sequence.first().cloned()
}

/// Returns up to `n` leading elements.
pub fn first_n<T: Clone>(sequence: &[T], n: usize) -> Vec<T> {
    sequence[..n.min(sequence.len())].to_vec()
}

/// Returns the last element, or `None` for an empty sequence.
pub fn last<T: Clone>(sequence: &[T]) -> Option<T> {
    sequence.last().cloned()
}

/// Returns up to `n` trailing elements; `n` beyond the length yields everything.
pub fn last_n<T: Clone>(sequence: &[T], n: usize) -> Vec<T> {
    let n = n.min(sequence.len());
    sequence[sequence.len() - n..].to_vec()
}

/// Returns a uniformly shuffled copy of `sequence` using the thread-local RNG.
pub fn shuffle<T: Clone>(sequence: &[T]) -> Vec<T> {
    shuffle_with(sequence, &mut rand::thread_rng())
}

/// Returns a uniformly shuffled copy of `sequence` drawing from `rng`.
///
/// Passing a seeded RNG makes the order reproducible.
pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(sequence: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = sequence.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

/// Calls `function(element, &args)` for every element and collects the results.
///
/// `args` is handed over whole to each call.
pub fn invoke<C, A, R, F>(collection: &C, mut function: F, args: A) -> Vec<R>
where
    C: Collection + ?Sized,
    F: FnMut(&C::Item, &A) -> R,
{
    map(collection, |element| function(element, &args))
}

/// Calls the method `name` on every element and collects the results.
///
/// # Errors
///
/// Returns [`FpError::UnknownMethod`] if any element does not provide `name`.
///
/// # Examples
///
/// ```
/// let words = vec!["dog".to_string(), "cat".to_string()];
/// assert_eq!(invoke_named(&words, "to_uppercase", ())?, vec!["DOG", "CAT"]);
/// ```
pub fn invoke_named<C, A>(
    collection: &C,
    name: &str,
    args: A,
) -> FpResult<Vec<<C::Item as Methods<A>>::Output>>
where
    C: Collection + ?Sized,
    C::Item: Methods<A>,
{
    map(collection, |element| element.call_method(name, &args))
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| FpError::UnknownMethod(name.to_string()))
}

/// Numeric sort keys, compared by their `f64` value.
pub trait Numeric {
    fn as_f64(&self) -> f64;
}

macro_rules! impl_numeric {
    ($($t:ty),*) => {
        $(impl Numeric for $t {
            fn as_f64(&self) -> f64 {
                *self as f64
            }
        })*
    };
}

impl_numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl<T: Numeric + ?Sized> Numeric for &T {
    fn as_f64(&self) -> f64 {
        (**self).as_f64()
    }
}

fn sort_by_numeric_key<T>(mut keyed: Vec<(f64, T)>) -> Vec<T> {
    // sort_by is stable, so equal keys keep their input order
    keyed.sort_by(|(a, _), (b, _)| a.total_cmp(b));
    keyed.into_iter().map(|(_, item)| item).collect()
}

/// Returns the elements sorted ascending by `key`.
///
/// The sort is stable. NaN keys sort after every number.
pub fn sort_by<C, K, F>(collection: &C, mut key: F) -> Vec<C::Item>
where
    C: Collection + ?Sized,
    C::Item: Clone,
    K: Numeric,
    F: FnMut(&C::Item) -> K,
{
    sort_by_numeric_key(map(collection, |item| (key(item).as_f64(), item.clone())))
}

/// Returns mapping elements sorted ascending by their numeric property `key`.
///
/// Elements without the property sort last, in input order.
pub fn sort_by_property<C, M>(collection: &C, key: &M::Key) -> Vec<M>
where
    C: Collection<Item = M> + ?Sized,
    M: Mapping + Clone,
    M::Value: Numeric,
{
    sort_by_numeric_key(map(collection, |item| {
        let value = item.lookup(key).map_or(f64::NAN, Numeric::as_f64);
        (value, item.clone())
    }))
}

/// Index-aligns several sequences into rows.
///
/// There are as many rows as the longest input has elements; shorter inputs
/// contribute `None` once exhausted.
///
/// # Examples
///
/// ```
/// let rows = zip(&[&[1, 2][..], &[3][..]]);
/// assert_eq!(rows, vec![vec![Some(1), Some(3)], vec![Some(2), None]]);
/// ```
pub fn zip<T: Clone>(sequences: &[&[T]]) -> Vec<Vec<Option<T>>> {
    let longest = reduce(sequences, |longest, sequence| longest.max(sequence.len()), 0usize);

    (0..longest)
        .map(|index| map(sequences, |sequence| sequence.get(index).cloned()))
        .collect()
}

/// Index-aligns two sequences of different element types.
pub fn zip_pair<A: Clone, B: Clone>(left: &[A], right: &[B]) -> Vec<(Option<A>, Option<B>)> {
    left.iter()
        .zip_longest(right)
        .map(|pair| match pair {
            EitherOrBoth::Both(a, b) => (Some(a.clone()), Some(b.clone())),
            EitherOrBoth::Left(a) => (Some(a.clone()), None),
            EitherOrBoth::Right(b) => (None, Some(b.clone())),
        })
        .collect()
}

/// An arbitrarily nested sequence, as accepted by [`flatten`].
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<T> {
    Item(T),
    List(Vec<Nested<T>>),
}

impl<T> Drop for Nested<T> {
    fn drop(&mut self) {
        let Nested::List(items) = self else {
            return;
        };

        // Unlink children onto a heap stack so deep trees drop without recursion
        let mut stack = std::mem::take(items);
        while let Some(mut node) = stack.pop() {
            if let Nested::List(children) = &mut node {
                stack.append(children);
            }
        }
    }
}

impl<T> From<Vec<Nested<T>>> for Nested<T> {
    fn from(items: Vec<Nested<T>>) -> Self {
        Nested::List(items)
    }
}

/// Builds a `Vec<Nested<_>>` from bracketed literals.
///
/// ```
/// let nested = nested![1, [2, [3, [4]], 5]];
/// assert_eq!(flatten(&nested), vec![1, 2, 3, 4, 5]);
/// ```
#[macro_export]
macro_rules! nested {
    (@item [$($inner:tt)*]) => {
        $crate::functional::array_ops::Nested::List($crate::nested![$($inner)*])
    };
    (@item $value:expr) => {
        $crate::functional::array_ops::Nested::Item($value)
    };
    ($($item:tt),* $(,)?) => {
        vec![$($crate::nested!(@item $item)),*]
    };
}

/// Flattens nested sequences into one sequence, left to right, at any depth.
///
/// Uses an explicit stack so deeply nested input cannot overflow the call stack.
pub fn flatten<T: Clone>(nested: &[Nested<T>]) -> Vec<T> {
    let mut flat = Vec::new();
    let mut stack = vec![nested.iter()];

    while let Some(level) = stack.last_mut() {
        match level.next() {
            Some(Nested::Item(value)) => flat.push(value.clone()),
            Some(Nested::List(items)) => stack.push(items.iter()),
            None => {
                stack.pop();
            }
        }
    }

    flat
}

/// Elements of the first sequence that appear in every other sequence.
///
/// Order and duplicates follow the first sequence. With no sequences the result is
/// empty; with one it is a copy of that sequence.
///
/// # Examples
///
/// ```
/// assert_eq!(intersection(&[&[1, 2, 3][..], &[2, 3, 4][..]]), vec![2, 3]);
/// ```
pub fn intersection<T: Clone + PartialEq>(sequences: &[&[T]]) -> Vec<T> {
    let Some((head, rest)) = sequences.split_first() else {
        return Vec::new();
    };

    filter(*head, |item| every(rest, |other| contains(*other, item)))
}

/// Elements of `sequence` absent from every sequence in `others`.
///
/// `sequence` is consumed; the surviving elements are returned in their original
/// order.
pub fn difference<T: PartialEq>(mut sequence: Vec<T>, others: &[&[T]]) -> Vec<T> {
    sequence.retain(|item| !some(others, |other| contains(*other, item)));
    sequence
}
