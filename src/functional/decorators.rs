//! Function Decorators
//!
//! Wrappers that change how a function is invoked while delegating the actual work to
//! it. Each wrapper owns its state; two decorated instances never share a cache.
//!
//! - [`once`]: runs the wrapped function on the first call only
//! - [`memoize`]: caches results per argument value
//! - [`memoize_by`]: caches results under a caller-supplied key
//!
//! The timer based decorators live in [`crate::functional::timing`].

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// A function that runs at most once; later calls replay the first result.
pub struct Once<A, R, F> {
    func: F,
    result: Option<R>,
    _args: PhantomData<fn(A)>,
}

impl<A, R, F> Once<A, R, F>
where
    F: FnMut(A) -> R,
    R: Clone,
{
    /// Wraps `func` without invoking it.
    pub fn new(func: F) -> Self {
        Self {
            func,
            result: None,
            _args: PhantomData,
        }
    }

    /// Invokes the wrapped function on the first call and returns its result.
    ///
    /// Every later call returns a clone of that first result; `args` is then ignored.
    pub fn call(&mut self, args: A) -> R {
        let func = &mut self.func;
        self.result
            .get_or_insert_with(|| {
                log::debug!("once: running wrapped function for the first time");
                func(args)
            })
            .clone()
    }

    /// Returns `true` once the wrapped function has run.
    pub fn has_run(&self) -> bool {
        self.result.is_some()
    }

    /// Converts the wrapper into a plain closure.
    pub fn into_fn_mut(mut self) -> impl FnMut(A) -> R {
        move |args| self.call(args)
    }
}

impl<A, R: fmt::Debug, F> fmt::Debug for Once<A, R, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Once").field("result", &self.result).finish()
    }
}

/// Wraps `func` so that it runs only on the first call.
///
/// # Examples
///
/// ```
/// let mut init = once(|name: &str| format!("hello {name}"));
/// assert_eq!(init.call("ada"), "hello ada");
/// assert_eq!(init.call("bob"), "hello ada");
/// ```
pub fn once<A, R, F>(func: F) -> Once<A, R, F>
where
    F: FnMut(A) -> R,
    R: Clone,
{
    Once::new(func)
}

/// A function whose results are cached under a key derived from its argument.
///
/// Multi-argument functions take a tuple. The key is produced by the resolver; for
/// [`memoize`] it is the argument itself.
pub struct Memoize<A, K, R, F, G> {
    func: F,
    resolver: G,
    cache: HashMap<K, R>,
    _args: PhantomData<fn(A)>,
}

impl<A, K, R, F, G> Memoize<A, K, R, F, G>
where
    K: Hash + Eq,
    R: Clone,
    F: FnMut(A) -> R,
    G: Fn(&A) -> K,
{
    /// Wraps `func`, caching its results under `resolver(&args)`.
    pub fn with_resolver(func: F, resolver: G) -> Self {
        Self {
            func,
            resolver,
            cache: HashMap::new(),
            _args: PhantomData,
        }
    }

    /// Returns the cached result for `args`, computing and storing it on a miss.
    pub fn call(&mut self, args: A) -> R {
        let key = (self.resolver)(&args);
        if let Some(hit) = self.cache.get(&key) {
            log::trace!("memoize: cache hit ({} entries)", self.cache.len());
            return hit.clone();
        }

        let result = (self.func)(args);
        self.cache.insert(key, result.clone());
        log::trace!("memoize: cache miss, stored entry {}", self.cache.len());
        result
    }

    /// Returns `true` if a result for `args` is already cached.
    pub fn is_cached(&self, args: &A) -> bool {
        self.cache.contains_key(&(self.resolver)(args))
    }

    /// Number of cached results.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drops every cached result.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Converts the wrapper into a plain closure.
    pub fn into_fn_mut(mut self) -> impl FnMut(A) -> R {
        move |args| self.call(args)
    }
}

impl<A, K, R, F, G> fmt::Debug for Memoize<A, K, R, F, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoize")
            .field("entries", &self.cache.len())
            .finish()
    }
}

/// Caches `func`'s results keyed by the argument value.
///
/// Intended for single-argument functions over primitive-like values; pass a tuple
/// when more than one argument is needed. The argument itself becomes the key, so
/// distinct arguments never share an entry.
///
/// # Examples
///
/// ```
/// let mut square = memoize(|n: u64| n * n);
/// assert_eq!(square.call(4), 16);
/// assert!(square.is_cached(&4));
/// ```
pub fn memoize<A, R, F>(func: F) -> Memoize<A, A, R, F, fn(&A) -> A>
where
    A: Clone + Hash + Eq,
    R: Clone,
    F: FnMut(A) -> R,
{
    Memoize::with_resolver(func, A::clone as fn(&A) -> A)
}

/// Caches `func`'s results under `resolver(&args)`.
///
/// With a stringifying resolver such as `|a| a.to_string()` this gives the classic
/// string-keyed memo table. Arguments that stringify identically then share a cache
/// entry: the second one gets the first one's result. That collision is part of the
/// contract, not something this wrapper tries to detect.
pub fn memoize_by<A, K, R, F, G>(func: F, resolver: G) -> Memoize<A, K, R, F, G>
where
    K: Hash + Eq,
    R: Clone,
    F: FnMut(A) -> R,
    G: Fn(&A) -> K,
{
    Memoize::with_resolver(func, resolver)
}
