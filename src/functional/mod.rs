//! Functional programming toolkit: collections, decorators and array algebra.

pub mod array_ops;
pub mod collection;
pub mod collection_ops;
pub mod decorators;
pub mod methods;
pub mod object_merge;
pub mod prelude;
#[cfg(feature = "timers")]
pub mod timing;
