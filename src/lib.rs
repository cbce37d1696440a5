//! Functional programming utilities over sequences and key-indexed mappings.
//!
//! The toolkit is organised the same way callers tend to reach for it:
//! - [`functional::collection`]: the `Collection` and `Mapping` traits and the `each` primitive
//! - [`functional::collection_ops`]: filter, map, reduce and friends built on `each`
//! - [`functional::object_merge`]: `extend` and `defaults`
//! - [`functional::decorators`]: `once` and `memoize`
//! - [`functional::timing`]: `delay` and `throttle` (requires the `timers` feature)
//! - [`functional::array_ops`]: slicing, shuffling, sorting and set algebra
//!
//! Most callers only need [`functional::prelude`].

pub mod error;
pub mod functional;
pub mod utils;

pub use error::{FpError, FpResult};
