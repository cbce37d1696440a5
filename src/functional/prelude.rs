//! Prelude for the functional toolkit
//!
//! This module re-exports the traits and operations most callers need so that a
//! single `use fpkit::functional::prelude::*;` brings the whole toolkit into scope.

pub use crate::error::{FpError, FpResult};
pub use crate::functional::array_ops::{
    difference, first, first_n, flatten, intersection, invoke, invoke_named, last, last_n,
    shuffle, shuffle_with, sort_by, sort_by_property, zip, zip_pair, Nested, Numeric,
};
pub use crate::functional::collection::{each, Collection, Mapping, Truthy};
pub use crate::functional::collection_ops::{
    contains, every, every_truthy, filter, identity, index_of, map, pluck, reduce,
    reduce_seedless, reject, some, some_truthy, uniq, uniq_by,
};
pub use crate::functional::decorators::{memoize, memoize_by, once, Memoize, Once};
pub use crate::functional::methods::Methods;
pub use crate::functional::object_merge::{defaults, extend};
#[cfg(feature = "timers")]
pub use crate::functional::timing::{delay, throttle, throttle_with, Throttle, TimerConfig};
pub use crate::nested;
