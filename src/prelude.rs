//! Commonly used imports
//!
//! Use `use relay::prelude::*;` for quick access to the most common types and functions.

// Core types
pub use crate::{AsyncSequence, Effect, Sequence, Suspension};

// Most common constructors
pub use crate::build::{from_fn, step};
pub use crate::task::{from_fn_async, step_async};

// Composition
pub use crate::compose::{chain, nested};
pub use crate::task::{chain_async, nested_async};

// Transformations
pub use crate::compose::{map_err, map_output};
pub use crate::task::{into_async, map_err_async, map_output_async};

// Execution
pub use crate::run::{run, run_async};
