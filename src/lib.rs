//! # Relay: Suspendable Fallible Sequences
//!
//! Build straight-line pipelines of fallible steps that suspend between
//! steps and short-circuit on the first error.
//!
//! ## Core Traits
//!
//! - **[`Sequence<T, E>`]**: Suspendable procedures whose steps yield `Result<T, E>`
//! - **[`AsyncSequence<T, E>`]**: The asynchronous dual, whose steps yield [`Effect`]s
//!
//! ## Key Features
//!
//! - **Composable**: Chain steps together with `.chain()`
//! - **Transformable**: Use `.map_err()`, `.map_output()`, `.nested()`
//! - **Async Support**: Both sync and async execution with `run()` and `run_async()`
//!
//! ## Example
//!
//! ```
//! use relay::prelude::*;
//!
//! // Each step receives the previous step's unwrapped value.
//! let pipeline = step(|x: i32| if x > 0 { Ok(x * 2) } else { Err("non-positive") })
//!     .chain(step(|x| Ok(x + 1)));
//!
//! assert_eq!(run(pipeline, 10), Ok(21));
//! assert_eq!(run(step(|x: i32| if x > 0 { Ok(x) } else { Err("non-positive") }), -1),
//!            Err("non-positive"));
//! ```
//!
//! ## Common Functions
//!
//! **Building Sequences:**
//! - [`step(f)`](build::step) - A single fallible step
//! - [`step_async(f)`](task::step_async) - A single asynchronous fallible step
//! - [`chain(a, b)`](compose::chain) - Run sequence `a` to completion, then run sequence `b`
//! - [`nested(s)`](compose::nested) - Use a whole sequence as one step of an outer sequence
//!
//! **Execution:**
//! - [`run(seq, input)`](run::run) - Drive a sequence, stopping at the first error
//! - [`run_async(seq, input)`](run::run_async) - Drive an asynchronous sequence

pub mod build;
pub mod compose;
pub mod effect;
pub mod prelude;
pub mod run;
pub mod sequence;
pub mod suspension;
pub mod task;

pub use effect::Effect;
pub use run::{run, run_async};
pub use sequence::Sequence;
pub use suspension::Suspension;
pub use task::AsyncSequence;
