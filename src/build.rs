//! Building sequences from plain functions.
//!
//! The entry points here lift ordinary fallible functions into sequences the
//! drivers in [`crate::run`] understand.

use crate::{sequence::Sequence, suspension::Suspension};

/// A single fallible step used as a sequence.
///
/// The first resume applies the function and yields its `Result` as the
/// pending effect; the following resume finishes with whatever value the
/// driver resumed with (the unwrapped success of that effect).
pub struct Step<F>(Option<F>);

/// Lift a fallible function into a single-step sequence.
///
/// ```rust
/// use relay::prelude::*;
///
/// let validate = step(|x: i32| if x > 0 { Ok(x) } else { Err("non-positive") });
/// assert_eq!(run(validate, 3), Ok(3));
///
/// let validate = step(|x: i32| if x > 0 { Ok(x) } else { Err("non-positive") });
/// assert_eq!(run(validate, -1), Err("non-positive"));
/// ```
pub fn step<F>(f: F) -> Step<F> {
    Step(Some(f))
}

impl<T, E, F> Sequence<T, E> for Step<F>
where
    F: FnOnce(T) -> Result<T, E>,
{
    type Output = T;

    fn resume(&mut self, value: T) -> Suspension<Result<T, E>, T> {
        match self.0.take() {
            Some(f) => Suspension::Pending(f(value)),
            None => Suspension::Done(value),
        }
    }
}

/// A sequence produced directly from a closure over [`Suspension`] values.
///
/// Escape hatch for sequences whose suspension pattern does not fit the
/// builders or combinators.
pub struct FromFn<F>(F);

/// Create a sequence from a closure.
///
/// ```rust
/// use relay::prelude::*;
///
/// let mut remaining = 2;
/// let countdown = from_fn(move |x: i32| {
///     if remaining == 0 {
///         return Suspension::Done(x);
///     }
///     remaining -= 1;
///     Suspension::Pending(Ok::<_, String>(x + 1))
/// });
/// assert_eq!(run(countdown, 0), Ok(2));
/// ```
pub fn from_fn<F>(f: F) -> FromFn<F> {
    FromFn(f)
}

impl<T, E, D, F> Sequence<T, E> for FromFn<F>
where
    F: FnMut(T) -> Suspension<Result<T, E>, D>,
{
    type Output = D;

    fn resume(&mut self, value: T) -> Suspension<Result<T, E>, D> {
        (self.0)(value)
    }
}
