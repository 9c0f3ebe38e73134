//! Core trait for synchronous fallible sequences.
//!
//! A [`Sequence`] is a suspendable procedure: each call to [`resume`] feeds it
//! the unwrapped success value of the previous step and receives either the
//! next pending effect (a `Result`) or the sequence's final value. The driver
//! in [`crate::run`] owns all control flow: it unwraps `Ok` to keep the
//! sequence moving and aborts the whole run on the first `Err`.
//!
//! The error payload is opaque here. A sequence yields it, the driver detects
//! it by discriminant, and nothing in between interprets it.
//!
//! [`resume`]: Sequence::resume
//!
//! # Examples
//!
//! ```rust
//! use relay::prelude::*;
//!
//! let mut seq = step(|x: i32| if x > 0 { Ok(x * 2) } else { Err("non-positive") });
//! assert_eq!(seq.resume(5), Suspension::Pending(Ok(10)));
//! assert_eq!(seq.resume(10), Suspension::Done(10));
//! ```

use crate::{
    compose::{Chain, MapErr, MapOutput, Nested},
    suspension::Suspension,
    task::IntoAsync,
};

/// A suspendable procedure whose steps produce `Result<T, E>` effects.
///
/// `T` is the value threaded from step to step; `E` is the opaque error
/// payload carried by a failing effect. `Output` is the final value the
/// sequence finishes with, wrapped in `Ok` by the driver.
///
/// ```rust
/// use relay::prelude::*;
///
/// let pipeline = step(|x: i32| Ok::<_, String>(x + 1)).chain(step(|x: i32| Ok(x * 3)));
/// assert_eq!(run(pipeline, 4), Ok(15));
/// ```
pub trait Sequence<T, E> {
    /// Final value produced when the sequence finishes.
    type Output;

    /// Resume with the unwrapped value of the previous effect, returning the
    /// next pending effect or the final value.
    fn resume(&mut self, value: T) -> Suspension<Result<T, E>, Self::Output>;

    /// Run this sequence to completion, then feed its final value into `next`
    /// as the following resumption value.
    fn chain<R>(self, next: R) -> Chain<Self, R>
    where
        Self: Sized + Sequence<T, E, Output = T>,
        R: Sequence<T, E>,
    {
        crate::compose::chain(self, next)
    }

    /// Transform the error payload of every pending effect. Successes and the
    /// final value pass through untouched.
    fn map_err<E2, F>(self, f: F) -> MapErr<Self, F, E>
    where
        Self: Sized,
        F: FnMut(E) -> E2,
    {
        crate::compose::map_err(f, self)
    }

    /// Transform the final value when the sequence finishes.
    fn map_output<D2, F>(self, f: F) -> MapOutput<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Output) -> D2,
    {
        crate::compose::map_output(f, self)
    }

    /// Treat this whole sequence as a single step of an outer sequence.
    ///
    /// The inner sequence is driven to completion by its own interpreter and
    /// only its terminal `Result` is visible to the outer driver.
    fn nested(self) -> Nested<Self>
    where
        Self: Sized + Sequence<T, E, Output = T>,
    {
        crate::compose::nested(self)
    }

    /// Lift into an [`AsyncSequence`](crate::task::AsyncSequence) whose
    /// effects are all already settled.
    fn into_async(self) -> IntoAsync<Self>
    where
        Self: Sized,
    {
        crate::task::into_async(self)
    }

    fn boxed(self) -> Box<dyn Sequence<T, E, Output = Self::Output>>
    where
        Self: Sized + 'static,
    {
        Box::new(self)
    }
}

impl<T, E, S> Sequence<T, E> for Box<S>
where
    S: Sequence<T, E> + ?Sized,
{
    type Output = S::Output;

    fn resume(&mut self, value: T) -> Suspension<Result<T, E>, Self::Output> {
        (**self).resume(value)
    }
}

impl<T, E, S> Sequence<T, E> for &'_ mut S
where
    S: Sequence<T, E> + ?Sized,
{
    type Output = S::Output;

    fn resume(&mut self, value: T) -> Suspension<Result<T, E>, Self::Output> {
        (**self).resume(value)
    }
}

impl<T, E, L, R> Sequence<T, E> for either::Either<L, R>
where
    L: Sequence<T, E>,
    R: Sequence<T, E, Output = L::Output>,
{
    type Output = L::Output;

    fn resume(&mut self, value: T) -> Suspension<Result<T, E>, Self::Output> {
        match self {
            either::Either::Left(l) => l.resume(value),
            either::Either::Right(r) => r.resume(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::step;
    use crate::run::run;

    #[test]
    fn test_chain_feeds_first_output_into_second() {
        let mut seq = step(|x: u32| Ok::<_, &str>(x + 1)).chain(step(|x: u32| Ok(x * 2)));

        assert_eq!(seq.resume(3), Suspension::Pending(Ok(4)));
        // first step exhausted: its final value 4 becomes the second step's
        // resumption value within the same chain
        assert_eq!(seq.resume(4), Suspension::Pending(Ok(8)));
        assert_eq!(seq.resume(8), Suspension::Done(8));
    }

    #[test]
    fn test_map_err_rewrites_only_failures() {
        let seq = step(|x: u32| if x == 0 { Err("zero") } else { Ok(x) })
            .map_err(|e| format!("checked: {e}"));

        assert_eq!(run(seq, 7), Ok(7));

        let seq = step(|x: u32| if x == 0 { Err("zero") } else { Ok(x) })
            .map_err(|e| format!("checked: {e}"));
        assert_eq!(run(seq, 0), Err("checked: zero".to_string()));
    }

    #[test]
    fn test_map_output_transforms_final_value() {
        let seq = step(|x: u32| Ok::<_, &str>(x * 2)).map_output(|out| format!("out={out}"));
        assert_eq!(run(seq, 5), Ok("out=10".to_string()));
    }

    #[test]
    fn test_boxed_sequence_resumes_through_the_box() {
        let mut boxed: Box<dyn Sequence<u32, &str, Output = u32>> =
            step(|x: u32| Ok(x + 10)).boxed();

        assert_eq!(boxed.resume(1), Suspension::Pending(Ok(11)));
        assert_eq!(boxed.resume(11), Suspension::Done(11));
    }

    #[test]
    fn test_mut_reference_is_a_sequence() {
        let mut seq = step(|x: u32| Ok::<_, &str>(x + 1));
        let by_ref = &mut seq;
        assert_eq!(run(by_ref, 1), Ok(2));
    }

    #[test]
    fn test_either_branches_select_a_sequence() {
        let validate = |limit: u32| {
            move |x: u32| {
                if x > limit {
                    Err("over limit")
                } else {
                    Ok(x)
                }
            }
        };

        let pick = |strict: bool| {
            if strict {
                either::Either::Left(step(validate(10)))
            } else {
                either::Either::Right(step(validate(100)))
            }
        };

        assert_eq!(run(pick(true), 50), Err("over limit"));
        assert_eq!(run(pick(false), 50), Ok(50));
    }
}
