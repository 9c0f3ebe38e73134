//! Combining and transforming sequences.
//!
//! [`Chain`] glues sequences end to end, [`MapErr`] and [`MapOutput`] rewrite
//! the error and final-value channels, and [`Nested`] is the nesting adapter:
//! it runs a whole inner sequence as a single step of an outer one.

use std::marker::PhantomData;

use crate::{run::run, sequence::Sequence, suspension::Suspension};

/// Runs the first sequence to completion, then feeds its final value to the
/// second as the next resumption value.
///
/// The first sequence is dropped once it finishes.
pub struct Chain<A, B> {
    first: Option<A>,
    second: B,
}

/// Chain two sequences end to end.
///
/// ```rust
/// use relay::prelude::*;
///
/// let pipeline = chain(
///     step(|x: i32| Ok::<_, String>(x + 1)),
///     step(|x: i32| Ok(x * 3)),
/// );
/// assert_eq!(run(pipeline, 4), Ok(15));
/// ```
pub fn chain<T, E, A, B>(first: A, second: B) -> Chain<A, B>
where
    A: Sequence<T, E, Output = T>,
    B: Sequence<T, E>,
{
    Chain {
        first: Some(first),
        second,
    }
}

impl<T, E, A, B> Sequence<T, E> for Chain<A, B>
where
    A: Sequence<T, E, Output = T>,
    B: Sequence<T, E>,
{
    type Output = B::Output;

    fn resume(&mut self, value: T) -> Suspension<Result<T, E>, Self::Output> {
        match self.first {
            Some(ref mut first) => match first.resume(value) {
                Suspension::Pending(effect) => Suspension::Pending(effect),
                Suspension::Done(out) => {
                    // first is finished; its final value resumes the second
                    self.first = None;
                    self.second.resume(out)
                }
            },
            None => self.second.resume(value),
        }
    }
}

/// Transforms the error payload of every pending effect.
///
/// `Ok` effects and the final value pass through unchanged, so mapping the
/// error channel never disturbs a succeeding pipeline.
pub struct MapErr<S, F, E> {
    seq: S,
    f: F,
    _marker: PhantomData<E>,
}

/// Create a sequence whose failures are rewritten by `f`.
///
/// ```rust
/// use relay::prelude::*;
///
/// let seq = map_err(
///     |e: &str| format!("mapped: {e}"),
///     step(|_: i32| Err::<i32, _>("fail")),
/// );
/// assert_eq!(run(seq, 0), Err("mapped: fail".to_string()));
/// ```
pub fn map_err<T, E, E2, S, F>(f: F, seq: S) -> MapErr<S, F, E>
where
    S: Sequence<T, E>,
    F: FnMut(E) -> E2,
{
    MapErr {
        seq,
        f,
        _marker: PhantomData,
    }
}

impl<T, E, E2, S, F> Sequence<T, E2> for MapErr<S, F, E>
where
    S: Sequence<T, E>,
    F: FnMut(E) -> E2,
{
    type Output = S::Output;

    fn resume(&mut self, value: T) -> Suspension<Result<T, E2>, Self::Output> {
        match self.seq.resume(value) {
            Suspension::Pending(effect) => Suspension::Pending(effect.map_err(&mut self.f)),
            Suspension::Done(out) => Suspension::Done(out),
        }
    }
}

/// Transforms the final value of a sequence.
///
/// Applied only when the sequence finishes, never to pending effects.
pub struct MapOutput<S, F> {
    seq: S,
    f: F,
}

/// Create a sequence whose final value is rewritten by `f`.
///
/// ```rust
/// use relay::prelude::*;
///
/// let seq = map_output(|out: i32| out.to_string(), step(|x: i32| Ok::<_, String>(x * 2)));
/// assert_eq!(run(seq, 21), Ok("21".to_string()));
/// ```
pub fn map_output<T, E, D2, S, F>(f: F, seq: S) -> MapOutput<S, F>
where
    S: Sequence<T, E>,
    F: FnMut(S::Output) -> D2,
{
    MapOutput { seq, f }
}

impl<T, E, D2, S, F> Sequence<T, E> for MapOutput<S, F>
where
    S: Sequence<T, E>,
    F: FnMut(S::Output) -> D2,
{
    type Output = D2;

    fn resume(&mut self, value: T) -> Suspension<Result<T, E>, D2> {
        match self.seq.resume(value) {
            Suspension::Pending(effect) => Suspension::Pending(effect),
            Suspension::Done(out) => Suspension::Done((self.f)(out)),
        }
    }
}

/// The nesting adapter: a whole inner sequence exposed as one step.
///
/// On the first resume the inner sequence is driven to completion by [`run`]
/// and its terminal `Result` becomes the single pending effect the outer
/// driver sees. The inner suspension points stay opaque: the outer sequence
/// observes one success value or one failure, exactly as if the inner steps
/// had been inlined.
pub struct Nested<S> {
    inner: Option<S>,
}

/// Wrap an inner sequence so it can be used as a step of an outer sequence.
///
/// ```rust
/// use relay::prelude::*;
///
/// let inner = step(|x: i32| if x > 0 { Ok(x) } else { Err("fail") });
/// let outer = nested(inner).map_err(|e| format!("mapped: {e}"));
/// assert_eq!(run(outer, -1), Err("mapped: fail".to_string()));
/// ```
pub fn nested<T, E, S>(inner: S) -> Nested<S>
where
    S: Sequence<T, E, Output = T>,
{
    Nested { inner: Some(inner) }
}

impl<T, E, S> Sequence<T, E> for Nested<S>
where
    S: Sequence<T, E, Output = T>,
{
    type Output = T;

    fn resume(&mut self, value: T) -> Suspension<Result<T, E>, T> {
        match self.inner.take() {
            Some(inner) => Suspension::Pending(run(inner, value)),
            None => Suspension::Done(value),
        }
    }
}
