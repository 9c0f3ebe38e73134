//! Asynchronous sequences.
//!
//! The asynchronous dual of [`Sequence`](crate::sequence::Sequence): resuming
//! is still a synchronous call, but the pending effect it yields is an
//! [`Effect`] that may need awaiting. The driver
//! ([`run_async`](crate::run::run_async)) settles each effect in order, so
//! step *n + 1* never starts before step *n*'s result has been produced and
//! unwrapped.
//!
//! A synchronous step participates through [`Effect::Ready`] or by lifting a
//! whole synchronous sequence with [`into_async`]. The reverse direction does
//! not exist: a synchronous sequence cannot yield an [`Effect`], so an
//! asynchronous step inside the synchronous driver is unrepresentable.

use std::future::Future;
use std::marker::PhantomData;

use crate::{effect::Effect, run::run_async, sequence::Sequence, suspension::Suspension};

/// A suspendable procedure whose steps produce [`Effect`]s.
///
/// The trait is object-safe: the future lives inside the yielded effect, not
/// in the trait's return type.
///
/// ```rust
/// use relay::prelude::*;
/// use futures::executor::block_on;
///
/// let seq = step_async(|x: i32| async move {
///     if x > 0 { Ok(x * 2) } else { Err("non-positive") }
/// });
/// assert_eq!(block_on(run_async(seq, 5)), Ok(10));
/// ```
pub trait AsyncSequence<T, E> {
    /// Final value produced when the sequence finishes.
    type Output;

    /// Resume with the unwrapped value of the previous effect, returning the
    /// next pending effect or the final value.
    fn resume(&mut self, value: T) -> Suspension<Effect<T, E>, Self::Output>;

    /// Run this sequence to completion, then feed its final value into `next`
    /// as the following resumption value.
    fn chain<R>(self, next: R) -> AsyncChain<Self, R>
    where
        Self: Sized + AsyncSequence<T, E, Output = T>,
        R: AsyncSequence<T, E>,
    {
        chain_async(self, next)
    }

    /// Transform the error payload of every pending effect, settled or not.
    fn map_err<E2, F>(self, f: F) -> AsyncMapErr<Self, F, E>
    where
        Self: Sized,
        F: FnMut(E) -> E2 + Clone + Send + 'static,
    {
        map_err_async(f, self)
    }

    /// Transform the final value when the sequence finishes.
    fn map_output<D2, F>(self, f: F) -> AsyncMapOutput<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Output) -> D2,
    {
        map_output_async(f, self)
    }

    /// Treat this whole sequence as a single deferred step of an outer
    /// sequence.
    fn nested(self) -> AsyncNested<Self>
    where
        Self: Sized + AsyncSequence<T, E, Output = T>,
    {
        nested_async(self)
    }

    fn boxed(self) -> Box<dyn AsyncSequence<T, E, Output = Self::Output> + Send>
    where
        Self: Sized + Send + 'static,
    {
        Box::new(self)
    }
}

impl<T, E, S> AsyncSequence<T, E> for Box<S>
where
    S: AsyncSequence<T, E> + ?Sized,
{
    type Output = S::Output;

    fn resume(&mut self, value: T) -> Suspension<Effect<T, E>, Self::Output> {
        (**self).resume(value)
    }
}

impl<T, E, S> AsyncSequence<T, E> for &'_ mut S
where
    S: AsyncSequence<T, E> + ?Sized,
{
    type Output = S::Output;

    fn resume(&mut self, value: T) -> Suspension<Effect<T, E>, Self::Output> {
        (**self).resume(value)
    }
}

impl<T, E, L, R> AsyncSequence<T, E> for either::Either<L, R>
where
    L: AsyncSequence<T, E>,
    R: AsyncSequence<T, E, Output = L::Output>,
{
    type Output = L::Output;

    fn resume(&mut self, value: T) -> Suspension<Effect<T, E>, Self::Output> {
        match self {
            either::Either::Left(l) => l.resume(value),
            either::Either::Right(r) => r.resume(value),
        }
    }
}

/// A single asynchronous step used as a sequence.
///
/// The first resume calls the function and yields its future as a deferred
/// effect; the following resume finishes with the value the driver resumed
/// with.
pub struct AsyncStep<F>(Option<F>);

/// Lift an asynchronous fallible function into a single-step sequence.
///
/// ```rust
/// use relay::prelude::*;
/// use futures::executor::block_on;
///
/// let lookup = step_async(|name: String| async move {
///     if name.is_empty() { Err("empty name") } else { Ok(name.to_uppercase()) }
/// });
/// assert_eq!(block_on(run_async(lookup, "ada".to_string())), Ok("ADA".to_string()));
/// ```
pub fn step_async<F>(f: F) -> AsyncStep<F> {
    AsyncStep(Some(f))
}

impl<T, E, F, Fut> AsyncSequence<T, E> for AsyncStep<F>
where
    F: FnOnce(T) -> Fut,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    type Output = T;

    fn resume(&mut self, value: T) -> Suspension<Effect<T, E>, T> {
        match self.0.take() {
            Some(f) => Suspension::Pending(Effect::deferred(f(value))),
            None => Suspension::Done(value),
        }
    }
}

/// An asynchronous sequence produced directly from a closure over
/// [`Suspension`] values.
pub struct AsyncFromFn<F>(F);

/// Create an asynchronous sequence from a closure.
///
/// The closure decides per resume whether to hand back a ready or deferred
/// effect, or to finish.
pub fn from_fn_async<F>(f: F) -> AsyncFromFn<F> {
    AsyncFromFn(f)
}

impl<T, E, D, F> AsyncSequence<T, E> for AsyncFromFn<F>
where
    F: FnMut(T) -> Suspension<Effect<T, E>, D>,
{
    type Output = D;

    fn resume(&mut self, value: T) -> Suspension<Effect<T, E>, D> {
        (self.0)(value)
    }
}

/// A synchronous sequence lifted into an asynchronous one.
///
/// Every effect the inner sequence yields is already settled, so it is
/// wrapped as [`Effect::Ready`]. Driving the result with
/// [`run_async`](crate::run::run_async) produces the same `Result` as driving
/// the inner sequence with [`run`](crate::run::run).
pub struct IntoAsync<S>(S);

/// Lift a synchronous sequence into an asynchronous one.
pub fn into_async<S>(seq: S) -> IntoAsync<S> {
    IntoAsync(seq)
}

impl<T, E, S> AsyncSequence<T, E> for IntoAsync<S>
where
    S: Sequence<T, E>,
{
    type Output = S::Output;

    fn resume(&mut self, value: T) -> Suspension<Effect<T, E>, Self::Output> {
        self.0.resume(value).map_pending(Effect::Ready)
    }
}

/// Runs the first asynchronous sequence to completion, then feeds its final
/// value to the second as the next resumption value.
pub struct AsyncChain<A, B> {
    first: Option<A>,
    second: B,
}

/// Chain two asynchronous sequences end to end.
pub fn chain_async<T, E, A, B>(first: A, second: B) -> AsyncChain<A, B>
where
    A: AsyncSequence<T, E, Output = T>,
    B: AsyncSequence<T, E>,
{
    AsyncChain {
        first: Some(first),
        second,
    }
}

impl<T, E, A, B> AsyncSequence<T, E> for AsyncChain<A, B>
where
    A: AsyncSequence<T, E, Output = T>,
    B: AsyncSequence<T, E>,
{
    type Output = B::Output;

    fn resume(&mut self, value: T) -> Suspension<Effect<T, E>, Self::Output> {
        match self.first {
            Some(ref mut first) => match first.resume(value) {
                Suspension::Pending(effect) => Suspension::Pending(effect),
                Suspension::Done(out) => {
                    self.first = None;
                    self.second.resume(out)
                }
            },
            None => self.second.resume(value),
        }
    }
}

/// Transforms the error payload of every pending effect of an asynchronous
/// sequence.
///
/// The mapping function is cloned into each deferred effect so it can run
/// after the future resolves.
pub struct AsyncMapErr<S, F, E> {
    seq: S,
    f: F,
    _marker: PhantomData<E>,
}

/// Create an asynchronous sequence whose failures are rewritten by `f`.
pub fn map_err_async<T, E, E2, S, F>(f: F, seq: S) -> AsyncMapErr<S, F, E>
where
    S: AsyncSequence<T, E>,
    F: FnMut(E) -> E2 + Clone + Send + 'static,
{
    AsyncMapErr {
        seq,
        f,
        _marker: PhantomData,
    }
}

impl<T, E, E2, S, F> AsyncSequence<T, E2> for AsyncMapErr<S, F, E>
where
    S: AsyncSequence<T, E>,
    F: FnMut(E) -> E2 + Clone + Send + 'static,
    T: 'static,
    E: 'static,
    E2: 'static,
{
    type Output = S::Output;

    fn resume(&mut self, value: T) -> Suspension<Effect<T, E2>, Self::Output> {
        match self.seq.resume(value) {
            Suspension::Pending(effect) => Suspension::Pending(effect.map_err(self.f.clone())),
            Suspension::Done(out) => Suspension::Done(out),
        }
    }
}

/// Transforms the final value of an asynchronous sequence.
pub struct AsyncMapOutput<S, F> {
    seq: S,
    f: F,
}

/// Create an asynchronous sequence whose final value is rewritten by `f`.
pub fn map_output_async<T, E, D2, S, F>(f: F, seq: S) -> AsyncMapOutput<S, F>
where
    S: AsyncSequence<T, E>,
    F: FnMut(S::Output) -> D2,
{
    AsyncMapOutput { seq, f }
}

impl<T, E, D2, S, F> AsyncSequence<T, E> for AsyncMapOutput<S, F>
where
    S: AsyncSequence<T, E>,
    F: FnMut(S::Output) -> D2,
{
    type Output = D2;

    fn resume(&mut self, value: T) -> Suspension<Effect<T, E>, D2> {
        match self.seq.resume(value) {
            Suspension::Pending(effect) => Suspension::Pending(effect),
            Suspension::Done(out) => Suspension::Done((self.f)(out)),
        }
    }
}

/// The asynchronous nesting adapter.
///
/// On the first resume the inner sequence is handed to
/// [`run_async`](crate::run::run_async) and the whole drive becomes one
/// deferred effect of the outer sequence. The outer driver awaits it like any
/// other step; the inner suspension points stay opaque.
pub struct AsyncNested<S> {
    inner: Option<S>,
}

/// Wrap an inner asynchronous sequence so it can be used as a step of an
/// outer one.
pub fn nested_async<T, E, S>(inner: S) -> AsyncNested<S>
where
    S: AsyncSequence<T, E, Output = T>,
{
    AsyncNested { inner: Some(inner) }
}

impl<T, E, S> AsyncSequence<T, E> for AsyncNested<S>
where
    S: AsyncSequence<T, E, Output = T> + Send + 'static,
    T: Send + 'static,
    E: Send + 'static,
{
    type Output = T;

    fn resume(&mut self, value: T) -> Suspension<Effect<T, E>, T> {
        match self.inner.take() {
            Some(inner) => Suspension::Pending(Effect::deferred(run_async(inner, value))),
            None => Suspension::Done(value),
        }
    }
}
