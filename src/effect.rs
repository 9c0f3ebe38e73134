//! Pending effects for asynchronous sequences.
//!
//! An asynchronous sequence does not yield a bare `Result`: the value at a
//! suspension point may still be in flight. [`Effect`] captures both cases so
//! a single driver can settle either one before inspecting the tag.

use std::future::Future;

use futures::future::BoxFuture;

/// A fallible outcome that may or may not have settled yet.
///
/// `Ready` carries a synchronous step's already-computed `Result` (this is
/// how a synchronous step participates in an asynchronous sequence).
/// `Deferred` carries a boxed future of one.
pub enum Effect<T, E> {
    /// The effect settled synchronously.
    Ready(Result<T, E>),
    /// The effect is still in flight.
    Deferred(BoxFuture<'static, Result<T, E>>),
}

impl<T, E> Effect<T, E> {
    /// An already-settled effect.
    pub fn ready(result: Result<T, E>) -> Self {
        Effect::Ready(result)
    }

    /// An effect that settles when the future resolves.
    pub fn deferred<Fut>(fut: Fut) -> Self
    where
        Fut: Future<Output = Result<T, E>> + Send + 'static,
    {
        Effect::Deferred(Box::pin(fut))
    }

    /// Returns `true` if the effect has already settled.
    pub fn is_ready(&self) -> bool {
        matches!(self, Effect::Ready(_))
    }

    /// Resolve the effect to its `Result`, awaiting a deferred one.
    pub async fn settle(self) -> Result<T, E> {
        match self {
            Effect::Ready(result) => result,
            Effect::Deferred(fut) => fut.await,
        }
    }

    /// Map the error payload, whether the effect has settled or not.
    ///
    /// A deferred effect stays deferred: the mapping runs after the future
    /// resolves.
    pub fn map_err<E2, F>(self, f: F) -> Effect<T, E2>
    where
        F: FnOnce(E) -> E2 + Send + 'static,
        T: 'static,
        E: 'static,
        E2: 'static,
    {
        match self {
            Effect::Ready(result) => Effect::Ready(result.map_err(f)),
            Effect::Deferred(fut) => {
                Effect::Deferred(Box::pin(async move { fut.await.map_err(f) }))
            }
        }
    }
}

impl<T, E> From<Result<T, E>> for Effect<T, E> {
    fn from(result: Result<T, E>) -> Self {
        Effect::Ready(result)
    }
}

impl<T, E> std::fmt::Debug for Effect<T, E>
where
    T: std::fmt::Debug,
    E: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Effect::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Effect::Deferred(_) => f.debug_tuple("Deferred").finish(),
        }
    }
}
