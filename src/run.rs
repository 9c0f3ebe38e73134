//! Drivers that run a sequence to completion.
//!
//! Both drivers follow the same loop: resume the sequence, unwrap the
//! pending effect's `Ok` payload into the next resumption value, and stop at
//! the first `Err` or at the final value. Exactly one of the two terminal
//! outcomes is produced per drive.

use crate::{sequence::Sequence, suspension::Suspension, task::AsyncSequence};

/// Drive a synchronous sequence to completion.
///
/// Each pending `Ok(v)` is fed back as the next resumption value. The first
/// pending `Err(e)` ends the drive immediately; no later step runs. A
/// sequence that finishes without failing yields `Ok` of its final value.
///
/// ```rust
/// use relay::prelude::*;
///
/// let seq = step(|x: i32| Ok::<_, String>(x + 1)).chain(step(|x| Ok(x * 2)));
/// assert_eq!(run(seq, 3), Ok(8));
/// ```
pub fn run<T, E, S>(mut seq: S, input: T) -> Result<S::Output, E>
where
    S: Sequence<T, E>,
{
    let mut value = input;
    loop {
        match seq.resume(value) {
            Suspension::Pending(Ok(next)) => value = next,
            Suspension::Pending(Err(e)) => return Err(e),
            Suspension::Done(out) => return Ok(out),
        }
    }
}

/// Drive an asynchronous sequence to completion.
///
/// Each pending effect is settled in order before the next step starts, so
/// steps never overlap. The first settled `Err(e)` ends the drive; a
/// sequence that finishes without failing yields `Ok` of its final value.
///
/// Cancellation is the caller's: dropping the returned future at an await
/// point abandons the drive without producing any `Result` at all. The
/// driver never turns cancellation into an `Err`.
pub async fn run_async<T, E, S>(mut seq: S, input: T) -> Result<S::Output, E>
where
    S: AsyncSequence<T, E>,
{
    let mut value = input;
    loop {
        match seq.resume(value) {
            Suspension::Pending(effect) => match effect.settle().await {
                Ok(next) => value = next,
                Err(e) => return Err(e),
            },
            Suspension::Done(out) => return Ok(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::{from_fn, step};
    use crate::task::step_async;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_run_feeds_each_ok_back_into_the_sequence() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);

        let seq = step(move |x: i32| {
            log.borrow_mut().push(x);
            Ok::<_, String>(x + 10)
        })
        .chain(step({
            let log = Rc::clone(&seen);
            move |x: i32| {
                log.borrow_mut().push(x);
                Ok(x + 100)
            }
        }));

        assert_eq!(run(seq, 1), Ok(111));
        assert_eq!(*seen.borrow(), vec![1, 11]);
    }

    #[test]
    fn test_run_stops_at_the_first_err() {
        let seq = step(|_: i32| Err::<i32, _>("fail")).chain(step(|x: i32| Ok(x)));
        assert_eq!(run(seq, 1), Err("fail"));
    }

    #[test]
    fn test_run_with_an_empty_sequence_returns_the_input() {
        let seq = from_fn(|x: i32| Suspension::<Result<i32, String>, i32>::Done(x));
        assert_eq!(run(seq, 42), Ok(42));
    }

    #[test]
    fn test_run_async_settles_effects_in_order() {
        let seq = step_async(|x: i32| async move { Ok::<_, String>(x + 1) })
            .chain(step_async(|x: i32| async move { Ok(x * 3) }));

        assert_eq!(block_on(run_async(seq, 1)), Ok(6));
    }

    #[test]
    fn test_run_async_stops_at_the_first_err() {
        let seq = step_async(|_: i32| async move { Err::<i32, _>("boom") })
            .chain(step_async(|x: i32| async move { Ok(x) }));

        assert_eq!(block_on(run_async(seq, 1)), Err("boom"));
    }

    #[test]
    fn test_dropping_the_async_driver_never_fabricates_an_err() {
        use futures::task::noop_waker;
        use std::future::Future;
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;
        use std::task::{Context, Poll};

        let resumed = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&resumed);

        let seq = step_async(|_: i32| futures::future::pending::<Result<i32, String>>()).chain(
            step_async(move |x: i32| {
                flag.store(true, Ordering::SeqCst);
                async move { Ok(x) }
            }),
        );

        let mut fut = Box::pin(run_async(seq, 1));
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        assert!(matches!(fut.as_mut().poll(&mut cx), Poll::Pending));

        // dropping the driver mid-flight abandons the run; no Err is produced
        // and the second step is never resumed
        drop(fut);
        assert!(!resumed.load(Ordering::SeqCst));
    }
}
