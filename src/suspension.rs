/// What a sequence hands its driver each time it is resumed: either a pending
/// effect at a suspension point, or the sequence's final value.
///
/// `Suspension` is to a sequence what `Poll` is to a future: the protocol
/// value of the resumption loop. The driver inspects the variant, resolves a
/// pending effect, and resumes the sequence with the unwrapped result.
///
/// # Examples
///
/// ```rust
/// use relay::Suspension;
///
/// let paused: Suspension<i32, String> = Suspension::Pending(42);
/// let finished: Suspension<i32, String> = Suspension::Done("done".to_string());
///
/// assert_eq!(paused.map_pending(|x| x * 2), Suspension::Pending(84));
/// assert!(finished.is_done());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suspension<P, D> {
    /// The sequence paused and handed the driver a pending effect.
    Pending(P),
    /// The sequence ran out of steps and finished with a final value.
    Done(D),
}

impl<P, D> Suspension<P, D> {
    /// Returns `true` if the sequence is paused on a pending effect.
    #[inline]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Suspension::Pending(_))
    }

    /// Returns `true` if the sequence has finished.
    #[inline]
    pub const fn is_done(&self) -> bool {
        matches!(self, Suspension::Done(_))
    }

    /// Converts into `Option<P>`, discarding a final value.
    ///
    /// ```rust
    /// use relay::Suspension;
    ///
    /// let s: Suspension<i32, &str> = Suspension::Pending(42);
    /// assert_eq!(s.pending(), Some(42));
    ///
    /// let d: Suspension<i32, &str> = Suspension::Done("done");
    /// assert_eq!(d.pending(), None);
    /// ```
    #[inline]
    pub fn pending(self) -> Option<P> {
        match self {
            Suspension::Pending(p) => Some(p),
            Suspension::Done(_) => None,
        }
    }

    /// Converts into `Option<D>`, discarding a pending effect.
    #[inline]
    pub fn done(self) -> Option<D> {
        match self {
            Suspension::Pending(_) => None,
            Suspension::Done(d) => Some(d),
        }
    }

    /// Maps the pending effect through `f`, leaving a final value untouched.
    ///
    /// ```rust
    /// use relay::Suspension;
    ///
    /// let s: Suspension<i32, &str> = Suspension::Pending(5);
    /// assert_eq!(s.map_pending(|p| p * 2), Suspension::Pending(10));
    ///
    /// let d: Suspension<i32, &str> = Suspension::Done("done");
    /// assert_eq!(d.map_pending(|p: i32| p * 2), Suspension::Done("done"));
    /// ```
    #[inline]
    pub fn map_pending<P2, F>(self, f: F) -> Suspension<P2, D>
    where
        F: FnOnce(P) -> P2,
    {
        match self {
            Suspension::Pending(p) => Suspension::Pending(f(p)),
            Suspension::Done(d) => Suspension::Done(d),
        }
    }

    /// Maps the final value through `f`, leaving a pending effect untouched.
    #[inline]
    pub fn map_done<D2, F>(self, f: F) -> Suspension<P, D2>
    where
        F: FnOnce(D) -> D2,
    {
        match self {
            Suspension::Pending(p) => Suspension::Pending(p),
            Suspension::Done(d) => Suspension::Done(f(d)),
        }
    }

    /// Maps both channels at once.
    ///
    /// ```rust
    /// use relay::Suspension;
    ///
    /// let s: Suspension<i32, i32> = Suspension::Pending(42);
    /// assert_eq!(s.map(|p| p * 2, |d| d + 1), Suspension::Pending(84));
    ///
    /// let d: Suspension<i32, i32> = Suspension::Done(10);
    /// assert_eq!(d.map(|p| p * 2, |d| d + 1), Suspension::Done(11));
    /// ```
    #[inline]
    pub fn map<P2, D2, FP, FD>(self, fp: FP, fd: FD) -> Suspension<P2, D2>
    where
        FP: FnOnce(P) -> P2,
        FD: FnOnce(D) -> D2,
    {
        match self {
            Suspension::Pending(p) => Suspension::Pending(fp(p)),
            Suspension::Done(d) => Suspension::Done(fd(d)),
        }
    }

    /// Converts from `&Suspension<P, D>` to `Suspension<&P, &D>`.
    #[inline]
    pub const fn as_ref(&self) -> Suspension<&P, &D> {
        match self {
            Suspension::Pending(p) => Suspension::Pending(p),
            Suspension::Done(d) => Suspension::Done(d),
        }
    }

    /// Converts from `&mut Suspension<P, D>` to `Suspension<&mut P, &mut D>`.
    #[inline]
    pub fn as_mut(&mut self) -> Suspension<&mut P, &mut D> {
        match self {
            Suspension::Pending(p) => Suspension::Pending(p),
            Suspension::Done(d) => Suspension::Done(d),
        }
    }

    /// Returns the pending effect, panicking with `msg` if the sequence has
    /// finished.
    #[inline]
    pub fn expect_pending(self, msg: &str) -> P {
        match self {
            Suspension::Pending(p) => p,
            Suspension::Done(_) => panic!("{}", msg),
        }
    }

    /// Returns the final value, panicking with `msg` if the sequence is still
    /// paused.
    #[inline]
    pub fn expect_done(self, msg: &str) -> D {
        match self {
            Suspension::Pending(_) => panic!("{}", msg),
            Suspension::Done(d) => d,
        }
    }

    /// Returns the pending effect.
    ///
    /// # Panics
    ///
    /// Panics if the sequence has finished.
    ///
    /// ```rust
    /// use relay::Suspension;
    ///
    /// let s: Suspension<i32, &str> = Suspension::Pending(42);
    /// assert_eq!(s.unwrap_pending(), 42);
    /// ```
    #[inline]
    pub fn unwrap_pending(self) -> P {
        match self {
            Suspension::Pending(p) => p,
            Suspension::Done(_) => {
                panic!("called `Suspension::unwrap_pending()` on a `Done` value")
            }
        }
    }

    /// Returns the final value.
    ///
    /// # Panics
    ///
    /// Panics if the sequence is still paused.
    #[inline]
    pub fn unwrap_done(self) -> D {
        match self {
            Suspension::Pending(_) => {
                panic!("called `Suspension::unwrap_done()` on a `Pending` value")
            }
            Suspension::Done(d) => d,
        }
    }
}
