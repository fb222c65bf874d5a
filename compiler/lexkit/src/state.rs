//! State abstraction for the lexing state machine.

use std::fmt;

use lexkit_core::{ByteSource, LexBuffer, LexError};

/// What a state asks the executor to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition<T> {
    /// Run this state next.
    Continue(T),
    /// Stop the machine.
    Halt,
}

impl<T> Transition<T> {
    /// Halt on `None`, continue on `Some`.
    pub fn from_option(next: Option<T>) -> Self {
        match next {
            Some(state) => Transition::Continue(state),
            None => Transition::Halt,
        }
    }

    /// Returns `true` for [`Transition::Halt`].
    pub fn is_halt(&self) -> bool {
        matches!(self, Transition::Halt)
    }
}

/// A unit of lexing behavior.
///
/// `step` consumes the state, does whatever reading and emitting it needs
/// through `lexer`, delivers tokens into `cx`, and names its successor.
/// There are no implicit transitions: a state that wants to keep going
/// returns [`Transition::Continue`] with the next state.
///
/// `Error` must absorb [`LexError`] so buffer failures propagate with `?`.
pub trait State<Src: ByteSource + ?Sized>: Sized {
    /// Where emitted tokens go. Use `()` if the grammar keeps them itself.
    type Context;
    /// Failure type of a step.
    type Error: From<LexError>;

    /// Run this state once against `lexer`.
    ///
    /// Returns the state to run next, or [`Transition::Halt`] when the
    /// grammar is done. An `Err` stops the executor; whatever the buffer
    /// holds at that point is left as is for the caller to inspect.
    fn step(
        self,
        lexer: &mut LexBuffer<'_, Src>,
        cx: &mut Self::Context,
    ) -> Result<Transition<Self>, Self::Error>;
}

/// Signature of a function-pointer state.
pub type StepFn<Src, C, E> =
    fn(&mut LexBuffer<'_, Src>, &mut C) -> Result<Option<StateFn<Src, C, E>>, E>;

/// A state backed by a plain function.
///
/// The function returns the next state function, or `None` to halt.
///
/// ```
/// use lexkit::{run, LexBuffer, LexError, SliceSource, StateFn};
///
/// type Words = StateFn<SliceSource<'static>, Vec<Vec<u8>>, LexError>;
///
/// fn word(
///     lx: &mut LexBuffer<'_, SliceSource<'static>>,
///     out: &mut Vec<Vec<u8>>,
/// ) -> Result<Option<Words>, LexError> {
///     if lx.eat_while(|b| b != b' ')? == 0 {
///         return Ok(None);
///     }
///     out.push(lx.emit()?);
///     Ok(Some(StateFn::new(space)))
/// }
///
/// fn space(
///     lx: &mut LexBuffer<'_, SliceSource<'static>>,
///     _: &mut Vec<Vec<u8>>,
/// ) -> Result<Option<Words>, LexError> {
///     lx.eat_while(|b| b == b' ')?;
///     lx.skip()?;
///     Ok(Some(StateFn::new(word)))
/// }
///
/// let mut src = SliceSource::new(b"to be");
/// let mut lx = LexBuffer::new(4, &mut src)?;
/// let mut words = Vec::new();
/// run(StateFn::new(word), &mut lx, &mut words)?;
/// assert_eq!(words, [b"to".to_vec(), b"be".to_vec()]);
/// # Ok::<(), LexError>(())
/// ```
pub struct StateFn<Src: ?Sized, C, E> {
    func: StepFn<Src, C, E>,
}

impl<Src: ?Sized, C, E> StateFn<Src, C, E> {
    pub const fn new(func: StepFn<Src, C, E>) -> Self {
        Self { func }
    }
}

// Manual impls: derives would demand `Src: Clone` and friends.
impl<Src: ?Sized, C, E> Clone for StateFn<Src, C, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<Src: ?Sized, C, E> Copy for StateFn<Src, C, E> {}

impl<Src: ?Sized, C, E> fmt::Debug for StateFn<Src, C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateFn").finish_non_exhaustive()
    }
}

impl<Src, C, E> State<Src> for StateFn<Src, C, E>
where
    Src: ByteSource + ?Sized,
    E: From<LexError>,
{
    type Context = C;
    type Error = E;

    #[inline]
    fn step(self, lexer: &mut LexBuffer<'_, Src>, cx: &mut C) -> Result<Transition<Self>, E> {
        (self.func)(lexer, cx).map(Transition::from_option)
    }
}
