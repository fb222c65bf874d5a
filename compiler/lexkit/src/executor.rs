//! The trampoline that drives states against a buffer.
//!
//! [`run`] is the whole machine: call the current state, replace it with
//! whatever it returns, stop on [`Transition::Halt`]. It does no buffering,
//! error translation, or backtracking of its own. [`Lexer`] packages a
//! buffer together with its current state for callers that want to drive
//! the machine one transition at a time.

use tracing::{debug, trace};

use lexkit_core::{ByteSource, LexBuffer, LexConfig, LexError};

use crate::{State, Transition};

/// Run `initial` against `lexer` until a state halts.
///
/// Returns the number of steps taken, counting the one that halted. The
/// first error from a step is returned as is.
pub fn run<Src, St>(
    initial: St,
    lexer: &mut LexBuffer<'_, Src>,
    cx: &mut St::Context,
) -> Result<usize, St::Error>
where
    Src: ByteSource + ?Sized,
    St: State<Src>,
{
    debug!(offset = lexer.offset(), "state machine started");
    let mut state = initial;
    let mut steps = 0usize;
    loop {
        steps += 1;
        trace!(step = steps, offset = lexer.offset(), "step");
        match state.step(lexer, cx)? {
            Transition::Continue(next) => state = next,
            Transition::Halt => {
                debug!(steps, offset = lexer.offset(), "state machine halted");
                return Ok(steps);
            }
        }
    }
}

/// A buffer bundled with the state that runs next.
///
/// Owns the buffer (and so its storage) for the whole session; the source
/// stays borrowed. Once a step halts or fails, the lexer is halted for
/// good: the failing step consumed the state.
#[derive(Debug)]
pub struct Lexer<'src, Src: ?Sized, St> {
    buffer: LexBuffer<'src, Src>,
    state: Option<St>,
    steps: usize,
}

impl<'src, Src, St> Lexer<'src, Src, St>
where
    Src: ByteSource + ?Sized,
    St: State<Src>,
{
    /// Build a lexer with a fresh buffer of `initial_capacity` bytes.
    pub fn new(
        initial_capacity: usize,
        source: &'src mut Src,
        initial: St,
    ) -> Result<Self, LexError> {
        Self::with_config(LexConfig::new(initial_capacity), source, initial)
    }

    /// Build a lexer with a buffer made from `config`.
    ///
    /// Fails if the config is rejected or the initial storage cannot be
    /// allocated.
    pub fn with_config(
        config: LexConfig,
        source: &'src mut Src,
        initial: St,
    ) -> Result<Self, LexError> {
        let buffer = LexBuffer::with_config(config, source)?;
        Ok(Self::from_buffer(buffer, initial))
    }

    /// Wrap an existing buffer, keeping any bytes it already holds.
    pub fn from_buffer(buffer: LexBuffer<'src, Src>, initial: St) -> Self {
        Self {
            buffer,
            state: Some(initial),
            steps: 0,
        }
    }

    /// Run one transition. Returns `true` while the machine can continue.
    ///
    /// Calling `step` on a halted lexer does nothing and returns `false`.
    pub fn step(&mut self, cx: &mut St::Context) -> Result<bool, St::Error> {
        let Some(state) = self.state.take() else {
            return Ok(false);
        };
        self.steps += 1;
        trace!(step = self.steps, offset = self.buffer.offset(), "step");
        match state.step(&mut self.buffer, cx)? {
            Transition::Continue(next) => {
                self.state = Some(next);
                Ok(true)
            }
            Transition::Halt => {
                debug!(steps = self.steps, "state machine halted");
                Ok(false)
            }
        }
    }

    /// Run until a state halts. Returns the total steps taken so far.
    pub fn run(&mut self, cx: &mut St::Context) -> Result<usize, St::Error> {
        while self.step(cx)? {}
        Ok(self.steps)
    }
}

impl<'src, Src: ?Sized, St> Lexer<'src, Src, St> {
    /// Returns `true` once a step has halted or failed.
    pub fn is_halted(&self) -> bool {
        self.state.is_none()
    }

    /// The state that runs next, if any.
    pub fn state(&self) -> Option<&St> {
        self.state.as_ref()
    }

    /// Steps taken so far.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// The underlying buffer.
    pub fn buffer(&self) -> &LexBuffer<'src, Src> {
        &self.buffer
    }

    /// Mutable access to the buffer, for reads outside any state.
    pub fn buffer_mut(&mut self) -> &mut LexBuffer<'src, Src> {
        &mut self.buffer
    }

    /// Give up the machine and keep the buffer.
    pub fn into_buffer(self) -> LexBuffer<'src, Src> {
        self.buffer
    }
}
