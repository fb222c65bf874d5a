//! Trampolined state machine for hand-written lexers.
//!
//! A grammar is a set of states. Each state reads from a [`LexBuffer`],
//! emits whatever tokens it recognizes into a caller-owned context, and
//! returns the state to run next, or [`Transition::Halt`]. The executor
//! owns the loop, so states never call each other and the call stack stays
//! flat no matter how many transitions a grammar makes.
//!
//! Two ways to write states:
//!
//! - A closed `enum` implementing [`State`], dispatching in `step`.
//! - Plain functions wrapped in [`StateFn`], each returning the next
//!   function (or `None` to halt).
//!
//! Run them with [`run`] against a buffer you own, or bundle buffer and
//! state in a [`Lexer`] to drive one transition at a time.

mod executor;
mod state;

pub use executor::{run, Lexer};
pub use state::{State, StateFn, StepFn, Transition};

pub use lexkit_core::{
    ByteSource, ConfigError, LexBuffer, LexConfig, LexError, LexErrorKind, Next, ReadSource,
    SliceSource, DEFAULT_CAPACITY, EOS,
};
