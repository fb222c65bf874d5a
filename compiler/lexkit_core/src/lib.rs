//! Low-level lexing buffer for hand-written tokenizers.
//!
//! This crate owns the byte-level machinery that every hand-written lexer
//! needs and that has nothing to do with any particular grammar:
//!
//! - [`ByteSource`]: a pull-based provider of bytes, one at a time.
//! - [`LexBuffer`]: a growable buffer over a source with two cursors,
//!   offering `next`/`back`/`peek` for lookahead and `emit`/`dump` for
//!   token extraction.
//! - [`LexConfig`]: construction parameters (initial capacity, ceiling).
//! - [`LexError`] and [`Next`]: the result contract every grammar relies on.
//!
//! The state machine that drives a buffer lives in the `lexkit` crate.
//!
//! # Buffer regions
//!
//! ```text
//! [ pending token | backed-up lookahead | unused capacity ]
//!  0          consumed              available            capacity
//! ```
//!
//! Bytes in `[consumed, available)` were read from the source and then
//! given back with [`LexBuffer::back`]; the next [`LexBuffer::next`] replays
//! them without touching the source. [`LexBuffer::dump`] discards the
//! pending token and slides the lookahead down to offset 0.

mod buffer;
mod config;
mod error;
mod source;

pub use buffer::LexBuffer;
pub use config::{ConfigError, LexConfig, DEFAULT_CAPACITY};
pub use error::{LexError, LexErrorKind, Next, EOS};
pub use source::{ByteSource, ReadSource, SliceSource};
