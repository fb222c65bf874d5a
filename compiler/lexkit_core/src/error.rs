//! Result and error types for buffer operations.
//!
//! Every buffer operation reports through a `Result`. Successful reads
//! yield a [`Next`], which is either a byte or end-of-stream; failures
//! yield a [`LexError`].
//!
//! # Raw codes
//!
//! Test suites ported from integer-returning lexers assert on raw codes:
//! a byte is `0..=255`, end-of-stream is [`EOS`] (`-1`), and every error is
//! a distinct value below `EOS`. [`Next::code`] and [`LexError::code`]
//! produce those values.

use std::io;
use std::str::Utf8Error;

use crate::ConfigError;

/// Raw code for end-of-stream.
pub const EOS: i32 = -1;

/// Outcome of a successful read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Next {
    /// A byte of input.
    Byte(u8),
    /// The source is exhausted. Never stored in the buffer.
    Eos,
}

impl Next {
    /// Returns the byte, or `None` at end-of-stream.
    #[inline]
    pub const fn byte(self) -> Option<u8> {
        match self {
            Next::Byte(b) => Some(b),
            Next::Eos => None,
        }
    }

    /// Returns `true` at end-of-stream.
    #[inline]
    pub const fn is_eos(self) -> bool {
        matches!(self, Next::Eos)
    }

    /// Raw code: the byte value, or [`EOS`].
    pub fn code(self) -> i32 {
        match self {
            Next::Byte(b) => i32::from(b),
            Next::Eos => EOS,
        }
    }
}

/// A failed buffer operation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LexError {
    /// Storage could not be obtained or grown. The buffer keeps its
    /// previous capacity and contents.
    #[error("lex buffer allocation of {requested} bytes failed")]
    AllocationFailure { requested: usize },

    /// `back()` failed inside `peek()` after a successful read.
    ///
    /// This can only happen if the cursor invariants are broken; treat it
    /// as a defect rather than a lexing outcome.
    #[error("peek could not back up the byte it read")]
    PeekBackup,

    /// `back()` was called with no pending bytes.
    #[error("cannot back up: nothing consumed since the last emit or dump")]
    BackupUnderflow,

    /// The range check before dump's move failed. The buffer is no longer
    /// safe to use.
    #[error("cannot dump: consumed ({consumed}) exceeds available ({available})")]
    MoveFailure { consumed: usize, available: usize },

    /// The pending bytes could not be copied into a string. The buffer is
    /// left untouched.
    #[error("pending token of {len} bytes is not valid UTF-8")]
    CopyFailure {
        len: usize,
        #[source]
        source: Utf8Error,
    },

    /// The byte source failed to read.
    #[error("byte source read failed")]
    Source(#[source] io::Error),

    /// Construction parameters were rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Discriminant of a [`LexError`], for matching without payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum LexErrorKind {
    /// See [`LexError::AllocationFailure`].
    AllocationFailure,
    /// See [`LexError::PeekBackup`].
    PeekBackup,
    /// See [`LexError::BackupUnderflow`].
    BackupUnderflow,
    /// See [`LexError::MoveFailure`].
    MoveFailure,
    /// See [`LexError::CopyFailure`].
    CopyFailure,
    /// See [`LexError::Source`].
    Source,
    /// See [`LexError::Config`].
    Config,
}

impl LexError {
    /// Payload-free kind of this error.
    pub fn kind(&self) -> LexErrorKind {
        match self {
            LexError::AllocationFailure { .. } => LexErrorKind::AllocationFailure,
            LexError::PeekBackup => LexErrorKind::PeekBackup,
            LexError::BackupUnderflow => LexErrorKind::BackupUnderflow,
            LexError::MoveFailure { .. } => LexErrorKind::MoveFailure,
            LexError::CopyFailure { .. } => LexErrorKind::CopyFailure,
            LexError::Source(_) => LexErrorKind::Source,
            LexError::Config(_) => LexErrorKind::Config,
        }
    }

    /// Raw code for this error. Always below [`EOS`].
    pub fn code(&self) -> i32 {
        self.kind().code()
    }
}

impl LexErrorKind {
    /// Raw code for this kind. Always below [`EOS`].
    ///
    /// `-2` and `-3` are the historical codes for a failed growth in
    /// `next` and a failed backup inside `peek`.
    pub const fn code(self) -> i32 {
        match self {
            LexErrorKind::AllocationFailure => -2,
            LexErrorKind::PeekBackup => -3,
            LexErrorKind::BackupUnderflow => -4,
            LexErrorKind::MoveFailure => -5,
            LexErrorKind::CopyFailure => -6,
            LexErrorKind::Source => -7,
            LexErrorKind::Config => -8,
        }
    }
}

#[cfg(test)]
mod tests;
