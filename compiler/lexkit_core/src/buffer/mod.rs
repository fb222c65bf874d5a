//! Growable lexing buffer with single-level backup.
//!
//! The buffer pulls bytes from a [`ByteSource`] on demand and keeps them
//! until the grammar either emits them as a token or dumps them. Two
//! cursors split the stored bytes into regions:
//!
//! ```text
//! storage: [ pending token | backed-up lookahead ]( unused capacity )
//!           0          consumed              available          capacity
//! ```
//!
//! - `[0, consumed)` is the pending token, what [`LexBuffer::emit`] returns.
//! - `[consumed, available)` holds bytes that were read and then given back
//!   with [`LexBuffer::back`]. [`LexBuffer::next`] replays them without
//!   touching the source.
//! - `[available, capacity)` is free room. When `consumed` reaches
//!   `capacity`, the next read doubles it.
//!
//! # Invariant
//!
//! `consumed <= available <= capacity` at every observable point. The
//! storage `Vec` has length `available`; its allocation is always at least
//! `capacity` bytes, so appends never reallocate behind the cursors' back.
//!
//! # Concurrency
//!
//! A buffer mutably borrows its source and every mutating operation takes
//! `&mut self`, so one buffer serves exactly one consumer at a time.
//! Sharing a buffer across threads is not supported.

use tracing::{trace, warn};

use crate::{ByteSource, LexConfig, LexError, Next};

/// Growable byte buffer over a borrowed [`ByteSource`].
///
/// Storage is owned by the buffer and released when it is dropped. The
/// source is only borrowed; [`into_source`](Self::into_source) hands the
/// borrow back.
#[derive(Debug)]
pub struct LexBuffer<'src, S: ?Sized> {
    /// Bytes `[0, available)`. `storage.capacity() >= capacity`.
    storage: Vec<u8>,
    /// Length of the pending token.
    consumed: usize,
    /// Logical capacity. Doubles on growth; never shrinks.
    capacity: usize,
    /// Growth ceiling from [`LexConfig::max_capacity`].
    limit: Option<usize>,
    /// Total bytes discarded by dumps: the absolute offset of `storage[0]`.
    dumped: u64,
    /// Byte pulled from the source while full at the ceiling. Logically
    /// sits at offset `available`; read before the source is polled again.
    held: Option<u8>,
    source: &'src mut S,
}

impl<'src, S: ByteSource + ?Sized> LexBuffer<'src, S> {
    /// Create a buffer with `initial_capacity` bytes of storage.
    pub fn new(initial_capacity: usize, source: &'src mut S) -> Result<Self, LexError> {
        Self::with_config(LexConfig::new(initial_capacity), source)
    }

    /// Create a buffer from a [`LexConfig`].
    pub fn with_config(config: LexConfig, source: &'src mut S) -> Result<Self, LexError> {
        config.validate()?;
        let capacity = config.initial_capacity;
        let mut storage = Vec::new();
        storage
            .try_reserve_exact(capacity)
            .map_err(|_| LexError::AllocationFailure {
                requested: capacity,
            })?;
        Ok(Self {
            storage,
            consumed: 0,
            capacity,
            limit: config.max_capacity,
            dumped: 0,
            held: None,
            source,
        })
    }

    /// Read the next byte into the pending token.
    ///
    /// Replays a backed-up byte if one exists, otherwise pulls from the
    /// source. End-of-stream is returned as [`Next::Eos`] and is never
    /// stored: neither cursor moves, and calling again polls the source
    /// again.
    ///
    /// Fails with [`LexError::AllocationFailure`] if the buffer is full and
    /// cannot grow, and with [`LexError::Source`] if the source fails. In
    /// both cases the cursors are unchanged.
    ///
    /// A buffer full at [`LexConfig::max_capacity`] still polls the source
    /// first, so a token that fills the ceiling exactly ends with
    /// [`Next::Eos`]. A byte that does not fit is kept, not lost, and is
    /// returned by the first `next` after a dump.
    #[allow(
        clippy::should_implement_trait,
        reason = "fallible read, not an Iterator; mirrors back/peek naming"
    )]
    pub fn next(&mut self) -> Result<Next, LexError> {
        if self.consumed >= self.capacity {
            if self.at_ceiling() {
                return self.next_at_ceiling();
            }
            self.grow()?;
        }

        // Backup replay: available > consumed.
        if let Some(&byte) = self.storage.get(self.consumed) {
            self.consumed += 1;
            return Ok(Next::Byte(byte));
        }

        debug_assert_eq!(self.consumed, self.storage.len());
        match self.pull()? {
            Some(byte) => {
                self.storage.push(byte);
                self.consumed += 1;
                Ok(Next::Byte(byte))
            }
            None => Ok(Next::Eos),
        }
    }

    /// Give the last byte of the pending token back.
    ///
    /// The byte stays in storage and is replayed by the next
    /// [`next`](Self::next). Fails with [`LexError::BackupUnderflow`] when
    /// the pending token is empty.
    pub fn back(&mut self) -> Result<(), LexError> {
        if self.consumed == 0 {
            trace!(offset = self.dumped, "backup underflow");
            return Err(LexError::BackupUnderflow);
        }
        self.consumed -= 1;
        Ok(())
    }

    /// Look at the next byte without consuming it.
    ///
    /// Equivalent to [`next`](Self::next) followed by [`back`](Self::back),
    /// except that nothing is backed up at end-of-stream. Errors from
    /// `next` propagate unchanged; a failed `back` becomes
    /// [`LexError::PeekBackup`].
    pub fn peek(&mut self) -> Result<Next, LexError> {
        match self.next()? {
            Next::Eos => Ok(Next::Eos),
            Next::Byte(byte) => {
                self.back().map_err(|_| LexError::PeekBackup)?;
                Ok(Next::Byte(byte))
            }
        }
    }

    /// Consume the next byte if `pred` accepts it.
    ///
    /// Returns the byte, or `None` if it was rejected or at end-of-stream.
    /// A rejected byte is backed up.
    pub fn next_if(&mut self, pred: impl FnOnce(u8) -> bool) -> Result<Option<u8>, LexError> {
        match self.next()? {
            Next::Byte(byte) if pred(byte) => Ok(Some(byte)),
            Next::Byte(_) => {
                self.back()?;
                Ok(None)
            }
            Next::Eos => Ok(None),
        }
    }

    /// Consume bytes while `pred` accepts them. Returns how many.
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) -> Result<usize, LexError> {
        let mut count = 0;
        while self.next_if(&pred)?.is_some() {
            count += 1;
        }
        Ok(count)
    }

    /// Take the pending token as an owned copy, then [`dump`](Self::dump).
    ///
    /// If the copy cannot be allocated the buffer is left untouched.
    pub fn emit(&mut self) -> Result<Vec<u8>, LexError> {
        let len = self.consumed;
        let mut token = Vec::new();
        token
            .try_reserve_exact(len)
            .map_err(|_| LexError::AllocationFailure { requested: len })?;
        token.extend_from_slice(self.pending());
        self.dump()?;
        trace!(len, start = self.dumped - len as u64, "emit");
        Ok(token)
    }

    /// Like [`emit`](Self::emit), but as a `String`.
    ///
    /// Fails with [`LexError::CopyFailure`] if the pending bytes are not
    /// valid UTF-8. Nothing is dumped in that case, so the caller can fall
    /// back to [`emit`](Self::emit).
    pub fn emit_str(&mut self) -> Result<String, LexError> {
        let len = self.consumed;
        let text = std::str::from_utf8(self.pending())
            .map_err(|source| LexError::CopyFailure { len, source })?;
        let mut token = String::new();
        token
            .try_reserve_exact(len)
            .map_err(|_| LexError::AllocationFailure { requested: len })?;
        token.push_str(text);
        self.dump()?;
        trace!(len, start = self.dumped - len as u64, "emit");
        Ok(token)
    }

    /// Discard the pending token, keeping backed-up lookahead.
    ///
    /// Bytes `[consumed, available)` slide down to offset 0 and stay
    /// replayable. The move is overlap-safe: with a short pending token the
    /// source and destination ranges overlap.
    pub fn dump(&mut self) -> Result<(), LexError> {
        let consumed = self.consumed;
        let available = self.storage.len();
        if consumed > available {
            return Err(LexError::MoveFailure {
                consumed,
                available,
            });
        }
        if consumed == 0 {
            return Ok(());
        }

        self.storage.copy_within(consumed..available, 0);
        self.storage.truncate(available - consumed);
        self.consumed = 0;
        self.dumped += consumed as u64;
        trace!(
            discarded = consumed,
            lookahead = self.storage.len(),
            offset = self.dumped,
            "dump"
        );
        Ok(())
    }

    /// Discard the pending token without copying it. Returns its length.
    ///
    /// Used for whitespace, comments, and anything else the grammar reads
    /// but does not emit.
    pub fn skip(&mut self) -> Result<usize, LexError> {
        let len = self.consumed;
        self.dump()?;
        Ok(len)
    }

    /// Hand the source borrow back, releasing storage.
    ///
    /// Bytes still in the buffer, including one held back at the ceiling,
    /// are dropped with it.
    pub fn into_source(self) -> &'src mut S {
        self.source
    }

    /// The held byte if there is one, otherwise the source's next byte.
    fn pull(&mut self) -> Result<Option<u8>, LexError> {
        if let Some(byte) = self.held.take() {
            return Ok(Some(byte));
        }
        self.source.next_byte().map_err(LexError::Source)
    }

    fn at_ceiling(&self) -> bool {
        self.limit.is_some_and(|limit| self.capacity >= limit)
    }

    /// Full with no room to grow: only end-of-stream can still succeed.
    fn next_at_ceiling(&mut self) -> Result<Next, LexError> {
        match self.pull()? {
            None => Ok(Next::Eos),
            Some(byte) => {
                self.held = Some(byte);
                warn!(
                    capacity = self.capacity,
                    offset = self.offset(),
                    "lex buffer at maximum capacity"
                );
                Err(LexError::AllocationFailure {
                    requested: self.capacity.saturating_mul(2),
                })
            }
        }
    }

    /// Double the logical capacity, clamped to the configured ceiling.
    fn grow(&mut self) -> Result<(), LexError> {
        let doubled = self.capacity.checked_mul(2);
        let target = match (doubled, self.limit) {
            (Some(doubled), Some(limit)) => doubled.min(limit),
            (Some(doubled), None) => doubled,
            (None, Some(limit)) => limit,
            (None, None) => usize::MAX,
        };
        if target <= self.capacity {
            warn!(
                capacity = self.capacity,
                limit = self.limit,
                "lex buffer at maximum capacity"
            );
            return Err(LexError::AllocationFailure {
                requested: doubled.unwrap_or(usize::MAX),
            });
        }

        self.storage
            .try_reserve_exact(target - self.storage.len())
            .map_err(|_| LexError::AllocationFailure { requested: target })?;
        trace!(from = self.capacity, to = target, "grow");
        self.capacity = target;
        Ok(())
    }
}

impl<S: ?Sized> LexBuffer<'_, S> {
    /// The pending token, `[0, consumed)`.
    #[inline]
    pub fn pending(&self) -> &[u8] {
        self.storage.get(..self.consumed).unwrap_or_default()
    }

    /// Length of the pending token.
    #[inline]
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Bytes held since the last dump: pending token plus lookahead.
    #[inline]
    pub fn available(&self) -> usize {
        self.storage.len()
    }

    /// Logical capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the pending token is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.consumed == 0
    }

    /// Absolute source offset of the pending token's first byte.
    #[inline]
    pub fn token_start(&self) -> u64 {
        self.dumped
    }

    /// Absolute source offset of the read cursor.
    #[inline]
    pub fn offset(&self) -> u64 {
        self.dumped + self.consumed as u64
    }
}
