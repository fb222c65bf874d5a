use super::*;

const ALL_KINDS: [LexErrorKind; 7] = [
    LexErrorKind::AllocationFailure,
    LexErrorKind::PeekBackup,
    LexErrorKind::BackupUnderflow,
    LexErrorKind::MoveFailure,
    LexErrorKind::CopyFailure,
    LexErrorKind::Source,
    LexErrorKind::Config,
];

// === Next ===

#[test]
fn byte_code_is_byte_value() {
    assert_eq!(Next::Byte(0).code(), 0);
    assert_eq!(Next::Byte(b'a').code(), 97);
    assert_eq!(Next::Byte(0xFF).code(), 255);
}

#[test]
fn eos_code_is_minus_one() {
    assert_eq!(Next::Eos.code(), EOS);
    assert_eq!(EOS, -1);
    assert!(Next::Eos.is_eos());
    assert_eq!(Next::Eos.byte(), None);
    assert_eq!(Next::Byte(b'x').byte(), Some(b'x'));
}

// === Error codes ===

#[test]
fn error_codes_are_below_eos() {
    for kind in ALL_KINDS {
        let code = kind.code();
        assert!(code < EOS, "{kind:?} code {code} not below EOS");
    }
}

#[test]
fn error_codes_are_distinct() {
    for (i, a) in ALL_KINDS.iter().enumerate() {
        for b in &ALL_KINDS[i + 1..] {
            assert_ne!(a.code(), b.code(), "{a:?} and {b:?} share a code");
        }
    }
}

#[test]
fn historical_codes_preserved() {
    assert_eq!(LexError::AllocationFailure { requested: 8 }.code(), -2);
    assert_eq!(LexError::PeekBackup.code(), -3);
}

#[test]
fn kind_matches_variant() {
    let err = LexError::Source(io::Error::other("boom"));
    assert_eq!(err.kind(), LexErrorKind::Source);
    let err = LexError::MoveFailure {
        consumed: 3,
        available: 1,
    };
    assert_eq!(err.kind(), LexErrorKind::MoveFailure);
    let err = LexError::from(ConfigError::ZeroCapacity);
    assert_eq!(err.kind(), LexErrorKind::Config);
}

// === Display ===

#[test]
fn messages_carry_payload() {
    let err = LexError::AllocationFailure { requested: 128 };
    assert_eq!(err.to_string(), "lex buffer allocation of 128 bytes failed");

    let err = LexError::MoveFailure {
        consumed: 4,
        available: 2,
    };
    assert_eq!(
        err.to_string(),
        "cannot dump: consumed (4) exceeds available (2)"
    );
}

#[test]
fn source_error_is_chained() {
    use std::error::Error as _;

    let err = LexError::Source(io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed"));
    let source = err.source().map(ToString::to_string);
    assert_eq!(source.as_deref(), Some("pipe closed"));
}
