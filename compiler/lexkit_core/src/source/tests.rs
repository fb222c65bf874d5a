use std::io;

use super::*;

fn drain(source: &mut impl ByteSource) -> io::Result<Vec<u8>> {
    let mut out = Vec::new();
    while let Some(b) = source.next_byte()? {
        out.push(b);
    }
    Ok(out)
}

// === SliceSource ===

#[test]
fn slice_yields_bytes_then_eos() -> io::Result<()> {
    let mut source = SliceSource::from("hi");
    assert_eq!(source.next_byte()?, Some(b'h'));
    assert_eq!(source.next_byte()?, Some(b'i'));
    assert_eq!(source.next_byte()?, None);
    Ok(())
}

#[test]
fn slice_eos_is_sticky() -> io::Result<()> {
    let mut source = SliceSource::new(b"");
    for _ in 0..4 {
        assert_eq!(source.next_byte()?, None);
    }
    assert_eq!(source.position(), 0);
    Ok(())
}

#[test]
fn slice_tracks_position_and_remaining() -> io::Result<()> {
    let mut source = SliceSource::from("abc");
    source.next_byte()?;
    assert_eq!(source.position(), 1);
    assert_eq!(source.remaining(), b"bc");
    drain(&mut source)?;
    assert_eq!(source.position(), 3);
    assert!(source.remaining().is_empty());
    Ok(())
}

#[test]
fn mut_ref_forwards() -> io::Result<()> {
    fn pull_one<S: ByteSource>(mut source: S) -> io::Result<Option<u8>> {
        source.next_byte()
    }

    let mut source = SliceSource::from("xy");
    assert_eq!(pull_one(&mut source)?, Some(b'x'));
    assert_eq!(source.position(), 1);
    Ok(())
}

// === ReadSource ===

#[test]
fn read_source_drains_reader() -> io::Result<()> {
    let mut source = ReadSource::new(io::Cursor::new(b"hello".to_vec()));
    assert_eq!(drain(&mut source)?, b"hello");
    assert_eq!(source.next_byte()?, None);
    Ok(())
}

#[test]
fn read_source_small_read_ahead() -> io::Result<()> {
    let data: Vec<u8> = (0..=255).collect();
    let mut source = ReadSource::with_capacity(3, io::Cursor::new(data.clone()));
    assert_eq!(drain(&mut source)?, data);
    Ok(())
}

/// Reader that interrupts every other call and fails after its data.
struct Flaky {
    data: Vec<u8>,
    pos: usize,
    calls: usize,
}

impl Read for Flaky {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.calls += 1;
        if self.calls % 2 == 1 {
            return Err(io::Error::from(io::ErrorKind::Interrupted));
        }
        let Some(&b) = self.data.get(self.pos) else {
            return Err(io::Error::other("device gone"));
        };
        if let Some(slot) = buf.first_mut() {
            *slot = b;
            self.pos += 1;
            return Ok(1);
        }
        Ok(0)
    }
}

#[test]
fn read_source_retries_interrupted() -> io::Result<()> {
    let reader = Flaky {
        data: b"ok".to_vec(),
        pos: 0,
        calls: 0,
    };
    let mut source = ReadSource::with_capacity(1, reader);
    assert_eq!(source.next_byte()?, Some(b'o'));
    assert_eq!(source.next_byte()?, Some(b'k'));
    let err = source.next_byte().err().map(|e| e.to_string());
    assert_eq!(err.as_deref(), Some("device gone"));
    Ok(())
}
