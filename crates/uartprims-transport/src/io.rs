use std::io::{ErrorKind, Read, Write};

use bytes::Bytes;

use crate::error::{ChannelError, Result};

/// Write every byte of `bytes`, then flush.
///
/// `Interrupted` is retried; a zero-length write means the other end is gone.
pub(crate) fn write_fully<W: Write + ?Sized>(inner: &mut W, bytes: &[u8]) -> Result<()> {
    let mut offset = 0usize;
    while offset < bytes.len() {
        match inner.write(&bytes[offset..]) {
            Ok(0) => return Err(ChannelError::Closed),
            Ok(n) => offset += n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(ChannelError::Io(err)),
        }
    }

    loop {
        match inner.flush() {
            Ok(()) => return Ok(()),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(ChannelError::Io(err)),
        }
    }
}

/// Issue one read for up to `max_bytes`.
///
/// A timeout (or `WouldBlock`/`Interrupted`) yields an empty buffer rather
/// than an error; end of stream yields [`ChannelError::Closed`].
pub(crate) fn read_available<R: Read + ?Sized>(inner: &mut R, max_bytes: usize) -> Result<Bytes> {
    if max_bytes == 0 {
        return Ok(Bytes::new());
    }

    let mut chunk = vec![0u8; max_bytes];
    match inner.read(&mut chunk) {
        Ok(0) => Err(ChannelError::Closed),
        Ok(n) => {
            chunk.truncate(n);
            Ok(Bytes::from(chunk))
        }
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::TimedOut | ErrorKind::WouldBlock | ErrorKind::Interrupted
            ) =>
        {
            Ok(Bytes::new())
        }
        Err(err) => Err(ChannelError::Io(err)),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn write_fully_retries_interrupted() {
        let mut sink = InterruptedOnce {
            interrupted: false,
            data: Vec::new(),
        };
        write_fully(&mut sink, b"\xAA\x01\x01").unwrap();
        assert_eq!(sink.data, b"\xAA\x01\x01");
    }

    #[test]
    fn write_fully_zero_write_is_closed() {
        let err = write_fully(&mut ZeroWriter, b"x").unwrap_err();
        assert!(matches!(err, ChannelError::Closed));
    }

    #[test]
    fn read_available_returns_short_reads() {
        let mut src = Cursor::new(vec![1u8, 2, 3]);
        let got = read_available(&mut src, 64).unwrap();
        assert_eq!(got.as_ref(), &[1, 2, 3]);
    }

    #[test]
    fn read_available_caps_at_max() {
        let mut src = Cursor::new(vec![9u8; 32]);
        let got = read_available(&mut src, 4).unwrap();
        assert_eq!(got.len(), 4);
    }

    #[test]
    fn read_available_eof_is_closed() {
        let mut src = Cursor::new(Vec::<u8>::new());
        let err = read_available(&mut src, 8).unwrap_err();
        assert!(matches!(err, ChannelError::Closed));
    }

    #[test]
    fn read_available_timeout_is_empty() {
        let mut src = TimesOut;
        let got = read_available(&mut src, 8).unwrap();
        assert!(got.is_empty());
    }

    struct InterruptedOnce {
        interrupted: bool,
        data: Vec<u8>,
    }

    impl Write for InterruptedOnce {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::Error::from(ErrorKind::Interrupted));
            }
            self.data.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct TimesOut;

    impl Read for TimesOut {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(ErrorKind::TimedOut))
        }
    }
}
