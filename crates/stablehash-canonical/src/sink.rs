use std::io;

/// Destination for the canonical token stream.
///
/// A sink is anything that accepts bytes in order: a growable buffer, a
/// running digest accumulator, or an I/O-backed writer. The encoder imposes
/// no buffering requirements and writes small slices frequently.
pub trait Sink {
    /// Appends `bytes` to the sink.
    fn write(&mut self, bytes: &[u8]) -> io::Result<()>;
}

impl Sink for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Adapter exposing any [`io::Write`] as a [`Sink`].
///
/// Write failures surface as [`EncodeError::SinkWrite`](crate::EncodeError)
/// and abort the encode.
#[derive(Debug)]
pub struct IoSink<W: io::Write> {
    inner: W,
}

impl<W: io::Write> IoSink<W> {
    /// Wraps a writer.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Unwraps the sink, returning the inner writer.
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: io::Write> Sink for IoSink<W> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.inner.write_all(bytes)
    }
}
