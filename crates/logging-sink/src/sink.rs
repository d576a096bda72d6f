use std::fmt::{self, Write as _};
use std::io::{self, Write};

/// Streaming sink that renders displayable values into an [`io::Write`] target.
///
/// The sink keeps a scratch `String` alive between calls so that repeated
/// writes reuse one allocation. Each rendered item is handed to the writer
/// in a single `write_all`.
#[derive(Clone, Debug)]
pub struct LineSink<W> {
    writer: W,
    scratch: String,
}

impl<W> LineSink<W> {
    /// Creates a sink that appends a newline after each rendered item.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            scratch: String::with_capacity(128),
        }
    }

    /// Consumes the sink and returns the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> LineSink<W>
where
    W: Write,
{
    /// Writes `item` followed by a newline.
    pub fn write<D>(&mut self, item: D) -> io::Result<()>
    where
        D: fmt::Display,
    {
        self.scratch.clear();
        writeln!(self.scratch, "{item}").map_err(io::Error::other)?;
        self.writer.write_all(self.scratch.as_bytes())
    }

    /// Flushes the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
