use std::io;

use bytes::Bytes;

/// Outcome of [`ReadFillExt::fill_or_eof`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fill {
    /// The whole buffer was filled.
    Full,
    /// The source ended before a single byte was delivered.
    Eof,
    /// The source ended after delivering this many bytes, fewer than requested.
    Partial(usize),
}

/// Reads from a [`std::io::Read`] that may end at any point.
///
/// [`io::Read::read_exact`] folds "nothing left" and "stopped half way" into the same
/// [`io::ErrorKind::UnexpectedEof`]. Framed formats need to tell them apart, a clean end
/// between two records is fine while a short record is not.
pub trait ReadFillExt: io::Read {
    /// Fills `buf` completely unless the source ends first.
    ///
    /// [`io::ErrorKind::Interrupted`] is retried, every other error is returned as is.
    fn fill_or_eof(&mut self, buf: &mut [u8]) -> io::Result<Fill> {
        let mut filled = 0;

        while filled < buf.len() {
            match self.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        }

        Ok(match filled {
            n if n == buf.len() => Fill::Full,
            0 => Fill::Eof,
            n => Fill::Partial(n),
        })
    }

    /// Reads exactly `size` bytes into a freshly allocated buffer.
    ///
    /// Returns the fill outcome together with whatever was read. The buffer is only
    /// `size` bytes long when the outcome is [`Fill::Full`]. The buffer grows with the
    /// data actually delivered, a bogus `size` does not allocate up front.
    fn read_extent(&mut self, size: usize) -> io::Result<(Fill, Bytes)> {
        let mut buf = Vec::new();
        let mut extent = <&mut Self as io::Read>::take(self, size as u64);
        io::Read::read_to_end(&mut extent, &mut buf)?;

        let fill = match buf.len() {
            n if n == size => Fill::Full,
            0 => Fill::Eof,
            n => Fill::Partial(n),
        };

        Ok((fill, Bytes::from(buf)))
    }
}

impl<R: io::Read + ?Sized> ReadFillExt for R {}
