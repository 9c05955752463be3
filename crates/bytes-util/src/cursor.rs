use std::io;

use bytes::{Buf, Bytes};

/// Zero-copy helpers for `io::Cursor<Bytes>`.
///
/// The cursor also implements [`bytes::Buf`], use that for the remaining length.
pub trait BytesCursorExt {
    /// Extracts the next `size` bytes without copying.
    ///
    /// Fails with [`io::ErrorKind::UnexpectedEof`] if fewer than `size` bytes remain,
    /// in which case the cursor does not move.
    fn extract_bytes(&mut self, size: usize) -> io::Result<Bytes>;

    /// Extracts everything from the cursor position to the end of the buffer.
    fn extract_remaining(&mut self) -> Bytes;
}

impl BytesCursorExt for io::Cursor<Bytes> {
    fn extract_bytes(&mut self, size: usize) -> io::Result<Bytes> {
        if self.remaining() < size {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "not enough bytes"));
        }

        // The position may sit past the end of the buffer.
        let start = (self.position() as usize).min(self.get_ref().len());
        let end = start + size;
        let slice = self.get_ref().slice(start..end);
        self.set_position(end as u64);

        Ok(slice)
    }

    fn extract_remaining(&mut self) -> Bytes {
        let remaining = self.remaining();
        // Cannot fail, we asked for exactly what is left.
        self.extract_bytes(remaining).unwrap_or_default()
    }
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn extract_bytes() {
        let mut cursor = io::Cursor::new(Bytes::from_static(&[1, 2, 3, 4, 5]));

        assert_eq!(cursor.extract_bytes(2).unwrap(), Bytes::from_static(&[1, 2]));
        assert_eq!(cursor.remaining(), 3);
        assert_eq!(cursor.extract_remaining(), Bytes::from_static(&[3, 4, 5]));
        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.extract_remaining().is_empty());
        assert!(cursor.extract_bytes(0).unwrap().is_empty());
        assert_eq!(cursor.extract_bytes(1).unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn extract_too_many() {
        let mut cursor = io::Cursor::new(Bytes::from_static(&[1, 2]));

        let err = cursor.extract_bytes(3).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        // The failed extraction must not move the cursor.
        assert_eq!(cursor.position(), 0);
    }

    #[test]
    fn position_past_end() {
        let mut cursor = io::Cursor::new(Bytes::from_static(&[1, 2]));
        cursor.set_position(10);

        assert_eq!(cursor.remaining(), 0);
        assert!(cursor.extract_remaining().is_empty());
        assert!(cursor.extract_bytes(0).unwrap().is_empty());
        assert_eq!(cursor.extract_bytes(1).unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }
}
