//! FLV file header.

use std::io;

use byteorder::{BigEndian, ReadBytesExt};
use bytes::Bytes;
use flvkit_bytes_util::{Fill, ReadFillExt};

use crate::error::FlvError;

/// Content flags of the [`FlvHeader`].
///
/// Bits other than these two are reserved and kept as they were read.
#[bitmask_enum::bitmask(u8)]
pub enum FlvHeaderFlags {
    /// Video tags are present
    Video = 0b0000_0001,
    /// Audio tags are present
    Audio = 0b0000_0100,
}

/// The FLV header
/// Whenever a FLV file is read these are the first 9 bytes of the file.
///
/// Defined by:
/// - video_file_format_spec_v10.pdf (Chapter 1 - The FLV Header - Page 8)
/// - video_file_format_spec_v10_1.pdf (Annex E.2 - The FLV Header)
#[derive(Debug, Clone, PartialEq)]
pub struct FlvHeader {
    /// The version of the FLV file.
    pub version: u8,
    /// The content flags, not checked against the tags that actually follow.
    pub flags: FlvHeaderFlags,
    /// The total size of the header, including [`FlvHeader::extra`].
    pub data_offset: u32,
    /// The extra data in the FLV header.
    ///
    /// Since the header provides a data offset, this is the remaining bytes after the DataOffset field
    /// to the end of the header.
    pub extra: Bytes,
}

impl FlvHeader {
    /// `F`, `L`, `V`
    pub const SIGNATURE: [u8; 3] = *b"FLV";
    /// Size of the fixed part of the header, and the smallest valid data offset.
    pub const SIZE: usize = 9;

    /// Whether the header announces audio tags.
    pub fn is_audio_present(&self) -> bool {
        self.flags.contains(FlvHeaderFlags::Audio)
    }

    /// Whether the header announces video tags.
    pub fn is_video_present(&self) -> bool {
        self.flags.contains(FlvHeaderFlags::Video)
    }

    /// Demux the FLV header from the given reader.
    ///
    /// Consumes exactly [`FlvHeader::data_offset`] bytes, the reader is left at the
    /// first `PreviousTagSize` field.
    pub fn demux<R: io::Read>(reader: &mut R) -> Result<Self, FlvError> {
        let mut buf = [0; Self::SIZE];
        match reader.fill_or_eof(&mut buf)? {
            Fill::Full => {}
            Fill::Eof => return Err(truncated(Self::SIZE, 0)),
            Fill::Partial(read) => return Err(truncated(Self::SIZE, read)),
        }

        let mut cursor = &buf[..];

        let signature = cursor.read_u24::<BigEndian>()?;

        if signature.to_be_bytes()[1..] != Self::SIGNATURE {
            return Err(FlvError::InvalidSignature(signature));
        }

        let version = cursor.read_u8()?;
        let flags = FlvHeaderFlags::from(cursor.read_u8()?);
        let data_offset = cursor.read_u32::<BigEndian>()?;

        let remaining = (data_offset as usize)
            .checked_sub(Self::SIZE)
            .ok_or(FlvError::InvalidDataOffset(data_offset))?;

        let (fill, extra) = reader.read_extent(remaining)?;
        if fill != Fill::Full {
            return Err(truncated(data_offset as usize, Self::SIZE + extra.len()));
        }

        if !extra.is_empty() {
            tracing::debug!(extra = extra.len(), "flv header carries extra bytes");
        }

        Ok(FlvHeader {
            version,
            flags,
            data_offset,
            extra,
        })
    }
}

fn truncated(expected: usize, read: usize) -> FlvError {
    FlvError::Truncated {
        what: "file header",
        expected,
        read,
    }
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn demux() {
        let bytes = [b'F', b'L', b'V', 1, 0b0000_0101, 0, 0, 0, 9, 0xaa];
        let mut reader = io::Cursor::new(bytes);

        let header = FlvHeader::demux(&mut reader).unwrap();
        assert_eq!(header.version, 1);
        assert!(header.is_audio_present());
        assert!(header.is_video_present());
        assert_eq!(header.data_offset, 9);
        assert!(header.extra.is_empty());
        assert_eq!(reader.position(), 9);
    }

    #[test]
    fn flags_are_opaque() {
        let bytes = [b'F', b'L', b'V', 7, 0b1111_0000, 0, 0, 0, 9];

        let header = FlvHeader::demux(&mut io::Cursor::new(bytes)).unwrap();
        assert_eq!(header.version, 7);
        assert!(!header.is_audio_present());
        assert!(!header.is_video_present());
        assert_eq!(header.flags.bits(), 0b1111_0000);
    }

    #[test]
    fn extra_bytes_are_skipped() {
        let bytes = [b'F', b'L', b'V', 1, 0b0000_0100, 0, 0, 0, 12, 1, 2, 3, 0xaa];
        let mut reader = io::Cursor::new(bytes);

        let header = FlvHeader::demux(&mut reader).unwrap();
        assert!(header.is_audio_present());
        assert!(!header.is_video_present());
        assert_eq!(header.data_offset, 12);
        assert_eq!(header.extra, Bytes::from_static(&[1, 2, 3]));
        assert_eq!(reader.position(), 12);
    }

    #[test]
    fn invalid_signature() {
        let bytes = [b'F', b'L', b'X', 1, 5, 0, 0, 0, 9];

        let err = FlvHeader::demux(&mut io::Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, FlvError::InvalidSignature(0x464c58)));
        assert!(err.is_fatal());
    }

    #[test]
    fn invalid_data_offset() {
        let bytes = [b'F', b'L', b'V', 1, 5, 0, 0, 0, 8];

        let err = FlvHeader::demux(&mut io::Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, FlvError::InvalidDataOffset(8)));
    }

    #[test]
    fn truncated_fixed_part() {
        let err = FlvHeader::demux(&mut io::Cursor::new([b'F', b'L', b'V', 1])).unwrap_err();
        assert!(matches!(
            err,
            FlvError::Truncated {
                what: "file header",
                expected: 9,
                read: 4
            }
        ));

        let err = FlvHeader::demux(&mut io::empty()).unwrap_err();
        assert!(matches!(err, FlvError::Truncated { read: 0, .. }));
    }

    #[test]
    fn truncated_extra() {
        let bytes = [b'F', b'L', b'V', 1, 5, 0, 0, 0, 16, 1, 2];

        let err = FlvHeader::demux(&mut io::Cursor::new(bytes)).unwrap_err();
        assert!(matches!(
            err,
            FlvError::Truncated {
                what: "file header",
                expected: 16,
                read: 11
            }
        ));
    }
}
