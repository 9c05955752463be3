//! Error types.

use crate::audio::header::AacPacketType;
use crate::tag::FlvTagType;
use crate::video::header::AvcPacketType;

/// Error type for FLV processing.
///
/// Errors come in two kinds, see [`FlvError::is_fatal`]. A fatal error means the
/// framing of the stream can no longer be trusted. Every other error only concerns the
/// payload of a single tag, the decoder has already moved past that tag and the next call
/// starts at the following tag header.
#[derive(Debug, thiserror::Error)]
pub enum FlvError {
    /// IO error from the underlying source.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    /// The FLV signature (magic bytes) is invalid.
    #[error("invalid signature in header: 0x{0:06x}")]
    InvalidSignature(u32),
    /// The data offset in the FLV header is smaller than the header itself.
    #[error("invalid data offset: {0}")]
    InvalidDataOffset(u32),
    /// The source ended inside a fixed size structure.
    #[error("truncated {what}: expected {expected} bytes, got {read}")]
    Truncated {
        /// The structure that was being read.
        what: &'static str,
        /// The number of bytes the structure needs.
        expected: usize,
        /// The number of bytes the source delivered.
        read: usize,
    },
    /// The tag type byte is not audio, video or script data.
    #[error("unknown tag type: {0}")]
    UnknownTagType(u8),
    /// The payload is too short to hold its own header.
    #[error("{tag_type:?} payload too short: expected at least {expected} bytes, got {available}")]
    ShortPayload {
        /// The type of the tag carrying the payload.
        tag_type: FlvTagType,
        /// The number of bytes the payload header needs.
        expected: usize,
        /// The size of the payload.
        available: usize,
    },
    /// The AAC packet type is neither a sequence header nor raw data.
    #[error("invalid aac packet type: {0:?}")]
    InvalidAacPacketType(AacPacketType),
    /// The AVC packet type is not a sequence header, NALU or end of sequence.
    #[error("invalid avc packet type: {0:?}")]
    InvalidAvcPacketType(AvcPacketType),
    /// A script data entry does not start with an AMF0 string key.
    #[error("script data key is not a string")]
    InvalidScriptKey,
    /// AMF0 error.
    #[error("amf0: {0}")]
    Amf0(#[from] flvkit_amf0::Amf0Error),
}

impl FlvError {
    /// Whether decoding cannot continue after this error.
    ///
    /// Fatal errors come from the container framing itself (header, tag header, payload
    /// extent). Payload interpretation errors are never fatal because the payload extent
    /// is consumed in full before it is interpreted.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FlvError::Io(_) | FlvError::InvalidSignature(_) | FlvError::InvalidDataOffset(_) | FlvError::Truncated { .. }
        )
    }
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use flvkit_amf0::Amf0Error;

    use super::*;

    #[test]
    fn fatal_classification() {
        let fatal = [
            FlvError::Io(std::io::Error::other("boom")),
            FlvError::InvalidSignature(0x464c55),
            FlvError::InvalidDataOffset(3),
            FlvError::Truncated {
                what: "tag header",
                expected: 11,
                read: 4,
            },
        ];

        for err in fatal {
            assert!(err.is_fatal(), "{err}");
        }

        let recoverable = [
            FlvError::UnknownTagType(7),
            FlvError::ShortPayload {
                tag_type: FlvTagType::Audio,
                expected: 1,
                available: 0,
            },
            FlvError::InvalidAacPacketType(AacPacketType(2)),
            FlvError::InvalidAvcPacketType(AvcPacketType(3)),
            FlvError::InvalidScriptKey,
            FlvError::Amf0(Amf0Error::UnsupportedMarker(0xff)),
        ];

        for err in recoverable {
            assert!(!err.is_fatal(), "{err}");
        }
    }

    #[test]
    fn display() {
        assert_eq!(
            FlvError::InvalidSignature(0x464c55).to_string(),
            "invalid signature in header: 0x464c55"
        );
        assert_eq!(
            FlvError::ShortPayload {
                tag_type: FlvTagType::Video,
                expected: 5,
                available: 2,
            }
            .to_string(),
            "Video payload too short: expected at least 5 bytes, got 2"
        );
        assert_eq!(
            FlvError::Amf0(Amf0Error::UnsupportedMarker(0xff)).to_string(),
            "amf0: unsupported marker: 0xff"
        );
    }
}
