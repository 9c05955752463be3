//! FLV video tag header.

use std::io;

use byteorder::{BigEndian, ReadBytesExt};
use bytes::Bytes;
use nutype_enum::nutype_enum;

use crate::error::FlvError;
use crate::tag::{FlvTagType, ensure_payload_len};

nutype_enum! {
    /// FLV Frame Type
    ///
    /// This enum represents the different types of frames in a FLV file.
    ///
    /// Defined by:
    /// - Legacy FLV spec, Annex E.4.3.1
    pub enum VideoFrameType(u8) {
        /// A keyframe is a frame that is a complete representation of the video content.
        KeyFrame = 1,
        /// An interframe is a frame that is a partial representation of the video content.
        InterFrame = 2,
        /// A disposable interframe is a frame that is a partial representation of the video content, but is not required to be displayed. (h263 only)
        DisposableInterFrame = 3,
        /// A generated keyframe is a frame that is a complete representation of the video content, but is not a keyframe. (reserved for server use only)
        GeneratedKeyFrame = 4,
        /// A video info or command frame is a frame that contains video information or commands.
        Command = 5,
    }
}

nutype_enum! {
    /// FLV Video Codec ID
    ///
    /// Denotes the different types of video codecs.
    ///
    /// Defined by:
    /// - Legacy FLV spec, Annex E.4.3.1
    pub enum VideoCodecId(u8) {
        /// JPEG (currently unused)
        Jpeg = 1,
        /// Sorenson H.263
        SorensonH263 = 2,
        /// Screen Video
        ScreenVideo = 3,
        /// On2 VP6
        On2VP6 = 4,
        /// On2 VP6 with alpha channel
        On2VP6WithAlphaChannel = 5,
        /// Screen Video Version 2
        ScreenVideoVersion2 = 6,
        /// AVC (H.264)
        Avc = 7,
    }
}

nutype_enum! {
    /// FLV AVC Packet Type
    ///
    /// The AVC packet type is used to determine if the video data is a sequence
    /// header or a NALU.
    ///
    /// Defined by:
    /// - Legacy FLV spec, Annex E.4.3.1
    pub enum AvcPacketType(u8) {
        /// AVC sequence header
        SeqHdr = 0,
        /// AVC NALU
        Nalu = 1,
        /// AVC end of sequence (lower level NALU sequence ender is not required or supported)
        EndOfSequence = 2,
    }
}

/// AVC packet header
///
/// Only present when the [`VideoCodecId`] is [`VideoCodecId::Avc`].
#[derive(Debug, Clone, PartialEq)]
pub struct AvcPacketHeader {
    /// The AVC packet type.
    pub avc_packet_type: AvcPacketType,
    /// The composition time offset in milliseconds, a signed 24 bit value on the wire.
    ///
    /// Only meaningful for [`AvcPacketType::Nalu`], zero otherwise.
    pub composition_time_offset: i32,
}

impl AvcPacketHeader {
    /// Size on the wire.
    pub const SIZE: usize = 4;

    /// Demux the AVC packet header from the given reader.
    pub fn demux(reader: &mut io::Cursor<Bytes>) -> Result<Self, FlvError> {
        let avc_packet_type = AvcPacketType::from(reader.read_u8()?);
        let composition_time_offset = reader.read_i24::<BigEndian>()?;

        match avc_packet_type {
            AvcPacketType::SeqHdr | AvcPacketType::Nalu | AvcPacketType::EndOfSequence => Ok(Self {
                avc_packet_type,
                composition_time_offset,
            }),
            _ => Err(FlvError::InvalidAvcPacketType(avc_packet_type)),
        }
    }
}

/// FLV `VideoTagHeader`
///
/// Defined by:
/// - Legacy FLV spec, Annex E.4.3.1
#[derive(Debug, Clone, PartialEq)]
pub struct VideoTagHeader {
    /// The frame type of the video data. (4 bits)
    pub frame_type: VideoFrameType,
    /// The codec id of the video data. (4 bits)
    ///
    /// Codec ids without a name are kept as they are, the data still comes through.
    pub codec_id: VideoCodecId,
    /// The AVC packet header, only set for [`VideoCodecId::Avc`].
    pub avc_packet: Option<AvcPacketHeader>,
}

impl VideoTagHeader {
    /// Demux the video tag header from the given reader.
    ///
    /// Reads one byte, or five for AVC.
    pub fn demux(reader: &mut io::Cursor<Bytes>) -> Result<Self, FlvError> {
        let start = reader.position();
        ensure_payload_len(reader, start, FlvTagType::Video, 1)?;
        let first_byte = reader.read_u8()?;
        let frame_type = VideoFrameType::from(first_byte >> 4); // 0b1111_0000
        let codec_id = VideoCodecId::from(first_byte & 0b0000_1111);

        let avc_packet = if codec_id == VideoCodecId::Avc {
            ensure_payload_len(reader, start, FlvTagType::Video, 1 + AvcPacketHeader::SIZE)?;
            Some(AvcPacketHeader::demux(reader)?)
        } else {
            None
        };

        Ok(Self {
            frame_type,
            codec_id,
            avc_packet,
        })
    }
}
