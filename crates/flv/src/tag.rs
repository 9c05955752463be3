//! FLV tag processing

use std::io;

use byteorder::{BigEndian, ReadBytesExt};
use bytes::Bytes;

use crate::audio::AudioData;
use crate::error::FlvError;
use crate::script::ScriptData;
use crate::video::VideoData;

/// FLV Tag Type
///
/// This is the type of the tag.
///
/// Defined by:
/// - video_file_format_spec_v10.pdf (Chapter 1 - The FLV File Format - FLV tags)
/// - video_file_format_spec_v10_1.pdf (Annex E.4.1 - FLV Tag)
///
/// The closed set of tag types, any other byte is reported as
/// [`FlvError::UnknownTagType`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FlvTagType {
    /// [`AudioData`]
    Audio = 8,
    /// [`VideoData`]
    Video = 9,
    /// [`ScriptData`]
    ScriptData = 18,
}

impl FlvTagType {
    /// Human readable name of the tag type.
    pub const fn name(self) -> &'static str {
        match self {
            FlvTagType::Audio => "audio",
            FlvTagType::Video => "video",
            FlvTagType::ScriptData => "script data",
        }
    }
}

impl TryFrom<u8> for FlvTagType {
    type Error = FlvError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            8 => Ok(FlvTagType::Audio),
            9 => Ok(FlvTagType::Video),
            18 => Ok(FlvTagType::ScriptData),
            _ => Err(FlvError::UnknownTagType(value)),
        }
    }
}

impl From<FlvTagType> for u8 {
    fn from(value: FlvTagType) -> Self {
        value as u8
    }
}

/// The fixed size part in front of every tag.
///
/// Defined by:
/// - video_file_format_spec_v10_1.pdf (Annex E.4.1 - FLV Tag)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlvTagHeader {
    /// The raw tag type byte, see [`FlvTagType`].
    ///
    /// The `Filter` and reserved bits are not masked off, a tag with them set is
    /// reported as an unknown type.
    pub tag_type: u8,
    /// The size of the payload in bytes. (24 bits)
    pub data_size: u32,
    /// The timestamp in milliseconds, `TimestampExtended` already folded in as the upper 8 bits.
    pub timestamp_ms: u32,
    /// The stream id, always 0 in practice. (24 bits)
    pub stream_id: u32,
}

impl FlvTagHeader {
    /// Size on the wire.
    pub const SIZE: usize = 11;

    /// Demux a tag header from the given reader.
    pub fn demux<R: io::Read>(reader: &mut R) -> io::Result<Self> {
        let tag_type = reader.read_u8()?;
        let data_size = reader.read_u24::<BigEndian>()?;
        // The timestamp bit is weird. Its 24bits but then there is an extended 8 bit
        // number to create a 32bit number.
        let timestamp_ms = reader.read_u24::<BigEndian>()? | ((reader.read_u8()? as u32) << 24);
        let stream_id = reader.read_u24::<BigEndian>()?;

        Ok(FlvTagHeader {
            tag_type,
            data_size,
            timestamp_ms,
            stream_id,
        })
    }

    /// The value the `PreviousTagSize` field following this tag should carry.
    pub fn tag_size(&self) -> u32 {
        Self::SIZE as u32 + self.data_size
    }
}

/// An FLV Tag
///
/// Tags have different types and thus different data structures. To accommodate
/// this the [`FlvTagData`] enum is used.
///
/// Defined by:
/// - video_file_format_spec_v10.pdf (Chapter 1 - The FLV File Format - FLV tags)
/// - video_file_format_spec_v10_1.pdf (Annex E.4.1 - FLV Tag)
#[derive(Debug, Clone, PartialEq)]
pub struct FlvTag {
    /// The header the tag was read with.
    pub header: FlvTagHeader,
    /// The payload, its variant always matches [`FlvTag::tag_type`].
    pub data: FlvTagData,
}

impl FlvTag {
    /// The type of the tag.
    pub fn tag_type(&self) -> FlvTagType {
        self.data.tag_type()
    }

    /// The timestamp in milliseconds.
    pub fn timestamp_ms(&self) -> u32 {
        self.header.timestamp_ms
    }

    /// The stream id.
    pub fn stream_id(&self) -> u32 {
        self.header.stream_id
    }

    /// The size of the payload on the wire.
    pub fn data_size(&self) -> u32 {
        self.header.data_size
    }
}

/// FLV Tag Data
///
/// This is a container for the actual media data.
/// This enum contains the data for the different types of tags.
///
/// Defined by:
/// - video_file_format_spec_v10.pdf (Chapter 1 - The FLV File Format - FLV tags)
/// - video_file_format_spec_v10_1.pdf (Annex E.4.1 - FLV Tag)
#[derive(Debug, Clone, PartialEq)]
pub enum FlvTagData {
    /// AudioData when the FlvTagType is Audio(8)
    ///
    /// Defined by:
    /// - video_file_format_spec_v10.pdf (Chapter 1 - The FLV File Format - Audio tags)
    /// - video_file_format_spec_v10_1.pdf (Annex E.4.2.1 - AUDIODATA)
    Audio(AudioData),
    /// VideoData when the FlvTagType is Video(9)
    ///
    /// Defined by:
    /// - video_file_format_spec_v10.pdf (Chapter 1 - The FLV File Format - Video tags)
    /// - video_file_format_spec_v10_1.pdf (Annex E.4.3.1 - VIDEODATA)
    Video(VideoData),
    /// ScriptData when the FlvTagType is ScriptData(18)
    ///
    /// Defined by:
    /// - video_file_format_spec_v10.pdf (Chapter 1 - The FLV File Format - Data tags)
    /// - video_file_format_spec_v10_1.pdf (Annex E.4.4.1 - SCRIPTDATA)
    ScriptData(ScriptData),
}

impl FlvTagData {
    /// The tag type this payload belongs to.
    pub fn tag_type(&self) -> FlvTagType {
        match self {
            FlvTagData::Audio(_) => FlvTagType::Audio,
            FlvTagData::Video(_) => FlvTagType::Video,
            FlvTagData::ScriptData(_) => FlvTagType::ScriptData,
        }
    }

    /// Demux a payload of the given type.
    ///
    /// `payload` is the complete extent announced by the tag header, the payload
    /// decoders never see anything outside of it.
    pub fn demux(tag_type: FlvTagType, payload: Bytes) -> Result<Self, FlvError> {
        let mut reader = io::Cursor::new(payload);

        match tag_type {
            FlvTagType::Audio => Ok(FlvTagData::Audio(AudioData::demux(&mut reader)?)),
            FlvTagType::Video => Ok(FlvTagData::Video(VideoData::demux(&mut reader)?)),
            FlvTagType::ScriptData => Ok(FlvTagData::ScriptData(ScriptData::demux(&mut reader)?)),
        }
    }
}

/// Fails with [`FlvError::ShortPayload`] unless the payload behind `reader` holds at
/// least `expected` bytes counted from `start`.
pub(crate) fn ensure_payload_len(
    reader: &io::Cursor<Bytes>,
    start: u64,
    tag_type: FlvTagType,
    expected: usize,
) -> Result<(), FlvError> {
    let available = reader.get_ref().len().saturating_sub(start as usize);
    if available < expected {
        return Err(FlvError::ShortPayload {
            tag_type,
            expected,
            available,
        });
    }

    Ok(())
}
