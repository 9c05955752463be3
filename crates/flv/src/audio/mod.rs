//! FLV audio processing
//!
//! Use [`AudioData`] to demux the payload of an audio tag.

use std::io;

use bytes::Bytes;
use flvkit_bytes_util::BytesCursorExt;
use header::AudioTagHeader;

use crate::error::FlvError;

pub mod header;

/// FLV `AUDIODATA` tag
///
/// Defined by:
/// - Legacy FLV spec, Annex E.4.2.1
#[derive(Debug, Clone, PartialEq)]
pub struct AudioData {
    /// The header of the audio data.
    pub header: AudioTagHeader,
    /// The codec frame following the header, not interpreted any further.
    ///
    /// For AAC this is either the `AudioSpecificConfig` or a raw AAC frame,
    /// depending on [`AudioTagHeader::aac_packet_type`].
    pub data: Bytes,
}

impl AudioData {
    /// Demux audio data from a given reader.
    ///
    /// The reader will be entirely consumed.
    pub fn demux(reader: &mut io::Cursor<Bytes>) -> Result<Self, FlvError> {
        let header = AudioTagHeader::demux(reader)?;
        let data = reader.extract_remaining();

        Ok(AudioData { header, data })
    }

    /// A reader over [`AudioData::data`].
    ///
    /// Reading is optional, the bytes were already taken off the stream and are
    /// released when the tag is dropped.
    pub fn reader(&self) -> impl io::Read + '_ {
        &self.data[..]
    }
}
