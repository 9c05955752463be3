//! FLV video processing
//!
//! Use [`VideoData`] to demux the payload of a video tag.

use std::io;

use bytes::Bytes;
use flvkit_bytes_util::BytesCursorExt;
use header::VideoTagHeader;

use crate::error::FlvError;

pub mod header;

/// FLV `VIDEODATA` tag
///
/// Defined by:
/// - video_file_format_spec_v10.pdf (Chapter 1 - The FLV File Format - Video tags)
/// - video_file_format_spec_v10_1.pdf (Annex E.4.3.1 - VIDEODATA)
#[derive(Debug, Clone, PartialEq)]
pub struct VideoData {
    /// The header of the video data.
    pub header: VideoTagHeader,
    /// The codec data following the header.
    ///
    /// For AVC this is an `AVCDecoderConfigurationRecord` or length prefixed NALUs,
    /// depending on the packet type. Not interpreted any further.
    pub data: Bytes,
}

impl VideoData {
    /// Demux video data from the given reader.
    ///
    /// The reader will be entirely consumed.
    pub fn demux(reader: &mut io::Cursor<Bytes>) -> Result<Self, FlvError> {
        let header = VideoTagHeader::demux(reader)?;
        let data = reader.extract_remaining();

        Ok(VideoData { header, data })
    }

    /// A reader over [`VideoData::data`].
    pub fn reader(&self) -> impl io::Read + '_ {
        &self.data[..]
    }
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use std::io::Read;

    use super::*;
    use crate::video::header::{AvcPacketType, VideoCodecId, VideoFrameType};

    #[test]
    fn demux_avc_nalu() {
        #[rustfmt::skip]
        let bytes = [
            0x17, // key frame, avc
            0x01, // nalu
            0x00, 0x00, 0x21, // composition time
            0x00, 0x00, 0x00, 0x02, 0x09, 0xf0,
        ];
        let mut reader = io::Cursor::new(Bytes::copy_from_slice(&bytes));

        let video = VideoData::demux(&mut reader).unwrap();
        insta::assert_debug_snapshot!(video, @r#"
        VideoData {
            header: VideoTagHeader {
                frame_type: VideoFrameType::KeyFrame,
                codec_id: VideoCodecId::Avc,
                avc_packet: Some(
                    AvcPacketHeader {
                        avc_packet_type: AvcPacketType::Nalu,
                        composition_time_offset: 33,
                    },
                ),
            },
            data: b"\0\0\0\x02\t\xf0",
        }
        "#);
    }

    #[test]
    fn demux_opaque_codec() {
        let mut reader = io::Cursor::new(Bytes::from_static(&[0x01, 0x02, 0x03, 0x04, 0x05]));

        let video = VideoData::demux(&mut reader).unwrap();
        assert_eq!(video.header.frame_type, VideoFrameType(0));
        assert_eq!(video.header.codec_id, VideoCodecId::Jpeg);
        assert_eq!(video.header.avc_packet, None);

        let mut read = Vec::new();
        video.reader().read_to_end(&mut read).unwrap();
        assert_eq!(read, [0x02, 0x03, 0x04, 0x05]);
    }

    #[test]
    fn demux_end_of_sequence() {
        let mut reader = io::Cursor::new(Bytes::from_static(&[0x17, 0x02, 0x00, 0x00, 0x00]));

        let video = VideoData::demux(&mut reader).unwrap();
        assert_eq!(
            video.header.avc_packet.map(|p| p.avc_packet_type),
            Some(AvcPacketType::EndOfSequence)
        );
        assert!(video.data.is_empty());
    }
}
