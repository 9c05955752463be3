//! FLV audio tag header.

use std::io;

use byteorder::ReadBytesExt;
use bytes::Bytes;
use nutype_enum::nutype_enum;

use crate::error::FlvError;
use crate::tag::{FlvTagType, ensure_payload_len};

nutype_enum! {
    /// FLV Sound Format
    ///
    /// Denotes the type of the underlying data packet
    ///
    /// Defined by:
    /// - video_file_format_spec_v10.pdf (Chapter 1 - The FLV File Format - Audio tags)
    /// - video_file_format_spec_v10_1.pdf (Annex E.4.2.1 - AUDIODATA)
    pub enum SoundFormat(u8) {
        /// Linear PCM, platform endian
        LinearPcmPlatformEndian = 0,
        /// ADPCM
        Adpcm = 1,
        /// MP3
        Mp3 = 2,
        /// Linear PCM, little endian
        LinearPcmLittleEndian = 3,
        /// Nellymoser 16Khz Mono
        Nellymoser16KhzMono = 4,
        /// Nellymoser 8Khz Mono
        Nellymoser8KhzMono = 5,
        /// Nellymoser
        Nellymoser = 6,
        /// G.711 A-Law logarithmic PCM
        G711ALaw = 7,
        /// G.711 Mu-Law logarithmic PCM
        G711MuLaw = 8,
        /// Reserved
        Reserved = 9,
        /// AAC
        Aac = 10,
        /// Speex
        Speex = 11,
        /// Mp3 8Khz
        Mp38Khz = 14,
        /// Device specific sound
        DeviceSpecificSound = 15,
    }
}

nutype_enum! {
    /// FLV Sound Rate
    ///
    /// Denotes the sampling rate of the audio data.
    ///
    /// Defined by:
    /// - video_file_format_spec_v10.pdf (Chapter 1 - The FLV File Format - Audio tags)
    /// - video_file_format_spec_v10_1.pdf (Annex E.4.2.1 - AUDIODATA)
    pub enum SoundRate(u8) {
        /// 5.5 KHz
        Hz5500 = 0,
        /// 11 KHz
        Hz11000 = 1,
        /// 22 KHz
        Hz22000 = 2,
        /// 44 KHz
        Hz44000 = 3,
    }
}

nutype_enum! {
    /// FLV Sound Size
    ///
    /// Denotes the size of each sample in the audio data.
    ///
    /// Defined by:
    /// - video_file_format_spec_v10.pdf (Chapter 1 - The FLV File Format - Audio tags)
    /// - video_file_format_spec_v10_1.pdf (Annex E.4.2.1 - AUDIODATA)
    pub enum SoundSize(u8) {
        /// 8 bit
        Bit8 = 0,
        /// 16 bit
        Bit16 = 1,
    }
}

nutype_enum! {
    /// FLV Sound Type
    ///
    /// Denotes the number of channels in the audio data.
    ///
    /// Defined by:
    /// - video_file_format_spec_v10.pdf (Chapter 1 - The FLV File Format - Audio tags)
    /// - video_file_format_spec_v10_1.pdf (Annex E.4.2.1 - AUDIODATA)
    pub enum SoundType(u8) {
        /// Mono
        Mono = 0,
        /// Stereo
        Stereo = 1,
    }
}

nutype_enum! {
    /// FLV `AACPacketType`
    ///
    /// Only present when the [`SoundFormat`] is [`SoundFormat::Aac`].
    ///
    /// Defined by:
    /// - Legacy FLV spec, Annex E.4.2.1
    pub enum AacPacketType(u8) {
        /// Sequence Header
        SequenceHeader = 0,
        /// Raw
        Raw = 1,
    }
}

/// The FLV `AudioTagHeader`.
///
/// Defined by video_file_format_spec_v10_1.pdf (Annex E.4.2.1 - AUDIODATA).
#[derive(Debug, Clone, PartialEq)]
pub struct AudioTagHeader {
    /// The sound format of the audio data. (4 bits)
    pub sound_format: SoundFormat,
    /// The sound rate of the audio data. (2 bits)
    pub sound_rate: SoundRate,
    /// The sound size of the audio data. (1 bit)
    pub sound_size: SoundSize,
    /// The sound type of the audio data. (1 bit)
    pub sound_type: SoundType,
    /// The AAC packet type, only set for [`SoundFormat::Aac`].
    pub aac_packet_type: Option<AacPacketType>,
}

impl AudioTagHeader {
    /// Demux the audio tag header from the given reader.
    ///
    /// Reads one byte, or two for AAC.
    #[allow(clippy::unusual_byte_groupings)]
    pub fn demux(reader: &mut io::Cursor<Bytes>) -> Result<Self, FlvError> {
        let start = reader.position();
        ensure_payload_len(reader, start, FlvTagType::Audio, 1)?;
        let byte = reader.read_u8()?;

        // SoundFormat is the first 4 bits of the byte
        let sound_format = SoundFormat::from(byte >> 4); // 0b1111_00_0_0
        // SoundRate is the next 2 bits of the byte
        let sound_rate = SoundRate::from((byte & 0b0000_11_0_0) >> 2);
        // SoundSize is the next bit of the byte
        let sound_size = SoundSize::from((byte & 0b0000_00_1_0) >> 1);
        // SoundType is the last bit of the byte
        let sound_type = SoundType::from(byte & 0b0000_00_0_1);

        let aac_packet_type = if sound_format == SoundFormat::Aac {
            ensure_payload_len(reader, start, FlvTagType::Audio, 2)?;
            let aac_packet_type = AacPacketType::from(reader.read_u8()?);

            match aac_packet_type {
                AacPacketType::SequenceHeader | AacPacketType::Raw => Some(aac_packet_type),
                _ => return Err(FlvError::InvalidAacPacketType(aac_packet_type)),
            }
        } else {
            None
        };

        Ok(Self {
            sound_format,
            sound_rate,
            sound_size,
            sound_type,
            aac_packet_type,
        })
    }
}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use super::*;

    fn demux(bytes: &'static [u8]) -> Result<AudioTagHeader, FlvError> {
        AudioTagHeader::demux(&mut io::Cursor::new(Bytes::from_static(bytes)))
    }

    #[test]
    #[allow(clippy::unusual_byte_groupings)]
    fn bit_fields() {
        // Mp3, 44KHz, 16 bit, stereo
        let header = demux(&[0b0010_11_1_1]).unwrap();
        assert_eq!(header.sound_format, SoundFormat::Mp3);
        assert_eq!(header.sound_rate, SoundRate::Hz44000);
        assert_eq!(header.sound_size, SoundSize::Bit16);
        assert_eq!(header.sound_type, SoundType::Stereo);
        assert_eq!(header.aac_packet_type, None);

        // Speex, 5.5KHz, 8 bit, mono
        let header = demux(&[0b1011_00_0_0]).unwrap();
        assert_eq!(header.sound_format, SoundFormat::Speex);
        assert_eq!(header.sound_rate, SoundRate::Hz5500);
        assert_eq!(header.sound_size, SoundSize::Bit8);
        assert_eq!(header.sound_type, SoundType::Mono);
    }

    #[test]
    fn aac_packet_types() {
        let header = demux(&[0xaf, 0x00]).unwrap();
        assert_eq!(header.sound_format, SoundFormat::Aac);
        assert_eq!(header.aac_packet_type, Some(AacPacketType::SequenceHeader));

        let header = demux(&[0xaf, 0x01]).unwrap();
        assert_eq!(header.aac_packet_type, Some(AacPacketType::Raw));

        let err = demux(&[0xaf, 0x02]).unwrap_err();
        assert!(matches!(err, FlvError::InvalidAacPacketType(AacPacketType(2))));
        assert!(!err.is_fatal());
    }

    #[test]
    fn short_payload() {
        let err = demux(&[]).unwrap_err();
        assert!(matches!(
            err,
            FlvError::ShortPayload {
                tag_type: FlvTagType::Audio,
                expected: 1,
                available: 0
            }
        ));

        let err = demux(&[0xaf]).unwrap_err();
        assert!(matches!(
            err,
            FlvError::ShortPayload {
                tag_type: FlvTagType::Audio,
                expected: 2,
                available: 1
            }
        ));
    }

    #[test]
    fn short_payload_after_cursor_start() {
        let mut reader = io::Cursor::new(Bytes::from_static(&[0x00, 0xaf]));
        reader.set_position(1);

        let err = AudioTagHeader::demux(&mut reader).unwrap_err();
        assert!(matches!(
            err,
            FlvError::ShortPayload {
                tag_type: FlvTagType::Audio,
                expected: 2,
                available: 1
            }
        ));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_sound_format() {
        let cases = [
            (
                0x00,
                SoundFormat::LinearPcmPlatformEndian,
                "SoundFormat::LinearPcmPlatformEndian",
            ),
            (0x01, SoundFormat::Adpcm, "SoundFormat::Adpcm"),
            (0x02, SoundFormat::Mp3, "SoundFormat::Mp3"),
            (0x03, SoundFormat::LinearPcmLittleEndian, "SoundFormat::LinearPcmLittleEndian"),
            (0x04, SoundFormat::Nellymoser16KhzMono, "SoundFormat::Nellymoser16KhzMono"),
            (0x05, SoundFormat::Nellymoser8KhzMono, "SoundFormat::Nellymoser8KhzMono"),
            (0x06, SoundFormat::Nellymoser, "SoundFormat::Nellymoser"),
            (0x07, SoundFormat::G711ALaw, "SoundFormat::G711ALaw"),
            (0x08, SoundFormat::G711MuLaw, "SoundFormat::G711MuLaw"),
            (0x09, SoundFormat::Reserved, "SoundFormat::Reserved"),
            (0x0A, SoundFormat::Aac, "SoundFormat::Aac"),
            (0x0B, SoundFormat::Speex, "SoundFormat::Speex"),
            (0x0E, SoundFormat::Mp38Khz, "SoundFormat::Mp38Khz"),
            (0x0F, SoundFormat::DeviceSpecificSound, "SoundFormat::DeviceSpecificSound"),
        ];

        for (value, expected, name) in cases {
            let sound_format = SoundFormat::from(value);
            assert_eq!(sound_format, expected);
            assert_eq!(format!("{:?}", sound_format), name);
        }

        // Values without a name still come through.
        assert_eq!(format!("{:?}", SoundFormat::from(0x0C)), "SoundFormat(12)");
    }

    #[test]
    fn test_aac_packet_type() {
        assert_eq!(
            format!("{:?}", AacPacketType::SequenceHeader),
            "AacPacketType::SequenceHeader"
        );
        assert_eq!(format!("{:?}", AacPacketType::Raw), "AacPacketType::Raw");
        assert_eq!(format!("{:?}", AacPacketType(0x2)), "AacPacketType(2)");
    }
}
