//! FLV stream decoding
//!
//! [`FlvDecoder`] walks a byte stream tag by tag. Each tag's payload is read in full
//! before it is interpreted, so a payload that fails to decode costs exactly one
//! [`FlvDecoder::decode_next`] call and the following call starts at the next tag header.

use std::io;
use std::iter::FusedIterator;

use flvkit_bytes_util::{Fill, ReadFillExt};

use crate::error::FlvError;
use crate::header::FlvHeader;
use crate::tag::{FlvTag, FlvTagData, FlvTagHeader, FlvTagType};

/// Size of the `PreviousTagSize` field following the header and every tag.
const PREVIOUS_TAG_SIZE: usize = 4;

/// Sequential FLV decoder over any [`io::Read`].
///
/// The source is only read forward and never buffered past the tag being decoded.
#[derive(Debug)]
pub struct FlvDecoder<R> {
    reader: R,
    header: FlvHeader,
    position: u64,
    finished: bool,
}

impl<R> FlvDecoder<R>
where
    R: io::Read,
{
    /// Create a new decoder, reading the [`FlvHeader`] and the first
    /// `PreviousTagSize` field from `reader`.
    ///
    /// A stream that ends right after the header is valid and has no tags.
    pub fn new(mut reader: R) -> Result<Self, FlvError> {
        let header = FlvHeader::demux(&mut reader)?;
        let mut position = header.data_offset as u64;
        let mut finished = false;

        let mut buf = [0; PREVIOUS_TAG_SIZE];
        match reader.fill_or_eof(&mut buf)? {
            Fill::Full => position += PREVIOUS_TAG_SIZE as u64,
            Fill::Eof => {
                tracing::debug!("flv stream ends after the header");
                finished = true;
            }
            Fill::Partial(read) => {
                return Err(FlvError::Truncated {
                    what: "previous tag size",
                    expected: PREVIOUS_TAG_SIZE,
                    read,
                });
            }
        }

        Ok(Self {
            reader,
            header,
            position,
            finished,
        })
    }

    /// Decode the next tag.
    ///
    /// Returns `Ok(None)` once the stream ended at a tag boundary. A non fatal error
    /// (see [`FlvError::is_fatal`]) only concerns the tag that was just skipped, calling
    /// this again continues with the next tag. After a fatal error this always
    /// returns `Ok(None)`.
    pub fn decode_next(&mut self) -> Result<Option<FlvTag>, FlvError> {
        if self.finished {
            return Ok(None);
        }

        match self.read_tag() {
            Err(err) if err.is_fatal() => {
                tracing::warn!(position = self.position, error = %err, "flv stream is no longer decodable");
                self.finished = true;
                Err(err)
            }
            result => result,
        }
    }

    fn read_tag(&mut self) -> Result<Option<FlvTag>, FlvError> {
        let offset = self.position;

        let mut buf = [0; FlvTagHeader::SIZE];
        match self.reader.fill_or_eof(&mut buf)? {
            Fill::Full => self.position += FlvTagHeader::SIZE as u64,
            Fill::Eof => {
                self.finished = true;
                return Ok(None);
            }
            Fill::Partial(read) => {
                self.position += read as u64;
                return Err(FlvError::Truncated {
                    what: "tag header",
                    expected: FlvTagHeader::SIZE,
                    read,
                });
            }
        }

        let header = FlvTagHeader::demux(&mut &buf[..])?;

        // The whole extent is taken off the stream before anything looks at it.
        let (fill, payload) = self.reader.read_extent(header.data_size as usize)?;
        self.position += payload.len() as u64;
        if fill != Fill::Full {
            return Err(FlvError::Truncated {
                what: "tag payload",
                expected: header.data_size as usize,
                read: payload.len(),
            });
        }

        self.read_previous_tag_size(&header)?;

        let data = FlvTagType::try_from(header.tag_type).and_then(|tag_type| FlvTagData::demux(tag_type, payload));

        match data {
            Ok(data) => {
                tracing::trace!(
                    offset,
                    tag_type = data.tag_type().name(),
                    data_size = header.data_size,
                    timestamp_ms = header.timestamp_ms,
                    "decoded flv tag"
                );
                Ok(Some(FlvTag { header, data }))
            }
            Err(err) => {
                tracing::warn!(
                    offset,
                    tag_type = header.tag_type,
                    data_size = header.data_size,
                    error = %err,
                    "skipping malformed flv tag"
                );
                Err(err)
            }
        }
    }

    fn read_previous_tag_size(&mut self, header: &FlvTagHeader) -> Result<(), FlvError> {
        let mut buf = [0; PREVIOUS_TAG_SIZE];
        match self.reader.fill_or_eof(&mut buf)? {
            Fill::Full => {
                self.position += PREVIOUS_TAG_SIZE as u64;

                let previous_tag_size = u32::from_be_bytes(buf);
                if previous_tag_size != header.tag_size() {
                    tracing::trace!(
                        expected = header.tag_size(),
                        found = previous_tag_size,
                        "previous tag size mismatch"
                    );
                }

                Ok(())
            }
            // Some writers leave the last one out.
            Fill::Eof => {
                tracing::debug!("flv stream ends without a final previous tag size");
                Ok(())
            }
            Fill::Partial(read) => {
                self.position += read as u64;
                Err(FlvError::Truncated {
                    what: "previous tag size",
                    expected: PREVIOUS_TAG_SIZE,
                    read,
                })
            }
        }
    }

    /// The header read when the decoder was created.
    pub fn header(&self) -> &FlvHeader {
        &self.header
    }

    /// Number of bytes consumed from the source so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Whether the decoder reached the end of the stream or a fatal error.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl<R> FlvDecoder<R> {
    /// Get a reference to the underlying reader.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Consume the decoder and return the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R> Iterator for FlvDecoder<R>
where
    R: io::Read,
{
    type Item = Result<FlvTag, FlvError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.decode_next().transpose()
    }
}

impl<R> FusedIterator for FlvDecoder<R> where R: io::Read {}

#[cfg(test)]
#[cfg_attr(all(test, coverage_nightly), coverage(off))]
mod tests {
    use bytes::Bytes;
    use flvkit_amf0::Amf0Error;

    use super::*;
    use crate::video::header::VideoCodecId;

    #[rustfmt::skip]
    const HEADER: [u8; 13] = [
        b'F', b'L', b'V', 0x01, 0x05, 0x00, 0x00, 0x00, 0x09,
        0x00, 0x00, 0x00, 0x00, // PreviousTagSize0
    ];

    fn tag(tag_type: u8, timestamp: u32, payload: &[u8]) -> Vec<u8> {
        let size = payload.len() as u32;
        let mut out = vec![tag_type];
        out.extend_from_slice(&size.to_be_bytes()[1..]);
        out.extend_from_slice(&timestamp.to_be_bytes()[1..]);
        out.push((timestamp >> 24) as u8);
        out.extend_from_slice(&[0, 0, 0]);
        out.extend_from_slice(payload);
        out.extend_from_slice(&(size + 11).to_be_bytes());
        out
    }

    fn stream(tags: &[Vec<u8>]) -> io::Cursor<Vec<u8>> {
        let mut bytes = HEADER.to_vec();
        for tag in tags {
            bytes.extend_from_slice(tag);
        }
        io::Cursor::new(bytes)
    }

    #[test]
    fn empty_stream() {
        let mut decoder = FlvDecoder::new(stream(&[])).unwrap();
        assert_eq!(decoder.position(), 13);
        assert!(decoder.decode_next().unwrap().is_none());
        assert!(decoder.is_finished());
        assert!(decoder.next().is_none());
    }

    #[test]
    fn header_only_stream() {
        let mut decoder = FlvDecoder::new(io::Cursor::new(&HEADER[..9])).unwrap();
        assert!(decoder.header().is_audio_present());
        assert!(decoder.header().is_video_present());
        assert_eq!(decoder.position(), 9);
        assert!(decoder.decode_next().unwrap().is_none());
    }

    #[test]
    fn truncated_first_previous_tag_size() {
        let err = FlvDecoder::new(io::Cursor::new(&HEADER[..11])).unwrap_err();
        assert!(matches!(
            err,
            FlvError::Truncated {
                what: "previous tag size",
                expected: 4,
                read: 2
            }
        ));
    }

    #[test]
    fn timestamps() {
        let tags = [tag(9, 40, &[0x22]), tag(9, 0x0100_0000 + 80, &[0x22])];
        let decoder = FlvDecoder::new(stream(&tags)).unwrap();

        let timestamps: Vec<_> = decoder.map(|tag| tag.unwrap().timestamp_ms()).collect();
        assert_eq!(timestamps, [40, 0x0100_0050]);
    }

    #[test]
    fn resync_after_unsupported_marker() {
        let tags = [tag(18, 0, &[0xff; 5]), tag(9, 0, &[0x01, 0x02, 0x03, 0x04, 0x05])];
        let mut decoder = FlvDecoder::new(stream(&tags)).unwrap();

        let err = decoder.decode_next().unwrap_err();
        assert!(matches!(err, FlvError::Amf0(Amf0Error::UnsupportedMarker(0xff))));
        assert!(!decoder.is_finished());
        assert_eq!(decoder.position(), 13 + 11 + 5 + 4);

        let tag = decoder.decode_next().unwrap().unwrap();
        let FlvTagData::Video(video) = tag.data else {
            panic!("expected video data");
        };
        assert_eq!(video.header.codec_id, VideoCodecId::Jpeg);
        assert_eq!(video.data, Bytes::from_static(&[0x02, 0x03, 0x04, 0x05]));

        assert!(decoder.decode_next().unwrap().is_none());
    }

    #[test]
    fn fatal_error_fuses() {
        let mut bytes = stream(&[tag(9, 0, &[0x22])]).into_inner();
        bytes.extend_from_slice(&[0x09, 0x00, 0x00]);
        let mut decoder = FlvDecoder::new(io::Cursor::new(bytes)).unwrap();

        assert!(decoder.next().unwrap().is_ok());

        let err = decoder.next().unwrap().unwrap_err();
        assert!(matches!(
            err,
            FlvError::Truncated {
                what: "tag header",
                expected: 11,
                read: 3
            }
        ));
        assert!(decoder.is_finished());
        assert!(decoder.next().is_none());
        assert!(decoder.next().is_none());
    }

    #[test]
    fn missing_final_previous_tag_size() {
        let mut bytes = stream(&[tag(8, 0, &[0x2f, 0xaa])]).into_inner();
        bytes.truncate(bytes.len() - 4);
        let mut decoder = FlvDecoder::new(io::Cursor::new(bytes)).unwrap();

        let tag = decoder.decode_next().unwrap().unwrap();
        assert_eq!(tag.tag_type(), FlvTagType::Audio);
        assert!(decoder.decode_next().unwrap().is_none());
    }

    #[test]
    fn into_inner() {
        let decoder = FlvDecoder::new(stream(&[])).unwrap();
        assert_eq!(decoder.get_ref().position(), 13);
        assert_eq!(decoder.into_inner().into_inner(), HEADER);
    }
}
