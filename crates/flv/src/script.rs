//! Script data structures

use std::io;

use bytes::Bytes;
use flvkit_amf0::{Amf0Decoder, Amf0Object, Amf0Value};
use flvkit_bytes_util::BytesCursorExt;

use crate::audio::header::SoundFormat;
use crate::error::FlvError;
use crate::video::header::VideoCodecId;

/// FLV `SCRIPTDATA` tag
///
/// A sequence of AMF0 string keys, each followed by one AMF0 value. Writers
/// conventionally put a single `onMetaData` entry in here, it is stored like any
/// other key. See [`ScriptData::on_meta_data`] for a typed view of it.
///
/// Defined by:
/// - Legacy FLV spec, Annex E.4.4.1
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptData {
    /// The entries in the order they were found.
    ///
    /// A key that appears twice keeps its first position and the last value.
    pub values: Amf0Object,
}

impl ScriptData {
    /// The conventional name of the metadata entry.
    pub const ON_META_DATA: &str = "onMetaData";

    /// Demux the [`ScriptData`] from the given reader.
    ///
    /// The reader will be entirely consumed.
    pub fn demux(reader: &mut io::Cursor<Bytes>) -> Result<Self, FlvError> {
        let buf = reader.extract_remaining();
        let mut decoder = Amf0Decoder::new(buf);

        let mut values = Amf0Object::new();
        while decoder.has_remaining() {
            let Amf0Value::String(key) = decoder.decode_value()? else {
                return Err(FlvError::InvalidScriptKey);
            };

            let value = decoder.decode_value()?;
            values.insert(key, value);
        }

        Ok(ScriptData { values })
    }

    /// Look up an entry by name.
    pub fn get(&self, key: &str) -> Option<&Amf0Value> {
        self.values.get(key.as_bytes())
    }

    /// The `onMetaData` entry, if there is one and it is an object or ECMA array.
    pub fn on_meta_data(&self) -> Option<OnMetaData> {
        self.get(Self::ON_META_DATA)?.as_object().map(OnMetaData::from_object)
    }
}

/// FLV `onMetaData` script data
///
/// Fields that are missing or carry an unexpected AMF0 type are `None`.
///
/// Defined by:
/// - Legacy FLV spec, Annex E.5
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OnMetaData {
    /// Audio codec ID used in the file.
    pub audiocodecid: Option<SoundFormat>,
    /// Audio bitrate, in kilobits per second.
    pub audiodatarate: Option<f64>,
    /// Frequency at which the audio stream is replayed.
    pub audiosamplerate: Option<f64>,
    /// Resolution of a single audio sample.
    pub audiosamplesize: Option<f64>,
    /// Total duration of the file, in seconds.
    pub duration: Option<f64>,
    /// Total size of the file, in bytes.
    pub filesize: Option<f64>,
    /// Number of frames per second.
    pub framerate: Option<f64>,
    /// Height of the video, in pixels.
    pub height: Option<f64>,
    /// Indicates stereo audio.
    pub stereo: Option<bool>,
    /// Video codec ID used in the file.
    pub videocodecid: Option<VideoCodecId>,
    /// Video bitrate, in kilobits per second.
    pub videodatarate: Option<f64>,
    /// Width of the video, in pixels.
    pub width: Option<f64>,
    /// Any other metadata contained in the object.
    pub other: Amf0Object,
}

impl OnMetaData {
    /// Extract the known fields from an `onMetaData` object.
    pub fn from_object(object: &Amf0Object) -> Self {
        let mut meta = OnMetaData::default();

        for (key, value) in object {
            let Some(name) = key.as_str() else {
                meta.other.insert(key.clone(), value.clone());
                continue;
            };

            match name {
                "audiocodecid" => meta.audiocodecid = codec_id(value).map(SoundFormat::from),
                "audiodatarate" => meta.audiodatarate = value.as_number(),
                "audiosamplerate" => meta.audiosamplerate = value.as_number(),
                "audiosamplesize" => meta.audiosamplesize = value.as_number(),
                "duration" => meta.duration = value.as_number(),
                "filesize" => meta.filesize = value.as_number(),
                "framerate" => meta.framerate = value.as_number(),
                "height" => meta.height = value.as_number(),
                "stereo" => meta.stereo = value.as_boolean(),
                "videocodecid" => meta.videocodecid = codec_id(value).map(VideoCodecId::from),
                "videodatarate" => meta.videodatarate = value.as_number(),
                "width" => meta.width = value.as_number(),
                _ => {
                    meta.other.insert(key.clone(), value.clone());
                }
            }
        }

        meta
    }
}

/// Codec ids are stored as AMF0 numbers. Anything that does not fit a legacy
/// 4 bit codec id field (FourCCs, fractions, negatives) is ignored.
fn codec_id(value: &Amf0Value) -> Option<u8> {
    let n = value.as_number()?;
    if n.fract() == 0.0 && (0.0..=u8::MAX as f64).contains(&n) {
        Some(n as u8)
    } else {
        None
    }
}
