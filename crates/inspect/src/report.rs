use std::io;

use anyhow::Context;
use flvkit::audio::AudioData;
use flvkit::script::ScriptData;
use flvkit::video::VideoData;
use flvkit::{FlvDecoder, FlvTag, FlvTagData};

#[derive(Debug, Clone, Default)]
pub(crate) struct Options {
    pub stop_on_error: bool,
    pub json: bool,
    pub hexdump_bytes: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Summary {
    pub audio: usize,
    pub video: usize,
    pub script_data: usize,
    pub errors: usize,
}

/// Decodes every tag from `reader` and writes one line per tag (or error) to `out`.
///
/// Per tag errors are printed and counted, fatal ones end the run with an error.
pub(crate) fn inspect<R, W>(reader: R, out: &mut W, options: &Options) -> anyhow::Result<Summary>
where
    R: io::Read,
    W: io::Write,
{
    let mut decoder = FlvDecoder::new(reader).context("failed to read flv header")?;
    let header = decoder.header();
    writeln!(
        out,
        "header version={} audio={} video={} data_offset={}",
        header.version,
        header.is_audio_present(),
        header.is_video_present(),
        header.data_offset
    )?;

    let mut summary = Summary::default();

    for index in 0.. {
        let offset = decoder.position();

        match decoder.decode_next() {
            Ok(Some(tag)) => {
                write_tag(out, index, offset, &tag, options)?;
                match tag.data {
                    FlvTagData::Audio(_) => summary.audio += 1,
                    FlvTagData::Video(_) => summary.video += 1,
                    FlvTagData::ScriptData(_) => summary.script_data += 1,
                }
            }
            Ok(None) => break,
            Err(err) => {
                writeln!(out, "#{index} @{offset} error: {err}")?;
                summary.errors += 1;

                if err.is_fatal() || options.stop_on_error {
                    return Err(err).with_context(|| format!("tag #{index} at offset {offset}"));
                }
            }
        }
    }

    Ok(summary)
}

fn write_tag<W: io::Write>(out: &mut W, index: usize, offset: u64, tag: &FlvTag, options: &Options) -> anyhow::Result<()> {
    write!(
        out,
        "#{index} @{offset} {} ts={} size={}",
        tag.tag_type().name(),
        tag.timestamp_ms(),
        tag.data_size()
    )?;

    match &tag.data {
        FlvTagData::Audio(audio) => write_audio(out, audio, options)?,
        FlvTagData::Video(video) => write_video(out, video, options)?,
        FlvTagData::ScriptData(script) => write_script_data(out, script, options)?,
    }

    writeln!(out)?;
    Ok(())
}

fn write_audio<W: io::Write>(out: &mut W, audio: &AudioData, options: &Options) -> anyhow::Result<()> {
    let header = &audio.header;
    write!(
        out,
        " format={:?} rate={:?} sample_size={:?} channels={:?}",
        header.sound_format, header.sound_rate, header.sound_size, header.sound_type
    )?;

    if let Some(packet_type) = header.aac_packet_type {
        write!(out, " packet={packet_type:?}")?;
    }

    write_hexdump(out, &audio.data, options)
}

fn write_video<W: io::Write>(out: &mut W, video: &VideoData, options: &Options) -> anyhow::Result<()> {
    let header = &video.header;
    write!(out, " frame={:?} codec={:?}", header.frame_type, header.codec_id)?;

    if let Some(packet) = &header.avc_packet {
        write!(
            out,
            " packet={:?} cts={}",
            packet.avc_packet_type, packet.composition_time_offset
        )?;
    }

    write_hexdump(out, &video.data, options)
}

fn write_script_data<W: io::Write>(out: &mut W, script: &ScriptData, options: &Options) -> anyhow::Result<()> {
    if options.json {
        let json = serde_json::to_string(&script.values).context("failed to serialize script data")?;
        write!(out, " {json}")?;
        return Ok(());
    }

    let keys: Vec<_> = script.values.keys().map(|key| key.to_string()).collect();
    write!(out, " keys=[{}]", keys.join(", "))?;

    if let Some(meta) = script.on_meta_data() {
        if let Some(duration) = meta.duration {
            write!(out, " duration={duration}s")?;
        }
        if let (Some(width), Some(height)) = (meta.width, meta.height) {
            write!(out, " resolution={width}x{height}")?;
        }
        if let Some(framerate) = meta.framerate {
            write!(out, " fps={framerate}")?;
        }
        if let Some(codec) = meta.videocodecid {
            write!(out, " video={codec:?}")?;
        }
        if let Some(codec) = meta.audiocodecid {
            write!(out, " audio={codec:?}")?;
        }
    }

    Ok(())
}

fn write_hexdump<W: io::Write>(out: &mut W, data: &[u8], options: &Options) -> anyhow::Result<()> {
    if options.hexdump_bytes == 0 || data.is_empty() {
        return Ok(());
    }

    let shown = &data[..data.len().min(options.hexdump_bytes)];
    write!(out, " data={}", hex::encode(shown))?;
    if shown.len() < data.len() {
        write!(out, "..")?;
    }

    Ok(())
}
