//! A pure Rust implementation of the FLV format, allowing for demuxing of FLV
//! files and streams.
//!
//! The decoder reads tags one at a time from any [`std::io::Read`]. A tag whose payload
//! cannot be decoded is reported as an error for that tag only, the stream stays in
//! sync and decoding continues with the next tag. See [`FlvError::is_fatal`] for the
//! errors that end a stream.
//!
//! ## Example
//!
//! ```rust
//! # fn test() -> Result<(), flvkit::error::FlvError> {
//! use flvkit::FlvDecoder;
//! use flvkit::tag::FlvTagData;
//!
//! # let file: &[u8] = &[b'F', b'L', b'V', 1, 1, 0, 0, 0, 9, 0, 0, 0, 0, 9, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0x22, 0, 0, 0, 12];
//! let mut decoder = FlvDecoder::new(file)?;
//!
//! for tag in &mut decoder {
//!     match tag {
//!         Ok(tag) => match tag.data {
//!             FlvTagData::Video(video) => println!("{} ms: {:?}", tag.header.timestamp_ms, video.header.codec_id),
//!             FlvTagData::Audio(audio) => println!("{} ms: {:?}", tag.header.timestamp_ms, audio.header.sound_format),
//!             FlvTagData::ScriptData(script) => println!("{:?}", script.on_meta_data()),
//!         },
//!         Err(err) if err.is_fatal() => return Err(err),
//!         Err(err) => eprintln!("skipped tag: {err}"),
//!     }
//! }
//! # Ok(())
//! # }
//! # test().expect("test failed");
//! ```
//!
//! ## Specifications
//!
//! | Name | Version | Link | Comments |
//! | --- | --- | --- | --- |
//! | Video File Format Specification | `10` | <https://github.com/veovera/enhanced-rtmp/blob/main/docs/legacy/video-file-format-v10-0-spec.pdf> | |
//! | Adobe Flash Video File Format Specification | `10.1` | <https://github.com/veovera/enhanced-rtmp/blob/main/docs/legacy/video-file-format-v10-1-spec.pdf> | Refered to as 'Legacy FLV spec' in this documentation |
//!
//! ## License
//!
//! This project is licensed under the [MIT](./LICENSE.MIT) or [Apache-2.0](./LICENSE.Apache-2.0) license.
//! You can choose between one of them if you use this work.
//!
//! `SPDX-License-Identifier: MIT OR Apache-2.0`
#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(unreachable_pub)]

pub mod audio;
pub mod decoder;
pub mod error;
pub mod header;
pub mod script;
pub mod tag;
pub mod video;

pub use decoder::FlvDecoder;
pub use error::FlvError;
pub use tag::{FlvTag, FlvTagData, FlvTagType};
