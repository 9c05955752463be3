//! A pure-rust implementation of the AMF0 value encoding used by FLV script data.
//!
//! # Supported types
//!
//! Number, Boolean, String, Object, Null, Undefined and ECMA-Array. Every other marker
//! is rejected with [`Amf0Error::UnsupportedMarker`] carrying the raw marker byte.
//!
//! Strings and object keys are kept as opaque bytes ([`Amf0String`]), AMF0 does not
//! guarantee valid UTF-8 and the decoder does not guess.
//!
//! # Examples
//!
//! ```rust
//! # fn test() -> Result<(), Box<dyn std::error::Error>> {
//! use flvkit_amf0::{Amf0Decoder, Amf0Encoder};
//! # let bytes: &[u8] = &[0x01, 0x01];
//! # let mut writer = Vec::new();
//!
//! // Create a new decoder
//! let mut reader = Amf0Decoder::new(bytes);
//! let value = reader.decode_value()?;
//!
//! // .. do something with the value
//!
//! // Encode a value into a writer
//! Amf0Encoder::new(&mut writer).encode_value(&value)?;
//!
//! # assert_eq!(writer, bytes);
//! # Ok(())
//! # }
//! # test().expect("test failed");
//! ```
//!
//! ## License
//!
//! This project is licensed under the [MIT](./LICENSE.MIT) or [Apache-2.0](./LICENSE.Apache-2.0) license.
//! You can choose between one of them if you use this work.
//!
//! `SPDX-License-Identifier: MIT OR Apache-2.0`
#![cfg_attr(all(coverage_nightly, test), feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(unreachable_pub)]

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod value;

pub use decoder::Amf0Decoder;
pub use encoder::Amf0Encoder;
pub use error::{Amf0Error, Result};
pub use value::{Amf0Object, Amf0String, Amf0Value};

/// AMF0 marker types.
///
/// Defined by:
/// - AMF 0 spec, 2.1.
#[derive(Debug, PartialEq, Eq, Clone, Copy, num_derive::FromPrimitive)]
#[repr(u8)]
pub enum Amf0Marker {
    /// number-marker
    Number = 0x00,
    /// boolean-marker
    Boolean = 0x01,
    /// string-marker
    String = 0x02,
    /// object-marker
    Object = 0x03,
    /// movieclip-marker
    ///
    /// reserved, not supported
    MovieClipMarker = 0x04,
    /// null-marker
    Null = 0x05,
    /// undefined-marker
    Undefined = 0x06,
    /// reference-marker
    Reference = 0x07,
    /// ecma-array-marker
    EcmaArray = 0x08,
    /// object-end-marker
    ObjectEnd = 0x09,
    /// strict-array-marker
    StrictArray = 0x0a,
    /// date-marker
    Date = 0x0b,
    /// long-string-marker
    LongString = 0x0c,
    /// unsupported-marker
    Unsupported = 0x0d,
    /// recordset-marker
    ///
    /// reserved, not supported
    Recordset = 0x0e,
    /// xml-document-marker
    XmlDocument = 0x0f,
    /// typed-object-marker
    TypedObject = 0x10,
    /// avmplus-object-marker
    ///
    /// AMF3 marker
    AVMPlusObject = 0x11,
}
