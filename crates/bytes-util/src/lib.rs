//! A utility crate for reading big-endian framed data.
//!
//! Two halves:
//!
//! - [`BytesCursorExt`] extracts zero-copy slices from an `io::Cursor<Bytes>`,
//!   which is how payloads are interpreted once their extent is known.
//! - [`ReadFillExt`] reads from any [`std::io::Read`] while telling apart a
//!   clean end of data from a run that stopped part way.
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

mod cursor;
mod fill;

pub use cursor::BytesCursorExt;
pub use fill::{Fill, ReadFillExt};
