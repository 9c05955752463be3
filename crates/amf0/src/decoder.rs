//! AMF0 decoder

use bytes::Buf;
use num_traits::FromPrimitive;

use crate::{Amf0Error, Amf0Marker, Amf0Object, Amf0String, Amf0Value};

/// Objects nested deeper than this are rejected instead of exhausting the stack.
pub const MAX_NESTING_DEPTH: usize = 256;

/// AMF0 decoder.
///
/// Decodes values from any [`bytes::Buf`]. Every read is bounds checked, running out of
/// data in the middle of a value is reported as [`Amf0Error::UnexpectedEof`] and never
/// reads past the end of the buffer.
#[derive(Debug, Clone)]
pub struct Amf0Decoder<B> {
    buf: B,
    depth: usize,
}

impl<B> Amf0Decoder<B>
where
    B: Buf,
{
    /// Create a new decoder over a buffer.
    pub fn new(buf: B) -> Self {
        Self { buf, depth: 0 }
    }

    /// Check if there are remaining bytes to read.
    #[inline]
    pub fn has_remaining(&self) -> bool {
        self.buf.has_remaining()
    }

    /// Consumes the decoder and returns the buffer with whatever was not decoded.
    pub fn into_inner(self) -> B {
        self.buf
    }

    /// Decode a single [`Amf0Value`] from the buffer.
    pub fn decode_value(&mut self) -> Result<Amf0Value, Amf0Error> {
        let raw = self.buf.try_get_u8()?;

        match Amf0Marker::from_u8(raw) {
            Some(Amf0Marker::Number) => self.decode_number().map(Amf0Value::Number),
            Some(Amf0Marker::Boolean) => self.decode_boolean().map(Amf0Value::Boolean),
            Some(Amf0Marker::String) => self.decode_string().map(Amf0Value::String),
            Some(Amf0Marker::Object) => self.decode_nested(Self::decode_object_body).map(Amf0Value::Object),
            Some(Amf0Marker::Null) => Ok(Amf0Value::Null),
            Some(Amf0Marker::Undefined) => Ok(Amf0Value::Undefined),
            Some(Amf0Marker::EcmaArray) => self.decode_nested(Self::decode_ecma_array_body).map(Amf0Value::EcmaArray),
            _ => Err(Amf0Error::UnsupportedMarker(raw)),
        }
    }

    /// Decode all values from the buffer until the end.
    pub fn decode_all(&mut self) -> Result<Vec<Amf0Value>, Amf0Error> {
        let mut values = Vec::new();

        while self.buf.has_remaining() {
            values.push(self.decode_value()?);
        }

        Ok(values)
    }

    fn decode_number(&mut self) -> Result<f64, Amf0Error> {
        Ok(self.buf.try_get_f64()?)
    }

    fn decode_boolean(&mut self) -> Result<bool, Amf0Error> {
        Ok(self.buf.try_get_u8()? != 0)
    }

    /// Strings and object keys share this encoding: a u16 length followed by the bytes.
    fn decode_string(&mut self) -> Result<Amf0String, Amf0Error> {
        let len = self.buf.try_get_u16()? as usize;

        if self.buf.remaining() < len {
            return Err(Amf0Error::UnexpectedEof {
                requested: len,
                available: self.buf.remaining(),
            });
        }

        Ok(Amf0String::from_bytes(self.buf.copy_to_bytes(len)))
    }

    fn decode_nested<T>(&mut self, decode: fn(&mut Self) -> Result<T, Amf0Error>) -> Result<T, Amf0Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(Amf0Error::NestingTooDeep(MAX_NESTING_DEPTH));
        }

        self.depth += 1;
        let result = decode(self);
        self.depth -= 1;

        result
    }

    fn decode_ecma_array_body(&mut self) -> Result<Amf0Object, Amf0Error> {
        // The count is only a hint, the end marker terminates the array.
        let count = self.buf.try_get_u32()?;
        let mut object = Amf0Object::with_capacity((count as usize).min(64));
        self.decode_object_entries(&mut object)?;
        Ok(object)
    }

    fn decode_object_body(&mut self) -> Result<Amf0Object, Amf0Error> {
        let mut object = Amf0Object::new();
        self.decode_object_entries(&mut object)?;
        Ok(object)
    }

    fn decode_object_entries(&mut self, object: &mut Amf0Object) -> Result<(), Amf0Error> {
        loop {
            // Object keys are not preceeded with a marker
            let key = self.decode_string()?;

            // The object end marker is preceeded by an empty key
            if key.is_empty() && self.buf.chunk().first() == Some(&(Amf0Marker::ObjectEnd as u8)) {
                self.buf.advance(1);
                return Ok(());
            }

            let value = self.decode_value()?;
            object.insert(key, value);
        }
    }
}
