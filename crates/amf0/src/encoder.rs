//! AMF0 encoder

use std::io;

use byteorder::{BigEndian, WriteBytesExt};

use crate::{Amf0Error, Amf0Marker, Amf0Object, Amf0Value};

/// AMF0 encoder.
///
/// Provides various functions to encode different types of AMF0 values into a writer.
#[derive(Debug)]
pub struct Amf0Encoder<W> {
    writer: W,
}

impl<W> Amf0Encoder<W> {
    /// Create a new encoder from a writer.
    pub fn new(writer: W) -> Self {
        Amf0Encoder { writer }
    }

    /// Consumes the encoder and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> Amf0Encoder<W>
where
    W: io::Write,
{
    /// Encode any [`Amf0Value`].
    pub fn encode_value(&mut self, value: &Amf0Value) -> Result<(), Amf0Error> {
        match value {
            Amf0Value::Number(v) => self.encode_number(*v),
            Amf0Value::Boolean(v) => self.encode_boolean(*v),
            Amf0Value::String(v) => self.encode_string(v.as_bytes()),
            Amf0Value::Object(v) => self.encode_object(v),
            Amf0Value::Null => self.encode_null(),
            Amf0Value::Undefined => self.encode_undefined(),
            Amf0Value::EcmaArray(v) => self.encode_ecma_array(v),
        }
    }

    /// Encode a [`bool`] as a AMF0 boolean value.
    pub fn encode_boolean(&mut self, value: bool) -> Result<(), Amf0Error> {
        self.writer.write_u8(Amf0Marker::Boolean as u8)?;
        self.writer.write_u8(value as u8)?;
        Ok(())
    }

    /// Encode a [`f64`] as a AMF0 number value.
    pub fn encode_number(&mut self, value: f64) -> Result<(), Amf0Error> {
        self.writer.write_u8(Amf0Marker::Number as u8)?;
        self.writer.write_f64::<BigEndian>(value)?;
        Ok(())
    }

    /// Encode a byte string as a AMF0 string value.
    ///
    /// Fails with [`Amf0Error::TooLong`] if the string does not fit a u16 length.
    pub fn encode_string(&mut self, value: &[u8]) -> Result<(), Amf0Error> {
        self.writer.write_u8(Amf0Marker::String as u8)?;
        self.encode_utf8(value)
    }

    /// Encode AMF0 Null value.
    pub fn encode_null(&mut self) -> Result<(), Amf0Error> {
        self.writer.write_u8(Amf0Marker::Null as u8)?;
        Ok(())
    }

    /// Encode AMF0 Undefined value.
    pub fn encode_undefined(&mut self) -> Result<(), Amf0Error> {
        self.writer.write_u8(Amf0Marker::Undefined as u8)?;
        Ok(())
    }

    /// Encode an [`Amf0Object`] as an AMF0 Object value.
    pub fn encode_object(&mut self, values: &Amf0Object) -> Result<(), Amf0Error> {
        self.writer.write_u8(Amf0Marker::Object as u8)?;
        self.encode_object_entries(values)
    }

    /// Encode an [`Amf0Object`] as an AMF0 ECMA Array value.
    pub fn encode_ecma_array(&mut self, values: &Amf0Object) -> Result<(), Amf0Error> {
        self.writer.write_u8(Amf0Marker::EcmaArray as u8)?;
        self.writer.write_u32::<BigEndian>(values.len().try_into()?)?;
        self.encode_object_entries(values)
    }

    // A string without its marker, as used for object keys.
    fn encode_utf8(&mut self, value: &[u8]) -> Result<(), Amf0Error> {
        self.writer.write_u16::<BigEndian>(value.len().try_into()?)?;
        self.writer.write_all(value)?;
        Ok(())
    }

    fn encode_object_entries(&mut self, values: &Amf0Object) -> Result<(), Amf0Error> {
        for (key, value) in values {
            self.encode_utf8(key.as_bytes())?;
            self.encode_value(value)?;
        }

        self.writer.write_u24::<BigEndian>(Amf0Marker::ObjectEnd as u32)?;
        Ok(())
    }
}
