//! AMF0 value types.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

use bytes::Bytes;
use indexmap::IndexMap;

/// An AMF0 string.
///
/// AMF0 strings are length prefixed byte runs, nothing forces them to be valid UTF-8.
/// The bytes are kept as they were read, use [`Amf0String::as_str`] to look at them as text.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amf0String(Bytes);

impl Amf0String {
    /// Creates a string from a static str without copying.
    pub const fn from_static(value: &'static str) -> Self {
        Self(Bytes::from_static(value.as_bytes()))
    }

    /// Creates a string from raw bytes.
    pub fn from_bytes(bytes: Bytes) -> Self {
        Self(bytes)
    }

    /// The raw bytes of the string.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The string as text, if it is valid UTF-8.
    pub fn as_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.0).ok()
    }

    /// The string as text, replacing invalid UTF-8 sequences.
    pub fn to_string_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the string is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the string and returns the underlying bytes.
    pub fn into_bytes(self) -> Bytes {
        self.0
    }
}

// Must agree with `[u8]` so that maps keyed by `Amf0String` can be queried with byte slices.
impl Hash for Amf0String {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_bytes().hash(state);
    }
}

impl Borrow<[u8]> for Amf0String {
    fn borrow(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl AsRef<[u8]> for Amf0String {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for Amf0String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => fmt::Debug::fmt(s, f),
            None => fmt::Debug::fmt(&self.0, f),
        }
    }
}

impl fmt::Display for Amf0String {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl From<&str> for Amf0String {
    fn from(value: &str) -> Self {
        Self(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl From<String> for Amf0String {
    fn from(value: String) -> Self {
        Self(Bytes::from(value))
    }
}

impl From<Bytes> for Amf0String {
    fn from(value: Bytes) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for Amf0String {
    fn eq(&self, other: &str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl PartialEq<&str> for Amf0String {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

/// An AMF0 object or ECMA array body.
///
/// Keys keep their insertion order. Inserting a key that is already present replaces the
/// value in place, the key keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Amf0Object(IndexMap<Amf0String, Amf0Value>);

impl Amf0Object {
    /// Creates an empty object.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Creates an empty object with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key/value pair, returning the value previously stored under `key`.
    pub fn insert(&mut self, key: impl Into<Amf0String>, value: impl Into<Amf0Value>) -> Option<Amf0Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Looks up a value by key.
    pub fn get<K>(&self, key: &K) -> Option<&Amf0Value>
    where
        K: AsRef<[u8]> + ?Sized,
    {
        self.0.get(key.as_ref())
    }

    /// Whether `key` is present.
    pub fn contains_key<K>(&self, key: &K) -> bool
    where
        K: AsRef<[u8]> + ?Sized,
    {
        self.0.contains_key(key.as_ref())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the object has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the entries in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, Amf0String, Amf0Value> {
        self.0.iter()
    }

    /// Iterates over the keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, Amf0String, Amf0Value> {
        self.0.keys()
    }
}

impl<K, V> FromIterator<(K, V)> for Amf0Object
where
    K: Into<Amf0String>,
    V: Into<Amf0Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut object = Amf0Object::new();
        for (key, value) in iter {
            object.insert(key, value);
        }
        object
    }
}

impl IntoIterator for Amf0Object {
    type IntoIter = indexmap::map::IntoIter<Amf0String, Amf0Value>;
    type Item = (Amf0String, Amf0Value);

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Amf0Object {
    type IntoIter = indexmap::map::Iter<'a, Amf0String, Amf0Value>;
    type Item = (&'a Amf0String, &'a Amf0Value);

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Represents any supported AMF0 value.
#[derive(Debug, PartialEq, Clone)]
pub enum Amf0Value {
    /// AMF0 Number.
    Number(f64),
    /// AMF0 Boolean.
    Boolean(bool),
    /// AMF0 String.
    String(Amf0String),
    /// AMF0 Object.
    Object(Amf0Object),
    /// AMF0 Null.
    Null,
    /// AMF0 Undefined.
    Undefined,
    /// AMF0 ECMA Array.
    ///
    /// Encoded like an object with a leading element count. The count is not trusted,
    /// the entries are whatever was found before the object end marker.
    EcmaArray(Amf0Object),
}

impl Amf0Value {
    /// Returns the number if this is a [`Amf0Value::Number`].
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Amf0Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the boolean if this is a [`Amf0Value::Boolean`].
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Amf0Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the string if this is a [`Amf0Value::String`].
    pub fn as_string(&self) -> Option<&Amf0String> {
        match self {
            Amf0Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the entries of an [`Amf0Value::Object`] or an [`Amf0Value::EcmaArray`].
    pub fn as_object(&self) -> Option<&Amf0Object> {
        match self {
            Amf0Value::Object(o) | Amf0Value::EcmaArray(o) => Some(o),
            _ => None,
        }
    }
}

impl From<f64> for Amf0Value {
    fn from(value: f64) -> Self {
        Amf0Value::Number(value)
    }
}

impl From<bool> for Amf0Value {
    fn from(value: bool) -> Self {
        Amf0Value::Boolean(value)
    }
}

impl From<Amf0String> for Amf0Value {
    fn from(value: Amf0String) -> Self {
        Amf0Value::String(value)
    }
}

impl From<String> for Amf0Value {
    fn from(value: String) -> Self {
        Amf0Value::String(value.into())
    }
}

impl From<&str> for Amf0Value {
    fn from(value: &str) -> Self {
        Amf0Value::String(value.into())
    }
}

impl From<Amf0Object> for Amf0Value {
    fn from(value: Amf0Object) -> Self {
        Amf0Value::Object(value)
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
mod serde_impl {
    use serde::ser::SerializeMap;

    use super::{Amf0Object, Amf0String, Amf0Value};

    impl serde::Serialize for Amf0String {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            match self.as_str() {
                Some(s) => serializer.serialize_str(s),
                None => serializer.serialize_bytes(self.as_bytes()),
            }
        }
    }

    impl serde::Serialize for Amf0Object {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            let mut map = serializer.serialize_map(Some(self.len()))?;

            for (key, value) in self {
                map.serialize_entry(key, value)?;
            }

            map.end()
        }
    }

    impl serde::Serialize for Amf0Value {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: serde::Serializer,
        {
            match self {
                Amf0Value::Number(v) => serializer.serialize_f64(*v),
                Amf0Value::Boolean(v) => serializer.serialize_bool(*v),
                Amf0Value::String(v) => serde::Serialize::serialize(v, serializer),
                Amf0Value::Object(v) | Amf0Value::EcmaArray(v) => serde::Serialize::serialize(v, serializer),
                Amf0Value::Null => serializer.serialize_none(),
                Amf0Value::Undefined => serializer.serialize_unit(),
            }
        }
    }
}
