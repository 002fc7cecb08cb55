//! Source-definition introspection.
//!
//! A synthesized lossless target only makes sense for types that bind a
//! fixed list of named properties through a single constructor-like shape.
//! `TypeShape` recovers that shape from the type's `Deserialize`
//! implementation without any input document: a probe deserializer records
//! the `name` and `fields` arguments the implementation passes to
//! `deserialize_struct` and aborts immediately.

use std::any::type_name;
use std::cell::Cell;
use std::fmt;

use serde::de::{self, DeserializeOwned, Visitor};
use thiserror::Error;

use super::error::{Result, SynthesisError};

/// The introspected shape of a source type: its serde name and the ordered
/// list of property names its constructor binds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeShape {
    name: &'static str,
    fields: &'static [&'static str],
}

impl TypeShape {
    /// Introspect the shape of `T`.
    ///
    /// Fails with `UnsupportedConstructor` when `T` does not deserialize as
    /// a plain struct with at least one named field (tuple structs, unit
    /// structs, enums, and hand-written non-struct impls are all rejected).
    pub fn of<T: DeserializeOwned>() -> Result<Self> {
        let probe = ShapeProbe::default();
        // Always errors; the probe never produces a value. Only the
        // captured shape matters.
        let _ = T::deserialize(&probe);

        match probe.captured.take() {
            Some((name, fields)) if !fields.is_empty() => Ok(Self { name, fields }),
            Some((name, _)) => Err(SynthesisError::UnsupportedConstructor(
                name.to_string(),
                "type declares no properties to bind".to_string(),
            )),
            None => Err(SynthesisError::UnsupportedConstructor(
                type_name::<T>().to_string(),
                "deserializer did not request a struct shape".to_string(),
            )),
        }
    }

    /// The serde-visible type name (the JSON-facing name, not the Rust path).
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Property names in declaration order, as they appear in JSON.
    pub fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Whether `key` is one of the properties the source type binds itself.
    pub fn recognizes(&self, key: &str) -> bool {
        self.fields.contains(&key)
    }
}

impl fmt::Display for TypeShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.fields.join(", "))
    }
}

/// Deserializer that records the struct shape requested of it and refuses
/// to produce any value.
#[derive(Default)]
struct ShapeProbe {
    captured: Cell<Option<(&'static str, &'static [&'static str])>>,
}

#[derive(Error, Debug)]
enum ProbeError {
    #[error("shape captured")]
    Captured,

    #[error("deserializer did not request a struct shape")]
    NotAStruct,

    #[error("{0}")]
    Custom(String),
}

impl de::Error for ProbeError {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Self::Custom(msg.to_string())
    }
}

impl<'de, 'a> de::Deserializer<'de> for &'a ShapeProbe {
    type Error = ProbeError;

    fn deserialize_any<V>(self, _visitor: V) -> std::result::Result<V::Value, ProbeError>
    where
        V: Visitor<'de>,
    {
        Err(ProbeError::NotAStruct)
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        _visitor: V,
    ) -> std::result::Result<V::Value, ProbeError>
    where
        V: Visitor<'de>,
    {
        self.captured.set(Some((name, fields)));
        Err(ProbeError::Captured)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}
