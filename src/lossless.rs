//! The synthesized lossless target.
//!
//! `Lossless<T>` stands in for the original runtime-subclassing trick:
//! instead of generating a subclass of `T` with any-getter/any-setter
//! hooks, it composes a `T` with an [`ExtraProperties`] store and lets
//! serde's flatten machinery route every property `T` does not claim into
//! the store during deserialization, then merge the store back into the
//! output during serialization.

use std::ops::{Deref, DerefMut};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::Result;
use crate::store::ExtraProperties;

/// Drop-in deserialization/serialization target that round-trips
/// properties unknown to `T`.
///
/// All of `T`'s behavior is reached through `Deref`; known properties
/// deserialize exactly as they would into a plain `T`. Unrecognized
/// properties land in the extra-properties store in first-seen order and
/// are re-emitted after `T`'s own properties on serialization.
///
/// # Examples
///
/// ```
/// use losslessjson::Lossless;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct ContactDetails {
///     #[serde(rename = "homePhone")]
///     home_phone: String,
///     email: String,
/// }
///
/// # fn main() -> Result<(), losslessjson::SynthesisError> {
/// let doc = r#"{"homePhone":"01234 567890","mobilePhone":"07123 123456","email":"x@y.com"}"#;
/// let contact: Lossless<ContactDetails> = Lossless::from_json(doc)?;
///
/// assert_eq!(contact.home_phone, "01234 567890");
/// assert_eq!(contact.extra_properties().len(), 1);
///
/// // Nothing is lost on the way back out.
/// let reserialized: serde_json::Value = serde_json::from_str(&contact.to_json()?)?;
/// let original: serde_json::Value = serde_json::from_str(doc)?;
/// assert_eq!(reserialized, original);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lossless<T> {
    #[serde(flatten)]
    inner: T,

    #[serde(flatten)]
    extra: ExtraProperties,
}

impl<T> Lossless<T> {
    /// Wrap an already-constructed `T` with an empty store.
    ///
    /// This is the only constructor; it forwards `inner` unmodified and
    /// performs no logic of its own.
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            extra: ExtraProperties::new(),
        }
    }

    pub fn inner(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }

    pub fn into_parts(self) -> (T, ExtraProperties) {
        (self.inner, self.extra)
    }

    /// Capture hook: record a property `T` did not recognize.
    pub fn capture(&mut self, name: impl Into<String>, value: Value) {
        self.extra.capture(name, value);
    }

    /// Emit hook: the retained unrecognized properties, in capture order.
    pub fn extra_properties(&self) -> &ExtraProperties {
        &self.extra
    }

    pub fn extra_properties_mut(&mut self) -> &mut ExtraProperties {
        &mut self.extra
    }
}

impl<T: DeserializeOwned> Lossless<T> {
    /// Deserialize a JSON document, retaining every unrecognized property.
    pub fn from_json(document: &str) -> Result<Self> {
        Ok(serde_json::from_str(document)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

impl<T: Serialize> Lossless<T> {
    /// Serialize known properties plus every retained extra property.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl<T> From<T> for Lossless<T> {
    fn from(inner: T) -> Self {
        Self::new(inner)
    }
}

impl<T> Deref for Lossless<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> DerefMut for Lossless<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.inner
    }
}

impl<T> AsRef<T> for Lossless<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}
