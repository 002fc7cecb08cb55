//! Process-wide registry of synthesized lossless targets.
//!
//! Stands in for the original loaded-class registry: installing a target
//! for a type is a one-shot, append-only operation, and re-synthesizing
//! the same type collides. Installed entries carry the introspected shape
//! plus erased codec hooks, so documents can be deserialized by type name
//! without the concrete `T` in scope.

use std::any::Any;
use std::collections::HashMap;
use std::sync::RwLock;

use lazy_static::lazy_static;
use log::debug;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::{Result, SynthesisError, TypeShape};
use crate::lossless::Lossless;
use crate::store::ExtraProperties;

/// Suffix appended to a source type's name to form its derived name.
pub const LOSSLESS_SUFFIX: &str = "_Lossless";

/// Type-erased view of a deserialized [`Lossless<T>`].
///
/// Returned by the by-name path; downcast through [`as_any`] to recover
/// the concrete wrapper.
///
/// [`as_any`]: LosslessValue::as_any
pub trait LosslessValue: Send + Sync {
    fn to_json(&self) -> Result<String>;

    fn to_json_pretty(&self) -> Result<String>;

    fn to_value(&self) -> Result<Value>;

    /// The retained unrecognized properties, in capture order.
    fn extra_properties(&self) -> &ExtraProperties;

    fn as_any(&self) -> &dyn Any;
}

impl<T> LosslessValue for Lossless<T>
where
    T: Serialize + Send + Sync + 'static,
{
    fn to_json(&self) -> Result<String> {
        Lossless::to_json(self)
    }

    fn to_json_pretty(&self) -> Result<String> {
        Lossless::to_json_pretty(self)
    }

    fn to_value(&self) -> Result<Value> {
        Lossless::to_value(self)
    }

    fn extra_properties(&self) -> &ExtraProperties {
        Lossless::extra_properties(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl std::fmt::Debug for dyn LosslessValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn LosslessValue")
    }
}

/// Handle describing one installed lossless target.
#[derive(Debug, Clone)]
pub struct SynthesizedType {
    shape: TypeShape,
    derived_name: String,
}

impl SynthesizedType {
    /// The source type's serde name, as used for by-name lookups.
    pub fn source_name(&self) -> &str {
        self.shape.name()
    }

    /// The derived target's name: source name plus [`LOSSLESS_SUFFIX`].
    pub fn derived_name(&self) -> &str {
        &self.derived_name
    }

    pub fn shape(&self) -> TypeShape {
        self.shape
    }
}

type ErasedDeserializeFn = fn(&str) -> Result<Box<dyn LosslessValue>>;

struct Entry {
    info: SynthesizedType,
    deserialize_fn: ErasedDeserializeFn,
}

fn deserialize_erased<T>(document: &str) -> Result<Box<dyn LosslessValue>>
where
    T: DeserializeOwned + Serialize + Send + Sync + 'static,
{
    Ok(Box::new(Lossless::<T>::from_json(document)?))
}

/// Append-only registry mapping source type names to synthesized targets.
///
/// Concurrent synthesis of distinct types is safe; two racing calls for
/// the same name leave exactly one installed, and the loser observes a
/// `SynthesisFailure`.
pub struct LosslessRegistry {
    entries: RwLock<HashMap<String, Entry>>,
}

// Global singleton instance, the analog of the process's class registry
lazy_static! {
    static ref GLOBAL_REGISTRY: LosslessRegistry = LosslessRegistry::new();
}

impl LosslessRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Get the global registry shared by the whole process.
    pub fn global() -> &'static LosslessRegistry {
        &GLOBAL_REGISTRY
    }

    /// Synthesize and install the lossless target for `T`.
    ///
    /// Introspects `T`'s shape, derives the target name, and installs the
    /// entry only after every step has succeeded; a failure at any point
    /// leaves the registry unchanged. Synthesizing the same type (or two
    /// types sharing a serde name) twice fails with `SynthesisFailure`.
    pub fn synthesize<T>(&self) -> Result<SynthesizedType>
    where
        T: DeserializeOwned + Serialize + Send + Sync + 'static,
    {
        let shape = TypeShape::of::<T>()?;
        let info = SynthesizedType {
            shape,
            derived_name: format!("{}{}", shape.name(), LOSSLESS_SUFFIX),
        };

        let mut entries = self.entries.write()?;
        if entries.contains_key(shape.name()) {
            return Err(SynthesisError::SynthesisFailure(
                shape.name().to_string(),
                format!("derived type '{}' is already installed", info.derived_name),
            ));
        }

        entries.insert(
            shape.name().to_string(),
            Entry {
                info: info.clone(),
                deserialize_fn: deserialize_erased::<T>,
            },
        );
        debug!("installed lossless target '{}' for {}", info.derived_name, shape);

        Ok(info)
    }

    /// Deserialize `document` into the target installed for `type_name`.
    pub fn deserialize(&self, type_name: &str, document: &str) -> Result<Box<dyn LosslessValue>> {
        let deserialize_fn = {
            let entries = self.entries.read()?;
            entries
                .get(type_name)
                .ok_or_else(|| SynthesisError::TypeNotFound(type_name.to_string()))?
                .deserialize_fn
        };

        deserialize_fn(document)
    }

    /// Look up the handle installed for `type_name`.
    pub fn resolve(&self, type_name: &str) -> Result<SynthesizedType> {
        let entries = self.entries.read()?;
        entries
            .get(type_name)
            .map(|entry| entry.info.clone())
            .ok_or_else(|| SynthesisError::TypeNotFound(type_name.to_string()))
    }

    /// Introspected shape of the source type installed for `type_name`.
    pub fn shape_of(&self, type_name: &str) -> Result<TypeShape> {
        self.resolve(type_name).map(|info| info.shape())
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(type_name))
            .unwrap_or(false)
    }

    /// Source names of every installed target (unordered).
    pub fn synthesized_names(&self) -> Result<Vec<String>> {
        let entries = self.entries.read()?;
        Ok(entries.keys().cloned().collect())
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for LosslessRegistry {
    fn default() -> Self {
        Self::new()
    }
}
