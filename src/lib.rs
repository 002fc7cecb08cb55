// ============================================================================
// LosslessJson Library
// ============================================================================

pub mod core;
pub mod lossless;
pub mod registry;
pub mod store;

// Re-export main types for convenience
pub use core::{Result, SynthesisError, TypeShape};
pub use lossless::Lossless;
pub use registry::{LOSSLESS_SUFFIX, LosslessRegistry, LosslessValue, SynthesizedType};
pub use store::ExtraProperties;

use serde::Serialize;
use serde::de::DeserializeOwned;

// ============================================================================
// High-level API (global registry)
// ============================================================================

/// Synthesize and install the lossless target for `T` in the global
/// registry.
///
/// One-shot per type per process: the second call for the same type fails
/// with `SynthesisFailure`, the same way re-defining an already-loaded
/// class would.
///
/// # Examples
///
/// ```
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Serialize, Deserialize)]
/// struct Invoice {
///     id: u64,
///     total: f64,
/// }
///
/// # fn main() -> Result<(), losslessjson::SynthesisError> {
/// let info = losslessjson::synthesize::<Invoice>()?;
/// assert_eq!(info.derived_name(), "Invoice_Lossless");
///
/// let doc = r#"{"id":7,"total":12.5,"currency":"GBP"}"#;
/// let value = losslessjson::registry().deserialize("Invoice", doc)?;
/// assert!(value.extra_properties().contains("currency"));
/// # Ok(())
/// # }
/// ```
pub fn synthesize<T>() -> Result<SynthesizedType>
where
    T: DeserializeOwned + Serialize + Send + Sync + 'static,
{
    LosslessRegistry::global().synthesize::<T>()
}

/// The global registry shared by the whole process.
pub fn registry() -> &'static LosslessRegistry {
    LosslessRegistry::global()
}
