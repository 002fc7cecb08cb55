pub mod error;
pub mod shape;

pub use error::{Result, SynthesisError};
pub use shape::TypeShape;
