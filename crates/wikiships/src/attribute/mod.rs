//! Attribute schema: definitions, transforms and the registry.

mod definition;
mod registry;
mod transform;

pub use definition::AttributeDefinition;
pub use registry::AttributeRegistry;
pub use transform::Transform;

use thiserror::Error;

/// Recoverable signal that one side of a comparison has no value.
///
/// Both cases are routine: many ships lack a stored value for an attribute,
/// and many pages simply do not state one. Callers treat either as "no value"
/// and carry on with the remaining attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NotPresent {
    /// The database record has no entry for the attribute's storage key.
    #[error("no value in database record")]
    InRecord,
    /// The page text does not contain the attribute's pattern.
    #[error("no value on wiki page")]
    OnPage,
}
