//! Mapping registries for the SBA counseling and training documents.
//!
//! A registry is a static table of [`FieldMapping`] entries, validated once
//! by [`MappingRegistry::new`]. The validated registry owns the
//! [`SchemaOrderContract`] used by both the builder and the reorderer, so
//! generated and repaired documents agree on child order.

pub mod clean;
pub mod cleaner;
pub mod contract;
pub mod counseling;
pub mod mapping;
pub mod registry;
pub mod training;

use sba_model::{ContractError, DocumentKind};
use tracing::debug;

pub use clean::{clean_field, clean_record};
pub use cleaner::Cleaner;
pub use contract::{GroupOrder, SchemaOrderContract};
pub use mapping::{Condition, Fallback, FieldMapping, Multiplicity, Requirement, Role};
pub use registry::{MappingRegistry, RegistryDefinition};

/// Static definition for `kind`.
pub fn definition(kind: DocumentKind) -> &'static RegistryDefinition {
    match kind {
        DocumentKind::Counseling => &counseling::DEFINITION,
        DocumentKind::Training => &training::DEFINITION,
    }
}

/// Builds and validates the registry for `kind`.
pub fn registry(kind: DocumentKind) -> Result<MappingRegistry, ContractError> {
    let registry = MappingRegistry::new(definition(kind))?;
    debug!(
        kind = %kind,
        mappings = registry.len(),
        groups = registry.contract().len(),
        "mapping registry loaded"
    );
    Ok(registry)
}
