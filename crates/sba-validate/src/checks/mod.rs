//! Individual checks run by the [`crate::Validator`].
//!
//! Each check reads the cleaned record (and, where needed, the registry and
//! run options) and returns issues. Checks never fail; a value they cannot
//! judge is skipped.

pub mod consistency;
pub mod flags;
pub mod format;
pub mod required;

use sba_map::MappingRegistry;
use sba_model::CleanedRecord;

/// Column name reported for `path`: the input column that supplied the
/// value, else the mapping's primary source.
pub(crate) fn field_name(registry: &MappingRegistry, cleaned: &CleanedRecord, path: &str) -> String {
    if let Some(source) = cleaned.field(path).and_then(|field| field.source.as_deref()) {
        return source.to_string();
    }
    registry
        .mapping_for(path)
        .map_or(path, |mapping| mapping.primary_source())
        .to_string()
}
