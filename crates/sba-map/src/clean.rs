use sba_model::{CleanedField, CleanedRecord, CleanedValue, ConversionOptions, Record};
use sba_transform::split_multi_value;

use crate::mapping::{FieldMapping, Multiplicity};
use crate::registry::MappingRegistry;

/// Applies every field mapping's cleaner to one input record.
///
/// Repeated mappings are split first and each token is cleaned on its own;
/// tokens that clean to nothing are dropped and their flags kept.
pub fn clean_record(
    registry: &MappingRegistry,
    options: &ConversionOptions,
    record: &Record,
) -> CleanedRecord {
    let mut cleaned =
        CleanedRecord::new(record.row_index(), record.row_id(registry.id_source()));
    for mapping in registry.fields() {
        cleaned.insert(mapping.path, clean_field(mapping, options, record));
    }
    cleaned
}

pub fn clean_field(
    mapping: &FieldMapping,
    options: &ConversionOptions,
    record: &Record,
) -> CleanedField {
    let Some((source, raw)) = record.first_value(mapping.sources) else {
        return CleanedField::default();
    };

    match mapping.multiplicity {
        Multiplicity::Single => {
            let result = mapping.cleaner.apply(raw, record, options);
            CleanedField {
                value: result.value,
                flags: result.flag.into_iter().collect(),
                source: Some(source.to_string()),
            }
        }
        Multiplicity::Repeated { delimiters } => {
            let mut values = Vec::new();
            let mut flags = Vec::new();
            for token in split_multi_value(raw, delimiters) {
                let result = mapping.cleaner.apply(&token, record, options);
                values.extend(result.value.values().into_iter().map(str::to_string));
                flags.extend(result.flag);
            }
            CleanedField {
                value: CleanedValue::List(values),
                flags,
                source: Some(source.to_string()),
            }
        }
    }
}
