//! Mapping registry: the validated, immutable table for one document kind.

use std::collections::{BTreeMap, HashMap};

use sba_model::{CleanedRecord, ContractError, DocumentKind};

use crate::contract::SchemaOrderContract;
use crate::mapping::{Condition, FieldMapping, Role};

/// Static description of one document kind.
#[derive(Debug, Clone, Copy)]
pub struct RegistryDefinition {
    pub kind: DocumentKind,
    /// Document root element wrapping every record.
    pub document_root: &'static str,
    /// Input column used to identify rows in issues.
    pub id_source: &'static str,
    pub mappings: &'static [FieldMapping],
}

/// Validated mapping table.
///
/// Construction checks every structural rule up front, so the builder can
/// assume well-formed parent links and unique per-parent order indices.
#[derive(Debug, Clone)]
pub struct MappingRegistry {
    kind: DocumentKind,
    document_root: &'static str,
    id_source: &'static str,
    root: FieldMapping,
    by_path: HashMap<&'static str, FieldMapping>,
    children: HashMap<&'static str, Vec<FieldMapping>>,
    contract: SchemaOrderContract,
}

impl MappingRegistry {
    pub fn new(definition: &RegistryDefinition) -> Result<Self, ContractError> {
        let mut by_path: HashMap<&'static str, FieldMapping> = HashMap::new();
        for mapping in definition.mappings {
            if by_path.insert(mapping.path, *mapping).is_some() {
                return Err(ContractError::DuplicateElement {
                    path: mapping.path.to_string(),
                });
            }
        }

        let mut roots = definition
            .mappings
            .iter()
            .filter(|mapping| mapping.parent_path().is_none());
        let root = match (roots.next(), roots.next()) {
            (Some(root), None) if root.is_group() => *root,
            (Some(first), _) => {
                return Err(ContractError::MissingRecordRoot {
                    root: first.path.to_string(),
                });
            }
            (None, _) => {
                return Err(ContractError::MissingRecordRoot {
                    root: definition.document_root.to_string(),
                });
            }
        };

        let mut children: HashMap<&'static str, Vec<FieldMapping>> = HashMap::new();
        for mapping in definition.mappings {
            let Some(parent) = mapping.parent_path() else {
                continue;
            };
            match by_path.get(parent) {
                None => {
                    return Err(ContractError::DanglingParent {
                        path: mapping.path.to_string(),
                        parent: parent.to_string(),
                    });
                }
                Some(parent_mapping) if !parent_mapping.is_group() => {
                    return Err(ContractError::NotAGroup {
                        path: mapping.path.to_string(),
                        parent: parent.to_string(),
                    });
                }
                Some(_) => {}
            }
            let siblings = children.entry(parent).or_default();
            if let Some(clash) = siblings.iter().find(|s| s.order == mapping.order) {
                return Err(ContractError::DuplicateOrder {
                    parent: parent.to_string(),
                    order: mapping.order,
                    first: clash.path.to_string(),
                    second: mapping.path.to_string(),
                });
            }
            siblings.push(*mapping);
        }
        for siblings in children.values_mut() {
            siblings.sort_by_key(|mapping| mapping.order);
        }

        let contract = build_contract(definition.document_root, &root, &children)?;

        Ok(Self {
            kind: definition.kind,
            document_root: definition.document_root,
            id_source: definition.id_source,
            root,
            by_path,
            children,
            contract,
        })
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn document_root(&self) -> &'static str {
        self.document_root
    }

    pub fn id_source(&self) -> &'static str {
        self.id_source
    }

    /// The per-row record element (e.g. `CounselingRecord`).
    pub fn record_root(&self) -> &FieldMapping {
        &self.root
    }

    /// Children of `group_path`, sorted by schema order.
    pub fn children_of(&self, group_path: &str) -> &[FieldMapping] {
        self.children
            .get(group_path)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn mapping_for(&self, path: &str) -> Option<&FieldMapping> {
        self.by_path.get(path)
    }

    pub fn condition_of(&self, path: &str) -> Option<&Condition> {
        self.by_path.get(path)?.condition.as_ref()
    }

    /// True when the mapping and every enclosing group apply to `record`.
    pub fn is_applicable(&self, path: &str, record: &CleanedRecord) -> bool {
        let mut current = Some(path);
        while let Some(path) = current {
            if let Some(condition) = self.condition_of(path)
                && !condition.holds(record)
            {
                return false;
            }
            current = path.rsplit_once('/').map(|(parent, _)| parent);
        }
        true
    }

    /// Field mappings in document (pre-order) order.
    pub fn fields(&self) -> Vec<&FieldMapping> {
        let mut fields = Vec::new();
        self.collect_fields(self.root.path, &mut fields);
        fields
    }

    fn collect_fields<'a>(&'a self, group: &str, out: &mut Vec<&'a FieldMapping>) {
        for child in self.children_of(group) {
            match child.role {
                Role::Field => out.push(child),
                Role::Group { .. } => self.collect_fields(child.path, out),
            }
        }
    }

    pub fn contract(&self) -> &SchemaOrderContract {
        &self.contract
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

fn build_contract(
    document_root: &str,
    root: &FieldMapping,
    children: &HashMap<&'static str, Vec<FieldMapping>>,
) -> Result<SchemaOrderContract, ContractError> {
    let mut contract = SchemaOrderContract::new();
    contract.insert_child(document_root, root.element_name(), 0)?;

    // Deterministic iteration keeps conflict errors stable between runs.
    let ordered: BTreeMap<_, _> = children.iter().collect();
    for (parent, siblings) in ordered {
        let group_name = parent.rsplit_once('/').map_or(*parent, |(_, name)| name);
        contract.declare_group(group_name);
        for sibling in siblings {
            contract.insert_child(group_name, sibling.element_name(), sibling.order)?;
        }
    }
    Ok(contract)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::Cleaner;

    fn definition(mappings: &'static [FieldMapping]) -> RegistryDefinition {
        RegistryDefinition {
            kind: DocumentKind::Counseling,
            document_root: "Root",
            id_source: "Id",
            mappings,
        }
    }

    static WELL_FORMED: &[FieldMapping] = &[
        FieldMapping::group("Record", 0),
        FieldMapping::field("Record/B", 1, &["b"], Cleaner::Text { max_len: None }),
        FieldMapping::field("Record/A", 0, &["a"], Cleaner::Text { max_len: None }),
        FieldMapping::group("Record/G", 2),
        FieldMapping::field("Record/G/X", 0, &["x"], Cleaner::Text { max_len: None }),
    ];

    #[test]
    fn children_are_sorted_and_fields_pre_ordered() {
        let registry = MappingRegistry::new(&definition(WELL_FORMED)).expect("registry");
        let names: Vec<_> = registry
            .children_of("Record")
            .iter()
            .map(FieldMapping::element_name)
            .collect();
        assert_eq!(names, vec!["A", "B", "G"]);
        let fields: Vec<_> = registry.fields().iter().map(|m| m.path).collect();
        assert_eq!(fields, vec!["Record/A", "Record/B", "Record/G/X"]);
        assert_eq!(registry.contract().order_of("Root", "Record"), Some(0));
        assert_eq!(registry.contract().order_of("G", "X"), Some(0));
    }

    static DUPLICATE_ORDER: &[FieldMapping] = &[
        FieldMapping::group("Record", 0),
        FieldMapping::field("Record/A", 0, &["a"], Cleaner::Text { max_len: None }),
        FieldMapping::field("Record/B", 0, &["b"], Cleaner::Text { max_len: None }),
    ];

    #[test]
    fn duplicate_order_is_fatal() {
        let err = MappingRegistry::new(&definition(DUPLICATE_ORDER)).expect_err("clash");
        assert!(matches!(err, ContractError::DuplicateOrder { order: 0, .. }));
    }

    static DANGLING: &[FieldMapping] = &[
        FieldMapping::group("Record", 0),
        FieldMapping::field("Record/Missing/A", 0, &["a"], Cleaner::Text { max_len: None }),
    ];

    #[test]
    fn dangling_parent_is_fatal() {
        let err = MappingRegistry::new(&definition(DANGLING)).expect_err("dangling");
        assert!(matches!(err, ContractError::DanglingParent { .. }));
    }

    static FIELD_AS_PARENT: &[FieldMapping] = &[
        FieldMapping::group("Record", 0),
        FieldMapping::field("Record/A", 0, &["a"], Cleaner::Text { max_len: None }),
        FieldMapping::field("Record/A/B", 0, &["b"], Cleaner::Text { max_len: None }),
    ];

    #[test]
    fn field_cannot_have_children() {
        let err = MappingRegistry::new(&definition(FIELD_AS_PARENT)).expect_err("not a group");
        assert!(matches!(err, ContractError::NotAGroup { .. }));
    }

    static DUPLICATE_PATH: &[FieldMapping] = &[
        FieldMapping::group("Record", 0),
        FieldMapping::field("Record/A", 0, &["a"], Cleaner::Text { max_len: None }),
        FieldMapping::field("Record/A", 1, &["a2"], Cleaner::Text { max_len: None }),
    ];

    #[test]
    fn duplicate_path_is_fatal() {
        let err = MappingRegistry::new(&definition(DUPLICATE_PATH)).expect_err("duplicate");
        assert!(matches!(err, ContractError::DuplicateElement { .. }));
    }

    static CONFLICTING_NAMES: &[FieldMapping] = &[
        FieldMapping::group("Record", 0),
        FieldMapping::group("Record/P", 0),
        FieldMapping::group("Record/P/Country", 0),
        FieldMapping::field("Record/P/Country/Code", 0, &["c"], Cleaner::Country),
        FieldMapping::group("Record/Q", 1),
        FieldMapping::group("Record/Q/Country", 0),
        FieldMapping::field("Record/Q/Country/Name", 0, &["n"], Cleaner::Country),
        FieldMapping::field("Record/Q/Country/Code", 1, &["c2"], Cleaner::Country),
    ];

    #[test]
    fn same_group_name_must_agree_on_order() {
        let err = MappingRegistry::new(&definition(CONFLICTING_NAMES)).expect_err("conflict");
        assert!(matches!(
            err,
            ContractError::ConflictingGroupOrder { ref group, .. } if group == "Country"
        ));
    }
}
