//! Ordered builder: cleaned records to element trees in schema order.
//!
//! Children are visited in the registry's per-group order, so the output
//! is ordered by construction and never needs a reordering pass.

use sba_map::{FieldMapping, MappingRegistry, Role};
use sba_model::{CleanedRecord, ConversionOptions, ElementNode};

/// What the builder does with one field mapping for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Cleaned values, one element per value.
    Emit(Vec<String>),
    /// Value absent; the mapping's fallback is written instead.
    EmitDefault(String),
    Omit,
}

/// Decides the output for a field mapping.
///
/// A mapping whose condition (or an enclosing group's condition) fails is
/// omitted even when it has a value or a fallback.
pub fn decide(
    mapping: &FieldMapping,
    registry: &MappingRegistry,
    options: &ConversionOptions,
    cleaned: &CleanedRecord,
) -> Decision {
    if !registry.is_applicable(mapping.path, cleaned) {
        return Decision::Omit;
    }
    let value = cleaned.value(mapping.path);
    if !value.is_absent() {
        return Decision::Emit(value.values().into_iter().map(str::to_string).collect());
    }
    match mapping.fallback {
        Some(fallback) => Decision::EmitDefault(fallback.resolve(options, cleaned.row_id())),
        None => Decision::Omit,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct OrderedBuilder<'a> {
    registry: &'a MappingRegistry,
    options: &'a ConversionOptions,
}

impl<'a> OrderedBuilder<'a> {
    pub fn new(registry: &'a MappingRegistry, options: &'a ConversionOptions) -> Self {
        Self { registry, options }
    }

    /// Builds the record element (e.g. `CounselingRecord`). The record root
    /// is always emitted, even when every child is omitted.
    pub fn build_record(&self, cleaned: &CleanedRecord) -> ElementNode {
        let root = self.registry.record_root();
        let mut node = ElementNode::new(root.element_name());
        self.fill_group(root.path, cleaned, &mut node);
        node
    }

    /// Wraps record elements in the document root, keeping their order.
    pub fn build_document(&self, records: impl IntoIterator<Item = ElementNode>) -> ElementNode {
        let mut document = ElementNode::new(self.registry.document_root());
        document.children.extend(records);
        document
    }

    fn build_group(&self, mapping: &FieldMapping, cleaned: &CleanedRecord) -> Option<ElementNode> {
        if !self.registry.is_applicable(mapping.path, cleaned) {
            return None;
        }
        let mut node = ElementNode::new(mapping.element_name());
        self.fill_group(mapping.path, cleaned, &mut node);
        let keep_empty = matches!(mapping.role, Role::Group { keep_empty: true });
        (keep_empty || !node.children.is_empty()).then_some(node)
    }

    fn fill_group(&self, path: &str, cleaned: &CleanedRecord, node: &mut ElementNode) {
        for child in self.registry.children_of(path) {
            match child.role {
                Role::Group { .. } => {
                    if let Some(group) = self.build_group(child, cleaned) {
                        node.push(group);
                    }
                }
                Role::Field => match decide(child, self.registry, self.options, cleaned) {
                    Decision::Emit(values) => {
                        for value in values {
                            node.push(ElementNode::leaf(child.element_name(), value));
                        }
                    }
                    Decision::EmitDefault(value) => {
                        node.push(ElementNode::leaf(child.element_name(), value));
                    }
                    Decision::Omit => {}
                },
            }
        }
    }
}

/// Builds one record element with a throwaway builder.
pub fn build(
    registry: &MappingRegistry,
    options: &ConversionOptions,
    cleaned: &CleanedRecord,
) -> ElementNode {
    OrderedBuilder::new(registry, options).build_record(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sba_map::{clean_record, registry};
    use sba_model::{DocumentKind, Record};

    #[test]
    fn emits_defaults_and_skips_empty_groups() {
        let registry = registry(DocumentKind::Counseling).expect("registry");
        let options = ConversionOptions::default();
        let record = Record::from_pairs(3, [("Contact ID", "C-3"), ("Activity ID", "A-3")]);
        let cleaned = clean_record(&registry, &options, &record);
        let node = build(&registry, &options, &cleaned);

        assert_eq!(node.name, "CounselingRecord");
        assert_eq!(node.text_at("PartnerClientNumber"), Some("C-3"));
        assert_eq!(node.text_at("Location/LocationCode"), Some("249003"));
        assert_eq!(
            node.text_at("CounselorRecord/SessionType"),
            Some("Telephone")
        );
        assert!(node.find("ClientRequest/ClientNamePart1").is_none());
        // Not in business, so the legal entity group is left out despite its default.
        assert!(node.find("ClientIntake/LegalEntity").is_none());
    }

    #[test]
    fn record_root_survives_empty_input() {
        let registry = registry(DocumentKind::Counseling).expect("registry");
        let options = ConversionOptions::default();
        let cleaned = clean_record(&registry, &options, &Record::new(1));
        let node = build(&registry, &options, &cleaned);
        assert_eq!(node.name, "CounselingRecord");
        assert!(node.child("PartnerClientNumber").is_none());
    }

    #[test]
    fn repeated_values_are_contiguous_siblings() {
        let registry = registry(DocumentKind::Counseling).expect("registry");
        let options = ConversionOptions::default();
        let record = Record::from_pairs(
            1,
            [
                ("Contact ID", "C-1"),
                ("Race", "Asian;White"),
                ("Self-Described Race", "Mixed"),
            ],
        );
        let cleaned = clean_record(&registry, &options, &record);
        let node = build(&registry, &options, &cleaned);
        let race = node.find("ClientIntake/Race").expect("race");
        assert_eq!(race.child_names(), vec!["Code", "Code", "SelfDescribedRace"]);
    }

    #[test]
    fn civilian_status_drops_a_supplied_branch() {
        let registry = registry(DocumentKind::Counseling).expect("registry");
        let options = ConversionOptions::default();
        let record = Record::from_pairs(
            4,
            [
                ("Contact ID", "C-4"),
                ("Veteran Status", "Civilian"),
                ("Branch Of Service", "Navy"),
            ],
        );
        let cleaned = clean_record(&registry, &options, &record);
        let node = build(&registry, &options, &cleaned);
        let intake = node.child("ClientIntake").expect("intake");
        assert_eq!(intake.text_at("MilitaryStatus"), Some("Civilian"));
        assert!(intake.child("BranchOfService").is_none());

        let record = record.with_field("Veteran Status", "Veteran");
        let cleaned = clean_record(&registry, &options, &record);
        let node = build(&registry, &options, &cleaned);
        assert_eq!(node.text_at("ClientIntake/BranchOfService"), Some("Navy"));
    }

    #[test]
    fn empty_multi_value_cell_emits_nothing() {
        let registry = registry(DocumentKind::Counseling).expect("registry");
        let options = ConversionOptions::default();
        let record = Record::from_pairs(
            5,
            [
                ("Contact ID", "C-5"),
                ("What Prompted you to contact us?", ""),
                ("Race", "Black;White;Asian"),
            ],
        );
        let cleaned = clean_record(&registry, &options, &record);
        let node = build(&registry, &options, &cleaned);
        let intake = node.child("ClientIntake").expect("intake");
        assert!(intake.child("Media").is_none());

        let race: Vec<_> = intake
            .find("Race")
            .expect("race")
            .children_named("Code")
            .filter_map(|code| code.text.as_deref())
            .collect();
        assert_eq!(race, vec!["Black", "White", "Asian"]);
    }
}
