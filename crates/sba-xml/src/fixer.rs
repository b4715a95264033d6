//! Reorder an existing document's children into schema order.
//!
//! Only order changes: names, text, attributes and element counts are kept.
//! Children of a known group are stably sorted by their contract index;
//! children the contract does not know keep their relative order after
//! every known child. Elements that are not known groups are left as is.

use sba_map::{GroupOrder, SchemaOrderContract};
use sba_model::{ElementNode, UnknownChildPolicy};
use serde::Serialize;
use tracing::debug;

use crate::error::FixError;

/// Counters for one reordered document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FixStats {
    /// Direct children of the document root.
    pub records: usize,
    /// Records with at least one reordered group.
    pub records_reordered: usize,
    pub groups_checked: usize,
    pub groups_reordered: usize,
    pub unknown_children: usize,
}

impl FixStats {
    pub fn changed(&self) -> bool {
        self.groups_reordered > 0
    }
}

/// A group whose known children are out of order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderViolation {
    /// `/`-separated element names from the document root.
    pub path: String,
    pub found: Vec<String>,
    pub expected: Vec<String>,
}

/// Returns a reordered copy of `root`.
pub fn reorder(
    root: &ElementNode,
    contract: &SchemaOrderContract,
    policy: UnknownChildPolicy,
) -> Result<(ElementNode, FixStats), FixError> {
    let mut fixed = root.clone();
    let stats = reorder_in_place(&mut fixed, contract, policy)?;
    Ok((fixed, stats))
}

/// Reorders `root` in place.
///
/// With [`UnknownChildPolicy::Reject`] the tree is scanned first and left
/// untouched when any known group holds an unknown child.
pub fn reorder_in_place(
    root: &mut ElementNode,
    contract: &SchemaOrderContract,
    policy: UnknownChildPolicy,
) -> Result<FixStats, FixError> {
    if policy == UnknownChildPolicy::Reject
        && let Some((parent, child)) = first_unknown_child(root, contract)
    {
        return Err(FixError::UnknownChild {
            parent: parent.to_string(),
            child: child.to_string(),
        });
    }

    let mut stats = FixStats {
        records: root.children.len(),
        ..FixStats::default()
    };
    for record in &mut root.children {
        let before = stats.groups_reordered;
        reorder_node(record, contract, &mut stats);
        if stats.groups_reordered > before {
            stats.records_reordered += 1;
        }
    }
    reorder_children(root, contract, &mut stats);
    debug!(
        records = stats.records,
        records_reordered = stats.records_reordered,
        groups_reordered = stats.groups_reordered,
        unknown_children = stats.unknown_children,
        "document reordered"
    );
    Ok(stats)
}

fn reorder_node(node: &mut ElementNode, contract: &SchemaOrderContract, stats: &mut FixStats) {
    for child in &mut node.children {
        reorder_node(child, contract, stats);
    }
    reorder_children(node, contract, stats);
}

fn reorder_children(node: &mut ElementNode, contract: &SchemaOrderContract, stats: &mut FixStats) {
    let Some(group) = contract.group(&node.name) else {
        return;
    };
    stats.groups_checked += 1;
    stats.unknown_children += node
        .children
        .iter()
        .filter(|child| group.order_of(&child.name).is_none())
        .count();
    if !node.children.is_sorted_by_key(|child| sort_key(group, child)) {
        node.children.sort_by_key(|child| sort_key(group, child));
        stats.groups_reordered += 1;
    }
}

/// Known children by index, unknown ones after all of them.
fn sort_key(group: &GroupOrder, child: &ElementNode) -> (bool, u16) {
    match group.order_of(&child.name) {
        Some(order) => (false, order),
        None => (true, 0),
    }
}

fn first_unknown_child<'a>(
    node: &'a ElementNode,
    contract: &SchemaOrderContract,
) -> Option<(&'a str, &'a str)> {
    if let Some(group) = contract.group(&node.name)
        && let Some(child) = node
            .children
            .iter()
            .find(|child| group.order_of(&child.name).is_none())
    {
        return Some((node.name.as_str(), child.name.as_str()));
    }
    node.children
        .iter()
        .find_map(|child| first_unknown_child(child, contract))
}

/// Lists every known group whose known children are out of order, in
/// document order. Read-only.
pub fn order_violations(root: &ElementNode, contract: &SchemaOrderContract) -> Vec<OrderViolation> {
    let mut violations = Vec::new();
    collect_violations(root, contract, &mut Vec::new(), &mut violations);
    violations
}

fn collect_violations<'a>(
    node: &'a ElementNode,
    contract: &SchemaOrderContract,
    path: &mut Vec<&'a str>,
    out: &mut Vec<OrderViolation>,
) {
    path.push(&node.name);
    if let Some(group) = contract.group(&node.name) {
        let known: Vec<&ElementNode> = node
            .children
            .iter()
            .filter(|child| group.order_of(&child.name).is_some())
            .collect();
        if !known.is_sorted_by_key(|child| group.order_of(&child.name)) {
            let mut expected = known.clone();
            expected.sort_by_key(|child| group.order_of(&child.name));
            out.push(OrderViolation {
                path: path.join("/"),
                found: known.iter().map(|child| child.name.clone()).collect(),
                expected: expected.iter().map(|child| child.name.clone()).collect(),
            });
        }
    }
    for child in &node.children {
        collect_violations(child, contract, path, out);
    }
    path.pop();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract() -> SchemaOrderContract {
        SchemaOrderContract::from_groups([
            ("Report", &["Record"][..]),
            ("Record", &["Id", "Name", "Address"][..]),
            ("Address", &["Street", "City", "Zip"][..]),
        ])
        .expect("contract")
    }

    fn record(children: &[&str]) -> ElementNode {
        let mut node = ElementNode::new("Record");
        for name in children {
            node.push(ElementNode::leaf(*name, format!("{name} value")));
        }
        node
    }

    #[test]
    fn sorts_known_children_and_counts_records() {
        let document = ElementNode::new("Report")
            .with_child(record(&["Name", "Id"]))
            .with_child(record(&["Id", "Name"]));
        let (fixed, stats) =
            reorder(&document, &contract(), UnknownChildPolicy::AppendAfterKnown).expect("fix");
        assert_eq!(fixed.children[0].child_names(), vec!["Id", "Name"]);
        assert_eq!(fixed.children[0].text_at("Name"), Some("Name value"));
        assert_eq!(stats.records, 2);
        assert_eq!(stats.records_reordered, 1);
        assert_eq!(stats.groups_reordered, 1);
    }

    #[test]
    fn unknown_children_follow_known_ones() {
        let mut node = record(&["Extra", "Name", "Note", "Id"]);
        let stats = reorder_in_place(&mut node, &contract(), UnknownChildPolicy::AppendAfterKnown)
            .expect("fix");
        assert_eq!(node.child_names(), vec!["Id", "Name", "Extra", "Note"]);
        assert_eq!(stats.unknown_children, 2);
    }

    #[test]
    fn reject_policy_leaves_tree_untouched() {
        let mut node = ElementNode::new("Report").with_child(record(&["Name", "Extra", "Id"]));
        let original = node.clone();
        let err = reorder_in_place(&mut node, &contract(), UnknownChildPolicy::Reject)
            .expect_err("unknown child");
        assert_eq!(
            err,
            FixError::UnknownChild {
                parent: "Record".to_string(),
                child: "Extra".to_string(),
            }
        );
        assert_eq!(node, original);
    }

    #[test]
    fn violations_report_paths() {
        let address = ElementNode::new("Address")
            .with_child(ElementNode::leaf("Zip", "50312"))
            .with_child(ElementNode::leaf("City", "Ames"));
        let document = ElementNode::new("Report").with_child(
            record(&["Id"]).with_child(address),
        );
        let violations = order_violations(&document, &contract());
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "Report/Record/Address");
        assert_eq!(violations[0].expected, vec!["City", "Zip"]);
    }
}
