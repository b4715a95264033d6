//! Schema order contract: per group element, the required order of its
//! child element names.

use std::collections::BTreeMap;

use sba_model::ContractError;

/// Child order for one group element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupOrder {
    children: BTreeMap<String, u16>,
}

impl GroupOrder {
    pub fn order_of(&self, child: &str) -> Option<u16> {
        self.children.get(child).copied()
    }

    /// Child names sorted by order index.
    pub fn children(&self) -> Vec<&str> {
        let mut children: Vec<(&str, u16)> = self
            .children
            .iter()
            .map(|(name, order)| (name.as_str(), *order))
            .collect();
        children.sort_by_key(|(_, order)| *order);
        children.into_iter().map(|(name, _)| name).collect()
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

/// Group element name to its child order.
///
/// Keyed by element name rather than path: the reorderer works on parsed
/// documents where only names are known. A name used for two groups must
/// agree on every shared child's index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaOrderContract {
    groups: BTreeMap<String, GroupOrder>,
}

impl SchemaOrderContract {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a contract from `(group, children-in-order)` pairs.
    pub fn from_groups<'a>(
        groups: impl IntoIterator<Item = (&'a str, &'a [&'a str])>,
    ) -> Result<Self, ContractError> {
        let mut contract = Self::new();
        for (group, children) in groups {
            contract.declare_group(group);
            for (index, child) in children.iter().enumerate() {
                let order = u16::try_from(index).unwrap_or(u16::MAX);
                contract.insert_child(group, child, order)?;
            }
        }
        Ok(contract)
    }

    /// Registers `group` as known even if it has no children yet.
    pub fn declare_group(&mut self, group: &str) {
        self.groups.entry(group.to_string()).or_default();
    }

    pub fn insert_child(&mut self, group: &str, child: &str, order: u16) -> Result<(), ContractError> {
        let entry = self.groups.entry(group.to_string()).or_default();
        match entry.children.get(child) {
            Some(existing) if *existing != order => Err(ContractError::ConflictingGroupOrder {
                group: group.to_string(),
                child: child.to_string(),
                first: *existing,
                second: order,
            }),
            Some(_) => Ok(()),
            None => {
                entry.children.insert(child.to_string(), order);
                Ok(())
            }
        }
    }

    pub fn group(&self, name: &str) -> Option<&GroupOrder> {
        self.groups.get(name)
    }

    pub fn is_group(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn order_of(&self, group: &str, child: &str) -> Option<u16> {
        self.groups.get(group)?.order_of(child)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&str, &GroupOrder)> {
        self.groups.iter().map(|(name, order)| (name.as_str(), order))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
