use serde::{Deserialize, Serialize};

/// In-memory XML element.
///
/// Produced by the ordered builder or by parsing an existing document, and
/// consumed by the writer and the reorderer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementNode {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<ElementNode>,
}

impl ElementNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn leaf(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn with_child(mut self, child: ElementNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: ElementNode) {
        self.children.push(child);
    }

    pub fn child(&self, name: &str) -> Option<&ElementNode> {
        self.children.iter().find(|child| child.name == name)
    }

    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ElementNode> {
        self.children.iter().filter(move |child| child.name == name)
    }

    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|child| child.name.as_str()).collect()
    }

    /// Follows a `/`-separated path of child names below this node.
    pub fn find(&self, path: &str) -> Option<&ElementNode> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .try_fold(self, |node, segment| node.child(segment))
    }

    pub fn text_at(&self, path: &str) -> Option<&str> {
        self.find(path).and_then(|node| node.text.as_deref())
    }

    /// Number of elements in this subtree, including this one.
    pub fn element_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(ElementNode::element_count)
            .sum::<usize>()
    }
}
