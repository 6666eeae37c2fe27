use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Virtual DOM node
///
/// Attributes are kept sorted so rendered markup is deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VNode {
    /// HTML (or inline SVG) element
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        children: Vec<VNode>,
    },

    /// Text node
    Text { content: String },
}

impl VNode {
    pub fn element(tag: impl Into<String>) -> Self {
        VNode::Element {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        VNode::Text {
            content: content.into(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            attributes.insert(key.into(), value.into());
        }
        self
    }

    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    /// Append a class to the `class` attribute
    pub fn with_class(mut self, class: impl AsRef<str>) -> Self {
        if let VNode::Element {
            ref mut attributes, ..
        } = self
        {
            let entry = attributes.entry("class".to_string()).or_default();
            if !entry.is_empty() {
                entry.push(' ');
            }
            entry.push_str(class.as_ref());
        }
        self
    }

    pub fn with_child(mut self, child: VNode) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.push(child);
        }
        self
    }

    pub fn with_children(mut self, new_children: impl IntoIterator<Item = VNode>) -> Self {
        if let VNode::Element {
            ref mut children, ..
        } = self
        {
            children.extend(new_children);
        }
        self
    }

    pub fn tag(&self) -> Option<&str> {
        match self {
            VNode::Element { tag, .. } => Some(tag),
            VNode::Text { .. } => None,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            VNode::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            VNode::Text { .. } => None,
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.attribute("id")
    }

    pub fn classes(&self) -> Vec<&str> {
        self.attribute("class")
            .map(|c| c.split_whitespace().collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes().contains(&class)
    }

    pub fn children(&self) -> &[VNode] {
        match self {
            VNode::Element { children, .. } => children,
            VNode::Text { .. } => &[],
        }
    }

    /// Depth-first search for the element carrying `id` (including self)
    pub fn find_by_id(&self, id: &str) -> Option<&VNode> {
        if self.id() == Some(id) {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find_by_id(id))
    }

    /// Every element id in this subtree, in document order
    pub fn ids(&self) -> Vec<String> {
        let mut ids = Vec::new();
        self.collect_ids(&mut ids);
        ids
    }

    fn collect_ids(&self, ids: &mut Vec<String>) {
        if let Some(id) = self.id() {
            ids.push(id.to_string());
        }
        for child in self.children() {
            child.collect_ids(ids);
        }
    }

    /// Concatenated text of this subtree
    pub fn text_content(&self) -> String {
        match self {
            VNode::Text { content } => content.clone(),
            VNode::Element { children, .. } => {
                children.iter().map(VNode::text_content).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_queries() {
        let node = VNode::element("div")
            .with_id("outer")
            .with_class("a")
            .with_class("b")
            .with_child(VNode::element("span").with_id("inner").with_child(VNode::text("hi")));

        assert_eq!(node.tag(), Some("div"));
        assert_eq!(node.classes(), vec!["a", "b"]);
        assert!(node.has_class("b"));
        assert_eq!(node.ids(), vec!["outer", "inner"]);
        assert_eq!(node.find_by_id("inner").and_then(VNode::tag), Some("span"));
        assert_eq!(node.text_content(), "hi");
    }

    #[test]
    fn test_text_nodes_ignore_element_builders() {
        let node = VNode::text("plain").with_attr("id", "x").with_class("c");
        assert_eq!(node, VNode::text("plain"));
        assert!(node.children().is_empty());
    }
}
