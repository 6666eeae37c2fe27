//! # Render Tree
//!
//! The slice of the DOM the editor needs, addressed purely by element id.
//!
//! The browser implementation lives in the wasm bindings; [`MemoryTree`] is
//! an in-memory stand-in used by tests and native hosts. Operations on ids
//! that are not present return `false`/`None` rather than failing.

use std::collections::{BTreeMap, HashMap};

use crate::VNode;

/// Id-addressed view of a rendered element tree
pub trait RenderTree {
    /// Whether an element with `id` is attached to the tree
    fn contains(&self, id: &str) -> bool;

    /// Append `node` as the last child of `parent_id`
    fn append_child(&mut self, parent_id: &str, node: &VNode) -> bool;

    /// Move the element `id` under `parent_id`, just before `reference_id`
    /// (or to the end when `reference_id` is `None`)
    fn insert_before(&mut self, parent_id: &str, id: &str, reference_id: Option<&str>) -> bool;

    /// Detach the element `id` and its subtree
    fn remove(&mut self, id: &str) -> bool;

    /// Ids of the element children of `parent_id`, in order
    fn child_ids(&self, parent_id: &str) -> Vec<String>;

    /// Replace all children of `id` with `node`
    fn replace_children(&mut self, id: &str, node: &VNode) -> bool;

    fn add_class(&mut self, id: &str, class: &str) -> bool;

    fn remove_class(&mut self, id: &str, class: &str) -> bool;

    fn has_class(&self, id: &str, class: &str) -> bool;
}

#[derive(Debug, Clone)]
struct MemNode {
    tag: Option<String>,
    attributes: BTreeMap<String, String>,
    text: String,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Arena-backed [`RenderTree`]
///
/// Detached subtrees stay in the arena but are unreachable by id.
#[derive(Debug, Clone)]
pub struct MemoryTree {
    nodes: Vec<MemNode>,
    ids: HashMap<String, usize>,
    root: usize,
}

impl MemoryTree {
    /// Empty tree with a `body` root
    pub fn new() -> Self {
        Self {
            nodes: vec![MemNode {
                tag: Some("body".to_string()),
                attributes: BTreeMap::new(),
                text: String::new(),
                parent: None,
                children: Vec::new(),
            }],
            ids: HashMap::new(),
            root: 0,
        }
    }

    /// Tree whose body holds one empty `div#<container_id>`
    pub fn with_container(container_id: &str) -> Self {
        let mut tree = Self::new();
        tree.mount(&VNode::element("div").with_id(container_id));
        tree
    }

    /// Append `node` to the body
    pub fn mount(&mut self, node: &VNode) {
        let idx = self.insert(node, self.root);
        self.nodes[self.root].children.push(idx);
    }

    pub fn attribute(&self, id: &str, name: &str) -> Option<String> {
        let idx = *self.ids.get(id)?;
        self.nodes[idx].attributes.get(name).cloned()
    }

    /// Rebuild the element `id` (with its subtree) as a [`VNode`]
    pub fn snapshot(&self, id: &str) -> Option<VNode> {
        self.ids.get(id).map(|idx| self.to_vnode(*idx))
    }

    /// Rebuild the children of `id`
    pub fn children_snapshot(&self, id: &str) -> Vec<VNode> {
        match self.ids.get(id) {
            Some(idx) => self.nodes[*idx]
                .children
                .iter()
                .map(|child| self.to_vnode(*child))
                .collect(),
            None => Vec::new(),
        }
    }

    fn to_vnode(&self, idx: usize) -> VNode {
        let node = &self.nodes[idx];
        match &node.tag {
            Some(tag) => VNode::Element {
                tag: tag.clone(),
                attributes: node.attributes.clone(),
                children: node.children.iter().map(|c| self.to_vnode(*c)).collect(),
            },
            None => VNode::text(node.text.clone()),
        }
    }

    fn insert(&mut self, node: &VNode, parent: usize) -> usize {
        let idx = self.nodes.len();
        match node {
            VNode::Element {
                tag,
                attributes,
                children,
            } => {
                self.nodes.push(MemNode {
                    tag: Some(tag.clone()),
                    attributes: attributes.clone(),
                    text: String::new(),
                    parent: Some(parent),
                    children: Vec::new(),
                });
                if let Some(id) = attributes.get("id") {
                    self.ids.entry(id.clone()).or_insert(idx);
                }
                for child in children {
                    let child_idx = self.insert(child, idx);
                    self.nodes[idx].children.push(child_idx);
                }
            }
            VNode::Text { content } => {
                self.nodes.push(MemNode {
                    tag: None,
                    attributes: BTreeMap::new(),
                    text: content.clone(),
                    parent: Some(parent),
                    children: Vec::new(),
                });
            }
        }
        idx
    }

    fn detach(&mut self, idx: usize) {
        if let Some(parent) = self.nodes[idx].parent.take() {
            self.nodes[parent].children.retain(|c| *c != idx);
        }
    }

    fn unregister(&mut self, idx: usize) {
        if let Some(id) = self.nodes[idx].attributes.get("id") {
            if self.ids.get(id) == Some(&idx) {
                self.ids.remove(id);
            }
        }
        for child in self.nodes[idx].children.clone() {
            self.unregister(child);
        }
    }

    fn element_id(&self, idx: usize) -> Option<String> {
        self.nodes[idx].attributes.get("id").cloned()
    }

    fn classes(&self, idx: usize) -> Vec<String> {
        self.nodes[idx]
            .attributes
            .get("class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    fn set_classes(&mut self, idx: usize, classes: Vec<String>) {
        self.nodes[idx]
            .attributes
            .insert("class".to_string(), classes.join(" "));
    }
}

impl Default for MemoryTree {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderTree for MemoryTree {
    fn contains(&self, id: &str) -> bool {
        self.ids.contains_key(id)
    }

    fn append_child(&mut self, parent_id: &str, node: &VNode) -> bool {
        let Some(parent) = self.ids.get(parent_id).copied() else {
            return false;
        };
        let idx = self.insert(node, parent);
        self.nodes[parent].children.push(idx);
        true
    }

    fn insert_before(&mut self, parent_id: &str, id: &str, reference_id: Option<&str>) -> bool {
        let (Some(parent), Some(idx)) = (self.ids.get(parent_id).copied(), self.ids.get(id).copied())
        else {
            return false;
        };
        if reference_id == Some(id) {
            return true;
        }
        let reference = match reference_id {
            Some(reference_id) => match self.ids.get(reference_id) {
                Some(r) if self.nodes[*r].parent == Some(parent) => Some(*r),
                _ => return false,
            },
            None => None,
        };

        self.detach(idx);
        let children = &mut self.nodes[parent].children;
        let at = reference
            .and_then(|r| children.iter().position(|c| *c == r))
            .unwrap_or(children.len());
        children.insert(at, idx);
        self.nodes[idx].parent = Some(parent);
        true
    }

    fn remove(&mut self, id: &str) -> bool {
        let Some(idx) = self.ids.get(id).copied() else {
            return false;
        };
        self.detach(idx);
        self.unregister(idx);
        true
    }

    fn child_ids(&self, parent_id: &str) -> Vec<String> {
        match self.ids.get(parent_id) {
            Some(parent) => self.nodes[*parent]
                .children
                .iter()
                .filter_map(|c| self.element_id(*c))
                .collect(),
            None => Vec::new(),
        }
    }

    fn replace_children(&mut self, id: &str, node: &VNode) -> bool {
        let Some(idx) = self.ids.get(id).copied() else {
            return false;
        };
        for child in std::mem::take(&mut self.nodes[idx].children) {
            self.nodes[child].parent = None;
            self.unregister(child);
        }
        let child = self.insert(node, idx);
        self.nodes[idx].children.push(child);
        true
    }

    fn add_class(&mut self, id: &str, class: &str) -> bool {
        let Some(idx) = self.ids.get(id).copied() else {
            return false;
        };
        let mut classes = self.classes(idx);
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
        }
        self.set_classes(idx, classes);
        true
    }

    fn remove_class(&mut self, id: &str, class: &str) -> bool {
        let Some(idx) = self.ids.get(id).copied() else {
            return false;
        };
        let mut classes = self.classes(idx);
        classes.retain(|c| c != class);
        self.set_classes(idx, classes);
        true
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.ids
            .get(id)
            .map(|idx| self.classes(*idx).iter().any(|c| c == class))
            .unwrap_or(false)
    }
}
