//! In-memory score tree
//!
//! A small arena-backed element tree for MusicXML documents. Decoration
//! resolves elements first and mutates them afterwards, so nodes are
//! addressed by copyable [`NodeId`]s rather than references; the same id may
//! appear more than once in a resolved list.

pub mod loader;
pub mod writer;

pub use loader::{load_musicxml, ParseError};
pub use writer::write_musicxml;

/// Index of an element inside a [`ScoreTree`] arena.
///
/// Ids are only meaningful for the tree that produced them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    // Insertion-ordered, keys unique. MusicXML elements carry few
    // attributes, so a linear scan beats a map here.
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<NodeId>,
}

/// Mutable element tree of one MusicXML document.
///
/// Decoration only ever sets attributes; the tree offers no structural
/// mutation beyond the builder methods used by the loader.
#[derive(Debug, Clone)]
pub struct ScoreTree {
    nodes: Vec<Element>,
    root: NodeId,
}

impl ScoreTree {
    /// Create a tree containing only a root element.
    pub fn with_root(tag: &str) -> Self {
        ScoreTree {
            nodes: vec![Element {
                tag: tag.to_string(),
                attributes: Vec::new(),
                text: None,
                children: Vec::new(),
            }],
            root: NodeId(0),
        }
    }

    /// Append a new child element under `parent` and return its id.
    pub fn add_child(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Element {
            tag: tag.to_string(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn tag(&self, id: NodeId) -> &str {
        &self.nodes[id.0].tag
    }

    /// Attribute value, or `None` when the element has no such attribute.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0]
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Set an attribute, overwriting any previous value for the same key.
    /// First-insertion order of keys is preserved across overwrites.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let attrs = &mut self.nodes[id.0].attributes;
        match attrs.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => attrs.push((name.to_string(), value.to_string())),
        }
    }

    /// Attributes in document order.
    pub fn attributes(&self, id: NodeId) -> impl Iterator<Item = (&str, &str)> {
        self.nodes[id.0]
            .attributes
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Trimmed text content of the element, if any.
    pub fn text(&self, id: NodeId) -> Option<&str> {
        self.nodes[id.0].text.as_deref()
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.nodes[id.0].text = Some(text.to_string());
    }

    /// Direct children in document order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Direct children with the given tag, in document order.
    pub fn children_with_tag<'a>(
        &'a self,
        id: NodeId,
        tag: &'a str,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(id)
            .iter()
            .copied()
            .filter(move |child| self.tag(*child) == tag)
    }

    /// Whether the element has a direct child with the given tag.
    pub fn has_child_with_tag(&self, id: NodeId, tag: &str) -> bool {
        self.children_with_tag(id, tag).next().is_some()
    }

    /// Preorder traversal starting at (and including) `id`.
    ///
    /// Preorder over an ordered tree is exactly document order, which the
    /// identifier counters depend on.
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![id],
        }
    }
}

/// Iterator returned by [`ScoreTree::descendants`].
pub struct Descendants<'a> {
    tree: &'a ScoreTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let next = self.stack.pop()?;
        // Push children reversed so the leftmost child pops first.
        for child in self.tree.children(next).iter().rev() {
            self.stack.push(*child);
        }
        Some(next)
    }
}
