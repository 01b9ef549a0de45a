//! Arena-based contents (table of contents) tree.
//!
//! Nodes live in a contiguous vector and link to each other by index. Node 0
//! is the root (level 0), which never carries a title or reference. Every
//! other node is a contents entry, numbered in creation order starting at 0.

use super::text::ModelId;

/// Identifier of a node in the [`ContentsTree`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentsId(pub u32);

impl ContentsId {
    /// The root node ID (always 0).
    pub const ROOT: ContentsId = ContentsId(0);

    /// Check if this is the root node.
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

/// Position in a text model that a contents entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct Reference {
    pub model: ModelId,
    pub paragraph: usize,
}

/// A node in the contents arena.
#[derive(Debug, Clone)]
pub struct ContentsNode {
    /// Nesting depth; the root is 0.
    pub level: usize,
    pub text: Option<String>,
    pub reference: Option<Reference>,
    pub parent: Option<ContentsId>,
    pub children: Vec<ContentsId>,
}

/// Nested, owned view of the contents tree.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(serde::Serialize))]
pub struct OutlineEntry {
    pub title: String,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Option::is_none"))]
    pub reference: Option<Reference>,
    #[cfg_attr(feature = "cli", serde(skip_serializing_if = "Vec::is_empty"))]
    pub children: Vec<OutlineEntry>,
}

/// Hierarchical contents tree stored in an arena.
#[derive(Debug, Clone)]
pub struct ContentsTree {
    nodes: Vec<ContentsNode>,
}

impl ContentsTree {
    /// Create a tree holding only the root.
    pub fn new() -> Self {
        Self {
            nodes: vec![ContentsNode {
                level: 0,
                text: None,
                reference: None,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> ContentsId {
        ContentsId::ROOT
    }

    /// Get a node by ID.
    pub fn get(&self, id: ContentsId) -> Option<&ContentsNode> {
        self.nodes.get(id.0 as usize)
    }

    fn get_mut(&mut self, id: ContentsId) -> Option<&mut ContentsNode> {
        self.nodes.get_mut(id.0 as usize)
    }

    /// Number of contents entries (the root is not counted).
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The `index`-th entry in creation order.
    pub fn entry(&self, index: usize) -> Option<ContentsId> {
        (index < self.len()).then(|| ContentsId(index as u32 + 1))
    }

    /// Append a new child under `parent` and return its ID.
    ///
    /// An unknown parent falls back to the root.
    pub fn create_subtree(&mut self, parent: ContentsId) -> ContentsId {
        let parent = if self.get(parent).is_some() {
            parent
        } else {
            ContentsId::ROOT
        };
        let id = ContentsId(self.nodes.len() as u32);
        let level = self.level(parent) + 1;
        self.nodes.push(ContentsNode {
            level,
            text: None,
            reference: None,
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(node) = self.get_mut(parent) {
            node.children.push(id);
        }
        id
    }

    pub fn level(&self, id: ContentsId) -> usize {
        self.get(id).map_or(0, |n| n.level)
    }

    pub fn parent(&self, id: ContentsId) -> Option<ContentsId> {
        self.get(id).and_then(|n| n.parent)
    }

    pub fn text(&self, id: ContentsId) -> Option<&str> {
        self.get(id).and_then(|n| n.text.as_deref())
    }

    pub fn set_text(&mut self, id: ContentsId, text: impl Into<String>) {
        if let Some(node) = self.get_mut(id) {
            node.text = Some(text.into());
        }
    }

    pub fn reference(&self, id: ContentsId) -> Option<Reference> {
        self.get(id).and_then(|n| n.reference)
    }

    pub fn set_reference(&mut self, id: ContentsId, model: ModelId, paragraph: usize) {
        if id.is_root() {
            return;
        }
        if let Some(node) = self.get_mut(id) {
            node.reference = Some(Reference { model, paragraph });
        }
    }

    pub fn children(&self, id: ContentsId) -> &[ContentsId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Nested view of the entries under the root.
    ///
    /// Entries that never received a title show up with an empty one.
    pub fn outline(&self) -> Vec<OutlineEntry> {
        self.outline_of(ContentsId::ROOT)
    }

    fn outline_of(&self, id: ContentsId) -> Vec<OutlineEntry> {
        self.children(id)
            .iter()
            .map(|&child| OutlineEntry {
                title: self.text(child).unwrap_or_default().to_string(),
                reference: self.reference(child),
                children: self.outline_of(child),
            })
            .collect()
    }
}

impl Default for ContentsTree {
    fn default() -> Self {
        Self::new()
    }
}
