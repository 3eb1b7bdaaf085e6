use std::{cell::RefCell, collections::BTreeMap, fmt};

use super::Dom;
use crate::error::{Error, Result};

/// Handle to a node owned by a [`MemoryDom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The content of a node in a [`MemoryDom`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug)]
struct MemoryNode {
    kind: NodeKind,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// An in-memory document tree. Nodes are never freed, so a [`NodeId`] stays valid (possibly
/// detached) for the lifetime of the document.
#[derive(Debug, Default)]
pub struct MemoryDom {
    nodes: RefCell<Vec<MemoryNode>>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parent of the node, if it is attached.
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow().get(node.0)?.parent
    }

    /// Children of the node, in document order.
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes
            .borrow()
            .get(node.0)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    pub fn next_sibling(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.parent(node)?;
        let siblings = self.children(parent);
        let position = siblings.iter().position(|sibling| *sibling == node)?;

        siblings.get(position + 1).copied()
    }

    pub fn kind(&self, node: NodeId) -> Option<NodeKind> {
        self.nodes.borrow().get(node.0).map(|node| node.kind.clone())
    }

    /// Serialise the node and its descendants. Comments are written as `<!--label-->`.
    pub fn to_html(&self, node: NodeId) -> String {
        let mut html = String::new();
        self.write_html(node, &mut html);
        html
    }

    fn write_html(&self, node: NodeId, html: &mut String) {
        let Some(kind) = self.kind(node) else {
            return;
        };

        match kind {
            NodeKind::Text(content) => html.push_str(&content),
            NodeKind::Comment(label) => {
                html.push_str("<!--");
                html.push_str(&label);
                html.push_str("-->");
            }
            NodeKind::Element { tag, attributes } => {
                html.push('<');
                html.push_str(&tag);
                for (name, value) in &attributes {
                    html.push_str(&format!(" {name}=\"{value}\""));
                }
                html.push('>');

                for child in self.children(node) {
                    self.write_html(child, html);
                }

                html.push_str(&format!("</{tag}>"));
            }
        }
    }

    fn create(&self, kind: NodeKind) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        let id = NodeId(nodes.len());
        nodes.push(MemoryNode {
            kind,
            parent: None,
            children: Vec::new(),
        });

        id
    }

    fn check(&self, node: NodeId) -> Result<()> {
        if node.0 < self.nodes.borrow().len() {
            Ok(())
        } else {
            Err(Error::UnknownNode(node.to_string()))
        }
    }

    /// Remove `node` from its current parent, if any.
    fn unlink(nodes: &mut [MemoryNode], node: NodeId) {
        if let Some(parent) = nodes[node.0].parent.take() {
            nodes[parent.0].children.retain(|child| *child != node);
        }
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn create_element(&self, tag: &str) -> Result<NodeId> {
        Ok(self.create(NodeKind::Element {
            tag: tag.to_string(),
            attributes: BTreeMap::new(),
        }))
    }

    fn create_text(&self, content: &str) -> Result<NodeId> {
        Ok(self.create(NodeKind::Text(content.to_string())))
    }

    fn create_comment(&self, label: &str) -> Result<NodeId> {
        Ok(self.create(NodeKind::Comment(label.to_string())))
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> Result<()> {
        self.check(*element)?;

        match &mut self.nodes.borrow_mut()[element.0].kind {
            NodeKind::Element { attributes, .. } => {
                attributes.insert(name.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(Error::UnknownNode(format!("{element} is not an element"))),
        }
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<()> {
        self.check(*parent)?;
        self.check(*child)?;

        let mut nodes = self.nodes.borrow_mut();
        Self::unlink(&mut nodes, *child);
        nodes[parent.0].children.push(*child);
        nodes[child.0].parent = Some(*parent);

        Ok(())
    }

    fn insert_after(&self, anchor: &NodeId, node: &NodeId) -> Result<()> {
        self.check(*anchor)?;
        self.check(*node)?;

        let mut nodes = self.nodes.borrow_mut();
        let parent = nodes[anchor.0]
            .parent
            .filter(|_| anchor != node)
            .ok_or_else(|| Error::Detached(anchor.to_string()))?;

        // Unlinked only once the anchor is known to be attached
        Self::unlink(&mut nodes, *node);

        let siblings = &mut nodes[parent.0].children;
        let position = siblings
            .iter()
            .position(|sibling| sibling == anchor)
            .ok_or_else(|| Error::Detached(anchor.to_string()))?;
        siblings.insert(position + 1, *node);
        nodes[node.0].parent = Some(parent);

        Ok(())
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let mut current = Some(*node);

        while let Some(candidate) = current {
            if candidate == *ancestor {
                return true;
            }

            current = self.parent(candidate);
        }

        false
    }

    fn remove(&self, node: &NodeId) -> Result<()> {
        self.check(*node)?;
        Self::unlink(&mut self.nodes.borrow_mut(), *node);

        Ok(())
    }
}
