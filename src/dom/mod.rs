mod memory;
mod web;

pub use memory::*;
pub use web::*;

use std::fmt::Debug;

use crate::error::Result;

/// The node primitives that a [`crate::fragment::Builder`] needs from a document. Implemented for
/// the browser by [`WebDom`], and in memory by [`MemoryDom`].
pub trait Dom: 'static {
    /// Handle to a node within the document.
    type Node: Clone + PartialEq + Debug + 'static;

    /// Create a detached element of the provided type (eg `p`, `div`).
    fn create_element(&self, tag: &str) -> Result<Self::Node>;

    /// Create a detached text node.
    fn create_text(&self, content: &str) -> Result<Self::Node>;

    /// Create a detached comment node. Used for placeholders.
    fn create_comment(&self, label: &str) -> Result<Self::Node>;

    fn set_attribute(&self, element: &Self::Node, name: &str, value: &str) -> Result<()>;

    /// Append `child` as the last child of `parent`.
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<()>;

    /// Insert `node` as the immediate next sibling of `anchor`. The anchor must have a parent.
    fn insert_after(&self, anchor: &Self::Node, node: &Self::Node) -> Result<()>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    /// Detach `node` (and its descendants) from its parent. Detaching a node without a parent
    /// does nothing.
    fn remove(&self, node: &Self::Node) -> Result<()>;
}
