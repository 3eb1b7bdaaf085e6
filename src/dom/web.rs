use wasm_bindgen::JsCast;
use web_sys::{window, Document, Element, Node as WsNode};

use super::Dom;
use crate::error::{Error, Result};

/// Configure the panic hook to log to `console.error`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}

/// [`Dom`] implementation for the browser, creating nodes with a [`Document`].
#[derive(Debug, Clone)]
pub struct WebDom {
    document: Document,
}

impl WebDom {
    /// Create a new instance. Requires a reference to [`Document`] in order to store for future
    /// usage, so that [`web_sys::Node`]s can be created as required.
    pub fn new(document: &Document) -> Self {
        Self {
            document: document.clone(),
        }
    }

    /// Use the document of the global `window`.
    pub fn from_window() -> Result<Self> {
        let document = window()
            .ok_or(Error::DomUnavailable)?
            .document()
            .ok_or(Error::DomUnavailable)?;

        Ok(Self::new(&document))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The `<body>` of the document, to mount into.
    pub fn body(&self) -> Result<WsNode> {
        Ok(self.document.body().ok_or(Error::DomUnavailable)?.into())
    }
}

impl Dom for WebDom {
    type Node = WsNode;

    fn create_element(&self, tag: &str) -> Result<WsNode> {
        Ok(self.document.create_element(tag)?.into())
    }

    fn create_text(&self, content: &str) -> Result<WsNode> {
        Ok(self.document.create_text_node(content).into())
    }

    fn create_comment(&self, label: &str) -> Result<WsNode> {
        Ok(self.document.create_comment(label).into())
    }

    fn set_attribute(&self, element: &WsNode, name: &str, value: &str) -> Result<()> {
        element
            .dyn_ref::<Element>()
            .ok_or_else(|| Error::UnknownNode(format!("{element:?} is not an element")))?
            .set_attribute(name, value)?;

        Ok(())
    }

    fn append_child(&self, parent: &WsNode, child: &WsNode) -> Result<()> {
        parent.append_child(child)?;
        Ok(())
    }

    fn insert_after(&self, anchor: &WsNode, node: &WsNode) -> Result<()> {
        let parent = anchor
            .parent_node()
            .ok_or_else(|| Error::Detached(format!("{anchor:?}")))?;

        // No next sibling appends to the parent
        parent.insert_before(node, anchor.next_sibling().as_ref())?;

        Ok(())
    }

    fn contains(&self, ancestor: &WsNode, node: &WsNode) -> bool {
        ancestor.contains(Some(node))
    }

    fn remove(&self, node: &WsNode) -> Result<()> {
        if let Some(parent) = node.parent_node() {
            parent.remove_child(node)?;
        }

        Ok(())
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};

    use super::WebDom;
    use crate::dom::Dom;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn inserts_after_comment_anchor() {
        let dom = WebDom::from_window().unwrap();
        let root = dom.create_element("div").unwrap();
        let anchor = dom.create_comment("on").unwrap();
        let tail = dom.create_text("tail").unwrap();
        dom.append_child(&root, &anchor).unwrap();
        dom.append_child(&root, &tail).unwrap();

        let inserted = dom.create_element("p").unwrap();
        dom.set_attribute(&inserted, "class", "shown").unwrap();
        dom.insert_after(&anchor, &inserted).unwrap();

        assert_eq!(anchor.next_sibling(), Some(inserted.clone()));

        dom.remove(&inserted).unwrap();
        dom.remove(&inserted).unwrap();
        assert_eq!(anchor.next_sibling(), Some(tail));
    }
}
