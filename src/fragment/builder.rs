use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use super::{layout::Siblings, Descriptor, Hook, Mount, PlaceholderId};
use crate::{
    dom::Dom,
    error::Result,
    host::Host,
    reactive::{Binder, StoreBinder},
};

/// A placeholder built into a fragment, whose creation hook has not run yet.
struct Pending<D: Dom> {
    mount: Mount<D>,
    hook: Hook<D>,
}

/// A placeholder built into a fragment, to be torn down when that fragment is removed.
struct Teardown<D: Dom> {
    mount: Mount<D>,
    hook: Option<Hook<D>>,
}

/// Placeholders collected while building a single fragment.
struct Realized<D: Dom> {
    pending: Vec<Pending<D>>,
    teardown: Vec<Teardown<D>>,
}

/// Materializes [`Descriptor`]s into nodes of a [`Dom`], and owns the lifecycle of every
/// placeholder within them: running their hooks, tracking their rendered siblings and releasing
/// their watch registrations.
///
/// Nodes containing placeholders must be removed with [`Builder::remove_node()`] so that the
/// placeholders inside of them are torn down. This includes fragments that were built detached and
/// never inserted, and nodes that were already detached through the [`Dom`] directly: until then
/// the builder keeps their hooks and teardown records alive.
pub struct Builder<D: Dom> {
    dom: D,

    binder: Box<dyn Binder<D::Node>>,

    /// Rendered sibling for each realized placeholder.
    siblings: RefCell<Siblings<D::Node>>,

    /// Fragments built without a container, along with placeholder hooks that will run once the
    /// fragment is inserted.
    deferred: RefCell<Vec<(D::Node, Vec<Pending<D>>)>>,

    /// Every placeholder built and not yet torn down, in build order.
    owned: RefCell<Vec<Teardown<D>>>,

    next_id: Cell<u64>,

    /// Reference to self, handed to each [`Mount`].
    this: Weak<Self>,
}

impl<D: Dom> Builder<D> {
    /// Create a builder that binds watches with a [`StoreBinder`].
    pub fn new(dom: D) -> Rc<Self> {
        Self::with_binder(dom, StoreBinder::new())
    }

    pub fn with_binder<B>(dom: D, binder: B) -> Rc<Self>
    where
        B: 'static + Binder<D::Node>,
    {
        Rc::new_cyclic(|this| Self {
            dom,
            binder: Box::new(binder),
            siblings: RefCell::new(Siblings::new()),
            deferred: RefCell::new(Vec::new()),
            owned: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
            this: Weak::clone(this),
        })
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn binder(&self) -> &dyn Binder<D::Node> {
        self.binder.as_ref()
    }

    /// Build the descriptor into a node scoped to `host`.
    ///
    /// With a `container`, the node is appended to it and the creation hooks of any placeholders
    /// run immediately. Without one, the node is returned detached and the hooks run once it is
    /// attached with [`Builder::insert_after()`] or [`Builder::append()`].
    pub fn build(
        &self,
        descriptor: Descriptor<D>,
        container: Option<&D::Node>,
        host: &Rc<Host>,
    ) -> Result<D::Node> {
        let mut realized = Realized {
            pending: Vec::new(),
            teardown: Vec::new(),
        };
        let node = self.build_node(descriptor, host, &mut realized)?;

        if let Some(container) = container {
            self.dom.append_child(container, &node)?;
        }

        self.owned.borrow_mut().extend(realized.teardown);

        if container.is_some() {
            self.realize(realized.pending);
        } else if !realized.pending.is_empty() {
            self.deferred
                .borrow_mut()
                .push((node.clone(), realized.pending));
        }

        Ok(node)
    }

    /// Insert a built node as the immediate next sibling of `anchor`.
    pub fn insert_after(&self, anchor: &D::Node, node: &D::Node) -> Result<()> {
        self.dom.insert_after(anchor, node)?;
        self.realize_deferred(node);

        Ok(())
    }

    /// Append a built node as the last child of `parent`.
    pub fn append(&self, parent: &D::Node, node: &D::Node) -> Result<()> {
        self.dom.append_child(parent, node)?;
        self.realize_deferred(node);

        Ok(())
    }

    /// Detach a node, tearing down every placeholder within it. The node may be a built root, any
    /// ancestor of one, or any node inside of one (such as a placeholder's anchor).
    pub fn remove_node(&self, node: &D::Node) -> Result<()> {
        self.dom.remove(node)?;

        // Never attached, so none of their placeholders were realized
        self.deferred
            .borrow_mut()
            .retain(|(root, _)| !self.dom.contains(node, root));

        let removed = {
            let mut owned = self.owned.borrow_mut();
            let (removed, kept) = owned
                .drain(..)
                .partition::<Vec<_>, _>(|teardown| self.dom.contains(node, teardown.mount.anchor()));
            *owned = kept;

            removed
        };

        for Teardown { mount, hook } in removed {
            let Some(sibling) = self.siblings.borrow_mut().close(mount.id()) else {
                continue;
            };

            tracing::trace!(placeholder = %mount.id(), "tearing down placeholder");

            self.binder.release(mount.anchor());

            if let Some(sibling) = sibling {
                if let Err(error) = self.remove_node(&sibling) {
                    tracing::warn!(placeholder = %mount.id(), %error, "failed to remove rendered sibling");
                }
            }

            if let Some(hook) = hook {
                hook(&mount);
            }
        }

        Ok(())
    }

    /// Whether the placeholder is realized and not yet torn down.
    pub fn is_open(&self, id: PlaceholderId) -> bool {
        self.siblings.borrow().is_open(id)
    }

    /// The node currently rendered after the placeholder.
    pub fn rendered_sibling(&self, id: PlaceholderId) -> Option<D::Node> {
        self.siblings.borrow().get(id).cloned()
    }

    /// Remove the rendered sibling of a placeholder, if there is one.
    pub(crate) fn clear_sibling(&self, id: PlaceholderId) -> Result<()> {
        let sibling = self.siblings.borrow_mut().take(id);

        match sibling {
            Some(sibling) => self.remove_node(&sibling),
            None => Ok(()),
        }
    }

    /// Build the descriptor and insert it after the placeholder's anchor, recording it as the
    /// rendered sibling.
    pub(crate) fn render_sibling(&self, mount: &Mount<D>, descriptor: Descriptor<D>) -> Result<()> {
        let node = self.build(descriptor, None, mount.host())?;

        // Recorded before insertion, as realizing nested placeholders may re-enter this slot
        self.siblings.borrow_mut().set(mount.id(), node.clone());

        if let Err(error) = self.insert_after(mount.anchor(), &node) {
            self.siblings.borrow_mut().take(mount.id());
            self.remove_node(&node)?;

            return Err(error);
        }

        Ok(())
    }

    fn build_node(
        &self,
        descriptor: Descriptor<D>,
        host: &Rc<Host>,
        realized: &mut Realized<D>,
    ) -> Result<D::Node> {
        match descriptor {
            Descriptor::Text(content) => self.dom.create_text(&content),
            Descriptor::Element(element) => {
                let node = self.dom.create_element(&element.tag)?;

                for (name, value) in &element.attributes {
                    self.dom.set_attribute(&node, name, value)?;
                }

                for child in element.children {
                    let child = self.build_node(child, host, realized)?;
                    self.dom.append_child(&node, &child)?;
                }

                Ok(node)
            }
            Descriptor::Placeholder(placeholder) => {
                let anchor = self.dom.create_comment(&placeholder.kind)?;

                let id = PlaceholderId(self.next_id.get());
                self.next_id.set(id.0 + 1);

                let mount = Mount::new(id, anchor.clone(), Rc::clone(host), Weak::clone(&self.this));

                realized.pending.push(Pending {
                    mount: mount.clone(),
                    hook: placeholder.on_created,
                });
                realized.teardown.push(Teardown {
                    mount,
                    hook: placeholder.on_destroyed,
                });

                Ok(anchor)
            }
        }
    }

    fn is_owned(&self, id: PlaceholderId) -> bool {
        self.owned
            .borrow()
            .iter()
            .any(|teardown| teardown.mount.id() == id)
    }

    fn realize_deferred(&self, node: &D::Node) {
        if let Some(pending) = take_entry(&self.deferred, node) {
            self.realize(pending);
        }
    }

    /// Run creation hooks, in document order. No borrows are held while hooks run.
    fn realize(&self, pending: Vec<Pending<D>>) {
        for Pending { mount, hook } in pending {
            // An earlier hook may have removed the fragment
            if !self.is_owned(mount.id()) {
                tracing::trace!(placeholder = %mount.id(), "removed before realization");
                continue;
            }

            self.siblings.borrow_mut().open(mount.id());

            tracing::trace!(placeholder = %mount.id(), "realizing placeholder");
            hook(&mount);
        }
    }
}

/// Remove and return the entry keyed by `node`.
fn take_entry<N, T>(entries: &RefCell<Vec<(N, T)>>, node: &N) -> Option<T>
where
    N: PartialEq,
{
    let mut entries = entries.borrow_mut();
    let position = entries.iter().position(|(key, _)| key == node)?;

    Some(entries.swap_remove(position).1)
}

impl<D: Dom> fmt::Debug for Builder<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("placeholders", &self.siblings.borrow().len())
            .field("deferred", &self.deferred.borrow().len())
            .field("owned", &self.owned.borrow().len())
            .finish_non_exhaustive()
    }
}
