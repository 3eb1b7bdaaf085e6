use std::{
    borrow::Cow,
    fmt,
    rc::{Rc, Weak},
};

use super::Builder;
use crate::{dom::Dom, host::Host};

/// A lifecycle hook of a [`Placeholder`].
pub type Hook<D> = Box<dyn FnOnce(&Mount<D>)>;

/// Identity of a realized placeholder, unique within its [`Builder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PlaceholderId(pub(crate) u64);

impl fmt::Display for PlaceholderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "placeholder-{}", self.0)
    }
}

/// A mount anchor. Has no visible content of its own: it is realized as a comment node, and
/// everything it is responsible for is rendered as that node's next sibling.
pub struct Placeholder<D: Dom> {
    /// Label written into the comment node (eg `on`, `use`), for debugging.
    pub(crate) kind: Cow<'static, str>,

    /// Run once the anchor is attached to its final parent.
    pub(crate) on_created: Hook<D>,

    /// Run once the anchor is removed through the [`Builder`].
    pub(crate) on_destroyed: Option<Hook<D>>,
}

/// Create a new [`Placeholder`] with the provided `on_created` hook.
pub fn placeholder<D, K, F>(kind: K, on_created: F) -> Placeholder<D>
where
    D: Dom,
    K: Into<Cow<'static, str>>,
    F: 'static + FnOnce(&Mount<D>),
{
    Placeholder {
        kind: kind.into(),
        on_created: Box::new(on_created),
        on_destroyed: None,
    }
}

impl<D: Dom> Placeholder<D> {
    /// Attach a hook to run when the anchor is torn down.
    pub fn on_destroyed<F>(mut self, on_destroyed: F) -> Self
    where
        F: 'static + FnOnce(&Mount<D>),
    {
        self.on_destroyed = Some(Box::new(on_destroyed));
        self
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }
}

impl<D: Dom> fmt::Debug for Placeholder<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Placeholder")
            .field("kind", &self.kind)
            .field("on_destroyed", &self.on_destroyed.is_some())
            .finish_non_exhaustive()
    }
}

/// A realized placeholder, handed to its hooks.
pub struct Mount<D: Dom> {
    id: PlaceholderId,
    anchor: D::Node,
    host: Rc<Host>,
    builder: Weak<Builder<D>>,
}

impl<D: Dom> Mount<D> {
    pub(crate) fn new(
        id: PlaceholderId,
        anchor: D::Node,
        host: Rc<Host>,
        builder: Weak<Builder<D>>,
    ) -> Self {
        Self {
            id,
            anchor,
            host,
            builder,
        }
    }

    pub fn id(&self) -> PlaceholderId {
        self.id
    }

    /// The comment node marking the placeholder's position.
    pub fn anchor(&self) -> &D::Node {
        &self.anchor
    }

    /// The component instance the placeholder was built within.
    pub fn host(&self) -> &Rc<Host> {
        &self.host
    }

    /// The builder that realized the placeholder. Only [`None`] once the builder is dropped.
    pub fn builder(&self) -> Option<Rc<Builder<D>>> {
        self.builder.upgrade()
    }
}

impl<D: Dom> Clone for Mount<D> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            anchor: self.anchor.clone(),
            host: Rc::clone(&self.host),
            builder: Weak::clone(&self.builder),
        }
    }
}

impl<D: Dom> fmt::Debug for Mount<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mount")
            .field("id", &self.id)
            .field("anchor", &self.anchor)
            .finish_non_exhaustive()
    }
}
