use std::{collections::HashMap, fmt, rc::Rc};

use serde_json::Value;

use super::{Descriptor, Element, Mount, Placeholder, PlaceholderId};
use crate::{dom::Dom, host::Host};

/// The result of a render callback.
pub enum Layout<D: Dom> {
    /// Leave whatever is currently rendered untouched.
    NoChange,

    /// Remove whatever is currently rendered, and render nothing in its place.
    Clear,

    /// Replace whatever is currently rendered with the descriptor.
    Render(Descriptor<D>),
}

impl<D: Dom> Layout<D> {
    pub fn render<T>(descriptor: T) -> Self
    where
        T: Into<Descriptor<D>>,
    {
        Self::Render(descriptor.into())
    }
}

impl<D: Dom> From<Descriptor<D>> for Layout<D> {
    fn from(descriptor: Descriptor<D>) -> Self {
        Self::Render(descriptor)
    }
}

impl<D: Dom> From<Element<D>> for Layout<D> {
    fn from(element: Element<D>) -> Self {
        Self::render(element)
    }
}

impl<D: Dom> From<Placeholder<D>> for Layout<D> {
    fn from(placeholder: Placeholder<D>) -> Self {
        Self::render(placeholder)
    }
}

/// [`None`] clears.
impl<D, T> From<Option<T>> for Layout<D>
where
    D: Dom,
    T: Into<Descriptor<D>>,
{
    fn from(descriptor: Option<T>) -> Self {
        descriptor.map_or(Self::Clear, Self::render)
    }
}

impl<D: Dom> fmt::Debug for Layout<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoChange => f.write_str("NoChange"),
            Self::Clear => f.write_str("Clear"),
            Self::Render(descriptor) => f.debug_tuple("Render").field(descriptor).finish(),
        }
    }
}

/// Per-placeholder record of the rendered sibling, keyed by placeholder identity. A slot is open
/// from the moment its placeholder is realized until it is torn down.
#[derive(Debug)]
pub(crate) struct Siblings<N> {
    slots: HashMap<PlaceholderId, Option<N>>,
}

impl<N> Siblings<N> {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    pub fn open(&mut self, id: PlaceholderId) {
        self.slots.entry(id).or_insert(None);
    }

    pub fn is_open(&self, id: PlaceholderId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn get(&self, id: PlaceholderId) -> Option<&N> {
        self.slots.get(&id).and_then(Option::as_ref)
    }

    /// Take the current rendered sibling, leaving the slot open and empty.
    pub fn take(&mut self, id: PlaceholderId) -> Option<N> {
        self.slots.get_mut(&id).and_then(Option::take)
    }

    /// Record a new rendered sibling. Ignored if the slot is closed.
    pub fn set(&mut self, id: PlaceholderId, node: N) {
        if let Some(slot) = self.slots.get_mut(&id) {
            *slot = Some(node);
        }
    }

    /// Close the slot. The outer [`Option`] is [`None`] if the slot was never opened.
    pub fn close(&mut self, id: PlaceholderId) -> Option<Option<N>> {
        self.slots.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

/// Render callback driven by an [`Updater`].
pub type RenderFn<D> = Rc<dyn Fn(&Value, &<D as Dom>::Node, &Host) -> Layout<D>>;

/// Re-renders the content after a placeholder's anchor whenever a watched value changes.
pub struct Updater<D: Dom> {
    mount: Mount<D>,
    render: RenderFn<D>,
}

impl<D: Dom> Updater<D> {
    pub fn new(mount: &Mount<D>, render: RenderFn<D>) -> Self {
        Self {
            mount: mount.clone(),
            render,
        }
    }

    /// Run the render callback with the new value and apply its result.
    pub fn update(&self, value: &Value) {
        let layout = (self.render)(value, self.mount.anchor(), self.mount.host());
        apply(&self.mount, layout);
    }
}

impl<D: Dom> fmt::Debug for Updater<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Updater")
            .field("mount", &self.mount)
            .finish_non_exhaustive()
    }
}

/// Apply a [`Layout`] to the placeholder. The previous sibling is always removed before the new
/// one is inserted, and failures leave nothing rendered.
pub(crate) fn apply<D: Dom>(mount: &Mount<D>, layout: Layout<D>) {
    let Some(builder) = mount.builder() else {
        return;
    };

    if !builder.is_open(mount.id()) {
        tracing::trace!(placeholder = %mount.id(), "placeholder torn down, skipping update");
        return;
    }

    let descriptor = match layout {
        Layout::NoChange => {
            tracing::trace!(placeholder = %mount.id(), "no change");
            return;
        }
        Layout::Clear => None,
        Layout::Render(descriptor) => Some(descriptor),
    };

    if let Err(error) = builder.clear_sibling(mount.id()) {
        tracing::warn!(placeholder = %mount.id(), %error, "failed to remove rendered sibling");
    }

    if let Some(descriptor) = descriptor {
        tracing::debug!(placeholder = %mount.id(), "rendering sibling");

        if let Err(error) = builder.render_sibling(mount, descriptor) {
            tracing::warn!(placeholder = %mount.id(), %error, "failed to render sibling");
        }
    }
}
