use crate::{
    dom::Dom,
    fragment::{layout, placeholder, Layout, Mount, Placeholder},
    host::Host,
};

/// Render once with access to the host, when the placeholder is realized. Nothing is watched, so
/// the callback never runs again.
pub fn use_parent<D, F>(render: F) -> Placeholder<D>
where
    D: Dom,
    F: 'static + FnOnce(&Host) -> Layout<D>,
{
    placeholder("use", move |mount: &Mount<D>| {
        let layout = render(mount.host());
        layout::apply(mount, layout);
    })
}
