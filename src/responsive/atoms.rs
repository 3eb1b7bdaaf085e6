use serde_json::Value;

use super::{Breakpoint, Device, Range, SizeTracker, Viewport};
use crate::{
    atoms::Conditional,
    dom::Dom,
    fragment::{Layout, Placeholder},
    host::Host,
};

/// Render while the tracker's breakpoint is within `range`, and clear otherwise. The callback only
/// runs when the breakpoint changes, never on a resize within the same breakpoint.
pub fn on_breakpoint<D, F>(tracker: &SizeTracker, range: Range, render: F) -> Placeholder<D>
where
    D: Dom,
    F: 'static + Fn(Viewport, &Host) -> Layout<D>,
{
    let store = tracker.store().clone();

    Conditional::on(SizeTracker::SIZE)
        .source(store.clone())
        .labelled(range.to_string())
        .render(move |value: &Value, host: &Host| {
            let Some(size) = value.as_str().and_then(|name| name.parse::<Breakpoint>().ok()) else {
                tracing::debug!(%value, "not a breakpoint");
                return Layout::Clear;
            };

            if !range.matches(size) {
                return Layout::Clear;
            }

            let width = store
                .get(SizeTracker::WIDTH)
                .and_then(|width| width.as_u64())
                .and_then(|width| u32::try_from(width).ok())
                .unwrap_or_else(|| size.min_width());

            render(Viewport { size, width }, host)
        })
}

macro_rules! breakpoint_atoms {
    ($($(#[$meta:meta])* $name:ident => $range:expr;)*) => {
        $(
            $(#[$meta])*
            pub fn $name<D, F>(tracker: &SizeTracker, render: F) -> Placeholder<D>
            where
                D: Dom,
                F: 'static + Fn(Viewport, &Host) -> Layout<D>,
            {
                on_breakpoint(tracker, $range, render)
            }
        )*
    };
}

breakpoint_atoms! {
    /// Render at every width.
    on_xs => Range::AtLeast(Breakpoint::Xs);
    /// Render from `sm` upwards.
    on_sm => Range::AtLeast(Breakpoint::Sm);
    /// Render from `md` upwards.
    on_md => Range::AtLeast(Breakpoint::Md);
    /// Render from `lg` upwards.
    on_lg => Range::AtLeast(Breakpoint::Lg);
    /// Render from `xl` upwards.
    on_xl => Range::AtLeast(Breakpoint::Xl);
    /// Render from `2xl` upwards.
    on_2xl => Range::AtLeast(Breakpoint::Xxl);

    on_xs_only => Range::Only(Breakpoint::Xs);
    on_sm_only => Range::Only(Breakpoint::Sm);
    on_md_only => Range::Only(Breakpoint::Md);
    on_lg_only => Range::Only(Breakpoint::Lg);
    on_xl_only => Range::Only(Breakpoint::Xl);
    on_2xl_only => Range::Only(Breakpoint::Xxl);

    /// Render on `xs` and `sm`.
    on_phone => Range::Device(Device::Phone);
    /// Render on `md`.
    on_tablet => Range::Device(Device::Tablet);
    /// Render on `lg` and above.
    on_desktop => Range::Device(Device::Desktop);
}
