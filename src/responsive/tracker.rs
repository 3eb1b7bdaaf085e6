use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use super::{breakpoint_of, Breakpoint, Viewport};
use crate::{error::Result, reactive::Store};

/// Callback run with the new viewport width on every resize.
pub type ResizeFn = Rc<dyn Fn(u32)>;

/// Something that can report the viewport width, and notify on resize.
pub trait ResizeSource {
    /// Current viewport width, in device-independent pixels.
    fn width(&self) -> Result<u32>;

    /// Register `on_resize` to run on every resize. Unregistered once the returned [`Listener`]
    /// is removed or dropped.
    fn listen(&self, on_resize: ResizeFn) -> Result<Listener>;
}

/// Registration of a resize callback on a [`ResizeSource`].
pub struct Listener {
    remove: Option<Box<dyn FnOnce()>>,
}

impl Listener {
    pub fn new<F>(remove: F) -> Self
    where
        F: 'static + FnOnce(),
    {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    /// Unregister the callback.
    pub fn remove(mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl fmt::Debug for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("active", &self.remove.is_some())
            .finish()
    }
}

#[derive(Default)]
struct Inner {
    store: Store,
    listener: RefCell<Option<Listener>>,
}

/// Keeps `size` and `width` of a reactive object in sync with the viewport.
///
/// Cloning produces another handle to the same tracker, and the tracker's [`Store`] can be used as
/// the source of any conditional atom.
#[derive(Clone, Default)]
pub struct SizeTracker(Rc<Inner>);

impl SizeTracker {
    /// Property holding the breakpoint name.
    pub const SIZE: &'static str = "size";

    /// Property holding the width, in pixels.
    pub const WIDTH: &'static str = "width";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &Store {
        &self.0.store
    }

    /// Record a new viewport width. `width` is written before `size`, and each only if it differs
    /// from the stored value, so repeated resizes within a breakpoint never write `size`.
    ///
    /// Returns whether the breakpoint changed.
    pub fn resize(&self, width: u32) -> bool {
        let size = breakpoint_of(width);

        if self.width() != Some(width) {
            self.0.store.set(Self::WIDTH, width);
        }

        if self.size() == Some(size) {
            return false;
        }

        tracing::debug!(%size, width, "breakpoint changed");
        self.0.store.set(Self::SIZE, size.name());

        true
    }

    pub fn size(&self) -> Option<Breakpoint> {
        self.0
            .store
            .get(Self::SIZE)?
            .as_str()
            .and_then(|name| name.parse().ok())
    }

    pub fn width(&self) -> Option<u32> {
        self.0
            .store
            .get(Self::WIDTH)?
            .as_u64()
            .and_then(|width| u32::try_from(width).ok())
    }

    pub fn viewport(&self) -> Option<Viewport> {
        Some(Viewport {
            size: self.size()?,
            width: self.width()?,
        })
    }

    /// Measure the source and follow its resizes. Any source previously started is stopped.
    pub fn start<S>(&self, source: &S) -> Result<()>
    where
        S: ResizeSource + ?Sized,
    {
        self.stop();

        self.resize(source.width()?);

        let tracker: Weak<Inner> = Rc::downgrade(&self.0);
        let listener = source.listen(Rc::new(move |width| {
            if let Some(inner) = tracker.upgrade() {
                SizeTracker(inner).resize(width);
            }
        }))?;

        *self.0.listener.borrow_mut() = Some(listener);

        Ok(())
    }

    /// Stop following resizes. The last measurement stays in the store.
    pub fn stop(&self) {
        let listener = self.0.listener.borrow_mut().take();

        if let Some(listener) = listener {
            tracing::debug!("stopped tracking viewport");
            listener.remove();
        }
    }

    pub fn is_running(&self) -> bool {
        self.0.listener.borrow().is_some()
    }
}

impl fmt::Debug for SizeTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeTracker")
            .field("viewport", &self.viewport())
            .field("running", &self.is_running())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
    };

    use serde_json::{json, Value};

    use super::{Listener, ResizeFn, ResizeSource, SizeTracker};
    use crate::{
        error::Result,
        responsive::{Breakpoint, Viewport},
    };

    #[derive(Default)]
    struct FakeWindow {
        width: Cell<u32>,
        handler: Rc<RefCell<Option<ResizeFn>>>,
    }

    impl FakeWindow {
        fn resize_to(&self, width: u32) {
            self.width.set(width);

            let handler = self.handler.borrow().clone();
            if let Some(handler) = handler {
                handler(width);
            }
        }

        fn is_listened(&self) -> bool {
            self.handler.borrow().is_some()
        }
    }

    impl ResizeSource for FakeWindow {
        fn width(&self) -> Result<u32> {
            Ok(self.width.get())
        }

        fn listen(&self, on_resize: ResizeFn) -> Result<Listener> {
            *self.handler.borrow_mut() = Some(on_resize);

            let handler = Rc::clone(&self.handler);
            Ok(Listener::new(move || {
                handler.borrow_mut().take();
            }))
        }
    }

    fn writes(tracker: &SizeTracker, property: &'static str) -> Rc<RefCell<Vec<Value>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        tracker.store().watch(property, {
            let seen = Rc::clone(&seen);
            Rc::new(move |value: &Value| seen.borrow_mut().push(value.clone()))
        });

        seen
    }

    #[test]
    fn start_measures_immediately() {
        let window = FakeWindow::default();
        window.width.set(1100);

        let tracker = SizeTracker::new();
        tracker.start(&window).unwrap();

        assert_eq!(
            tracker.viewport(),
            Some(Viewport {
                size: Breakpoint::Lg,
                width: 1100
            })
        );
        assert!(tracker.is_running());
    }

    #[test]
    fn size_is_only_written_on_breakpoint_change() {
        let tracker = SizeTracker::new();
        let sizes = writes(&tracker, SizeTracker::SIZE);
        let widths = writes(&tracker, SizeTracker::WIDTH);

        assert!(tracker.resize(800));
        assert!(!tracker.resize(900));
        assert!(!tracker.resize(900));
        assert!(tracker.resize(500));

        assert_eq!(*sizes.borrow(), vec![json!("md"), json!("xs")]);
        assert_eq!(*widths.borrow(), vec![json!(800), json!(900), json!(500)]);
    }

    #[test]
    fn width_is_written_before_size() {
        let tracker = SizeTracker::new();
        let seen = Rc::new(RefCell::new(None));

        tracker.store().watch(SizeTracker::SIZE, {
            let tracker = tracker.clone();
            let seen = Rc::clone(&seen);
            Rc::new(move |_: &Value| *seen.borrow_mut() = tracker.width())
        });
        tracker.resize(1300);

        assert_eq!(*seen.borrow(), Some(1300));
    }

    #[test]
    fn follows_resizes_until_stopped() {
        let window = FakeWindow::default();
        let tracker = SizeTracker::new();
        tracker.start(&window).unwrap();
        assert_eq!(tracker.size(), Some(Breakpoint::Xs));

        window.resize_to(1600);
        assert_eq!(tracker.size(), Some(Breakpoint::Xxl));

        tracker.stop();
        assert!(!window.is_listened());
        assert!(!tracker.is_running());

        window.resize_to(700);
        assert_eq!(tracker.width(), Some(1600));
    }

    #[test]
    fn restarting_replaces_the_listener() {
        let first = FakeWindow::default();
        let second = FakeWindow::default();
        second.width.set(640);

        let tracker = SizeTracker::new();
        tracker.start(&first).unwrap();
        tracker.start(&second).unwrap();

        assert!(!first.is_listened());
        assert!(second.is_listened());
        assert_eq!(tracker.size(), Some(Breakpoint::Sm));
    }

    #[test]
    fn dropping_the_tracker_unregisters() {
        let window = FakeWindow::default();

        let tracker = SizeTracker::new();
        tracker.start(&window).unwrap();
        drop(tracker);

        assert!(!window.is_listened());
    }
}
