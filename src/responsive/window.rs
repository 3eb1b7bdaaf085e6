use js_sys::Function;
use wasm_bindgen::{prelude::Closure, JsCast};
use web_sys::{window, Event, Window};

use super::{Listener, ResizeFn, ResizeSource};
use crate::error::{Error, Result};

/// [`ResizeSource`] backed by the browser window's `innerWidth` and `resize` event.
#[derive(Debug, Clone)]
pub struct WindowResize {
    window: Window,
}

impl WindowResize {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    /// Use the global `window`.
    pub fn from_global() -> Result<Self> {
        Ok(Self::new(window().ok_or(Error::DomUnavailable)?))
    }
}

fn inner_width(window: &Window) -> Result<u32> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| Error::Js("`innerWidth` is not a number".to_string()))?;

    // Saturating cast, fractional widths are truncated
    Ok(width as u32)
}

impl ResizeSource for WindowResize {
    fn width(&self) -> Result<u32> {
        inner_width(&self.window)
    }

    fn listen(&self, on_resize: ResizeFn) -> Result<Listener> {
        let window = self.window.clone();
        let callback: Function = Closure::<dyn Fn(Event)>::new(move |_event| {
            match inner_width(&window) {
                Ok(width) => on_resize(width),
                Err(error) => tracing::warn!(%error, "failed to measure viewport"),
            }
        })
        .into_js_value()
        .unchecked_into();

        self.window
            .add_event_listener_with_callback("resize", &callback)?;

        let window = self.window.clone();
        Ok(Listener::new(move || {
            if let Err(error) = window
                .remove_event_listener_with_callback("resize", &callback)
                .map_err(Error::from)
            {
                tracing::warn!(%error, "failed to remove resize listener");
            }
        }))
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use wasm_bindgen_test::wasm_bindgen_test;

    use super::WindowResize;
    use crate::responsive::{breakpoint_of, SizeTracker};

    #[wasm_bindgen_test]
    fn tracks_the_browser_window() {
        let source = WindowResize::from_global().unwrap();
        let tracker = SizeTracker::new();
        tracker.start(&source).unwrap();

        let width = tracker.width().unwrap();
        assert_eq!(tracker.size(), Some(breakpoint_of(width)));

        tracker.stop();
        assert!(!tracker.is_running());
    }
}
