//! Declarative UI atoms that render fragments of DOM in place of an invisible anchor, driven by
//! watched properties of reactive objects.
//!
//! ```ignore
//! let builder = Builder::new(WebDom::from_window()?);
//! let host = Rc::new(Host::new().with_data(store.clone()));
//!
//! builder.build(
//!     div()
//!         .child(on_load(|_, _| Layout::render(p().text("ready"))))
//!         .into(),
//!     Some(&builder.dom().body()?),
//!     &host,
//! )?;
//! ```

pub mod atoms;
pub mod dom;
pub mod error;
pub mod fragment;
pub mod host;
pub mod reactive;
pub mod responsive;
mod util;

pub mod prelude {
    pub use crate::{
        atoms::{html::*, *},
        dom::{install_panic_hook, Dom, MemoryDom, WebDom},
        error::{Error, Result},
        fragment::{placeholder, text, Builder, Descriptor, Element, Layout, Mount, Placeholder},
        host::{Context, Host, SourceKind},
        reactive::{Binder, Store, StoreBinder},
        responsive::*,
    };
}
