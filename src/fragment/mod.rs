mod builder;
mod descriptor;
pub(crate) mod layout;
mod placeholder;

pub use builder::*;
pub use descriptor::*;
pub use layout::{Layout, RenderFn, Updater};
pub use placeholder::*;
