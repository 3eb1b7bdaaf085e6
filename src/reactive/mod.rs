mod binder;
mod store;

pub use binder::*;
pub use store::*;
