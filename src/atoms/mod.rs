mod conditional;
pub mod html;
mod use_parent;

pub use conditional::*;
pub use use_parent::*;
