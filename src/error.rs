use thiserror::Error;
use wasm_bindgen::JsValue;

/// Errors produced while manipulating the DOM or measuring the viewport.
///
/// The conditional rendering core never surfaces these to callers. They are logged and the
/// affected placeholder degrades to rendering nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The DOM APIs are not accessible (eg, when executed outside of a browser).
    #[error("DOM is not available")]
    DomUnavailable,

    /// A node handle that the DOM does not know about.
    #[error("node `{0}` does not exist")]
    UnknownNode(String),

    /// Attempted to insert relative to a node that has no parent.
    #[error("node `{0}` has no parent to insert relative to")]
    Detached(String),

    /// A breakpoint name outside of the breakpoint table.
    #[error("unknown breakpoint `{0}`")]
    UnknownBreakpoint(String),

    /// Wrapper around JavaScript exceptions.
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        value
            .as_string()
            .map_or_else(|| Self::Js(format!("{value:?}")), Self::Js)
    }
}

impl From<Error> for JsValue {
    fn from(error: Error) -> Self {
        Self::from(error.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
