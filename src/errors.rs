//! Typed errors for the three failure domains: modal wiring, data loading
//! and page configuration.  Everything converts into a `js_sys::Error` at
//! the wasm boundary.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModalError {
    /// The dialog target element is missing or detached.  Programmer error,
    /// surfaced at construction time.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A dialog session is already open.  Only one may exist at a time.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("{service}.get_all: expected an array response")]
    NotASequence { service: &'static str },

    #[error("failed to decode response: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid app config: {0}")]
    Invalid(String),

    #[error("failed to read app config: {0}")]
    Decode(String),
}

macro_rules! into_js_error {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for JsValue {
                fn from(err: $ty) -> Self {
                    js_sys::Error::new(&err.to_string()).into()
                }
            }
        )*
    };
}

into_js_error!(ModalError, DataError, ConfigError);
