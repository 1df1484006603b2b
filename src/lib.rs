use wasm_bindgen::prelude::*;

// Crate-wide logging macros (`crate::debug_log!` etc.)
mod macros;

pub mod app;
pub mod components;
pub mod config;
pub mod constants;
pub mod dom;
pub mod dom_utils;
pub mod errors;
pub mod messages;
pub mod models;
pub mod network;
pub mod state;
pub mod table_config;
pub mod templates;
pub mod utils;

#[cfg(test)]
mod tests;

pub use components::{DetailsPanelView, ModalController, ModalState};
pub use errors::{ConfigError, DataError, ModalError};
pub use messages::{CloseReason, DialogClosed};

use models::{Event, Job};

// Entry point for the WASM module
#[wasm_bindgen(start)]
pub fn start() {
    // Initialize better panic messages
    console_error_panic_hook::set_once();
}

/// Bootstrap the jobs page.  `config` is `{ dataUrl, locale?, statusSelector?,
/// tableSelector?, detailsSelector? }`.
#[wasm_bindgen(js_name = initJobsApp)]
pub fn init_jobs_app(config: JsValue) -> Result<(), JsValue> {
    app::init_listing_app::<Job>(config)
}

/// Bootstrap the events page.  Same config shape as `initJobsApp`.
#[wasm_bindgen(js_name = initEventsApp)]
pub fn init_events_app(config: JsValue) -> Result<(), JsValue> {
    app::init_listing_app::<Event>(config)
}
