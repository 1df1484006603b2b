//! Live status line above the table ("Loading…", "Content loaded", ...).
//! A page without the region element gets a silent no-op view.

use crate::constants::{STATUS_ERROR, STATUS_LOADED, STATUS_LOADING};
use crate::dom::DomHost;

pub struct StatusRegionView<H: DomHost> {
    host: H,
    region: Option<H::Element>,
}

impl<H: DomHost> StatusRegionView<H> {
    pub fn new(host: H, selector: &str) -> Self {
        let region = host.query(selector);
        Self { host, region }
    }

    pub fn set_loading(&self) {
        self.set(STATUS_LOADING);
    }

    pub fn set_loaded(&self) {
        self.set(STATUS_LOADED);
    }

    pub fn set_error(&self) {
        self.set(STATUS_ERROR);
    }

    fn set(&self, text: &str) {
        if let Some(region) = &self.region {
            self.host.set_text(region, text);
        }
    }
}
