//! Composition root for the jobs and events pages.
//!
//! Wires config → data service → status line → table → details panel.
//! Modal focus, backdrop and ARIA handling all stay inside the panel's
//! controller; nothing here touches them.

use std::rc::Rc;

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;

use crate::components::data_table::DataTableView;
use crate::components::details_panel::DetailsPanelView;
use crate::components::status_region::StatusRegionView;
use crate::config::AppConfig;
use crate::dom::{BrowserDom, DomHost};
use crate::errors::{DataError, ModalError};
use crate::models::Listing;
use crate::network::{BrowserHttp, ListingService};
use crate::utils::DateFormatter;
use crate::{error_log, warn_log};

/// The views of one listing page, before data has arrived.
pub struct ListingPage<H: DomHost> {
    status: StatusRegionView<H>,
    table: DataTableView<H>,
    panel: Rc<DetailsPanelView<H>>,
    formatter: DateFormatter,
}

impl<H: DomHost> ListingPage<H> {
    /// Fails only when the details panel element is missing.
    pub fn new<L: Listing>(host: H, config: &AppConfig) -> Result<Self, ModalError> {
        let formatter = DateFormatter::new(&config.locale);
        let panel = Rc::new(DetailsPanelView::new(host.clone(), &config.details_selector)?);
        let status = StatusRegionView::new(host.clone(), &config.status_selector);
        let table = DataTableView::new(host, &config.table_selector, L::table_config(), formatter.clone());
        Ok(Self { status, table, panel, formatter })
    }

    pub fn panel(&self) -> &Rc<DetailsPanelView<H>> {
        &self.panel
    }

    pub fn start_loading(&self) {
        self.status.set_loading();
    }

    /// Render the fetch result: a table wired to the details panel, or the
    /// error status.
    pub fn loaded<L: Listing>(&self, result: Result<Vec<L>, DataError>) {
        let rows = match result {
            Ok(rows) => rows,
            Err(e) => {
                error_log!("Failed to load {}: {}", L::SERVICE_NAME, e);
                self.status.set_error();
                return;
            }
        };

        let panel = self.panel.clone();
        let formatter = self.formatter.clone();
        self.table.init(rows, move |item: &L, trigger: &H::Element| {
            if item.id().is_none() {
                warn_log!("Row missing id; details not shown");
                return;
            }
            if let Err(e) = panel.show(&item.details_html(&formatter), Some(trigger)) {
                error_log!("Details panel could not open: {}", e);
            }
        });
        self.status.set_loaded();
    }
}

/// Build the page against the live document and start the fetch.
pub fn init_listing_app<L: Listing>(config: JsValue) -> Result<(), JsValue> {
    let config = AppConfig::from_js(config)?;
    let host = BrowserDom::from_window().ok_or_else(|| JsValue::from_str("no document on window"))?;

    let page = ListingPage::new::<L>(host, &config)?;
    let service = ListingService::<_, L>::new(BrowserHttp, &config.data_url);

    page.start_loading();
    spawn_local(async move {
        let result = service.get_all().await;
        page.loaded(result);
    });
    Ok(())
}
