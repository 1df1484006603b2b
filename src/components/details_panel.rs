//! Details panel: owns the panel's visible content and its close affordance,
//! and hands dialog behaviour to [`ModalController`].
//!
//! Content passed to [`DetailsPanelView::show`] is trusted, pre-rendered
//! markup.  Nothing here sanitizes it; escaping is the template's job.

use crate::components::modal::ModalController;
use crate::constants::DEFAULT_CLOSE_CLASS;
use crate::dom::{DomHost, ListenerId};
use crate::errors::ModalError;
use crate::{debug_log, warn_log};

pub struct DetailsPanelView<H: DomHost> {
    host: H,
    panel: H::Element,
    modal: ModalController<H>,
    close_listener: Option<ListenerId>,
}

fn clear_panel<H: DomHost>(host: &H, panel: &H::Element) {
    host.set_inner_html(panel, "");
    host.set_displayed(panel, false);
}

impl<H: DomHost> DetailsPanelView<H> {
    pub fn new(host: H, panel_selector: &str) -> Result<Self, ModalError> {
        Self::with_close_class(host, panel_selector, DEFAULT_CLOSE_CLASS)
    }

    /// `close_class` marks the close affordance inside rendered content.
    pub fn with_close_class(host: H, panel_selector: &str, close_class: &str) -> Result<Self, ModalError> {
        let modal = ModalController::for_selector(host.clone(), panel_selector)?;
        let panel = modal.target().clone();

        // Whatever closes the dialog (Escape, backdrop, close button) the
        // panel content goes with it.
        {
            let host = host.clone();
            let panel = panel.clone();
            modal.on_close(Box::new(move |closed| {
                debug_log!("Details panel closed: {:?}", closed.reason);
                clear_panel(&host, &panel);
            }));
        }

        // Delegated so close buttons injected with later content still work.
        let close_listener = {
            let host_for_close = host.clone();
            let panel_for_close = panel.clone();
            let weak_modal = modal.downgrade();
            let registered = host.listen_delegated_click(
                &panel,
                close_class,
                Box::new(move |_matched| {
                    clear_panel(&host_for_close, &panel_for_close);
                    if let Some(modal) = weak_modal.upgrade() {
                        modal.deactivate();
                    }
                }),
            );
            match registered {
                Ok(id) => Some(id),
                Err(e) => {
                    warn_log!("Close affordance listener not registered: {}", e);
                    None
                }
            }
        };

        host.set_displayed(&panel, false);

        Ok(Self { host, panel, modal, close_listener })
    }

    /// Replace the panel content and open it as a dialog.  Calling it while
    /// already open closes the previous session first.
    pub fn show(&self, content_html: &str, trigger: Option<&H::Element>) -> Result<(), ModalError> {
        if self.modal.is_active() {
            self.modal.deactivate();
        }

        self.host.set_inner_html(&self.panel, content_html);
        self.host.set_displayed(&self.panel, true);

        if let Err(e) = self.modal.activate(trigger) {
            clear_panel(&self.host, &self.panel);
            return Err(e);
        }
        Ok(())
    }

    pub fn hide(&self) {
        clear_panel(&self.host, &self.panel);
        self.modal.deactivate();
    }

    pub fn is_open(&self) -> bool {
        self.modal.is_active()
    }

    pub fn panel(&self) -> &H::Element {
        &self.panel
    }

    pub fn modal(&self) -> &ModalController<H> {
        &self.modal
    }
}

impl<H: DomHost> Drop for DetailsPanelView<H> {
    fn drop(&mut self) {
        if let Some(id) = self.close_listener.take() {
            self.host.unlisten(id);
        }
    }
}
