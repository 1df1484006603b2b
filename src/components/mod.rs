pub mod data_table;
pub mod details_panel;
pub mod modal;
pub mod status_region;

// Re-export commonly used items
pub use data_table::DataTableView;
pub use details_panel::DetailsPanelView;
pub use modal::{ModalController, ModalState, WeakModal};
pub use status_region::StatusRegionView;
