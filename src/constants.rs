// DOM contract shared by the modal controller and the details panel.
pub const DIALOG_ROLE: &str = "dialog";
pub const BACKDROP_CLASS: &str = "modal-backdrop";
pub const BODY_OPEN_CLASS: &str = "modal-open"; // suppresses background scroll
pub const DEFAULT_CLOSE_CLASS: &str = "details-close";
pub const TEMPORARY_TABINDEX: &str = "-1";

// Attribute names
pub const ATTR_ROLE: &str = "role";
pub const ATTR_ARIA_MODAL: &str = "aria-modal";
pub const ATTR_ARIA_LABELLEDBY: &str = "aria-labelledby";
pub const ATTR_TABINDEX: &str = "tabindex";
pub const ATTR_DATA_ID: &str = "data-id";

// Default page selectors, overridable through `AppConfig`
pub const DEFAULT_LOCALE: &str = "en-US";
pub const DEFAULT_STATUS_SELECTOR: &str = "#status";
pub const DEFAULT_TABLE_SELECTOR: &str = "#listing-table";
pub const DEFAULT_DETAILS_SELECTOR: &str = "#details-panel";

// Status region copy
pub const STATUS_LOADING: &str = "Loading…";
pub const STATUS_LOADED: &str = "Content loaded";
pub const STATUS_ERROR: &str = "Unable to load content";

// Empty-table copy
pub const JOBS_EMPTY_MESSAGE: &str = "There are no open job postings. Check back later.";
pub const EVENTS_EMPTY_MESSAGE: &str = "There are no upcoming events. Check back later.";
