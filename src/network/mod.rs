// Re-export network modules
pub mod api_client;
pub mod data_service;

pub use api_client::{BrowserHttp, HttpClient};
pub use data_service::{parse_listing, EventsDataService, JobsDataService, ListingService};
