//! Fetch-and-normalize services for the listing feeds.

use std::marker::PhantomData;

use serde_json::Value;

use super::api_client::HttpClient;
use crate::errors::DataError;
use crate::models::Listing;

/// Decode a feed body: it must be a JSON array of records.
pub fn parse_listing<L: Listing>(body: &str) -> Result<Vec<L>, DataError> {
    let value: Value = serde_json::from_str(body).map_err(|e| DataError::Decode(e.to_string()))?;
    let Value::Array(records) = value else {
        return Err(DataError::NotASequence { service: L::SERVICE_NAME });
    };
    records.into_iter().map(L::normalize).collect()
}

pub struct ListingService<C: HttpClient, L: Listing> {
    client: C,
    url: String,
    _listing: PhantomData<L>,
}

impl<C: HttpClient, L: Listing> ListingService<C, L> {
    pub fn new(client: C, url: &str) -> Self {
        Self { client, url: url.to_string(), _listing: PhantomData }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn get_all(&self) -> Result<Vec<L>, DataError> {
        let body = self.client.get(&self.url).await?;
        parse_listing::<L>(&body)
    }
}

pub type JobsDataService<C> = ListingService<C, crate::models::Job>;
pub type EventsDataService<C> = ListingService<C, crate::models::Event>;
