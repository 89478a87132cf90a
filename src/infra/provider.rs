//! Data provider seam between the remote store and the table.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::{AppState, FetchOutcome, FetchTicket, Item, RecordError};
use crate::util::config::ConfigError;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("http request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(String),
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// One settled fetch: rows that passed validation plus the ones that did not.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FetchedItems {
    pub items: Vec<Item>,
    pub rejected: Vec<RecordError>,
}

impl FromIterator<Result<Item, RecordError>> for FetchedItems {
    fn from_iter<I: IntoIterator<Item = Result<Item, RecordError>>>(iter: I) -> Self {
        let mut fetched = FetchedItems::default();
        for entry in iter {
            match entry {
                Ok(item) => fetched.items.push(item),
                Err(err) => fetched.rejected.push(err),
            }
        }
        fetched
    }
}

#[async_trait]
pub trait ItemProvider: Send + Sync {
    async fn fetch_items(&self) -> Result<FetchedItems, ProviderError>;
}

/// Applies a settled fetch to the table under the ticket it was started with.
pub fn settle_fetch(
    state: &mut AppState,
    ticket: FetchTicket,
    result: Result<FetchedItems, ProviderError>,
) -> FetchOutcome {
    let outcome = match result {
        Ok(batch) => {
            for rejected in &batch.rejected {
                warn!("rejected beer row: {rejected}");
            }
            let rejected = batch.rejected.len();
            state.complete_fetch(ticket, batch.items, rejected)
        }
        Err(err) => state.fail_fetch(ticket, err.to_string()),
    };

    if let FetchOutcome::Applied { rows, skipped } = &outcome {
        info!("table now shows {rows} beers, {skipped} skipped");
    }
    outcome
}
