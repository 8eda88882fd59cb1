use reqwest::{Method, StatusCode};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid arguments: {0}")]
    Argument(String),

    #[error("fetching payments from Stripe failed: {0}")]
    SourceFetch(#[source] ApiError),

    #[error("creating {kind} {index} (reference {reference}) failed: {source}")]
    Submission {
        kind: &'static str,
        index: usize,
        reference: String,
        #[source]
        source: ApiError,
    },

    #[error("payment record not found for invoice {invoice_id} (reference {reference})")]
    Correlation {
        invoice_id: String,
        reference: String,
    },
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{method} {url}: no response received: {source}")]
    Transport {
        method: Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {url} returned {status}")]
    Status {
        method: Method,
        url: String,
        status: StatusCode,
        body: String,
    },
}
