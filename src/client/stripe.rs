use chrono::{DateTime, Duration, Utc};
use futures::future;

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::SyncError;
use crate::models::{PaymentIntent, PaymentIntentList};

pub const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

const PAGE_LIMIT: u32 = 100;

pub struct StripeClient {
    api: ApiClient,
    max_days_per_request: i64,
}

impl StripeClient {
    pub fn new(config: &Config) -> Result<Self, SyncError> {
        Self::with_base_url(STRIPE_API_BASE, config)
    }

    pub fn with_base_url(base_url: &str, config: &Config) -> Result<Self, SyncError> {
        Ok(Self {
            api: ApiClient::new(base_url, &config.stripe_secret_key)?,
            max_days_per_request: config.max_days_per_request,
        })
    }

    /// Returns every payment intent created within `[date_start, date_end]`,
    /// with invoice line detail expanded. Ranges wider than the configured
    /// window size are split and fetched concurrently.
    pub async fn payments_by_date_range(
        &self,
        date_start: DateTime<Utc>,
        date_end: DateTime<Utc>,
    ) -> Result<Vec<PaymentIntent>, SyncError> {
        let windows = fetch_windows(date_start, date_end, self.max_days_per_request);

        let pages = future::try_join_all(
            windows
                .into_iter()
                .map(|(start, end)| self.list_page(start, end)),
        )
        .await?;

        let payments: Vec<PaymentIntent> = pages.into_iter().flat_map(|page| page.data).collect();
        tracing::info!("Found {} payments", payments.len());

        Ok(payments)
    }

    async fn list_page(
        &self,
        gte: DateTime<Utc>,
        lte: DateTime<Utc>,
    ) -> Result<PaymentIntentList, SyncError> {
        let query = [
            ("limit", PAGE_LIMIT.to_string()),
            ("created[gte]", gte.timestamp().to_string()),
            ("created[lte]", lte.timestamp().to_string()),
            (
                "expand[]",
                "data.latest_charge.balance_transaction".to_string(),
            ),
            ("expand[]", "data.invoice".to_string()),
        ];

        let page: PaymentIntentList = self
            .api
            .get("payment_intents", &query)
            .await
            .map_err(SyncError::SourceFetch)?;

        // Only the first page is read per window.
        // TODO: follow pagination cursors instead of warning.
        if page.has_more {
            tracing::warn!(
                "Window {} - {} holds more than {} payments, narrow the range",
                gte,
                lte,
                PAGE_LIMIT
            );
        }

        Ok(page)
    }
}

/// Splits `[start, end]` into windows stepped by `max_days` from `start`.
/// Spans within `max_days` yield a single window covering the exact range.
/// The last split window is not clamped and may run past `end`.
pub(crate) fn fetch_windows(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    max_days: i64,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let total_days = (end - start).num_days();
    if total_days <= max_days {
        return vec![(start, end)];
    }

    let mut windows = Vec::new();
    let mut offset = 0;
    while offset < total_days {
        windows.push((
            start + Duration::days(offset),
            start + Duration::days(offset + max_days),
        ));
        offset += max_days;
    }
    windows
}
