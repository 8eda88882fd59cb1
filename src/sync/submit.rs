use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::client::MoneybirdClient;
use crate::error::{ApiError, SyncError};
use crate::models::{
    ExternalSalesInvoice, ExternalSalesInvoiceRecord, Payment, PaymentRecord,
};

/// Placeholder identifier used for simulated records.
pub const DRY_RUN_ID: &str = "dry-run-id";

// Moneybird allows 30 requests per minute.
pub const SUBMIT_DELAY: Duration = Duration::from_millis(2000);

/// One kind of record the target system can create. Implementations supply the
/// real call and a simulated response for dry runs.
#[async_trait]
pub trait CreateRecord: Sync {
    type Request: Serialize + Send + Sync;
    type Response: Send;

    fn kind(&self) -> &'static str;
    fn reference(&self, request: &Self::Request) -> String;
    fn simulate(&self, request: &Self::Request) -> Self::Response;
    async fn create(&self, request: &Self::Request) -> Result<Self::Response, ApiError>;
}

/// Submits every request in order, one call at a time, pausing after each call
/// to stay under the target system's rate limit. In dry-run mode no network
/// call is made; each request is logged and answered with a simulated record.
/// The first failure aborts the batch.
pub async fn submit_batch<Op: CreateRecord>(
    op: &Op,
    requests: &[Op::Request],
    dry_run: bool,
) -> Result<Vec<Op::Response>, SyncError> {
    let mut responses = Vec::with_capacity(requests.len());

    for (index, request) in requests.iter().enumerate() {
        if dry_run {
            tracing::info!(
                "[dry run] Would create {}: {}",
                op.kind(),
                serde_json::to_string_pretty(request)
                    .unwrap_or_else(|_| "<unserializable>".to_string())
            );
            responses.push(op.simulate(request));
            continue;
        }

        let response = op
            .create(request)
            .await
            .map_err(|source| SyncError::Submission {
                kind: op.kind(),
                index,
                reference: op.reference(request),
                source,
            })?;
        responses.push(response);

        tokio::time::sleep(SUBMIT_DELAY).await;
    }

    Ok(responses)
}

pub struct InvoiceSubmitter<'a>(pub &'a MoneybirdClient);

#[async_trait]
impl CreateRecord for InvoiceSubmitter<'_> {
    type Request = ExternalSalesInvoice;
    type Response = ExternalSalesInvoiceRecord;

    fn kind(&self) -> &'static str {
        "external sales invoice"
    }

    fn reference(&self, request: &Self::Request) -> String {
        request.reference.clone()
    }

    fn simulate(&self, request: &Self::Request) -> Self::Response {
        ExternalSalesInvoiceRecord {
            id: DRY_RUN_ID.to_string(),
            reference: request.reference.clone(),
            date: request.date.clone(),
            // the request carries no unpaid amount; assume nothing is paid yet
            total_unpaid: request
                .details_attributes
                .iter()
                .map(|detail| detail.price)
                .sum(),
        }
    }

    async fn create(&self, request: &Self::Request) -> Result<Self::Response, ApiError> {
        self.0.create_external_sales_invoice(request).await
    }
}

pub struct PaymentSubmitter<'a>(pub &'a MoneybirdClient);

#[async_trait]
impl CreateRecord for PaymentSubmitter<'_> {
    type Request = Payment;
    type Response = PaymentRecord;

    fn kind(&self) -> &'static str {
        "payment"
    }

    fn reference(&self, request: &Self::Request) -> String {
        request.invoice_id.clone()
    }

    fn simulate(&self, request: &Self::Request) -> Self::Response {
        PaymentRecord {
            id: DRY_RUN_ID.to_string(),
            payment: request.clone(),
        }
    }

    async fn create(&self, request: &Self::Request) -> Result<Self::Response, ApiError> {
        self.0.create_payment(request).await
    }
}
