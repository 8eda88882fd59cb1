use std::time::Duration;

use crate::cli::Cli;
use crate::client::{MoneybirdClient, StripeClient};
use crate::config::Config;
use crate::error::SyncError;
use crate::models::ExternalSalesInvoice;
use crate::sync::correlate::payments_for_invoices;
use crate::sync::submit::{submit_batch, InvoiceSubmitter, PaymentSubmitter};
use crate::sync::transform::invoice_request;

/// Operator window to interrupt before real invoices get created.
pub const PREFLIGHT_DELAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub fetched: usize,
    pub invoices_created: usize,
    pub payments_created: usize,
}

/// Runs the whole pipeline: fetch payments, create an external sales invoice
/// per payment, then register a payment against every created invoice.
pub async fn run(
    config: &Config,
    args: &Cli,
    stripe: &StripeClient,
    moneybird: &MoneybirdClient,
) -> Result<RunSummary, SyncError> {
    let (date_start, date_end) = args.date_range()?;
    tracing::info!("Processing transactions from {date_start} to {date_end}");

    if !args.dry_run {
        tracing::warn!(
            "Running in production mode, will proceed with creating invoices in five seconds..."
        );
        tokio::time::sleep(PREFLIGHT_DELAY).await;
    }

    let mut payments = stripe.payments_by_date_range(date_start, date_end).await?;
    let fetched = payments.len();

    if payments.is_empty() {
        tracing::info!("No transactions found in the specified date range");
        return Ok(RunSummary {
            fetched: 0,
            invoices_created: 0,
            payments_created: 0,
        });
    }

    if args.just_one {
        tracing::info!("Just one flag is set, will process only the first transaction");
        payments.truncate(1);
    }

    let invoice_requests: Vec<ExternalSalesInvoice> = payments
        .iter()
        .map(|payment| invoice_request(payment, config))
        .collect();

    let invoices = submit_batch(&InvoiceSubmitter(moneybird), &invoice_requests, args.dry_run).await?;

    let payment_requests = payments_for_invoices(&invoices, &payments, config)?;
    let payment_records =
        submit_batch(&PaymentSubmitter(moneybird), &payment_requests, args.dry_run).await?;

    tracing::info!("Done!");

    Ok(RunSummary {
        fetched,
        invoices_created: invoices.len(),
        payments_created: payment_records.len(),
    })
}
