use crate::config::Config;
use crate::error::SyncError;
use crate::models::{ExternalSalesInvoiceRecord, Payment, PaymentIntent};

/// Matches each created invoice back to its source payment via the reference
/// field and produces the payment that settles it. An unmatched invoice means
/// the reference was not preserved somewhere upstream; that aborts the run.
pub fn payments_for_invoices(
    invoices: &[ExternalSalesInvoiceRecord],
    payments: &[PaymentIntent],
    config: &Config,
) -> Result<Vec<Payment>, SyncError> {
    invoices
        .iter()
        .map(|invoice| {
            if !payments.iter().any(|payment| payment.id == invoice.reference) {
                return Err(SyncError::Correlation {
                    invoice_id: invoice.id.clone(),
                    reference: invoice.reference.clone(),
                });
            }

            Ok(Payment {
                payment_date: invoice.date.clone(),
                // total_unpaid is already in decimal units
                price: invoice.total_unpaid,
                invoice_id: invoice.id.clone(),
                financial_account_id: config.moneybird_financial_account_id.clone(),
            })
        })
        .collect()
}
