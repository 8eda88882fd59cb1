use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalSalesInvoice {
    /// Correlation key: the Stripe payment intent id, preserved verbatim.
    pub reference: String,
    pub contact_id: String,
    pub prices_are_incl_tax: bool,
    pub details_attributes: Vec<InvoiceDetail>,
    /// Issue date as an ISO-8601 instant.
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceDetail {
    pub description: String,
    /// Price in decimal currency units (minor units / 100).
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_account_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalSalesInvoiceRecord {
    pub id: String,
    pub reference: String,
    pub date: String,
    /// Amount still unpaid, in decimal currency units as reported by Moneybird.
    /// Passed through to the payment price unchanged.
    #[serde(deserialize_with = "decimal_amount")]
    pub total_unpaid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub payment_date: String,
    /// Price in decimal currency units.
    pub price: f64,
    pub invoice_id: String,
    pub financial_account_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    #[serde(flatten)]
    pub payment: Payment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatement {
    pub reference: String,
    pub financial_account_id: String,
    pub financial_mutations_attributes: HashMap<String, FinancialMutation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialMutation {
    pub date: String,
    pub message: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialStatementRecord {
    pub id: String,
    #[serde(flatten)]
    pub statement: FinancialStatement,
}

// Moneybird renders money either as a JSON number or as a decimal string,
// depending on the endpoint.
// TODO: confirm with a live fixture which form external_sales_invoices uses.
fn decimal_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
    }
}
