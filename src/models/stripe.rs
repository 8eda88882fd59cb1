use serde::{Deserialize, Serialize};

/// One page of a payment intent list query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentList {
    pub data: Vec<PaymentIntent>,
    #[serde(default)]
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    /// Total amount in minor currency units (cents).
    pub amount: i64,
    /// Creation time, epoch seconds.
    pub created: i64,
    #[serde(default)]
    pub invoice: Option<Invoice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub lines: LineList,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LineList {
    pub data: Vec<InvoiceLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceLine {
    #[serde(default)]
    pub description: Option<String>,
    /// Amount in minor currency units (cents).
    pub amount: i64,
}
