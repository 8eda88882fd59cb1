use serde::Serialize;

use crate::client::ApiClient;
use crate::config::Config;
use crate::error::{ApiError, SyncError};
use crate::models::{
    ExternalSalesInvoice, ExternalSalesInvoiceRecord, FinancialStatement,
    FinancialStatementRecord, Payment, PaymentRecord,
};

pub const MONEYBIRD_API_BASE: &str = "https://moneybird.com/api/v2";

pub struct MoneybirdClient {
    api: ApiClient,
    administration_id: String,
}

impl MoneybirdClient {
    pub fn new(config: &Config) -> Result<Self, SyncError> {
        Self::with_base_url(MONEYBIRD_API_BASE, config)
    }

    pub fn with_base_url(base_url: &str, config: &Config) -> Result<Self, SyncError> {
        Ok(Self {
            api: ApiClient::new(base_url, &config.moneybird_api_key)?,
            administration_id: config.moneybird_administration_id.clone(),
        })
    }

    pub async fn create_external_sales_invoice(
        &self,
        invoice: &ExternalSalesInvoice,
    ) -> Result<ExternalSalesInvoiceRecord, ApiError> {
        #[derive(Serialize)]
        struct Envelope<'a> {
            external_sales_invoice: &'a ExternalSalesInvoice,
        }

        let record: ExternalSalesInvoiceRecord = self
            .api
            .post(
                &format!("{}/external_sales_invoices", self.administration_id),
                &Envelope {
                    external_sales_invoice: invoice,
                },
            )
            .await?;

        tracing::info!("Created external sales invoice with id {}", record.id);
        Ok(record)
    }

    pub async fn create_payment(&self, payment: &Payment) -> Result<PaymentRecord, ApiError> {
        #[derive(Serialize)]
        struct Envelope<'a> {
            payment: &'a Payment,
        }

        let record: PaymentRecord = self
            .api
            .post(
                &format!(
                    "{}/external_sales_invoices/{}/payments",
                    self.administration_id, payment.invoice_id
                ),
                &Envelope { payment },
            )
            .await?;

        tracing::info!("Created payment with id {}", record.id);
        Ok(record)
    }

    /// Not part of the sync flow; kept for bank statement imports.
    pub async fn create_financial_statement(
        &self,
        statement: &FinancialStatement,
    ) -> Result<FinancialStatementRecord, ApiError> {
        #[derive(Serialize)]
        struct Envelope<'a> {
            financial_statement: &'a FinancialStatement,
        }

        let record: FinancialStatementRecord = self
            .api
            .post(
                &format!("{}/financial_statements", self.administration_id),
                &Envelope {
                    financial_statement: statement,
                },
            )
            .await?;

        tracing::info!("Created financial statement with id {}", record.id);
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::InvoiceDetail;

    fn config() -> Config {
        Config {
            stripe_secret_key: "sk_test".to_string(),
            moneybird_api_key: "mb_test".to_string(),
            moneybird_administration_id: "100001".to_string(),
            moneybird_contact_id: "200002".to_string(),
            moneybird_financial_account_id: "300003".to_string(),
            moneybird_ledger_account_id: None,
            fallback_line_item_description: "Sale".to_string(),
            max_days_per_request: 30,
        }
    }

    fn invoice() -> ExternalSalesInvoice {
        ExternalSalesInvoice {
            reference: "pi_1".to_string(),
            contact_id: "200002".to_string(),
            prices_are_incl_tax: true,
            details_attributes: vec![InvoiceDetail {
                description: "Sale".to_string(),
                price: 9.75,
                ledger_account_id: None,
            }],
            date: "2024-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[tokio::test]
    async fn posts_invoice_envelope_and_parses_record() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/100001/external_sales_invoices")
            .match_header("authorization", "Bearer mb_test")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "external_sales_invoice": {
                    "reference": "pi_1",
                    "contact_id": "200002",
                    "prices_are_incl_tax": true,
                }
            })))
            .with_status(201)
            .with_body(
                r#"{
                    "id": "55",
                    "reference": "pi_1",
                    "date": "2024-01-01",
                    "total_unpaid": "9.75"
                }"#,
            )
            .create_async()
            .await;

        let client = MoneybirdClient::with_base_url(&server.url(), &config()).unwrap();
        let record = client
            .create_external_sales_invoice(&invoice())
            .await
            .unwrap();

        assert_eq!(record.id, "55");
        assert_eq!(record.reference, "pi_1");
        assert_eq!(record.total_unpaid, 9.75);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn posts_payment_under_its_invoice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/100001/external_sales_invoices/55/payments")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "payment": {
                    "invoice_id": "55",
                    "price": 9.75,
                    "financial_account_id": "300003",
                }
            })))
            .with_status(201)
            .with_body(
                r#"{
                    "id": "77",
                    "payment_date": "2024-01-01",
                    "price": 9.75,
                    "invoice_id": "55",
                    "financial_account_id": "300003"
                }"#,
            )
            .create_async()
            .await;

        let client = MoneybirdClient::with_base_url(&server.url(), &config()).unwrap();
        let payment = Payment {
            payment_date: "2024-01-01".to_string(),
            price: 9.75,
            invoice_id: "55".to_string(),
            financial_account_id: "300003".to_string(),
        };
        let record = client.create_payment(&payment).await.unwrap();

        assert_eq!(record.id, "77");
        assert_eq!(record.payment, payment);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_invoice_surfaces_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/100001/external_sales_invoices")
            .with_status(422)
            .with_body(r#"{"error": {"contact_id": ["is not valid"]}}"#)
            .create_async()
            .await;

        let client = MoneybirdClient::with_base_url(&server.url(), &config()).unwrap();
        let err = client
            .create_external_sales_invoice(&invoice())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Status { status, .. } if status.as_u16() == 422));
    }
}
