use chrono::{DateTime, SecondsFormat};

use crate::config::Config;
use crate::models::{ExternalSalesInvoice, InvoiceDetail, PaymentIntent};

/// Maps a Stripe payment onto the invoice Moneybird should carry for it.
///
/// Line items come from the payment's expanded invoice when it has any;
/// otherwise a single synthetic line covers the payment's own amount. Stripe
/// amounts are minor currency units, Moneybird prices decimal units.
pub fn invoice_request(payment: &PaymentIntent, config: &Config) -> ExternalSalesInvoice {
    let lines = payment
        .invoice
        .as_ref()
        .map(|invoice| invoice.lines.data.as_slice())
        .filter(|lines| !lines.is_empty());

    let details_attributes = match lines {
        Some(lines) => lines
            .iter()
            .map(|line| InvoiceDetail {
                description: line
                    .description
                    .clone()
                    .filter(|description| !description.is_empty())
                    .unwrap_or_else(|| config.fallback_line_item_description.clone()),
                price: line.amount as f64 / 100.0,
                ledger_account_id: config.moneybird_ledger_account_id.clone(),
            })
            .collect(),
        None => vec![InvoiceDetail {
            description: config.fallback_line_item_description.clone(),
            price: payment.amount as f64 / 100.0,
            ledger_account_id: config.moneybird_ledger_account_id.clone(),
        }],
    };

    ExternalSalesInvoice {
        reference: payment.id.clone(),
        contact_id: config.moneybird_contact_id.clone(),
        prices_are_incl_tax: true,
        details_attributes,
        date: issue_date(payment.created),
    }
}

fn issue_date(created: i64) -> String {
    DateTime::from_timestamp(created, 0)
        .unwrap_or(DateTime::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Invoice, InvoiceLine, LineList};

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

    fn payment_with_lines(lines: Vec<InvoiceLine>) -> PaymentIntent {
        PaymentIntent {
            id: "pi_1".to_string(),
            amount: 975,
            created: 1700000000,
            invoice: Some(Invoice {
                lines: LineList { data: lines },
            }),
        }
    }

    #[test]
    fn payment_without_invoice_gets_one_synthetic_line() {
        let payment = PaymentIntent {
            id: "pi_1".to_string(),
            amount: 975,
            created: 1700000000,
            invoice: None,
        };

        let request = invoice_request(&payment, &config());

        assert_eq!(request.reference, "pi_1");
        assert!(request.prices_are_incl_tax);
        assert_eq!(
            request.details_attributes,
            vec![InvoiceDetail {
                description: "Sale".to_string(),
                price: 9.75,
                ledger_account_id: None,
            }]
        );
    }

    #[test]
    fn invoice_lines_map_to_details() {
        let payment = payment_with_lines(vec![
            InvoiceLine {
                description: Some("Subscription".to_string()),
                amount: 500,
            },
            InvoiceLine {
                description: Some("Support".to_string()),
                amount: 475,
            },
        ]);

        let request = invoice_request(&payment, &config());

        assert_eq!(request.details_attributes.len(), 2);
        assert_eq!(request.details_attributes[0].description, "Subscription");
        assert_eq!(request.details_attributes[0].price, 5.0);
        assert_eq!(request.details_attributes[1].price, 4.75);
    }

    #[test]
    fn missing_or_empty_description_falls_back() {
        let payment = payment_with_lines(vec![
            InvoiceLine {
                description: None,
                amount: 500,
            },
            InvoiceLine {
                description: Some(String::new()),
                amount: 475,
            },
        ]);

        let request = invoice_request(&payment, &config());

        assert_eq!(request.details_attributes[0].description, "Sale");
        assert_eq!(request.details_attributes[1].description, "Sale");
    }

    #[test]
    fn empty_line_list_gets_the_synthetic_line() {
        let payment = payment_with_lines(vec![]);

        let request = invoice_request(&payment, &config());

        assert_eq!(request.details_attributes.len(), 1);
        assert_eq!(request.details_attributes[0].price, 9.75);
    }

    #[test]
    fn ledger_account_is_applied_to_every_line() {
        let mut config = config();
        config.moneybird_ledger_account_id = Some("400004".to_string());

        let payment = payment_with_lines(vec![InvoiceLine {
            description: Some("Subscription".to_string()),
            amount: 500,
        }]);

        let request = invoice_request(&payment, &config);
        assert_eq!(
            request.details_attributes[0].ledger_account_id.as_deref(),
            Some("400004")
        );
    }

    #[test]
    fn issue_date_is_an_iso_instant() {
        let payment = payment_with_lines(vec![]);
        let request = invoice_request(&payment, &config());

        assert_eq!(request.date, "2023-11-14T22:13:20.000Z");
        assert_eq!(request.contact_id, "200002");
    }

    #[test]
    fn transform_is_idempotent() {
        let payment = payment_with_lines(vec![InvoiceLine {
            description: Some("Subscription".to_string()),
            amount: 500,
        }]);

        let first = invoice_request(&payment, &config());
        let second = invoice_request(&payment, &config());
        assert_eq!(first, second);
    }
}
