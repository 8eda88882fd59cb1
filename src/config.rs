use crate::error::SyncError;

pub const DEFAULT_MAX_DAYS_PER_REQUEST: i64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    // Stripe (data source)
    pub stripe_secret_key: String,

    // Moneybird (bookkeeping target)
    pub moneybird_api_key: String,
    pub moneybird_administration_id: String,
    pub moneybird_contact_id: String,
    pub moneybird_financial_account_id: String,
    pub moneybird_ledger_account_id: Option<String>,

    // Invoice shaping
    pub fallback_line_item_description: String,

    // Fetch windowing
    pub max_days_per_request: i64,
}

impl Config {
    pub fn from_env() -> Result<Self, SyncError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, SyncError> {
        let config = Self {
            stripe_secret_key: require(&get, "STRIPE_SECRET_KEY")?,

            moneybird_api_key: require(&get, "MONEYBIRD_API_KEY")?,
            moneybird_administration_id: require(&get, "MONEYBIRD_ADMINISTRATION_ID")?,
            moneybird_contact_id: require(&get, "MONEYBIRD_CONTACT_ID")?,
            moneybird_financial_account_id: require(&get, "MONEYBIRD_FINANCIAL_ACCOUNT_ID")?,
            moneybird_ledger_account_id: get("MONEYBIRD_LEDGER_ACCOUNT_ID"),

            fallback_line_item_description: require(&get, "FALLBACK_LINE_ITEM_DESCRIPTION")?,

            max_days_per_request: get("MAX_DAYS_PER_REQUEST")
                .unwrap_or_else(|| DEFAULT_MAX_DAYS_PER_REQUEST.to_string())
                .parse()
                .map_err(|_| SyncError::Config("Invalid MAX_DAYS_PER_REQUEST".to_string()))?,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), SyncError> {
        if self.max_days_per_request < 1 {
            return Err(SyncError::Config(
                "MAX_DAYS_PER_REQUEST must be at least 1".to_string(),
            ));
        }

        tracing::debug!(
            "Configuration loaded for administration {}",
            self.moneybird_administration_id
        );

        Ok(())
    }
}

fn require(get: &impl Fn(&str) -> Option<String>, var: &str) -> Result<String, SyncError> {
    get(var)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| SyncError::Config(format!("{var} is not set")))
}
