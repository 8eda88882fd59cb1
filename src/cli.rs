use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::Parser;

use crate::error::SyncError;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "stripebird",
    version,
    about = "Sync Stripe payments into Moneybird as paid external sales invoices"
)]
pub struct Cli {
    /// First day of the range, inclusive (DD-MM-YYYY)
    #[arg(long = "date-start", value_name = "DD-MM-YYYY", value_parser = parse_day)]
    pub date_start: NaiveDate,

    /// Last day of the range, inclusive (DD-MM-YYYY)
    #[arg(long = "date-end", value_name = "DD-MM-YYYY", value_parser = parse_day)]
    pub date_end: NaiveDate,

    /// Log what would be created without calling Moneybird
    #[arg(long)]
    pub dry_run: bool,

    /// Process only the first fetched payment
    #[arg(long)]
    pub just_one: bool,
}

impl Cli {
    /// Widens the day range to UTC instants, both ends at midnight.
    pub fn date_range(&self) -> Result<(DateTime<Utc>, DateTime<Utc>), SyncError> {
        if self.date_start > self.date_end {
            return Err(SyncError::Argument(
                "start date must be before end date".to_string(),
            ));
        }

        let start = self.date_start.and_time(NaiveTime::MIN).and_utc();
        let end = self.date_end.and_time(NaiveTime::MIN).and_utc();
        Ok((start, end))
    }
}

fn parse_day(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%d-%m-%Y")
        .map_err(|_| format!("'{raw}' is not a date in DD-MM-YYYY format"))
}
