pub mod http;
pub mod moneybird;
pub mod stripe;

pub use http::ApiClient;
pub use moneybird::MoneybirdClient;
pub use stripe::StripeClient;
