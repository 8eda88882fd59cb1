pub mod moneybird;
pub mod stripe;

pub use moneybird::*;
pub use stripe::*;
