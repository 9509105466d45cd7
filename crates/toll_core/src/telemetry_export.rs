//! Parquet export of the payment ledger and step notices.

mod notices;
mod payments;
mod utils;

pub use notices::write_notices_parquet;
pub use payments::write_payments_parquet;
