pub mod balance;
pub mod datetime;
pub mod fee_settings;
pub mod generate;
pub mod notify;
pub mod payments;
