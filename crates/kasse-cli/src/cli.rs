use clap::{Parser, Subcommand};

use crate::commands::{
    Balances, Charges, Clubs, Fees, Members, Notify, Payments,
};

#[derive(Parser, Debug)]
#[clap(name = "kasse", version=env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[clap(long, default_value = "kasse.sqlite3")]
    pub dues_db: String,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn init() -> Self {
        Self::parse()
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage clubs
    #[clap(subcommand)]
    Clubs(Clubs),
    /// Manage members
    #[clap(subcommand)]
    Members(Members),
    /// Manage a club's fee settings
    #[clap(subcommand)]
    Fees(Fees),
    /// Generate and manage charges
    #[clap(subcommand)]
    Charges(Charges),
    /// Record payments
    #[clap(subcommand)]
    Pay(Payments),
    /// Show member balances
    #[clap(subcommand)]
    Balance(Balances),
    /// Compose dues reminders
    Notify(Notify),
}
