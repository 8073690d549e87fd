use anyhow::Result;
use clap::{Args, Subcommand};
use inquire::Confirm;

use kasse_data::{Club, Retrieve};
use kasse_db::Connection;
use kasse_engine::fee_settings::{save_fee_settings, FeeSettings};

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Fees {
    /// Show a club's fee settings
    #[clap(name = "show")]
    Show(ShowFees),
    /// Replace a club's fee settings
    #[clap(name = "set")]
    Set(SetFees),
}

impl Fees {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Fees::Show(cmd) => cmd.run(db).await,
            Fees::Set(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowFees {
    #[clap(short, long)]
    pub club: u32,
}

impl ShowFees {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let club: Club = db.retrieve(self.club).await?;
        println!();
        club.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct SetFees {
    #[clap(short, long)]
    pub club: u32,
    #[clap(short, long)]
    pub amount: f64,
    #[clap(long, default_value = "EUR")]
    pub currency: String,
    /// Billable calendar months, e.g. 1,2,3
    #[clap(short, long, value_delimiter = ',')]
    pub months: Vec<u32>,
    /// Enable monthly billing
    #[clap(long)]
    pub active: bool,
}

impl SetFees {
    /// Replace the club's fee settings. Existing charges are not
    /// regenerated; the new settings apply to future generation
    /// runs only.
    pub async fn run(self, db: &Connection) -> Result<()> {
        let settings = FeeSettings {
            amount: self.amount,
            currency: self.currency,
            active_months: self.months,
            active: self.active,
        };

        let confirm = Confirm::new("Replace fee settings?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let club = save_fee_settings(db, self.club, settings).await?;
        println!();
        club.print_formatted();
        println!();
        Ok(())
    }
}
