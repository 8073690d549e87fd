use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use inquire::Confirm;

use kasse_data::{CustomCharge, RecurringCharge, Retrieve};
use kasse_db::Connection;
use kasse_engine::datetime;
use kasse_engine::payments::{record_payment, ChargeRef};

#[derive(Subcommand, Debug)]
pub enum Payments {
    /// Record the payment of a recurring charge
    #[clap(name = "recurring")]
    Recurring(PayRecurring),
    /// Record a member's payment of a custom charge
    #[clap(name = "custom")]
    Custom(PayCustom),
}

impl Payments {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Payments::Recurring(cmd) => cmd.run(db).await,
            Payments::Custom(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct PayRecurring {
    #[clap(short, long)]
    pub charge: u32,
    /// Payment date, today if omitted
    #[clap(short, long)]
    pub date: Option<NaiveDate>,
}

impl PayRecurring {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let charge: RecurringCharge = db.retrieve(self.charge).await?;
        let paid_at = self.date.unwrap_or_else(datetime::today);

        let ok = Confirm::new(&format!(
            "Record payment of {} ({}) on {}?",
            charge.amount,
            charge.describe(),
            paid_at
        ))
        .with_default(true)
        .prompt()?;
        if !ok {
            return Ok(());
        }

        record_payment(db, ChargeRef::Recurring(charge.id), paid_at).await?;
        println!("Payment recorded.");
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct PayCustom {
    #[clap(short, long)]
    pub charge: u32,
    #[clap(short, long)]
    pub member: u32,
    /// Payment date, today if omitted
    #[clap(short, long)]
    pub date: Option<NaiveDate>,
}

impl PayCustom {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let charge: CustomCharge = db.retrieve(self.charge).await?;
        let paid_at = self.date.unwrap_or_else(datetime::today);

        let ok = Confirm::new(&format!(
            "Record payment of {} ({}) by member {} on {}?",
            charge.amount, charge.description, self.member, paid_at
        ))
        .with_default(true)
        .prompt()?;
        if !ok {
            return Ok(());
        }

        record_payment(
            db,
            ChargeRef::Custom {
                charge_id: charge.id,
                member_id: self.member,
            },
            paid_at,
        )
        .await?;
        println!("Payment recorded.");
        Ok(())
    }
}
