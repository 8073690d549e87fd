use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use kasse_data::{Member, MemberFilter, Query};
use kasse_db::Connection;
use kasse_engine::balance::{all_member_balances, member_balance};
use kasse_engine::datetime;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Balances {
    /// Show one member's balance
    #[clap(name = "show")]
    Show(ShowBalance),
    /// Show the balances of the whole roster
    #[clap(name = "all")]
    All(AllBalances),
}

impl Balances {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Balances::Show(cmd) => cmd.run(db).await,
            Balances::All(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowBalance {
    #[clap(short, long)]
    pub club: u32,
    #[clap(short, long)]
    pub member: u32,
    /// Evaluate the charge statuses at this date, today if omitted
    #[clap(long)]
    pub as_of: Option<NaiveDate>,
}

impl ShowBalance {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let as_of = self.as_of.unwrap_or_else(datetime::today);
        let balance = member_balance(db, self.club, self.member, as_of).await?;
        println!();
        balance.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AllBalances {
    #[clap(short, long)]
    pub club: u32,
    #[clap(long)]
    pub as_of: Option<NaiveDate>,
}

impl AllBalances {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let as_of = self.as_of.unwrap_or_else(datetime::today);
        let members: Vec<Member> = db
            .query(&MemberFilter {
                club_id: Some(self.club),
                active: Some(true),
                ..Default::default()
            })
            .await?;
        let ids: Vec<u32> = members.iter().map(|m| m.id).collect();

        let report = all_member_balances(db, self.club, &ids, as_of).await;
        report.balances.print_formatted();

        if !report.failed.is_empty() {
            println!();
            println!("{} members failed:", report.failed.len());
            for (member_id, err) in &report.failed {
                println!("  member {}: {}", member_id, err);
            }
        }
        println!();
        println!(
            "{} balances, {} failed.",
            report.balances.len(),
            report.failed.len()
        );
        Ok(())
    }
}
