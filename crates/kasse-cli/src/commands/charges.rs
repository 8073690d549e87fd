use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use clap::{Args, Subcommand};
use inquire::Confirm;

use kasse_data::{
    Club, CustomCharge, CustomChargeFilter, Insert, Member, MemberFilter,
    Query, RecurringCharge, RecurringChargeFilter, Retrieve,
};
use kasse_db::Connection;
use kasse_engine::datetime;
use kasse_engine::generate::GenerateCharges;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Charges {
    /// Generate the monthly dues charges of a year
    #[clap(name = "generate")]
    Generate(GenerateDues),
    /// Add a custom one-off charge
    #[clap(name = "add")]
    Add(AddCustomCharge),
    /// List charges
    #[clap(name = "list")]
    List(ListCharges),
}

impl Charges {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Charges::Generate(cmd) => cmd.run(db).await,
            Charges::Add(cmd) => cmd.run(db).await,
            Charges::List(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct GenerateDues {
    #[clap(short, long)]
    pub club: u32,
    #[clap(short, long, default_value_t = datetime::today().year())]
    pub year: i32,
}

impl GenerateDues {
    /// Run the charge generation for the active roster. Safe to
    /// re-run; existing charges are reported as skipped.
    pub async fn run(self, db: &Connection) -> Result<()> {
        let club: Club = db.retrieve(self.club).await?;
        let members: Vec<Member> = db
            .query(&MemberFilter {
                club_id: Some(club.id),
                active: Some(true),
                ..Default::default()
            })
            .await?;

        let ok = Confirm::new(&format!(
            "Generate monthly dues for {} members of {} for {}?",
            members.len(),
            club.name,
            self.year
        ))
        .with_default(true)
        .prompt()?;
        if !ok {
            return Ok(());
        }

        let report =
            club.generate_monthly_fees(db, &members, self.year).await?;
        println!(
            "{} charges created, {} already existed.",
            report.created, report.skipped
        );
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddCustomCharge {
    #[clap(short, long)]
    pub club: u32,
    #[clap(short, long)]
    pub description: String,
    #[clap(short, long)]
    pub amount: f64,
    #[clap(long)]
    pub due: NaiveDate,
    /// Member ids the charge applies to; all members if omitted
    #[clap(short, long, value_delimiter = ',')]
    pub members: Vec<u32>,
}

impl AddCustomCharge {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let club: Club = db.retrieve(self.club).await?;
        let charge = CustomCharge {
            club_id: club.id,
            description: self.description,
            amount: self.amount,
            due_date: self.due,
            applied_to: self.members,
            ..Default::default()
        };

        println!();
        charge.print_formatted();
        println!();
        let confirm = Confirm::new("Add charge?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        let charge = db.insert(charge).await?;
        println!("Charge added with id {}.", charge.id);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListCharges {
    #[clap(short, long)]
    pub club: u32,
    #[clap(short, long)]
    pub member: Option<u32>,
    #[clap(short, long)]
    pub year: Option<i32>,
}

impl ListCharges {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let recurring: Vec<RecurringCharge> = db
            .query(&RecurringChargeFilter {
                club_id: Some(self.club),
                member_id: self.member,
                year: self.year,
                ..Default::default()
            })
            .await?;
        println!("{} recurring charges.", recurring.len());
        recurring.print_formatted();

        let custom: Vec<CustomCharge> = db
            .query(&CustomChargeFilter {
                club_id: Some(self.club),
                member_id: self.member,
                ..Default::default()
            })
            .await?;
        println!();
        println!("{} custom charges.", custom.len());
        custom.print_formatted();
        Ok(())
    }
}
