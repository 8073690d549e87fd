use anyhow::Result;
use clap::{Args, Subcommand};

use kasse_data::{Club, ClubFilter, Insert, Query, Retrieve};
use kasse_db::Connection;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Clubs {
    /// Show a club
    #[clap(name = "show")]
    Show(ShowClub),
    /// List clubs
    #[clap(name = "list")]
    List(ListClubs),
    /// Add a club
    #[clap(name = "add")]
    Add(AddClub),
}

impl Clubs {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Clubs::Show(cmd) => cmd.run(db).await,
            Clubs::List(cmd) => cmd.run(db).await,
            Clubs::Add(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowClub {
    #[clap(short, long)]
    pub id: u32,
}

impl ShowClub {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let club: Club = db.retrieve(self.id).await?;
        println!();
        club.print_formatted();
        println!();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct ListClubs {
    #[clap(short, long)]
    pub name: Option<String>,
}

impl ListClubs {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let filter = ClubFilter {
            name: self.name,
            ..Default::default()
        };
        let clubs: Vec<Club> = db.query(&filter).await?;
        println!("{} clubs.", clubs.len());
        clubs.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddClub {
    #[clap(short, long)]
    pub name: String,
    #[clap(short, long, default_value = "EUR")]
    pub currency: String,
}

impl AddClub {
    /// Add a club. Billing starts disabled; dues are configured
    /// through the fees commands.
    pub async fn run(self, db: &Connection) -> Result<()> {
        let club = Club {
            name: self.name,
            currency: self.currency,
            active_months: Club::encode_months(&[]),
            ..Default::default()
        };
        let club = db.insert(club).await?;
        println!("Club added with id {}.", club.id);
        Ok(())
    }
}
