use anyhow::Result;
use clap::{Args, Subcommand};
use inquire::Confirm;

use kasse_data::{Insert, Member, MemberFilter, Query, Retrieve, Update};
use kasse_db::Connection;

use crate::formatting::PrintFormatted;

#[derive(Subcommand, Debug)]
pub enum Members {
    /// List members
    #[clap(name = "list")]
    List(ListMembers),
    /// Add a member
    #[clap(name = "add")]
    Add(AddMember),
    /// Update a member
    #[clap(name = "set")]
    Update(UpdateMember),
}

impl Members {
    pub async fn run(self, db: &Connection) -> Result<()> {
        match self {
            Members::List(cmd) => cmd.run(db).await,
            Members::Add(cmd) => cmd.run(db).await,
            Members::Update(cmd) => cmd.run(db).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct ListMembers {
    #[clap(short, long)]
    pub club: u32,
    #[clap(short, long)]
    pub name: Option<String>,
    /// Only the active billing roster
    #[clap(short, long)]
    pub active: bool,
}

impl ListMembers {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let filter = MemberFilter {
            club_id: Some(self.club),
            name: self.name,
            active: if self.active { Some(true) } else { None },
            ..Default::default()
        };
        let members: Vec<Member> = db.query(&filter).await?;
        println!("{} members.", members.len());
        members.print_formatted();
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct AddMember {
    #[clap(short, long)]
    pub club: u32,
    #[clap(short, long)]
    pub name: String,
    #[clap(short, long, default_value = "")]
    pub email: String,
}

impl AddMember {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member = Member {
            club_id: self.club,
            name: self.name,
            email: self.email,
            active: true,
            ..Default::default()
        };
        let member = db.insert(member).await?;
        println!("Member added with id {}.", member.id);
        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct UpdateMember {
    #[clap(short, long)]
    pub id: u32,
    #[clap(short, long)]
    pub name: Option<String>,
    #[clap(short, long)]
    pub email: Option<String>,
    #[clap(short, long)]
    pub active: Option<bool>,
}

impl UpdateMember {
    pub async fn run(self, db: &Connection) -> Result<()> {
        let member: Member = db.retrieve(self.id).await?;
        let mut update = member.clone();

        if let Some(name) = self.name {
            update.name = name;
        }
        if let Some(email) = self.email {
            update.email = email;
        }
        if let Some(active) = self.active {
            update.active = active;
        }

        println!();
        update.print_formatted();
        println!();
        let confirm = Confirm::new("Update member?").with_default(true);
        if !confirm.prompt()? {
            return Ok(());
        }

        db.update(update).await?;
        Ok(())
    }
}
