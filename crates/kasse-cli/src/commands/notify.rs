use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use inquire::Confirm;

use kasse_data::{Club, Member, MemberFilter, Query, Retrieve, Update};
use kasse_db::Connection;
use kasse_engine::balance::member_balance;
use kasse_engine::datetime;
use kasse_engine::notify::notification_message;

#[derive(Args, Debug)]
pub struct Notify {
    #[clap(short, long)]
    pub club: u32,
    #[clap(long)]
    pub as_of: Option<NaiveDate>,
}

impl Notify {
    /// Compose a dues reminder for every active member. One
    /// member's failure does not abort the run; failures are
    /// listed in the summary. Afterwards the club's last
    /// notification date is stamped.
    pub async fn run(self, db: &Connection) -> Result<()> {
        let as_of = self.as_of.unwrap_or_else(datetime::today);
        let club: Club = db.retrieve(self.club).await?;
        let members: Vec<Member> = db
            .query(&MemberFilter {
                club_id: Some(club.id),
                active: Some(true),
                ..Default::default()
            })
            .await?;

        let mut composed = 0;
        let mut failed = Vec::new();
        for member in &members {
            match member_balance(db, club.id, member.id, as_of).await {
                Ok(balance) => {
                    let message = notification_message(
                        &member.name,
                        &balance,
                        &club.currency,
                    );
                    println!("-> {}", message);
                    composed += 1;
                }
                Err(err) => failed.push((member.id, err)),
            }
        }

        println!();
        for (member_id, err) in &failed {
            println!("member {} failed: {}", member_id, err);
        }
        println!("{} reminders composed, {} failed.", composed, failed.len());

        let ok = Confirm::new("Mark members as notified?")
            .with_default(true)
            .prompt()?;
        if !ok {
            return Ok(());
        }

        let mut club = club;
        club.last_notification_at = Some(datetime::today());
        db.update(club).await?;
        Ok(())
    }
}
