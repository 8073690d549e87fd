use anyhow::Result;
use async_trait::async_trait;

use kasse_data::{Club, Error, Insert, Member, RecurringCharge};

use crate::datetime::due_date_for;

/// Outcome of one generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Newly inserted charges.
    pub created: u32,
    /// Charges that already existed and were left untouched.
    pub skipped: u32,
}

#[async_trait]
pub trait GenerateCharges {
    /// Generate the recurring dues charges of a billing year for
    /// a member roster. Re-running with the same arguments never
    /// duplicates a charge; only new inserts are counted.
    async fn generate_monthly_fees<DB>(
        &self,
        db: &DB,
        members: &[Member],
        year: i32,
    ) -> Result<GenerationReport>
    where
        DB: Insert<RecurringCharge> + Send + Sync;
}

#[async_trait]
impl GenerateCharges for Club {
    async fn generate_monthly_fees<DB>(
        &self,
        db: &DB,
        members: &[Member],
        year: i32,
    ) -> Result<GenerationReport>
    where
        DB: Insert<RecurringCharge> + Send + Sync,
    {
        let mut report = GenerationReport::default();
        if !self.billing_active {
            return Ok(report);
        }
        let months = self.billing_months()?;

        for member in members {
            for &month in &months {
                let due_date = due_date_for(year, month).ok_or_else(|| {
                    Error::Validation(format!(
                        "{} is not a calendar month",
                        month
                    ))
                })?;
                let charge = RecurringCharge {
                    club_id: self.id,
                    member_id: member.id,
                    month,
                    year,
                    amount: self.fee_amount,
                    due_date,
                    ..Default::default()
                };
                match db.insert(charge).await {
                    Ok(_) => report.created += 1,
                    // An earlier run or a concurrent writer got
                    // here first; the existing charge keeps its
                    // amount and due date.
                    Err(err) if Error::is_conflict(&err) => {
                        report.skipped += 1
                    }
                    Err(err) => return Err(err),
                }
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Datelike;
    use kasse_data::{Query, RecurringChargeFilter};
    use kasse_db::connection;

    async fn billing_club(
        db: &kasse_db::Connection,
        months: &[u32],
        active: bool,
    ) -> (Club, Vec<Member>) {
        let club = db
            .insert(Club {
                name: "Chaos Sports Club".to_string(),
                fee_amount: 10.0,
                currency: "USD".to_string(),
                active_months: Club::encode_months(months),
                billing_active: active,
                ..Default::default()
            })
            .await
            .unwrap();

        let mut members = Vec::new();
        for name in ["Member A", "Member B"] {
            let member = db
                .insert(Member {
                    club_id: club.id,
                    name: name.to_string(),
                    active: true,
                    ..Default::default()
                })
                .await
                .unwrap();
            members.push(member);
        }
        (club, members)
    }

    #[tokio::test]
    async fn test_generation() {
        let (_handle, db) = connection::open_test().await;
        let (club, members) = billing_club(&db, &[1, 2, 3], true).await;

        let report =
            club.generate_monthly_fees(&db, &members, 2024).await.unwrap();
        assert_eq!(report.created, 6);
        assert_eq!(report.skipped, 0);

        let charges: Vec<RecurringCharge> = db
            .query(&RecurringChargeFilter {
                club_id: Some(club.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(charges.len(), 6);
        for charge in &charges {
            assert_eq!(charge.amount, 10.0);
            assert_eq!(charge.due_date.day(), 1);
            assert!(!charge.is_paid());
        }
    }

    #[tokio::test]
    async fn test_generation_is_idempotent() {
        let (_handle, db) = connection::open_test().await;
        let (club, members) = billing_club(&db, &[1, 2, 3], true).await;

        let first =
            club.generate_monthly_fees(&db, &members, 2024).await.unwrap();
        assert_eq!(first.created, 6);

        let second =
            club.generate_monthly_fees(&db, &members, 2024).await.unwrap();
        assert_eq!(second.created, 0);
        assert_eq!(second.skipped, 6);

        let charges: Vec<RecurringCharge> = db
            .query(&RecurringChargeFilter {
                club_id: Some(club.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(charges.len(), 6);
    }

    #[tokio::test]
    async fn test_generation_keeps_existing_amounts() {
        let (_handle, db) = connection::open_test().await;
        let (mut club, members) = billing_club(&db, &[1], true).await;

        club.generate_monthly_fees(&db, &members, 2024).await.unwrap();

        // Changing the fee does not rewrite existing charges
        club.fee_amount = 99.0;
        let report =
            club.generate_monthly_fees(&db, &members, 2024).await.unwrap();
        assert_eq!(report.created, 0);
        assert_eq!(report.skipped, 2);

        let charges: Vec<RecurringCharge> = db
            .query(&RecurringChargeFilter {
                club_id: Some(club.id),
                ..Default::default()
            })
            .await
            .unwrap();
        for charge in &charges {
            assert_eq!(charge.amount, 10.0);
        }
    }

    #[tokio::test]
    async fn test_generation_inactive_billing_is_noop() {
        let (_handle, db) = connection::open_test().await;
        let (club, members) = billing_club(&db, &[1, 2, 3], false).await;

        let report =
            club.generate_monthly_fees(&db, &members, 2024).await.unwrap();
        assert_eq!(report, GenerationReport::default());

        let charges: Vec<RecurringCharge> = db
            .query(&RecurringChargeFilter {
                club_id: Some(club.id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(charges.is_empty());
    }

    #[tokio::test]
    async fn test_generation_corrupt_months_errors() {
        let (_handle, db) = connection::open_test().await;
        let (mut club, members) = billing_club(&db, &[1], true).await;
        club.active_months = "not json".to_string();

        let err = club
            .generate_monthly_fees(&db, &members, 2024)
            .await
            .err()
            .unwrap();
        let err = err.downcast_ref::<Error>().unwrap();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_generation_new_member_only_fills_gaps() {
        let (_handle, db) = connection::open_test().await;
        let (club, mut members) = billing_club(&db, &[1, 2], true).await;

        club.generate_monthly_fees(&db, &members, 2024).await.unwrap();

        let late_joiner = db
            .insert(Member {
                club_id: club.id,
                name: "Member C".to_string(),
                active: true,
                ..Default::default()
            })
            .await
            .unwrap();
        members.push(late_joiner);

        let report =
            club.generate_monthly_fees(&db, &members, 2024).await.unwrap();
        assert_eq!(report.created, 2);
        assert_eq!(report.skipped, 4);
    }
}
