use anyhow::Result;
use chrono::NaiveDate;

use kasse_data::{
    CustomCharge, CustomChargeFilter, Query, RecurringCharge,
    RecurringChargeFilter,
};

/// Charge state at a point in time. Derived from the payment and
/// due date facts on every read, never stored: an unpaid charge
/// turns overdue simply by the query time passing its due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeStatus {
    Paid,
    Pending,
    Overdue,
}

impl ChargeStatus {
    pub fn derive(paid: bool, due_date: NaiveDate, as_of: NaiveDate) -> Self {
        if paid {
            ChargeStatus::Paid
        } else if due_date < as_of {
            ChargeStatus::Overdue
        } else {
            ChargeStatus::Pending
        }
    }
}

/// A member's net financial position. A negative balance is the
/// amount owed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemberBalance {
    pub member_id: u32,
    pub total_paid: f64,
    pub pending: f64,
    pub overdue: f64,
    pub balance: f64,
}

impl MemberBalance {
    fn add(&mut self, status: ChargeStatus, amount: f64) {
        match status {
            ChargeStatus::Paid => self.total_paid += amount,
            ChargeStatus::Pending => self.pending += amount,
            ChargeStatus::Overdue => self.overdue += amount,
        }
        self.balance = self.total_paid - self.pending - self.overdue;
    }

    pub fn owes(&self) -> bool {
        self.balance < 0.0
    }
}

/// Calculate a member's balance as of a given date. A pure read
/// over the current charge and payment state: all recurring
/// charges of the member across years, plus every club custom
/// charge applying to them.
pub async fn member_balance<DB>(
    db: &DB,
    club_id: u32,
    member_id: u32,
    as_of: NaiveDate,
) -> Result<MemberBalance>
where
    DB: Query<RecurringCharge, Filter = RecurringChargeFilter>
        + Query<CustomCharge, Filter = CustomChargeFilter>
        + Send
        + Sync,
{
    let mut balance = MemberBalance {
        member_id,
        ..Default::default()
    };

    let recurring: Vec<RecurringCharge> = db
        .query(&RecurringChargeFilter {
            club_id: Some(club_id),
            member_id: Some(member_id),
            ..Default::default()
        })
        .await?;
    for charge in recurring {
        let status =
            ChargeStatus::derive(charge.is_paid(), charge.due_date, as_of);
        balance.add(status, charge.amount);
    }

    let custom: Vec<CustomCharge> = db
        .query(&CustomChargeFilter {
            club_id: Some(club_id),
            member_id: Some(member_id),
            ..Default::default()
        })
        .await?;
    for charge in custom {
        let status = ChargeStatus::derive(
            charge.is_paid_by(member_id),
            charge.due_date,
            as_of,
        );
        balance.add(status, charge.amount);
    }

    Ok(balance)
}

/// Batch balance results. Failed members are collected instead
/// of aborting the batch.
#[derive(Debug, Clone, Default)]
pub struct BalanceReport {
    pub balances: Vec<MemberBalance>,
    pub failed: Vec<(u32, String)>,
}

/// Calculate the balances of many members. Each member goes
/// through [`member_balance`], so batch and single results never
/// diverge.
pub async fn all_member_balances<DB>(
    db: &DB,
    club_id: u32,
    member_ids: &[u32],
    as_of: NaiveDate,
) -> BalanceReport
where
    DB: Query<RecurringCharge, Filter = RecurringChargeFilter>
        + Query<CustomCharge, Filter = CustomChargeFilter>
        + Send
        + Sync,
{
    let mut report = BalanceReport::default();
    for &member_id in member_ids {
        match member_balance(db, club_id, member_id, as_of).await {
            Ok(balance) => report.balances.push(balance),
            Err(err) => report.failed.push((member_id, format!("{}", err))),
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    use kasse_data::{Club, Insert, Member};
    use kasse_db::connection;

    use crate::generate::GenerateCharges;
    use crate::payments::{record_payment, ChargeRef};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn assert_identity(balance: &MemberBalance) {
        assert_eq!(
            balance.balance,
            balance.total_paid - balance.pending - balance.overdue
        );
    }

    async fn quarterly_club(
        db: &kasse_db::Connection,
    ) -> (Club, Member, Member) {
        let club = db
            .insert(Club {
                name: "Chaos Sports Club".to_string(),
                fee_amount: 10.0,
                currency: "USD".to_string(),
                active_months: Club::encode_months(&[1, 2, 3]),
                billing_active: true,
                ..Default::default()
            })
            .await
            .unwrap();
        let a = db
            .insert(Member {
                club_id: club.id,
                name: "Member A".to_string(),
                active: true,
                ..Default::default()
            })
            .await
            .unwrap();
        let b = db
            .insert(Member {
                club_id: club.id,
                name: "Member B".to_string(),
                active: true,
                ..Default::default()
            })
            .await
            .unwrap();
        (club, a, b)
    }

    #[test]
    fn test_status_derivation() {
        let due = date(2024, 2, 1);
        assert_eq!(
            ChargeStatus::derive(true, due, date(2024, 6, 1)),
            ChargeStatus::Paid
        );
        assert_eq!(
            ChargeStatus::derive(false, due, date(2024, 1, 20)),
            ChargeStatus::Pending
        );
        // Due date itself still counts as pending
        assert_eq!(
            ChargeStatus::derive(false, due, due),
            ChargeStatus::Pending
        );
        assert_eq!(
            ChargeStatus::derive(false, due, date(2024, 2, 2)),
            ChargeStatus::Overdue
        );
    }

    #[tokio::test]
    async fn test_balance_after_payment() {
        let (_handle, db) = connection::open_test().await;
        let (club, a, _) = quarterly_club(&db).await;
        let members: Vec<Member> = vec![a.clone()];
        club.generate_monthly_fees(&db, &members, 2024).await.unwrap();

        // Pay January before its due date
        let jan = a.get_recurring_charges(&db).await.unwrap();
        let jan = jan.iter().find(|c| c.month == 1).unwrap();
        record_payment(
            &db,
            ChargeRef::Recurring(jan.id),
            date(2023, 12, 28),
        )
        .await
        .unwrap();

        let balance =
            member_balance(&db, club.id, a.id, date(2023, 12, 30))
                .await
                .unwrap();
        assert_eq!(balance.total_paid, 10.0);
        assert_eq!(balance.pending, 20.0);
        assert_eq!(balance.overdue, 0.0);
        assert_eq!(balance.balance, -10.0);
        assert_identity(&balance);
    }

    #[tokio::test]
    async fn test_balance_redistributes_over_time() {
        let (_handle, db) = connection::open_test().await;
        let (club, a, _) = quarterly_club(&db).await;
        let members = vec![a.clone()];
        club.generate_monthly_fees(&db, &members, 2024).await.unwrap();

        let jan = a.get_recurring_charges(&db).await.unwrap();
        let jan = jan.iter().find(|c| c.month == 1).unwrap();
        record_payment(&db, ChargeRef::Recurring(jan.id), date(2023, 12, 28))
            .await
            .unwrap();

        // February is overdue once the query time passes its due
        // date, without any write to the charge
        let balance = member_balance(&db, club.id, a.id, date(2024, 2, 15))
            .await
            .unwrap();
        assert_eq!(balance.total_paid, 10.0);
        assert_eq!(balance.pending, 10.0);
        assert_eq!(balance.overdue, 10.0);
        assert_eq!(balance.balance, -10.0);
        assert_identity(&balance);
    }

    #[tokio::test]
    async fn test_custom_charge_broadcast() {
        let (_handle, db) = connection::open_test().await;
        let (club, a, b) = quarterly_club(&db).await;

        db.insert(CustomCharge {
            club_id: club.id,
            description: "Clubhouse repair".to_string(),
            amount: 25.0,
            due_date: date(2024, 5, 1),
            ..Default::default()
        })
        .await
        .unwrap();

        for member in [&a, &b] {
            let balance =
                member_balance(&db, club.id, member.id, date(2024, 4, 1))
                    .await
                    .unwrap();
            assert_eq!(balance.pending, 25.0);
            assert_eq!(balance.balance, -25.0);
            assert_identity(&balance);
        }
    }

    #[tokio::test]
    async fn test_custom_charge_targeted() {
        let (_handle, db) = connection::open_test().await;
        let (club, a, b) = quarterly_club(&db).await;

        db.insert(CustomCharge {
            club_id: club.id,
            description: "Locker rental".to_string(),
            amount: 5.0,
            due_date: date(2024, 5, 1),
            applied_to: vec![a.id],
            ..Default::default()
        })
        .await
        .unwrap();

        let for_a = member_balance(&db, club.id, a.id, date(2024, 4, 1))
            .await
            .unwrap();
        assert_eq!(for_a.pending, 5.0);

        let for_b = member_balance(&db, club.id, b.id, date(2024, 4, 1))
            .await
            .unwrap();
        assert_eq!(for_b, MemberBalance {
            member_id: b.id,
            ..Default::default()
        });
    }

    #[tokio::test]
    async fn test_custom_charge_paid_member() {
        let (_handle, db) = connection::open_test().await;
        let (club, a, b) = quarterly_club(&db).await;

        let charge = db
            .insert(CustomCharge {
                club_id: club.id,
                description: "Clubhouse repair".to_string(),
                amount: 25.0,
                due_date: date(2024, 5, 1),
                ..Default::default()
            })
            .await
            .unwrap();

        record_payment(
            &db,
            ChargeRef::Custom {
                charge_id: charge.id,
                member_id: a.id,
            },
            date(2024, 4, 23),
        )
        .await
        .unwrap();

        let for_a = member_balance(&db, club.id, a.id, date(2024, 6, 1))
            .await
            .unwrap();
        assert_eq!(for_a.total_paid, 25.0);
        assert_eq!(for_a.overdue, 0.0);
        assert_eq!(for_a.balance, 25.0);

        let for_b = member_balance(&db, club.id, b.id, date(2024, 6, 1))
            .await
            .unwrap();
        assert_eq!(for_b.total_paid, 0.0);
        assert_eq!(for_b.overdue, 25.0);
        assert_identity(&for_b);
    }

    /// A store that fails for one member, to exercise the batch
    /// failure collection.
    struct FailingStore {
        bad_member: u32,
    }

    #[async_trait::async_trait]
    impl Query<RecurringCharge> for FailingStore {
        type Filter = RecurringChargeFilter;
        async fn query(
            &self,
            filter: &RecurringChargeFilter,
        ) -> Result<Vec<RecurringCharge>> {
            if filter.member_id == Some(self.bad_member) {
                anyhow::bail!("database is locked");
            }
            Ok(vec![RecurringCharge {
                id: 1,
                club_id: 1,
                member_id: filter.member_id.unwrap(),
                month: 1,
                year: 2024,
                amount: 10.0,
                due_date: date(2024, 1, 1),
                paid_at: None,
            }])
        }
    }

    #[async_trait::async_trait]
    impl Query<CustomCharge> for FailingStore {
        type Filter = CustomChargeFilter;
        async fn query(
            &self,
            _filter: &CustomChargeFilter,
        ) -> Result<Vec<CustomCharge>> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_batch_collects_failures() {
        let db = FailingStore { bad_member: 2 };

        let report =
            all_member_balances(&db, 1, &[1, 2, 3], date(2024, 2, 15)).await;

        // Member two's failure is collected; members one and
        // three are still calculated, including the one after it
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, 2);
        assert!(report.failed[0].1.contains("database is locked"));
        assert_eq!(report.balances.len(), 2);
        assert!(report.balances.iter().any(|b| b.member_id == 1));
        assert!(report.balances.iter().any(|b| b.member_id == 3));
    }

    #[tokio::test]
    async fn test_batch_matches_single() {
        let (_handle, db) = connection::open_test().await;
        let (club, a, b) = quarterly_club(&db).await;
        let members = vec![a.clone(), b.clone()];
        club.generate_monthly_fees(&db, &members, 2024).await.unwrap();

        let as_of = date(2024, 2, 15);
        let report =
            all_member_balances(&db, club.id, &[a.id, b.id], as_of).await;
        assert!(report.failed.is_empty());
        assert_eq!(report.balances.len(), 2);

        for balance in &report.balances {
            let single =
                member_balance(&db, club.id, balance.member_id, as_of)
                    .await
                    .unwrap();
            assert_eq!(*balance, single);
        }
    }
}
