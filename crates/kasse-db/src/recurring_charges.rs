use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite};

use kasse_data::{
    Error, Insert, Query, RecurringCharge, RecurringChargeFilter, Retrieve,
    Settle,
};

use crate::{
    results::{is_unique_violation, Id},
    Connection,
};

#[async_trait]
impl Query<RecurringCharge> for Connection {
    type Filter = RecurringChargeFilter;
    async fn query(
        &self,
        filter: &Self::Filter,
    ) -> Result<Vec<RecurringCharge>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                club_id,
                member_id,
                month,
                year,
                ROUND(amount, 10) AS amount,
                due_date,
                paid_at
            FROM recurring_charges
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(club_id) = filter.club_id {
            qry.push(" AND club_id = ").push_bind(club_id);
        }
        if let Some(member_id) = filter.member_id {
            qry.push(" AND member_id = ").push_bind(member_id);
        }
        if let Some(year) = filter.year {
            qry.push(" AND year = ").push_bind(year);
        }
        if let Some(month) = filter.month {
            qry.push(" AND month = ").push_bind(month);
        }
        if let Some(unpaid) = filter.unpaid {
            if unpaid {
                qry.push(" AND paid_at IS NULL");
            } else {
                qry.push(" AND paid_at IS NOT NULL");
            }
        }

        let charges: Vec<RecurringCharge> =
            qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(charges)
    }
}

#[async_trait]
impl Retrieve<RecurringCharge> for Connection {
    type Key = u32;
    async fn retrieve(&self, charge_id: Self::Key) -> Result<RecurringCharge> {
        let filter = RecurringChargeFilter {
            id: Some(charge_id),
            ..Default::default()
        };
        let charge = self.query(&filter).await?.pop().ok_or_else(|| {
            Error::NotFound(format!("recurring charge {}", charge_id))
        })?;
        Ok(charge)
    }
}

#[async_trait]
impl Insert<RecurringCharge> for Connection {
    /// Insert a recurring charge. A second charge for the same
    /// member, month and year violates the unique key and is
    /// rejected with a conflict, whichever writer comes second.
    async fn insert(&self, charge: RecurringCharge) -> Result<RecurringCharge> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO recurring_charges (
                    club_id,
                    member_id,
                    month,
                    year,
                    amount,
                    due_date,
                    paid_at
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(charge.club_id)
                .push_bind(charge.member_id)
                .push_bind(charge.month)
                .push_bind(charge.year)
                .push_bind(charge.amount)
                .push_bind(charge.due_date)
                .push_bind(charge.paid_at);

            let result = qry
                .push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await;
            match result {
                Ok(id) => id,
                Err(err) if is_unique_violation(&err) => {
                    return Err(Error::Conflict(format!(
                        "recurring charge for member {} in {}-{:02} exists",
                        charge.member_id, charge.year, charge.month
                    ))
                    .into());
                }
                Err(err) => return Err(err.into()),
            }
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Settle<RecurringCharge> for Connection {
    type Key = u32;
    /// Settle a recurring charge. The guarded update only touches
    /// unpaid rows, so a second payment never overwrites the first.
    async fn settle(
        &self,
        charge_id: Self::Key,
        paid_at: NaiveDate,
    ) -> Result<RecurringCharge> {
        let updated = {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new(
                "UPDATE recurring_charges SET paid_at = ",
            )
            .push_bind(paid_at)
            .push(" WHERE id = ")
            .push_bind(charge_id)
            .push(" AND paid_at IS NULL")
            .build()
            .execute(&mut *conn)
            .await?
            .rows_affected()
        };

        if updated == 0 {
            // Unknown charge or already paid; retrieving tells
            // the two apart.
            let charge: RecurringCharge = self.retrieve(charge_id).await?;
            return Err(Error::Conflict(format!(
                "recurring charge {} is already paid",
                charge.id
            ))
            .into());
        }
        self.retrieve(charge_id).await
    }
}
