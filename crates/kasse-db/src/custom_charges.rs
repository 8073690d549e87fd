use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqliteConnection};

use kasse_data::{
    CustomCharge, CustomChargeFilter, Error, Insert, Member, Query, Retrieve,
    Settle,
};

use crate::{
    results::{is_unique_violation, Id},
    Connection,
};

/// The bare charge row; applied members and payments live in
/// side tables and are joined in when assembling the model.
#[derive(Debug, Clone, FromRow)]
struct CustomChargeRow {
    pub id: u32,
    pub club_id: u32,
    pub description: String,
    pub amount: f64,
    pub due_date: NaiveDate,
}

async fn member_ids(
    conn: &mut SqliteConnection,
    table: &str,
    charge_id: u32,
) -> Result<Vec<u32>> {
    let mut qry = QueryBuilder::<Sqlite>::new("SELECT member_id AS id FROM ");
    qry.push(table)
        .push(" WHERE charge_id = ")
        .push_bind(charge_id);
    let ids: Vec<Id<u32>> = qry.build_query_as().fetch_all(conn).await?;
    Ok(ids.into_iter().map(|row| row.id).collect())
}

#[async_trait]
impl Query<CustomCharge> for Connection {
    type Filter = CustomChargeFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<CustomCharge>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                club_id,
                description,
                ROUND(amount, 10) AS amount,
                due_date
            FROM custom_charges
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(club_id) = filter.club_id {
            qry.push(" AND club_id = ").push_bind(club_id);
        }

        let rows: Vec<CustomChargeRow> =
            qry.build_query_as().fetch_all(&mut *conn).await?;

        let mut charges = Vec::with_capacity(rows.len());
        for row in rows {
            let applied_to =
                member_ids(&mut conn, "custom_charge_members", row.id).await?;
            let paid_by =
                member_ids(&mut conn, "custom_charge_payments", row.id).await?;
            charges.push(CustomCharge {
                id: row.id,
                club_id: row.club_id,
                description: row.description,
                amount: row.amount,
                due_date: row.due_date,
                applied_to,
                paid_by,
            });
        }

        if let Some(member_id) = filter.member_id {
            charges.retain(|charge| charge.applies_to(member_id));
        }
        Ok(charges)
    }
}

#[async_trait]
impl Retrieve<CustomCharge> for Connection {
    type Key = u32;
    async fn retrieve(&self, charge_id: Self::Key) -> Result<CustomCharge> {
        let filter = CustomChargeFilter {
            id: Some(charge_id),
            ..Default::default()
        };
        let charge = self.query(&filter).await?.pop().ok_or_else(|| {
            Error::NotFound(format!("custom charge {}", charge_id))
        })?;
        Ok(charge)
    }
}

#[async_trait]
impl Insert<CustomCharge> for Connection {
    /// Insert a custom charge with its applied member set. The
    /// charge starts unpaid; `paid_by` on the input is ignored.
    async fn insert(&self, charge: CustomCharge) -> Result<CustomCharge> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO custom_charges (
                    club_id,
                    description,
                    amount,
                    due_date
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(charge.club_id)
                .push_bind(&charge.description)
                .push_bind(charge.amount)
                .push_bind(charge.due_date);

            let insert: Id<u32> = qry
                .push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?;

            for member_id in &charge.applied_to {
                let mut qry = QueryBuilder::<Sqlite>::new(
                    "INSERT INTO custom_charge_members (charge_id, member_id) VALUES (",
                );
                qry.separated(", ")
                    .push_bind(insert.id)
                    .push_bind(member_id);
                qry.push(")").build().execute(&mut *conn).await?;
            }
            insert
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Settle<CustomCharge> for Connection {
    type Key = (u32, u32);
    /// Record a member's payment of a custom charge. The unique
    /// key on the payments table rejects a second payment.
    async fn settle(
        &self,
        (charge_id, member_id): Self::Key,
        paid_at: NaiveDate,
    ) -> Result<CustomCharge> {
        let charge: CustomCharge = self.retrieve(charge_id).await?;
        // Classify an unknown member before the payment insert
        // trips the foreign key
        let _: Member = self.retrieve(member_id).await?;
        if !charge.applies_to(member_id) {
            return Err(Error::Validation(format!(
                "custom charge {} does not apply to member {}",
                charge_id, member_id
            ))
            .into());
        }

        let result = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                "INSERT INTO custom_charge_payments (charge_id, member_id, paid_at) VALUES (",
            );
            qry.separated(", ")
                .push_bind(charge_id)
                .push_bind(member_id)
                .push_bind(paid_at);
            qry.push(")").build().execute(&mut *conn).await
        };
        match result {
            Ok(_) => self.retrieve(charge_id).await,
            Err(err) if is_unique_violation(&err) => Err(Error::Conflict(
                format!(
                    "custom charge {} is already paid by member {}",
                    charge_id, member_id
                ),
            )
            .into()),
            Err(err) => Err(err.into()),
        }
    }
}
