use anyhow::Result;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite};

use kasse_data::{Club, ClubFilter, Error, Insert, Query, Retrieve, Update};

use crate::{results::Id, Connection};

#[async_trait]
impl Query<Club> for Connection {
    type Filter = ClubFilter;
    async fn query(&self, filter: &Self::Filter) -> Result<Vec<Club>> {
        let mut conn = self.lock().await;
        let mut qry = QueryBuilder::new(
            r#"
            SELECT
                id,
                name,
                ROUND(fee_amount, 10) AS fee_amount,
                currency,
                active_months,
                billing_active,
                last_notification_at
            FROM clubs
            WHERE 1
            "#,
        );

        if let Some(id) = filter.id {
            qry.push(" AND id = ").push_bind(id);
        }
        if let Some(name) = filter.name.clone() {
            qry.push(" AND name LIKE ").push_bind(format!("%{}%", name));
        }

        let clubs: Vec<Club> =
            qry.build_query_as().fetch_all(&mut *conn).await?;
        Ok(clubs)
    }
}

#[async_trait]
impl Retrieve<Club> for Connection {
    type Key = u32;
    async fn retrieve(&self, club_id: Self::Key) -> Result<Club> {
        let filter = ClubFilter {
            id: Some(club_id),
            ..Default::default()
        };
        let club = self
            .query(&filter)
            .await?
            .pop()
            .ok_or_else(|| Error::NotFound(format!("club {}", club_id)))?;
        Ok(club)
    }
}

#[async_trait]
impl Insert<Club> for Connection {
    async fn insert(&self, club: Club) -> Result<Club> {
        let insert: Id<u32> = {
            let mut conn = self.lock().await;
            let mut qry = QueryBuilder::<Sqlite>::new(
                r#"INSERT INTO clubs (
                    name,
                    fee_amount,
                    currency,
                    active_months,
                    billing_active,
                    last_notification_at
                ) VALUES (
                "#,
            );
            qry.separated(", ")
                .push_bind(&club.name)
                .push_bind(club.fee_amount)
                .push_bind(&club.currency)
                .push_bind(&club.active_months)
                .push_bind(club.billing_active)
                .push_bind(club.last_notification_at);

            qry.push(") RETURNING id ")
                .build_query_as()
                .fetch_one(&mut *conn)
                .await?
        };
        self.retrieve(insert.id).await
    }
}

#[async_trait]
impl Update<Club> for Connection {
    /// Update club
    async fn update(&self, club: Club) -> Result<Club> {
        {
            let mut conn = self.lock().await;
            QueryBuilder::<Sqlite>::new("UPDATE clubs SET")
                .push(" name = ")
                .push_bind(&club.name)
                .push(", fee_amount = ")
                .push_bind(club.fee_amount)
                .push(", currency = ")
                .push_bind(&club.currency)
                .push(", active_months = ")
                .push_bind(&club.active_months)
                .push(", billing_active = ")
                .push_bind(club.billing_active)
                .push(", last_notification_at = ")
                .push_bind(club.last_notification_at)
                .push(" WHERE id = ")
                .push_bind(club.id)
                .build()
                .execute(&mut *conn)
                .await?;
        }
        self.retrieve(club.id).await
    }
}
