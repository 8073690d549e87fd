use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{Query, RecurringCharge, RecurringChargeFilter};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemberFilter {
    pub id: Option<u32>,
    pub club_id: Option<u32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub active: Option<bool>,
}

/// A club member. Only approved, active members are part of the
/// billing roster; filtering on `active` is the caller's job.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Member {
    pub id: u32,
    pub club_id: u32,
    pub name: String,
    pub email: String,
    pub active: bool,
}

impl Member {
    /// Get the recurring charges of this member, across all years.
    pub async fn get_recurring_charges<DB>(
        &self,
        db: &DB,
    ) -> Result<Vec<RecurringCharge>>
    where
        DB: Query<RecurringCharge, Filter = RecurringChargeFilter>,
    {
        let charges = db
            .query(&RecurringChargeFilter {
                member_id: Some(self.id),
                ..Default::default()
            })
            .await?;
        Ok(charges)
    }
}
