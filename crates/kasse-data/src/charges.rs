use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RecurringChargeFilter {
    pub id: Option<u32>,
    pub club_id: Option<u32>,
    pub member_id: Option<u32>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub unpaid: Option<bool>,
}

/// A monthly dues charge. One row per member, month and year;
/// the store enforces the uniqueness of that key. Created only
/// by generation, mutated only by settling, never deleted.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct RecurringCharge {
    pub id: u32,
    pub club_id: u32,
    pub member_id: u32,
    pub month: u32,
    pub year: i32,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub paid_at: Option<NaiveDate>,
}

impl RecurringCharge {
    pub fn is_paid(&self) -> bool {
        self.paid_at.is_some()
    }

    /// Get a description for the charge.
    pub fn describe(&self) -> String {
        format!("Monthly dues for {}", self.due_date.format("%B %Y"))
    }
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct CustomChargeFilter {
    pub id: Option<u32>,
    pub club_id: Option<u32>,
    /// Only charges applying to this member, including broadcast
    /// charges with an empty applied set.
    pub member_id: Option<u32>,
}

/// A one-off charge, settled per member. Assembled by the store
/// from the charge row plus its applied-member and payment rows.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomCharge {
    pub id: u32,
    pub club_id: u32,
    pub description: String,
    pub amount: f64,
    pub due_date: NaiveDate,
    pub applied_to: Vec<u32>,
    pub paid_by: Vec<u32>,
}

impl CustomCharge {
    /// An empty applied set means the charge targets every
    /// current club member.
    pub fn applies_to(&self, member_id: u32) -> bool {
        self.applied_to.is_empty() || self.applied_to.contains(&member_id)
    }

    pub fn is_paid_by(&self, member_id: u32) -> bool {
        self.paid_by.contains(&member_id)
    }
}
