use anyhow::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::errors::Error;

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ClubFilter {
    pub id: Option<u32>,
    pub name: Option<String>,
}

/// A club with its embedded dues configuration. The fee columns
/// are replaced as a whole by the fee settings operation, never
/// merged field by field.
#[derive(Debug, Clone, Default, FromRow, Serialize, Deserialize)]
pub struct Club {
    pub id: u32,
    pub name: String,
    pub fee_amount: f64,
    pub currency: String,
    /// JSON array of billable calendar months (1 - 12).
    pub active_months: String,
    pub billing_active: bool,
    pub last_notification_at: Option<NaiveDate>,
}

impl Club {
    /// Billable months, decoded from the stored JSON column. An
    /// unconfigured (empty) column is an empty month set; a column
    /// that no longer parses is an error, so a corrupted club does
    /// not silently stop billing.
    pub fn billing_months(&self) -> Result<Vec<u32>> {
        if self.active_months.is_empty() {
            return Ok(Vec::new());
        }
        let months = serde_json::from_str(&self.active_months).map_err(|err| {
            Error::Validation(format!(
                "club {} has an unreadable active_months column: {}",
                self.id, err
            ))
        })?;
        Ok(months)
    }

    /// Encode a month set for the `active_months` column.
    pub fn encode_months(months: &[u32]) -> String {
        serde_json::json!(months).to_string()
    }
}
