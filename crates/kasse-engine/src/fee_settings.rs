use anyhow::Result;

use kasse_data::{Club, Error, Retrieve, Update};

/// Per club dues configuration as edited by an administrator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeeSettings {
    pub amount: f64,
    pub currency: String,
    pub active_months: Vec<u32>,
    pub active: bool,
}

impl FeeSettings {
    /// Check the settings invariants: a non-negative amount,
    /// calendar months only, and at least one billable month
    /// while billing is active.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(Error::Validation(format!(
                "fee amount {} must be a non-negative number",
                self.amount
            )));
        }
        if let Some(month) =
            self.active_months.iter().find(|m| !(1..=12).contains(*m))
        {
            return Err(Error::Validation(format!(
                "{} is not a calendar month",
                month
            )));
        }
        if self.active && self.active_months.is_empty() {
            return Err(Error::Validation(
                "billing is active but no billable months are set".to_string(),
            ));
        }
        Ok(())
    }

    /// Billable months, deduplicated and in calendar order.
    pub fn normalized_months(&self) -> Vec<u32> {
        let mut months = self.active_months.clone();
        months.sort_unstable();
        months.dedup();
        months
    }
}

/// Replace a club's fee settings as a whole. The previous
/// settings are not merged in, and charges generated under them
/// keep their amounts and due dates. `last_notification_at` is
/// not part of the settings and stays untouched.
pub async fn save_fee_settings<DB>(
    db: &DB,
    club_id: u32,
    settings: FeeSettings,
) -> Result<Club>
where
    DB: Retrieve<Club, Key = u32> + Update<Club> + Send + Sync,
{
    settings.validate()?;

    let mut club: Club = db.retrieve(club_id).await?;
    club.fee_amount = settings.amount;
    club.active_months = Club::encode_months(&settings.normalized_months());
    club.currency = settings.currency;
    club.billing_active = settings.active;

    let club = db.update(club).await?;
    Ok(club)
}
