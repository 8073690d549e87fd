use anyhow::Result;
use chrono::NaiveDate;

use kasse_data::{CustomCharge, RecurringCharge, Settle};

/// Reference to the charge a payment is recorded against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeRef {
    /// A recurring monthly charge, paid as a whole.
    Recurring(u32),
    /// A custom charge, settled per member.
    Custom { charge_id: u32, member_id: u32 },
}

/// Record a payment against a charge. Payments are final: there
/// is no reverse operation, and settling an already paid charge
/// fails with a conflict instead of inflating the paid total.
pub async fn record_payment<DB>(
    db: &DB,
    charge: ChargeRef,
    paid_at: NaiveDate,
) -> Result<()>
where
    DB: Settle<RecurringCharge, Key = u32>
        + Settle<CustomCharge, Key = (u32, u32)>
        + Send
        + Sync,
{
    match charge {
        ChargeRef::Recurring(charge_id) => {
            Settle::<RecurringCharge>::settle(db, charge_id, paid_at).await?;
        }
        ChargeRef::Custom {
            charge_id,
            member_id,
        } => {
            Settle::<CustomCharge>::settle(db, (charge_id, member_id), paid_at)
                .await?;
        }
    }
    Ok(())
}
