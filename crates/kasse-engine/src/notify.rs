use crate::balance::MemberBalance;

/// Compose the dues reminder for one member. Pure formatting:
/// delivering the message and stamping the club's last
/// notification date are the caller's concern.
pub fn notification_message(
    name: &str,
    balance: &MemberBalance,
    currency: &str,
) -> String {
    if !balance.owes() {
        return format!(
            "Hi {}, your membership account is all paid up. Thank you!",
            name
        );
    }

    let owed = balance.pending + balance.overdue;
    if balance.overdue > 0.0 {
        format!(
            "Hi {}, you have OVERDUE membership charges: \
            {:.2} {} overdue and {:.2} {} upcoming. \
            Please settle {:.2} {} as soon as possible.",
            name,
            balance.overdue,
            currency,
            balance.pending,
            currency,
            owed,
            currency
        )
    } else {
        format!(
            "Hi {}, you have open membership charges of {:.2} {}. \
            Please pay before the due date.",
            name, owed, currency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_all_paid() {
        let balance = MemberBalance {
            total_paid: 30.0,
            ..Default::default()
        };
        let message = notification_message("Erika", &balance, "USD");
        assert!(message.contains("all paid up"));
    }

    #[test]
    fn test_message_payment_due() {
        let balance = MemberBalance {
            total_paid: 10.0,
            pending: 20.0,
            balance: -20.0,
            ..Default::default()
        };
        let message = notification_message("Erika", &balance, "USD");
        assert!(message.contains("20.00 USD"));
        assert!(!message.contains("OVERDUE"));
    }

    #[test]
    fn test_message_overdue() {
        let balance = MemberBalance {
            pending: 10.0,
            overdue: 10.0,
            balance: -20.0,
            ..Default::default()
        };
        let message = notification_message("Erika", &balance, "USD");
        assert!(message.contains("OVERDUE"));
        assert!(message.contains("10.00 USD overdue"));
        assert!(message.contains("settle 20.00 USD"));
    }
}
