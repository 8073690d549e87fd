use kasse_data::{Club, CustomCharge, Member, RecurringCharge};
use kasse_engine::balance::MemberBalance;

pub trait PrintFormatted {
    fn print_formatted(&self);
}

impl PrintFormatted for Club {
    fn print_formatted(&self) {
        let last_notification = match self.last_notification_at {
            Some(date) => date.to_string(),
            None => "None".to_string(),
        };
        let months = match self.billing_months() {
            Ok(months) => months
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", "),
            Err(_) => "invalid".to_string(),
        };

        println!("Name:\t\t\t{}", self.name);
        println!("Monthly Fee:\t\t{} {}", self.fee_amount, self.currency);
        println!("Billable Months:\t{}", months);
        println!("Billing Active:\t\t{}", self.billing_active);
        println!("Last Notification:\t{}", last_notification);
    }
}

impl PrintFormatted for Vec<Club> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<24}\t{:>8}\t{:<8}\t{:<16}\t{}",
            "ID", "Name", "Fee", "Currency", "Months", "Active"
        );
        println!("{:-<100}", "-");
        for club in self {
            let months = match club.billing_months() {
                Ok(months) => months
                    .iter()
                    .map(|m| m.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
                Err(_) => "invalid".to_string(),
            };
            let active = if club.billing_active { "yes" } else { "" };
            println!(
                "{:>4}\t{:<24}\t{:>8.2}\t{:<8}\t{:<16}\t{}",
                club.id, club.name, club.fee_amount, club.currency, months,
                active
            );
        }
    }
}

impl PrintFormatted for Member {
    fn print_formatted(&self) {
        println!("Name:\t\t\t{}", self.name);
        println!("Email:\t\t\t{}", self.email);
        println!("Club:\t\t\t{}", self.club_id);
        println!("Active:\t\t\t{}", self.active);
    }
}

impl PrintFormatted for Vec<Member> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<24}\t{:<30}\t{}",
            "ID", "Name", "Email", "Inactive"
        );
        println!("{:-<100}", "-");
        for member in self {
            let inactive = if member.active { "" } else { "*" };
            println!(
                "{:>4}\t{:<24}\t{:<30}\t{}",
                member.id, member.name, member.email, inactive
            );
        }
    }
}

impl PrintFormatted for Vec<RecurringCharge> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:>6}\t{:<8}\t{:>10}\t{:<12}\t{}",
            "ID", "Member", "Month", "Amount", "Due", "Paid"
        );
        println!("{:-<100}", "-");
        for charge in self {
            let paid = match charge.paid_at {
                Some(date) => date.to_string(),
                None => "".to_string(),
            };
            println!(
                "{:>4}\t{:>6}\t{:>4}-{:02}\t{:>10.2}\t{:<12}\t{}",
                charge.id,
                charge.member_id,
                charge.year,
                charge.month,
                charge.amount,
                charge.due_date,
                paid
            );
        }
    }
}

impl PrintFormatted for CustomCharge {
    fn print_formatted(&self) {
        let applied_to = if self.applied_to.is_empty() {
            "all members".to_string()
        } else {
            self.applied_to
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("Description:\t\t{}", self.description);
        println!("Amount:\t\t\t{}", self.amount);
        println!("Due:\t\t\t{}", self.due_date);
        println!("Applies To:\t\t{}", applied_to);
    }
}

impl PrintFormatted for Vec<CustomCharge> {
    fn print_formatted(&self) {
        println!(
            "{:>4}\t{:<30}\t{:>10}\t{:<12}\t{:<16}\t{}",
            "ID", "Description", "Amount", "Due", "Applies To", "Paid By"
        );
        println!("{:-<100}", "-");
        for charge in self {
            let applied_to = if charge.applied_to.is_empty() {
                "all".to_string()
            } else {
                charge
                    .applied_to
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(",")
            };
            let paid_by = charge
                .paid_by
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            println!(
                "{:>4}\t{:<30}\t{:>10.2}\t{:<12}\t{:<16}\t{}",
                charge.id,
                charge.description,
                charge.amount,
                charge.due_date,
                applied_to,
                paid_by
            );
        }
    }
}

impl PrintFormatted for MemberBalance {
    fn print_formatted(&self) {
        println!("Member:\t\t\t{}", self.member_id);
        println!("Total Paid:\t\t{:.2}", self.total_paid);
        println!("Pending:\t\t{:.2}", self.pending);
        println!("Overdue:\t\t{:.2}", self.overdue);
        println!("Balance:\t\t{:.2}", self.balance);
    }
}

impl PrintFormatted for Vec<MemberBalance> {
    fn print_formatted(&self) {
        println!(
            "{:>6}\t{:>10}\t{:>10}\t{:>10}\t{:>10}",
            "Member", "Paid", "Pending", "Overdue", "Balance"
        );
        println!("{:-<100}", "-");
        for balance in self {
            println!(
                "{:>6}\t{:>10.2}\t{:>10.2}\t{:>10.2}\t{:>10.2}",
                balance.member_id,
                balance.total_paid,
                balance.pending,
                balance.overdue,
                balance.balance
            );
        }
    }
}
