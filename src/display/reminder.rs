//! Reminder display formatting

use crate::notify::Reminder;

/// Format pending reminders, soonest first
pub fn format_reminder_list(reminders: &[Reminder]) -> String {
    if reminders.is_empty() {
        return "No pending reminders.\n".to_string();
    }

    reminders
        .iter()
        .map(|r| format!("{}  {}\n", r.fire_at.format("%Y-%m-%d %H:%M"), r.body))
        .collect()
}

/// Format reminders that have just come due
pub fn format_delivered(reminders: &[Reminder]) -> String {
    reminders.iter().map(|r| format!("🔔 {}\n", r)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;
    use chrono::NaiveDate;

    #[test]
    fn test_format_reminders() {
        let reminder = Reminder {
            id: ExpenseId::new(),
            title: "Recurring Expense Due".into(),
            body: "Your weekly expense of $9.00 for Gym is due.".into(),
            fire_at: NaiveDate::from_ymd_opt(2024, 6, 3)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        };

        assert_eq!(format_reminder_list(&[]), "No pending reminders.\n");
        assert_eq!(
            format_reminder_list(&[reminder.clone()]),
            "2024-06-03 09:00  Your weekly expense of $9.00 for Gym is due.\n"
        );
        assert!(format_delivered(&[reminder]).contains("Recurring Expense Due: Your weekly"));
    }
}
