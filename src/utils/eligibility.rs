use chrono::NaiveDate;
use derive_more::Display;

use crate::model::{employee::Employee, leave_request::LeaveType};
use crate::utils::date_range::day_span;

/// Why a leave request can't go ahead.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Rejection {
    #[display(fmt = "End date cannot be before start date.")]
    EndBeforeStart,

    #[display(fmt = "You don't have enough {} leave days available.", leave_type)]
    InsufficientBalance {
        leave_type: LeaveType,
        requested: i64,
        available: u32,
    },
}

/// Date order first, then balance. On success returns the inclusive day count.
pub fn check(
    employee: &Employee,
    leave_type: LeaveType,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<i64, Rejection> {
    if end_date < start_date {
        return Err(Rejection::EndBeforeStart);
    }

    let requested = day_span(start_date, end_date);
    let available = employee.leave_balances.for_type(leave_type);

    if requested > i64::from(available) {
        return Err(Rejection::InsufficientBalance {
            leave_type,
            requested,
            available,
        });
    }

    Ok(requested)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::employee::LeaveBalances;

    fn somchai() -> Employee {
        Employee {
            id: "EMP001".into(),
            name: "Somchai Prasert".into(),
            department: "IT".into(),
            work_days: 22,
            leave_balances: LeaveBalances { sick: 0, vacation: 6 },
            email: "somchai@example.com".into(),
        }
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn three_sick_days_with_no_sick_balance_is_rejected() {
        let err = check(&somchai(), LeaveType::Sick, d("2025-05-12"), d("2025-05-14")).unwrap_err();
        assert_eq!(
            err,
            Rejection::InsufficientBalance {
                leave_type: LeaveType::Sick,
                requested: 3,
                available: 0
            }
        );
        assert!(err.to_string().contains("sick"));
        assert_eq!(err.to_string(), "You don't have enough sick leave days available.");
    }

    #[test]
    fn request_within_balance_is_accepted() {
        let days = check(&somchai(), LeaveType::Vacation, d("2025-05-12"), d("2025-05-14"));
        assert_eq!(days, Ok(3));
    }

    #[test]
    fn request_equal_to_balance_is_accepted() {
        let days = check(&somchai(), LeaveType::Vacation, d("2025-05-01"), d("2025-05-06"));
        assert_eq!(days, Ok(6));
    }

    #[test]
    fn one_day_over_balance_is_rejected() {
        let res = check(&somchai(), LeaveType::Vacation, d("2025-05-01"), d("2025-05-07"));
        assert!(matches!(res, Err(Rejection::InsufficientBalance { requested: 7, .. })));
    }

    #[test]
    fn end_before_start_wins_over_balance() {
        let err = check(&somchai(), LeaveType::Sick, d("2025-05-14"), d("2025-05-12")).unwrap_err();
        assert_eq!(err, Rejection::EndBeforeStart);
        assert_eq!(err.to_string(), "End date cannot be before start date.");
    }
}
