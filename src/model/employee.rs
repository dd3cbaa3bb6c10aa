use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::leave_request::LeaveType;

/// Remaining days per leave type for the current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct LeaveBalances {
    #[schema(example = 0)]
    pub sick: u32,
    #[schema(example = 6)]
    pub vacation: u32,
}

impl LeaveBalances {
    pub fn for_type(&self, leave_type: LeaveType) -> u32 {
        match leave_type {
            LeaveType::Sick => self.sick,
            LeaveType::Vacation => self.vacation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": "EMP001",
        "name": "Somchai Prasert",
        "department": "IT",
        "work_days": 22,
        "leave_balances": { "sick": 0, "vacation": 6 },
        "email": "somchai@example.com"
    })
)]
pub struct Employee {
    #[schema(example = "EMP001")]
    pub id: String,

    #[schema(example = "Somchai Prasert")]
    pub name: String,

    #[schema(example = "IT")]
    pub department: String,

    /// Work days per month
    #[schema(example = 22)]
    pub work_days: u32,

    pub leave_balances: LeaveBalances,

    #[schema(example = "somchai@example.com")]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_lookup_by_type() {
        let balances = LeaveBalances { sick: 2, vacation: 4 };
        assert_eq!(balances.for_type(LeaveType::Sick), 2);
        assert_eq!(balances.for_type(LeaveType::Vacation), 4);
    }
}
