use serde::{Deserialize, Serialize};

/// Per-employee leave history shown in the list view's detail panel.
/// Dates are kept as entered; they are not validated or sorted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LeaveDetail {
    pub work_days: u32,
    #[serde(default)]
    pub leave_dates: Vec<String>,
}
