use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One row of the leave list: a primary range shown in the table plus an
/// optional secondary range merged into the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaveRecord {
    #[schema(example = "EMP002")]
    pub employee_id: String,

    #[schema(example = "Suda Raksamee")]
    pub name: String,

    #[schema(example = "HR")]
    pub department: String,

    #[schema(example = "2025-05-12", format = "date", value_type = String)]
    pub start_date: NaiveDate,

    #[schema(example = "2025-05-14", format = "date", value_type = String)]
    pub end_date: NaiveDate,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "2025-05-02", format = "date", value_type = Option<String>)]
    pub start_date2: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "2025-05-02", format = "date", value_type = Option<String>)]
    pub end_date2: Option<NaiveDate>,
}

impl LeaveRecord {
    /// Secondary range, only when both ends are present and in order.
    pub fn secondary_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date2, self.end_date2) {
            (Some(start), Some(end)) if start <= end => Some((start, end)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(start2: Option<&str>, end2: Option<&str>) -> LeaveRecord {
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        LeaveRecord {
            employee_id: "EMP002".into(),
            name: "Suda Raksamee".into(),
            department: "HR".into(),
            start_date: d("2025-05-12"),
            end_date: d("2025-05-14"),
            start_date2: start2.map(d),
            end_date2: end2.map(d),
        }
    }

    #[test]
    fn secondary_range_needs_both_ends() {
        assert!(record(Some("2025-05-02"), None).secondary_range().is_none());
        assert!(record(None, Some("2025-05-02")).secondary_range().is_none());
        assert!(record(Some("2025-05-02"), Some("2025-05-03")).secondary_range().is_some());
    }

    #[test]
    fn inverted_secondary_range_is_ignored() {
        assert!(record(Some("2025-05-05"), Some("2025-05-02")).secondary_range().is_none());
    }

    #[test]
    fn deserializes_without_secondary_range() {
        let json = r#"{
            "employee_id": "EMP009",
            "name": "Test",
            "department": "Ops",
            "start_date": "2025-06-01",
            "end_date": "2025-06-02"
        }"#;
        let rec: LeaveRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.start_date2, None);
        assert!(rec.secondary_range().is_none());
    }
}
