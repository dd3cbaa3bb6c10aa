use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, ToSchema, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LeaveType {
    #[default]
    Sick,
    Vacation,
}

impl<'de> Deserialize<'de> for LeaveType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(|_| {
            serde::de::Error::custom(format!(
                "unknown leave type `{raw}`, expected sick or vacation"
            ))
        })
    }
}

/// Raw entry-form payload. Every field may still be blank.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LeaveForm {
    #[schema(example = "EMP002")]
    pub employee_id: Option<String>,
    #[serde(default)]
    #[schema(example = "sick")]
    pub leave_type: LeaveType,
    #[schema(example = "2025-05-12", format = "date", value_type = Option<String>)]
    pub start_date: Option<NaiveDate>,
    #[schema(example = "2025-05-14", format = "date", value_type = Option<String>)]
    pub end_date: Option<NaiveDate>,
    #[schema(example = "manager@example.com", format = "email")]
    pub manager_email: Option<String>,
}

/// A filled-in form, ready for the eligibility check.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct LeaveRequest {
    pub employee_id: String,
    pub leave_type: LeaveType,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[validate(email(message = "Please enter a valid manager's email."))]
    pub manager_email: String,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// First message out of a failed `validate()`.
fn first_message(errors: ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .find_map(|(field, errs)| {
            errs.first().map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value for {field}"))
            })
        })
        .unwrap_or_else(|| "Validation failed".to_string())
}

impl LeaveForm {
    /// Checks that every field is filled. The error names the first gap.
    pub fn into_request(self) -> Result<LeaveRequest, String> {
        let employee_id = non_blank(self.employee_id).ok_or("Please select an employee.")?;
        let start_date = self.start_date.ok_or("Please pick a start date.")?;
        let end_date = self.end_date.ok_or("Please pick an end date.")?;
        let manager_email =
            non_blank(self.manager_email).ok_or("Please enter the manager's email.")?;

        let request = LeaveRequest {
            employee_id,
            leave_type: self.leave_type,
            start_date,
            end_date,
            manager_email,
        };
        request.validate().map_err(first_message)?;

        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn filled() -> LeaveForm {
        LeaveForm {
            employee_id: Some("EMP002".into()),
            leave_type: LeaveType::Vacation,
            start_date: NaiveDate::from_ymd_opt(2025, 5, 12),
            end_date: NaiveDate::from_ymd_opt(2025, 5, 14),
            manager_email: Some("boss@example.com".into()),
        }
    }

    #[test]
    fn leave_type_parses_case_insensitively() {
        assert_eq!("SICK".parse::<LeaveType>().unwrap(), LeaveType::Sick);
        assert_eq!("Vacation".parse::<LeaveType>().unwrap(), LeaveType::Vacation);
        assert!("annual".parse::<LeaveType>().is_err());
    }

    #[test]
    fn leave_type_wire_form_is_lowercase() {
        for t in LeaveType::iter() {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{t}\""));
            let back: LeaveType = serde_json::from_str(&json.to_uppercase()).unwrap();
            assert_eq!(back, t);
        }
    }

    #[test]
    fn unknown_leave_type_is_rejected() {
        let err = serde_json::from_str::<LeaveType>("\"annual\"").unwrap_err();
        assert!(err.to_string().contains("unknown leave type"));
    }

    #[test]
    fn filled_form_becomes_request() {
        let req = filled().into_request().unwrap();
        assert_eq!(req.employee_id, "EMP002");
        assert_eq!(req.leave_type, LeaveType::Vacation);
        assert_eq!(req.manager_email, "boss@example.com");
    }

    #[test]
    fn missing_fields_are_named() {
        let form = LeaveForm { employee_id: Some("  ".into()), ..filled() };
        assert_eq!(form.into_request().unwrap_err(), "Please select an employee.");

        let form = LeaveForm { end_date: None, ..filled() };
        assert_eq!(form.into_request().unwrap_err(), "Please pick an end date.");

        let form = LeaveForm { manager_email: None, ..filled() };
        assert_eq!(form.into_request().unwrap_err(), "Please enter the manager's email.");
    }

    #[test]
    fn malformed_manager_email_is_rejected() {
        for bad in ["boss", "@example.com", "boss@", "a@b@c", "bo ss@example.com"] {
            let form = LeaveForm { manager_email: Some(bad.into()), ..filled() };
            assert_eq!(
                form.into_request().unwrap_err(),
                "Please enter a valid manager's email.",
                "{bad} should be rejected"
            );
        }
    }

    #[test]
    fn leave_type_defaults_to_sick() {
        let form: LeaveForm = serde_json::from_str(r#"{"employee_id": "EMP001"}"#).unwrap();
        assert_eq!(form.leave_type, LeaveType::Sick);
    }
}
