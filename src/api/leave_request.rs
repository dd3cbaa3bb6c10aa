use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::ApiError,
    model::{
        employee::Employee,
        leave_detail::LeaveDetail,
        leave_record::LeaveRecord,
        leave_request::{LeaveForm, LeaveType},
    },
    notify::LeaveNotification,
    state::AppState,
    utils::{
        date_range::{day_span, expand_range, format_leave_ranges},
        eligibility::{self, Rejection},
    },
};

#[derive(Deserialize, ToSchema)]
pub struct QuoteRequest {
    #[schema(example = "EMP002")]
    pub employee_id: String,
    #[serde(default)]
    #[schema(example = "vacation")]
    pub leave_type: LeaveType,
    #[schema(example = "2025-05-12", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-05-14", format = "date", value_type = String)]
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QuoteResponse {
    pub employee: Employee,
    pub leave_type: LeaveType,
    #[schema(example = "2025-05-12", format = "date", value_type = String)]
    pub start_date: NaiveDate,
    #[schema(example = "2025-05-14", format = "date", value_type = String)]
    pub end_date: NaiveDate,
    /// Absent when the end date precedes the start date
    #[schema(example = 3)]
    pub total_days: Option<i64>,
    /// Remaining balance for the chosen leave type
    #[schema(example = 6)]
    pub balance: u32,
    pub eligible: bool,
    #[schema(example = json!(null))]
    pub message: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "message": "Email sent successfully!",
    "redirect_to": "/leaveHome",
    "total_days": 3
}))]
pub struct SubmitResponse {
    pub message: String,
    /// Client route to navigate to next
    pub redirect_to: String,
    pub total_days: i64,
}

#[derive(Serialize, ToSchema)]
pub struct LeaveListResponse {
    pub data: Vec<LeaveRecord>,
    #[schema(example = 2)]
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
#[schema(example = json!({
    "employee_id": "EMP002",
    "name": "Suda Raksamee",
    "department": "HR",
    "work_days": 22,
    "total_leave_days": 4,
    "leave_ranges": ["2025-05-12 - 2025-05-14", "2025-05-02"]
}))]
pub struct LeaveDetailResponse {
    pub employee_id: String,
    pub name: String,
    pub department: String,
    /// Work days this month
    pub work_days: u32,
    pub total_leave_days: i64,
    pub leave_ranges: Vec<String>,
}

/// Date as it appears in the email. Formats that can't render a date fail here
/// instead of panicking in `to_string`.
fn display_date(date: NaiveDate, format: &str) -> Result<String, ApiError> {
    let mut out = String::new();
    write!(out, "{}", date.format(format)).map_err(|_| {
        error!(format, "Display date format cannot render a date");
        ApiError::Internal(format!("Date format `{format}` cannot render a date"))
    })?;
    Ok(out)
}

/// Detail dates followed by every day of the record's secondary range.
pub fn leave_summary(record: &LeaveRecord, detail: &LeaveDetail) -> LeaveDetailResponse {
    let mut dates = detail.leave_dates.clone();
    let mut total_leave_days = detail.leave_dates.len() as i64;

    if let Some((start, end)) = record.secondary_range() {
        dates.extend(
            expand_range(start, end)
                .into_iter()
                .map(|d| d.format("%Y-%m-%d").to_string()),
        );
        total_leave_days += day_span(start, end);
    }

    LeaveDetailResponse {
        employee_id: record.employee_id.clone(),
        name: record.name.clone(),
        department: record.department.clone(),
        work_days: detail.work_days,
        total_leave_days,
        leave_ranges: format_leave_ranges(&dates),
    }
}

/* =========================
Entry view
========================= */

/// Day count and balance check for the dates picked so far
#[utoipa::path(
    post,
    path = "/api/leave/quote",
    request_body(
        content = QuoteRequest,
        description = "Employee, leave type and date range",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Quote computed; `eligible` tells whether it can be submitted", body = QuoteResponse),
        (status = 404, description = "Employee not found")
    ),
    tag = "Leave"
)]
pub async fn quote_leave(
    state: web::Data<AppState>,
    payload: web::Json<QuoteRequest>,
) -> Result<HttpResponse, ApiError> {
    let QuoteRequest {
        employee_id,
        leave_type,
        start_date,
        end_date,
    } = payload.into_inner();

    let employee = state
        .directory
        .employee(&employee_id)
        .ok_or_else(|| ApiError::NotFound(format!("Employee {employee_id} not found")))?;

    let (total_days, message) = match eligibility::check(employee, leave_type, start_date, end_date) {
        Ok(days) => (Some(days), None),
        Err(rejection @ Rejection::EndBeforeStart) => (None, Some(rejection.to_string())),
        Err(rejection @ Rejection::InsufficientBalance { requested, .. }) => {
            (Some(requested), Some(rejection.to_string()))
        }
    };

    Ok(HttpResponse::Ok().json(QuoteResponse {
        employee: employee.clone(),
        leave_type,
        start_date,
        end_date,
        total_days,
        balance: employee.leave_balances.for_type(leave_type),
        eligible: message.is_none(),
        message,
    }))
}

/// Validate a leave request and email the manager
#[utoipa::path(
    post,
    path = "/api/leave",
    request_body(
        content = LeaveForm,
        description = "Leave request form",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Manager notified", body = SubmitResponse),
        (status = 400, description = "Incomplete form, dates out of order or not enough balance", body = Object, example = json!({
            "message": "You don't have enough sick leave days available."
        })),
        (status = 404, description = "Employee not found"),
        (status = 429, description = "Too many submissions"),
        (status = 502, description = "Email service failed", body = Object, example = json!({
            "message": "Email failed: The user ID is invalid (400)"
        }))
    ),
    tag = "Leave"
)]
pub async fn submit_leave(
    state: web::Data<AppState>,
    payload: web::Json<LeaveForm>,
) -> Result<HttpResponse, ApiError> {
    let request = payload
        .into_inner()
        .into_request()
        .map_err(ApiError::Validation)?;

    let employee = state.directory.employee(&request.employee_id).ok_or_else(|| {
        ApiError::NotFound(format!("Employee {} not found", request.employee_id))
    })?;

    let total_days = eligibility::check(
        employee,
        request.leave_type,
        request.start_date,
        request.end_date,
    )
    .map_err(|rejection| {
        warn!(
            employee_id = %employee.id,
            leave_type = %request.leave_type,
            reason = %rejection,
            "Leave request rejected"
        );
        ApiError::Validation(rejection.to_string())
    })?;

    let submission_id = Uuid::new_v4();
    let notification = LeaveNotification {
        to_email: request.manager_email.clone(),
        employee_name: employee.name.clone(),
        leave_type: request.leave_type,
        start_date: display_date(request.start_date, &state.display_date_format)?,
        end_date: display_date(request.end_date, &state.display_date_format)?,
        total_days,
    };

    state.notifier.send(&notification).await.map_err(|e| {
        error!(%submission_id, employee_id = %employee.id, error = %e, "Leave email failed");
        ApiError::Notification(e.to_string())
    })?;

    info!(
        %submission_id,
        employee_id = %employee.id,
        leave_type = %request.leave_type,
        total_days,
        "Leave request sent to manager"
    );

    Ok(HttpResponse::Ok().json(SubmitResponse {
        message: "Email sent successfully!".to_string(),
        redirect_to: state.list_view_path.clone(),
        total_days,
    }))
}

/* =========================
List view
========================= */

/// Leave records table
#[utoipa::path(
    get,
    path = "/api/leave",
    responses(
        (status = 200, description = "All leave records", body = LeaveListResponse)
    ),
    tag = "Leave"
)]
pub async fn leave_list(state: web::Data<AppState>) -> impl Responder {
    let data = state.directory.records.clone();
    HttpResponse::Ok().json(LeaveListResponse {
        total: data.len(),
        data,
    })
}

/// Leave ranges for one employee's row
#[utoipa::path(
    get,
    path = "/api/leave/{employee_id}",
    params(
        ("employee_id" = String, Path, description = "Employee id of the selected row")
    ),
    responses(
        (status = 200, description = "Leave details", body = LeaveDetailResponse),
        (status = 404, description = "No leave record or details for this employee", body = Object, example = json!({
            "message": "No leave details for EMP001"
        }))
    ),
    tag = "Leave"
)]
pub async fn leave_details(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let record = state
        .directory
        .record(&employee_id)
        .ok_or_else(|| ApiError::NotFound(format!("No leave record for {employee_id}")))?;
    let detail = state
        .directory
        .detail(&employee_id)
        .ok_or_else(|| ApiError::NotFound(format!("No leave details for {employee_id}")))?;

    Ok(HttpResponse::Ok().json(leave_summary(record, detail)))
}
