use actix_web::{HttpResponse, Responder, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{error::ApiError, model::employee::Employee, state::AppState};

#[derive(Serialize, ToSchema)]
pub struct EmployeeListResponse {
    pub data: Vec<Employee>,
    #[schema(example = 4)]
    pub total: usize,
}

/// Employees for the entry form's selector
#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employees", body = EmployeeListResponse)
    ),
    tag = "Employee"
)]
pub async fn list_employees(state: web::Data<AppState>) -> impl Responder {
    let data = state.directory.employees.clone();
    HttpResponse::Ok().json(EmployeeListResponse {
        total: data.len(),
        data,
    })
}

/// Employee card shown once one is selected
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id" = String, Path, description = "Employee id, e.g. EMP001")
    ),
    responses(
        (status = 200, description = "Employee found", body = Employee),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "message": "Employee EMP999 not found"
        }))
    ),
    tag = "Employee"
)]
pub async fn get_employee(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let employee = state
        .directory
        .employee(&id)
        .ok_or_else(|| ApiError::NotFound(format!("Employee {id} not found")))?;

    Ok(HttpResponse::Ok().json(employee))
}
