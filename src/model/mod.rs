pub mod employee;
pub mod leave_detail;
pub mod leave_record;
pub mod leave_request;
