pub mod api_errors;
pub mod logs;
