pub mod log_query;
