pub mod log_repo;
