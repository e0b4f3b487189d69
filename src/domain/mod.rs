pub mod error;
pub mod filter;
pub mod id;
pub mod log_entry;
pub mod store;
