use {
    super::error::QueryError,
    super::filter::LogFilter,
    super::log_entry::LogEntry,
    std::{future::Future, pin::Pin},
};

/// Read side of the action log.
///
/// Implementations return every entry matching `filter`, newest first.
/// Any connection taken for the read must be given back before the future
/// resolves, whatever the outcome.
pub trait LogStore: Send + Sync {
    fn find_logs<'a>(
        &'a self,
        filter: &'a LogFilter,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<LogEntry>, QueryError>> + Send + 'a>>;
}
