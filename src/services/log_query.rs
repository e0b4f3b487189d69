use {
    crate::domain::{
        error::QueryError,
        filter::{LogFilter, LogQueryParams},
        log_entry::{LogDetails, LogEntry},
        store::LogStore,
    },
    chrono::{DateTime, Utc},
    serde::Serialize,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogResponseItem {
    pub timestamp: DateTime<Utc>,
    pub user_id: Option<String>,
    pub action_type: String,
    pub item_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<LogDetails>,
}

impl From<&LogEntry> for LogResponseItem {
    fn from(entry: &LogEntry) -> Self {
        Self {
            timestamp: entry.timestamp,
            user_id: entry.user_id.clone(),
            action_type: entry.action_type.to_string(),
            item_id: entry.item_id.clone(),
            details: entry.details(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogsResponse {
    pub logs: Vec<LogResponseItem>,
}

/// Validate `params`, read matching entries, and project each one.
///
/// Date parameters are checked before the store is touched. A bad payload
/// on one entry only affects that entry's `details`.
pub async fn query_logs(
    store: &dyn LogStore,
    params: LogQueryParams,
) -> Result<LogsResponse, QueryError> {
    let filter = LogFilter::try_from(params)?;

    let entries = store.find_logs(&filter).await?;
    tracing::debug!(count = entries.len(), ?filter, "log query");

    Ok(LogsResponse {
        logs: entries.iter().map(LogResponseItem::from).collect(),
    })
}
