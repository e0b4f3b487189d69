use {
    crate::domain::{
        error::QueryError,
        filter::LogFilter,
        id::LogId,
        log_entry::{LogActionType, LogEntry},
        store::LogStore,
    },
    chrono::{DateTime, Utc},
    sqlx::{PgPool, Postgres, QueryBuilder},
    std::{future::Future, pin::Pin},
    uuid::Uuid,
};

#[derive(Debug, sqlx::FromRow)]
struct LogRow {
    id: Uuid,
    timestamp: DateTime<Utc>,
    user_id: Option<String>,
    action_type: String,
    item_id: Option<String>,
    details_json: Option<String>,
}

impl TryFrom<LogRow> for LogEntry {
    type Error = QueryError;

    fn try_from(row: LogRow) -> Result<Self, Self::Error> {
        Ok(LogEntry {
            id: LogId::from_uuid(row.id),
            timestamp: row.timestamp,
            user_id: row.user_id,
            action_type: LogActionType::try_from(row.action_type.as_str())?,
            item_id: row.item_id,
            details_json: row.details_json,
        })
    }
}

/// Fetch every log row matching `filter`, newest first.
/// Ties on timestamp fall back to id, which is time-ordered (v7).
pub async fn find_logs(pool: &PgPool, filter: &LogFilter) -> Result<Vec<LogEntry>, QueryError> {
    // Goes back to the pool when dropped, on every path out of this fn.
    let mut conn = pool.acquire().await?;

    let mut qb = QueryBuilder::<Postgres>::new(
        "SELECT id, timestamp, user_id, action_type, item_id, details_json FROM logs WHERE TRUE",
    );

    if let Some(start) = filter.start {
        qb.push(" AND timestamp >= ").push_bind(start);
    }
    if let Some(end) = filter.end {
        qb.push(" AND timestamp <= ").push_bind(end);
    }
    if let Some(item_id) = filter.item_id.as_deref() {
        qb.push(" AND item_id = ").push_bind(item_id);
    }
    if let Some(user_id) = filter.user_id.as_deref() {
        qb.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(action_type) = filter.action_type.as_deref() {
        qb.push(" AND action_type = ").push_bind(action_type);
    }

    qb.push(" ORDER BY timestamp DESC, id DESC");

    let rows: Vec<LogRow> = qb.build_query_as().fetch_all(&mut *conn).await?;

    rows.into_iter().map(LogEntry::try_from).collect()
}

#[derive(Clone)]
pub struct PgLogStore {
    pool: PgPool,
}

impl PgLogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl LogStore for PgLogStore {
    fn find_logs<'a>(
        &'a self,
        filter: &'a LogFilter,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<LogEntry>, QueryError>> + Send + 'a>> {
        Box::pin(find_logs(&self.pool, filter))
    }
}
