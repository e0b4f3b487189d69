use {
    crate::{
        AppState,
        adapters::api_errors::ApiError,
        domain::{error::QueryError, filter::LogQueryParams},
        services::log_query::{LogsResponse, query_logs},
    },
    axum::{
        Json,
        extract::{Query, State, rejection::QueryRejection},
    },
};

/// `GET /api/logs`
///
/// Pairs are taken raw so a repeated key keeps its first value instead of
/// failing deserialization.
pub async fn get_logs_handler(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<LogsResponse>, ApiError> {
    let Query(pairs) = query.map_err(|e| QueryError::MalformedQuery(e.body_text()))?;
    let params: LogQueryParams = pairs.into_iter().collect();

    let response = query_logs(state.store.as_ref(), params).await?;
    Ok(Json(response))
}
