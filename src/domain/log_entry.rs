use {
    super::error::QueryError,
    super::id::LogId,
    chrono::{DateTime, Utc},
    serde::{Serialize, Serializer, ser::SerializeMap},
    serde_json::{Map, Value},
    std::fmt,
};

/// Detail keys that may leave the service. Everything else in a stored
/// payload is dropped on the way out.
pub const ALLOWED_DETAIL_KEYS: [&str; 3] = ["fromContainer", "toContainer", "reason"];

pub const DETAILS_PARSE_ERROR: &str = "Failed to parse details JSON";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogActionType {
    Placement,
    Rearrangement,
    Retrieval,
    UpdateLocation,
    DisposalPlan,
    DisposalComplete,
    SimulationUse,
    SimulationExpired,
    SimulationDepleted,
    Import,
    Export,
}

impl LogActionType {
    pub const ALL: [LogActionType; 11] = [
        Self::Placement,
        Self::Rearrangement,
        Self::Retrieval,
        Self::UpdateLocation,
        Self::DisposalPlan,
        Self::DisposalComplete,
        Self::SimulationUse,
        Self::SimulationExpired,
        Self::SimulationDepleted,
        Self::Import,
        Self::Export,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Placement => "placement",
            Self::Rearrangement => "rearrangement",
            Self::Retrieval => "retrieval",
            Self::UpdateLocation => "update_location",
            Self::DisposalPlan => "disposal_plan",
            Self::DisposalComplete => "disposal_complete",
            Self::SimulationUse => "simulation_use",
            Self::SimulationExpired => "simulation_expired",
            Self::SimulationDepleted => "simulation_depleted",
            Self::Import => "import",
            Self::Export => "export",
        }
    }
}

impl fmt::Display for LogActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for LogActionType {
    type Error = QueryError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or_else(|| QueryError::Integrity(format!("unknown action type: {s}")))
    }
}

/// One immutable row of the action log, as read from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: LogId,
    pub timestamp: DateTime<Utc>,
    pub user_id: Option<String>,
    pub action_type: LogActionType,
    pub item_id: Option<String>,
    pub details_json: Option<String>,
}

impl LogEntry {
    /// Decode the stored payload. `None` when there is nothing to decode.
    pub fn details(&self) -> Option<LogDetails> {
        let raw = self.details_json.as_deref().filter(|s| !s.is_empty())?;

        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Some(LogDetails::Fields(project(&map))),
            Ok(other) => {
                tracing::warn!(log_id = %self.id, kind = json_kind(&other), "details payload is not an object");
                Some(LogDetails::ParseFailed)
            }
            Err(e) => {
                tracing::warn!(log_id = %self.id, error = %e, "could not parse details payload");
                Some(LogDetails::ParseFailed)
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Keep only the allowlisted keys. Missing keys stay missing.
pub fn project(raw: &Map<String, Value>) -> Map<String, Value> {
    raw.iter()
        .filter(|(k, _)| ALLOWED_DETAIL_KEYS.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Outcome of decoding a single entry's payload.
#[derive(Debug, Clone, PartialEq)]
pub enum LogDetails {
    Fields(Map<String, Value>),
    ParseFailed,
}

impl Serialize for LogDetails {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Fields(map) => map.serialize(serializer),
            Self::ParseFailed => {
                let mut m = serializer.serialize_map(Some(1))?;
                m.serialize_entry("error", DETAILS_PARSE_ERROR)?;
                m.end()
            }
        }
    }
}
