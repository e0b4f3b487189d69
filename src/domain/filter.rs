use {
    super::error::QueryError,
    super::log_entry::LogEntry,
    chrono::{DateTime, FixedOffset, NaiveDate, Utc},
    regex::{Captures, Regex},
    std::sync::OnceLock,
};

/// Calendar date with optional time and offset, extended or basic format.
/// Month and day may be omitted from the right (`2025`, `2025-03`); `YYYYMM`
/// alone is rejected because it reads as a truncated basic date.
const ISO8601_PATTERN: &str = r"(?x)
    ^(?P<year>[0-9]{4})
    (?:
        (?: -(?P<monthdash>[0-9]{1,2}) | (?P<month>[0-9]{2}) )
        (?:
            (?: -(?P<daydash>[0-9]{1,2}) | (?P<day>[0-9]{2}) )
            (?:
                [\ T]
                (?P<hour>[0-9]{2})
                (?: :?(?P<minute>[0-9]{2}) )?
                (?: :?(?P<second>[0-9]{1,2}) (?: [.,](?P<fraction>[0-9]+) )? )?
                (?P<tz> Z | (?P<tz_sign>[-+])(?P<tz_hour>[0-9]{2}) :?(?P<tz_minute>[0-9]{2})? )?
            )?
        )?
    )?$";

fn iso8601_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(ISO8601_PATTERN).expect("iso8601: invalid regex"))
}

/// Raw `GET /api/logs` query string. Nothing is validated here.
#[derive(Debug, Clone, Default)]
pub struct LogQueryParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub item_id: Option<String>,
    pub user_id: Option<String>,
    pub action_type: Option<String>,
}

/// Build from decoded query pairs. A repeated key keeps its first value;
/// unknown keys are ignored.
impl FromIterator<(String, String)> for LogQueryParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "startDate" => &mut params.start_date,
                "endDate" => &mut params.end_date,
                "itemId" => &mut params.item_id,
                "userId" => &mut params.user_id,
                "actionType" => &mut params.action_type,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

/// Validated constraints, ANDed together. `None` means unconstrained.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogFilter {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub item_id: Option<String>,
    pub user_id: Option<String>,
    pub action_type: Option<String>,
}

impl LogFilter {
    pub fn matches(&self, entry: &LogEntry) -> bool {
        self.start.is_none_or(|start| entry.timestamp >= start)
            && self.end.is_none_or(|end| entry.timestamp <= end)
            && eq_opt(&self.item_id, entry.item_id.as_deref())
            && eq_opt(&self.user_id, entry.user_id.as_deref())
            && self
                .action_type
                .as_deref()
                .is_none_or(|a| a == entry.action_type.as_str())
    }
}

fn eq_opt(wanted: &Option<String>, actual: Option<&str>) -> bool {
    wanted.as_deref().is_none_or(|w| actual == Some(w))
}

impl TryFrom<LogQueryParams> for LogFilter {
    type Error = QueryError;

    fn try_from(params: LogQueryParams) -> Result<Self, Self::Error> {
        let start = non_empty(params.start_date)
            .map(|raw| {
                parse_iso8601(&raw)
                    .map(|dt| dt.with_timezone(&Utc))
                    .ok_or(QueryError::InvalidFilter {
                        field: "startDate",
                        value: raw,
                    })
            })
            .transpose()?;

        let end = non_empty(params.end_date)
            .map(|raw| {
                parse_iso8601(&raw)
                    .and_then(end_of_day)
                    .map(|dt| dt.with_timezone(&Utc))
                    .ok_or(QueryError::InvalidFilter {
                        field: "endDate",
                        value: raw,
                    })
            })
            .transpose()?;

        Ok(Self {
            start,
            end,
            item_id: non_empty(params.item_id),
            user_id: non_empty(params.user_id),
            action_type: non_empty(params.action_type),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Parse an ISO-8601 date or datetime. Values without an offset are UTC;
/// missing components default to the start of their range. Fractions finer
/// than a microsecond are truncated.
pub fn parse_iso8601(raw: &str) -> Option<DateTime<FixedOffset>> {
    let caps = iso8601_regex().captures(raw.trim())?;

    if caps.name("month").is_some() && caps.name("daydash").is_none() && caps.name("day").is_none() {
        return None;
    }

    // Year 0 and below are not representable in the store.
    let year: i32 = caps["year"].parse().ok().filter(|y| *y >= 1)?;
    let month = number(&caps, "monthdash").or(number(&caps, "month")).unwrap_or(1);
    let day = number(&caps, "daydash").or(number(&caps, "day")).unwrap_or(1);
    let hour = number(&caps, "hour").unwrap_or(0);
    let minute = number(&caps, "minute").unwrap_or(0);
    let second = number(&caps, "second").unwrap_or(0);
    let micros = caps.name("fraction").map_or(0, |m| fraction_micros(m.as_str()));

    let offset = match caps.name("tz_sign") {
        None => FixedOffset::east_opt(0)?,
        Some(sign) => {
            let secs = i32::try_from(
                number(&caps, "tz_hour").unwrap_or(0) * 3600 + number(&caps, "tz_minute").unwrap_or(0) * 60,
            )
            .ok()?;
            match sign.as_str() {
                "-" => FixedOffset::west_opt(secs)?,
                _ => FixedOffset::east_opt(secs)?,
            }
        }
    };

    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_micro_opt(hour, minute, second, micros)?
        .and_local_timezone(offset)
        .single()
}

fn number(caps: &Captures<'_>, name: &str) -> Option<u32> {
    caps.name(name).and_then(|m| m.as_str().parse().ok())
}

fn fraction_micros(digits: &str) -> u32 {
    let head = &digits[..digits.len().min(6)];
    format!("{head:0<6}").parse().unwrap_or(0)
}

/// Last representable instant (microsecond precision) of the calendar day
/// `dt` falls on, in `dt`'s own offset.
pub fn end_of_day(dt: DateTime<FixedOffset>) -> Option<DateTime<FixedOffset>> {
    dt.date_naive()
        .and_hms_micro_opt(23, 59, 59, 999_999)?
        .and_local_timezone(*dt.offset())
        .single()
}
