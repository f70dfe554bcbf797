use crate::errors::FormatError;
use chrono::offset::Utc;
use chrono::{
    Duration,
    NaiveDate,
    NaiveDateTime,
};
use once_cell::sync::OnceCell;
use regex::Regex;

/// The ISO 8601 layout every converted time is rendered with.
pub const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The result of converting a tmsh time expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TmshTime {
    /// A single point in time.
    Instant(String),
    /// A `(start, end)` window, produced by relative expressions such as `now-2d`.
    Range(String, String),
}

#[allow(clippy::expect_used)]
fn relative_days_pattern() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();

    RE.get_or_init(|| Regex::new(r"-(\d+)d").expect("failed compiling pattern, this is a bug"))
}

#[allow(clippy::expect_used)]
fn date_only_pattern() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();

    RE.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("failed compiling pattern, this is a bug")
    })
}

/// Converts a tmsh time expression to ISO 8601, relative to the current UTC time. See
/// `convert_tmsh_time_at`.
///
/// # Errors
///
/// Returns a `FormatError` if `tmsh_time` is not a supported expression.
pub fn convert_tmsh_time(
    tmsh_time: &str,
    adjust_end_date: bool,
) -> Result<TmshTime, FormatError> {
    convert_tmsh_time_at(tmsh_time, adjust_end_date, Utc::now().naive_utc())
}

/// Converts a tmsh time expression to ISO 8601 (`YYYY-MM-DDTHH:MM:SSZ`) using `now` as the
/// current time.
///
/// Supported expressions:
/// - anything holding `now` -- `now` itself is the current time, `now-<N>d` is the window from
///   `N` days ago up to now.
/// - `YYYY-MM-DD` -- midnight of that day, or of the following day when `adjust_end_date` is set
///   (handy when the date is the inclusive end of a range).
/// - `YYYY-MM-DDTHH:MM:SSZ` -- returned normalized.
///
/// # Errors
///
/// Returns a `FormatError` if `tmsh_time` is not a supported expression.
pub fn convert_tmsh_time_at(
    tmsh_time: &str,
    adjust_end_date: bool,
    now: NaiveDateTime,
) -> Result<TmshTime, FormatError> {
    if tmsh_time.contains("now") {
        let end = now.format(ISO_FORMAT).to_string();

        let Some(captures) = relative_days_pattern().captures(tmsh_time) else {
            return Ok(TmshTime::Instant(end));
        };

        let days: i64 = captures[1]
            .parse()
            .map_err(|_| FormatError::new(tmsh_time, "day offset out of range"))?;
        let start = Duration::try_days(days)
            .and_then(|offset| now.checked_sub_signed(offset))
            .ok_or_else(|| FormatError::new(tmsh_time, "day offset out of range"))?;

        return Ok(TmshTime::Range(start.format(ISO_FORMAT).to_string(), end));
    }

    let time = if date_only_pattern().is_match(tmsh_time) {
        let date = NaiveDate::parse_from_str(tmsh_time, "%Y-%m-%d")
            .map_err(|err| FormatError::new(tmsh_time, &format!("invalid date, error: {err}")))?;
        let date = if adjust_end_date {
            date.succ_opt()
                .ok_or_else(|| FormatError::new(tmsh_time, "date out of range"))?
        } else {
            date
        };

        date.and_hms_opt(0, 0, 0)
            .ok_or_else(|| FormatError::new(tmsh_time, "date out of range"))?
    } else {
        NaiveDateTime::parse_from_str(tmsh_time, ISO_FORMAT).map_err(|err| {
            FormatError::new(tmsh_time, &format!("unsupported time format, error: {err}"))
        })?
    };

    Ok(TmshTime::Instant(time.format(ISO_FORMAT).to_string()))
}
