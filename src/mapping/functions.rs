use crate::errors::FormatError;
use once_cell::sync::OnceCell;
use regex::Regex;

const SECONDS_PER_HOUR: u64 = 60 * 60;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;
const SECONDS_PER_WEEK: u64 = 7 * SECONDS_PER_DAY;

/// `TransformFunction` is the closed set of functions a schema `function` rule can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformFunction {
    /// `standardize_timestamp` -- see `standardize_timestamp`.
    StandardizeTimestamp,
    /// `bgp_state_timer` -- a count of seconds rendered by `seconds_to_ios_format`.
    BgpStateTimer,
}

impl TransformFunction {
    /// Resolves a schema function name, returning `None` for names that are not registered.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "standardize_timestamp" => Some(Self::StandardizeTimestamp),
            "bgp_state_timer" => Some(Self::BgpStateTimer),
            _ => None,
        }
    }

    /// The name schemas refer to this function by.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StandardizeTimestamp => "standardize_timestamp",
            Self::BgpStateTimer => "bgp_state_timer",
        }
    }

    /// Applies the function to a single cell value. `Ok(None)` means the result is an empty cell.
    ///
    /// # Errors
    ///
    /// Returns a `FormatError` if `value` is not in the format the function expects.
    pub fn apply(
        self,
        value: &str,
    ) -> Result<Option<String>, FormatError> {
        match self {
            Self::StandardizeTimestamp => standardize_timestamp(value).map(Some),
            Self::BgpStateTimer => {
                let seconds: i64 = value.trim().parse().map_err(|_| {
                    FormatError::new(value, "expected a whole number of seconds")
                })?;
                let seconds = u64::try_from(seconds)
                    .map_err(|_| FormatError::new(value, "duration can not be negative"))?;

                Ok(seconds_to_ios_format(seconds))
            }
        }
    }
}

/// Converts a collector timestamp from `YYYY-MM-DD_HHMM` to `YYYY-MM-DD HH:MM:00`.
///
/// # Errors
///
/// Returns a `FormatError` if `timestamp` does not hold exactly one `_` separator.
pub fn standardize_timestamp(timestamp: &str) -> Result<String, FormatError> {
    let mut parts = timestamp.split('_');

    let (Some(date), Some(time), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(FormatError::new(
            timestamp,
            "expected 'YYYY-MM-DD_HHMM' with a single '_' separator",
        ));
    };

    let hours: String = time.chars().take(2).collect();
    let minutes: String = time.chars().skip(2).collect();

    Ok(format!("{date} {hours}:{minutes}:00"))
}

/// Renders a duration in seconds the way IOS shows BGP state timers (`up for 1w2d`), leaving out
/// zero valued units where IOS would. Returns `None` for a zero duration.
#[must_use]
pub fn seconds_to_ios_format(seconds: u64) -> Option<String> {
    if seconds == 0 {
        return None;
    }

    let weeks = seconds / SECONDS_PER_WEEK;
    let days = (seconds % SECONDS_PER_WEEK) / SECONDS_PER_DAY;
    let hours = (seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR;

    let formatted = match (weeks > 0, days > 0, hours > 0) {
        (true, true, false) => format!("up for {weeks}w{days}d"),
        (true, false, false) => format!("up for {weeks}w"),
        (false, true, true) => format!("up for {days}d{hours}h"),
        (false, true, false) => format!("up for {days}d"),
        _ => format!("up for {weeks}w{days}d{hours}h"),
    };

    Some(formatted)
}

/// Splits a (fully qualified) device name on the first `.` into the host and the remaining
/// domain, which is empty if there is no `.`.
#[must_use]
pub fn split_domain(device_name: &str) -> (String, String) {
    device_name.split_once('.').map_or_else(
        || (device_name.to_owned(), String::new()),
        |(host, domain)| (host.to_owned(), domain.to_owned()),
    )
}

#[allow(clippy::expect_used)]
fn ip_port_pattern() -> &'static Regex {
    static RE: OnceCell<Regex> = OnceCell::new();

    RE.get_or_init(|| {
        Regex::new(r"(?P<ip>.*):(?P<port>\d+)$").expect("failed compiling pattern, this is a bug")
    })
}

/// Splits an `ip:port` address on its last `:` when it ends in a numeric port. Addresses without
/// a trailing port come back unchanged with no port.
#[must_use]
pub fn split_ip_port(address: &str) -> (String, Option<String>) {
    ip_port_pattern().captures(address).map_or_else(
        || (address.to_owned(), None),
        |captures| {
            (
                captures["ip"].to_owned(),
                Some(captures["port"].to_owned()),
            )
        },
    )
}
