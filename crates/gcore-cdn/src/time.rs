//! Timestamp codec for the G-Core API
//!
//! The API emits timestamps as `YYYY-MM-DDTHH:MM:SS`, sometimes with a
//! fractional part and sometimes with a trailing `Z`. The `Z` is dropped
//! before parsing and never interpreted, so every value is read as UTC.
//! The literal `null` decodes to [`GcoreTime::zero`].

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Layout used on the wire, without offset.
pub const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parse layout. `%.f` also accepts a missing fraction.
const PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Seconds between 0001-01-01T00:00:00 and the unix epoch.
const ZERO_UNIX_SECONDS: i64 = -62_135_596_800;

/// Instant in time as reported by the G-Core API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GcoreTime(DateTime<Utc>);

impl GcoreTime {
    pub fn new(time: DateTime<Utc>) -> Self {
        Self(time)
    }

    /// The zero instant, `0001-01-01T00:00:00`.
    pub fn zero() -> Self {
        Self(DateTime::from_timestamp(ZERO_UNIX_SECONDS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC))
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::zero()
    }

    /// Whether this instant is strictly before `other`.
    pub fn before(&self, other: DateTime<Utc>) -> bool {
        self.0 < other
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn into_inner(self) -> DateTime<Utc> {
        self.0
    }

    /// Parse a raw value, surrounding quotes included or not.
    pub fn parse(raw: &str) -> Result<Self, chrono::ParseError> {
        let s = raw.trim_matches('"');
        if s == "null" {
            return Ok(Self::zero());
        }
        let s = s.strip_suffix('Z').unwrap_or(s);
        NaiveDateTime::parse_from_str(s, PARSE_FORMAT).map(|naive| Self(naive.and_utc()))
    }
}

impl Default for GcoreTime {
    fn default() -> Self {
        Self::zero()
    }
}

impl From<DateTime<Utc>> for GcoreTime {
    fn from(time: DateTime<Utc>) -> Self {
        Self(time)
    }
}

impl FromStr for GcoreTime {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for GcoreTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl Serialize for GcoreTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

struct GcoreTimeVisitor;

impl Visitor<'_> for GcoreTimeVisitor {
    type Value = GcoreTime;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a timestamp formatted as YYYY-MM-DDTHH:MM:SS or null")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        GcoreTime::parse(v).map_err(|e| E::custom(format!("invalid timestamp {v:?}: {e}")))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(GcoreTime::zero())
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(GcoreTime::zero())
    }
}

impl<'de> Deserialize<'de> for GcoreTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(GcoreTimeVisitor)
    }
}
