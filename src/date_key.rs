use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A local calendar day, used as the key of a habit's per-day record.
///
/// The string form is `YYYY-MM-DD`, built from the local year, month and day
/// fields. Years outside 0..=9999 use the signed expanded form
/// (`-0001-06-01`, `+10000-01-01`) so every representable date has a key.
/// Instants are never shifted through UTC before keying, so every moment of
/// the same local day maps to the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date key {0:?}, expected YYYY-MM-DD")]
pub struct ParseDateKeyError(pub String);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn from_local<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self(instant.naive_local().date())
    }

    pub fn today() -> Self {
        Self::from_local(&Local::now())
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }

    pub fn day_of_month(self) -> u32 {
        self.0.day()
    }

    pub fn pred(self) -> Option<Self> {
        self.0.pred_opt().map(Self)
    }

    pub fn succ(self) -> Option<Self> {
        self.0.succ_opt().map(Self)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

pub fn encode(date: NaiveDate) -> String {
    DateKey(date).to_string()
}

pub fn decode(key: &str) -> Result<DateKey, ParseDateKeyError> {
    key.parse()
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let year = self.0.year();
        if (0..=9999).contains(&year) {
            write!(f, "{year:04}")?;
        } else {
            // expanded ISO 8601 year, always signed
            write!(f, "{year:+05}")?;
        }
        write!(f, "-{:02}-{:02}", self.0.month(), self.0.day())
    }
}

impl FromStr for DateKey {
    type Err = ParseDateKeyError;

    /// Accepts only the exact form `Display` produces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseDateKeyError(s.to_string());
        let (rest, day) = s.rsplit_once('-').ok_or_else(invalid)?;
        let (year, month) = rest.rsplit_once('-').ok_or_else(invalid)?;

        let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
        let year_digits = year.strip_prefix(['+', '-']).unwrap_or(year);
        if !two_digits(month)
            || !two_digits(day)
            || year_digits.len() < 4
            || !year_digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let key = Self::from_ymd(
            year.parse::<i32>().map_err(|_| invalid())?,
            month.parse::<u32>().map_err(|_| invalid())?,
            day.parse::<u32>().map_err(|_| invalid())?,
        )
        .ok_or_else(invalid)?;

        if key.to_string() != s {
            return Err(invalid());
        }
        Ok(key)
    }
}

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
