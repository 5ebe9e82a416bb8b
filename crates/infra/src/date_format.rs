//! Display formatting of store timestamps.

use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Date format applied to `lastmodified` when lists are normalized.
///
/// Wraps a `chrono` strftime pattern. The default renders US-style dates
/// (`3/14/2024`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat(String);

impl Default for DateFormat {
    fn default() -> Self {
        Self("%-m/%-d/%Y".to_string())
    }
}

impl DateFormat {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self(pattern.into())
    }

    pub fn pattern(&self) -> &str {
        &self.0
    }

    /// Parse a raw store timestamp and re-render it with this format.
    ///
    /// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DD`, or text already in
    /// this format. Anything else (or an invalid pattern) yields an empty string.
    pub fn format_raw(&self, raw: Option<&str>) -> String {
        let Some(parsed) = raw.and_then(|raw| self.parse(raw.trim())) else {
            return String::new();
        };
        let mut out = String::new();
        if write!(out, "{}", parsed.format(&self.0)).is_err() {
            return String::new();
        }
        out
    }

    fn parse(&self, raw: &str) -> Option<NaiveDateTime> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.naive_local());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return Some(dt);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(raw, &self.0))
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
    }
}
