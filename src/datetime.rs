//! Clock abstraction and date/time formatting.

use std::fmt::{Display, Write};
use std::sync::Arc;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use parking_lot::Mutex;

/// Default row timestamp format (`YYYY-MM-DD HH:MM:SS`).
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Source of creation timestamps for stored records.
pub trait Clock: Send + Sync {
    /// Current instant in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the host's wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for deterministic tests and scripted sessions.
///
/// Clones share the same instant, so a handle kept by a test can move
/// time forward for stores that received another clone.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Jump to an absolute instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock() = instant;
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock();
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock()
    }
}

/// Format a `DateTime<Utc>` in the specified timezone.
///
/// Falls back to UTC when `timezone` is not a known zone name, and to
/// [`DEFAULT_DATETIME_FORMAT`] when `format` cannot be rendered.
pub fn format_utc_datetime(dt: &DateTime<Utc>, timezone: &str, format: &str) -> String {
    let rendered = match timezone.parse::<Tz>() {
        Ok(tz) => render(dt.with_timezone(&tz).format(format)),
        Err(_) => render(dt.format(format)),
    };
    match rendered {
        Some(text) => text,
        None => dt.format(DEFAULT_DATETIME_FORMAT).to_string(),
    }
}

fn render(formatted: impl Display) -> Option<String> {
    let mut out = String::new();
    write!(out, "{formatted}").ok()?;
    Some(out)
}

/// Whether `format` parses as a chrono strftime string.
pub fn is_valid_datetime_format(format: &str) -> bool {
    !format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Whether `timezone` names a zone known to chrono-tz.
pub fn is_valid_timezone(timezone: &str) -> bool {
    timezone.parse::<Tz>().is_ok()
}
