//! Link record: the single entity persisted by the service.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Lifecycle status of a link.
///
/// Moves only from `Active` to `Burnt`, and only through
/// [`crate::domain::lifecycle::evaluate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkStatus {
    #[default]
    Active,
    Burnt,
}

/// Expiration policy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LinkMode {
    /// Never expires.
    #[default]
    Eternal,
    /// Stops resolving once the calendar day in `expiredDate` has started.
    #[serde(rename = "EXPDATE")]
    ExpDate,
    /// Burns when the hit counter reaches `timesToExpire`.
    #[serde(rename = "EXPCOUNTER")]
    ExpCounter,
}

/// HTTP status used when redirecting to the original URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u16)]
pub enum RedirectType {
    Permanent = 301,
    Found = 302,
}

impl RedirectType {
    /// Maps the loosely validated creation input onto a legal status.
    ///
    /// Exact `301`/`302` win; otherwise the first substring match decides.
    /// Returns `None` when neither substring is present.
    pub fn from_loose(raw: &str) -> Option<Self> {
        match raw {
            "301" => Some(Self::Permanent),
            "302" => Some(Self::Found),
            _ if raw.contains("301") => Some(Self::Permanent),
            _ if raw.contains("302") => Some(Self::Found),
            _ => None,
        }
    }

    pub fn as_u16(self) -> u16 {
        self as u16
    }
}

/// A short link as stored under its code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub code: String,
    pub original_url: String,
    pub redirect_type: RedirectType,
    #[serde(default)]
    pub status: LinkStatus,
    #[serde(default)]
    pub mode: LinkMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expired_date: Option<String>,
    #[serde(default)]
    pub times_to_expire: u64,
    #[serde(default)]
    pub count: u64,
}

impl LinkRecord {
    /// Builds a fresh record from validated input, applying creation defaults.
    pub fn new(code: String, new_link: NewLink) -> Self {
        Self {
            code,
            original_url: new_link.original_url,
            redirect_type: new_link.redirect_type,
            status: new_link.status.unwrap_or_default(),
            mode: new_link.mode.unwrap_or_default(),
            expired_date: new_link.expired_date,
            times_to_expire: new_link.times_to_expire.unwrap_or(0),
            count: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == LinkStatus::Active
    }

    /// Returns the instant after which an `EXPDATE` link stops resolving.
    ///
    /// `None` if the date is absent or cannot be read.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expired_date.as_deref().and_then(parse_expiry_date)
    }
}

/// Validated creation input, before a code has been assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub original_url: String,
    pub redirect_type: RedirectType,
    pub mode: Option<LinkMode>,
    pub status: Option<LinkStatus>,
    pub expired_date: Option<String>,
    pub times_to_expire: Option<u64>,
}

impl NewLink {
    pub fn new(original_url: impl Into<String>, redirect_type: RedirectType) -> Self {
        Self {
            original_url: original_url.into(),
            redirect_type,
            mode: None,
            status: None,
            expired_date: None,
            times_to_expire: None,
        }
    }

    pub fn with_mode(mut self, mode: LinkMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_expired_date(mut self, date: impl Into<String>) -> Self {
        self.expired_date = Some(date.into());
        self
    }

    pub fn with_times_to_expire(mut self, times: u64) -> Self {
        self.times_to_expire = Some(times);
        self
    }
}

/// Parses a `DD/MM/YYYY` date into midnight UTC of that day.
///
/// `-`, `.` and space are accepted as separators too. A day past the end of
/// the month rolls into the next one, so `31/02/2024` is 2 March 2024.
pub fn parse_expiry_date(raw: &str) -> Option<DateTime<Utc>> {
    let mut parts = raw.trim().split(['/', '-', '.', ' ']);
    let day: u32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let year: i32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || day == 0 {
        return None;
    }

    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let date = first.checked_add_days(Days::new(u64::from(day - 1)))?;
    Some(date.and_hms_opt(0, 0, 0)?.and_utc())
}
