use chrono::{DateTime, Duration, TimeZone, Utc};
use indexmap::IndexSet;
use serde::Serialize;
use thiserror::Error;

use crate::error::ApiError;
use crate::model::Notification;

pub const MISSING_FIELDS_MESSAGE: &str = "通知時間と対象の株（1つ以上）を選択してください。";
pub const DEFAULT_TIME: &str = "09:00";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields,

    #[error("invalid notification time {0:?}")]
    InvalidTime(String),
}

/// Payload of the `createNotification` mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationInput {
    pub symbols: Vec<String>,
    pub time: DateTime<Utc>,
}

/// Form state for registering a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDraft {
    time: String,
    symbols: IndexSet<String>,
}

impl Default for NotificationDraft {
    fn default() -> Self {
        Self {
            time: DEFAULT_TIME.to_string(),
            symbols: IndexSet::new(),
        }
    }
}

impl NotificationDraft {
    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn set_time(&mut self, time: impl Into<String>) {
        self.time = time.into();
    }

    /// Add or remove `symbol`; returns whether it is selected afterwards.
    pub fn toggle(&mut self, symbol: &str) -> bool {
        if self.symbols.shift_remove(symbol) {
            false
        } else {
            self.symbols.insert(symbol.to_string());
            true
        }
    }

    pub fn is_selected(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    /// Check the form and pin its hour to today's date in `now`'s zone.
    pub fn validate<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Result<NotificationInput, NotificationError> {
        if self.time.trim().is_empty() || self.symbols.is_empty() {
            return Err(NotificationError::MissingFields);
        }

        let hour = parse_hour(&self.time)?;
        let naive = now
            .date_naive()
            .and_hms_opt(hour, 0, 0)
            .ok_or_else(|| NotificationError::InvalidTime(self.time.clone()))?;
        let zone = now.timezone();
        // An hour skipped by a clock change fires at the first instant after it.
        let local = zone
            .from_local_datetime(&naive)
            .earliest()
            .or_else(|| zone.from_local_datetime(&(naive + Duration::hours(1))).earliest())
            .ok_or_else(|| NotificationError::InvalidTime(self.time.clone()))?;

        Ok(NotificationInput {
            symbols: self.symbols.iter().cloned().collect(),
            time: local.with_timezone(&Utc),
        })
    }
}

/// Hour of an `HH` or `HH:MM` time-of-day string.
pub fn parse_hour(time: &str) -> Result<u32, NotificationError> {
    let invalid = || NotificationError::InvalidTime(time.to_string());
    let mut parts = time.trim().splitn(2, ':');

    let hour: u32 = parts
        .next()
        .and_then(|hour| hour.parse().ok())
        .ok_or_else(invalid)?;
    if hour > 23 {
        return Err(invalid());
    }

    if let Some(minutes) = parts.next() {
        match minutes.parse::<u32>() {
            Ok(minutes) if minutes < 60 => {}
            _ => return Err(invalid()),
        }
    }

    Ok(hour)
}

/// Display projection of a registered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationView {
    pub id: String,
    pub time: String,
    pub tickers: Vec<String>,
}

impl NotificationView {
    pub fn new<Tz>(notification: &Notification, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        NotificationView {
            id: notification.id.clone(),
            time: notification.time.with_timezone(tz).format("%H:%M").to_string(),
            tickers: notification
                .targets
                .iter()
                .map(|target| target.short_name.clone())
                .collect(),
        }
    }
}

/// Outcome of the latest notification read.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum NotificationState {
    #[default]
    Loading,
    LoginRequired,
    Loaded(Option<Notification>),
    Failed(String),
}

impl NotificationState {
    pub fn from_result(result: Result<Option<Notification>, ApiError>) -> Self {
        match result {
            Ok(notification) => NotificationState::Loaded(notification),
            Err(err) if err.is_unauthorized() => NotificationState::LoginRequired,
            Err(err) => {
                log::warn!(target: "notification", "failed to load notification: {err}");
                NotificationState::Failed(err.to_string())
            }
        }
    }

    pub fn is_authorized(&self) -> bool {
        !matches!(self, NotificationState::LoginRequired)
    }

    pub fn current(&self) -> Option<&Notification> {
        match self {
            NotificationState::Loaded(notification) => notification.as_ref(),
            _ => None,
        }
    }

    /// What the notification section should render, with times shown in `tz`.
    pub fn status<Tz>(&self, tz: &Tz) -> NotificationStatus
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        match self {
            NotificationState::Loading => NotificationStatus::Loading,
            NotificationState::LoginRequired => NotificationStatus::LoginRequired,
            NotificationState::Loaded(None) => NotificationStatus::Empty,
            NotificationState::Loaded(Some(notification)) => {
                NotificationStatus::Registered(NotificationView::new(notification, tz))
            }
            NotificationState::Failed(message) => NotificationStatus::Failed(message.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationStatus {
    Loading,
    LoginRequired,
    /// Authorized with nothing registered: show the creation form.
    Empty,
    Registered(NotificationView),
    Failed(String),
}
