//! Prayer-time driven iCalendar feed for the Naqshbandi wird schedule.
//!
//! Monthly timetables are read from a [`TimeSource`], normalized into
//! [`DayRecord`]s, expanded into [`ScheduledEvent`]s and rendered as a single
//! RFC 5545 document.

pub mod calendar;
pub mod config;
mod error;
pub mod horizon;
pub mod prayer;
pub mod schedule;
pub mod source;
mod wird;

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

pub use config::{Config, EventSpec};
pub use error::{Error, Result};
pub use prayer::{DayRecord, NormalizedTime, PrayerSlot};
pub use schedule::{EventKey, ScheduledEvent};
pub use source::{AthanPlus, MonthTable, RawDay, TimeSource};
pub use wird::salawat_target;

#[derive(Debug, Clone)]
pub struct Feed {
    pub days: BTreeMap<NaiveDate, DayRecord>,
    pub events: Vec<ScheduledEvent>,
}

impl Feed {
    /// Collects the configured window starting at `today` (a date in the feed
    /// timezone) and derives its events.
    pub async fn collect<S: TimeSource>(config: &Config, source: &S, today: NaiveDate) -> Result<Self> {
        let days = horizon::collect(source, today, config.days_ahead).await?;
        let events = schedule::derive_all(config, &days);

        Ok(Self { days, events })
    }

    pub fn first_day(&self) -> Option<&DayRecord> {
        self.days.values().next()
    }

    pub fn to_ics(&self, config: &Config, generated_at: DateTime<Utc>) -> String {
        calendar::render(config, &self.events, generated_at)
    }
}
