use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::config::Config;
use crate::prayer::{DayRecord, PrayerSlot};
use crate::wird;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKey {
    PreFajr,
    Fajr,
    /// Derived window between the end of Fajr and sunrise.
    Worship,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl EventKey {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKey::PreFajr => "prefajr",
            EventKey::Fajr => "fajr",
            EventKey::Worship => "worship",
            EventKey::Dhuhr => "dhuhr",
            EventKey::Asr => "asr",
            EventKey::Maghrib => "maghrib",
            EventKey::Isha => "isha",
        }
    }
}

/// One concrete event, in wall-clock time of the feed timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledEvent {
    pub uid: String,
    pub key: EventKey,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub reminder_minutes: u32,
}

impl ScheduledEvent {
    fn new(
        config: &Config,
        date: NaiveDate,
        key: EventKey,
        title: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        reminder_minutes: u32,
    ) -> Self {
        Self {
            uid: format!(
                "{}-{}@{}",
                date.format("%Y%m%d"),
                key.as_str(),
                config.uid_domain
            ),
            key,
            title: title.to_string(),
            description: config
                .descriptions
                .then(|| wird::description(key, date)),
            start,
            end,
            reminder_minutes,
        }
    }
}

/// Events of a single day, in declaration order with the worship window
/// right after Fajr.
pub fn derive_day(config: &Config, day: &DayRecord) -> Vec<ScheduledEvent> {
    let mut events = Vec::with_capacity(config.events.len() + 1);

    for spec in &config.events {
        let start = day.at(spec.anchor) - Duration::minutes(i64::from(spec.offset_minutes));
        let end = start + Duration::minutes(i64::from(spec.duration_minutes));

        events.push(ScheduledEvent::new(
            config,
            day.date,
            spec.key,
            spec.title,
            start,
            end,
            spec.reminder_minutes,
        ));

        if spec.key != EventKey::Fajr {
            continue;
        }

        let sunrise = day.at(PrayerSlot::Sunrise);
        if end < sunrise {
            events.push(ScheduledEvent::new(
                config,
                day.date,
                EventKey::Worship,
                &config.worship_title,
                end,
                sunrise,
                0,
            ));
        }
    }

    events
}

/// Events of every day, dates ascending.
pub fn derive_all(config: &Config, days: &BTreeMap<NaiveDate, DayRecord>) -> Vec<ScheduledEvent> {
    days.values()
        .flat_map(|day| derive_day(config, day))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::RawDay;

    fn day(sunrise: &str) -> DayRecord {
        let raw = RawDay::new(["6:15", sunrise, "1:05", "4:50", "7:20", "8:45"]);
        DayRecord::aggregate(2026, 10, 19, &raw).unwrap()
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn derives_seven_events_in_order() {
        let events = derive_day(&Config::default(), &day("7:40"));

        let keys = events.iter().map(|event| event.key).collect::<Vec<_>>();
        assert_eq!(
            keys,
            [
                EventKey::PreFajr,
                EventKey::Fajr,
                EventKey::Worship,
                EventKey::Dhuhr,
                EventKey::Asr,
                EventKey::Maghrib,
                EventKey::Isha,
            ]
        );

        assert_eq!((events[0].start, events[0].end), (at(5, 15), at(6, 15)));
        assert_eq!((events[1].start, events[1].end), (at(6, 15), at(6, 35)));
        assert_eq!((events[2].start, events[2].end), (at(6, 35), at(7, 40)));
        assert_eq!((events[3].start, events[3].end), (at(1, 5), at(1, 20)));
        assert_eq!((events[6].start, events[6].end), (at(20, 45), at(21, 10)));

        assert_eq!(events[2].reminder_minutes, 0);
        assert_eq!(events[0].reminder_minutes, 10);
        assert_eq!(events[0].uid, "20261019-prefajr@mcws-naqshbandi");
        assert_eq!(events[2].uid, "20261019-worship@mcws-naqshbandi");
    }

    #[test]
    fn omits_worship_when_sunrise_not_after_fajr() {
        for sunrise in ["6:35", "6:20", "6:00"] {
            let events = derive_day(&Config::default(), &day(sunrise));
            assert_eq!(events.len(), 6, "sunrise {sunrise}");
            assert!(events.iter().all(|event| event.key != EventKey::Worship));
        }

        let events = derive_day(&Config::default(), &day("6:36"));
        assert_eq!(events[2].key, EventKey::Worship);
        assert_eq!((events[2].start, events[2].end), (at(6, 35), at(6, 36)));
    }

    #[test]
    fn start_always_precedes_end() {
        let events = derive_day(&Config::default(), &day("7:40"));
        assert!(events.iter().all(|event| event.start < event.end));
    }

    #[test]
    fn descriptions_follow_config() {
        let mut config = Config::default();
        assert!(derive_day(&config, &day("7:40"))
            .iter()
            .all(|event| event.description.is_some()));

        config.descriptions = false;
        assert!(derive_day(&config, &day("7:40"))
            .iter()
            .all(|event| event.description.is_none()));
    }

    #[test]
    fn derives_days_ascending() {
        let raw = RawDay::new(["6:15", "7:40", "1:05", "4:50", "7:20", "8:45"]);
        let days = [21, 19, 20]
            .into_iter()
            .map(|d| {
                let record = DayRecord::aggregate(2026, 10, d, &raw).unwrap();
                (record.date, record)
            })
            .collect::<BTreeMap<_, _>>();

        let events = derive_all(&Config::default(), &days);
        assert_eq!(events.len(), 21);
        assert!(events.first().unwrap().uid.starts_with("20261019-prefajr"));
        assert!(events.last().unwrap().uid.starts_with("20261021-isha"));
    }
}
