use std::time::Duration;

use chrono_tz::Tz;

use crate::prayer::PrayerSlot;
use crate::schedule::EventKey;

/// A schedulable event type anchored to one prayer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSpec {
    pub key: EventKey,
    pub title: &'static str,
    pub anchor: PrayerSlot,
    /// Minutes before the anchor at which the event starts.
    pub offset_minutes: u32,
    pub duration_minutes: u32,
    /// Minutes before start at which the alarm fires, 0 for at start.
    pub reminder_minutes: u32,
}

impl EventSpec {
    pub const fn new(
        key: EventKey,
        title: &'static str,
        anchor: PrayerSlot,
        offset_minutes: u32,
        duration_minutes: u32,
        reminder_minutes: u32,
    ) -> Self {
        Self {
            key,
            title,
            anchor,
            offset_minutes,
            duration_minutes,
            reminder_minutes,
        }
    }
}

/// Declaration order is the per-day event order of the feed.
pub const EVENTS: [EventSpec; 6] = [
    EventSpec::new(EventKey::PreFajr, "Pre-Fajr Programme", PrayerSlot::Fajr, 60, 60, 10),
    EventSpec::new(EventKey::Fajr, "Fajr + Wird Bite A", PrayerSlot::Fajr, 0, 20, 5),
    EventSpec::new(EventKey::Dhuhr, "Dhuhr + Wird Bite B", PrayerSlot::Dhuhr, 0, 15, 5),
    EventSpec::new(EventKey::Asr, "Asr + Wird Bite C", PrayerSlot::Asr, 0, 15, 5),
    EventSpec::new(EventKey::Maghrib, "Maghrib + Wird Bite D", PrayerSlot::Maghrib, 0, 15, 5),
    EventSpec::new(EventKey::Isha, "Isha + Wird Bite E", PrayerSlot::Isha, 0, 25, 5),
];

/// One observance of a VTIMEZONE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observance {
    pub name: &'static str,
    pub dtstart: &'static str,
    pub offset_from: &'static str,
    pub offset_to: &'static str,
    pub rrule: &'static str,
}

/// Static daylight saving rules of the feed timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneRules {
    pub daylight: Observance,
    pub standard: Observance,
}

impl ZoneRules {
    /// Second Sunday of March to first Sunday of November, both at 02:00.
    pub const US_EASTERN: ZoneRules = ZoneRules {
        daylight: Observance {
            name: "EDT",
            dtstart: "19700308T020000",
            offset_from: "-0500",
            offset_to: "-0400",
            rrule: "FREQ=YEARLY;BYMONTH=3;BYDAY=2SU",
        },
        standard: Observance {
            name: "EST",
            dtstart: "19701101T020000",
            offset_from: "-0400",
            offset_to: "-0500",
            rrule: "FREQ=YEARLY;BYMONTH=11;BYDAY=1SU",
        },
    };
}

#[derive(Debug, Clone)]
pub struct Config {
    pub masjid_id: String,
    pub base_url: String,
    pub fetch_timeout: Duration,
    pub timezone: Tz,
    pub zone_rules: ZoneRules,
    pub days_ahead: u32,
    pub calendar_name: String,
    pub product_id: String,
    pub uid_domain: String,
    pub events: Vec<EventSpec>,
    pub worship_title: String,
    pub descriptions: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            masjid_id: "RKxwV5dO".into(),
            base_url: "https://timing.athanplus.com/masjid/widgets/monthly".into(),
            fetch_timeout: Duration::from_secs(30),
            timezone: chrono_tz::America::Detroit,
            zone_rules: ZoneRules::US_EASTERN,
            days_ahead: 180,
            calendar_name: "Naqshbandi Wird Schedule".into(),
            product_id: "-//MCWS//Naqshbandi Wird Schedule//EN".into(),
            uid_domain: "mcws-naqshbandi".into(),
            events: EVENTS.to_vec(),
            worship_title: "Worship until Sunrise".into(),
            descriptions: true,
        }
    }
}
