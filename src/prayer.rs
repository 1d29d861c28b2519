use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::source::RawDay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrayerSlot {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl PrayerSlot {
    /// Column order of the monthly timetable.
    pub const ALL: [PrayerSlot; 6] = [
        PrayerSlot::Fajr,
        PrayerSlot::Sunrise,
        PrayerSlot::Dhuhr,
        PrayerSlot::Asr,
        PrayerSlot::Maghrib,
        PrayerSlot::Isha,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PrayerSlot::Fajr => "fajr",
            PrayerSlot::Sunrise => "sunrise",
            PrayerSlot::Dhuhr => "dhuhr",
            PrayerSlot::Asr => "asr",
            PrayerSlot::Maghrib => "maghrib",
            PrayerSlot::Isha => "isha",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Slots the timetable prints on a 12-hour clock that always fall after noon.
    fn is_afternoon(self) -> bool {
        matches!(self, PrayerSlot::Asr | PrayerSlot::Maghrib | PrayerSlot::Isha)
    }
}

impl fmt::Display for PrayerSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wall-clock time of a slot, not yet attached to a date or timezone.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedTime {
    pub hour: u32,
    pub minute: u32,
}

impl NormalizedTime {
    pub fn new(hour: u32, minute: u32) -> Self {
        Self { hour, minute }
    }

    /// Reads the first `H:MM` / `HH:MM` found in `raw` and resolves AM/PM for `slot`.
    ///
    /// Asr, Maghrib and Isha hours below 12 are moved into the afternoon. Fajr,
    /// Sunrise and Dhuhr are taken exactly as printed. Values are not range checked.
    pub fn parse(raw: &str, slot: PrayerSlot) -> Option<Self> {
        let (mut hour, minute) = scan_clock(raw)?;

        if slot.is_afternoon() && hour < 12 {
            hour += 12;
        }

        Some(Self { hour, minute })
    }

    pub fn minutes_since_midnight(self) -> i64 {
        i64::from(self.hour) * 60 + i64::from(self.minute)
    }

    /// Places the time on `date`. Out-of-range values roll over into the next day.
    pub fn on(self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::default()) + Duration::minutes(self.minutes_since_midnight())
    }
}

impl fmt::Display for NormalizedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

fn scan_clock(raw: &str) -> Option<(u32, u32)> {
    let bytes = raw.as_bytes();

    for (colon, _) in raw.match_indices(':') {
        let minutes = bytes.get(colon + 1..colon + 3)?;
        if !minutes.iter().all(u8::is_ascii_digit) {
            continue;
        }

        let hour_start = bytes[..colon]
            .iter()
            .rev()
            .take(2)
            .take_while(|b| b.is_ascii_digit())
            .count();
        if hour_start == 0 {
            continue;
        }

        let hour = raw[colon - hour_start..colon].parse().ok()?;
        let minute = raw[colon + 1..colon + 3].parse().ok()?;
        return Some((hour, minute));
    }

    None
}

/// A date whose six slots all normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayRecord {
    pub date: NaiveDate,
    times: [NormalizedTime; 6],
}

impl DayRecord {
    /// Builds the record for `year-month-day`, or nothing if the date is not a
    /// real calendar date or any slot fails to normalize.
    pub fn aggregate(year: i32, month: u32, day: u32, raw: &RawDay) -> Option<Self> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;

        let mut times = [NormalizedTime::default(); 6];
        for slot in PrayerSlot::ALL {
            times[slot.index()] = NormalizedTime::parse(raw.get(slot)?, slot)?;
        }

        Some(Self { date, times })
    }

    pub fn time(&self, slot: PrayerSlot) -> NormalizedTime {
        self.times[slot.index()]
    }

    pub fn at(&self, slot: PrayerSlot) -> NaiveDateTime {
        self.time(slot).on(self.date)
    }
}
