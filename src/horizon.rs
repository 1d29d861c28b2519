use std::collections::BTreeMap;
use std::mem;

use chrono::{Datelike, Days, NaiveDate};
use log::{debug, info};

use crate::prayer::DayRecord;
use crate::source::TimeSource;
use crate::{Error, Result};

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

/// Months from the one containing `start` through the one containing `end`.
pub struct MonthRange(Period, Period);

impl MonthRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self(Period::containing(start), Period::containing(end))
    }
}

impl Iterator for MonthRange {
    type Item = Period;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 <= self.1 {
            let next = self.0.next();
            Some(mem::replace(&mut self.0, next))
        } else {
            None
        }
    }
}

/// Collects every usable day in `[today, today + days]`, one fetch per month.
///
/// Months the source cannot supply simply contribute nothing; only a window
/// with no usable day at all is an error.
pub async fn collect<S: TimeSource>(
    source: &S,
    today: NaiveDate,
    days: u32,
) -> Result<BTreeMap<NaiveDate, DayRecord>> {
    let end = today
        .checked_add_days(Days::new(u64::from(days)))
        .unwrap_or(NaiveDate::MAX);

    let mut collected = BTreeMap::new();

    for Period { year, month } in MonthRange::new(today, end) {
        for (day, raw) in source.fetch(year, month).await {
            let Some(record) = DayRecord::aggregate(year, month, day, &raw) else {
                debug!("Discarding {year}-{month:02}-{day:02}: incomplete or invalid");
                continue;
            };

            if (today..=end).contains(&record.date) {
                collected.insert(record.date, record);
            }
        }
    }

    match (collected.keys().next(), collected.keys().next_back()) {
        (Some(first), Some(last)) => {
            info!("Collected {} days ({first} to {last})", collected.len());
            Ok(collected)
        }
        _ => Err(Error::EmptyHorizon { start: today, end }),
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::source::{MonthTable, RawDay};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn raw() -> RawDay {
        RawDay::new(["6:15", "7:40", "1:05", "4:50", "7:20", "8:45"])
    }

    /// Serves a full month of valid days for every period not listed as failing.
    #[derive(Default)]
    struct FakeSource {
        failing: Vec<(i32, u32)>,
        requests: RefCell<Vec<(i32, u32)>>,
    }

    impl TimeSource for FakeSource {
        async fn fetch(&self, year: i32, month: u32) -> MonthTable {
            self.requests.borrow_mut().push((year, month));
            if self.failing.contains(&(year, month)) {
                return MonthTable::new();
            }
            (1..=31).map(|day| (day, raw())).collect()
        }
    }

    #[test]
    fn month_range_wraps_year() {
        let months = MonthRange::new(date(2026, 11, 20), date(2027, 2, 1))
            .map(|period| (period.year, period.month))
            .collect::<Vec<_>>();

        assert_eq!(months, [(2026, 11), (2026, 12), (2027, 1), (2027, 2)]);
    }

    #[test]
    fn month_range_single_month() {
        assert_eq!(MonthRange::new(date(2026, 10, 1), date(2026, 10, 31)).count(), 1);
    }

    #[tokio::test]
    async fn single_day_window() {
        struct OneDay;

        impl TimeSource for OneDay {
            async fn fetch(&self, year: i32, month: u32) -> MonthTable {
                if (year, month) == (2026, 10) {
                    MonthTable::from([(19, raw())])
                } else {
                    MonthTable::new()
                }
            }
        }

        let days = collect(&OneDay, date(2026, 10, 19), 1).await.unwrap();

        assert_eq!(days.len(), 1);
        assert!(days.contains_key(&date(2026, 10, 19)));
    }

    #[tokio::test]
    async fn window_is_closed_interval() {
        let source = FakeSource::default();
        let days = collect(&source, date(2026, 10, 19), 180).await.unwrap();

        assert_eq!(days.len(), 181);
        assert_eq!(days.keys().next(), Some(&date(2026, 10, 19)));
        assert_eq!(days.keys().next_back(), Some(&date(2027, 4, 17)));
        assert_eq!(
            *source.requests.borrow(),
            [
                (2026, 10),
                (2026, 11),
                (2026, 12),
                (2027, 1),
                (2027, 2),
                (2027, 3),
                (2027, 4),
            ]
        );
    }

    #[tokio::test]
    async fn failed_month_does_not_abort() {
        let source = FakeSource {
            failing: vec![(2026, 11)],
            ..Default::default()
        };
        let days = collect(&source, date(2026, 10, 30), 40).await.unwrap();

        assert_eq!(source.requests.borrow().len(), 3);
        assert!(days.contains_key(&date(2026, 10, 31)));
        assert!(!days.contains_key(&date(2026, 11, 15)));
        assert!(days.contains_key(&date(2026, 12, 1)));
        assert_eq!(days.len(), 2 + 9);
    }

    #[tokio::test]
    async fn total_failure_is_empty_horizon() {
        let source = FakeSource {
            failing: vec![(2026, 10), (2026, 11)],
            ..Default::default()
        };
        let err = collect(&source, date(2026, 10, 19), 30).await.unwrap_err();

        assert!(matches!(
            err,
            Error::EmptyHorizon { start, end } if start == date(2026, 10, 19) && end == date(2026, 11, 18)
        ));
    }
}
