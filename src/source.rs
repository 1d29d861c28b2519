use std::collections::BTreeMap;

use log::{info, warn};
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::config::Config;
use crate::prayer::PrayerSlot;
use crate::Result;

macro_rules! selector {
    ($query:expr) => {{
        static SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse($query).unwrap());
        &SELECTOR
    }};
}

/// Unparsed timetable cells of one day, indexed in [`PrayerSlot::ALL`] order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawDay(pub [Option<String>; 6]);

impl RawDay {
    pub fn new<S: Into<String>>(slots: [S; 6]) -> Self {
        Self(slots.map(|raw| Some(raw.into())))
    }

    pub fn get(&self, slot: PrayerSlot) -> Option<&str> {
        self.0[slot.index()].as_deref()
    }
}

/// Day of month to raw cells.
pub type MonthTable = BTreeMap<u32, RawDay>;

/// Supplier of monthly prayer timetables.
///
/// Implementations never fail past this boundary: a period that cannot be
/// fetched or parsed comes back as an empty table.
#[allow(async_fn_in_trait)]
pub trait TimeSource {
    async fn fetch(&self, year: i32, month: u32) -> MonthTable;
}

/// Monthly widget of timing.athanplus.com.
pub struct AthanPlus {
    client: reqwest::Client,
    base_url: String,
    masjid_id: String,
}

impl AthanPlus {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            masjid_id: config.masjid_id.clone(),
        })
    }

    async fn fetch_html(&self, year: i32, month: u32) -> reqwest::Result<String> {
        self.client
            .get(month_url(&self.base_url, &self.masjid_id, year, month))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await
    }
}

impl TimeSource for AthanPlus {
    async fn fetch(&self, year: i32, month: u32) -> MonthTable {
        match self.fetch_html(year, month).await {
            Ok(html) => {
                let table = parse_month(html);
                info!("Fetched {year}-{month:02} ({} days)", table.len());
                table
            }
            Err(err) => {
                warn!("Fetching {year}-{month:02} failed: {err}");
                MonthTable::new()
            }
        }
    }
}

fn month_url(base_url: &str, masjid_id: &str, year: i32, month: u32) -> String {
    format!("{base_url}?masjid_id={masjid_id}&theme=1&date={year}-{month:02}-01")
}

/// Extracts the day rows of a monthly timetable page.
///
/// Columns: day, hijri date, weekday, then the six slots in [`PrayerSlot::ALL`] order.
pub fn parse_month<S: AsRef<str>>(html: S) -> MonthTable {
    let html = Html::parse_document(html.as_ref());
    let mut table = MonthTable::new();

    for row in html.select(selector!("tr")) {
        let cells = row
            .select(selector!("td.regCell"))
            .map(cell_text)
            .collect::<Vec<_>>();

        if cells.len() < 9 {
            continue;
        }

        let Ok(day) = cells[0].parse::<u32>() else {
            continue;
        };

        let mut raw = RawDay::default();
        for (slot, text) in raw.0.iter_mut().zip(&cells[3..9]) {
            *slot = Some(text.clone());
        }

        table.insert(day, raw);
    }

    table
}

fn cell_text(cell: ElementRef) -> String {
    let element = cell.select(selector!("span")).next().unwrap_or(cell);
    element.text().collect::<String>().trim().to_string()
}
