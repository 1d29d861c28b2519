//! iCalendar rendering of the feed.

use chrono::{DateTime, NaiveDateTime, Utc};
use ics::{
    components::Property,
    escape_text,
    parameters::TzIDParam,
    properties::{CalScale, Description, DtEnd, DtStart, Method, RRule, Summary, Trigger, TzName},
    Alarm, Daylight, ICalendar, Standard, TimeZone,
};

use crate::config::{Config, ZoneRules};
use crate::schedule::ScheduledEvent;

/// Longest physical line allowed, in octets, excluding the CRLF.
pub const MAX_LINE_OCTETS: usize = 75;

/// Renders the whole document: header, VTIMEZONE, one VEVENT per event, footer.
///
/// `events` must already be in feed order. Every line is CRLF terminated and
/// folded to [`MAX_LINE_OCTETS`].
pub fn render(config: &Config, events: &[ScheduledEvent], generated_at: DateTime<Utc>) -> String {
    let tzid = config.timezone.name();
    let stamp = generated_at.format("%Y%m%dT%H%M%SZ").to_string();

    let mut calendar = ICalendar::new("2.0", config.product_id.as_str());
    calendar.push(CalScale::new("GREGORIAN"));
    calendar.push(Method::new("PUBLISH"));
    calendar.push(Property::new("X-WR-CALNAME", config.calendar_name.as_str()));
    calendar.push(Property::new("X-WR-TIMEZONE", tzid));
    calendar.add_timezone(timezone(tzid, &config.zone_rules));

    for event in events {
        calendar.add_event(vevent(event, tzid, &stamp));
    }

    fold_document(&calendar.to_string())
}

fn timezone<'a>(tzid: &'a str, rules: &ZoneRules) -> TimeZone<'a> {
    let mut daylight = Daylight::new(
        rules.daylight.dtstart,
        rules.daylight.offset_from,
        rules.daylight.offset_to,
    );
    daylight.push(TzName::new(rules.daylight.name));
    daylight.push(RRule::new(rules.daylight.rrule));

    let mut standard = Standard::new(
        rules.standard.dtstart,
        rules.standard.offset_from,
        rules.standard.offset_to,
    );
    standard.push(TzName::new(rules.standard.name));
    standard.push(RRule::new(rules.standard.rrule));

    let mut timezone = TimeZone::daylight(tzid, daylight);
    timezone.push(Property::new("X-LIC-LOCATION", tzid));
    timezone.add_standard(standard);
    timezone
}

fn vevent<'a>(event: &'a ScheduledEvent, tzid: &'a str, stamp: &'a str) -> ics::Event<'a> {
    assert!(
        event.start < event.end,
        "event {} does not end after it starts",
        event.uid
    );

    let mut start = DtStart::new(local(event.start));
    start.add(TzIDParam::new(tzid));

    let mut end = DtEnd::new(local(event.end));
    end.add(TzIDParam::new(tzid));

    let mut ics_event = ics::Event::new(event.uid.as_str(), stamp);
    ics_event.push(start);
    ics_event.push(end);
    ics_event.push(Summary::new(escape_text(event.title.as_str())));

    if let Some(description) = &event.description {
        ics_event.push(Description::new(escape_text(description.as_str())));
    }

    let trigger = match event.reminder_minutes {
        0 => "PT0M".to_string(),
        minutes => format!("-PT{minutes}M"),
    };
    ics_event.add_alarm(Alarm::display(
        Trigger::new(trigger),
        Description::new(escape_text(format!("Reminder: {}", event.title))),
    ));

    ics_event
}

fn local(time: NaiveDateTime) -> String {
    time.format("%Y%m%dT%H%M%S").to_string()
}

/// Splits a content line into physical lines of at most [`MAX_LINE_OCTETS`],
/// never inside a UTF-8 sequence. Continuations start with a single space.
pub fn fold_line(line: &str) -> String {
    let mut folded = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut rest = line;
    let mut limit = MAX_LINE_OCTETS;

    while rest.len() > limit {
        let mut cut = limit;
        while !rest.is_char_boundary(cut) {
            cut -= 1;
        }

        folded.push_str(&rest[..cut]);
        folded.push_str("\r\n ");
        rest = &rest[cut..];
        // the leading space counts against the limit
        limit = MAX_LINE_OCTETS - 1;
    }

    folded.push_str(rest);
    folded
}

/// Joins folded continuation lines back into logical content lines.
pub fn unfold(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();

    for physical in text.lines() {
        match (physical.strip_prefix([' ', '\t']), lines.last_mut()) {
            (Some(continuation), Some(last)) => last.push_str(continuation),
            _ => lines.push(physical.to_string()),
        }
    }

    lines
}

fn fold_document(text: &str) -> String {
    unfold(text)
        .iter()
        .filter(|line| !line.is_empty())
        .map(|line| fold_line(line) + "\r\n")
        .collect()
}
