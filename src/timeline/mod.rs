//! Narrative timeline ordering and filtering.
//!
//! Event dates are free text. [`EventDate::parse`] recognises ISO calendar dates and bare years,
//! which is enough to put most campaign timelines in order; anything else is undated and
//! keeps its authored position after the dated events.

use chrono::NaiveDate;

use crate::models::TimelineEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventDate {
    Dated(NaiveDate),
    Undated,
}

impl EventDate {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return EventDate::Dated(date);
        }

        first_integer(raw)
            .and_then(|year| NaiveDate::from_ymd_opt(year, 1, 1))
            .map_or(EventDate::Undated, EventDate::Dated)
    }

    pub fn date(self) -> Option<NaiveDate> {
        match self {
            EventDate::Dated(date) => Some(date),
            EventDate::Undated => None,
        }
    }
}

fn first_integer(text: &str) -> Option<i32> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits: String = text[start..].chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimelineOrder {
    #[default]
    Chronological,
    Reverse,
}

/// Narrowing applied before ordering; empty criteria match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimelineFilter {
    /// Case-insensitive substring of title or description
    pub text: Option<String>,
    /// Case-insensitive exact tag
    pub tag: Option<String>,
}

impl TimelineFilter {
    pub fn matches(&self, event: &TimelineEvent) -> bool {
        if let Some(text) = self.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            let needle = text.to_lowercase();
            let hit = event.title.to_lowercase().contains(&needle)
                || event.description.to_lowercase().contains(&needle);
            if !hit {
                return false;
            }
        }

        if let Some(tag) = self.tag.as_deref().map(str::trim).filter(|t| !t.is_empty())
            && !event.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
        {
            return false;
        }

        true
    }
}

/// Filter then order `events`. Dated events sort by date (stable, so equal dates keep their
/// authored order); undated events follow in authored order regardless of direction.
pub fn arrange_timeline<'a>(
    events: &'a [TimelineEvent],
    filter: &TimelineFilter,
    order: TimelineOrder,
) -> Vec<&'a TimelineEvent> {
    let (mut dated, undated): (Vec<_>, Vec<_>) = events
        .iter()
        .filter(|event| filter.matches(event))
        .map(|event| (EventDate::parse(&event.date), event))
        .partition(|(date, _)| *date != EventDate::Undated);

    match order {
        TimelineOrder::Chronological => dated.sort_by_key(|(date, _)| *date),
        TimelineOrder::Reverse => dated.sort_by(|(a, _), (b, _)| b.cmp(a)),
    }

    dated.into_iter().chain(undated).map(|(_, event)| event).collect()
}
