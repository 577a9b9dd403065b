// SPDX-License-Identifier: MIT

//! Indian public-holiday lookups, answered entirely from a local calendar.
//!
//! Free text is classified into a closed set of intents by a single
//! function and dispatched with an exhaustive match. Only date-bearing
//! queries go through the tolerant date parser; every other intent is
//! answered without parsing.

use crate::concierge::format::format_date;
use crate::contract::error::LookupError;
use crate::contract::tool::Tool;
use async_trait::async_trait;
use chrono::{Datelike, Duration, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;

const UPCOMING_COUNT: usize = 5;

// Fixed-date gazetted holidays. Movable festivals need an external dataset,
// which this capability deliberately avoids.
const FIXED_HOLIDAYS: &[(u32, u32, &str)] = &[
    (1, 26, "Republic Day"),
    (4, 14, "Ambedkar Jayanti"),
    (8, 15, "Independence Day"),
    (10, 2, "Gandhi Jayanti"),
    (12, 25, "Christmas Day"),
];

// --- Intent classification ---

/// The closed set of holiday-lookup intents.
#[derive(Debug, PartialEq, Eq)]
pub enum HolidayQuery {
    Today,
    Tomorrow,
    ThisMonth,
    OnDate(NaiveDate),
    Upcoming,
}

/// Classify a free-text question. Mutually exclusive and exhaustive: the
/// first matching branch wins, and anything without a recognizable cue
/// falls through to the upcoming-holidays listing.
pub fn classify(text: &str, today: NaiveDate) -> Result<HolidayQuery, LookupError> {
    let lowered = text.to_lowercase();
    if lowered.contains("today") {
        Ok(HolidayQuery::Today)
    } else if lowered.contains("tomorrow") {
        Ok(HolidayQuery::Tomorrow)
    } else if lowered.contains("this month") {
        Ok(HolidayQuery::ThisMonth)
    } else if text.chars().any(|c| c.is_ascii_digit()) {
        match parse_fuzzy_date(text, today) {
            Some(date) => Ok(HolidayQuery::OnDate(date)),
            None => Err(LookupError::invalid_input(
                "I couldn't understand that date. Please rephrase it.",
            )),
        }
    } else {
        Ok(HolidayQuery::Upcoming)
    }
}

// --- Tolerant date parsing ---

static DMY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})[/-](\d{1,2})[/-](\d{4})").expect("dmy pattern is valid"));
static YMD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})-(\d{1,2})-(\d{1,2})").expect("ymd pattern is valid"));
static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]+|\d+").expect("token pattern is valid"));

/// Pull a calendar date out of a sentence. Handles `26/01/2026`,
/// `2026-01-26`, and month-name forms like "15 August 2026" or
/// "the 2nd of October" (year defaults to `today`'s).
pub fn parse_fuzzy_date(text: &str, today: NaiveDate) -> Option<NaiveDate> {
    if let Some(caps) = YMD_RE.captures(text) {
        return NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        );
    }
    if let Some(caps) = DMY_RE.captures(text) {
        return NaiveDate::from_ymd_opt(
            caps[3].parse().ok()?,
            caps[2].parse().ok()?,
            caps[1].parse().ok()?,
        );
    }

    let mut day: Option<u32> = None;
    let mut month: Option<u32> = None;
    let mut year: Option<i32> = None;
    for token in TOKEN_RE.find_iter(text) {
        let token = token.as_str();
        if let Ok(number) = token.parse::<u32>() {
            if token.len() == 4 {
                year = year.or(Some(number as i32));
            } else if (1..=31).contains(&number) {
                day = day.or(Some(number));
            }
        } else if let Some(m) = month_from_name(token) {
            month = month.or(Some(m));
        }
    }

    NaiveDate::from_ymd_opt(year.unwrap_or(today.year()), month?, day?)
}

fn month_from_name(word: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let lowered = word.to_lowercase();
    let prefix = lowered.get(..3)?;
    MONTHS.iter().position(|m| *m == prefix).map(|i| i as u32 + 1)
}

// --- Local calendar ---

pub struct HolidayCalendar {
    entries: BTreeMap<NaiveDate, &'static str>,
}

impl HolidayCalendar {
    /// Calendar covering `first_year` and the following `years - 1` years.
    pub fn covering(first_year: i32, years: i32) -> Self {
        let mut entries = BTreeMap::new();
        for year in first_year..first_year + years {
            for &(month, day, name) in FIXED_HOLIDAYS {
                if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                    entries.insert(date, name);
                }
            }
        }
        Self { entries }
    }

    pub fn name_on(&self, date: NaiveDate) -> Option<&'static str> {
        self.entries.get(&date).copied()
    }

    /// Remaining holidays in `today`'s month, from `today` onward.
    pub fn remaining_this_month(&self, today: NaiveDate) -> Vec<(NaiveDate, &'static str)> {
        self.entries
            .range(today..)
            .filter(|(date, _)| date.month() == today.month() && date.year() == today.year())
            .map(|(&date, &name)| (date, name))
            .collect()
    }

    /// The next `count` holidays on or after `today`, sorted by date.
    pub fn upcoming(&self, today: NaiveDate, count: usize) -> Vec<(NaiveDate, &'static str)> {
        self.entries
            .range(today..)
            .take(count)
            .map(|(&date, &name)| (date, name))
            .collect()
    }
}

// --- Rendering ---

pub fn answer(calendar: &HolidayCalendar, query: HolidayQuery, today: NaiveDate) -> String {
    match query {
        HolidayQuery::Today => match calendar.name_on(today) {
            Some(name) => format!("Today is a holiday: {name}."),
            None => "Today is not a public holiday in India.".to_string(),
        },
        HolidayQuery::Tomorrow => {
            let tomorrow = today + Duration::days(1);
            match calendar.name_on(tomorrow) {
                Some(name) => format!("Tomorrow is a holiday: {name}."),
                None => "Tomorrow is not a public holiday in India.".to_string(),
            }
        }
        HolidayQuery::ThisMonth => {
            let remaining = calendar.remaining_this_month(today);
            if remaining.is_empty() {
                "No holidays remaining this month in India.".to_string()
            } else {
                format!("Holidays this month:\n{}", render_listing(&remaining))
            }
        }
        HolidayQuery::OnDate(date) => match calendar.name_on(date) {
            Some(name) => format!("{} is a holiday: {name}.", format_date(date)),
            None => format!("{} is not a public holiday in India.", format_date(date)),
        },
        HolidayQuery::Upcoming => {
            let upcoming = calendar.upcoming(today, UPCOMING_COUNT);
            format!(
                "Next {} public holidays in India:\n{}",
                upcoming.len(),
                render_listing(&upcoming)
            )
        }
    }
}

fn render_listing(entries: &[(NaiveDate, &'static str)]) -> String {
    entries
        .iter()
        .map(|(date, name)| format!("{}: {}", format_date(*date), name))
        .collect::<Vec<_>>()
        .join("\n")
}

// --- Tool ---

static HOLIDAY_SCHEMA: Lazy<Value> = Lazy::new(|| {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "Question like 'is today a holiday' or 'is 15 August a holiday'"
            }
        },
        "required": ["query"]
    })
});

#[derive(Debug, Deserialize)]
struct HolidayArgs {
    query: String,
}

pub struct HolidayLookupTool;

#[async_trait]
impl Tool for HolidayLookupTool {
    fn name(&self) -> &str {
        "holiday_lookup"
    }

    fn description(&self) -> &str {
        "Checks whether a date is a public holiday in India, or lists upcoming Indian holidays."
    }

    fn schema(&self) -> &Value {
        &HOLIDAY_SCHEMA
    }

    async fn call(&self, input: Value) -> Result<String, LookupError> {
        let args: HolidayArgs = serde_json::from_value(input)?;
        let today = Local::now().date_naive();
        let calendar = HolidayCalendar::covering(today.year(), 2);
        let query = classify(&args.query, today)?;
        Ok(answer(&calendar, query, today))
    }
}
