// SPDX-License-Identifier: MIT

//! Shared display conventions for dates, durations and place names.

use chrono::NaiveDate;

/// All dates render as `DD Mon YYYY`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Minutes-based duration fields render as "H hrs M mins".
pub fn format_duration_mins(minutes: i64) -> String {
    format!("{} hrs {} mins", minutes / 60, minutes % 60)
}

/// Capitalize each whitespace-separated word, for city names echoed back
/// to the user.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
