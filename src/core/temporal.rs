use crate::domain::model::GameTimes;
use chrono::{DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use regex::Regex;
use std::sync::LazyLock;

pub const GAME_DURATION_HOURS: i64 = 3;

const PARSE_FORMATS: &[&str] = &["%A, %B %d, %Y %I:%M %p", "%B %d, %Y %I:%M %p"];

static HAS_YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\d{4}\b").expect("year pattern"));

/// Zone the source renders times in for the scraping host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerZone {
    HostLocal,
    Named(Tz),
}

impl ViewerZone {
    fn localize(&self, naive: &NaiveDateTime, target: Tz) -> Option<DateTime<Tz>> {
        match self {
            ViewerZone::HostLocal => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&target)),
            ViewerZone::Named(tz) => tz
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&target)),
        }
    }
}

/// Run-wide inputs captured once so every record sees the same clock.
#[derive(Debug, Clone, Copy)]
pub struct TemporalContext {
    pub reference_year: i32,
    pub run_date: NaiveDate,
    pub viewer: ViewerZone,
}

impl TemporalContext {
    pub fn for_today(viewer: ViewerZone, reference_year: Option<i32>) -> Self {
        let today = Local::now().date_naive();
        Self {
            reference_year: reference_year.unwrap_or_else(|| today.year()),
            run_date: today,
            viewer,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub times: GameTimes,
    /// Set when a real time was present but could not be turned into an
    /// instant. TBD / missing times are not failures.
    pub failure: Option<String>,
}

/// Appends `, <year>` unless the date already carries a 4-digit year.
pub fn with_year(date_text: &str, year: i32) -> String {
    let date_text = date_text.trim();
    if HAS_YEAR.is_match(date_text) {
        date_text.to_string()
    } else {
        format!("{}, {}", date_text, year)
    }
}

pub fn parse_naive(date_text: &str, time_text: &str, year: i32) -> Option<NaiveDateTime> {
    let combined = format!("{} {}", with_year(date_text, year), time_text.trim());
    PARSE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&combined, format).ok())
}

/// Weekend games stop being displayed on the Friday before.
pub fn display_end(start: Option<&DateTime<Tz>>) -> Option<NaiveDate> {
    let start = start?;
    let date = start.date_naive();
    let weekday = i64::from(start.weekday().num_days_from_monday());
    if weekday < 5 {
        Some(date)
    } else {
        Some(date - Duration::days(weekday - 4))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TemporalNormalizer {
    context: TemporalContext,
}

impl TemporalNormalizer {
    pub fn new(context: TemporalContext) -> Self {
        Self { context }
    }

    pub fn context(&self) -> &TemporalContext {
        &self.context
    }

    pub fn normalize(&self, date_text: &str, time_text: Option<&str>, home_tz: Tz) -> Normalized {
        let mut failure = None;

        let start = match time_text.map(str::trim) {
            None => None,
            Some(t) if t.is_empty() || t.eq_ignore_ascii_case("TBD") => None,
            Some(t) => {
                let instant = parse_naive(date_text, t, self.context.reference_year)
                    .and_then(|naive| self.context.viewer.localize(&naive, home_tz));
                if instant.is_none() {
                    failure = Some(format!("{} {}", date_text, t));
                }
                instant
            }
        };

        let end = start.map(|dt| dt + Duration::hours(GAME_DURATION_HOURS));

        Normalized {
            times: GameTimes {
                start,
                end,
                display_start: self.context.run_date,
                display_end: display_end(start.as_ref()),
            },
            failure,
        }
    }
}
