use chrono::{DateTime, NaiveDate};
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// 一個抓取單位：單一頁面，或單一球隊的整季賽程
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkUnit {
    pub label: String,
    pub url: String,
}

impl WorkUnit {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }
}

/// Raw record handed over by a page parser. Sources either give a free-text
/// matchup (`"LAD vs SF on 06/01/2025"`) or home/away already split by column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceRow {
    pub matchup: Option<String>,
    pub home: Option<String>,
    pub away: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub promo: Option<String>,
}

impl SourceRow {
    pub fn from_matchup(matchup: impl Into<String>) -> Self {
        Self {
            matchup: Some(matchup.into()),
            ..Self::default()
        }
    }

    pub fn from_columns(home: impl Into<String>, away: impl Into<String>) -> Self {
        Self {
            home: Some(home.into()),
            away: Some(away.into()),
            ..Self::default()
        }
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    pub fn with_promo(mut self, promo: impl Into<String>) -> Self {
        self.promo = Some(promo.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawGame {
    pub home_token: String,
    pub away_token: String,
    pub raw_date_text: String,
    pub raw_time_text: Option<String>,
    pub promo_text: Option<String>,
}

/// Normalizer output. `start`/`end` are expressed in the home team's zone.
#[derive(Debug, Clone, PartialEq)]
pub struct GameTimes {
    pub start: Option<DateTime<Tz>>,
    pub end: Option<DateTime<Tz>>,
    pub display_start: NaiveDate,
    pub display_end: Option<NaiveDate>,
}

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone)]
pub struct GameRecord {
    pub home_team: String,
    pub away_team: String,
    pub name: String,
    pub description: Option<String>,
    pub times: GameTimes,
    pub venue: String,
    pub promo: Option<String>,
    pub template_fields: Arc<BTreeMap<String, String>>,
}

impl GameRecord {
    /// 依欄位名稱取得輸出值；未知欄位回傳 None
    pub fn field(&self, column: &str) -> Option<String> {
        match column {
            "Name" => Some(self.name.clone()),
            "Description" => self.description.clone(),
            "Start Date" => self.times.start.map(|dt| dt.format(DATETIME_FORMAT).to_string()),
            "End Date" => self.times.end.map(|dt| dt.format(DATETIME_FORMAT).to_string()),
            "Display Start Date" => Some(self.times.display_start.format(DATE_FORMAT).to_string()),
            "Display End Date" => self.times.display_end.map(|d| d.format(DATE_FORMAT).to_string()),
            "Venue" => Some(self.venue.clone()),
            other => self.template_fields.get(other).cloned(),
        }
    }
}

/// Records sharing one home team, in extraction order.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    pub key: String,
    pub records: Vec<&'a GameRecord>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct UnitSummary {
    pub label: String,
    pub attempts: u32,
    pub observed: usize,
    pub games: usize,
    pub complete: bool,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportSummary {
    pub workbook_path: String,
    pub combined_csv_path: Option<String>,
    pub template_artifacts: Vec<String>,
    pub failed_partitions: Vec<String>,
    pub partitions: usize,
    pub records: usize,
}
