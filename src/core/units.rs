use crate::domain::model::WorkUnit;
use crate::leagues::{LeagueConfig, SourceShape};
use crate::utils::error::{EtlError, Result};
use chrono::{Duration, NaiveDate};

pub const WEEK_STEP_DAYS: i64 = 7;

/// 賽程範圍：整季（依球隊）或日期區間（依週）
#[derive(Debug, Clone, Copy, Default)]
pub struct RunWindow {
    pub season_year: i32,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// 將聯盟設定展開為抓取單位
pub fn plan_units(league: &LeagueConfig, window: &RunWindow) -> Result<Vec<WorkUnit>> {
    match league.shape {
        SourceShape::TeamSeason => {
            if league.team_codes.is_empty() {
                return Err(EtlError::MissingConfigError {
                    field: "source.team_codes".to_string(),
                });
            }
            let year = window.season_year.to_string();
            Ok(league
                .team_codes
                .iter()
                .map(|code| {
                    let url = league.url_template.replace("{team}", code).replace("{year}", &year);
                    WorkUnit::new(code.clone(), url)
                })
                .collect())
        }
        SourceShape::DatedTables => {
            let start = window.start_date.ok_or_else(|| EtlError::MissingConfigError {
                field: "source.start_date".to_string(),
            })?;
            let end = window.end_date.ok_or_else(|| EtlError::MissingConfigError {
                field: "source.end_date".to_string(),
            })?;
            if end < start {
                return Err(EtlError::ConfigValidationError {
                    field: "source.end_date".to_string(),
                    message: format!("{} is before start date {}", end, start),
                });
            }

            let mut units = Vec::new();
            let mut current = start;
            while current <= end {
                let stamp = current.format("%Y%m%d").to_string();
                units.push(WorkUnit::new(
                    stamp.clone(),
                    league.url_template.replace("{date}", &stamp),
                ));
                current += Duration::days(WEEK_STEP_DAYS);
            }
            Ok(units)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leagues::builtin;

    #[test]
    fn test_team_season_units_fill_team_and_year() {
        let league = LeagueConfig::from_profile(builtin("mlb").unwrap()).unwrap();
        let window = RunWindow {
            season_year: 2026,
            ..Default::default()
        };

        let units = plan_units(&league, &window).unwrap();

        assert_eq!(units.len(), 30);
        let dodgers = units.iter().find(|u| u.label == "dodgers").unwrap();
        assert_eq!(dodgers.url, "https://www.mlb.com/dodgers/schedule/2026/fullseason");
    }

    #[test]
    fn test_dated_units_step_weekly_inclusive() {
        let league = LeagueConfig::from_profile(builtin("wnba").unwrap()).unwrap();
        let window = RunWindow {
            season_year: 2025,
            start_date: NaiveDate::from_ymd_opt(2025, 5, 15),
            end_date: NaiveDate::from_ymd_opt(2025, 5, 29),
        };

        let units = plan_units(&league, &window).unwrap();

        let labels: Vec<&str> = units.iter().map(|u| u.label.as_str()).collect();
        assert_eq!(labels, vec!["20250515", "20250522", "20250529"]);
        assert_eq!(units[0].url, "https://www.espn.com/wnba/schedule/_/date/20250515");
    }

    #[test]
    fn test_dated_units_need_a_window() {
        let league = LeagueConfig::from_profile(builtin("nhl").unwrap()).unwrap();
        let missing = plan_units(&league, &RunWindow::default());
        assert!(matches!(missing, Err(EtlError::MissingConfigError { .. })));

        let reversed = RunWindow {
            season_year: 2025,
            start_date: NaiveDate::from_ymd_opt(2025, 6, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 5, 1),
        };
        assert!(plan_units(&league, &reversed).is_err());
    }
}
