//! Built-in league bundles: source layout, URL template, completeness
//! threshold and the registry tables. Everything here can be overridden from
//! the TOML configuration.

mod mlb;
mod nba;
mod nhl;
mod wnba;

use crate::domain::registry::Registry;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};

/// Layout of the schedule source, which decides how units are planned and
/// which parser reads the pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceShape {
    /// One page per team listing the full season (`{team}`, `{year}`).
    TeamSeason,
    /// One page per week of dated tables (`{date}` as YYYYMMDD).
    DatedTables,
}

#[derive(Debug)]
pub struct LeagueProfile {
    pub key: &'static str,
    pub label: &'static str,
    pub shape: SourceShape,
    pub url_template: &'static str,
    pub team_codes: &'static [&'static str],
    pub completeness_threshold: usize,
    pub aliases: &'static [(&'static str, &'static str)],
    pub venues: &'static [(&'static str, &'static str)],
    pub timezones: &'static [(&'static str, &'static str)],
}

pub static LEAGUES: &[&LeagueProfile] = &[&mlb::MLB, &nba::NBA, &wnba::WNBA, &nhl::NHL];

pub fn builtin(selector: &str) -> Option<&'static LeagueProfile> {
    let selector = selector.trim();
    LEAGUES
        .iter()
        .copied()
        .find(|league| league.key.eq_ignore_ascii_case(selector))
}

pub fn known_selectors() -> Vec<&'static str> {
    LEAGUES.iter().map(|league| league.key).collect()
}

impl LeagueProfile {
    pub fn registry(&self) -> Result<Registry> {
        Registry::builder()
            .aliases(self.aliases.iter().copied())
            .venues(self.venues.iter().copied())
            .timezones(self.timezones.iter().copied())
            .build()
    }
}

/// A league ready to run: a built-in profile with configuration overrides
/// applied and the registry built.
#[derive(Debug, Clone)]
pub struct LeagueConfig {
    pub key: String,
    pub label: String,
    pub shape: SourceShape,
    pub url_template: String,
    pub team_codes: Vec<String>,
    pub completeness_threshold: usize,
    pub registry: Registry,
}

impl LeagueConfig {
    pub fn from_profile(profile: &LeagueProfile) -> Result<Self> {
        Ok(Self {
            key: profile.key.to_string(),
            label: profile.label.to_string(),
            shape: profile.shape,
            url_template: profile.url_template.to_string(),
            team_codes: profile.team_codes.iter().map(|c| c.to_string()).collect(),
            completeness_threshold: profile.completeness_threshold,
            registry: profile.registry()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_lookup_is_case_insensitive() {
        assert_eq!(builtin("MLB").map(|l| l.key), Some("mlb"));
        assert_eq!(builtin(" wnba ").map(|l| l.label), Some("WNBA"));
        assert!(builtin("xfl").is_none());
    }

    #[test]
    fn test_every_league_maps_each_team_to_venue_and_timezone() {
        for league in LEAGUES {
            let venues: HashSet<&str> = league.venues.iter().map(|(team, _)| *team).collect();
            let zones: HashSet<&str> = league.timezones.iter().map(|(team, _)| *team).collect();

            for (_, canonical) in league.aliases {
                assert!(venues.contains(canonical), "{}: no venue for {}", league.key, canonical);
                assert!(zones.contains(canonical), "{}: no timezone for {}", league.key, canonical);
            }
            for (team, tz_id) in league.timezones {
                assert!(
                    tz_id.parse::<chrono_tz::Tz>().is_ok(),
                    "{}: bad timezone {} for {}",
                    league.key,
                    tz_id,
                    team
                );
            }
        }
    }

    #[test]
    fn test_every_profile_builds_a_registry() {
        for league in LEAGUES {
            let config = LeagueConfig::from_profile(league).unwrap();
            assert_eq!(config.registry.team_count(), league.venues.len());
        }
    }

    #[test]
    fn test_canonical_names_are_unique_per_league() {
        for league in LEAGUES {
            let mut seen = HashSet::new();
            for (team, _) in league.venues {
                assert!(seen.insert(*team), "{}: duplicate team {}", league.key, team);
            }
        }
    }
}
