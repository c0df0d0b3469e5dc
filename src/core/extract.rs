use crate::domain::model::{RawGame, SourceRow};
use regex::Regex;
use std::sync::LazyLock;

static SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+vs\.?\s+").expect("separator pattern"));

static TIME_OF_DAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2}:\d{2})\s*([ap])\.?\s*m\b").expect("time pattern"));

/// Result of looking at one source row. Discards are ordinary values: they
/// happen constantly (away games, header rows) and never stop a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Game(RawGame),
    Discard(String),
}

impl Extraction {
    pub fn game(self) -> Option<RawGame> {
        match self {
            Extraction::Game(game) => Some(game),
            Extraction::Discard(_) => None,
        }
    }
}

/// Splits `"<Home> vs <Away> on <date>"` into the two team tokens.
pub fn split_matchup(matchup: &str) -> Result<(String, String), String> {
    if matchup.contains('@') {
        return Err(format!("away game from the home team's view: {}", matchup));
    }

    let teams_part = matchup.split(" on ").next().unwrap_or_default();
    if !SEPARATOR.is_match(teams_part) {
        return Err(format!("no 'vs' separator: {}", matchup));
    }

    let teams: Vec<&str> = SEPARATOR
        .split(teams_part)
        .map(str::trim)
        .collect();
    match teams.as_slice() {
        [home, away] if !home.is_empty() && !away.is_empty() => {
            if home.eq_ignore_ascii_case(away) {
                Err(format!("team plays itself: {}", matchup))
            } else {
                Ok((home.to_string(), away.to_string()))
            }
        }
        _ => Err(format!(
            "expected 2 teams, found {}: {}",
            teams.iter().filter(|t| !t.is_empty()).count(),
            matchup
        )),
    }
}

/// Pulls the first `H:MM AM/PM` out of the time cell and normalizes it to
/// `"7:05 PM"`. Anything else (TBD, live scores, blanks) yields None.
pub fn extract_time(raw: &str) -> Option<String> {
    TIME_OF_DAY.captures(raw).map(|caps| {
        format!("{} {}M", &caps[1], caps[2].to_ascii_uppercase())
    })
}

fn clean(text: Option<&String>) -> Option<String> {
    text.map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|t| !t.is_empty())
}

#[derive(Debug, Default, Clone, Copy)]
pub struct RowExtractor;

impl RowExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, row: &SourceRow) -> Extraction {
        let teams = if let Some(matchup) = clean(row.matchup.as_ref()) {
            split_matchup(&matchup)
        } else if let (Some(home), Some(away)) = (clean(row.home.as_ref()), clean(row.away.as_ref())) {
            // dated tables mark the home side as "@ Home"
            let home = home.replace('@', "").trim().to_string();
            let away = away.trim().to_string();
            if home.is_empty() || away.is_empty() {
                Err("empty team column".to_string())
            } else {
                Ok((home, away))
            }
        } else {
            Err("no matchup in row".to_string())
        };

        let (home_token, away_token) = match teams {
            Ok(teams) => teams,
            Err(reason) => return Extraction::Discard(reason),
        };

        Extraction::Game(RawGame {
            home_token,
            away_token,
            raw_date_text: clean(row.date.as_ref()).unwrap_or_default(),
            raw_time_text: row.time.as_deref().and_then(extract_time),
            promo_text: clean(row.promo.as_ref()),
        })
    }
}
