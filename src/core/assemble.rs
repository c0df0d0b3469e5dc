use crate::domain::model::{GameRecord, GameTimes, RawGame};
use crate::domain::registry::Registry;
use crate::domain::report::{LookupKind, RunReport, SoftError};
use chrono_tz::Tz;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Downstream template layout, in order.
pub const CANONICAL_COLUMNS: [&str; 49] = [
    "Name",
    "Description",
    "Start Date",
    "End Date",
    "Multiple Dates or Times",
    "Event Category",
    "Age Range",
    "Owner",
    "Fulfillment Method",
    "Fulfillment Type",
    "Fulfillment Date",
    "Enforce Quantity Limit",
    "Maximum Tickets",
    "Split Groups",
    "Volunteer Event",
    "Volunteers Assigned",
    "Ticket Delivery Method",
    "Ticket Instructions",
    "Ticket Instruction Details",
    "Display On Web",
    "Display Delivery Method",
    "Allow Date Selection",
    "Allow Time Selection",
    "Display Start Date",
    "Display End Date",
    "More Information Title",
    "More Information Url",
    "Web URL",
    "Venue",
    "Address Line 1",
    "Address Line 2",
    "Address Line 3",
    "City",
    "State or Province",
    "Postal Code",
    "County",
    "Market",
    "Metro Area",
    "Country",
    "Contact Name",
    "Contact Email",
    "Contact Phone",
    "TFK Area",
    "TFK Market",
    "TFK Region",
    "Total Requested",
    "Total Distributed",
    "Total Donated",
    "Total Remaining",
];

/// Columns filled per record rather than from the constant template values.
pub const COMPUTED_COLUMNS: [&str; 7] = [
    "Name",
    "Description",
    "Start Date",
    "End Date",
    "Display Start Date",
    "Display End Date",
    "Venue",
];

const NON_EMPTY_DEFAULTS: [(&str, &str); 10] = [
    ("Multiple Dates or Times", "No"),
    ("Event Category", "Sports"),
    ("Age Range", "All"),
    ("Owner", "Coates, Anita"),
    ("Fulfillment Method", "Manual"),
    ("Enforce Quantity Limit", "No"),
    ("Display On Web", "No"),
    ("Display Delivery Method", "No"),
    ("Allow Date Selection", "No"),
    ("Allow Time Selection", "No"),
];

/// Constant values shared by every record of a run. Everything that is not
/// computed per record starts out empty unless listed above.
pub fn default_template_fields() -> BTreeMap<String, String> {
    let mut fields: BTreeMap<String, String> = CANONICAL_COLUMNS
        .iter()
        .filter(|column| !COMPUTED_COLUMNS.contains(*column))
        .map(|column| (column.to_string(), String::new()))
        .collect();
    for (column, value) in NON_EMPTY_DEFAULTS {
        fields.insert(column.to_string(), value.to_string());
    }
    fields
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    columns: Vec<String>,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::new(CANONICAL_COLUMNS.iter().map(|c| c.to_string()).collect())
    }
}

impl ColumnLayout {
    pub fn new(columns: Vec<String>) -> Self {
        Self { columns }
    }

    pub fn header(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Fields outside the layout are dropped; layout columns without a value
    /// become empty cells.
    pub fn row_for(&self, record: &GameRecord) -> Vec<String> {
        self.columns
            .iter()
            .map(|column| record.field(column).unwrap_or_default())
            .collect()
    }
}

/// Canonical names and lookups for one game, ahead of normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGame {
    pub home_team: String,
    pub away_team: String,
    pub venue: String,
    pub timezone: Tz,
}

pub struct RecordAssembler<'a> {
    registry: &'a Registry,
    template_fields: Arc<BTreeMap<String, String>>,
}

impl<'a> RecordAssembler<'a> {
    pub fn new(registry: &'a Registry, template_fields: BTreeMap<String, String>) -> Self {
        Self {
            registry,
            template_fields: Arc::new(template_fields),
        }
    }

    fn resolve_team(&self, token: &str, report: &mut RunReport) -> String {
        let canonical = self.registry.resolve_team(token);
        let known = self.registry.team_alias(token).is_some()
            || self.registry.venue(canonical).is_some()
            || self.registry.timezone(canonical).is_some();
        if !known {
            report.push(SoftError::ResolutionMiss {
                kind: LookupKind::Team,
                key: canonical.to_string(),
            });
        }
        canonical.to_string()
    }

    /// Registry lookups never fail; each miss is recorded and the fallback used.
    pub fn resolve(&self, game: &RawGame, report: &mut RunReport) -> ResolvedGame {
        let home_team = self.resolve_team(&game.home_token, report);
        let away_team = self.resolve_team(&game.away_token, report);

        if self.registry.venue(&home_team).is_none() {
            report.push(SoftError::ResolutionMiss {
                kind: LookupKind::Venue,
                key: home_team.clone(),
            });
        }
        if self.registry.timezone(&home_team).is_none() {
            report.push(SoftError::ResolutionMiss {
                kind: LookupKind::Timezone,
                key: home_team.clone(),
            });
        }

        ResolvedGame {
            venue: self.registry.resolve_venue(&home_team).to_string(),
            timezone: self.registry.resolve_timezone(&home_team),
            home_team,
            away_team,
        }
    }

    pub fn finalize(
        &self,
        resolved: ResolvedGame,
        times: GameTimes,
        description: Option<String>,
        promo: Option<String>,
    ) -> GameRecord {
        GameRecord {
            name: format!("{} vs. {}", resolved.home_team, resolved.away_team),
            home_team: resolved.home_team,
            away_team: resolved.away_team,
            description,
            times,
            venue: resolved.venue,
            promo,
            template_fields: Arc::clone(&self.template_fields),
        }
    }
}
