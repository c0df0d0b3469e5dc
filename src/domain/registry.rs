use crate::utils::error::Result;
use crate::utils::validation::validate_timezone;
use chrono_tz::Tz;
use std::collections::HashMap;

/// Team, venue and timezone lookups for one league.
///
/// Every `resolve_*` call is total: an unmapped team token passes through
/// unchanged, an unmapped venue is `""` and an unmapped timezone is UTC.
/// The `Option`-returning lookups let callers record the miss.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    aliases: HashMap<String, String>,
    venues: HashMap<String, String>,
    timezones: HashMap<String, Tz>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn team_alias(&self, token: &str) -> Option<&str> {
        self.aliases.get(token.trim()).map(String::as_str)
    }

    pub fn venue(&self, canonical_name: &str) -> Option<&str> {
        self.venues.get(canonical_name).map(String::as_str)
    }

    pub fn timezone(&self, canonical_name: &str) -> Option<Tz> {
        self.timezones.get(canonical_name).copied()
    }

    pub fn resolve_team<'a>(&'a self, token: &'a str) -> &'a str {
        self.team_alias(token).unwrap_or_else(|| token.trim())
    }

    pub fn resolve_venue(&self, canonical_name: &str) -> &str {
        self.venue(canonical_name).unwrap_or("")
    }

    pub fn resolve_timezone(&self, canonical_name: &str) -> Tz {
        self.timezone(canonical_name).unwrap_or(Tz::UTC)
    }

    pub fn team_count(&self) -> usize {
        self.venues.len().max(self.timezones.len())
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    aliases: HashMap<String, String>,
    venues: HashMap<String, String>,
    timezones: HashMap<String, String>,
}

impl RegistryBuilder {
    pub fn aliases<'a>(mut self, entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        for (alias, canonical) in entries {
            self.aliases.insert(alias.to_string(), canonical.to_string());
        }
        self
    }

    pub fn venues<'a>(mut self, entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        for (canonical, venue) in entries {
            self.venues.insert(canonical.to_string(), venue.to_string());
        }
        self
    }

    pub fn timezones<'a>(mut self, entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        for (canonical, tz_id) in entries {
            self.timezones.insert(canonical.to_string(), tz_id.to_string());
        }
        self
    }

    /// Timezone ids are checked here so a bad table fails before any fetch.
    pub fn build(self) -> Result<Registry> {
        let mut timezones = HashMap::with_capacity(self.timezones.len());
        for (canonical, tz_id) in self.timezones {
            let tz = validate_timezone(&format!("registry.timezones.{}", canonical), &tz_id)?;
            timezones.insert(canonical, tz);
        }

        Ok(Registry {
            aliases: self.aliases,
            venues: self.venues,
            timezones,
        })
    }
}
