use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LookupKind {
    Team,
    Venue,
    Timezone,
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupKind::Team => write!(f, "team"),
            LookupKind::Venue => write!(f, "venue"),
            LookupKind::Timezone => write!(f, "timezone"),
        }
    }
}

/// Degraded-but-present outcomes. None of these stop a run.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SoftError {
    #[error("[{unit}] row discarded: {reason}")]
    ExtractionDiscard { unit: String, reason: String },

    #[error("no {kind} mapping for '{key}'")]
    ResolutionMiss { kind: LookupKind, key: String },

    #[error("could not parse start time for {game} from '{input}'")]
    TemporalParseFailure { game: String, input: String },

    #[error("[{unit}] incomplete after {attempts} attempts ({observed}/{expected} rows): {reason}")]
    FetchValidationExhausted {
        unit: String,
        attempts: u32,
        observed: usize,
        expected: usize,
        reason: String,
    },

    #[error("export for partition '{partition}' failed: {message}")]
    SinkWriteFailure { partition: String, message: String },
}

/// Run-level warning ledger carried from extract through load.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    warnings: Vec<SoftError>,
}

impl RunReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, warning: SoftError) {
        tracing::debug!("⚠️ {}", warning);
        self.warnings.push(warning);
    }

    pub fn extend(&mut self, warnings: impl IntoIterator<Item = SoftError>) {
        for warning in warnings {
            self.push(warning);
        }
    }

    pub fn warnings(&self) -> &[SoftError] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn incomplete_units(&self) -> Vec<&str> {
        self.warnings
            .iter()
            .filter_map(|w| match w {
                SoftError::FetchValidationExhausted { unit, .. } => Some(unit.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn failed_partitions(&self) -> Vec<&str> {
        self.warnings
            .iter()
            .filter_map(|w| match w {
                SoftError::SinkWriteFailure { partition, .. } => Some(partition.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn discard_count(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, SoftError::ExtractionDiscard { .. }))
            .count()
    }

    /// Unmapped keys are reported once each, however many rows hit them.
    pub fn resolution_misses(&self) -> Vec<(LookupKind, &str)> {
        let mut misses: Vec<(LookupKind, &str)> = Vec::new();
        for w in &self.warnings {
            if let SoftError::ResolutionMiss { kind, key } = w {
                if !misses.iter().any(|(k, existing)| k == kind && *existing == key) {
                    misses.push((*kind, key.as_str()));
                }
            }
        }
        misses
    }

    pub fn temporal_failures(&self) -> usize {
        self.warnings
            .iter()
            .filter(|w| matches!(w, SoftError::TemporalParseFailure { .. }))
            .count()
    }

    pub fn log_summary(&self) {
        if self.is_empty() {
            tracing::info!("✅ Run finished without warnings");
            return;
        }

        tracing::info!(
            "📋 Run warnings: {} discarded rows, {} unparseable start times, {} lookup misses",
            self.discard_count(),
            self.temporal_failures(),
            self.resolution_misses().len()
        );
        for unit in self.incomplete_units() {
            tracing::warn!("⚠️ Incomplete unit: {}", unit);
        }
        for (kind, key) in self.resolution_misses() {
            tracing::warn!("⚠️ Unmapped {}: {}", kind, key);
        }
        for partition in self.failed_partitions() {
            tracing::warn!("⚠️ Export failed for partition: {}", partition);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_groups_warnings() {
        let mut report = RunReport::new();
        report.push(SoftError::ExtractionDiscard {
            unit: "dodgers".to_string(),
            reason: "away game".to_string(),
        });
        report.push(SoftError::ResolutionMiss {
            kind: LookupKind::Venue,
            key: "Athletics".to_string(),
        });
        report.push(SoftError::ResolutionMiss {
            kind: LookupKind::Venue,
            key: "Athletics".to_string(),
        });
        report.push(SoftError::FetchValidationExhausted {
            unit: "rays".to_string(),
            attempts: 3,
            observed: 100,
            expected: 162,
            reason: "below threshold".to_string(),
        });

        assert_eq!(report.discard_count(), 1);
        assert_eq!(report.resolution_misses(), vec![(LookupKind::Venue, "Athletics")]);
        assert_eq!(report.incomplete_units(), vec!["rays"]);
        assert!(report.failed_partitions().is_empty());
    }
}
