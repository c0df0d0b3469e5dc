use crate::core::assemble::{default_template_fields, RecordAssembler};
use crate::core::describe::{DescriptionWriter, DEFAULT_HISTORY};
use crate::core::export::ExportWriter;
use crate::core::retry::{RetryController, RetryPolicy};
use crate::core::temporal::{TemporalContext, TemporalNormalizer};
use crate::core::units::{plan_units, RunWindow};
use crate::domain::model::WorkUnit;
use crate::domain::ports::{
    DescriptionGenerator, Extracted, PageFetcher, Pipeline, RowParser, RunSummary, Storage, TransformResult,
};
use crate::domain::report::SoftError;
use crate::leagues::LeagueConfig;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Everything a run needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub league: LeagueConfig,
    pub window: RunWindow,
    pub retry: RetryPolicy,
    pub concurrency: usize,
    pub temporal: TemporalContext,
    pub template_fields: BTreeMap<String, String>,
    pub history: usize,
}

impl PipelineSettings {
    pub fn new(league: LeagueConfig, window: RunWindow, temporal: TemporalContext) -> Self {
        let retry = RetryPolicy {
            min_expected: league.completeness_threshold,
            ..RetryPolicy::default()
        };
        Self {
            league,
            window,
            retry,
            concurrency: 1,
            temporal,
            template_fields: default_template_fields(),
            history: DEFAULT_HISTORY,
        }
    }
}

pub struct Collaborators {
    pub fetcher: Box<dyn PageFetcher>,
    pub parser: Box<dyn RowParser>,
    pub describer: Box<dyn DescriptionGenerator>,
}

pub struct SchedulePipeline<S: Storage> {
    settings: PipelineSettings,
    collaborators: Collaborators,
    writer: ExportWriter<S>,
}

impl<S: Storage> SchedulePipeline<S> {
    pub fn new(settings: PipelineSettings, collaborators: Collaborators, writer: ExportWriter<S>) -> Self {
        Self {
            settings,
            collaborators,
            writer,
        }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    pub fn planned_units(&self) -> Result<Vec<WorkUnit>> {
        plan_units(&self.settings.league, &self.settings.window)
    }
}

#[async_trait]
impl<S: Storage> Pipeline for SchedulePipeline<S> {
    async fn extract(&self) -> Result<Extracted> {
        let units = self.planned_units()?;
        tracing::info!(
            "🗓️ {} units planned for {} (threshold {}, {} retries)",
            units.len(),
            self.settings.league.label,
            self.settings.retry.min_expected,
            self.settings.retry.retries
        );

        let controller = RetryController::new(
            self.collaborators.fetcher.as_ref(),
            self.collaborators.parser.as_ref(),
            self.settings.retry,
        );
        let outcomes = controller.run_all(&units, self.settings.concurrency).await;

        let mut extracted = Extracted::default();
        for outcome in outcomes {
            extracted.report.extend(outcome.warnings());
            extracted.units.push(outcome.summary());
            extracted.games.extend(outcome.games);
        }
        Ok(extracted)
    }

    async fn transform(&self, data: Extracted) -> Result<TransformResult> {
        let Extracted { games, units, mut report } = data;
        let assembler = RecordAssembler::new(&self.settings.league.registry, self.settings.template_fields.clone());
        let normalizer = TemporalNormalizer::new(self.settings.temporal);
        let mut describer = DescriptionWriter::new(self.collaborators.describer.as_ref(), self.settings.history);

        let mut records = Vec::with_capacity(games.len());
        for game in games {
            let resolved = assembler.resolve(&game, &mut report);
            let label = format!("{} vs. {}", resolved.home_team, resolved.away_team);

            let normalized = normalizer.normalize(&game.raw_date_text, game.raw_time_text.as_deref(), resolved.timezone);
            if let Some(input) = normalized.failure {
                report.push(SoftError::TemporalParseFailure {
                    game: label.clone(),
                    input,
                });
            }

            let description = describer
                .describe(&label, game.promo_text.as_deref(), game.raw_time_text.as_deref())
                .await;

            records.push(assembler.finalize(resolved, normalized.times, Some(description), game.promo_text));
        }

        tracing::debug!("Assembled {} records", records.len());
        Ok(TransformResult { records, units, report })
    }

    async fn load(&self, result: TransformResult) -> Result<RunSummary> {
        let TransformResult {
            records,
            units,
            mut report,
        } = result;
        let export = self.writer.write(&records, &mut report).await?;
        Ok(RunSummary { export, units, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assemble::ColumnLayout;
    use crate::core::export::ExportSettings;
    use crate::core::temporal::ViewerZone;
    use crate::domain::model::SourceRow;
    use crate::domain::registry::Registry;
    use crate::leagues::SourceShape;
    use crate::utils::error::EtlError;
    use chrono::NaiveDate;
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.lock().await.get(path).cloned().ok_or_else(|| EtlError::ProcessingError {
                message: format!("missing {}", path),
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct StaticPage;

    #[async_trait]
    impl PageFetcher for StaticPage {
        async fn fetch(&self, unit: &WorkUnit) -> Result<String> {
            Ok(unit.label.clone())
        }
    }

    /// One home game and one away game per unit.
    struct TwoRows;

    impl RowParser for TwoRows {
        fn parse(&self, page: &str) -> Result<Vec<SourceRow>> {
            let home = match page {
                "yankees" => "NYY",
                _ => "Springfield",
            };
            Ok(vec![
                SourceRow::from_matchup(format!("{} vs BOS on 06/01/2026", home))
                    .with_date("June 1")
                    .with_time("7:05 PM")
                    .with_promo("Bobblehead Night"),
                SourceRow::from_matchup(format!("BOS @ {}", home)),
            ])
        }
    }

    struct Fixed;

    #[async_trait]
    impl DescriptionGenerator for Fixed {
        async fn generate(&self, promo: Option<&str>, _time: Option<&str>, _recent: &[String]) -> Result<String> {
            Ok(format!("MLB: xxx tickets available for the game. {}", promo.unwrap_or("")))
        }
    }

    fn pipeline(storage: MockStorage) -> SchedulePipeline<MockStorage> {
        let league = LeagueConfig {
            key: "test".to_string(),
            label: "TEST".to_string(),
            shape: SourceShape::TeamSeason,
            url_template: "https://example.test/{team}/{year}".to_string(),
            team_codes: vec!["yankees".to_string(), "isotopes".to_string()],
            completeness_threshold: 0,
            registry: Registry::builder()
                .aliases([("NYY", "New York Yankees"), ("BOS", "Boston Red Sox")])
                .venues([("New York Yankees", "Yankee Stadium"), ("Boston Red Sox", "Fenway Park")])
                .timezones([("New York Yankees", "America/New_York"), ("Boston Red Sox", "America/New_York")])
                .build()
                .unwrap(),
        };
        let window = RunWindow {
            season_year: 2026,
            ..Default::default()
        };
        let temporal = TemporalContext {
            reference_year: 2026,
            run_date: NaiveDate::from_ymd_opt(2026, 5, 20).unwrap(),
            viewer: ViewerZone::Named(chrono_tz::America::New_York),
        };
        let mut settings = PipelineSettings::new(league, window, temporal);
        settings.retry.delay = Duration::ZERO;

        SchedulePipeline::new(
            settings,
            Collaborators {
                fetcher: Box::new(StaticPage),
                parser: Box::new(TwoRows),
                describer: Box::new(Fixed),
            },
            ExportWriter::new(storage, ColumnLayout::default(), ExportSettings::default()),
        )
    }

    #[tokio::test]
    async fn test_pipeline_phases_carry_report_through() {
        let storage = MockStorage {
            files: Arc::new(Mutex::new(HashMap::new())),
        };
        let pipeline = pipeline(storage.clone());

        let extracted = pipeline.extract().await.unwrap();
        assert_eq!(extracted.games.len(), 2);
        assert_eq!(extracted.units.len(), 2);
        assert_eq!(extracted.report.discard_count(), 2);

        let transformed = pipeline.transform(extracted).await.unwrap();
        let yankees = &transformed.records[0];
        assert_eq!(yankees.name, "New York Yankees vs. Boston Red Sox");
        assert_eq!(yankees.venue, "Yankee Stadium");
        assert_eq!(
            yankees.field("Start Date").as_deref(),
            Some("2026-06-01 19:05:00")
        );
        assert_eq!(
            yankees.description.as_deref(),
            Some("MLB: xxx tickets available for the game. Bobblehead Night")
        );
        assert_eq!(transformed.records[1].name, "Springfield vs. Boston Red Sox");
        assert!(!transformed.report.resolution_misses().is_empty());

        let summary = pipeline.load(transformed).await.unwrap();
        assert_eq!(summary.export.partitions, 2);
        assert_eq!(summary.report.discard_count(), 2);
        assert!(storage.files.lock().await.contains_key("by_team.zip"));
    }
}
