use crate::adapters::describe::{ChatDescriptionGenerator, StaticDescription, DEFAULT_ENDPOINT, DEFAULT_MAX_TRIES, DEFAULT_MODEL};
use crate::adapters::html::parser_for;
use crate::adapters::http::{HttpFetcher, DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT};
use crate::core::assemble::{default_template_fields, ColumnLayout};
use crate::core::describe::DEFAULT_HISTORY;
use crate::core::export::{
    CellOrigin, ExportSettings, ExportWriter, TemplateSettings, DEFAULT_COMBINED_CSV, DEFAULT_TARGET_SHEET,
    DEFAULT_WORKBOOK,
};
use crate::core::pipeline::{Collaborators, PipelineSettings, SchedulePipeline};
use crate::core::retry::{RetryPolicy, DEFAULT_DELAY_MS, DEFAULT_RETRIES};
use crate::core::temporal::{TemporalContext, ViewerZone};
use crate::core::units::RunWindow;
use crate::domain::ports::{DescriptionGenerator, Storage};
use crate::domain::registry::Registry;
use crate::leagues::{builtin, known_selectors, LeagueConfig};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_date, validate_file_extension, validate_non_empty_string, validate_path, validate_positive_number,
    validate_range, validate_required_field, validate_timezone, validate_url, Validate,
};
use chrono::{Datelike, Local};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";
pub const DEFAULT_TEMPLATE_OUTPUT_DIR: &str = "templates";
pub const MAX_CONCURRENCY: usize = 32;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub run: RunSection,
    pub source: SourceSection,
    pub retry: RetrySection,
    pub description: DescriptionSection,
    pub export: ExportSection,
    /// Overrides for the constant template columns.
    pub defaults: BTreeMap<String, String>,
    pub registry: RegistrySection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunSection {
    pub league: String,
    pub season_year: Option<i32>,
    pub reference_year: Option<i32>,
    /// Zone the source renders times in; host local when unset.
    pub viewer_timezone: Option<String>,
    pub concurrency: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceSection {
    pub url_template: Option<String>,
    pub team_codes: Option<Vec<String>>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySection {
    pub retries: Option<u32>,
    pub delay_ms: Option<u64>,
    pub min_expected: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DescriptionSection {
    pub enabled: Option<bool>,
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub history: Option<usize>,
    pub max_tries: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSection {
    pub output_path: Option<String>,
    pub workbook: Option<String>,
    /// Combined flat file name; an empty string turns it off.
    pub combined_csv: Option<String>,
    pub template_path: Option<String>,
    pub target_sheet: Option<String>,
    pub start_row: Option<usize>,
    pub start_col: Option<usize>,
    pub template_output_dir: Option<String>,
    pub columns: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistrySection {
    pub aliases: BTreeMap<String, String>,
    pub venues: BTreeMap<String, String>,
    pub timezones: BTreeMap<String, String>,
}

impl RunConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 只選聯盟、其餘使用預設值
    pub fn for_league(league: impl Into<String>) -> Self {
        let mut config = Self::default();
        config.run.league = league.into();
        config
    }

    /// 替換環境變數 (例如 ${OPENAI_API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn description_enabled(&self) -> bool {
        self.description.enabled.unwrap_or(false)
    }

    pub fn output_path(&self) -> &str {
        self.export.output_path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    pub fn concurrency(&self) -> usize {
        self.run.concurrency.unwrap_or(1)
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("run.league", &self.run.league)?;
        let profile = builtin(&self.run.league).ok_or_else(|| EtlError::UnknownLeague {
            selector: self.run.league.clone(),
        })?;

        if let Some(tz) = &self.run.viewer_timezone {
            validate_timezone("run.viewer_timezone", tz)?;
        }
        if let Some(year) = self.run.season_year {
            validate_range("run.season_year", year, 1900, 2200)?;
        }
        if let Some(year) = self.run.reference_year {
            validate_range("run.reference_year", year, 1900, 2200)?;
        }
        validate_range("run.concurrency", self.concurrency(), 1, MAX_CONCURRENCY)?;

        if let Some(template) = &self.source.url_template {
            validate_url("source.url_template", template)?;
        } else {
            validate_url("source.url_template", profile.url_template)?;
        }
        let start = self
            .source
            .start_date
            .as_deref()
            .map(|d| validate_date("source.start_date", d))
            .transpose()?;
        let end = self
            .source
            .end_date
            .as_deref()
            .map(|d| validate_date("source.end_date", d))
            .transpose()?;
        if let (Some(start), Some(end)) = (start, end) {
            if end < start {
                return Err(EtlError::ConfigValidationError {
                    field: "source.end_date".to_string(),
                    message: format!("{} is before start date {}", end, start),
                });
            }
        }
        if let Some(timeout) = self.source.timeout_seconds {
            validate_range("source.timeout_seconds", timeout, 1, 600)?;
        }

        if let Some(retries) = self.retry.retries {
            validate_range("retry.retries", retries, 0, 20)?;
        }

        if self.description_enabled() {
            let endpoint = self.description.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT);
            validate_url("description.endpoint", endpoint)?;
            let key = validate_required_field("description.api_key", &self.description.api_key)?;
            validate_non_empty_string("description.api_key", key)?;
            if key.starts_with("${") {
                return Err(EtlError::MissingConfigError {
                    field: "description.api_key".to_string(),
                });
            }
        }
        if let Some(tries) = self.description.max_tries {
            validate_positive_number("description.max_tries", tries as usize, 1)?;
        }

        validate_path("export.output_path", self.output_path())?;
        if let Some(template) = &self.export.template_path {
            validate_file_extension("export.template_path", template, &["csv", "zip"])?;
        }
        if let Some(row) = self.export.start_row {
            validate_positive_number("export.start_row", row, 1)?;
        }
        if let Some(col) = self.export.start_col {
            validate_positive_number("export.start_col", col, 1)?;
        }
        if let Some(columns) = &self.export.columns {
            if columns.is_empty() {
                return Err(EtlError::InvalidConfigValueError {
                    field: "export.columns".to_string(),
                    value: "[]".to_string(),
                    reason: "At least one column is required".to_string(),
                });
            }
        }

        for (team, tz) in &self.registry.timezones {
            validate_timezone(&format!("registry.timezones.{}", team), tz)?;
        }

        Ok(())
    }

    /// 內建聯盟設定套用覆寫後的結果
    pub fn league_config(&self) -> Result<LeagueConfig> {
        let profile = builtin(&self.run.league).ok_or_else(|| EtlError::UnknownLeague {
            selector: self.run.league.clone(),
        })?;

        let registry = Registry::builder()
            .aliases(profile.aliases.iter().copied())
            .venues(profile.venues.iter().copied())
            .timezones(profile.timezones.iter().copied())
            .aliases(self.registry.aliases.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .venues(self.registry.venues.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .timezones(self.registry.timezones.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .build()?;

        Ok(LeagueConfig {
            key: profile.key.to_string(),
            label: profile.label.to_string(),
            shape: profile.shape,
            url_template: self
                .source
                .url_template
                .clone()
                .unwrap_or_else(|| profile.url_template.to_string()),
            team_codes: self
                .source
                .team_codes
                .clone()
                .unwrap_or_else(|| profile.team_codes.iter().map(|c| c.to_string()).collect()),
            completeness_threshold: self.retry.min_expected.unwrap_or(profile.completeness_threshold),
            registry,
        })
    }

    pub fn run_window(&self) -> Result<RunWindow> {
        let season_year = self.run.season_year.unwrap_or_else(|| Local::now().year());
        Ok(RunWindow {
            season_year,
            start_date: self
                .source
                .start_date
                .as_deref()
                .map(|d| validate_date("source.start_date", d))
                .transpose()?,
            end_date: self
                .source
                .end_date
                .as_deref()
                .map(|d| validate_date("source.end_date", d))
                .transpose()?,
        })
    }

    pub fn temporal_context(&self) -> Result<TemporalContext> {
        let viewer = match &self.run.viewer_timezone {
            Some(tz) => ViewerZone::Named(validate_timezone("run.viewer_timezone", tz)?),
            None => ViewerZone::HostLocal,
        };
        Ok(TemporalContext::for_today(viewer, self.run.reference_year))
    }

    pub fn retry_policy(&self, completeness_threshold: usize) -> RetryPolicy {
        RetryPolicy {
            retries: self.retry.retries.unwrap_or(DEFAULT_RETRIES),
            delay: Duration::from_millis(self.retry.delay_ms.unwrap_or(DEFAULT_DELAY_MS)),
            min_expected: completeness_threshold,
        }
    }

    pub fn template_fields(&self) -> BTreeMap<String, String> {
        let mut fields = default_template_fields();
        fields.extend(self.defaults.clone());
        fields
    }

    pub fn column_layout(&self) -> ColumnLayout {
        match &self.export.columns {
            Some(columns) => ColumnLayout::new(columns.clone()),
            None => ColumnLayout::default(),
        }
    }

    pub fn export_settings(&self) -> ExportSettings {
        let combined_csv = match self.export.combined_csv.as_deref() {
            None => Some(DEFAULT_COMBINED_CSV.to_string()),
            Some("") => None,
            Some(name) => Some(name.to_string()),
        };
        let template = self.export.template_path.as_ref().map(|path| TemplateSettings {
            path: template_location(path),
            target_sheet: self
                .export
                .target_sheet
                .clone()
                .unwrap_or_else(|| DEFAULT_TARGET_SHEET.to_string()),
            origin: CellOrigin {
                row: self.export.start_row.unwrap_or(CellOrigin::default().row),
                col: self.export.start_col.unwrap_or(CellOrigin::default().col),
            },
            output_dir: self
                .export
                .template_output_dir
                .clone()
                .unwrap_or_else(|| DEFAULT_TEMPLATE_OUTPUT_DIR.to_string()),
        });

        ExportSettings {
            workbook: self.export.workbook.clone().unwrap_or_else(|| DEFAULT_WORKBOOK.to_string()),
            combined_csv,
            template,
        }
    }

    pub fn pipeline_settings(&self) -> Result<PipelineSettings> {
        let league = self.league_config()?;
        let retry = self.retry_policy(league.completeness_threshold);
        let mut settings = PipelineSettings::new(league, self.run_window()?, self.temporal_context()?);
        settings.retry = retry;
        settings.concurrency = self.concurrency();
        settings.template_fields = self.template_fields();
        settings.history = self.description.history.unwrap_or(DEFAULT_HISTORY);
        Ok(settings)
    }

    fn describer(&self, label: &str) -> Box<dyn DescriptionGenerator> {
        match (self.description_enabled(), &self.description.api_key) {
            (true, Some(key)) => Box::new(
                ChatDescriptionGenerator::new(
                    self.description.endpoint.as_deref().unwrap_or(DEFAULT_ENDPOINT),
                    self.description.model.as_deref().unwrap_or(DEFAULT_MODEL),
                    key.as_str(),
                    label,
                )
                .with_max_tries(self.description.max_tries.unwrap_or(DEFAULT_MAX_TRIES)),
            ),
            _ => Box::new(StaticDescription::new(label)),
        }
    }

    /// 組裝完整管線：HTTP 抓取、對應版面的解析器與描述產生器
    pub fn build_pipeline<S: Storage>(&self, storage: S) -> Result<SchedulePipeline<S>> {
        let settings = self.pipeline_settings()?;
        let fetcher = HttpFetcher::new(
            Duration::from_secs(self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)),
            self.source.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
        )?;
        let collaborators = Collaborators {
            fetcher: Box::new(fetcher),
            parser: parser_for(settings.league.shape)?,
            describer: self.describer(&settings.league.label),
        };
        let writer = ExportWriter::new(storage, self.column_layout(), self.export_settings());
        Ok(SchedulePipeline::new(settings, collaborators, writer))
    }

    pub fn known_leagues() -> String {
        known_selectors().join(", ")
    }
}

/// Templates live relative to the working directory, not the output
/// directory the storage is rooted at.
fn template_location(path: &str) -> String {
    std::path::absolute(path)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| path.to_string())
}

impl Validate for RunConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leagues::SourceShape;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[run]
league = "mlb"
season_year = 2026
viewer_timezone = "America/New_York"
concurrency = 4

[source]
team_codes = ["dodgers", "giants"]

[retry]
retries = 2
delay_ms = 0

[export]
output_path = "./out"
template_path = "template.csv"
start_row = 3

[defaults]
Owner = "Someone Else"

[registry.venues]
"Los Angeles Dodgers" = "Chavez Ravine"
"#;

        let config = RunConfig::from_toml_str(toml_content).unwrap();
        config.validate().unwrap();

        let league = config.league_config().unwrap();
        assert_eq!(league.shape, SourceShape::TeamSeason);
        assert_eq!(league.team_codes, vec!["dodgers", "giants"]);
        assert_eq!(league.completeness_threshold, 162);
        assert_eq!(league.registry.resolve_venue("Los Angeles Dodgers"), "Chavez Ravine");
        assert_eq!(league.registry.resolve_venue("San Francisco Giants"), "Oracle Park");

        let settings = config.pipeline_settings().unwrap();
        assert_eq!(settings.retry.max_attempts(), 3);
        assert_eq!(settings.retry.delay, Duration::ZERO);
        assert_eq!(settings.concurrency, 4);
        assert_eq!(settings.template_fields["Owner"], "Someone Else");
        assert_eq!(settings.template_fields["Event Category"], "Sports");
        assert_eq!(settings.window.season_year, 2026);

        let export = config.export_settings();
        let template = export.template.unwrap();
        assert_eq!(template.origin, CellOrigin { row: 3, col: 4 });
        assert_eq!(template.output_dir, DEFAULT_TEMPLATE_OUTPUT_DIR);
        assert_eq!(template.target_sheet, "Event");
        assert_eq!(export.combined_csv.as_deref(), Some(DEFAULT_COMBINED_CSV));
        assert_eq!(config.output_path(), "./out");
    }

    #[test]
    fn test_relative_template_path_resolves_from_working_directory() {
        let mut config = RunConfig::for_league("mlb");
        config.export.output_path = Some("./output".to_string());
        config.export.template_path = Some("./templates/event.zip".to_string());

        let template = config.export_settings().template.unwrap();
        let expected = std::env::current_dir().unwrap().join("templates").join("event.zip");

        assert!(Path::new(&template.path).is_absolute());
        assert_eq!(Path::new(&template.path).components().collect::<Vec<_>>(), expected.components().collect::<Vec<_>>());
    }

    #[test]
    fn test_minimal_config_uses_profile_defaults() {
        let config = RunConfig::from_toml_str("[run]\nleague = \"NBA\"\n").unwrap();
        config.validate().unwrap();

        let league = config.league_config().unwrap();
        assert_eq!(league.label, "NBA");
        assert_eq!(league.shape, SourceShape::DatedTables);
        assert_eq!(config.concurrency(), 1);
        assert!(!config.description_enabled());
        assert_eq!(config.column_layout().len(), 49);
    }

    #[test]
    fn test_unknown_league_is_rejected() {
        let config = RunConfig::for_league("xfl");
        assert!(matches!(config.validate(), Err(EtlError::UnknownLeague { .. })));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let cases = [
            "[run]\nleague = \"mlb\"\nviewer_timezone = \"Mars/Olympus\"\n",
            "[run]\nleague = \"nhl\"\n[source]\nstart_date = \"2025-13-01\"\n",
            "[run]\nleague = \"nhl\"\n[source]\nstart_date = \"2025-06-01\"\nend_date = \"2025-05-01\"\n",
            "[run]\nleague = \"mlb\"\n[source]\nurl_template = \"ftp://example.com/{team}\"\n",
            "[run]\nleague = \"mlb\"\nconcurrency = 0\n",
            "[run]\nleague = \"mlb\"\n[export]\ntemplate_path = \"template.xlsx\"\n",
            "[run]\nleague = \"mlb\"\n[description]\nenabled = true\n",
            "[run]\nleague = \"mlb\"\n[registry.timezones]\n\"Nowhere FC\" = \"Atlantis/Capital\"\n",
        ];

        for toml_content in cases {
            let config = RunConfig::from_toml_str(toml_content).unwrap();
            assert!(config.validate().is_err(), "accepted: {}", toml_content);
        }
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SCHEDULE_ETL_TEST_KEY", "sk-test");

        let toml_content = r#"
[run]
league = "wnba"

[description]
enabled = true
api_key = "${SCHEDULE_ETL_TEST_KEY}"
"#;

        let config = RunConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.description.api_key.as_deref(), Some("sk-test"));
        config.validate().unwrap();

        std::env::remove_var("SCHEDULE_ETL_TEST_KEY");
    }

    #[test]
    fn test_unset_env_var_key_is_missing() {
        let toml_content = r#"
[run]
league = "wnba"

[description]
enabled = true
api_key = "${SCHEDULE_ETL_SURELY_UNSET}"
"#;
        let config = RunConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(config.validate(), Err(EtlError::MissingConfigError { .. })));
    }

    #[test]
    fn test_empty_combined_csv_disables_it() {
        let config = RunConfig::from_toml_str("[run]\nleague = \"mlb\"\n[export]\ncombined_csv = \"\"\n").unwrap();
        assert!(config.export_settings().combined_csv.is_none());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[run]\nleague = \"nhl\"\n[source]\nstart_date = \"2025-10-07\"\nend_date = \"2025-10-21\"\n")
            .unwrap();

        let config = RunConfig::from_file(temp_file.path()).unwrap();
        let window = config.run_window().unwrap();
        assert_eq!(window.start_date, chrono::NaiveDate::from_ymd_opt(2025, 10, 7));
        assert_eq!(window.end_date, chrono::NaiveDate::from_ymd_opt(2025, 10, 21));
    }
}
