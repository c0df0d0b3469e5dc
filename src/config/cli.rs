use crate::config::toml_config::RunConfig;
use crate::utils::error::{EtlError, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "schedule-etl")]
#[command(about = "Scrape league schedules and export per-team event sheets")]
pub struct CliArgs {
    /// TOML run configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// League to run (mlb, nba, wnba, nhl); overrides the config file
    #[arg(short, long)]
    pub league: Option<String>,

    /// Output directory; overrides export.output_path
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[arg(long, help = "Validate the configuration and print the planned units without fetching")]
    pub dry_run: bool,
}

impl CliArgs {
    /// 讀取設定檔（若有）並套用命令列覆寫
    pub fn load_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_file(path)?,
            None => RunConfig::default(),
        };
        self.apply(&mut config);

        if config.run.league.trim().is_empty() {
            return Err(EtlError::MissingConfigError {
                field: format!("run.league (one of: {})", RunConfig::known_leagues()),
            });
        }
        Ok(config)
    }

    pub fn apply(&self, config: &mut RunConfig) {
        if let Some(league) = &self.league {
            config.run.league = league.clone();
        }
        if let Some(output) = &self.output {
            config.export.output_path = Some(output.clone());
        }
    }
}
