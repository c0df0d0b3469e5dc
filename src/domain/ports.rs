use crate::domain::model::{ExportSummary, GameRecord, RawGame, SourceRow, UnitSummary, WorkUnit};
use crate::domain::report::RunReport;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Retrieves the raw content of one unit of work.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, unit: &WorkUnit) -> Result<String>;
}

/// Turns raw page content into source rows. An `Err` means the page layout
/// was not recognised at all; the retry controller treats it like an empty
/// attempt.
pub trait RowParser: Send + Sync {
    fn parse(&self, page: &str) -> Result<Vec<SourceRow>>;
}

#[async_trait]
pub trait DescriptionGenerator: Send + Sync {
    /// `recent` holds the most recent outputs, oldest first.
    async fn generate(&self, promo: Option<&str>, time: Option<&str>, recent: &[String]) -> Result<String>;
}

#[derive(Debug, Clone, Default)]
pub struct Extracted {
    pub games: Vec<RawGame>,
    pub units: Vec<UnitSummary>,
    pub report: RunReport,
}

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub records: Vec<GameRecord>,
    pub units: Vec<UnitSummary>,
    pub report: RunReport,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub export: ExportSummary,
    pub units: Vec<UnitSummary>,
    pub report: RunReport,
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Extracted>;
    async fn transform(&self, data: Extracted) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<RunSummary>;
}
