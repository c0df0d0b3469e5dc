use crate::domain::ports::{Pipeline, RunSummary};
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub fn pipeline(&self) -> &P {
        &self.pipeline
    }

    /// Soft problems end up in the returned report; only configuration and
    /// infrastructure failures surface as `Err`.
    pub async fn run(&self) -> Result<RunSummary> {
        tracing::info!("🚀 Starting schedule ETL");

        // Extract
        tracing::info!("📥 Extracting schedules...");
        let extracted = self.pipeline.extract().await?;
        let incomplete = extracted.units.iter().filter(|u| !u.complete).count();
        tracing::info!(
            "📥 Extracted {} games from {} units ({} incomplete)",
            extracted.games.len(),
            extracted.units.len(),
            incomplete
        );

        // Transform
        tracing::info!("🔄 Normalizing games...");
        let transformed = self.pipeline.transform(extracted).await?;
        tracing::info!("🔄 Assembled {} records", transformed.records.len());

        // Load
        tracing::info!("💾 Exporting...");
        let summary = self.pipeline.load(transformed).await?;
        tracing::info!(
            "💾 {} records in {} partitions written to {}",
            summary.export.records,
            summary.export.partitions,
            summary.export.workbook_path
        );

        summary.report.log_summary();
        Ok(summary)
    }
}
