use clap::Parser;
use schedule_etl::core::units::plan_units;
use schedule_etl::utils::error::ErrorSeverity;
use schedule_etl::utils::{logger, validation::Validate};
use schedule_etl::{CliArgs, EtlEngine, EtlError, LocalStorage, RunConfig};

fn exit_with(e: &EtlError) -> ! {
    tracing::error!(
        "❌ Schedule ETL failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code)
}

fn dry_run(config: &RunConfig) -> schedule_etl::Result<()> {
    let settings = config.pipeline_settings()?;
    let units = plan_units(&settings.league, &settings.window)?;

    println!(
        "🗓️ {} ({:?}): {} units, threshold {}, {} attempts per unit",
        settings.league.label,
        settings.league.shape,
        units.len(),
        settings.retry.min_expected,
        settings.retry.max_attempts()
    );
    for unit in &units {
        println!("  {:<12} {}", unit.label, unit.url);
    }
    println!("📁 Output: {}", config.output_path());
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }
    tracing::debug!("CLI args: {:?}", args);

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    // 驗證配置（在任何抓取之前）
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        exit_with(&e);
    }

    if args.dry_run {
        if let Err(e) = dry_run(&config) {
            exit_with(&e);
        }
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path());
    let pipeline = match config.build_pipeline(storage) {
        Ok(pipeline) => pipeline,
        Err(e) => exit_with(&e),
    };
    let engine = EtlEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            let incomplete = summary.report.incomplete_units();
            println!("✅ Schedule ETL completed");
            println!(
                "📁 {} records in {} sheets: {}/{}",
                summary.export.records,
                summary.export.partitions,
                config.output_path(),
                summary.export.workbook_path
            );
            if let Some(path) = &summary.export.combined_csv_path {
                println!("📄 Combined: {}/{}", config.output_path(), path);
            }
            if !summary.export.template_artifacts.is_empty() {
                println!("📝 {} filled templates", summary.export.template_artifacts.len());
            }
            if !incomplete.is_empty() {
                println!("⚠️ Incomplete units: {}", incomplete.join(", "));
            }
            if !summary.export.failed_partitions.is_empty() {
                println!("⚠️ Failed templates: {}", summary.export.failed_partitions.join(", "));
            }
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}
