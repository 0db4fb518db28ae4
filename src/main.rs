use anyhow::Context;
use clap::Parser;
use datasolutions::adapters::LocalStorage;
use datasolutions::domain::ports::Storage;
use datasolutions::utils::{logger, validation::Validate};
use datasolutions::{app, build_service, AppError, CliConfig};
use std::path::Path;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting datasolutions");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    match run(&cli).await {
        Ok(()) => Ok(()),
        Err(e) => match e.downcast_ref::<AppError>() {
            Some(app_error) => {
                tracing::error!(
                    "❌ {:#} (Category: {:?}, Severity: {:?})",
                    e,
                    app_error.category(),
                    app_error.severity()
                );
                eprintln!("❌ {}", app_error.user_friendly_message());
                eprintln!("💡 {}", app_error.recovery_suggestion());
                std::process::exit(app_error.exit_code());
            }
            None => Err(e),
        },
    }
}

async fn run(cli: &CliConfig) -> anyhow::Result<()> {
    cli.validate()?;

    let config = cli.load_app_config()?;
    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated");

    let service = build_service(&config)
        .await
        .context("failed to prepare the page service")?;

    if cli.serve {
        app::serve(Arc::new(service), &config.server).await?;
        return Ok(());
    }

    let page = service.build(cli.page_request()).await;
    if let Some(roi) = &page.roi {
        tracing::info!(
            "ROI simulated: saving {:.2}, payback {:.4} years, ROI {:.2}%",
            roi.annual_saving,
            roi.payback_years,
            roi.roi_percent
        );
    }

    let rendered = app::render(&page, cli.format)?;

    match &cli.output {
        Some(output) => {
            let path = Path::new(output);
            let (dir, file) = match (path.parent(), path.file_name()) {
                (Some(dir), Some(file)) => (dir, file.to_string_lossy()),
                _ => (Path::new("."), output.as_str().into()),
            };
            let storage = LocalStorage::new(dir);
            storage
                .write_file(&file, rendered.as_bytes())
                .await
                .with_context(|| format!("failed to write {}", output))?;
            tracing::info!("📁 Page saved to: {}", output);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
