use anyhow::Result;
use clap::Parser;
use dialoguer::Input;
use ec2stats::*;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::FormatTime;

struct LocalTimer;

impl FormatTime for LocalTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(
            w,
            "{}",
            chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z")
        )
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_timer(LocalTimer)
        .with_env_filter(filter)
        .init();

    let args = cli::Args::parse();
    let app_config = config::AppConfig::resolve(&args)?;

    let snapshot = if let Some(path) = &args.load_stats {
        // A prior run's file replaces live collection entirely.
        store::load_snapshot(path)
    } else {
        let credentials = resolve_credentials(&app_config)?;
        let connector = cloud::AwsConnector::new(credentials);
        let fleet_collector = fleet::FleetCollector::new(
            &connector,
            app_config.collection.lookback_days,
            app_config.collection.period_secs,
        );
        match fleet_collector.collect(&app_config.aws.regions).await {
            Ok(snapshot) => {
                store::save_dated_json(Path::new("."), store::STATS_PREFIX, &snapshot);
                Some(snapshot)
            }
            Err(e) => {
                // One region failing discards the whole run; see fleet.rs.
                error!(error = %e, "fleet enumeration aborted, nothing collected");
                None
            }
        }
    };

    if args.no_analyze {
        return Ok(());
    }
    let Some(snapshot) = snapshot else {
        info!("no snapshot to analyze");
        return Ok(());
    };

    let client = analyzer::AnalyzerClient::new(&app_config.analyzer.url, app_config.analyzer.verify_tls)?;
    let result = client.analyze(&snapshot, app_config.threshold()).await?;
    store::save_dated_json(Path::new("."), store::SUMMARY_PREFIX, &result);

    if !args.quiet {
        match summary::render_summary(&result) {
            Some(text) => println!("{text}"),
            None => info!("analyzer response carried no summary"),
        }
    }

    Ok(())
}

/// Prompts until non-empty for any key not supplied via flags or config.
fn resolve_credentials(app_config: &config::AppConfig) -> Result<cloud::Credentials> {
    let access_key = match app_config.aws.access_key.clone().filter(|k| !k.is_empty()) {
        Some(key) => key,
        None => Input::new().with_prompt("Access Key").interact_text()?,
    };
    let secret_key = match app_config.aws.secret_key.clone().filter(|k| !k.is_empty()) {
        Some(key) => key,
        None => Input::new()
            .with_prompt("Secret Access Key")
            .interact_text()?,
    };
    Ok(cloud::Credentials {
        access_key,
        secret_key,
    })
}
