use clap::Parser;
use school_admin::app::Shell;
use school_admin::utils::logger;
use school_admin::{CliConfig, HttpRecordApi, RecordApi, Settings};
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let settings = match Settings::from_cli(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(2);
        }
    };

    if settings.json_logs {
        logger::init_json_logger(&settings.log_level);
    } else {
        logger::init_cli_logger(&settings.log_level);
    }
    tracing::debug!("Settings: {:?}", settings);
    tracing::info!("Using school records API at {}", settings.api_base_url);

    let api: Arc<dyn RecordApi> = Arc::new(HttpRecordApi::from_config(&settings));
    let report = Shell::new(api).run(&cli.command).await;

    for line in &report.lines {
        println!("{}", line);
    }
    for notification in &report.notifications {
        if notification.is_error() {
            eprintln!("{}", notification);
        } else {
            println!("{}", notification);
        }
    }

    if !report.succeeded() {
        std::process::exit(1);
    }
    Ok(())
}
