use clap::Parser;
use log::warn;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::{self, File};

use wikiterm::core::config::{self, WikitermConfig};
use wikiterm::core::query::build_query;
use wikiterm::tui;

#[derive(Parser)]
#[command(name = "wikiterm", version, about = "Read Wikipedia in the terminal")]
struct Args {
    /// Article to open, e.g. `wikiterm alan turing`
    query: Vec<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    let (file_config, config_error) = match config::load_config() {
        Ok(cfg) => (cfg, None),
        Err(e) => (WikitermConfig::default(), Some(e)),
    };
    let config = config::resolve(&file_config);

    // The log file is optional; the reader works without it.
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Some(dir) = config.log_file.parent() {
        let _ = fs::create_dir_all(dir);
    }
    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }

    if let Some(e) = config_error {
        warn!("Ignoring config file: {}", e);
    }
    log::info!(
        "wikiterm {} starting (source: {})",
        env!("CARGO_PKG_VERSION"),
        config.base_url
    );

    let initial_query = (!args.query.is_empty()).then(|| build_query(&args.query));
    tui::run(config, initial_query).await
}
