mod ai;
mod app;
mod config;
mod domain;
mod infrastructure;
mod tasks;
mod ui;
mod widget;

use anyhow::Result;
use infrastructure::{directories, logging, shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories)?;
    logging::init_tracing(&config, &paths)?;

    if config.classifier.api_key.is_none() {
        tracing::warn!(
            target: "classifier",
            "GROQ_API_KEY is not set; every classification will fail as unauthorized"
        );
    }

    let (shutdown, _) = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown.clone());

    let app = app::MailSorterApp::initialize(config, paths, shutdown)?;
    app.run().await
}
