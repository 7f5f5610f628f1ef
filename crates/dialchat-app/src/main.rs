mod chat;
mod config;
mod dashboard;
mod render;
mod service;
mod session;
#[cfg(test)]
mod testing;

use anyhow::Result;
use config::Config;
use service::AppService;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    dialchat_logging::init_logging(&config.logging.level, config.logging.format)?;

    let app = AppService::new(config)?;
    app.run().await
}
