mod cli;
mod render;
mod terminal;

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use weatherdeck_core::{AppError, Config};
use weatherdeck_dashboard::{DashboardController, ViewState};
use weatherdeck_store::{FileStorage, KeyValueStore, MemoryStorage};
use weatherdeck_weather::OpenWeatherClient;

use crate::cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    weatherdeck_core::init()?;

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };

    let controller = build_controller(&config)?;

    match args.command {
        Some(Command::Lookup { city }) => lookup_once(controller, &city.join(" ")).await,
        None => terminal::run(controller).await,
    }
}

fn load_config(args: &Args) -> Result<Config, AppError> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = Config::load_from(path)?;
            config.apply_api_key_override(std::env::var(weatherdeck_core::config::API_KEY_ENV).ok());
            config
        }
        None => Config::load()?,
    };

    config.apply_api_key_override(args.api_key.clone());
    if let Some(dir) = &args.data_dir {
        config.storage.data_dir = dir.clone();
    }

    let (config, _warnings) = config.into_validated()?;
    Ok(config)
}

fn build_controller(config: &Config) -> Result<DashboardController, AppError> {
    let client = OpenWeatherClient::new(
        config.weather.base_url.clone(),
        config.weather.api_key.clone(),
        Duration::from_secs(config.weather.request_timeout_secs),
    )
    .map_err(|e| AppError::Service(e.to_string()))?;

    let storage: Arc<dyn KeyValueStore> = match FileStorage::open(&config.storage.data_dir) {
        Ok(storage) => Arc::new(storage),
        Err(e) => {
            tracing::warn!("{}; favorites and unit will not be saved this session", e);
            eprintln!("warning: {}", e.user_message());
            Arc::new(MemoryStorage::new())
        }
    };

    Ok(
        DashboardController::new(Arc::new(client), storage)
            .with_notification_ttl(Duration::from_secs(config.ui.notification_seconds)),
    )
}

async fn lookup_once(mut controller: DashboardController, city: &str) -> Result<()> {
    controller.start_search(city).await;

    if let ViewState::Error(message) = controller.view() {
        anyhow::bail!("{}", message);
    }
    print!("{}", render::render_dashboard(&controller, Instant::now()));
    Ok(())
}
