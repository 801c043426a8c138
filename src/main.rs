// shutter: a terminal browser for recent and searched Flickr photos.

mod app;
mod cache;
mod config;
mod error;
mod flickr;
mod state;
mod telemetry;
mod ui;

use tracing::{info, warn};

use crate::app::App;
use crate::cache::FileStore;
use crate::config::Config;
use crate::error::{Result, ShutterError};
use crate::flickr::FlickrClient;

#[tokio::main]
async fn main() -> Result<()> {
    if let Some(log_path) = cache::log_path() {
        if let Err(e) = telemetry::init(&log_path) {
            eprintln!("logging disabled: {}", e);
        }
    }

    let config = Config::from_env()?;
    info!(endpoint = %config.endpoint, per_page = config.per_page, "starting");

    let client = FlickrClient::new(config)?;
    let store = FileStore::in_cache_dir()
        .ok_or_else(|| ShutterError::Other("no cache directory available".to_string()))?;
    let mut app = App::new(client, store);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    if let Err(e) = &result {
        warn!(error = %e, "terminal error");
    }
    result?;
    Ok(())
}
