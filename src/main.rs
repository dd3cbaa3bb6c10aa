use actix_web::HttpServer;
use dotenvy::dotenv;
use std::sync::Arc;

mod api;
mod config;
mod directory;
mod docs;
mod error;
mod model;
mod notify;
mod routes;
mod state;
mod utils;

use config::Config;
use directory::init_directory;
use notify::emailjs::EmailJs;
use routes::{RateLimits, build_app};
use state::AppState;

use tracing::info;
use tracing_appender::rolling;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "leave-desk.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let directory = init_directory(config.leave_data_path.as_deref())?;
    let notifier = Arc::new(EmailJs::from_config(&config));
    let state = AppState::new(&config, directory, notifier);
    let limits = RateLimits::from_config(&config)?;

    let api_prefix = config.api_prefix.clone();
    info!(addr = %config.server_addr, prefix = %api_prefix, "Listening");

    HttpServer::new(move || build_app(state.clone(), api_prefix.clone(), limits.clone()))
        .bind(&config.server_addr)?
        .run()
        .await?;

    Ok(())
}
