//! Terminal monitor polling the consultation list and logging new visitor activity.

use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use config::Config;
use dotenvy::dotenv;

use flooring_storefront::dto::chat::ChatDashboardData;
use flooring_storefront::models::config::ChatMonitorConfig;
use flooring_storefront::polling::{AdminChatMonitor, Poller};
use flooring_storefront::repository::StoreRepository;

/// Logs every consultation whose unread count grew since the previous poll.
fn report_activity(dashboard: &ChatDashboardData, seen: &mut HashMap<String, usize>) {
    for summary in &dashboard.consultations {
        let id = summary.consultation.id.to_string();
        let previous = seen.insert(id.clone(), summary.unread_count).unwrap_or(0);
        if summary.unread_count > previous {
            log::info!(
                "{} ({}) [{}]: {} unread, last: {}",
                summary.consultation.visitor_name,
                summary.consultation.visitor_contact,
                summary.consultation.status,
                summary.unread_count,
                summary.last_message.as_deref().unwrap_or("-")
            );
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name(&format!("config/{}", app_env)).required(false))
        .add_source(config::Environment::with_prefix("APP").separator("__"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            std::process::exit(1);
        }
    };

    let monitor_config = match settings.try_deserialize::<ChatMonitorConfig>() {
        Ok(monitor_config) => monitor_config,
        Err(err) => {
            log::error!("Error loading monitor config: {}", err);
            std::process::exit(1);
        }
    };

    let repo = match StoreRepository::connect(
        &monitor_config.store_url,
        monitor_config.store_api_key.clone(),
        Duration::from_secs(monitor_config.store_timeout_secs),
    ) {
        Ok(repo) => repo,
        Err(e) => {
            log::error!("Failed to set up the collection store: {e}");
            std::process::exit(1);
        }
    };

    let monitor = AdminChatMonitor::new(Arc::new(repo));
    let seen = Arc::new(Mutex::new(HashMap::new()));

    log::info!("Starting chat monitor");

    let interval = Duration::from_secs(monitor_config.poll_interval_secs.max(1));
    let handle = Poller::new("chat monitor", interval).spawn(move || {
        let monitor = monitor.clone();
        let seen = Arc::clone(&seen);
        async move {
            let dashboard = monitor.refresh_dashboard().await?;
            match seen.lock() {
                Ok(mut seen) => report_activity(&dashboard, &mut seen),
                Err(err) => log::warn!("Activity tracker unavailable: {err}"),
            }
            Ok::<(), flooring_storefront::services::ServiceError>(())
        }
    });

    if let Err(err) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown: {err}");
    }
    handle.stop();
    log::info!("Chat monitor stopped");
}
