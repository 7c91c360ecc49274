//! Hatchery status report
//!
//! Prints the active flocks with their age, status and cycle labels, and
//! the egg batches in storage with their days on hand.

use chrono::Local;
use hatchery_dashboard::services::{EggStorageService, FlockService};
use hatchery_dashboard::{ApiClient, Config};
use shared::format_thousands;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hatchery_dashboard=debug,hatchery_report=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;
    tracing::info!("Environment: {}", config.environment);
    tracing::info!("Backend: {}", config.api.base_url);

    let api = ApiClient::new(&config.api)?;
    let today = Local::now().date_naive();

    let mut flocks = FlockService::new(api.clone(), &config);
    flocks.refresh().await;

    println!(
        "{:<16} {:<12} {:>5} {:>9} {:>4}  {:<10} {:>7} {:>7}",
        "Lotto", "Allevamento", "Cap.", "Capi", "Età", "Stato", "Inizio", "Fine"
    );
    for row in flocks.overview(today) {
        println!(
            "{:<16} {:<12} {:>5} {:>9} {:>4}  {:<10} {:>7} {:>7}",
            row.code,
            row.farm,
            row.shed,
            format_thousands(row.head_count),
            row.age,
            row.status.label_it(),
            row.cycle_start.to_string(),
            row.cycle_end.to_string(),
        );
    }

    let mut storage = EggStorageService::new(api, config.grid);
    storage.refresh(today).await;

    println!();
    println!(
        "{:<12} {:<16} {:<14} {:>9} {:>8}",
        "Prodotto", "Nome", "Origine", "Uova", "Giorni"
    );
    for row in storage.rows(today) {
        println!(
            "{:<12} {:<16} {:<14} {:>9} {:>8}{}",
            row.entry.prodotto,
            row.entry.nome,
            row.entry.origine,
            format_thousands(row.entry.display_quantity()),
            row.giacenza,
            if row.stale { " !" } else { "" },
        );
    }
    for (product, total) in storage.totals() {
        println!("Totale {}: {}", product, format_thousands(total));
    }

    Ok(())
}
