use anyhow::{Context, Result};
use frostwacht::config::FrostwachtConfig;
use frostwacht::provider::WeatherApiClient;
use frostwacht::storage::FjallStorage;
use frostwacht::{CacheEntry, WeatherStore, advisory};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Reference surface area for the grit estimate when none is given, m²
const DEFAULT_AREA_M2: f64 = 1000.0;

#[tokio::main]
async fn main() -> Result<()> {
    let config = FrostwachtConfig::load()?;
    init_tracing(&config);

    let mut args = std::env::args().skip(1);
    let address = args
        .next()
        .context("Usage: frostwacht <address> [area_m2]")?;
    let area_m2 = match args.next() {
        Some(raw) => raw
            .parse::<f64>()
            .with_context(|| format!("Invalid surface area '{raw}'"))?,
        None => DEFAULT_AREA_M2,
    };

    let client = Arc::new(WeatherApiClient::new(config.provider.clone())?);
    let storage = Arc::new(FjallStorage::open(storage_path(
        &config.cache.storage_location,
    ))?);
    let mut store = WeatherStore::new(
        client.clone(),
        storage,
        config.cache_ttl(),
        config.provider.forecast_days,
        config.notifications.snowfall_horizon_hours as usize,
    );

    let location = client.geocode(&address).await?;
    let entry = store
        .get_weather_data(location.coordinates, &location.name)
        .await?;

    print_report(&entry, area_m2);
    Ok(())
}

fn init_tracing(config: &FrostwachtConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Expand a leading `~/` to the user's home directory
fn storage_path(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

fn print_report(entry: &CacheEntry, area_m2: f64) {
    println!(
        "Weather for {} ({})",
        entry.location_label,
        entry.coordinates.format()
    );
    println!(
        "Currently {} / {}, {}",
        entry.current.format_temperature(),
        entry.current.condition,
        if entry.advisories.winter_service_required {
            "winter service required"
        } else {
            "no winter service required"
        }
    );
    println!(
        "Ice risk: {} - {}",
        entry.advisories.ice_risk.risk, entry.advisories.ice_risk.description
    );

    match advisory::calculate_optimal_clearing_time(&entry.hourly) {
        Some(best) => println!("Best clearing time: {}", best.format("%a %H:%M")),
        None => println!("Best clearing time: no forecast available"),
    }

    let grit = advisory::calculate_required_grit(area_m2, entry.advisories.ice_risk.risk);
    println!(
        "For {area_m2:.0} m²: {:.1} kg salt or {:.1} kg grit",
        grit.salt_kg, grit.grit_kg
    );

    let snowfall = &entry.advisories.snowfall;
    if snowfall.will_snow {
        let window = match (snowfall.start_time, snowfall.end_time) {
            (Some(start), Some(end)) => {
                format!(" between {} and {}", start.format("%a %H:%M"), end.format("%a %H:%M"))
            }
            _ => String::new(),
        };
        println!(
            "Snowfall expected: {:.1} cm{window}",
            snowfall.total_amount_cm
        );
    } else {
        println!("No snowfall expected within the forecast horizon");
    }

    println!();
    println!("Daily outlook:");
    for day in &entry.daily {
        let max = day
            .max_temperature
            .map_or_else(|| "–".to_string(), |t| format!("{t:.1}°C"));
        let min = day
            .min_temperature
            .map_or_else(|| "–".to_string(), |t| format!("{t:.1}°C"));
        println!(
            "  {} {:>7} / {:<7} {} ({:.1} mm, {:.1} cm snow)",
            day.date, max, min, day.condition, day.precipitation_sum, day.snow_amount_cm
        );
    }
}
