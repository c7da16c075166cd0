//! ipstack-client - command line lookup
//!
//! Composition root: loads configuration from the environment, builds the
//! client and prints the raw location of every address given as argument.

use ipstack_client::{load_config, IpStackClient, Location};
use tracing_subscriber::fmt::format::FmtSpan;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    let log_level = if std::env::var("DEBUG").is_ok() {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr)
        .init();

    let addresses: Vec<String> = std::env::args().skip(1).collect();
    if addresses.is_empty() {
        anyhow::bail!("usage: ipstack-client <ipv4-address> [<ipv4-address>...]");
    }

    // Load configuration from environment
    let cfg = load_config()?;

    tracing::info!(
        "looking up {} address(es) via {} timeout={:?} max_retries={}",
        addresses.len(),
        cfg.base_url,
        cfg.timeout,
        cfg.max_retries
    );

    let client = IpStackClient::new(cfg)?;

    let locations: Vec<Location> = if addresses.len() == 1 {
        vec![client.get_location(&addresses[0]).await?]
    } else {
        client.get_multiple_locations(&addresses).await?
    };

    for location in &locations {
        tracing::info!(
            "{} -> {} ({}), {}",
            location.ip().unwrap_or("-"),
            location.country_name().unwrap_or("-"),
            location.country_code().unwrap_or("-"),
            location.continent_name().unwrap_or("-")
        );
        println!(
            "{}",
            serde_json::to_string_pretty(location.raw_location_data())?
        );
    }

    Ok(())
}
