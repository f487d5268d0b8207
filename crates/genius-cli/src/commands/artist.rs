use anyhow::{Context, Result};
use genius_client::{Config, GeniusClient};

pub async fn run_artist(config: &Config, term: &str) -> Result<()> {
    let client = GeniusClient::new(config).context("Failed to create Genius client")?;

    let record = client.get_artist(term).await;
    if record.is_empty() {
        log::warn!("No artist found for '{}'", term);
    }

    let json = serde_json::to_string_pretty(&record).context("Failed to serialize artist")?;
    println!("{json}");

    Ok(())
}
