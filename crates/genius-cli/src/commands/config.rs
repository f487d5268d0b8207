use anyhow::Result;
use genius_client::config::{self, Config};

/// Show the current effective configuration.
pub fn show_config(config: &Config) -> Result<()> {
    println!("Current Configuration");
    println!("=====================\n");

    let config_path = config::config_file_path();
    println!("Config file: {}", config_path.display());
    println!(
        "File exists: {}\n",
        if config_path.exists() { "yes" } else { "no (using defaults)" }
    );

    println!("Settings:");
    println!(
        "  access_token: {}",
        if config.token().is_some() { "<set>" } else { "<not set>" }
    );
    println!("  base_url: {}", config.base_url);
    println!("  timeout_seconds: {}", config.timeout_seconds);
    println!(
        "  fallback_source_path: {}",
        config
            .fallback_source_path
            .as_ref()
            .map_or_else(|| "<not set>".to_string(), |p| p.display().to_string())
    );
    println!("  retry_on_rate_limit: {}", config.retry_on_rate_limit);
    println!("  rate_limit_delay_ms: {}", config.rate_limit_delay_ms);
    println!("  concurrency: {}", config.concurrency);

    if config.token().is_none() {
        println!("\nNo access token: lookups run in fallback-only mode.");
    }

    println!("\nPriority: CLI args > ENV vars (GENIUS_*) > Config file > Defaults");

    Ok(())
}

/// Show the config file path.
pub fn show_path() -> Result<()> {
    println!("{}", config::config_file_path().display());
    Ok(())
}

/// Show example configuration.
pub fn show_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

/// Initialize config file with defaults.
pub fn init_config() -> Result<()> {
    let created = config::ensure_config_file()?;
    let config_path = config::config_file_path();

    if created {
        println!("✓ Created config file: {}", config_path.display());
        println!("\nEdit this file to set your Genius access token.");
    } else {
        println!("Config file already exists: {}", config_path.display());
    }

    Ok(())
}
