use anyhow::{Context, Result};
use std::path::Path;

use genius_client::{Config, GeniusClient};
use genius_core::render_table;

/// Gather terms from the command line followed by those in `file`.
///
/// File terms are one per line; blank lines and `#` comments are skipped.
pub fn collect_terms(args: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut terms = args.to_vec();

    if let Some(path) = file {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read terms from {}", path.display()))?;
        terms.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_string),
        );
    }

    Ok(terms)
}

pub async fn run_batch(
    config: &Config,
    terms: Vec<String>,
    concurrency: Option<usize>,
    json: bool,
) -> Result<()> {
    if terms.is_empty() {
        anyhow::bail!("No search terms given\n\nPass terms as arguments or with --file");
    }

    let client = GeniusClient::new(config).context("Failed to create Genius client")?;
    let workers = concurrency.unwrap_or_else(|| client.concurrency());

    let rows = client.lookup_all_with(terms, workers).await;

    if json {
        let out = serde_json::to_string_pretty(&rows).context("Failed to serialize rows")?;
        println!("{out}");
    } else {
        println!("{}", render_table(&rows));
    }

    let failed = rows.iter().filter(|r| r.error.is_some()).count();
    if failed > 0 {
        log::warn!("{} of {} lookups reported errors", failed, rows.len());
    }

    Ok(())
}
