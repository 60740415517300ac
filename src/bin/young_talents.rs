//! Under-21 talents with biographical and physical enrichment.

use std::path::Path;

use anyhow::Result;

use tmscrape::{Crawler, HttpFetcher, config, sink};

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let fetcher = HttpFetcher::new()?;
    let state = Crawler::new(config::young_talents(), &fetcher).run();

    if state.is_empty() {
        tracing::warn!("no records scraped, nothing to persist");
        return Ok(());
    }

    sink::save_csv(Path::new("transfermarkt_young_talents.csv"), &state.records)?;
    sink::save_json(Path::new("transfermarkt_young_talents.json"), &state.records)?;
    tracing::info!(
        records = state.records.len(),
        "saved transfermarkt_young_talents.csv and transfermarkt_young_talents.json"
    );
    Ok(())
}
