//! Default pipeline: top-value players with biographical enrichment.

use std::path::Path;

use anyhow::Result;

use tmscrape::{Crawler, HttpFetcher, config, sink};

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let fetcher = HttpFetcher::new()?;
    let state = Crawler::new(config::top_players(), &fetcher).run();

    if state.is_empty() {
        tracing::warn!("no records scraped, nothing to persist");
        return Ok(());
    }

    sink::save_csv(Path::new("transfermarkt_players.csv"), &state.records)?;
    sink::save_json(Path::new("transfermarkt_players.json"), &state.records)?;
    tracing::info!(
        records = state.records.len(),
        "saved transfermarkt_players.csv and transfermarkt_players.json"
    );
    Ok(())
}
