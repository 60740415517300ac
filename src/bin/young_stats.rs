//! Under-21 players with the full match-statistics column set.

use std::path::Path;

use anyhow::Result;

use tmscrape::{Crawler, HttpFetcher, config, sink};

fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let fetcher = HttpFetcher::new()?;
    let state = Crawler::new(config::young_player_stats(), &fetcher).run();

    if state.is_empty() {
        tracing::warn!("no stats scraped, nothing to persist");
        return Ok(());
    }

    sink::save_csv(Path::new("young_players_stats.csv"), &state.records)?;
    sink::save_json(Path::new("young_players_stats.json"), &state.records)?;
    tracing::info!(
        records = state.records.len(),
        "saved young_players_stats.csv and young_players_stats.json"
    );
    Ok(())
}
