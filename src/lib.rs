//! Resilient structured extraction for paginated Transfermarkt listings.
//!
//! The pipeline walks a fixed number of listing pages, parses each row
//! into a sparse [`record::EntityRecord`], optionally follows the entity's
//! detail page for enrichment, and hands the accumulated collection to the
//! CSV/JSON sinks. Extraction never fails the crawl: missing fields
//! degrade to defaults or omission, bad rows and bad pages are skipped and
//! reported through the [`events`] stream.
//!
//! Three listing configurations share the one parametrized driver, see
//! [`config::top_players`], [`config::young_player_stats`] and
//! [`config::young_talents`].

pub mod config;
pub mod crawl;
pub mod error;
pub mod events;
pub mod extract;
pub mod fetch;
pub mod record;
pub mod sink;

pub use crate::config::{CrawlConfig, Detail, PageStyle};
pub use crate::crawl::Crawler;
pub use crate::error::ScrapeError;
pub use crate::events::{CrawlEvent, CrawlObserver, LogObserver};
pub use crate::fetch::{FetchResponse, Fetcher, HttpFetcher};
pub use crate::record::{CrawlState, EntityRecord, FieldValue, PageResult, StatsTable};
