//! Structured crawl events.
//!
//! The driver only emits events; rendering them is the observer's job.
//! [`LogObserver`] is the default and writes through `tracing`.

/// What happened during a crawl, page by page and row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    PageStarted { page: u32, url: String },
    PageSkipped { page: u32, status: Option<u16>, reason: String },
    PageCompleted { page: u32, rows: usize },
    RowSkipped { page: u32, reason: String },
    RecordCaptured { page: u32, name: String },
    CrawlFinished { records: usize, pages_skipped: u32 },
}

pub trait CrawlObserver {
    fn on_event(&self, event: &CrawlEvent);
}

/// Renders crawl events as tracing output.
#[derive(Debug, Default)]
pub struct LogObserver;

impl CrawlObserver for LogObserver {
    fn on_event(&self, event: &CrawlEvent) {
        match event {
            CrawlEvent::PageStarted { page, url } => {
                tracing::info!(page, url = %url, "fetching listing page");
            }
            CrawlEvent::PageSkipped { page, status, reason } => {
                tracing::warn!(page, status, reason = %reason, "skipping page");
            }
            CrawlEvent::PageCompleted { page, rows } => {
                tracing::info!(page, rows, "page completed");
            }
            CrawlEvent::RowSkipped { page, reason } => {
                tracing::warn!(page, reason = %reason, "skipping row");
            }
            CrawlEvent::RecordCaptured { page, name } => {
                tracing::info!(page, name = %name, "record captured");
            }
            CrawlEvent::CrawlFinished { records, pages_skipped } => {
                tracing::info!(records, pages_skipped, "crawl finished");
            }
        }
    }
}
