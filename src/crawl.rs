//! The pagination driver.
//!
//! Strictly serial: page N is fully processed (every row, including its
//! optional detail fetch) before page N+1 is requested, with blocking
//! rate-limit pauses after each captured row and each completed page.
//! Failures never abort the crawl — a bad page or row is logged through
//! the observer and skipped.

use std::thread;

use scraper::{Html, Selector};

use crate::config::{CrawlConfig, Detail};
use crate::events::{CrawlEvent, CrawlObserver, LogObserver};
use crate::extract::{detail, row::extract_row};
use crate::fetch::Fetcher;
use crate::record::{CrawlState, EntityRecord, FieldValue, PageResult};

static LOG_OBSERVER: LogObserver = LogObserver;

pub struct Crawler<'a> {
    config: CrawlConfig,
    fetcher: &'a dyn Fetcher,
    observer: &'a dyn CrawlObserver,
}

impl<'a> Crawler<'a> {
    pub fn new(config: CrawlConfig, fetcher: &'a dyn Fetcher) -> Self {
        Self {
            config,
            fetcher,
            observer: &LOG_OBSERVER,
        }
    }

    pub fn with_observer(mut self, observer: &'a dyn CrawlObserver) -> Self {
        self.observer = observer;
        self
    }

    /// Runs the crawl for the configured page count and returns whatever
    /// accumulated. Never errors: partial results beat an aborted crawl.
    pub fn run(&self) -> CrawlState {
        let row_selector = Selector::parse(self.config.row.row_selector).unwrap();
        let mut state = CrawlState::default();

        for page in 1..=self.config.total_pages {
            let url = self.config.page_url(page);
            state.pages_attempted += 1;
            self.observer.on_event(&CrawlEvent::PageStarted {
                page,
                url: url.clone(),
            });

            let body = match self.fetcher.fetch(&url) {
                Ok(response) if response.is_success() => response.body,
                Ok(response) => {
                    state.pages_skipped += 1;
                    self.observer.on_event(&CrawlEvent::PageSkipped {
                        page,
                        status: Some(response.status),
                        reason: "non-success status".to_owned(),
                    });
                    continue;
                }
                Err(e) => {
                    state.pages_skipped += 1;
                    self.observer.on_event(&CrawlEvent::PageSkipped {
                        page,
                        status: None,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            let doc = Html::parse_document(&body);
            let mut page_records: PageResult = Vec::new();

            for row in doc.select(&row_selector) {
                let Some(mut record) =
                    extract_row(row, &self.config.row, &self.config.site_root)
                else {
                    state.rows_skipped += 1;
                    self.observer.on_event(&CrawlEvent::RowSkipped {
                        page,
                        reason: "name anchor missing".to_owned(),
                    });
                    continue;
                };

                if let Err(reason) = self.enrich_record(&mut record) {
                    state.rows_skipped += 1;
                    self.observer
                        .on_event(&CrawlEvent::RowSkipped { page, reason });
                    continue;
                }

                let name = record
                    .get("name")
                    .and_then(FieldValue::as_text)
                    .unwrap_or_default()
                    .to_owned();
                self.observer
                    .on_event(&CrawlEvent::RecordCaptured { page, name });
                page_records.push(record);
                thread::sleep(self.config.row_delay);
            }

            state.pages_succeeded += 1;
            self.observer.on_event(&CrawlEvent::PageCompleted {
                page,
                rows: page_records.len(),
            });
            state.records.extend(page_records);
            thread::sleep(self.config.page_delay);
        }

        self.observer.on_event(&CrawlEvent::CrawlFinished {
            records: state.records.len(),
            pages_skipped: state.pages_skipped,
        });
        state
    }

    /// Runs the configured detail fetch for one record. A non-success
    /// detail status leaves the record less populated; a transport failure
    /// skips the row, so the reason comes back as a plain string for the
    /// event stream.
    fn enrich_record(&self, record: &mut EntityRecord) -> Result<(), String> {
        let Some(profile_url) = record
            .get("profile_url")
            .and_then(FieldValue::as_text)
            .map(str::to_owned)
        else {
            return Ok(());
        };
        match &self.config.detail {
            Detail::Off => Ok(()),
            Detail::Biography(spec) => {
                let details = detail::enrich(self.fetcher, spec, &profile_url)
                    .map_err(|e| format!("detail fetch failed: {e}"))?;
                for (key, value) in details {
                    record.insert(key, FieldValue::Text(value));
                }
                Ok(())
            }
            Detail::CompetitionStats => {
                let table = detail::enrich_stats(self.fetcher, &profile_url)
                    .map_err(|e| format!("stats fetch failed: {e}"))?;
                if !table.is_empty() {
                    record.insert("competitions".to_owned(), FieldValue::Table(table));
                }
                Ok(())
            }
        }
    }
}
