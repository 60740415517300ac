/// Errors that can escape the scraping library.
///
/// Nothing in here ever aborts a crawl: the pagination driver consumes
/// fetch errors page-by-page and row-by-row, so `ScrapeError` only reaches
/// callers from the `Fetcher` itself or from the output sinks.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// An HTTP request failed at the transport level.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A configured URL could not be parsed.
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Writing the tabular output failed.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the structured output failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O operation failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
