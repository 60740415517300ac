//! The fetch contract and its HTTP implementation.
//!
//! The pagination driver and the detail enricher only ever talk to a
//! [`Fetcher`], so tests can swap in canned documents and the crawl logic
//! stays network-free.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use url::Url;

use crate::error::ScrapeError;

/// The site rejects requests without a browser user-agent, so this literal
/// string goes out on every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Header set applied to every outgoing request.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers
}

/// A fetched document: HTTP status plus raw body.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

impl FetchResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// `fetch(url) -> (status, body)`. An `Err` means the transport itself
/// failed; a non-success status comes back as a normal response and is the
/// caller's problem.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse, ScrapeError>;
}

/// Blocking reqwest-backed fetcher with the fixed header set.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, ScrapeError> {
        Self::with_headers(default_headers())
    }

    pub fn with_headers(headers: HeaderMap) -> Result<Self, ScrapeError> {
        let client = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(8))
            .timeout(Duration::from_secs(25))
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse, ScrapeError> {
        let url = Url::parse(url)?;
        let response = self.client.get(url).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(FetchResponse { status, body })
    }
}

/// Canned fetcher for tests: URL -> (status, body), unknown URLs 404,
/// URLs in `broken` fail at the transport level.
#[cfg(test)]
pub(crate) struct StaticFetcher {
    pages: std::collections::HashMap<String, (u16, String)>,
    broken: std::collections::HashSet<String>,
}

#[cfg(test)]
impl StaticFetcher {
    pub fn new() -> Self {
        Self {
            pages: std::collections::HashMap::new(),
            broken: std::collections::HashSet::new(),
        }
    }

    pub fn insert(&mut self, url: &str, status: u16, body: &str) {
        self.pages.insert(url.to_owned(), (status, body.to_owned()));
    }

    pub fn break_url(&mut self, url: &str) {
        self.broken.insert(url.to_owned());
    }
}

#[cfg(test)]
impl Fetcher for StaticFetcher {
    fn fetch(&self, url: &str) -> Result<FetchResponse, ScrapeError> {
        if self.broken.contains(url) {
            return Err(ScrapeError::Io(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "connection reset",
            )));
        }
        match self.pages.get(url) {
            Some((status, body)) => Ok(FetchResponse {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(FetchResponse {
                status: 404,
                body: String::new(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_headers_carry_browser_user_agent() {
        let headers = default_headers();
        assert_eq!(
            headers.get(USER_AGENT).and_then(|v| v.to_str().ok()),
            Some(DEFAULT_USER_AGENT),
        );
    }

    #[test]
    fn status_classes() {
        let ok = FetchResponse { status: 200, body: String::new() };
        let redirect = FetchResponse { status: 301, body: String::new() };
        let missing = FetchResponse { status: 404, body: String::new() };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
        assert!(!missing.is_success());
    }
}
