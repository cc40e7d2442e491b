//! Scryfall card search pages
//!
//! Pages of the card search API have the shape
//! `{"object": "list", "data": [...], "has_more": ..., "next_page": ...}`.
//! [`ScryfallClient`] requests them through a [`PageFetcher`], following
//! `next_page` while `has_more` is set, and [`ScryfallPageLoader`] reads pages
//! saved to disk. Both turn commander cards into records the same way.
//!
//! Double-faced cards take name and rules text from the front face. A card
//! has a partner ability when its rules text mentions "Partner" or
//! "partner"; "Partner with X" names X up to the first newline, `.`, `,`,
//! `;`, `(` or `)`. Because card names themselves contain commas, a
//! truncated partner name is afterwards expanded to the unique loaded name it
//! prefixes.

use super::error::LoaderError;
use super::{RecordLoader, dedup_records};
use crate::record::{ColorIdentity, PartnerKind, Record};
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Search for every paper commander, most played first
pub const COMMANDER_SEARCH_URL: &str =
    "https://api.scryfall.com/cards/search?order=edhrec&q=(game%3Apaper)+legal%3Acommander+is%3Acommander";

/// Most pages one fetch will follow
pub const DEFAULT_MAX_PAGES: usize = 200;

/// Pause between page requests
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(100);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

static PARTNER_WITH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Partner with ([^\n.,;()]+)").expect("partner pattern is valid"));

/// One page of search results
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_page: Option<String>,
    #[serde(default)]
    pub data: Vec<CardObject>,
}

/// A card as returned by the search API, reduced to the fields we use
#[derive(Debug, Clone, Deserialize)]
pub struct CardObject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
    #[serde(default)]
    pub color_identity: Vec<String>,
    #[serde(default)]
    pub cmc: f64,
    #[serde(default)]
    pub card_faces: Vec<CardFace>,
}

/// One face of a multi-faced card
#[derive(Debug, Clone, Deserialize)]
pub struct CardFace {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub oracle_text: Option<String>,
}

/// Partner ability described by a card's rules text
#[must_use]
pub fn partner_from_oracle(oracle_text: &str) -> PartnerKind {
    if !oracle_text.contains("Partner") && !oracle_text.contains("partner") {
        return PartnerKind::None;
    }

    PARTNER_WITH
        .captures(oracle_text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|name| !name.is_empty())
        .map_or(PartnerKind::OpenPartner, |name| {
            PartnerKind::FixedPartner(name.to_string())
        })
}

impl CardObject {
    /// Convert to a record, or `None` if the card lacks a usable name or
    /// color identity
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_record(&self) -> Option<Record> {
        let (name, oracle_text) = match self.card_faces.first() {
            Some(front) => (front.name.as_deref(), front.oracle_text.as_deref()),
            None => (self.name.as_deref(), self.oracle_text.as_deref()),
        };
        let Some(name) = name else {
            warn!("Card without a name, skipping");
            return None;
        };

        let colors = match ColorIdentity::parse(&self.color_identity.concat()) {
            Ok(colors) => colors,
            Err(e) => {
                warn!(card = name, error = %e, "Skipping card with bad color identity");
                return None;
            }
        };
        let mana_value = if self.cmc.is_finite() && self.cmc > 0.0 {
            self.cmc as u32
        } else {
            0
        };
        let partner = partner_from_oracle(oracle_text.unwrap_or_default());

        Record::new(name, colors, mana_value, partner).ok()
    }
}

/// Records from one page's JSON
///
/// # Errors
///
/// Returns the `serde_json` error if `json` is not a search page.
pub fn parse_page(json: &str) -> Result<Vec<Record>, serde_json::Error> {
    let page: SearchPage = serde_json::from_str(json)?;
    Ok(page.data.iter().filter_map(CardObject::to_record).collect())
}

/// Expand partner names cut short at a comma to the full loaded name
///
/// A fixed partner that is not a loaded name but prefixes exactly one loaded
/// name is replaced with that name. Ambiguous or unknown prefixes are kept.
#[must_use]
pub fn complete_partner_names(records: Vec<Record>) -> Vec<Record> {
    let names: Vec<String> = records.iter().map(|r| r.name().to_string()).collect();

    records
        .into_iter()
        .map(|record| {
            let PartnerKind::FixedPartner(partner) = record.partner() else {
                return record;
            };
            if names.iter().any(|n| n == partner) {
                return record;
            }
            let mut matches = names.iter().filter(|n| n.starts_with(partner.as_str()));
            match (matches.next(), matches.next()) {
                (Some(full), None) => {
                    debug!(record = record.name(), partner = %full, "Completed partner name");
                    Record::new(
                        record.name(),
                        record.colors().clone(),
                        record.mana_value(),
                        PartnerKind::FixedPartner(full.clone()),
                    )
                    .unwrap_or(record)
                }
                _ => record,
            }
        })
        .collect()
}

/// Loads records from saved search pages
#[derive(Debug, Clone)]
pub struct ScryfallPageLoader {
    pages: Vec<PathBuf>,
}

impl ScryfallPageLoader {
    #[must_use]
    pub fn new(pages: Vec<PathBuf>) -> Self {
        Self { pages }
    }
}

impl RecordLoader for ScryfallPageLoader {
    fn describe(&self) -> String {
        format!("{} saved search page(s)", self.pages.len())
    }

    fn load(&self) -> Result<Vec<Record>, LoaderError> {
        let mut records = Vec::new();
        for path in &self.pages {
            let data = fs::read(path).map_err(|e| LoaderError::io(path, e))?;
            let page: SearchPage =
                serde_json::from_slice(&data).map_err(|e| LoaderError::json(path, e))?;
            if page.has_more {
                debug!(
                    path = %path.display(),
                    next = page.next_page.as_deref().unwrap_or_default(),
                    "Page has more results"
                );
            }
            records.extend(page.data.iter().filter_map(CardObject::to_record));
        }
        Ok(complete_partner_names(dedup_records(records)))
    }
}

/// Source of search pages by URL
pub trait PageFetcher: Send + Sync {
    /// Fetch and decode the page at `url`
    ///
    /// # Errors
    ///
    /// Returns `LoaderError` if the page cannot be fetched or decoded.
    fn fetch_page(&self, url: &str) -> Result<SearchPage, LoaderError>;
}

/// Fetches search pages over HTTP
pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    /// # Errors
    ///
    /// Returns `LoaderError::Http` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, LoaderError> {
        let client = Client::builder()
            .user_agent(concat!("fetchr/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LoaderError::http("client setup", e))?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpPageFetcher {
    fn fetch_page(&self, url: &str) -> Result<SearchPage, LoaderError> {
        debug!(url, "Requesting search page");
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .map_err(|e| LoaderError::http(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        response.json().map_err(|e| LoaderError::http(url, e))
    }
}

/// Pages through a live card search
pub struct ScryfallClient<F = HttpPageFetcher> {
    fetcher: F,
    start_url: String,
    max_pages: usize,
    page_delay: Duration,
}

impl ScryfallClient<HttpPageFetcher> {
    /// HTTP client for the search at `start_url`
    ///
    /// # Errors
    ///
    /// Returns `LoaderError::Http` if the HTTP client cannot be built.
    pub fn new(start_url: impl Into<String>) -> Result<Self, LoaderError> {
        Ok(Self::with_fetcher(HttpPageFetcher::new()?, start_url))
    }
}

impl<F: PageFetcher> ScryfallClient<F> {
    #[must_use]
    pub fn with_fetcher(fetcher: F, start_url: impl Into<String>) -> Self {
        Self {
            fetcher,
            start_url: start_url.into(),
            max_pages: DEFAULT_MAX_PAGES,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }

    #[must_use]
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    #[must_use]
    pub fn page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    /// Commanders from every page of the search
    ///
    /// Follows `next_page` while the current page reports `has_more`.
    ///
    /// # Errors
    ///
    /// Returns the first page error, or `LoaderError::PageLimit` when the
    /// last page is not reached within `max_pages`.
    pub fn fetch_all(&self) -> Result<Vec<Record>, LoaderError> {
        let mut records = Vec::new();
        let mut url = self.start_url.clone();

        for page_number in 1..=self.max_pages {
            let page = self.fetcher.fetch_page(&url)?;
            let before = records.len();
            records.extend(page.data.iter().filter_map(CardObject::to_record));
            debug!(page = page_number, cards = records.len() - before, "Search page read");

            match (page.has_more, page.next_page) {
                (true, Some(next)) => {
                    url = next;
                    if !self.page_delay.is_zero() {
                        thread::sleep(self.page_delay);
                    }
                }
                _ => {
                    info!(pages = page_number, cards = records.len(), "Search complete");
                    return Ok(complete_partner_names(dedup_records(records)));
                }
            }
        }
        Err(LoaderError::PageLimit {
            limit: self.max_pages,
        })
    }
}

impl<F: PageFetcher> RecordLoader for ScryfallClient<F> {
    fn describe(&self) -> String {
        format!("card search {}", self.start_url)
    }

    fn load(&self) -> Result<Vec<Record>, LoaderError> {
        self.fetch_all()
    }
}
