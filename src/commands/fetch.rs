//! Fetch command - download the commander dataset from the card search API

use crate::{
    FetchrError,
    commands::import::save_dataset,
    loader::{COMMANDER_SEARCH_URL, ScryfallClient},
};
use std::path::Path;

type Result<T> = std::result::Result<T, FetchrError>;

/// Execute the fetch command
///
/// Pages through the search at `url` (every paper commander by default) and
/// writes the dataset to `out`.
///
/// # Errors
/// Returns an error if a page request fails, no commander was found, or the
/// output cannot be written
pub fn execute(out: &Path, url: Option<&str>, quiet: bool) -> Result<()> {
    let client = ScryfallClient::new(url.unwrap_or(COMMANDER_SEARCH_URL))?;
    if !quiet {
        eprintln!("Fetching commanders...");
    }

    let count = save_dataset(&client, out)?;
    if !quiet {
        println!("Wrote {count} commander(s) to {}", out.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{JsonRecordLoader, LoaderError, PageFetcher, RecordLoader, SearchPage};
    use std::time::Duration;

    struct SinglePage(&'static str);

    impl PageFetcher for SinglePage {
        fn fetch_page(&self, url: &str) -> std::result::Result<SearchPage, LoaderError> {
            serde_json::from_str(self.0).map_err(|e| LoaderError::json(url, e))
        }
    }

    #[test]
    fn test_fetched_pages_saved_as_dataset() {
        let page = r#"{"object": "list", "has_more": false, "data": [
            {"name": "Tymna the Weaver", "color_identity": ["W", "B"], "cmc": 3.0,
             "oracle_text": "Partner (You can have two commanders if both have partner.)"}
        ]}"#;
        let client = ScryfallClient::with_fetcher(SinglePage(page), "mem://search")
            .page_delay(Duration::ZERO);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("data").join("commanders.json");

        assert_eq!(save_dataset(&client, &out).unwrap(), 1);
        let records = JsonRecordLoader::new(&out).load().unwrap();
        assert_eq!(records[0].name(), "Tymna the Weaver");
        assert!(records[0].partner().is_eligible());
    }

    #[test]
    fn test_empty_search_writes_nothing() {
        let client = ScryfallClient::with_fetcher(SinglePage(r#"{"data": []}"#), "mem://search");
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("commanders.json");

        assert!(matches!(
            save_dataset(&client, &out),
            Err(FetchrError::InvalidInput(_))
        ));
        assert!(!out.exists());
    }
}
