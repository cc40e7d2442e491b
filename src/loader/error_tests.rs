//! Unit tests for loader error types

#[cfg(test)]
mod tests {
    use crate::loader::error::LoaderError;
    use std::error::Error;
    use std::io;

    #[test]
    fn test_io_error_display() {
        let error = LoaderError::io(
            "/data/cards.json",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        let display = error.to_string();
        assert!(display.contains("/data/cards.json"));
        assert!(display.contains("missing"));
    }

    #[test]
    fn test_io_error_has_source() {
        let error = LoaderError::io("x.json", io::Error::other("boom"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_json_error_display() {
        let source = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let error = LoaderError::json("cards.json", source);
        assert!(error.to_string().starts_with("Invalid JSON in cards.json"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_status_error_display() {
        let error = LoaderError::Status {
            url: "https://api.example/cards/search?page=2".into(),
            status: 429,
        };
        assert_eq!(
            error.to_string(),
            "Request to https://api.example/cards/search?page=2 returned HTTP 429"
        );
        assert!(error.source().is_none());
    }

    #[test]
    fn test_page_limit_error_display() {
        let error = LoaderError::PageLimit { limit: 3 };
        assert!(error.to_string().contains("3 pages"));
    }

    #[test]
    fn test_exhausted_error() {
        let error = LoaderError::Exhausted;
        assert_eq!(error.to_string(), "No loader produced any records");
        assert!(error.source().is_none());
    }
}
