//! Unit tests for record error types

#[cfg(test)]
mod tests {
    use crate::record::error::RecordError;
    use std::error::Error;

    #[test]
    fn test_empty_name_error() {
        let error = RecordError::EmptyName;
        assert_eq!(error.to_string(), "Record name must not be empty");
    }

    #[test]
    fn test_unknown_color_error() {
        let error = RecordError::UnknownColor('X');
        assert_eq!(error.to_string(), "Unknown color symbol 'X'");
    }

    #[test]
    fn test_duplicate_color_error() {
        let error = RecordError::DuplicateColor('W');
        let display = format!("{error}");
        assert!(display.contains("Duplicate"));
        assert!(display.contains('W'));
    }

    #[test]
    fn test_error_debug() {
        let error = RecordError::UnknownColor('Q');
        let debug = format!("{error:?}");
        assert!(debug.contains("UnknownColor"));
    }

    #[test]
    fn test_error_source() {
        assert!(RecordError::EmptyName.source().is_none());
    }
}
