//! Import command - convert saved search pages into a dataset file

use crate::{
    FetchrError,
    loader::{RecordLoader, ScryfallPageLoader, write_records},
};
use std::path::{Path, PathBuf};

type Result<T> = std::result::Result<T, FetchrError>;

/// Convert `pages` and write the result to `out`
///
/// Returns the number of records written.
///
/// # Errors
/// Returns an error if a page cannot be read or parsed, no commander was
/// found, or the output cannot be written
pub fn import(pages: &[PathBuf], out: &Path) -> Result<usize> {
    save_dataset(&ScryfallPageLoader::new(pages.to_vec()), out)
}

/// Run `loader` and write its records to `out`
///
/// Returns the number of records written. Nothing is written when the
/// loader finds no commanders.
///
/// # Errors
/// Returns the loader error, `FetchrError::InvalidInput` for an empty result,
/// or the write error
pub fn save_dataset(loader: &impl RecordLoader, out: &Path) -> Result<usize> {
    let records = loader.load()?;
    if records.is_empty() {
        return Err(FetchrError::InvalidInput(format!(
            "No commanders found in {}",
            loader.describe()
        )));
    }

    write_records(out, &records)?;
    Ok(records.len())
}

/// Execute the import command
///
/// # Errors
/// See [`import`]
pub fn execute(pages: &[PathBuf], out: &Path, quiet: bool) -> Result<()> {
    let count = import(pages, out)?;
    if !quiet {
        println!("Wrote {count} commander(s) to {}", out.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::JsonRecordLoader;
    use crate::record::PartnerKind;
    use crate::testing::write_temp_json;

    const PAGE: &str = r#"{
        "object": "list",
        "has_more": false,
        "data": [
            {"name": "Kraum, Ludevic's Opus", "color_identity": ["U", "R"], "cmc": 5.0,
             "oracle_text": "Flying, haste\nPartner (You can have two commanders if both have partner.)"},
            {"name": "Edgar Markov", "color_identity": ["W", "B", "R"], "cmc": 6.0,
             "oracle_text": "Eminence"}
        ]
    }"#;

    #[test]
    fn test_import_writes_loadable_dataset() {
        let page = write_temp_json(PAGE);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("commanders.json");

        let count = import(&[page.path().to_path_buf()], &out).unwrap();
        assert_eq!(count, 2);

        let records = JsonRecordLoader::new(&out).load().unwrap();
        assert_eq!(records[0].name(), "Kraum, Ludevic's Opus");
        assert_eq!(records[0].partner(), &PartnerKind::OpenPartner);
        assert_eq!(records[1].mana_value(), 6);
    }

    #[test]
    fn test_import_empty_page_fails() {
        let page = write_temp_json(r#"{"object": "list", "data": []}"#);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("commanders.json");

        assert!(matches!(
            import(&[page.path().to_path_buf()], &out),
            Err(FetchrError::InvalidInput(_))
        ));
        assert!(!out.exists());
    }
}
