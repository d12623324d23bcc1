// src/lookup/mod.rs
use std::{
    collections::{BTreeSet, HashMap},
    path::Path,
};
use tracing::{debug, info, warn};

use crate::config::Columns;
use crate::csv_source::CsvSource;
use crate::error::Result;

/// Country code → continent name, built once from the reference table.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContinentLookup {
    by_code: HashMap<String, String>,
}

impl ContinentLookup {
    /// Continent for `code`, if the reference table listed it.
    pub fn get(&self, code: &str) -> Option<&str> {
        self.by_code.get(code).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl FromIterator<(String, String)> for ContinentLookup {
    /// Later pairs overwrite earlier ones with the same code.
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            by_code: iter.into_iter().collect(),
        }
    }
}

/// Read the reference table at `path` into a [`ContinentLookup`].
///
/// Both the code and continent columns must be named in the header; a repeated
/// code keeps the continent from its last row.
#[tracing::instrument(level = "info", skip(path, columns), fields(path = %path.as_ref().display()))]
pub fn build_lookup<P: AsRef<Path>>(
    path: P,
    columns: &Columns,
    delimiter: u8,
) -> Result<ContinentLookup> {
    let mut src = CsvSource::open(path, delimiter)?;
    let code_idx = src.require_column(&columns.reference_code)?;
    let continent_idx = src.require_column(&columns.reference_continent)?;

    let mut by_code: HashMap<String, String> = HashMap::new();
    let mut overridden: BTreeSet<String> = BTreeSet::new();
    let mut rows = 0usize;
    for record in src.records() {
        let record = record?;
        rows += 1;
        // short rows read as empty cells
        let code = record.get(code_idx).unwrap_or_default();
        let continent = record.get(continent_idx).unwrap_or_default();

        if let Some(prev) = by_code.insert(code.to_string(), continent.to_string()) {
            if prev != continent {
                overridden.insert(code.to_string());
            }
        }
    }

    if !overridden.is_empty() {
        warn!(
            count = overridden.len(),
            codes = ?overridden,
            "repeated country codes with differing continents; kept the later rows"
        );
    }
    debug!(rows, "reference rows read");
    info!(codes = by_code.len(), "built continent lookup");
    Ok(ContinentLookup { by_code })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InjectError;
    use std::fs;
    use tempfile::tempdir;

    const HEADER: &str = "Continent_Name,Continent_Code,Country_Name,Two_Letter_Country_Code,Three_Letter_Country_Code,Country_Number\n";

    #[test]
    fn test_build_lookup_from_reference_table() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("continent_data.csv");
        let body = format!(
            "\u{feff}{HEADER}\
             Asia,AS,\"Afghanistan, Islamic Republic of\",AF,AFG,4\n\
             Europe,EU,\"Albania, Republic of\",AL,ALB,8\n\
             North America,NA,\"United States of America\",US,USA,840\n"
        );
        fs::write(&path, body).unwrap();

        let lookup = build_lookup(&path, &Columns::default(), b',').unwrap();
        assert_eq!(lookup.len(), 3);
        assert_eq!(lookup.get("AFG"), Some("Asia"));
        assert_eq!(lookup.get("USA"), Some("North America"));
        assert_eq!(lookup.get("XYZ"), None);
    }

    #[test]
    fn test_last_write_wins_for_repeated_code() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("continent_data.csv");
        let body = format!(
            "{HEADER}\
             Europe,EU,\"Turkey, Republic of\",TR,TUR,792\n\
             Asia,AS,\"Turkey, Republic of\",TR,TUR,792\n"
        );
        fs::write(&path, body).unwrap();

        let lookup = build_lookup(&path, &Columns::default(), b',').unwrap();
        assert_eq!(lookup.len(), 1);
        assert_eq!(lookup.get("TUR"), Some("Asia"));
    }

    #[test]
    fn test_missing_continent_column_is_schema_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("continent_data.csv");
        fs::write(&path, "Three_Letter_Country_Code,Region\nUSA,Americas\n").unwrap();

        let err = build_lookup(&path, &Columns::default(), b',').unwrap_err();
        match err {
            InjectError::MissingColumn { column, .. } => assert_eq!(column, "Continent_Name"),
            other => panic!("expected MissingColumn, got {other}"),
        }
    }

    #[test]
    fn test_missing_reference_file() {
        let tmp = tempdir().unwrap();
        let err = build_lookup(tmp.path().join("absent.csv"), &Columns::default(), b',')
            .unwrap_err();
        assert!(matches!(err, InjectError::FileAccess { .. }));
    }

    #[test]
    fn test_custom_column_names() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("ref.tsv");
        fs::write(&path, "iso3\tcontinent\nBRA\tSouth America\n").unwrap();
        let columns = Columns {
            reference_code: "iso3".into(),
            reference_continent: "continent".into(),
            ..Columns::default()
        };

        let lookup = build_lookup(&path, &columns, b'\t').unwrap();
        assert_eq!(lookup.get("BRA"), Some("South America"));
    }

    #[test]
    fn test_from_iter_keeps_last() {
        let lookup: ContinentLookup = vec![
            ("RUS".to_string(), "Europe".to_string()),
            ("RUS".to_string(), "Asia".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(lookup.get("RUS"), Some("Asia"));
        assert!(!lookup.is_empty());
        assert!(ContinentLookup::default().is_empty());
    }

    #[test]
    fn test_short_reference_row_reads_empty_continent() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("continent_data.csv");
        fs::write(
            &path,
            "Three_Letter_Country_Code,Continent_Name\nUSA\nJPN,Asia\n",
        )
        .unwrap();

        let lookup = build_lookup(&path, &Columns::default(), b',').unwrap();
        assert_eq!(lookup.len(), 2);
        assert_eq!(lookup.get("USA"), Some(""));
        assert_eq!(lookup.get("JPN"), Some("Asia"));
    }

    #[test]
    fn test_repeated_code_header_uses_last_column() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("continent_data.csv");
        fs::write(
            &path,
            "Three_Letter_Country_Code,Continent_Name,Three_Letter_Country_Code\n\
             XXX,Europe,FRA\n",
        )
        .unwrap();

        let lookup = build_lookup(&path, &Columns::default(), b',').unwrap();
        assert_eq!(lookup.get("FRA"), Some("Europe"));
        assert_eq!(lookup.get("XXX"), None);
    }
}
