// src/merge/mod.rs
pub mod record;

pub use record::{PopulationRecord, CONTINENT_FIELD, UNKNOWN_CONTINENT};

use csv::StringRecord;
use std::{collections::BTreeMap, path::Path};
use tracing::{debug, info, warn};

use crate::config::Columns;
use crate::csv_source::CsvSource;
use crate::error::Result;
use crate::lookup::ContinentLookup;

/// Build the enriched record for one row.
///
/// `code_idx` is `None` when the header has no country-code column; such rows,
/// like rows whose code is absent from the lookup, resolve to [`UNKNOWN_CONTINENT`].
pub fn enrich_row(
    headers: &[String],
    row: &StringRecord,
    code_idx: Option<usize>,
    lookup: &ContinentLookup,
) -> PopulationRecord {
    let continent = code_idx
        .and_then(|i| row.get(i))
        .and_then(|code| lookup.get(code))
        .unwrap_or(UNKNOWN_CONTINENT);

    let mut record = PopulationRecord::with_continent(continent);
    // every header column appears; missing trailing cells read as "", extras are dropped
    for (i, name) in headers.iter().enumerate() {
        record.insert(name.as_str(), row.get(i).unwrap_or_default());
    }
    record
}

/// Read the population table at `path` and annotate every row, in file order.
#[tracing::instrument(level = "info", skip(path, columns, lookup), fields(path = %path.as_ref().display()))]
pub fn merge_population<P: AsRef<Path>>(
    path: P,
    columns: &Columns,
    lookup: &ContinentLookup,
    delimiter: u8,
) -> Result<Vec<PopulationRecord>> {
    let mut src = CsvSource::open(path, delimiter)?;

    if lookup.is_empty() {
        warn!("continent lookup is empty; every row resolves to {}", UNKNOWN_CONTINENT);
    }
    debug!(codes = lookup.len(), "resolving against continent lookup");

    let code_idx = src.column_index(&columns.population_code);
    if code_idx.is_none() {
        warn!(
            column = %columns.population_code,
            "country code column absent; every row resolves to {}", UNKNOWN_CONTINENT
        );
    }
    if src.column_index(&columns.population_name).is_none() {
        warn!(column = %columns.population_name, "country name column absent");
    }

    let headers = src.headers().to_vec();
    let mut records = Vec::new();
    let mut unresolved: BTreeMap<String, usize> = BTreeMap::new();

    for (idx, row) in src.records().enumerate() {
        let row = row?;
        if row.len() != headers.len() {
            warn!(
                row = idx + 1,
                fields = row.len(),
                expected = headers.len(),
                "ragged row"
            );
        }

        let record = enrich_row(&headers, &row, code_idx, lookup);
        if record.continent() == Some(UNKNOWN_CONTINENT) {
            let code = code_idx.and_then(|i| row.get(i)).unwrap_or_default();
            *unresolved.entry(code.to_string()).or_default() += 1;
        }
        records.push(record);
    }

    if !unresolved.is_empty() {
        let codes: Vec<&str> = unresolved.keys().map(String::as_str).collect();
        warn!(count = unresolved.values().sum::<usize>(), ?codes, "unresolved country codes");
    }
    debug!(columns = headers.len(), "population header width");
    info!(records = records.len(), "merged population rows");
    Ok(records)
}

/// Number of records per continent, keyed by continent name.
pub fn continent_tally(records: &[PopulationRecord]) -> BTreeMap<&str, usize> {
    let mut tally = BTreeMap::new();
    for continent in records.iter().filter_map(PopulationRecord::continent) {
        *tally.entry(continent).or_default() += 1;
    }
    tally
}
