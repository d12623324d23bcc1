// src/pipeline.rs
use std::path::PathBuf;
use tracing::info;

use crate::{
    config::Config,
    error::Result,
    lookup::build_lookup,
    merge::{continent_tally, merge_population, PopulationRecord, UNKNOWN_CONTINENT},
    serialize::write_json,
};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Records written, one per population data row.
    pub records: usize,
    /// Records whose continent resolved to `Unknown`.
    pub unresolved: usize,
    pub output_path: PathBuf,
}

/// Build the lookup and annotate the population rows, without writing anything.
pub fn enrich(cfg: &Config) -> Result<Vec<PopulationRecord>> {
    let lookup = build_lookup(&cfg.continents_path, &cfg.columns, cfg.delimiter)?;
    // lookup is dropped once the merge finishes
    merge_population(&cfg.population_path, &cfg.columns, &lookup, cfg.delimiter)
}

/// Lookup → merge → serialize. Any failure aborts the run.
#[tracing::instrument(level = "info", skip(cfg))]
pub fn run(cfg: &Config) -> Result<RunSummary> {
    let records = enrich(cfg)?;

    let tally = continent_tally(&records);
    for (continent, count) in &tally {
        info!(continent, count, "continent tally");
    }
    let unresolved = tally.get(UNKNOWN_CONTINENT).copied().unwrap_or(0);

    write_json(&cfg.output_path, &records)?;

    Ok(RunSummary {
        records: records.len(),
        unresolved,
        output_path: cfg.output_path.clone(),
    })
}
