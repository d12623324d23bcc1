//! Join a per-country population table with a country → continent reference
//! table and write the annotated rows as a JSON array.

pub mod config;
pub mod csv_source;
pub mod error;
pub mod lookup;
pub mod merge;
pub mod pipeline;
pub mod serialize;

pub use config::{Columns, Config};
pub use error::{InjectError, Result};
pub use lookup::{build_lookup, ContinentLookup};
pub use merge::{merge_population, PopulationRecord, CONTINENT_FIELD, UNKNOWN_CONTINENT};
pub use pipeline::{run, RunSummary};
pub use serialize::write_json;
