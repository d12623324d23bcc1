// src/config.rs
use clap::Parser;
use std::path::PathBuf;

/// Inputs, output and column names for one run.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "continent-injector",
    about = "Annotate population rows with their continent and write them as JSON"
)]
pub struct Config {
    /// Reference table mapping country codes to continents.
    #[arg(long = "continents", env = "CONTINENTS_CSV", default_value = "continent_data.csv")]
    pub continents_path: PathBuf,

    /// Per-country population table.
    #[arg(long = "population", env = "POPULATION_CSV", default_value = "population_data.csv")]
    pub population_path: PathBuf,

    /// Destination JSON document; overwritten if present.
    #[arg(long = "output", env = "OUTPUT_JSON", default_value = "population_data_out.json")]
    pub output_path: PathBuf,

    #[command(flatten)]
    pub columns: Columns,

    /// Field delimiter shared by both inputs.
    #[arg(long, default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,
}

/// Header names the joiner looks for in each input.
#[derive(Debug, Clone, PartialEq, Eq, clap::Args)]
pub struct Columns {
    #[arg(long = "code-column", default_value = "Three_Letter_Country_Code")]
    pub reference_code: String,

    #[arg(long = "continent-column", default_value = "Continent_Name")]
    pub reference_continent: String,

    #[arg(long = "population-code-column", default_value = "Country Code")]
    pub population_code: String,

    #[arg(long = "population-name-column", default_value = "Country Name")]
    pub population_name: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            reference_code: "Three_Letter_Country_Code".into(),
            reference_continent: "Continent_Name".into(),
            population_code: "Country Code".into(),
            population_name: "Country Name".into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            continents_path: PathBuf::from("continent_data.csv"),
            population_path: PathBuf::from("population_data.csv"),
            output_path: PathBuf::from("population_data_out.json"),
            columns: Columns::default(),
            delimiter: b',',
        }
    }
}

fn parse_delimiter(raw: &str) -> Result<u8, String> {
    let unescaped = match raw {
        "\\t" | "tab" => "\t",
        other => other,
    };
    match unescaped.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!("delimiter must be a single ASCII character, got {:?}", raw)),
    }
}
