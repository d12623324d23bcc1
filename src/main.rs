use anyhow::{Context, Result};
use clap::Parser;
use continent_injector::{pipeline, Config};
use std::io;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();

    // ─── 2) configure paths ──────────────────────────────────────────
    let cfg = Config::parse();
    info!(
        continents = %cfg.continents_path.display(),
        population = %cfg.population_path.display(),
        output = %cfg.output_path.display(),
        "startup"
    );

    // ─── 3) lookup → merge → write ───────────────────────────────────
    let summary = pipeline::run(&cfg).with_context(|| {
        format!(
            "joining {} with {}",
            cfg.population_path.display(),
            cfg.continents_path.display()
        )
    })?;

    if summary.unresolved > 0 {
        info!(unresolved = summary.unresolved, "rows without a continent match");
    }
    println!("Converted {} countries to JSON format.", summary.records);
    println!("Output saved as: {}", summary.output_path.display());
    Ok(())
}
