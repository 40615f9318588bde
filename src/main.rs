use loyalty_metadata_gen::config::Config;
use loyalty_metadata_gen::generator;

use anyhow::{Context, Result};
use env_logger::Env;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cfg = Config::load_or_default("config.yaml")
        .context("failed to load config.yaml")?;

    let summary = generator::run(&cfg)?;

    println!(
        "✅ Created {} metadata files in '{}'",
        summary.count,
        summary.output_dir.display()
    );

    Ok(())
}
