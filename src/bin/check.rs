use anyhow::{Context, Result};
use env_logger::Env;
use loyalty_metadata_gen::config::Config;
use loyalty_metadata_gen::verify;
use std::path::Path;

const MAX_EXAMPLES: usize = 20;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cfg = Config::load_or_default("config.yaml")
        .context("failed to load config.yaml")?;
    let metadata_dir = Path::new(&cfg.output.metadata_dir);

    let report = verify::verify_dir(metadata_dir, cfg.count, &cfg.metadata)?;

    println!("==============================");
    println!(" Metadata Check: {}", metadata_dir.display());
    println!(" Total tokens: {}", report.total);
    println!("==============================\n");

    for (trait_type, values) in &report.stats {
        println!("▶ Trait: {} ({} distinct values)", trait_type, values.len());

        let mut sorted: Vec<_> = values.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(a.1));

        for (value, count) in sorted.into_iter().take(MAX_EXAMPLES) {
            println!("  {:30} {:5}", value, count);
        }
        println!();
    }

    if report.is_clean() {
        println!("✅ No problems found");
        return Ok(());
    }

    println!(
        "❌ {} problem(s) found (showing up to {}):",
        report.issues.len(),
        MAX_EXAMPLES
    );
    for issue in report.issues.iter().take(MAX_EXAMPLES) {
        println!("  - {} : {}", issue.file, issue.message);
    }

    std::process::exit(1);
}
