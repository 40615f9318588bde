use crate::config::{Config, MetadataConfig};
use crate::metadata::NftMetadata;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub count: u32,
    pub output_dir: PathBuf,
}

/// Creates `dir` and any missing parents; fine if it already exists.
pub fn ensure_output_directory(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create metadata directory: {}", dir.display()))
}

/// Builds the record for one token without touching the filesystem.
pub fn generate(index: u32, cfg: &MetadataConfig) -> NftMetadata {
    NftMetadata::build(index, cfg)
}

/// Overwrites `path` if it already exists.
pub fn write(record: &NftMetadata, path: &Path) -> Result<()> {
    let json = record
        .to_json_pretty()
        .context("failed to serialize metadata")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write metadata: {}", path.display()))
}

/// `<dir>/<index>.json`
pub fn metadata_path(dir: &Path, index: u32) -> PathBuf {
    dir.join(format!("{}.json", index))
}

/// Writes `0.json` through `<count-1>.json`. Stops at the first failure and
/// leaves files written so far in place.
pub fn run(cfg: &Config) -> Result<Summary> {
    cfg.validate()?;
    let dir = Path::new(&cfg.output.metadata_dir);
    ensure_output_directory(dir)?;

    log::info!(
        "Generating {} metadata files into {} (cid: {})",
        cfg.count,
        dir.display(),
        cfg.metadata.image_cid
    );

    for index in 0..cfg.count {
        let record = generate(index, &cfg.metadata);
        let path = metadata_path(dir, index);
        write(&record, &path).with_context(|| format!("token #{} failed", index))?;
        log::debug!("token #{} -> {}", index, path.display());
    }

    Ok(Summary {
        count: cfg.count,
        output_dir: dir.to_path_buf(),
    })
}
