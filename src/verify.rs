//! Read-back checks for a generated metadata directory.

use crate::config::MetadataConfig;
use crate::metadata::{AttributeValue, NftMetadata, COLLECTION_TRAIT, EDITION_TRAIT};

use anyhow::{bail, Context, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub file: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Report {
    /// Files that parsed as metadata.
    pub total: usize,
    /// trait_type -> value -> occurrences
    pub stats: BTreeMap<String, BTreeMap<String, usize>>,
    pub issues: Vec<Issue>,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    fn push(&mut self, file: impl Into<String>, message: impl Into<String>) {
        self.issues.push(Issue {
            file: file.into(),
            message: message.into(),
        });
    }
}

/// Lists the `*.json` files directly inside `dir`, sorted by path.
pub fn collect_json_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("metadata directory not found: {}", dir.display());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("failed to read {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        if let Some(ext) = path.extension() {
            if ext.eq_ignore_ascii_case("json") {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

/// Checks every `*.json` in `dir` against the records `0..count` the generator
/// would write for `cfg`.
pub fn verify_dir(dir: &Path, count: u32, cfg: &MetadataConfig) -> Result<Report> {
    let mut report = Report::default();
    let mut seen: BTreeSet<u32> = BTreeSet::new();

    for path in collect_json_files(dir)? {
        let file = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("<unknown>")
            .to_string();

        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let meta: NftMetadata = match serde_json::from_str(&text) {
            Ok(meta) => meta,
            Err(err) => {
                report.push(file, format!("not a metadata document: {}", err));
                continue;
            }
        };

        report.total += 1;
        for attr in &meta.attributes {
            *report
                .stats
                .entry(attr.trait_type.clone())
                .or_default()
                .entry(attr.value.to_json_string())
                .or_insert(0) += 1;
        }

        let Some(index) = token_index(&path) else {
            report.push(file, "file name is not a token index");
            continue;
        };
        seen.insert(index);

        if index >= count {
            report.push(file, format!("index {} is outside 0..{}", index, count));
            continue;
        }

        for message in check_record(index, &meta, cfg) {
            report.push(file.clone(), message);
        }
    }

    for index in (0..count).filter(|i| !seen.contains(i)) {
        report.push(format!("{}.json", index), "missing");
    }

    Ok(report)
}

/// Only canonical decimal stems count, so `007.json` is rejected.
fn token_index(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    let index: u32 = stem.parse().ok()?;
    (index.to_string() == stem).then_some(index)
}

/// Compares one parsed record with the one `NftMetadata::build` produces.
fn check_record(index: u32, meta: &NftMetadata, cfg: &MetadataConfig) -> Vec<String> {
    let expected = NftMetadata::build(index, cfg);
    let mut problems = Vec::new();

    if meta.name != expected.name {
        problems.push(format!("name {:?} != {:?}", meta.name, expected.name));
    }
    if meta.description != expected.description {
        problems.push(format!("unexpected description {:?}", meta.description));
    }
    if meta.image != expected.image {
        problems.push(format!("image {:?} != {:?}", meta.image, expected.image));
    }
    if meta.attributes.len() != expected.attributes.len() {
        problems.push(format!(
            "expected {} attributes, found {}",
            expected.attributes.len(),
            meta.attributes.len()
        ));
    }

    let collection = AttributeValue::Text(cfg.collection.clone());
    match meta.attribute(COLLECTION_TRAIT) {
        Some(v) if *v == collection => {}
        Some(v) => problems.push(format!("{} is {:?}, expected {:?}", COLLECTION_TRAIT, v, collection)),
        None => problems.push(format!("{} attribute missing", COLLECTION_TRAIT)),
    }

    let edition = AttributeValue::Number(u64::from(index));
    match meta.attribute(EDITION_TRAIT) {
        Some(v) if *v == edition => {}
        Some(v) => problems.push(format!("{} is {:?}, expected {:?}", EDITION_TRAIT, v, edition)),
        None => problems.push(format!("{} attribute missing", EDITION_TRAIT)),
    }

    problems
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_index_accepts_canonical_stems_only() {
        assert_eq!(token_index(Path::new("m/0.json")), Some(0));
        assert_eq!(token_index(Path::new("m/61.json")), Some(61));
        assert_eq!(token_index(Path::new("m/007.json")), None);
        assert_eq!(token_index(Path::new("m/+1.json")), None);
        assert_eq!(token_index(Path::new("m/cover.json")), None);
    }

    #[test]
    fn check_record_flags_string_edition() {
        let cfg = MetadataConfig::default();
        let mut meta = NftMetadata::build(3, &cfg);
        meta.attributes[1].value = AttributeValue::Text("3".to_string());

        let problems = check_record(3, &meta, &cfg);
        assert_eq!(problems.len(), 1);
        assert!(problems[0].starts_with("Edition"));
    }

    #[test]
    fn check_record_accepts_built_record() {
        let cfg = MetadataConfig::default();
        assert!(check_record(9, &NftMetadata::build(9, &cfg), &cfg).is_empty());
    }
}
