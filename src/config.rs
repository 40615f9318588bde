use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_IMAGE_CID: &str = "bafybeic7b56254f6m6tk3ovlg7u3atxkgrbc7dsvpz5af2jnqnihkxhe5e";
pub const DEFAULT_COLLECTION: &str = "LoyaltyPoint";
pub const DEFAULT_DESCRIPTION: &str = "A unique NFT from the LoyaltyPoint collection.";

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&text)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Falls back to the built-in collection settings when `path` does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            log::debug!("{} not found, using built-in defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Rejects settings that would write somewhere other than a named directory.
    pub fn validate(&self) -> Result<()> {
        if self.metadata.image_cid.is_empty() {
            bail!("metadata.image_cid must not be empty");
        }
        if self.output.metadata_dir.is_empty() {
            bail!("output.metadata_dir must not be empty");
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub count: u32,
    pub output: OutputConfig,
    pub metadata: MetadataConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            count: 62,
            output: OutputConfig::default(),
            metadata: MetadataConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub metadata_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            metadata_dir: "metadata".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub image_cid: String,
    pub collection: String,
    pub description: String,
    pub image_extension: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            image_cid: DEFAULT_IMAGE_CID.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            image_extension: "jpg".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg: Config = serde_yaml::from_str("count: 5\nmetadata:\n  image_cid: bafyXYZ\n").unwrap();
        assert_eq!(cfg.count, 5);
        assert_eq!(cfg.metadata.image_cid, "bafyXYZ");
        assert_eq!(cfg.metadata.collection, DEFAULT_COLLECTION);
        assert_eq!(cfg.metadata.description, DEFAULT_DESCRIPTION);
        assert_eq!(cfg.metadata.image_extension, "jpg");
        assert_eq!(cfg.output.metadata_dir, "metadata");
    }

    #[test]
    fn negative_count_is_rejected() {
        assert!(serde_yaml::from_str::<Config>("count: -3\n").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let cfg = Config::load_or_default(dir.path().join("config.yaml")).unwrap();
        assert_eq!(cfg.count, 62);
        assert_eq!(cfg.metadata.image_cid, DEFAULT_IMAGE_CID);
    }

    #[test]
    fn empty_cid_fails_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "metadata:\n  image_cid: \"\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("image_cid"));
    }

    #[test]
    fn empty_metadata_dir_fails_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "count: 2\noutput:\n  metadata_dir: \"\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("metadata_dir"));
        assert!(Config::load_or_default(&path).is_err());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "count: [not, a, number]\n").unwrap();

        assert!(Config::load_or_default(&path).is_err());
    }
}
