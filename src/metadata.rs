use crate::config::MetadataConfig;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;

pub const COLLECTION_TRAIT: &str = "Collection";
pub const EDITION_TRAIT: &str = "Edition";

/// Field order here is the key order in the written JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NftMetadata {
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: AttributeValue,
}

/// `Edition` is written as a JSON integer, everything else as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(u64),
    Text(String),
}

impl AttributeValue {
    /// JSON rendering, so `"3"` and `3` stay distinct.
    pub fn to_json_string(&self) -> String {
        match self {
            AttributeValue::Number(n) => n.to_string(),
            AttributeValue::Text(s) => serde_json::Value::String(s.clone()).to_string(),
        }
    }
}

impl NftMetadata {
    pub fn build(index: u32, cfg: &MetadataConfig) -> Self {
        NftMetadata {
            name: format!("{} #{}", cfg.collection, index),
            description: cfg.description.clone(),
            image: image_uri(cfg, index),
            attributes: vec![
                Attribute {
                    trait_type: COLLECTION_TRAIT.to_string(),
                    value: AttributeValue::Text(cfg.collection.clone()),
                },
                Attribute {
                    trait_type: EDITION_TRAIT.to_string(),
                    value: AttributeValue::Number(u64::from(index)),
                },
            ],
        }
    }

    pub fn attribute(&self, trait_type: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|a| a.trait_type == trait_type)
            .map(|a| &a.value)
    }

    /// Pretty JSON with 4-space indentation and no trailing newline.
    pub fn to_json_pretty(&self) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut ser)?;
        Ok(buf)
    }
}

pub fn image_uri(cfg: &MetadataConfig, index: u32) -> String {
    format!("ipfs://{}/{}.{}", cfg.image_cid, index, cfg.image_extension)
}
