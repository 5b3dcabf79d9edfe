//! Saved-project record exchanged with the persistence collaborator.
//!
//! The same JSON shape is used for load and save. Element arrays are restored
//! verbatim; the only normalization is serde filling in missing optional
//! style fields with their defaults.

use anyhow::{Context, Result};
use garmentkit_core::Side;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::DesignerResult;
use crate::model::DesignElement;

fn default_garment_color() -> String {
    "#ffffff".to_string()
}

/// Per-document design payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignData {
    #[serde(default)]
    pub front: Vec<DesignElement>,
    #[serde(default)]
    pub back: Vec<DesignElement>,
    #[serde(default)]
    pub current_side: Side,
    /// References returned by the upload service.
    #[serde(default)]
    pub user_uploads: Vec<String>,
    /// Generated candidates the user picked.
    #[serde(default)]
    pub generated_images: Vec<String>,
}

impl DesignData {
    pub fn elements(&self, side: Side) -> &[DesignElement] {
        match side {
            Side::Front => &self.front,
            Side::Back => &self.back,
        }
    }
}

/// Base64 PNG data URLs of both sides, attached on save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreviewImages {
    pub front: String,
    pub back: String,
}

/// A saved project as stored by the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    pub garment_template_id: String,
    #[serde(default = "default_garment_color")]
    pub garment_color: String,
    #[serde(default)]
    pub garment_size: String,
    #[serde(rename = "design_data", default)]
    pub design_data: DesignData,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_images: Option<PreviewImages>,
}

impl ProjectRecord {
    pub fn new(name: impl Into<String>, garment_template_id: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            garment_template_id: garment_template_id.into(),
            garment_color: default_garment_color(),
            garment_size: String::new(),
            design_data: DesignData::default(),
            preview_images: None,
        }
    }

    pub fn to_json(&self) -> DesignerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> DesignerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Save the record to a JSON file.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize project")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write project file {}", path.display()))?;
        tracing::info!("Saved project '{}' to {}", self.name, path.display());
        Ok(())
    }

    /// Load a record from a JSON file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project file {}", path.display()))?;
        let record: ProjectRecord =
            serde_json::from_str(&content).context("Failed to parse project file")?;
        Ok(record)
    }
}
