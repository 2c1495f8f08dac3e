use crate::core::{ConfigLoader, DocumentConfig, OrganizationConfig};
use crate::utils::error::{DocgenError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, Validate,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk layout of the renderer configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub document: DocumentConfig,
    pub organization: Option<OrganizationConfig>,
}

impl ConfigFile {
    /// Parses TOML when the path ends in `.toml`, JSON otherwise.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            toml::from_str(content).map_err(|e| DocgenError::ConfigError {
                message: format!("Failed to parse TOML config {}: {}", path.display(), e),
            })
        } else {
            serde_json::from_str(content).map_err(|e| DocgenError::ConfigError {
                message: format!("Failed to parse JSON config {}: {}", path.display(), e),
            })
        }
    }

    pub fn into_parts(self) -> Result<(DocumentConfig, OrganizationConfig)> {
        self.validate()?;
        let organization = self.organization.ok_or_else(|| DocgenError::MissingConfigError {
            field: "organization".to_string(),
        })?;
        Ok((self.document, organization))
    }
}

impl Validate for ConfigFile {
    fn validate(&self) -> Result<()> {
        let organization = validate_required_field("organization", &self.organization)?;
        validate_non_empty_string("organization.name", &organization.name)?;

        validate_range("document.decimal_places", self.document.decimal_places, 0, 4)?;
        validate_range("document.tax_rate", self.document.tax_rate, 0, 100)?;

        Ok(())
    }
}

/// Reads the renderer configuration from the local filesystem on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileConfigLoader;

#[async_trait]
impl ConfigLoader for FileConfigLoader {
    async fn load(&self, path: &Path) -> Result<(DocumentConfig, OrganizationConfig)> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            DocgenError::ConfigError {
                message: format!("Failed to read config {}: {}", path.display(), e),
            }
        })?;

        ConfigFile::parse(path, &content)?.into_parts()
    }
}
