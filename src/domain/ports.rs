use crate::domain::document::{DocumentConfig, OrganizationConfig};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::io::Write;
use std::path::Path;

/// Source of the document- and organization-level configuration.
#[async_trait]
pub trait ConfigLoader: Send + Sync {
    async fn load(&self, path: &Path) -> Result<(DocumentConfig, OrganizationConfig)>;
}

/// Turns a merged configuration into document bytes written to `sink`.
pub trait Renderer: Send + Sync {
    fn render(
        &self,
        document: &DocumentConfig,
        organization: &OrganizationConfig,
        sink: &mut dyn Write,
    ) -> Result<()>;
}
