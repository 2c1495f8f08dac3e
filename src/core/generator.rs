use crate::core::{ConfigLoader, Renderer};
use crate::domain::document::Part;
use crate::domain::model::Payload;
use crate::utils::error::{DocgenError, Result};
use std::path::{Path, PathBuf};

/// Loads the renderer configuration and renders one payload into PDF bytes.
pub struct DocumentGenerator<L: ConfigLoader, R: Renderer> {
    loader: L,
    renderer: R,
    config_path: PathBuf,
}

impl<L: ConfigLoader, R: Renderer> DocumentGenerator<L, R> {
    pub fn new(loader: L, renderer: R, config_path: impl Into<PathBuf>) -> Self {
        Self {
            loader,
            renderer,
            config_path: config_path.into(),
        }
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub async fn generate(&self, payload: Payload) -> Result<Vec<u8>> {
        let (mut document, organization) = self.loader.load(&self.config_path).await?;
        tracing::debug!(
            config_path = %self.config_path.display(),
            organization = %organization.name,
            "Loaded renderer configuration"
        );

        document.first_part = Part::from(payload);

        let mut buffer = Vec::new();
        self.renderer.render(&document, &organization, &mut buffer)?;

        if buffer.is_empty() {
            return Err(DocgenError::render("renderer produced no output"));
        }

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::{DocumentConfig, OrganizationConfig};
    use async_trait::async_trait;
    use std::io::Write;

    struct StaticLoader;

    #[async_trait]
    impl ConfigLoader for StaticLoader {
        async fn load(&self, _path: &Path) -> Result<(DocumentConfig, OrganizationConfig)> {
            Ok((DocumentConfig::default(), OrganizationConfig::default()))
        }
    }

    struct SilentRenderer;

    impl Renderer for SilentRenderer {
        fn render(
            &self,
            _document: &DocumentConfig,
            _organization: &OrganizationConfig,
            _sink: &mut dyn Write,
        ) -> Result<()> {
            Ok(())
        }
    }

    struct TitleRenderer;

    impl Renderer for TitleRenderer {
        fn render(
            &self,
            document: &DocumentConfig,
            _organization: &OrganizationConfig,
            sink: &mut dyn Write,
        ) -> Result<()> {
            sink.write_all(document.first_part.title.as_bytes())?;
            Ok(())
        }
    }

    #[test]
    fn test_empty_output_is_a_render_error() {
        let generator = DocumentGenerator::new(StaticLoader, SilentRenderer, "/tmp/config.json");
        let result = tokio_test::block_on(generator.generate(Payload::default()));

        assert!(matches!(result, Err(DocgenError::RenderError { .. })));
    }

    #[test]
    fn test_payload_becomes_first_part() {
        let generator = DocumentGenerator::new(StaticLoader, TitleRenderer, "/tmp/config.json");
        let payload = Payload {
            title: "Quarterly retainer".to_string(),
            ..Payload::default()
        };

        let bytes = tokio_test::block_on(generator.generate(payload)).unwrap();
        assert_eq!(bytes, b"Quarterly retainer");
        assert_eq!(generator.config_path(), Path::new("/tmp/config.json"));
    }
}
