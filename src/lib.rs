pub mod config;
pub mod core;
pub mod domain;
pub mod render;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{FileConfigLoader, HandlerConfig};

pub use core::{generator::DocumentGenerator, handler::RequestHandler};
pub use domain::model::{Item, Payload};
pub use render::PdfRenderer;
pub use utils::error::{DocgenError, ErrorKind, Result};

/// The handler as deployed: file-based configuration and the built-in PDF renderer.
pub type DefaultHandler = RequestHandler<FileConfigLoader, PdfRenderer>;

impl DefaultHandler {
    pub fn with_defaults(config: HandlerConfig) -> Self {
        RequestHandler::new(config, FileConfigLoader, PdfRenderer::default())
    }
}
