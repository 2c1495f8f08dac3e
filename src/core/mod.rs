pub mod generator;
pub mod handler;

pub use crate::domain::document::{DocumentConfig, OrganizationConfig, Part};
pub use crate::domain::model::{Item, Payload};
pub use crate::domain::ports::{ConfigLoader, Renderer};
pub use crate::utils::error::Result;
