//! Band access
//!
//! Satellite definitions, composite requests and the providers that turn
//! a request into a cloud-filtered composite image.

pub mod satellite;
pub mod request;
pub mod provider;
pub mod catalog;
pub mod composite;
pub mod local;
mod tests;

pub use satellite::{Satellite, SatelliteDefinition};
pub use request::{CompositeRequest, DateRange};
pub use provider::ImageryProvider;
pub use catalog::{SceneCatalog, SceneEntry};
pub use local::LocalArchiveProvider;
