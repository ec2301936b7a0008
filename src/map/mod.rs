pub mod artifact;
pub mod document;
pub mod render;

pub use artifact::MapArtifact;
pub use document::persist;
pub use render::{render, OutlineLayers};
