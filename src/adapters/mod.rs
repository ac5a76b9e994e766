// Adapters layer: concrete implementations for external systems (model files, http).

pub mod artifact;

pub use artifact::{LoadedModel, ModelArtifact};
