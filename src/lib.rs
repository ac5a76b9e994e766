pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;
pub mod web;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::{LoadedModel, ModelArtifact};
pub use config::AppConfig;
pub use core::classifier::WineClassifier;
pub use domain::model::{InputVector, Label, Prediction, Verdict, WineSample};
pub use domain::ports::Predictor;
pub use utils::error::{AppError, Result};
pub use web::{create_router, AppState};
