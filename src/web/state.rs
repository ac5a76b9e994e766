use crate::adapters::LoadedModel;
use crate::core::classifier::WineClassifier;
use crate::core::Predictor;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Where the served model came from.
#[derive(Debug, Clone)]
pub struct ModelInfo {
    pub source: String,
    pub loaded_at: DateTime<Utc>,
}

/// 各請求共用的唯讀狀態
#[derive(Clone)]
pub struct AppState {
    classifier: Arc<WineClassifier<Arc<dyn Predictor>>>,
    model_info: Arc<ModelInfo>,
}

impl AppState {
    pub fn new(predictor: Arc<dyn Predictor>, model_info: ModelInfo) -> Self {
        Self {
            classifier: Arc::new(WineClassifier::new(predictor)),
            model_info: Arc::new(model_info),
        }
    }

    pub fn from_loaded(model: LoadedModel) -> Self {
        let info = ModelInfo {
            source: model.source().display().to_string(),
            loaded_at: model.loaded_at(),
        };
        Self::new(Arc::new(model), info)
    }

    pub fn classifier(&self) -> &WineClassifier<Arc<dyn Predictor>> {
        &self.classifier
    }

    pub fn model_info(&self) -> &ModelInfo {
        &self.model_info
    }
}
