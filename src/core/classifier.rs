use crate::core::{Prediction, Predictor, Verdict, WineSample};
use crate::utils::error::Result;

/// 組向量、呼叫模型、判斷標籤
pub struct WineClassifier<P: Predictor> {
    predictor: P,
}

impl<P: Predictor> WineClassifier<P> {
    pub fn new(predictor: P) -> Self {
        Self { predictor }
    }

    pub fn classify(&self, sample: &WineSample) -> Result<Prediction> {
        let vector = sample.to_input_vector();
        tracing::debug!("Predicting with input vector: {:?}", vector.as_slice());

        let label = self.predictor.predict(&vector)?;
        let verdict = Verdict::from_label(label);
        tracing::debug!("Model returned label {} ({})", label, verdict);

        Ok(Prediction {
            vector,
            label,
            verdict,
        })
    }

    pub fn predictor(&self) -> &P {
        &self.predictor
    }
}
