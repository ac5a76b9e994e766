pub mod batch;
pub mod classifier;
pub mod form;

pub use crate::domain::model::{InputVector, Label, Prediction, Verdict, WineSample};
pub use crate::domain::ports::{ConfigProvider, Predictor};
pub use crate::utils::error::Result;
