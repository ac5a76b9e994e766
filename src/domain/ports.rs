use crate::domain::model::{InputVector, Label};
use crate::utils::error::Result;

/// 已載入的分類模型：一次輸入一列，回傳一個標籤
pub trait Predictor: Send + Sync {
    fn predict(&self, row: &InputVector) -> Result<Label>;
}

impl<P: Predictor + ?Sized> Predictor for std::sync::Arc<P> {
    fn predict(&self, row: &InputVector) -> Result<Label> {
        (**self).predict(row)
    }
}

pub trait ConfigProvider: Send + Sync {
    fn model_path(&self) -> &str;
    fn bind_addr(&self) -> &str;
    fn verbose(&self) -> bool;
}
