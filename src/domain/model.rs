use serde::{Deserialize, Serialize};
use std::fmt;

/// 特徵數量，順序由模型決定
pub const FEATURE_COUNT: usize = 11;

/// 模型輸入向量中各特徵的固定順序
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "fixed_acidity",
    "volatile_acidity",
    "citric_acid",
    "residual_sugar",
    "chlorides",
    "free_sulfur_dioxide",
    "total_sulfur_dioxide",
    "density",
    "ph",
    "sulphates",
    "alcohol",
];

/// 一次提交的葡萄酒化學量測值
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WineSample {
    pub fixed_acidity: f64,
    pub volatile_acidity: f64,
    pub citric_acid: f64,
    pub residual_sugar: f64,
    pub chlorides: f64,
    pub free_sulfur_dioxide: u32,
    pub total_sulfur_dioxide: u32,
    pub density: f64,
    pub ph: f64,
    pub sulphates: f64,
    pub alcohol: f64,
}

impl WineSample {
    /// 依固定順序組出模型輸入向量
    pub fn to_input_vector(&self) -> InputVector {
        InputVector([
            self.fixed_acidity,
            self.volatile_acidity,
            self.citric_acid,
            self.residual_sugar,
            self.chlorides,
            f64::from(self.free_sulfur_dioxide),
            f64::from(self.total_sulfur_dioxide),
            self.density,
            self.ph,
            self.sulphates,
            self.alcohol,
        ])
    }
}

/// Single feature row handed to the predictor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputVector(pub [f64; FEATURE_COUNT]);

impl InputVector {
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Scalar class label returned by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Label(pub i64);

impl Label {
    pub const GOOD: Label = Label(1);
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Good,
    Bad,
}

impl Verdict {
    /// 只有標籤等於 1 時才是好酒
    pub fn from_label(label: Label) -> Self {
        if label == Label::GOOD {
            Verdict::Good
        } else {
            Verdict::Bad
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Good => "🍷 Good Quality Wine!",
            Verdict::Bad => "⚠️ Bad Quality Wine.",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Good => write!(f, "good"),
            Verdict::Bad => write!(f, "bad"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    pub vector: InputVector,
    pub label: Label,
    pub verdict: Verdict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_vector_preserves_field_order() {
        let sample = WineSample {
            fixed_acidity: 7.4,
            volatile_acidity: 0.7,
            citric_acid: 0.0,
            residual_sugar: 1.9,
            chlorides: 0.076,
            free_sulfur_dioxide: 11,
            total_sulfur_dioxide: 34,
            density: 0.9978,
            ph: 3.51,
            sulphates: 0.56,
            alcohol: 9.4,
        };

        assert_eq!(
            sample.to_input_vector().as_slice(),
            &[7.4, 0.7, 0.0, 1.9, 0.076, 11.0, 34.0, 0.9978, 3.51, 0.56, 9.4]
        );
    }

    #[test]
    fn test_verdict_from_label() {
        assert_eq!(Verdict::from_label(Label(1)), Verdict::Good);
        assert_eq!(Verdict::from_label(Label(0)), Verdict::Bad);
        assert_eq!(Verdict::from_label(Label(7)), Verdict::Bad);
        assert_eq!(Verdict::from_label(Label(-1)), Verdict::Bad);
    }

    #[test]
    fn test_verdict_messages() {
        assert_eq!(Verdict::Good.message(), "🍷 Good Quality Wine!");
        assert_eq!(Verdict::Bad.message(), "⚠️ Bad Quality Wine.");
    }
}
