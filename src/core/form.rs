use crate::domain::model::{WineSample, FEATURE_COUNT};
use crate::utils::error::{AppError, Result};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Float,
    Integer,
}

/// 單一數值輸入欄位的顯示與限制設定
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub min: f64,
    pub max: Option<f64>,
    pub step: &'static str,
    pub kind: FieldKind,
    pub column: usize,
}

const fn float(name: &'static str, label: &'static str, step: &'static str, column: usize) -> FieldSpec {
    FieldSpec {
        name,
        label,
        min: 0.0,
        max: None,
        step,
        kind: FieldKind::Float,
        column,
    }
}

const fn integer(name: &'static str, label: &'static str, column: usize) -> FieldSpec {
    FieldSpec {
        name,
        label,
        min: 0.0,
        max: None,
        step: "1",
        kind: FieldKind::Integer,
        column,
    }
}

/// Form fields in model input order.
pub const FORM_FIELDS: [FieldSpec; FEATURE_COUNT] = [
    float("fixed_acidity", "Fixed Acidity", "0.1", 0),
    float("volatile_acidity", "Volatile Acidity", "0.01", 0),
    float("citric_acid", "Citric Acid", "0.01", 0),
    float("residual_sugar", "Residual Sugar", "0.1", 0),
    float("chlorides", "Chlorides", "0.001", 1),
    integer("free_sulfur_dioxide", "Free Sulfur Dioxide", 1),
    integer("total_sulfur_dioxide", "Total Sulfur Dioxide", 1),
    float("density", "Density", "0.0001", 1),
    FieldSpec {
        name: "ph",
        label: "pH",
        min: 0.0,
        max: Some(14.0),
        step: "0.01",
        kind: FieldKind::Float,
        column: 2,
    },
    float("sulphates", "Sulphates", "0.01", 2),
    float("alcohol", "Alcohol Percentage", "0.1", 2),
];

pub const COLUMN_COUNT: usize = 3;

impl FieldSpec {
    /// 解析並檢查單一欄位的原始字串
    pub fn parse(&self, raw: &str) -> Result<f64> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::invalid_input(self.name, raw, "Value is required"));
        }

        let value: f64 = trimmed
            .parse()
            .map_err(|_| AppError::invalid_input(self.name, raw, "Value must be a number"))?;

        if !value.is_finite() {
            return Err(AppError::invalid_input(
                self.name,
                raw,
                "Value must be a finite number",
            ));
        }

        if value < self.min {
            return Err(AppError::invalid_input(
                self.name,
                raw,
                format!("Value must be at least {}", self.min),
            ));
        }

        if let Some(max) = self.max {
            if value > max {
                return Err(AppError::invalid_input(
                    self.name,
                    raw,
                    format!("Value must be at most {}", max),
                ));
            }
        }

        if self.kind == FieldKind::Integer && (value.fract() != 0.0 || value > f64::from(u32::MAX)) {
            return Err(AppError::invalid_input(
                self.name,
                raw,
                "Value must be a whole number",
            ));
        }

        Ok(value)
    }

    pub fn default_value(&self) -> String {
        match self.kind {
            FieldKind::Integer => format!("{}", self.min as u32),
            FieldKind::Float => format!("{:.1}", self.min),
        }
    }
}

pub fn field_spec(name: &str) -> Option<&'static FieldSpec> {
    FORM_FIELDS.iter().find(|spec| spec.name == name)
}

/// 所有欄位錯誤的集合，提交被拒絕時回傳
#[derive(Debug)]
pub struct RejectedSubmission {
    pub errors: Vec<AppError>,
}

impl RejectedSubmission {
    pub fn message_for(&self, field: &str) -> Option<String> {
        self.errors.iter().find_map(|err| match err {
            AppError::InvalidInputError {
                field: name, reason, ..
            } if name == field => Some(reason.clone()),
            _ => None,
        })
    }
}

/// 把表單值轉成 [`WineSample`]，每個欄位各自檢查
pub fn parse_submission(
    fields: &HashMap<String, String>,
) -> std::result::Result<WineSample, RejectedSubmission> {
    let mut values = [0.0_f64; FEATURE_COUNT];
    let mut errors = Vec::new();

    for (slot, spec) in values.iter_mut().zip(FORM_FIELDS.iter()) {
        let raw = fields.get(spec.name).map(String::as_str).unwrap_or("");
        match spec.parse(raw) {
            Ok(value) => *slot = value,
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(sample_from_values(values))
    } else {
        Err(RejectedSubmission { errors })
    }
}

/// Values must already have passed [`FieldSpec::parse`].
pub fn sample_from_values(values: [f64; FEATURE_COUNT]) -> WineSample {
    WineSample {
        fixed_acidity: values[0],
        volatile_acidity: values[1],
        citric_acid: values[2],
        residual_sugar: values[3],
        chlorides: values[4],
        free_sulfur_dioxide: values[5] as u32,
        total_sulfur_dioxide: values[6] as u32,
        density: values[7],
        ph: values[8],
        sulphates: values[9],
        alcohol: values[10],
    }
}
