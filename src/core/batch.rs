use crate::core::classifier::WineClassifier;
use crate::core::form::{sample_from_values, FORM_FIELDS};
use crate::core::{Prediction, Predictor};
use crate::domain::model::FEATURE_COUNT;
use crate::utils::error::{AppError, Result};
use std::io::Read;

#[derive(Debug)]
pub struct BatchRow {
    /// 1-based data row number, header excluded
    pub row: usize,
    pub outcome: std::result::Result<Prediction, AppError>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub rows: Vec<BatchRow>,
}

impl BatchReport {
    pub fn predicted(&self) -> usize {
        self.rows.iter().filter(|r| r.outcome.is_ok()).count()
    }

    pub fn rejected(&self) -> usize {
        self.rows.len() - self.predicted()
    }
}

/// "free sulfur dioxide" / "Free_Sulfur_Dioxide" -> "free_sulfur_dioxide"
fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_ascii_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

fn parse_record(
    record: &csv::StringRecord,
    positions: &[usize; FEATURE_COUNT],
) -> Result<[f64; FEATURE_COUNT]> {
    let mut values = [0.0_f64; FEATURE_COUNT];
    for ((slot, spec), &position) in values.iter_mut().zip(FORM_FIELDS.iter()).zip(positions.iter()) {
        *slot = spec.parse(record.get(position).unwrap_or(""))?;
    }
    Ok(values)
}

fn column_positions(headers: &csv::StringRecord) -> Result<[usize; FEATURE_COUNT]> {
    let normalized: Vec<String> = headers.iter().map(normalize_header).collect();
    let mut positions = [0usize; FEATURE_COUNT];

    for (slot, spec) in positions.iter_mut().zip(FORM_FIELDS.iter()) {
        *slot = normalized
            .iter()
            .position(|h| h == spec.name)
            .ok_or_else(|| {
                AppError::invalid_input(spec.name, "", "Column is missing from the CSV header")
            })?;
    }

    Ok(positions)
}

/// 逐列預測 CSV 中的樣本
///
/// Malformed records and rows failing field validation are recorded in the
/// report and skipped; a read failure or a predictor fault aborts the batch.
pub fn predict_csv<R: Read, P: Predictor>(
    reader: R,
    delimiter: u8,
    classifier: &WineClassifier<P>,
) -> Result<BatchReport> {
    // 欄位數不一致的列交給逐欄檢查處理，缺少的欄位視為空值
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let positions = column_positions(csv_reader.headers()?)?;
    let mut report = BatchReport::default();

    for (index, record) in csv_reader.records().enumerate() {
        let row = index + 1;

        let outcome = match record {
            Ok(record) => match parse_record(&record, &positions) {
                Ok(values) => Ok(classifier.classify(&sample_from_values(values))?),
                Err(e) => Err(e),
            },
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => Err(AppError::from(e)),
        };

        if let Err(e) = &outcome {
            tracing::warn!("Row {} rejected: {}", row, e);
        }

        report.rows.push(BatchRow { row, outcome });
    }

    tracing::info!(
        "Batch finished: {} predicted, {} rejected",
        report.predicted(),
        report.rejected()
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Verdict;
    use crate::domain::model::{InputVector, Label};

    /// 酒精濃度 >= 10 視為好酒
    struct AlcoholThreshold;

    impl Predictor for AlcoholThreshold {
        fn predict(&self, row: &InputVector) -> Result<Label> {
            Ok(Label(if row.as_slice()[10] >= 10.0 { 1 } else { 0 }))
        }
    }

    const DATASET_CSV: &str = "\
\"fixed acidity\";\"volatile acidity\";\"citric acid\";\"residual sugar\";\"chlorides\";\"free sulfur dioxide\";\"total sulfur dioxide\";\"density\";\"pH\";\"sulphates\";\"alcohol\";\"quality\"
7.4;0.7;0;1.9;0.076;11;34;0.9978;3.51;0.56;9.4;5
7.3;0.65;0;1.2;0.065;15;21;0.9946;3.39;0.47;10;7
";

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(" Free Sulfur Dioxide "), "free_sulfur_dioxide");
        assert_eq!(normalize_header("pH"), "ph");
        assert_eq!(normalize_header("fixed_acidity"), "fixed_acidity");
    }

    #[test]
    fn test_predicts_dataset_rows_in_order() {
        let classifier = WineClassifier::new(AlcoholThreshold);
        let report = predict_csv(DATASET_CSV.as_bytes(), b';', &classifier).unwrap();

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.predicted(), 2);

        let first = report.rows[0].outcome.as_ref().unwrap();
        assert_eq!(
            first.vector.as_slice(),
            &[7.4, 0.7, 0.0, 1.9, 0.076, 11.0, 34.0, 0.9978, 3.51, 0.56, 9.4]
        );
        assert_eq!(first.verdict, Verdict::Bad);

        let second = report.rows[1].outcome.as_ref().unwrap();
        assert_eq!(second.verdict, Verdict::Good);
    }

    #[test]
    fn test_invalid_rows_are_reported() {
        let csv = "\
fixed_acidity,volatile_acidity,citric_acid,residual_sugar,chlorides,free_sulfur_dioxide,total_sulfur_dioxide,density,ph,sulphates,alcohol
7.4,0.7,0,1.9,0.076,11,34,0.9978,15,0.56,9.4
7.4,0.7,0,1.9,0.076,11,34,0.9978,3.51,0.56,11
";
        let classifier = WineClassifier::new(AlcoholThreshold);
        let report = predict_csv(csv.as_bytes(), b',', &classifier).unwrap();

        assert_eq!(report.rejected(), 1);
        assert_eq!(report.rows[0].row, 1);
        assert!(matches!(
            report.rows[0].outcome,
            Err(AppError::InvalidInputError { ref field, .. }) if field == "ph"
        ));
        assert!(report.rows[1].outcome.is_ok());
    }

    #[test]
    fn test_ragged_row_does_not_stop_batch() {
        let csv = "\
fixed_acidity,volatile_acidity,citric_acid,residual_sugar,chlorides,free_sulfur_dioxide,total_sulfur_dioxide,density,ph,sulphates,alcohol
7.4,0.7,0,1.9,0.076,11,34,0.9978,3.51,0.56,9.4
7.4,0.7,0,1.9
7.4,0.7,0,1.9,0.076,11,34,0.9978,3.51,0.56,11,extra
";
        let classifier = WineClassifier::new(AlcoholThreshold);
        let report = predict_csv(csv.as_bytes(), b',', &classifier).unwrap();

        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.predicted(), 2);
        assert_eq!(report.rows[1].row, 2);
        assert!(matches!(
            report.rows[1].outcome,
            Err(AppError::InvalidInputError { ref field, ref reason, .. })
                if field == "chlorides" && reason == "Value is required"
        ));
        assert_eq!(
            report.rows[2].outcome.as_ref().unwrap().verdict,
            Verdict::Good
        );
    }

    #[test]
    fn test_undecodable_row_is_reported() {
        let mut csv = b"\
fixed_acidity,volatile_acidity,citric_acid,residual_sugar,chlorides,free_sulfur_dioxide,total_sulfur_dioxide,density,ph,sulphates,alcohol
7.4,0.7,0,1.9,0.076,11,34,0.9978,3.51,0.56,9.4
".to_vec();
        csv.extend_from_slice(b"7.4,\xff\xfe,0,1.9,0.076,11,34,0.9978,3.51,0.56,9.4\n");
        csv.extend_from_slice(b"7.4,0.7,0,1.9,0.076,11,34,0.9978,3.51,0.56,12\n");

        let classifier = WineClassifier::new(AlcoholThreshold);
        let report = predict_csv(csv.as_slice(), b',', &classifier).unwrap();

        assert_eq!(report.rows.len(), 3);
        assert!(matches!(report.rows[1].outcome, Err(AppError::CsvError(_))));
        assert!(report.rows[0].outcome.is_ok());
        assert!(report.rows[2].outcome.is_ok());
    }

    #[test]
    fn test_missing_column_fails_whole_batch() {
        let csv = "fixed_acidity,alcohol\n7.4,9.4\n";
        let classifier = WineClassifier::new(AlcoholThreshold);
        let err = predict_csv(csv.as_bytes(), b',', &classifier).unwrap_err();
        assert!(matches!(err, AppError::InvalidInputError { .. }));
    }
}
