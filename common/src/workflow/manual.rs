//! Manual point entry.

use crate::error::ValidationError;
use serde::Serialize;

pub const MIN_POINTS: usize = 2;

/// One row of the entry table, exactly as typed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PointInput {
    pub x: String,
    pub y: String,
}

impl PointInput {
    pub fn new(x: &str, y: &str) -> Self {
        Self {
            x: x.to_string(),
            y: y.to_string(),
        }
    }

    fn is_blank(&self) -> bool {
        self.x.trim().is_empty() || self.y.trim().is_empty()
    }
}

/// An x value: a scalar, or a vector for multi-dimensional input
/// (typed as `"1, 2, 3"`).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum XValue {
    Scalar(f64),
    Vector(Vec<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataPoint {
    pub x: XValue,
    pub y: f64,
}

/// Body of `POST /analyze-manual`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManualAnalysisRequest {
    pub data_points: Vec<DataPoint>,
}

fn parse_number(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parses an x cell. With commas, tokens that parse are kept: two or more
/// make a vector, exactly one is a scalar. Without commas the whole cell must
/// be a number.
pub fn parse_x_value(raw: &str) -> Option<XValue> {
    if !raw.contains(',') {
        return parse_number(raw).map(XValue::Scalar);
    }

    let values: Vec<f64> = raw.split(',').filter_map(parse_number).collect();
    match values.as_slice() {
        [] => None,
        [single] => Some(XValue::Scalar(*single)),
        _ => Some(XValue::Vector(values)),
    }
}

/// Drops rows with a blank cell, then parses the rest. Fewer than
/// [`MIN_POINTS`] usable rows, or any non-numeric cell, rejects the table.
pub fn validate_points(rows: &[PointInput]) -> Result<Vec<DataPoint>, ValidationError> {
    let filled: Vec<&PointInput> = rows.iter().filter(|row| !row.is_blank()).collect();
    if filled.len() < MIN_POINTS {
        return Err(ValidationError::InsufficientPoints);
    }

    filled
        .into_iter()
        .map(|row| {
            let x = parse_x_value(&row.x).ok_or(ValidationError::NonNumeric)?;
            let y = parse_number(&row.y).ok_or(ValidationError::NonNumeric)?;
            Ok(DataPoint { x, y })
        })
        .collect()
}

/// The editable table behind the manual entry form.
#[derive(Debug, Clone, PartialEq)]
pub struct PointTable {
    rows: Vec<PointInput>,
}

impl Default for PointTable {
    /// Starts with a small linear sample so the form can be submitted as is.
    fn default() -> Self {
        Self {
            rows: vec![
                PointInput::new("1.5", "10"),
                PointInput::new("2.0", "15"),
                PointInput::new("2.5", "20"),
                PointInput::new("3.0", "25"),
                PointInput::new("3.5", "30"),
            ],
        }
    }
}

impl PointTable {
    pub fn rows(&self) -> &[PointInput] {
        &self.rows
    }

    pub fn add_row(&mut self) {
        self.rows.push(PointInput::default());
    }

    /// Refuses to go below [`MIN_POINTS`] rows; returns whether a row was removed.
    pub fn remove_row(&mut self, index: usize) -> bool {
        if self.rows.len() <= MIN_POINTS || index >= self.rows.len() {
            return false;
        }
        self.rows.remove(index);
        true
    }

    pub fn set_x(&mut self, index: usize, value: String) {
        if let Some(row) = self.rows.get_mut(index) {
            row.x = value;
        }
    }

    pub fn set_y(&mut self, index: usize, value: String) {
        if let Some(row) = self.rows.get_mut(index) {
            row.y = value;
        }
    }

    pub fn to_request(&self) -> Result<ManualAnalysisRequest, ValidationError> {
        validate_points(&self.rows).map(|data_points| ManualAnalysisRequest { data_points })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_token_is_a_scalar() {
        assert_eq!(parse_x_value("5"), Some(XValue::Scalar(5.0)));
        assert_eq!(parse_x_value(" 5 "), Some(XValue::Scalar(5.0)));
        assert_eq!(parse_x_value("5,"), Some(XValue::Scalar(5.0)));
    }

    #[test]
    fn several_tokens_make_a_vector() {
        assert_eq!(
            parse_x_value("1,2,3"),
            Some(XValue::Vector(vec![1.0, 2.0, 3.0]))
        );
        assert_eq!(
            parse_x_value("1.5, -2"),
            Some(XValue::Vector(vec![1.5, -2.0]))
        );
    }

    #[test]
    fn non_numbers_are_rejected() {
        assert_eq!(parse_x_value("abc"), None);
        assert_eq!(parse_x_value(",,"), None);
        assert_eq!(parse_x_value("NaN"), None);
    }

    #[test]
    fn fewer_than_two_filled_rows_block_submission() {
        let rows = vec![
            PointInput::new("1", "2"),
            PointInput::new("", "3"),
            PointInput::new("4", "  "),
        ];
        assert_eq!(
            validate_points(&rows),
            Err(ValidationError::InsufficientPoints)
        );
        assert_eq!(validate_points(&[]), Err(ValidationError::InsufficientPoints));
    }

    #[test]
    fn invalid_cell_rejects_the_table() {
        let rows = vec![PointInput::new("1", "2"), PointInput::new("x", "3")];
        assert_eq!(validate_points(&rows), Err(ValidationError::NonNumeric));

        let rows = vec![PointInput::new("1", "2"), PointInput::new("3", "y")];
        assert_eq!(validate_points(&rows), Err(ValidationError::NonNumeric));
    }

    #[test]
    fn request_serializes_scalars_and_vectors() {
        let rows = vec![PointInput::new("1,2", "3"), PointInput::new("4", "5")];
        let request = ManualAnalysisRequest {
            data_points: validate_points(&rows).unwrap(),
        };
        assert_eq!(
            serde_json::to_string(&request).unwrap(),
            r#"{"data_points":[{"x":[1.0,2.0],"y":3.0},{"x":4.0,"y":5.0}]}"#
        );
    }

    #[test]
    fn table_keeps_at_least_two_rows() {
        let mut table = PointTable::default();
        assert_eq!(table.rows().len(), 5);
        assert!(table.to_request().is_ok());

        while table.remove_row(0) {}
        assert_eq!(table.rows().len(), MIN_POINTS);

        table.add_row();
        table.set_x(2, "9".into());
        assert_eq!(table.rows()[2], PointInput::new("9", ""));
        assert!(table.remove_row(2));
    }
}
