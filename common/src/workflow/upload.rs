//! File upload and column selection.

use crate::config::Limits;
use crate::error::ValidationError;
use crate::model::file_info::FileInfo;
use serde_json::Value;

/// Extensions the analysis backend can parse. The check here is advisory;
/// the backend's parser has the final word.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["csv", "xlsx", "xls", "json"];

/// Value of the `accept` attribute of the file input.
pub const ACCEPT_ATTRIBUTE: &str = ".csv,.xlsx,.xls,.json";

pub fn file_extension(name: &str) -> Option<String> {
    let (_, extension) = name.rsplit_once('.')?;
    if extension.is_empty() {
        None
    } else {
        Some(extension.to_ascii_lowercase())
    }
}

pub fn validate_file_name(name: &str) -> Result<(), ValidationError> {
    match file_extension(name) {
        Some(ext) if ALLOWED_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(ValidationError::InvalidFileType),
    }
}

pub fn validate_file_size(size: u64, limits: &Limits) -> Result<(), ValidationError> {
    if size > limits.max_file_size_bytes() {
        Err(ValidationError::FileTooLarge {
            limit_mb: limits.max_file_size_mb,
        })
    } else {
        Ok(())
    }
}

/// Runs every local check on a picked file.
pub fn validate_file(name: &str, size: u64, limits: &Limits) -> Result<(), ValidationError> {
    validate_file_name(name)?;
    validate_file_size(size, limits)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
        }
    }
}

/// Input (X) and output (Y) columns picked among the numeric columns.
///
/// The two sets may overlap; nothing here forbids selecting a column on both
/// axes.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ColumnSelection {
    numeric_columns: Vec<String>,
    x: Vec<String>,
    y: Vec<String>,
}

impl ColumnSelection {
    pub fn new(file_info: &FileInfo) -> Self {
        Self {
            numeric_columns: file_info.numeric_columns.clone(),
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }

    pub fn selected(&self, axis: Axis) -> &[String] {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    pub fn is_selected(&self, axis: Axis, column: &str) -> bool {
        self.selected(axis).iter().any(|c| c == column)
    }

    fn axis_mut(&mut self, axis: Axis) -> &mut Vec<String> {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    /// Adds or removes `column`. Non-numeric names are ignored.
    pub fn toggle(&mut self, axis: Axis, column: &str) {
        if !self.numeric_columns.iter().any(|c| c == column) {
            return;
        }
        let selected = self.axis_mut(axis);
        if let Some(pos) = selected.iter().position(|c| c == column) {
            selected.remove(pos);
        } else {
            selected.push(column.to_string());
        }
    }

    pub fn select_all(&mut self, axis: Axis) {
        let all = self.numeric_columns.clone();
        *self.axis_mut(axis) = all;
    }

    pub fn clear(&mut self, axis: Axis) {
        self.axis_mut(axis).clear();
    }

    /// Selects every numeric column not selected on the other axis.
    pub fn select_remaining(&mut self, axis: Axis) {
        let other = self.selected(axis.other()).to_vec();
        let remaining = self
            .numeric_columns
            .iter()
            .filter(|c| !other.contains(c))
            .cloned()
            .collect();
        *self.axis_mut(axis) = remaining;
    }
}

/// Multipart fields sent next to the file to `POST /analyze-data`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeDataForm {
    pub x_columns: Vec<String>,
    pub y_columns: Vec<String>,
    pub poly_degree: u32,
}

impl AnalyzeDataForm {
    pub fn new(selection: &ColumnSelection, poly_degree: u32) -> Result<Self, ValidationError> {
        if selection.x.is_empty() || selection.y.is_empty() {
            return Err(ValidationError::MissingColumns);
        }
        Ok(Self {
            x_columns: selection.x.clone(),
            y_columns: selection.y.clone(),
            poly_degree: poly_degree.max(1),
        })
    }

    /// Column lists travel as JSON arrays, the degree as a decimal string.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("x_columns", Value::from(self.x_columns.clone()).to_string()),
            ("y_columns", Value::from(self.y_columns.clone()).to_string()),
            ("poly_degree", self.poly_degree.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_info(numeric: &[&str]) -> FileInfo {
        FileInfo {
            filename: "data.csv".into(),
            shape: (10, numeric.len()),
            columns: numeric.iter().map(|s| s.to_string()).collect(),
            numeric_columns: numeric.iter().map(|s| s.to_string()).collect(),
            head: Vec::new(),
            dtypes: Default::default(),
        }
    }

    #[test]
    fn only_known_extensions_pass() {
        for ok in ["a.csv", "b.XLSX", "c.xls", "archive.v2.json"] {
            assert_eq!(validate_file_name(ok), Ok(()), "{ok}");
        }
        for bad in ["notes.txt", "csv", "data.", "image.png", "data.csv.zip"] {
            assert_eq!(
                validate_file_name(bad),
                Err(ValidationError::InvalidFileType),
                "{bad}"
            );
        }
    }

    #[test]
    fn size_limit_comes_from_config() {
        let limits = Limits {
            free_requests: 5,
            max_file_size_mb: 1,
        };
        assert!(validate_file("a.csv", 1024 * 1024, &limits).is_ok());
        assert_eq!(
            validate_file("a.csv", 1024 * 1024 + 1, &limits),
            Err(ValidationError::FileTooLarge { limit_mb: 1 })
        );
        assert_eq!(
            validate_file("a.txt", 1, &limits),
            Err(ValidationError::InvalidFileType)
        );
    }

    #[test]
    fn select_remaining_is_the_complement_of_the_other_axis() {
        let mut selection = ColumnSelection::new(&file_info(&["a", "b", "c", "d"]));
        selection.toggle(Axis::Y, "c");
        selection.select_remaining(Axis::X);
        assert_eq!(selection.selected(Axis::X), ["a", "b", "d"]);

        selection.clear(Axis::Y);
        selection.toggle(Axis::Y, "a");
        selection.toggle(Axis::Y, "d");
        selection.select_remaining(Axis::Y);
        assert_eq!(selection.selected(Axis::Y), ["c"]);
    }

    #[test]
    fn select_all_and_clear() {
        let mut selection = ColumnSelection::new(&file_info(&["a", "b"]));
        selection.select_all(Axis::Y);
        assert_eq!(selection.selected(Axis::Y), ["a", "b"]);
        selection.clear(Axis::Y);
        assert!(selection.selected(Axis::Y).is_empty());
    }

    #[test]
    fn overlap_is_allowed_and_unknown_columns_ignored() {
        let mut selection = ColumnSelection::new(&file_info(&["a", "b"]));
        selection.toggle(Axis::X, "a");
        selection.toggle(Axis::Y, "a");
        selection.toggle(Axis::Y, "label");
        assert!(selection.is_selected(Axis::X, "a"));
        assert_eq!(selection.selected(Axis::Y), ["a"]);

        selection.toggle(Axis::X, "a");
        assert!(!selection.is_selected(Axis::X, "a"));
    }

    #[test]
    fn analyze_form_needs_both_axes() {
        let mut selection = ColumnSelection::new(&file_info(&["x", "y"]));
        selection.toggle(Axis::X, "x");
        assert_eq!(
            AnalyzeDataForm::new(&selection, 1),
            Err(ValidationError::MissingColumns)
        );
    }

    #[test]
    fn ten_row_example_builds_expected_fields() {
        let info = file_info(&["x", "y"]);
        assert_eq!(info.shape, (10, 2));

        let mut selection = ColumnSelection::new(&info);
        selection.toggle(Axis::X, "x");
        selection.toggle(Axis::Y, "y");
        let form = AnalyzeDataForm::new(&selection, 1).unwrap();
        assert_eq!(
            form.form_fields(),
            vec![
                ("x_columns", r#"["x"]"#.to_string()),
                ("y_columns", r#"["y"]"#.to_string()),
                ("poly_degree", "1".to_string()),
            ]
        );
    }

    #[test]
    fn degree_is_at_least_one() {
        let mut selection = ColumnSelection::new(&file_info(&["x", "y"]));
        selection.select_all(Axis::X);
        selection.select_remaining(Axis::Y);
        assert_eq!(
            AnalyzeDataForm::new(&selection, 3),
            Err(ValidationError::MissingColumns)
        );

        selection.toggle(Axis::X, "y");
        selection.select_remaining(Axis::Y);
        assert_eq!(selection.selected(Axis::Y), ["y"]);
        assert_eq!(AnalyzeDataForm::new(&selection, 0).unwrap().poly_degree, 1);
    }
}
