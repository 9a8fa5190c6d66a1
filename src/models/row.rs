use serde::{Deserialize, Serialize};

/// One record from a merchant sheet: header/value cells in file order plus the
/// name of the file it came from.
///
/// Rows are never mutated once built; every resolver only reads them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<(String, String)>,
    source_file: String,
}

impl Row {
    pub fn new(source_file: impl Into<String>, cells: Vec<(String, String)>) -> Self {
        Self {
            cells,
            source_file: source_file.into(),
        }
    }

    /// Builds a row from borrowed pairs. Mostly useful in tests and fixtures.
    pub fn from_pairs(source_file: &str, pairs: &[(&str, &str)]) -> Self {
        Self::new(
            source_file,
            pairs
                .iter()
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect(),
        )
    }

    /// Exact, case-sensitive header lookup. Returns the first cell with that header.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    pub fn cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }

    pub fn source_file(&self) -> &str {
        &self.source_file
    }
}
