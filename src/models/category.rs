use serde::{Deserialize, Serialize};

/// A configured offer category: which folder on the static host holds its
/// merchant sheets and the order those sheets should be displayed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub key: String,
    pub label: String,
    pub folder: String,
    pub files: Vec<String>,
}

impl Category {
    pub fn new(key: &str, label: &str, folder: &str, files: &[&str]) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            folder: folder.to_string(),
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }
}

pub fn find_category<'a>(categories: &'a [Category], key: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.key == key)
}
