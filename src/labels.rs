use std::collections::BTreeMap;

/// Closed table of the status codes that get reported, with their display labels.
/// Codes missing from the table are counted but never printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLabels {
    labels: BTreeMap<u16, String>,
}

impl Default for StatusLabels {
    fn default() -> Self {
        let defaults: [(u16, &str); 4] = [
            (200, "OK"),
            (304, "Not Changed"),
            (404, "Not Found"),
            (500, "Server Error"),
        ];
        defaults.into_iter().collect()
    }
}

impl StatusLabels {
    pub fn empty() -> Self {
        Self { labels: BTreeMap::new() }
    }

    pub fn get(&self, code: u16) -> Option<&str> {
        self.labels.get(&code).map(String::as_str)
    }

    /// Add or replace the label for `code`.
    pub fn insert(&mut self, code: u16, label: impl Into<String>) {
        self.labels.insert(code, label.into());
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }
}

impl<S: Into<String>> FromIterator<(u16, S)> for StatusLabels {
    fn from_iter<I: IntoIterator<Item = (u16, S)>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(|(code, l)| (code, l.into())).collect(),
        }
    }
}
