use std::collections::BTreeMap;

use crate::parse::LogRecord;

/// Occurrences per status code for one log file. Iterates in ascending code order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCount {
    counts: BTreeMap<u16, usize>,
}

impl StatusCount {
    pub fn get(&self, code: u16) -> usize {
        self.counts.get(&code).copied().unwrap_or(0)
    }

    /// Number of distinct status codes seen.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of records counted.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, usize)> + '_ {
        self.counts.iter().map(|(&code, &n)| (code, n))
    }
}

impl FromIterator<LogRecord> for StatusCount {
    fn from_iter<I: IntoIterator<Item = LogRecord>>(iter: I) -> Self {
        let counts = iter.into_iter().fold(BTreeMap::new(), |mut acc, rec| {
            *acc.entry(rec.status_code).or_insert(0) += 1;
            acc
        });
        Self { counts }
    }
}

/// Count records per status code in a single pass.
pub fn aggregate(records: impl IntoIterator<Item = LogRecord>) -> StatusCount {
    records.into_iter().collect()
}
