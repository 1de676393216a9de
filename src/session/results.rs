// src/session/results.rs

/// A recovered credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub hash: String,
    pub secret: String,
}

impl ResultRecord {
    pub fn new(hash: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            secret: secret.into(),
        }
    }
}

/// Append-only, insertion-ordered list of recovered credentials.
///
/// Duplicates are kept; values are stored exactly as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    records: Vec<ResultRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn append(&mut self, record: ResultRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ResultRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a ResultTable {
    type Item = &'a ResultRecord;
    type IntoIter = std::slice::Iter<'a, ResultRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
