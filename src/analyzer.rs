use crate::parser::LogRecord;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;

/// Per-level record counts, iterated in first-occurrence order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LevelCounts {
    entries: Vec<(String, usize)>,
    // level → position in `entries`
    index: HashMap<String, usize>,
}

impl LevelCounts {
    fn increment(&mut self, level: &str) {
        match self.index.get(level) {
            Some(&pos) => self.entries[pos].1 += 1,
            None => {
                self.index.insert(level.to_string(), self.entries.len());
                self.entries.push((level.to_string(), 1));
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(level, count)| (level.as_str(), *count))
    }

    /// Sum of all counts
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

impl Serialize for LevelCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (level, count) in &self.entries {
            map.serialize_entry(level, count)?;
        }
        map.end()
    }
}

/// Tally records per level. Levels are compared exactly as written, so
/// `ERROR` and `error` are counted separately.
pub fn count_by_level(records: &[LogRecord]) -> LevelCounts {
    let mut counts = LevelCounts::default();
    for record in records {
        counts.increment(&record.level);
    }
    counts
}

/// Records whose level equals `level` exactly, in their original order.
///
/// No case folding happens here; callers normalize the query if needed.
pub fn filter_by_level<'a>(records: &'a [LogRecord], level: &str) -> Vec<&'a LogRecord> {
    records.iter().filter(|r| r.level == level).collect()
}
