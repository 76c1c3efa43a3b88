use super::line::InfoLine;
use super::model::Record;

/// How an incoming tag set is folded into an existing one.
///
/// These mirror the batch import modes: `Overwrite` rebuilds the record
/// from the incoming tags, `Additive` only fills in keys the record does
/// not have yet, `StrictAdditive` also appends values that are new for an
/// existing key (exact string comparison, duplicates are not re-added).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    Overwrite,
    Additive,
    StrictAdditive,
}

/// Ordered multimap over a record's `key=value` lines.
///
/// Keys are grouped verbatim (no case folding) in order of first
/// appearance; values within a key keep record order, duplicates included.
/// Comments and opaque lines are not part of the map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagMap {
    entries: Vec<(String, Vec<String>)>,
}

impl TagMap {
    pub fn new() -> Self {
        TagMap::default()
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, values)) => values.push(value.to_string()),
            None => self
                .entries
                .push((key.to_string(), vec![value.to_string()])),
        }
    }

    /// All values recorded for `key`, in record order.
    pub fn values(&self, key: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// The first value for `key`, for callers that need a single value.
    pub fn first(&self, key: &str) -> Option<&str> {
        self.values(key).first().map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(k, values)| (k.as_str(), values.as_slice()))
    }

    /// Folds `incoming` into this map according to `policy`.
    pub fn merge(&mut self, incoming: TagMap, policy: MergePolicy) {
        match policy {
            MergePolicy::Overwrite => *self = incoming,
            MergePolicy::Additive => {
                for (key, values) in incoming.entries {
                    if !self.contains_key(&key) {
                        self.entries.push((key, values));
                    }
                }
            }
            MergePolicy::StrictAdditive => {
                for (key, values) in incoming.entries {
                    if self.contains_key(&key) {
                        for value in values {
                            if !self.values(&key).contains(&value) {
                                self.insert(&key, &value);
                            }
                        }
                    } else {
                        self.entries.push((key, values));
                    }
                }
            }
        }
    }

    /// Serializes the map back to record lines, one `key=value` per value.
    pub fn to_record(&self) -> Record {
        Record::from_lines(self.iter().flat_map(|(key, values)| {
            values
                .iter()
                .map(move |value| InfoLine::original(format!("{}={}", key, value)))
        }))
    }
}
