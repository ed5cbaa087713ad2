//! Partition keys and values encoded in a parquet file's directory path.

use std::fmt;
use std::path::Path;

/// A single `key=value` partition directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition {
    key: String,
    value: String,
}

impl Partition {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Parses a `key=value` path segment, splitting at the first `=`.
    fn from_segment(segment: &str) -> Option<Self> {
        let (key, value) = segment.split_once('=')?;
        Some(Self::new(key, value))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// The ordered sequence of partition directories leading to one parquet
/// file, in path order.
///
/// Two instances are *structurally* equal when their ordered key sequences
/// match; values are irrelevant for structural comparison (see
/// [`Partitions::same_structure`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Partitions(Vec<Partition>);

impl Partitions {
    pub fn new(partitions: Vec<Partition>) -> Self {
        Self(partitions)
    }

    /// Extracts a partition from every `key=value` segment of `path`,
    /// keeping the order of appearance. Segments without a `=` are skipped.
    pub fn from_path(path: &Path) -> Self {
        let partitions = path
            .iter()
            .filter_map(|segment| segment.to_str())
            .filter_map(Partition::from_segment)
            .collect();
        Self(partitions)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Partition> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(Partition::key)
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(Partition::value)
    }

    /// True when `other` exposes the same ordered key sequence, regardless
    /// of the partition values.
    pub fn same_structure(&self, other: &Partitions) -> bool {
        self.keys().eq(other.keys())
    }
}

impl fmt::Display for Partitions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<String> = self.0.iter().map(Partition::to_string).collect();
        write!(f, "[{}]", rendered.join("/"))
    }
}
