use std::fmt;

use chrono::{DateTime, Utc};

/// Kind of value a tag produces.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum TagKind {
    Numeric,
    Boolean,
    Text,
    Timestamp,
}

impl TagKind {
    /// Numeric and timestamp tags are ordered; boolean and text tags only
    /// support equality.
    pub fn is_ordered(self) -> bool {
        matches!(self, TagKind::Numeric | TagKind::Timestamp)
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TagKind::Numeric => "numeric",
            TagKind::Boolean => "boolean",
            TagKind::Text => "text",
            TagKind::Timestamp => "timestamp",
        };
        f.write_str(s)
    }
}

/// Extractor for one secondary index.
pub enum MetaTag<A> {
    Numeric(fn(&A) -> i64),
    Boolean(fn(&A) -> bool),
    Text(fn(&A) -> String),
    Timestamp(fn(&A) -> DateTime<Utc>),
}

impl<A> MetaTag<A> {
    pub fn kind(&self) -> TagKind {
        match self {
            MetaTag::Numeric(_) => TagKind::Numeric,
            MetaTag::Boolean(_) => TagKind::Boolean,
            MetaTag::Text(_) => TagKind::Text,
            MetaTag::Timestamp(_) => TagKind::Timestamp,
        }
    }

    pub fn extract(&self, value: &A) -> IndexValue {
        match self {
            MetaTag::Numeric(f) => IndexValue::Numeric(f(value)),
            MetaTag::Boolean(f) => IndexValue::Boolean(f(value)),
            MetaTag::Text(f) => IndexValue::Text(f(value)),
            MetaTag::Timestamp(f) => IndexValue::Timestamp(f(value)),
        }
    }
}

/// Value stored in (and queried against) a secondary index.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IndexValue {
    Numeric(i64),
    Boolean(bool),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl IndexValue {
    pub fn kind(&self) -> TagKind {
        match self {
            IndexValue::Numeric(_) => TagKind::Numeric,
            IndexValue::Boolean(_) => TagKind::Boolean,
            IndexValue::Text(_) => TagKind::Text,
            IndexValue::Timestamp(_) => TagKind::Timestamp,
        }
    }
}

impl From<i64> for IndexValue {
    fn from(value: i64) -> Self {
        IndexValue::Numeric(value)
    }
}

impl From<bool> for IndexValue {
    fn from(value: bool) -> Self {
        IndexValue::Boolean(value)
    }
}

impl From<String> for IndexValue {
    fn from(value: String) -> Self {
        IndexValue::Text(value)
    }
}

impl From<&str> for IndexValue {
    fn from(value: &str) -> Self {
        IndexValue::Text(value.to_owned())
    }
}

impl From<DateTime<Utc>> for IndexValue {
    fn from(value: DateTime<Utc>) -> Self {
        IndexValue::Timestamp(value)
    }
}

/// Closed set of secondary indexes for aggregate type `A`.
///
/// Implemented by a fieldless enum; each variant names one tag.
pub trait MetadataSchema<A>: Copy + Ord + fmt::Debug + Send + Sync + 'static {
    /// Every tag in the schema. Each one is indexed on every mutation.
    const ALL: &'static [Self];

    fn tag(self) -> MetaTag<A>;
}

/// Schema with no secondary indexes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NoTags {}

impl<A> MetadataSchema<A> for NoTags {
    const ALL: &'static [Self] = &[];

    fn tag(self) -> MetaTag<A> {
        match self {}
    }
}
