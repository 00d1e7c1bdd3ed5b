//! Field paths and the path tracker that stamps them onto errors.
//!
//! While the transcoder recurses it pushes one [`PathSegment`] per step (a document key
//! for record fields and mapping entries, an index for sequence elements) and pops it on
//! the way out. Errors are built through the [`PathTracker`], so the path is recorded
//! exactly once, by the innermost frame that sees the failure; outer frames pass the
//! error along with `?` untouched.

use crate::error::{Error, Result};
use std::fmt;

/// One step of a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A record field or mapping entry, by document key.
    Key(String),
    /// A sequence element.
    Index(usize),
}

impl PathSegment {
    pub fn key(key: impl Into<String>) -> Self {
        PathSegment::Key(key.into())
    }
}

/// A dotted/bracketed locator such as `items[0].createdAt`.
///
/// The empty path refers to the root value and displays as `<root>`.
///
/// # Examples
///
/// ```rust
/// use recmarshal::{FieldPath, PathSegment};
///
/// let path = FieldPath::from_segments(vec![
///     PathSegment::key("items"),
///     PathSegment::Index(0),
///     PathSegment::key("createdAt"),
/// ]);
/// assert_eq!(path.to_string(), "items[0].createdAt");
/// assert_eq!(FieldPath::root().to_string(), "<root>");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    #[must_use]
    pub fn root() -> Self {
        FieldPath(Vec::new())
    }

    #[must_use]
    pub fn from_segments(segments: Vec<PathSegment>) -> Self {
        FieldPath(segments)
    }

    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Key(key) if i == 0 => f.write_str(key)?,
                PathSegment::Key(key) => write!(f, ".{}", key)?,
                PathSegment::Index(index) => write!(f, "[{}]", index)?,
            }
        }
        Ok(())
    }
}

/// The stack of segments for the value currently being converted.
#[derive(Debug, Default)]
pub struct PathTracker {
    segments: Vec<PathSegment>,
}

impl PathTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) {
        self.segments.pop();
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Snapshot of the current path.
    #[must_use]
    pub fn current(&self) -> FieldPath {
        FieldPath(self.segments.clone())
    }

    pub fn missing_field(&self, key: &str) -> Error {
        Error::missing_field(self.current(), key)
    }

    pub fn type_mismatch(&self, expected: impl fmt::Display, found: impl fmt::Display) -> Error {
        Error::type_mismatch(self.current(), expected, found)
    }

    pub fn invalid_enum_value(&self, value: &str, enum_name: &str, variants: &[String]) -> Error {
        Error::invalid_enum_value(self.current(), value, enum_name, variants.to_vec())
    }

    pub fn invalid_identifier(&self, value: &str) -> Error {
        Error::invalid_identifier(self.current(), value)
    }

    pub fn invalid_temporal(&self, value: &str, pattern: &str, reason: &str) -> Error {
        Error::invalid_temporal(self.current(), value, pattern, reason)
    }

    pub fn unsupported_type(&self, type_name: impl fmt::Display) -> Error {
        Error::unsupported_type(self.current(), type_name)
    }
}

/// Implemented by recursive walkers that own a [`PathTracker`].
pub trait Tracked {
    fn tracker(&mut self) -> &mut PathTracker;

    /// Runs `op` with `segment` pushed onto the path, popping it afterwards whether or not
    /// `op` failed.
    fn with_path<T, F>(&mut self, segment: PathSegment, op: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.tracker().push(segment);
        let result = op(self);
        self.tracker().pop();
        result
    }
}
