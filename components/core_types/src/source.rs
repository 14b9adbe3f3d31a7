//! Source position and location types.
//!
//! Lines are 1-based and columns are 0-based, matching the convention used by
//! most JavaScript tooling. Offsets are byte offsets into the UTF-8 source.

use serde::Serialize;

/// A single point in source code.
///
/// # Examples
///
/// ```
/// use core_types::SourcePosition;
///
/// let pos = SourcePosition::new(3, 4, 27);
/// assert_eq!(pos.line, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SourcePosition {
    /// Line number (1-based)
    pub line: u32,
    /// Column number (0-based, in characters)
    pub column: u32,
    /// Byte offset from the start of the source
    pub offset: usize,
}

impl SourcePosition {
    /// Creates a position from its parts.
    pub fn new(line: u32, column: u32, offset: usize) -> Self {
        SourcePosition {
            line,
            column,
            offset,
        }
    }
}

/// The extent of a node or token in the source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SourceLocation {
    /// Position of the first character
    pub start: SourcePosition,
    /// Position just past the last character
    pub end: SourcePosition,
    /// Label of the source (file name or similar), when one was configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SourceLocation {
    /// Creates a location without a source label.
    pub fn new(start: SourcePosition, end: SourcePosition) -> Self {
        SourceLocation {
            start,
            end,
            source: None,
        }
    }

    /// Attaches a source label.
    pub fn with_source(mut self, source: Option<String>) -> Self {
        self.source = source;
        self
    }

    /// Returns the byte length covered by this location.
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    /// Returns true when start and end coincide.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_position_creation() {
        let pos = SourcePosition::new(10, 5, 150);
        assert_eq!(pos.line, 10);
        assert_eq!(pos.column, 5);
        assert_eq!(pos.offset, 150);
    }

    #[test]
    fn test_source_location_len() {
        let loc = SourceLocation::new(SourcePosition::new(1, 0, 0), SourcePosition::new(1, 3, 3));
        assert_eq!(loc.len(), 3);
        assert!(!loc.is_empty());
    }

    #[test]
    fn test_source_location_with_source() {
        let loc = SourceLocation::default().with_source(Some("app.js".to_string()));
        assert_eq!(loc.source.as_deref(), Some("app.js"));
        assert!(loc.is_empty());
    }
}
