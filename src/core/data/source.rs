use std::fmt;

/// Position information in source code files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceLocation {
    pub file_path: String,
    /// Line number (1-indexed).
    pub line: usize,
    /// Column number (1-indexed, display width).
    pub col: usize,
}

impl SourceLocation {
    pub fn new(file_path: impl Into<String>, line: usize, col: usize) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            col,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file_path, self.line, self.col)
    }
}

/// Position with the source line it points into.
///
/// The source line is only used by the reporter to draw the caret; two
/// contexts at the same location always carry the same line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceContext {
    pub location: SourceLocation,
    /// The source code line content for display.
    pub source_line: String,
}

impl SourceContext {
    pub fn new(location: SourceLocation, source_line: impl Into<String>) -> Self {
        Self {
            location,
            source_line: source_line.into(),
        }
    }

    // Convenience accessors
    pub fn file_path(&self) -> &str {
        &self.location.file_path
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn col(&self) -> usize {
        self.location.col
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{SourceContext, SourceLocation};

    #[test]
    fn test_source_location_new() {
        let loc = SourceLocation::new("./src/app.tsx", 10, 5);
        assert_eq!(loc.file_path, "./src/app.tsx");
        assert_eq!(loc.line, 10);
        assert_eq!(loc.col, 5);
        assert_eq!(loc.to_string(), "./src/app.tsx:10:5");
    }

    #[test]
    fn test_source_context_new() {
        let loc = SourceLocation::new("./src/app.tsx", 10, 5);
        let ctx = SourceContext::new(loc, "<T>{user.name}</T>");
        assert_eq!(ctx.file_path(), "./src/app.tsx");
        assert_eq!(ctx.line(), 10);
        assert_eq!(ctx.col(), 5);
        assert_eq!(ctx.source_line, "<T>{user.name}</T>");
    }
}
