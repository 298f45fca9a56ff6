use std::sync::Arc;

use anyhow::{Result, anyhow};
use swc_common::{BytePos, FileName, Globals, SourceMap, SourceMapper, Span, Spanned};
use swc_ecma_ast::Module;
use swc_ecma_parser::{Parser, StringInput, Syntax, TsSyntax};

use crate::core::{SourceContext, SourceLocation};

/// A single file's parsed syntax tree plus its file identifier.
///
/// Created per scan and dropped once extraction for the file is done.
pub struct SourceUnit {
    pub file_path: String,
    pub module: Module,
    pub source_map: Arc<SourceMap>,
}

impl SourceUnit {
    /// Source context (path, 1-based line/column, line text) for a position.
    pub fn locate(&self, pos: BytePos) -> SourceContext {
        let loc = self.source_map.lookup_char_pos(pos);
        let source_line = loc
            .file
            .get_line(loc.line - 1)
            .map(|cow| cow.to_string())
            .unwrap_or_default();
        SourceContext::new(
            SourceLocation::new(&self.file_path, loc.line, loc.col_display + 1),
            source_line,
        )
    }

    /// Verbatim source text covered by `span` (empty if unavailable).
    pub fn snippet(&self, span: Span) -> String {
        self.source_map.span_to_snippet(span).unwrap_or_default()
    }
}

/// Parse JSX/TSX source code string into an AST.
///
/// Accepts a shared SourceMap for thread-safe parallel parsing.
pub fn parse_jsx_source(
    code: String,
    file_path: &str,
    source_map: Arc<SourceMap>,
) -> Result<SourceUnit> {
    use swc_common::GLOBALS;

    // Wrap in GLOBALS.set() for thread safety
    GLOBALS.set(&Globals::new(), || {
        let source_file = source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let syntax = Syntax::Typescript(TsSyntax {
            tsx: true,
            ..Default::default()
        });

        let mut parser = Parser::new(syntax, StringInput::from(&*source_file), None);

        let module = parser.parse_module().map_err(|e| {
            let loc = source_map.lookup_char_pos(e.span().lo);
            anyhow!(
                "failed to parse at {}:{}: {}",
                loc.line,
                loc.col_display + 1,
                e.kind().msg()
            )
        })?;

        Ok(SourceUnit {
            file_path: file_path.to_string(),
            module,
            source_map,
        })
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(code: &str) -> SourceUnit {
        parse_jsx_source(code.to_string(), "src/page.tsx", Arc::new(SourceMap::default())).unwrap()
    }

    #[test]
    fn test_parse_tsx() {
        let unit = parse("const a: number = 1;\nexport const el = <div>Hello</div>;");
        assert_eq!(unit.module.body.len(), 2);
        assert_eq!(unit.file_path, "src/page.tsx");
    }

    #[test]
    fn test_parse_error() {
        let result = parse_jsx_source(
            "const = <div>".to_string(),
            "src/broken.tsx",
            Arc::new(SourceMap::default()),
        );
        assert!(result.is_err());
        assert!(result.err().unwrap().to_string().starts_with("failed to parse"));
    }

    #[test]
    fn test_locate_and_snippet() {
        let unit = parse("const x = 1;\n  const label = user.name;");
        let item = &unit.module.body[1];
        let ctx = unit.locate(item.span().lo);
        assert_eq!(ctx.line(), 2);
        assert_eq!(ctx.col(), 3);
        assert_eq!(ctx.source_line, "  const label = user.name;");
        assert_eq!(unit.snippet(item.span()), "const label = user.name;");
    }
}
