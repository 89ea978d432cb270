use crate::fixes::{CodeFix, FixMeta, FixOptions};
use camino::Utf8Path;
use codefix_syntax::{NodeId, SourceFile, SyntaxKind};
use codefix_types::codes::CANNOT_ASSIGN_TO_CONSTANT;
use codefix_types::{RefactorEditInfo, TextChange, TextSpan};
use tracing::debug;

/// Rewrites `const` to `let` for a binding the service reports as reassigned.
pub struct ConstToLet;

impl ConstToLet {
    const NAME: &'static str = "const2let";
    const DESCRIPTION: &'static str =
        "Turns a reassigned const declaration into a let declaration";
    const CODES: &'static [u32] = &[CANNOT_ASSIGN_TO_CONSTANT];
    const OLD_KEYWORD: &'static str = "const";
    const NEW_KEYWORD: &'static str = "let";

    /// declaration -> declaration list -> variable statement -> `const` token.
    ///
    /// Any other shape (e.g. a `for` header) yields `None`.
    fn const_keyword(source: &SourceFile, declaration: NodeId) -> Option<NodeId> {
        let tree = source.tree();
        if tree.kind(declaration)? != SyntaxKind::VariableDeclaration {
            return None;
        }
        let list = tree.parent(declaration)?;
        if tree.kind(list)? != SyntaxKind::VariableDeclarationList {
            return None;
        }
        let statement = tree.parent(list)?;
        if tree.kind(statement)? != SyntaxKind::VariableStatement {
            return None;
        }
        let declaration_list = tree
            .children(statement)
            .iter()
            .copied()
            .find(|c| tree.kind(*c) == Some(SyntaxKind::VariableDeclarationList))?;
        tree.children(declaration_list)
            .iter()
            .copied()
            .find(|c| tree.kind(*c) == Some(SyntaxKind::ConstKeyword))
    }

    /// Span of the keyword text, leading trivia excluded.
    fn keyword_span(source: &SourceFile, keyword: NodeId) -> TextSpan {
        TextSpan::from(source.tree()[keyword].range())
    }
}

impl CodeFix for ConstToLet {
    fn meta(&self) -> FixMeta {
        FixMeta {
            name: Self::NAME,
            description: Self::DESCRIPTION,
            diagnostic_codes: Self::CODES,
        }
    }

    fn resolves(&self, options: &FixOptions<'_>) -> bool {
        let target = options.target();
        if target.kind() != SyntaxKind::Identifier {
            options.log(&format!(
                "{} rejected: target kind is {}",
                Self::NAME,
                target.kind()
            ));
            return false;
        }

        let start = target.start();
        let matched = options
            .diagnostics
            .iter()
            .any(|d| d.code == CANNOT_ASSIGN_TO_CONSTANT && d.start == Some(start));
        if !matched {
            let seen: Vec<String> = options.diagnostics.iter().map(|d| d.log_key()).collect();
            options.log(&format!(
                "{} rejected: no {}|{} among [{}]",
                Self::NAME,
                CANNOT_ASSIGN_TO_CONSTANT,
                start,
                seen.join(";")
            ));
        }
        matched
    }

    fn describe(&self, options: &FixOptions<'_>) -> String {
        let ident = options.target_text();
        format!(
            "Change \"{old} {ident}\" to \"{new} {ident}\"",
            old = Self::OLD_KEYWORD,
            new = Self::NEW_KEYWORD,
        )
    }

    fn apply(
        &self,
        options: &FixOptions<'_>,
        file_name: &Utf8Path,
        action_name: &str,
    ) -> Option<RefactorEditInfo> {
        let source = options.source_file;
        let Some(symbol) = options
            .program
            .symbol_at_location(source, options.target_node)
        else {
            options.log(&format!("{action_name}: no symbol at target"));
            return None;
        };

        // Only the first qualifying declaration is rewritten.
        let Some(keyword) = symbol
            .declarations
            .iter()
            .find_map(|d| Self::const_keyword(source, *d))
        else {
            options.log(&format!(
                "{action_name}: no const declaration among {} declaration(s) of {}",
                symbol.declarations.len(),
                symbol.name
            ));
            return None;
        };

        let span = Self::keyword_span(source, keyword);
        debug!(file = %file_name, start = span.start, length = span.length, "const2let edit");
        Some(RefactorEditInfo::single(
            file_name,
            TextChange::replace(span, Self::NEW_KEYWORD),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{Program, Symbol};
    use codefix_syntax::{SyntaxTree, TreeBuilder};
    use codefix_types::Diagnostic;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    struct TestProgram {
        symbol: Option<Symbol>,
    }

    impl Program for TestProgram {
        fn source_file(&self, _file_name: &Utf8Path) -> Option<&SourceFile> {
            None
        }

        fn pre_emit_diagnostics(&self, _source_file: &SourceFile) -> Vec<Diagnostic> {
            Vec::new()
        }

        fn symbol_at_location(&self, _source_file: &SourceFile, _node: NodeId) -> Option<Symbol> {
            self.symbol.clone()
        }
    }

    // "/* c */ const x = 1;\nx = 2;"
    const TEXT: &str = "/* c */ const x = 1;\nx = 2;";

    struct Parsed {
        source: SourceFile,
        declaration: NodeId,
        first_x: NodeId,
        second_x: NodeId,
        one: NodeId,
    }

    fn parse() -> Parsed {
        let mut b = TreeBuilder::new();
        b.start_node(SyntaxKind::VariableStatement);
        b.start_node(SyntaxKind::VariableDeclarationList);
        b.token(SyntaxKind::ConstKeyword, 0, 8, 13).unwrap();
        let declaration = b.start_node(SyntaxKind::VariableDeclaration);
        let first_x = b.token(SyntaxKind::Identifier, 13, 1, 15).unwrap();
        b.token(SyntaxKind::EqualsToken, 15, 1, 17).unwrap();
        let one = b.token(SyntaxKind::NumericLiteral, 17, 1, 19).unwrap();
        b.finish_node().unwrap();
        b.finish_node().unwrap();
        b.token(SyntaxKind::SemicolonToken, 19, 0, 20).unwrap();
        b.finish_node().unwrap();
        b.start_node(SyntaxKind::ExpressionStatement);
        b.start_node(SyntaxKind::BinaryExpression);
        let second_x = b.token(SyntaxKind::Identifier, 20, 1, 22).unwrap();
        b.token(SyntaxKind::EqualsToken, 22, 1, 24).unwrap();
        b.token(SyntaxKind::NumericLiteral, 24, 1, 26).unwrap();
        b.finish_node().unwrap();
        b.token(SyntaxKind::SemicolonToken, 26, 0, 27).unwrap();
        b.finish_node().unwrap();
        b.token(SyntaxKind::EndOfFileToken, 27, 0, 27).unwrap();
        let tree: SyntaxTree = b.finish(TEXT.len() as u32).unwrap();
        Parsed {
            source: SourceFile::new("a.ts", TEXT, tree),
            declaration,
            first_x,
            second_x,
            one,
        }
    }

    fn with_options<R>(
        parsed: &Parsed,
        target: NodeId,
        diagnostics: Vec<Diagnostic>,
        symbol: Option<Symbol>,
        f: impl FnOnce(&FixOptions<'_>) -> R,
    ) -> (R, Vec<String>) {
        let lines = RefCell::new(Vec::new());
        let sink = |m: &str| lines.borrow_mut().push(m.to_string());
        let program = TestProgram { symbol };
        let options = FixOptions {
            target_node: target,
            source_file: &parsed.source,
            diagnostics,
            program: &program,
            log: &sink,
        };
        let out = f(&options);
        drop(options);
        (out, lines.into_inner())
    }

    #[test]
    fn text_offsets_match_the_fixture() {
        let parsed = parse();
        assert_eq!(parsed.source.node_text(parsed.first_x), "x");
        assert_eq!(parsed.source.tree()[parsed.first_x].start(), 14);
        assert_eq!(parsed.source.node_text(parsed.second_x), "x");
        assert_eq!(parsed.source.tree()[parsed.second_x].start(), 21);
    }

    #[test]
    fn resolves_on_exact_code_and_start() {
        let parsed = parse();
        let (ok, lines) = with_options(
            &parsed,
            parsed.first_x,
            vec![Diagnostic::new(CANNOT_ASSIGN_TO_CONSTANT, 14)],
            None,
            |o| ConstToLet.resolves(o),
        );
        assert!(ok);
        assert!(lines.is_empty());
    }

    #[test]
    fn rejects_same_code_at_other_offset() {
        let parsed = parse();
        let (ok, lines) = with_options(
            &parsed,
            parsed.first_x,
            vec![Diagnostic::new(CANNOT_ASSIGN_TO_CONSTANT, 21)],
            None,
            |o| ConstToLet.resolves(o),
        );
        assert!(!ok);
        assert_eq!(lines, vec!["const2let rejected: no 2588|14 among [2588|21]"]);
    }

    #[test]
    fn rejects_other_code_at_same_offset() {
        let parsed = parse();
        let (ok, _) = with_options(
            &parsed,
            parsed.first_x,
            vec![Diagnostic::new(2304, 14)],
            None,
            |o| ConstToLet.resolves(o),
        );
        assert!(!ok);
    }

    #[test]
    fn rejects_non_identifier_target() {
        let parsed = parse();
        let (ok, lines) = with_options(
            &parsed,
            parsed.one,
            vec![Diagnostic::new(CANNOT_ASSIGN_TO_CONSTANT, 18)],
            None,
            |o| ConstToLet.resolves(o),
        );
        assert!(!ok);
        assert_eq!(lines, vec!["const2let rejected: target kind is NumericLiteral"]);
    }

    #[test]
    fn describe_uses_identifier_text() {
        let parsed = parse();
        let (label, _) = with_options(&parsed, parsed.first_x, vec![], None, |o| {
            ConstToLet.describe(o)
        });
        assert_eq!(label, "Change \"const x\" to \"let x\"");
    }

    #[test]
    fn apply_replaces_keyword_without_trivia() {
        let parsed = parse();
        let symbol = Symbol {
            name: "x".to_string(),
            declarations: vec![parsed.declaration],
        };
        let (edit, _) = with_options(&parsed, parsed.second_x, vec![], Some(symbol), |o| {
            ConstToLet.apply(o, Utf8Path::new("a.ts"), "const2let")
        });
        let edit = edit.expect("edit");
        assert_eq!(
            edit,
            RefactorEditInfo::single("a.ts", TextChange::replace(TextSpan::new(8, 5), "let"))
        );
    }

    #[test]
    fn apply_without_symbol_is_a_no_op() {
        let parsed = parse();
        let (edit, lines) = with_options(&parsed, parsed.first_x, vec![], None, |o| {
            ConstToLet.apply(o, Utf8Path::new("a.ts"), "const2let")
        });
        assert!(edit.is_none());
        assert_eq!(lines, vec!["const2let: no symbol at target"]);
    }

    #[test]
    fn apply_skips_declarations_of_other_shapes() {
        let parsed = parse();
        // The identifier itself is not a declaration node.
        let symbol = Symbol {
            name: "x".to_string(),
            declarations: vec![parsed.first_x, parsed.declaration],
        };
        let (edit, _) = with_options(&parsed, parsed.first_x, vec![], Some(symbol), |o| {
            ConstToLet.apply(o, Utf8Path::new("a.ts"), "const2let")
        });
        assert_eq!(edit.expect("edit").edits[0].text_changes[0].span, TextSpan::new(8, 5));
    }
}
