use crate::lexer::{lex, Token};
use anyhow::Context;
use codefix_syntax::{SyntaxKind, SyntaxTree, TreeBuilder};

/// Parses `text` into a tree. Never fails on bad input: unexpected tokens are
/// wrapped in expression statements so every token lands in the tree.
pub(crate) fn parse(text: &str) -> anyhow::Result<SyntaxTree> {
    let mut parser = Parser {
        tokens: lex(text),
        idx: 0,
        builder: TreeBuilder::new(),
    };
    parser.source_file()?;
    parser
        .builder
        .finish(text.len() as u32)
        .context("finish source file")
}

struct Parser {
    tokens: Vec<Token>,
    idx: usize,
    builder: TreeBuilder,
}

impl Parser {
    fn peek(&self) -> SyntaxKind {
        self.tokens
            .get(self.idx)
            .map_or(SyntaxKind::EndOfFileToken, |t| t.kind)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.peek() == kind
    }

    fn bump(&mut self) -> anyhow::Result<()> {
        let Some(token) = self.tokens.get(self.idx).copied() else {
            return Ok(());
        };
        self.idx += 1;
        self.builder
            .token(token.kind, token.pos, token.trivia, token.end)
            .context("emit token")?;
        Ok(())
    }

    fn eat(&mut self, kind: SyntaxKind) -> anyhow::Result<bool> {
        if self.at(kind) {
            self.bump()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        self.builder.finish_node().context("finish node")?;
        Ok(())
    }

    fn source_file(&mut self) -> anyhow::Result<()> {
        while !self.at(SyntaxKind::EndOfFileToken) {
            self.statement()?;
        }
        self.bump()
    }

    fn statement(&mut self) -> anyhow::Result<()> {
        match self.peek() {
            SyntaxKind::ConstKeyword | SyntaxKind::LetKeyword | SyntaxKind::VarKeyword => {
                self.builder.start_node(SyntaxKind::VariableStatement);
                self.declaration_list()?;
                self.eat(SyntaxKind::SemicolonToken)?;
                self.finish()
            }
            SyntaxKind::ForKeyword => self.for_of(),
            SyntaxKind::OpenBraceToken => self.block(),
            SyntaxKind::SemicolonToken
            | SyntaxKind::CommaToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::CloseParenToken
            | SyntaxKind::OfKeyword => {
                self.builder.start_node(SyntaxKind::ExpressionStatement);
                self.bump()?;
                self.finish()
            }
            _ => {
                self.builder.start_node(SyntaxKind::ExpressionStatement);
                self.expression()?;
                self.eat(SyntaxKind::SemicolonToken)?;
                self.finish()
            }
        }
    }

    fn declaration_list(&mut self) -> anyhow::Result<()> {
        self.builder.start_node(SyntaxKind::VariableDeclarationList);
        self.bump()?;
        self.declaration()?;
        while self.eat(SyntaxKind::CommaToken)? {
            self.declaration()?;
        }
        self.finish()
    }

    fn declaration(&mut self) -> anyhow::Result<()> {
        self.builder.start_node(SyntaxKind::VariableDeclaration);
        self.eat(SyntaxKind::Identifier)?;
        if self.eat(SyntaxKind::EqualsToken)? {
            self.expression()?;
        }
        self.finish()
    }

    fn for_of(&mut self) -> anyhow::Result<()> {
        self.builder.start_node(SyntaxKind::ForOfStatement);
        self.bump()?;
        self.eat(SyntaxKind::OpenParenToken)?;
        if matches!(
            self.peek(),
            SyntaxKind::ConstKeyword | SyntaxKind::LetKeyword | SyntaxKind::VarKeyword
        ) {
            self.declaration_list()?;
        } else {
            self.expression()?;
        }
        self.eat(SyntaxKind::OfKeyword)?;
        self.expression()?;
        self.eat(SyntaxKind::CloseParenToken)?;
        if !self.at(SyntaxKind::EndOfFileToken) {
            self.statement()?;
        }
        self.finish()
    }

    fn block(&mut self) -> anyhow::Result<()> {
        self.builder.start_node(SyntaxKind::Block);
        self.bump()?;
        while !self.at(SyntaxKind::CloseBraceToken) && !self.at(SyntaxKind::EndOfFileToken) {
            self.statement()?;
        }
        self.eat(SyntaxKind::CloseBraceToken)?;
        self.finish()
    }

    fn expression(&mut self) -> anyhow::Result<()> {
        let checkpoint = self.builder.checkpoint();
        self.additive()?;
        if self.at(SyntaxKind::EqualsToken) {
            self.builder
                .start_node_at(checkpoint, SyntaxKind::BinaryExpression);
            self.bump()?;
            self.expression()?;
            self.finish()?;
        }
        Ok(())
    }

    fn additive(&mut self) -> anyhow::Result<()> {
        let checkpoint = self.builder.checkpoint();
        self.primary()?;
        while self.at(SyntaxKind::PlusToken) {
            self.builder
                .start_node_at(checkpoint, SyntaxKind::BinaryExpression);
            self.bump()?;
            self.primary()?;
            self.finish()?;
        }
        Ok(())
    }

    fn primary(&mut self) -> anyhow::Result<()> {
        match self.peek() {
            SyntaxKind::SemicolonToken
            | SyntaxKind::CommaToken
            | SyntaxKind::CloseBraceToken
            | SyntaxKind::CloseParenToken
            | SyntaxKind::OfKeyword
            | SyntaxKind::EndOfFileToken => Ok(()),
            _ => self.bump(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn shape(tree: &SyntaxTree, id: codefix_syntax::NodeId, depth: usize, out: &mut Vec<String>) {
        out.push(format!("{}{}", "  ".repeat(depth), tree[id].kind()));
        for child in tree.children(id) {
            shape(tree, *child, depth + 1, out);
        }
    }

    fn outline(text: &str) -> Vec<String> {
        let tree = parse(text).unwrap();
        let mut out = Vec::new();
        shape(&tree, tree.root(), 0, &mut out);
        out
    }

    #[test]
    fn parses_declaration_and_assignment() {
        assert_eq!(
            outline("const x = 1; x = 2;"),
            vec![
                "SourceFile",
                "  VariableStatement",
                "    VariableDeclarationList",
                "      ConstKeyword",
                "      VariableDeclaration",
                "        Identifier",
                "        EqualsToken",
                "        NumericLiteral",
                "    SemicolonToken",
                "  ExpressionStatement",
                "    BinaryExpression",
                "      Identifier",
                "      EqualsToken",
                "      NumericLiteral",
                "    SemicolonToken",
                "  EndOfFileToken",
            ]
        );
    }

    #[test]
    fn for_of_header_is_not_a_variable_statement() {
        let lines = outline("for (const a of b) {}");
        assert_eq!(lines[1], "  ForOfStatement");
        assert_eq!(lines[4], "    VariableDeclarationList");
        assert!(!lines.iter().any(|l| l.trim() == "VariableStatement"));
    }

    #[test]
    fn addition_nests_left() {
        let lines = outline("a + b + c");
        assert_eq!(
            lines[1..5].to_vec(),
            vec![
                "  ExpressionStatement",
                "    BinaryExpression",
                "      BinaryExpression",
                "        Identifier",
            ]
        );
    }

    #[test]
    fn stray_tokens_still_land_in_the_tree() {
        let tree = parse(") } , ;").unwrap();
        let statements = tree.children(tree.root());
        // four wrapped tokens plus end of file
        assert_eq!(statements.len(), 5);

        let tree = parse("x of y").unwrap();
        assert_eq!(tree.children(tree.root()).len(), 4);
    }

    #[test]
    fn root_spans_the_whole_text() {
        let text = "  let y = 1;  // trailing\n";
        let tree = parse(text).unwrap();
        assert_eq!(tree[tree.root()].end(), text.len() as u32);
        assert_eq!(tree[tree.root()].start(), 2);
    }
}
