/// Closed set of node kinds an analysis service may report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyntaxKind {
    // Tokens
    Identifier,
    NumericLiteral,
    StringLiteral,
    ConstKeyword,
    LetKeyword,
    VarKeyword,
    ForKeyword,
    OfKeyword,
    EqualsToken,
    PlusToken,
    CommaToken,
    SemicolonToken,
    OpenParenToken,
    CloseParenToken,
    OpenBraceToken,
    CloseBraceToken,
    EndOfFileToken,
    Unknown,

    // Nodes
    SourceFile,
    VariableStatement,
    VariableDeclarationList,
    VariableDeclaration,
    ExpressionStatement,
    BinaryExpression,
    Block,
    ForOfStatement,
}

impl SyntaxKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SyntaxKind::Identifier => "Identifier",
            SyntaxKind::NumericLiteral => "NumericLiteral",
            SyntaxKind::StringLiteral => "StringLiteral",
            SyntaxKind::ConstKeyword => "ConstKeyword",
            SyntaxKind::LetKeyword => "LetKeyword",
            SyntaxKind::VarKeyword => "VarKeyword",
            SyntaxKind::ForKeyword => "ForKeyword",
            SyntaxKind::OfKeyword => "OfKeyword",
            SyntaxKind::EqualsToken => "EqualsToken",
            SyntaxKind::PlusToken => "PlusToken",
            SyntaxKind::CommaToken => "CommaToken",
            SyntaxKind::SemicolonToken => "SemicolonToken",
            SyntaxKind::OpenParenToken => "OpenParenToken",
            SyntaxKind::CloseParenToken => "CloseParenToken",
            SyntaxKind::OpenBraceToken => "OpenBraceToken",
            SyntaxKind::CloseBraceToken => "CloseBraceToken",
            SyntaxKind::EndOfFileToken => "EndOfFileToken",
            SyntaxKind::Unknown => "Unknown",
            SyntaxKind::SourceFile => "SourceFile",
            SyntaxKind::VariableStatement => "VariableStatement",
            SyntaxKind::VariableDeclarationList => "VariableDeclarationList",
            SyntaxKind::VariableDeclaration => "VariableDeclaration",
            SyntaxKind::ExpressionStatement => "ExpressionStatement",
            SyntaxKind::BinaryExpression => "BinaryExpression",
            SyntaxKind::Block => "Block",
            SyntaxKind::ForOfStatement => "ForOfStatement",
        }
    }

    pub fn is_token(self) -> bool {
        self < SyntaxKind::SourceFile
    }

    /// Keyword kinds for reserved words; `None` for anything else.
    pub fn from_keyword(word: &str) -> Option<SyntaxKind> {
        match word {
            "const" => Some(SyntaxKind::ConstKeyword),
            "let" => Some(SyntaxKind::LetKeyword),
            "var" => Some(SyntaxKind::VarKeyword),
            "for" => Some(SyntaxKind::ForKeyword),
            "of" => Some(SyntaxKind::OfKeyword),
            _ => None,
        }
    }
}

impl std::fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::SyntaxKind;

    #[test]
    fn tokens_and_nodes_are_partitioned() {
        assert!(SyntaxKind::Identifier.is_token());
        assert!(SyntaxKind::EndOfFileToken.is_token());
        assert!(!SyntaxKind::SourceFile.is_token());
        assert!(!SyntaxKind::VariableStatement.is_token());
    }

    #[test]
    fn keywords_map_from_text() {
        assert_eq!(SyntaxKind::from_keyword("const"), Some(SyntaxKind::ConstKeyword));
        assert_eq!(SyntaxKind::from_keyword("constant"), None);
    }
}
