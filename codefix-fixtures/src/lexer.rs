use codefix_syntax::SyntaxKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: SyntaxKind,
    /// Full start, trivia included.
    pub pos: u32,
    pub trivia: u32,
    pub end: u32,
}

impl Token {
    pub fn start(&self) -> u32 {
        self.pos + self.trivia
    }
}

/// Splits `text` into tokens; whitespace and comments become leading trivia.
/// Always ends with an `EndOfFileToken` carrying any trailing trivia.
pub(crate) fn lex(text: &str) -> Vec<Token> {
    let bytes = text.as_bytes();
    let mut out = Vec::new();
    let mut i = 0usize;

    loop {
        let pos = i;
        i = skip_trivia(bytes, i);
        let start = i;
        if i >= bytes.len() {
            out.push(Token {
                kind: SyntaxKind::EndOfFileToken,
                pos: pos as u32,
                trivia: (start - pos) as u32,
                end: start as u32,
            });
            return out;
        }

        let c = bytes[i];
        let kind = if c.is_ascii_alphabetic() || c == b'_' || c == b'$' {
            while i < bytes.len()
                && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'$')
            {
                i += 1;
            }
            SyntaxKind::from_keyword(&text[start..i]).unwrap_or(SyntaxKind::Identifier)
        } else if c.is_ascii_digit() {
            while i < bytes.len() && (bytes[i].is_ascii_digit() || bytes[i] == b'.') {
                i += 1;
            }
            SyntaxKind::NumericLiteral
        } else if c == b'"' || c == b'\'' {
            i += 1;
            while i < bytes.len() && bytes[i] != c && bytes[i] != b'\n' {
                i += 1;
            }
            if i < bytes.len() && bytes[i] == c {
                i += 1;
            }
            SyntaxKind::StringLiteral
        } else {
            let kind = match c {
                b'=' => SyntaxKind::EqualsToken,
                b'+' => SyntaxKind::PlusToken,
                b',' => SyntaxKind::CommaToken,
                b';' => SyntaxKind::SemicolonToken,
                b'(' => SyntaxKind::OpenParenToken,
                b')' => SyntaxKind::CloseParenToken,
                b'{' => SyntaxKind::OpenBraceToken,
                b'}' => SyntaxKind::CloseBraceToken,
                _ => SyntaxKind::Unknown,
            };
            // One whole character, so offsets stay on char boundaries.
            i += text[i..].chars().next().map_or(1, char::len_utf8);
            kind
        };

        out.push(Token {
            kind,
            pos: pos as u32,
            trivia: (start - pos) as u32,
            end: i as u32,
        });
    }
}

fn skip_trivia(bytes: &[u8], mut i: usize) -> usize {
    loop {
        if i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        } else if bytes[i..].starts_with(b"//") {
            while i < bytes.len() && bytes[i] != b'\n' {
                i += 1;
            }
        } else if bytes[i..].starts_with(b"/*") {
            i += 2;
            while i < bytes.len() && !bytes[i..].starts_with(b"*/") {
                i += 1;
            }
            i = (i + 2).min(bytes.len());
        } else {
            return i;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn comments_and_whitespace_are_leading_trivia() {
        let tokens = lex("/* c */ const x");
        assert_eq!(tokens[0].kind, SyntaxKind::ConstKeyword);
        assert_eq!((tokens[0].pos, tokens[0].trivia, tokens[0].end), (0, 8, 13));
        assert_eq!(tokens[1].kind, SyntaxKind::Identifier);
        assert_eq!(tokens[1].start(), 14);
        assert_eq!(tokens[2].kind, SyntaxKind::EndOfFileToken);
    }

    #[test]
    fn trailing_trivia_belongs_to_end_of_file() {
        let tokens = lex("x // done\n");
        let eof = tokens.last().unwrap();
        assert_eq!(eof.kind, SyntaxKind::EndOfFileToken);
        assert_eq!((eof.pos, eof.end), (1, 10));
    }

    #[test]
    fn non_ascii_is_a_single_unknown_token() {
        let tokens = lex("é");
        assert_eq!(tokens[0].kind, SyntaxKind::Unknown);
        assert_eq!(tokens[0].end, 2);
    }
}
