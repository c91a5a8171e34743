//! Source text, positions, and tokens.
//!
//! [`SourceCode`] owns the immutable text of one file together with a line
//! index and an optional token stream supplied by the parser. The checker
//! core only ever reads from it: resolving byte offsets to line/column
//! positions and locating the true trailing token of a statement.

use serde::Serialize;

/// A resolved position in source text.
///
/// Lines are 1-based, columns are 0-based, and `offset` is the byte offset
/// into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 0-based column within the line.
    pub column: usize,
    /// Byte offset into the source text.
    pub offset: usize,
}

/// A half-open source range, from `start` (inclusive) to `end` (exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Start position of the range.
    pub start: Position,
    /// End position of the range.
    pub end: Position,
}

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Punctuation such as `;`, `{`, `)`.
    Punctuator,
    /// Identifiers and member names.
    Identifier,
    /// Reserved words such as `if`, `for`, `return`.
    Keyword,
    /// String, numeric, boolean, and null literals.
    Literal,
}

/// A lexical unit of the source, as produced by the external parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Lexical category.
    pub kind: TokenKind,
    /// The literal text of the token.
    pub value: String,
    /// Where the token sits in the source.
    pub span: Span,
}

impl Token {
    /// Returns `true` if this token is a `;` statement terminator.
    pub fn is_semicolon(&self) -> bool {
        self.kind == TokenKind::Punctuator && self.value == ";"
    }
}

/// The immutable source text of one file, plus derived lookup structures.
///
/// Produced once per file by the host (the parser side of the interface)
/// and shared read-only with the checker core for the duration of one pass.
#[derive(Debug, Clone)]
pub struct SourceCode {
    text: String,
    /// Byte offsets at which each line starts. `line_starts[0] == 0`.
    line_starts: Vec<usize>,
    /// Tokens in document order. May be empty when the host does not need
    /// trailing-terminator lookup.
    tokens: Vec<Token>,
}

impl SourceCode {
    /// Creates a `SourceCode` from raw text, computing the line index.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        SourceCode {
            text,
            line_starts,
            tokens: Vec::new(),
        }
    }

    /// Returns the underlying source text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the tokens registered for this source, in document order.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Registers a token at the given byte offset.
    ///
    /// Tokens must be pushed in document order; positions are derived from
    /// the offset and the value's length.
    pub fn push_token(&mut self, kind: TokenKind, value: impl Into<String>, offset: usize) {
        let value = value.into();
        let span = self.span_at(offset, offset + value.len());
        self.tokens.push(Token { kind, value, span });
    }

    /// Resolves a byte offset to a full [`Position`].
    pub fn position_at(&self, offset: usize) -> Position {
        // partition_point returns the count of line starts <= offset,
        // which is exactly the 1-based line number.
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let column = offset - self.line_starts[line - 1];
        Position {
            line,
            column,
            offset,
        }
    }

    /// Builds a [`Span`] from a pair of byte offsets.
    pub fn span_at(&self, start: usize, end: usize) -> Span {
        Span {
            start: self.position_at(start),
            end: self.position_at(end),
        }
    }

    /// Returns the 1-based line number containing the given byte offset.
    pub fn line_of(&self, offset: usize) -> usize {
        self.position_at(offset).line
    }

    /// Returns the actual last token inside `span`, skipping trailing `;`
    /// terminators.
    ///
    /// A statement such as `foo()\n;` visually ends on the line of `)`,
    /// not the line of `;`; this lookup is what attributes it there.
    /// Returns `None` when no token stream covers the span.
    pub fn actual_last_token(&self, span: Span) -> Option<&Token> {
        self.tokens
            .iter()
            .rev()
            .skip_while(|t| t.span.end.offset > span.end.offset)
            .take_while(|t| t.span.start.offset >= span.start.offset)
            .find(|t| !t.is_semicolon())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_at_resolves_lines_and_columns() {
        let source = SourceCode::new("let a;\nlet b;\n");
        assert_eq!(
            source.position_at(0),
            Position {
                line: 1,
                column: 0,
                offset: 0
            }
        );
        assert_eq!(
            source.position_at(4),
            Position {
                line: 1,
                column: 4,
                offset: 4
            }
        );
        assert_eq!(
            source.position_at(7),
            Position {
                line: 2,
                column: 0,
                offset: 7
            }
        );
    }

    #[test]
    fn test_position_at_end_of_text() {
        let source = SourceCode::new("a\nb");
        let pos = source.position_at(3);
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 1);
    }

    #[test]
    fn test_actual_last_token_skips_trailing_semicolon() {
        let text = "foo()\n;";
        let mut source = SourceCode::new(text);
        source.push_token(TokenKind::Identifier, "foo", 0);
        source.push_token(TokenKind::Punctuator, "(", 3);
        source.push_token(TokenKind::Punctuator, ")", 4);
        source.push_token(TokenKind::Punctuator, ";", 6);

        let span = source.span_at(0, text.len());
        let last = source.actual_last_token(span).expect("token");
        assert_eq!(last.value, ")");
        assert_eq!(last.span.end.line, 1);
    }

    #[test]
    fn test_actual_last_token_ignores_tokens_outside_span() {
        let text = "a; b;";
        let mut source = SourceCode::new(text);
        source.push_token(TokenKind::Identifier, "a", 0);
        source.push_token(TokenKind::Punctuator, ";", 1);
        source.push_token(TokenKind::Identifier, "b", 3);
        source.push_token(TokenKind::Punctuator, ";", 4);

        let span = source.span_at(0, 2);
        let last = source.actual_last_token(span).expect("token");
        assert_eq!(last.value, "a");
    }

    #[test]
    fn test_actual_last_token_without_token_stream() {
        let source = SourceCode::new("foo()");
        let span = source.span_at(0, 5);
        assert!(source.actual_last_token(span).is_none());
    }
}
