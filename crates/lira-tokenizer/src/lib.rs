//! Token scanner feeding the tree builder.
//!
//! Tokens carry their leading and trailing trivia so the tree can reproduce
//! the input exactly. Trailing trivia is attached greedily: everything up to
//! the next non-trivia token belongs to the previous one.

pub use lira_syntax::SyntaxKind;
use lira_syntax::SyntaxKind::*;
use lira_syntax::{GreenTrivia, TriviaPiece, TriviaPieceKind};
use text_size::{TextRange, TextSize};

#[derive(Debug, Clone)]
pub struct Token {
    pub leading: GreenTrivia,
    pub kind: SyntaxKind,
    /// Range of the token text proper, trivia excluded.
    pub kind_range: TextRange,
    pub trailing: GreenTrivia,
}

impl Token {
    const EOF: Self = Self {
        kind: EOF,
        kind_range: TextRange::empty(TextSize::new(0)),
        leading: GreenTrivia::empty(),
        trailing: GreenTrivia::empty(),
    };

    /// Range including attached trivia on both sides.
    pub fn full_range(&self) -> TextRange {
        TextRange::new(
            self.kind_range.start() - self.leading.len(),
            self.kind_range.end() + self.trailing.len(),
        )
    }
}

pub struct Tokenizer<'t> {
    text: &'t str,
    /// Start of the piece being scanned; bytes before it are already claimed.
    start: usize,
    pos: usize,
    current: Token,
    trivia_pieces: Vec<TriviaPiece>,
}

impl<'t> Tokenizer<'t> {
    pub fn new(text: &'t str) -> Self {
        let mut tokenizer = Self {
            text,
            start: 0,
            pos: 0,
            current: Token::EOF,
            trivia_pieces: Vec::with_capacity(4),
        };
        tokenizer.next_token();
        tokenizer
    }

    pub fn peek(&self) -> &Token {
        &self.current
    }

    pub fn next_token(&mut self) -> Token {
        self.trivia();
        let trailing_start = self.trivia_pieces.len();
        let (kind, kind_range) = self.syntax_kind();
        self.trivia();

        let (leading, trailing) = self.trivia_pieces.split_at(trailing_start);
        let leading = GreenTrivia::new(leading);
        let trailing = GreenTrivia::new(trailing);

        self.trivia_pieces.clear();
        std::mem::replace(&mut self.current, Token { leading, kind, kind_range, trailing })
    }

    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.text[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat_while(&mut self, f: impl Fn(char) -> bool) {
        while self.peek_char().is_some_and(&f) {
            self.bump();
        }
    }

    /// Text scanned since the last claim.
    fn pending(&self) -> &'t str {
        &self.text[self.start..self.pos]
    }

    /// Claims the scanned text, returning its range.
    fn claim(&mut self) -> TextRange {
        let range = TextRange::new(
            TextSize::new(self.start as u32),
            TextSize::new(self.pos as u32),
        );
        self.start = self.pos;
        range
    }

    fn trivia(&mut self) {
        loop {
            let kind = match self.peek_char() {
                Some('/') if self.peek_second() == Some('/') => {
                    self.eat_while(|c| c != '\n');
                    TriviaPieceKind::SingleLineComment
                }
                Some('\n' | '\r') => {
                    self.eat_while(|c| matches!(c, '\n' | '\r'));
                    TriviaPieceKind::Newline
                }
                Some(c) if c.is_whitespace() => {
                    self.eat_while(|c| c.is_whitespace() && !matches!(c, '\n' | '\r'));
                    TriviaPieceKind::Whitespace
                }
                _ => break,
            };

            let range = self.claim();
            self.trivia_pieces.push(TriviaPiece::new(kind, range.len()));
        }
    }

    fn syntax_kind(&mut self) -> (SyntaxKind, TextRange) {
        // The character literally before the token decides whether an
        // operator binds leftward; trivia claimed above counts as unbound.
        let before = self.text[..self.start].chars().next_back();

        let kind = match self.bump() {
            None => EOF,
            Some('(') => LEFT_PAREN,
            Some(')') => RIGHT_PAREN,
            Some('0'..='9') => {
                self.eat_while(|c| c.is_ascii_digit() || c == '_');
                NUMBER
            }
            Some('A'..='Z' | 'a'..='z' | '_') => {
                self.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');

                match self.pending() {
                    "val" => VAL_KW,
                    _ => NAME,
                }
            }
            Some(c) if is_operator(c) => {
                self.eat_while(is_operator);

                let left_bound = matches!(before, Some(c) if c != '(' && !c.is_whitespace());
                let right_bound =
                    matches!(self.peek_char(), Some(c) if c != ')' && !c.is_whitespace());

                match self.pending() {
                    "=" => EQ,
                    _ if right_bound && !left_bound => PREFIX_OPERATOR,
                    _ => BINARY_OPERATOR,
                }
            }
            Some(_) => UNKNOWN,
        };

        (kind, self.claim())
    }
}

fn is_operator(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%' | '<' | '>' | '!' | '=' | '&' | '|' | '^')
}
