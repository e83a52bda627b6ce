use drop_bomb::DropBomb;
use lira_syntax::{Builder, Diagnostic, GreenNode, SyntaxKind, TokenCache};
use lira_tokenizer::{Token, Tokenizer};

pub(crate) struct Parser<'t> {
    text: &'t str,
    tokenizer: Tokenizer<'t>,
    events: Vec<Event>,
}

impl<'t> Parser<'t> {
    pub(crate) fn new(text: &'t str) -> Self {
        Self { text, tokenizer: Tokenizer::new(text), events: Vec::new() }
    }

    pub(crate) fn peek_kind(&self) -> SyntaxKind {
        self.tokenizer.peek().kind
    }

    /// Text of the upcoming token, trivia excluded.
    pub(crate) fn peek_text(&self) -> &'t str {
        let range: std::ops::Range<usize> = self.tokenizer.peek().kind_range.into();
        &self.text[range]
    }

    pub(crate) fn advance(&mut self) {
        if self.peek_kind() == SyntaxKind::EOF {
            return;
        }

        let token = self.tokenizer.next_token();
        self.events.push(Event::Token(token));
    }

    /// Pushes the end-of-file token, claiming any trailing trivia.
    pub(crate) fn eof(&mut self) {
        debug_assert_eq!(self.peek_kind(), SyntaxKind::EOF);
        let token = self.tokenizer.next_token();
        self.events.push(Event::Token(token));
    }

    pub(crate) fn at(&self, kind: SyntaxKind) -> bool {
        self.peek_kind() == kind
    }

    /// Consumes `kind` or records a zero-width missing token in its place.
    pub(crate) fn expect(&mut self, kind: SyntaxKind, message: &'static str) {
        if self.at(kind) {
            self.advance();
        } else {
            self.missing(kind, message);
        }
    }

    /// Records a missing token of the expected kind carrying a diagnostic.
    pub(crate) fn missing(&mut self, kind: SyntaxKind, message: &'static str) {
        self.events.push(Event::Missing { kind, message });
    }

    /// Attaches a diagnostic to the innermost open node.
    pub(crate) fn diagnostic(&mut self, message: String) {
        self.events.push(Event::Diagnostic { message });
    }

    pub(crate) fn start(&mut self) -> Marker {
        let pos = self.events.len() as u32;
        self.events.push(Event::TOMBSTONE);
        Marker::new(pos)
    }

    pub(crate) fn build_tree(self, cache: &mut TokenCache) -> GreenNode {
        let Parser { text, tokenizer: _, mut events } = self;
        let mut builder = Builder::with_cache(cache);
        let mut forward_parents = Vec::new();

        for i in 0..events.len() {
            match std::mem::replace(&mut events[i], Event::TOMBSTONE) {
                Event::Start { kind, forward_parent } => {
                    if kind == SyntaxKind::TOMBSTONE {
                        continue;
                    }

                    forward_parents.push(kind);
                    let mut idx = i;
                    let mut fp = forward_parent;
                    while let Some(fwd) = fp {
                        idx += fwd as usize;

                        fp = match std::mem::replace(&mut events[idx], Event::TOMBSTONE) {
                            Event::Start { kind, forward_parent, .. } => {
                                if kind != SyntaxKind::TOMBSTONE {
                                    forward_parents.push(kind);
                                }
                                forward_parent
                            }
                            _ => unreachable!(),
                        };
                    }

                    for kind in forward_parents.drain(..).rev() {
                        builder.start_node(kind);
                    }
                }
                Event::Finish => {
                    builder.finish_node();
                }
                Event::Token(token) => {
                    let range: std::ops::Range<usize> = token.full_range().into();
                    builder.token(
                        token.leading.pieces(),
                        token.kind,
                        &text[range],
                        token.trailing.pieces(),
                    );
                }
                Event::Missing { kind, message } => {
                    builder.missing(kind, Diagnostic::error(message));
                }
                Event::Diagnostic { message } => {
                    builder.diagnostic(Diagnostic::error(message));
                }
            }
        }

        builder.finish()
    }
}

enum Event {
    Start { kind: SyntaxKind, forward_parent: Option<u32> },
    Token(Token),
    Missing { kind: SyntaxKind, message: &'static str },
    Diagnostic { message: String },
    Finish,
}

impl Event {
    const TOMBSTONE: Self = Event::Start { kind: SyntaxKind::TOMBSTONE, forward_parent: None };
}

pub(crate) struct Marker {
    position: u32,
    bomb: DropBomb,
}

impl Marker {
    fn new(pos: u32) -> Marker {
        Marker {
            position: pos,
            bomb: DropBomb::new("Marker must be either completed or abandoned"),
        }
    }

    pub(crate) fn complete(mut self, p: &mut Parser<'_>, kind: SyntaxKind) -> CompletedMarker {
        self.bomb.defuse();

        match &mut p.events[self.position as usize] {
            Event::Start { kind: slot, .. } => {
                *slot = kind;
            }
            _ => unreachable!(),
        }

        p.events.push(Event::Finish);
        CompletedMarker::new(self.position)
    }
}

pub(crate) struct CompletedMarker {
    pos: u32,
}

impl CompletedMarker {
    fn new(pos: u32) -> Self {
        CompletedMarker { pos }
    }

    pub(crate) fn precede(self, p: &mut Parser<'_>) -> Marker {
        let new_pos = p.start();

        match &mut p.events[self.pos as usize] {
            Event::Start { forward_parent, .. } => {
                *forward_parent = Some(new_pos.position - self.pos);
            }
            _ => unreachable!(),
        }

        new_pos
    }
}
