//! Bottom-up construction of green trees from parser events.

use rustc_hash::FxHashMap;

use crate::green::{Green, GreenNode, GreenToken, NodeOrToken};
use crate::trivia::TriviaPiece;
use crate::{Diagnostic, GreenTrivia, SyntaxKind};

/// Dedup cache for terminal nodes.
///
/// Tokens are content-free of position, so identical terminals may share one
/// instance, even across trees built for different files. Sharing is an
/// election, not a guarantee; builders that do not share a cache simply
/// allocate their own terminals.
#[derive(Default)]
pub struct TokenCache {
    tokens: FxHashMap<TokenKey, GreenToken>,
}

#[derive(Eq, Hash, PartialEq)]
struct TokenKey {
    leading: GreenTrivia,
    kind: SyntaxKind,
    text: Box<str>,
    trailing: GreenTrivia,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn token(
        &mut self,
        leading: &[TriviaPiece],
        kind: SyntaxKind,
        text: &str,
        trailing: &[TriviaPiece],
    ) -> GreenToken {
        let key = TokenKey {
            leading: GreenTrivia::new(leading),
            kind,
            text: text.into(),
            trailing: GreenTrivia::new(trailing),
        };
        self.tokens
            .entry(key)
            .or_insert_with_key(|key| {
                GreenToken::new(
                    key.leading.clone(),
                    key.kind,
                    key.text.clone(),
                    key.trailing.clone(),
                    Vec::new(),
                )
            })
            .clone()
    }
}

enum MaybeOwned<'a, T> {
    Owned(T),
    Borrowed(&'a mut T),
}

impl<T> MaybeOwned<'_, T> {
    fn get_mut(&mut self) -> &mut T {
        match self {
            MaybeOwned::Owned(it) => it,
            MaybeOwned::Borrowed(it) => it,
        }
    }
}

struct OpenNode {
    kind: SyntaxKind,
    first_child: usize,
    diagnostics: Vec<Diagnostic>,
}

/// Builds a green tree from `start_node`/`token`/`finish_node` events.
pub struct Builder<'cache> {
    cache: MaybeOwned<'cache, TokenCache>,
    parents: Vec<OpenNode>,
    children: Vec<Green>,
}

impl Drop for Builder<'_> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.parents.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

impl Default for Builder<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'cache> Builder<'cache> {
    pub fn new() -> Self {
        Self {
            cache: MaybeOwned::Owned(TokenCache::new()),
            parents: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builds through a shared cache so terminals dedup across trees.
    pub fn with_cache(cache: &'cache mut TokenCache) -> Self {
        Self { cache: MaybeOwned::Borrowed(cache), parents: Vec::new(), children: Vec::new() }
    }

    /// Starts a new node of the given kind.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.parents.push(OpenNode {
            kind,
            first_child: self.children.len(),
            diagnostics: Vec::new(),
        });
    }

    /// Finishes the most recently started node.
    #[track_caller]
    pub fn finish_node(&mut self) {
        let parent = self.parents.pop().expect("no started node to finish");
        let children = self.children.split_off(parent.first_child);
        let node = GreenNode::new(parent.kind, children, parent.diagnostics);
        self.children.push(NodeOrToken::Node(node));
    }

    /// Attaches a diagnostic to the innermost started node.
    #[track_caller]
    pub fn diagnostic(&mut self, diagnostic: Diagnostic) {
        let parent = self.parents.last_mut().expect("no started node for a diagnostic");
        parent.diagnostics.push(diagnostic);
    }

    /// Adds a token; `text` must include the trivia text on both sides.
    #[track_caller]
    pub fn token(
        &mut self,
        leading: &[TriviaPiece],
        kind: SyntaxKind,
        text: &str,
        trailing: &[TriviaPiece],
    ) {
        assert!(!self.parents.is_empty(), "token outside of any node");
        let token = self.cache.get_mut().token(leading, kind, text, trailing);
        self.children.push(NodeOrToken::Token(token));
    }

    /// Adds a zero-width missing token of the expected kind.
    ///
    /// Missing tokens carry a diagnostic and are never cached, so their
    /// identity stays local to the tree that synthesized them.
    #[track_caller]
    pub fn missing(&mut self, kind: SyntaxKind, diagnostic: Diagnostic) {
        assert!(!self.parents.is_empty(), "missing token outside of any node");
        self.children.push(NodeOrToken::Token(GreenToken::missing(kind, diagnostic)));
    }

    /// Finishes building and returns the green root.
    #[track_caller]
    pub fn finish(mut self) -> GreenNode {
        assert!(self.parents.is_empty(), "unfinished nodes remain");
        assert_eq!(self.children.len(), 1, "expected exactly one root node");
        match self.children.pop() {
            Some(NodeOrToken::Node(root)) => root,
            _ => panic!("the root must be a node"),
        }
    }
}

#[cfg(test)]
mod tests {
    use text_size::TextSize;

    use super::*;
    use crate::SyntaxKind::*;
    use crate::TriviaPieceKind;

    #[test]
    fn round_trip_text() {
        let mut builder = Builder::new();
        builder.start_node(LITERAL);
        builder.token(
            &[],
            NUMBER,
            "42 ",
            &[TriviaPiece::new(TriviaPieceKind::Whitespace, TextSize::new(1))],
        );
        builder.finish_node();
        let root = builder.finish();

        assert_eq!("42 ", root.to_string());
        assert_eq!(TextSize::new(3), root.width());
    }

    #[test]
    fn shared_cache_dedups_terminals() {
        let mut cache = TokenCache::new();

        let mut first = Builder::with_cache(&mut cache);
        first.start_node(LITERAL);
        first.token(&[], NUMBER, "42", &[]);
        first.finish_node();
        let first = first.finish();

        let mut second = Builder::with_cache(&mut cache);
        second.start_node(LITERAL);
        second.token(&[], NUMBER, "42", &[]);
        second.finish_node();
        let second = second.finish();

        let a = first.children()[0].as_token().unwrap();
        let b = second.children()[0].as_token().unwrap();
        assert!(a.ptr_eq(b));

        // Modifying one tree leaves the other untouched.
        let replaced = first.modify_slot(
            0,
            NodeOrToken::Token(GreenToken::new(
                GreenTrivia::empty(),
                NUMBER,
                "43".into(),
                GreenTrivia::empty(),
                Vec::new(),
            )),
        );
        assert!(!replaced.ptr_eq(&first));
        assert_eq!("42", second.to_string());
    }

    #[test]
    #[should_panic(expected = "you should call `Builder::finish()`")]
    fn unbalanced_builder_panics() {
        let mut builder = Builder::new();
        builder.start_node(MODULE);
    }
}
