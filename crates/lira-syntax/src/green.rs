//! Internal ("green") node layer: immutable, position-free, shareable.
//!
//! Green nodes carry no absolute positions and no parent links, so the same
//! instance can appear in any number of trees at any offset. Reference
//! identity of the backing allocation is the unit of structural sharing;
//! `modify` compares slots by pointer and returns the receiver untouched
//! when nothing changed.

use std::fmt;

use text_size::TextSize;
use triomphe::Arc;

use crate::kind::Arity;
use crate::{Diagnostic, GreenTrivia, SyntaxKind};

/// A green node or green token, the element type of child slots.
pub type Green = NodeOrToken<GreenNode, GreenToken>;

impl Green {
    pub fn kind(&self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn width(&self) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.width(),
            NodeOrToken::Token(token) => token.width(),
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            NodeOrToken::Node(node) => node.diagnostics(),
            NodeOrToken::Token(token) => token.diagnostics(),
        }
    }

    /// Identity comparison: same backing allocation, not same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (NodeOrToken::Node(a), NodeOrToken::Node(b)) => a.ptr_eq(b),
            (NodeOrToken::Token(a), NodeOrToken::Token(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Display for Green {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeOrToken::Node(node) => fmt::Display::fmt(node, f),
            NodeOrToken::Token(token) => fmt::Display::fmt(token, f),
        }
    }
}

/// Node-or-token wrapper used throughout the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    /// Converts into the node variant, if any.
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Converts into the token variant, if any.
    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    /// Returns a shared reference to the node, if any.
    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    /// Returns a shared reference to the token, if any.
    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

#[derive(Debug)]
struct GreenNodeData {
    kind: SyntaxKind,
    width: TextSize,
    children: Box<[Green]>,
    diagnostics: Box<[Diagnostic]>,
}

/// Immutable non-terminal node.
#[derive(Clone)]
pub struct GreenNode {
    data: Arc<GreenNodeData>,
}

impl GreenNode {
    /// Builds a node, computing its width as the sum of child widths.
    ///
    /// Panics when `kind` is a terminal kind or when the child count violates
    /// the kind's fixed arity. Both are driver defects, not user syntax
    /// errors; user errors are represented inside the tree as missing or
    /// error elements.
    #[track_caller]
    pub fn new(
        kind: SyntaxKind,
        children: Vec<Green>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        match kind.arity() {
            None => panic!("{kind:?} is a terminal kind and cannot have children"),
            Some(Arity::Fixed(count)) => assert_eq!(
                children.len(),
                count,
                "{kind:?} requires exactly {count} child slots",
            ),
            Some(Arity::Variadic) => {}
        }

        let width = children.iter().map(Green::width).sum();
        Self {
            data: Arc::new(GreenNodeData {
                kind,
                width,
                children: children.into_boxed_slice(),
                diagnostics: diagnostics.into_boxed_slice(),
            }),
        }
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }

    /// Total source width spanned, trivia included.
    pub fn width(&self) -> TextSize {
        self.data.width
    }

    pub fn children(&self) -> &[Green] {
        &self.data.children
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.data.diagnostics
    }

    /// Identity comparison: same backing allocation, not same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Replaces this node's diagnostics, keeping kind and children exactly.
    ///
    /// Always allocates a fresh node: diagnostics changes are rare, and a
    /// conservative identity break is correct.
    pub fn with_diagnostics(&self, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            data: Arc::new(GreenNodeData {
                kind: self.data.kind,
                width: self.data.width,
                children: self.data.children.clone(),
                diagnostics: diagnostics.into_boxed_slice(),
            }),
        }
    }

    /// Rebuilds this node with new child slots, sharing where possible.
    ///
    /// Slots are compared by reference left to right. If every supplied child
    /// is identical to the current one, the receiver itself is returned and
    /// nothing is allocated. Otherwise a new node is built with the updated
    /// slots and the same diagnostics.
    #[track_caller]
    pub fn modify(&self, children: Vec<Green>) -> Self {
        assert_eq!(
            children.len(),
            self.data.children.len(),
            "{:?} cannot change its child slot count",
            self.data.kind,
        );

        let unchanged = self
            .data
            .children
            .iter()
            .zip(&children)
            .all(|(current, new)| current.ptr_eq(new));
        if unchanged {
            return self.clone();
        }

        let width = children.iter().map(Green::width).sum();
        Self {
            data: Arc::new(GreenNodeData {
                kind: self.data.kind,
                width,
                children: children.into_boxed_slice(),
                diagnostics: self.data.diagnostics.clone(),
            }),
        }
    }

    /// Rebuilds this node with a single slot replaced.
    #[track_caller]
    pub fn modify_slot(&self, index: usize, child: Green) -> Self {
        let mut children = self.data.children.to_vec();
        children[index] = child;
        self.modify(children)
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.kind(), u32::from(self.width()))
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for child in self.children() {
            fmt::Display::fmt(child, f)?;
        }
        Ok(())
    }
}

#[derive(Debug)]
struct GreenTokenData {
    leading: GreenTrivia,
    kind: SyntaxKind,
    /// Full token text, attached trivia included.
    text: Box<str>,
    trailing: GreenTrivia,
    diagnostics: Box<[Diagnostic]>,
}

/// Immutable terminal node carrying its literal text and attached trivia.
#[derive(Clone)]
pub struct GreenToken {
    data: Arc<GreenTokenData>,
}

impl GreenToken {
    /// Builds a token. `text` must include the leading and trailing trivia
    /// text; the trivia pieces only record how it splits.
    #[track_caller]
    pub fn new(
        leading: GreenTrivia,
        kind: SyntaxKind,
        text: Box<str>,
        trailing: GreenTrivia,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        assert!(kind.is_token(), "{kind:?} is not a terminal kind");
        debug_assert!(
            usize::from(leading.len() + trailing.len()) <= text.len(),
            "trivia longer than the token text",
        );
        Self {
            data: Arc::new(GreenTokenData {
                leading,
                kind,
                text,
                trailing,
                diagnostics: diagnostics.into_boxed_slice(),
            }),
        }
    }

    /// Synthesizes a zero-width missing token of the expected kind.
    ///
    /// Inserted wherever required syntax is absent, so fixed arity holds at
    /// every node and generic traversal needs no absence checks.
    pub fn missing(kind: SyntaxKind, diagnostic: Diagnostic) -> Self {
        Self::new(GreenTrivia::empty(), kind, "".into(), GreenTrivia::empty(), vec![diagnostic])
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data.kind
    }

    /// Total source width, trivia included.
    pub fn width(&self) -> TextSize {
        TextSize::new(self.data.text.len() as u32)
    }

    /// Full token text including attached trivia.
    pub fn text(&self) -> &str {
        &self.data.text
    }

    /// Token text with leading and trailing trivia stripped.
    pub fn text_trimmed(&self) -> &str {
        let start: usize = self.data.leading.len().into();
        let end = self.data.text.len() - usize::from(self.data.trailing.len());
        &self.data.text[start..end]
    }

    pub fn leading(&self) -> &GreenTrivia {
        &self.data.leading
    }

    pub fn trailing(&self) -> &GreenTrivia {
        &self.data.trailing
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.data.diagnostics
    }

    /// Returns `true` for synthesized zero-width tokens.
    pub fn is_missing(&self) -> bool {
        self.data.text.is_empty() && self.data.kind != SyntaxKind::EOF
    }

    /// Identity comparison: same backing allocation, not same value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    /// Replaces this token's diagnostics, keeping everything else exactly.
    pub fn with_diagnostics(&self, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            data: Arc::new(GreenTokenData {
                leading: self.data.leading.clone(),
                kind: self.data.kind,
                text: self.data.text.clone(),
                trailing: self.data.trailing.clone(),
                diagnostics: diagnostics.into_boxed_slice(),
            }),
        }
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{} {:?}", self.kind(), u32::from(self.width()), self.text())
    }
}

impl fmt::Display for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.data.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TriviaPieceKind;
    use crate::trivia::TriviaPiece;

    fn whitespace(len: u32) -> GreenTrivia {
        GreenTrivia::new(&[TriviaPiece::new(TriviaPieceKind::Whitespace, len.into())])
    }

    fn token(kind: SyntaxKind, text: &str) -> GreenToken {
        GreenToken::new(GreenTrivia::empty(), kind, text.into(), GreenTrivia::empty(), Vec::new())
    }

    #[test]
    fn token_text() {
        let token = GreenToken::new(
            whitespace(3),
            SyntaxKind::VAL_KW,
            "\n\t val \t\t".into(),
            whitespace(3),
            Vec::new(),
        );

        assert_eq!("\n\t val \t\t", token.text());
        assert_eq!("val", token.text_trimmed());
        assert_eq!(TextSize::new(9), token.width());
    }

    #[test]
    fn node_width_sums_children() {
        let name = token(SyntaxKind::NAME, "x ");
        let node = GreenNode::new(
            SyntaxKind::NAME_REF,
            vec![NodeOrToken::Token(name)],
            Vec::new(),
        );

        assert_eq!(TextSize::new(2), node.width());
        assert_eq!("x ", node.to_string());
    }

    #[test]
    fn modify_with_identical_children_returns_self() {
        let lhs = Green::Node(GreenNode::new(
            SyntaxKind::LITERAL,
            vec![NodeOrToken::Token(token(SyntaxKind::NUMBER, "1 "))],
            Vec::new(),
        ));
        let op = Green::Token(token(SyntaxKind::BINARY_OPERATOR, "+ "));
        let rhs = Green::Node(GreenNode::new(
            SyntaxKind::LITERAL,
            vec![NodeOrToken::Token(token(SyntaxKind::NUMBER, "2"))],
            Vec::new(),
        ));
        let node = GreenNode::new(
            SyntaxKind::BINARY_EXPR,
            vec![lhs.clone(), op.clone(), rhs.clone()],
            vec![Diagnostic::warning("suspicious addition")],
        );

        let unchanged = node.modify(vec![lhs.clone(), op.clone(), rhs]);
        assert!(node.ptr_eq(&unchanged));
        assert_eq!(unchanged.diagnostics().len(), 1);

        let other_rhs = Green::Node(GreenNode::new(
            SyntaxKind::LITERAL,
            vec![NodeOrToken::Token(token(SyntaxKind::NUMBER, "3"))],
            Vec::new(),
        ));
        let changed = node.modify(vec![lhs.clone(), op, other_rhs]);
        assert!(!node.ptr_eq(&changed));
        // Untouched slots are shared by reference.
        assert!(changed.children()[0].ptr_eq(&lhs));
        // Diagnostics survive a pure structural edit verbatim.
        assert_eq!(changed.diagnostics(), node.diagnostics());
        assert_eq!(TextSize::new(5), changed.width());
    }

    #[test]
    fn with_diagnostics_keeps_kind_and_children() {
        let child = Green::Token(token(SyntaxKind::NUMBER, "42"));
        let node = GreenNode::new(SyntaxKind::LITERAL, vec![child.clone()], Vec::new());

        let annotated = node.with_diagnostics(vec![Diagnostic::error("bad literal")]);
        assert!(!node.ptr_eq(&annotated));
        assert_eq!(node.kind(), annotated.kind());
        assert!(annotated.children()[0].ptr_eq(&child));
        assert_eq!(annotated.diagnostics().len(), 1);
    }

    #[test]
    fn missing_token_is_zero_width() {
        let missing = GreenToken::missing(SyntaxKind::NAME, Diagnostic::error("expected a name"));

        assert!(missing.is_missing());
        assert_eq!(TextSize::new(0), missing.width());
        assert_eq!("", missing.text());
        assert_eq!(1, missing.diagnostics().len());
    }

    #[test]
    #[should_panic(expected = "requires exactly 3 child slots")]
    fn fixed_arity_violation_is_fatal() {
        let _ = GreenNode::new(
            SyntaxKind::BINARY_EXPR,
            vec![Green::Token(token(SyntaxKind::NUMBER, "1"))],
            Vec::new(),
        );
    }
}
