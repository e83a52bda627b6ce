//! Lossless, immutable, error-tolerant syntax tree.
//!
//! The tree is split into two layers. Green nodes are position-free,
//! parent-free pure data and are the unit of structural sharing: `modify`
//! compares child slots by reference and reuses every unchanged subtree.
//! The facade layer is materialized lazily over a green root and adds
//! absolute offsets and parent navigation. Concatenating the token text of
//! any tree reproduces the parsed input byte for byte, trivia included.

/// Typed AST wrappers around the raw syntax tree.
pub mod ast;
mod builder;
mod diagnostics;
mod green;
mod kind;
mod red;
mod rewrite;
mod trivia;
mod visitor;

/// Green tree construction from parser events.
pub use builder::{Builder, TokenCache};
/// Node-scoped diagnostics and their position-tagged export form.
pub use diagnostics::{Diagnostic, Severity, SourceDiagnostic};
/// Internal nodes: the immutable, shareable layer.
pub use green::{Green, GreenNode, GreenToken, NodeOrToken};
/// Token and node kinds with their slot catalog.
pub use kind::{Arity, Slot, SyntaxKind};
/// Facade tree API: sessions, handles, traversal.
pub use red::{
    Preorder, PreorderWithTokens, SyntaxElement, SyntaxElementChildren, SyntaxNode, SyntaxToken,
    SyntaxTree, WalkEvent, WalkEventWithTokens,
};
/// Trivia pieces attached to tokens.
pub use trivia::{GreenTrivia, TriviaPiece, TriviaPieceKind};
/// Traversal contracts over the closed kind catalog.
pub use visitor::{Rewriter, Transformer, Visitor, walk};
