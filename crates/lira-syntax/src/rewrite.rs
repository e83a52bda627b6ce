//! Structural modification through the facade layer.
//!
//! A replacement is translated into a chain of `modify` calls from the target
//! up to the root, so every sibling subtree at every ancestor level is reused
//! by reference. `replace_with` returns the new green root; the
//! `replace_with_tree` form also derives the fresh facade session over it.

use crate::green::{GreenNode, GreenToken, NodeOrToken};
use crate::red::{SyntaxNode, SyntaxToken, SyntaxTree};

impl SyntaxNode<'_> {
    /// Replaces this node's green node and returns the new green root.
    ///
    /// The replacement must keep the node kind; swapping kinds would change
    /// the parent's slot shape, which is a driver decision above this API.
    #[track_caller]
    pub fn replace_with(self, replacement: GreenNode) -> GreenNode {
        assert_eq!(self.kind(), replacement.kind(), "replacement must keep the node kind");
        propagate(self, replacement)
    }

    /// Like [`Self::replace_with`], but derives a fresh facade session over
    /// the new root. The session this handle belongs to keeps reading the
    /// old tree.
    #[track_caller]
    pub fn replace_with_tree(self, replacement: GreenNode) -> SyntaxTree {
        SyntaxTree::new(self.replace_with(replacement))
    }
}

impl SyntaxToken<'_> {
    /// Replaces this token's green token and returns the new green root.
    #[track_caller]
    pub fn replace_with(self, replacement: GreenToken) -> GreenNode {
        assert_eq!(self.kind(), replacement.kind(), "replacement must keep the token kind");
        let parent = self.parent();
        let green = parent.green().modify_slot(self.index(), NodeOrToken::Token(replacement));
        propagate(parent, green)
    }

    /// Like [`Self::replace_with`], but derives a fresh facade session over
    /// the new root.
    #[track_caller]
    pub fn replace_with_tree(self, replacement: GreenToken) -> SyntaxTree {
        SyntaxTree::new(self.replace_with(replacement))
    }
}

/// Folds `modify` up the ancestor chain: `green` is the new green for `node`,
/// and the returned node is the new root.
fn propagate(mut node: SyntaxNode<'_>, mut green: GreenNode) -> GreenNode {
    while let Some(parent) = node.parent() {
        green = parent.green().modify_slot(node.index(), NodeOrToken::Node(green));
        node = parent;
    }
    green
}
