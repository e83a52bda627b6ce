//! Double-dispatch traversal over the closed kind catalog.
//!
//! `Visitor` walks facade nodes for their side effects; `Transformer` maps
//! green nodes to a caller-chosen output; `Rewriter` is the green-to-green
//! transformer whose default reconstructs children through `modify`, so
//! untouched subtrees stay shared. Adding a kind means extending the catalog
//! and the dispatch matches here; the traversal machinery itself never
//! changes.

use crate::SyntaxKind::*;
use crate::green::{Green, GreenNode, GreenToken, NodeOrToken};
use crate::red::{SyntaxNode, SyntaxToken};

/// Side-effecting preorder walk. Unhandled kinds descend into their children;
/// an override that does not call [`walk`] skips the subtree.
pub trait Visitor: Sized {
    fn visit_token(&mut self, _token: SyntaxToken<'_>) {}

    fn visit_module(&mut self, node: SyntaxNode<'_>) {
        walk(self, node);
    }

    fn visit_stmt_list(&mut self, node: SyntaxNode<'_>) {
        walk(self, node);
    }

    fn visit_val_stmt(&mut self, node: SyntaxNode<'_>) {
        walk(self, node);
    }

    fn visit_assign_stmt(&mut self, node: SyntaxNode<'_>) {
        walk(self, node);
    }

    fn visit_expr_stmt(&mut self, node: SyntaxNode<'_>) {
        walk(self, node);
    }

    fn visit_literal(&mut self, node: SyntaxNode<'_>) {
        walk(self, node);
    }

    fn visit_name_ref(&mut self, node: SyntaxNode<'_>) {
        walk(self, node);
    }

    fn visit_binary_expr(&mut self, node: SyntaxNode<'_>) {
        walk(self, node);
    }

    fn visit_prefix_expr(&mut self, node: SyntaxNode<'_>) {
        walk(self, node);
    }

    fn visit_paren_expr(&mut self, node: SyntaxNode<'_>) {
        walk(self, node);
    }

    fn visit_error(&mut self, node: SyntaxNode<'_>) {
        walk(self, node);
    }
}

/// Visits `node`'s children in order, dispatching each by kind.
pub fn walk<V: Visitor>(visitor: &mut V, node: SyntaxNode<'_>) {
    for child in node.children_with_tokens() {
        match child {
            NodeOrToken::Node(node) => node.accept(visitor),
            NodeOrToken::Token(token) => visitor.visit_token(token),
        }
    }
}

impl SyntaxNode<'_> {
    /// Dispatches to the kind-specific visit method.
    pub fn accept<V: Visitor>(self, visitor: &mut V) {
        match self.kind() {
            MODULE => visitor.visit_module(self),
            STMT_LIST => visitor.visit_stmt_list(self),
            VAL_STMT => visitor.visit_val_stmt(self),
            ASSIGN_STMT => visitor.visit_assign_stmt(self),
            EXPR_STMT => visitor.visit_expr_stmt(self),
            LITERAL => visitor.visit_literal(self),
            NAME_REF => visitor.visit_name_ref(self),
            BINARY_EXPR => visitor.visit_binary_expr(self),
            PREFIX_EXPR => visitor.visit_prefix_expr(self),
            PAREN_EXPR => visitor.visit_paren_expr(self),
            ERROR | TOMBSTONE => visitor.visit_error(self),
            kind => unreachable!("{kind:?} is a terminal kind"),
        }
    }
}

/// Structure-producing walk returning a caller-chosen output per node.
///
/// Kind-specific methods default to `transform_node`, the catch-all.
pub trait Transformer: Sized {
    type Output;

    fn transform_token(&mut self, token: &GreenToken) -> Self::Output;

    /// Catch-all for kinds without a dedicated override.
    fn transform_node(&mut self, node: &GreenNode) -> Self::Output;

    fn transform_module(&mut self, node: &GreenNode) -> Self::Output {
        self.transform_node(node)
    }

    fn transform_stmt_list(&mut self, node: &GreenNode) -> Self::Output {
        self.transform_node(node)
    }

    fn transform_val_stmt(&mut self, node: &GreenNode) -> Self::Output {
        self.transform_node(node)
    }

    fn transform_assign_stmt(&mut self, node: &GreenNode) -> Self::Output {
        self.transform_node(node)
    }

    fn transform_expr_stmt(&mut self, node: &GreenNode) -> Self::Output {
        self.transform_node(node)
    }

    fn transform_literal(&mut self, node: &GreenNode) -> Self::Output {
        self.transform_node(node)
    }

    fn transform_name_ref(&mut self, node: &GreenNode) -> Self::Output {
        self.transform_node(node)
    }

    fn transform_binary_expr(&mut self, node: &GreenNode) -> Self::Output {
        self.transform_node(node)
    }

    fn transform_prefix_expr(&mut self, node: &GreenNode) -> Self::Output {
        self.transform_node(node)
    }

    fn transform_paren_expr(&mut self, node: &GreenNode) -> Self::Output {
        self.transform_node(node)
    }

    fn transform_error(&mut self, node: &GreenNode) -> Self::Output {
        self.transform_node(node)
    }
}

impl GreenNode {
    /// Dispatches to the kind-specific transform method.
    pub fn apply<T: Transformer>(&self, transformer: &mut T) -> T::Output {
        match self.kind() {
            MODULE => transformer.transform_module(self),
            STMT_LIST => transformer.transform_stmt_list(self),
            VAL_STMT => transformer.transform_val_stmt(self),
            ASSIGN_STMT => transformer.transform_assign_stmt(self),
            EXPR_STMT => transformer.transform_expr_stmt(self),
            LITERAL => transformer.transform_literal(self),
            NAME_REF => transformer.transform_name_ref(self),
            BINARY_EXPR => transformer.transform_binary_expr(self),
            PREFIX_EXPR => transformer.transform_prefix_expr(self),
            PAREN_EXPR => transformer.transform_paren_expr(self),
            ERROR | TOMBSTONE => transformer.transform_error(self),
            kind => unreachable!("{kind:?} is a terminal kind"),
        }
    }
}

impl Green {
    /// Dispatches a node or token element through the transformer.
    pub fn apply<T: Transformer>(&self, transformer: &mut T) -> T::Output {
        match self {
            NodeOrToken::Node(node) => node.apply(transformer),
            NodeOrToken::Token(token) => transformer.transform_token(token),
        }
    }
}

/// Green-to-green transformer preserving sharing for untouched subtrees.
///
/// Override the kinds of interest; everything else reconstructs through
/// [`Rewriter::rewrite_children`], whose `modify` call returns the original
/// node when no child changed.
pub trait Rewriter: Sized {
    fn rewrite_token(&mut self, token: &GreenToken) -> GreenToken {
        token.clone()
    }

    fn rewrite_module(&mut self, node: &GreenNode) -> GreenNode {
        self.rewrite_children(node)
    }

    fn rewrite_stmt_list(&mut self, node: &GreenNode) -> GreenNode {
        self.rewrite_children(node)
    }

    fn rewrite_val_stmt(&mut self, node: &GreenNode) -> GreenNode {
        self.rewrite_children(node)
    }

    fn rewrite_assign_stmt(&mut self, node: &GreenNode) -> GreenNode {
        self.rewrite_children(node)
    }

    fn rewrite_expr_stmt(&mut self, node: &GreenNode) -> GreenNode {
        self.rewrite_children(node)
    }

    fn rewrite_literal(&mut self, node: &GreenNode) -> GreenNode {
        self.rewrite_children(node)
    }

    fn rewrite_name_ref(&mut self, node: &GreenNode) -> GreenNode {
        self.rewrite_children(node)
    }

    fn rewrite_binary_expr(&mut self, node: &GreenNode) -> GreenNode {
        self.rewrite_children(node)
    }

    fn rewrite_prefix_expr(&mut self, node: &GreenNode) -> GreenNode {
        self.rewrite_children(node)
    }

    fn rewrite_paren_expr(&mut self, node: &GreenNode) -> GreenNode {
        self.rewrite_children(node)
    }

    fn rewrite_error(&mut self, node: &GreenNode) -> GreenNode {
        self.rewrite_children(node)
    }

    /// Rewrites every child and reconstructs via `modify`.
    fn rewrite_children(&mut self, node: &GreenNode) -> GreenNode {
        let children = node
            .children()
            .iter()
            .map(|child| match child {
                NodeOrToken::Node(node) => NodeOrToken::Node(node.rewrite(self)),
                NodeOrToken::Token(token) => NodeOrToken::Token(self.rewrite_token(token)),
            })
            .collect();
        node.modify(children)
    }
}

impl GreenNode {
    /// Dispatches to the kind-specific rewrite method.
    pub fn rewrite<R: Rewriter>(&self, rewriter: &mut R) -> Self {
        match self.kind() {
            MODULE => rewriter.rewrite_module(self),
            STMT_LIST => rewriter.rewrite_stmt_list(self),
            VAL_STMT => rewriter.rewrite_val_stmt(self),
            ASSIGN_STMT => rewriter.rewrite_assign_stmt(self),
            EXPR_STMT => rewriter.rewrite_expr_stmt(self),
            LITERAL => rewriter.rewrite_literal(self),
            NAME_REF => rewriter.rewrite_name_ref(self),
            BINARY_EXPR => rewriter.rewrite_binary_expr(self),
            PREFIX_EXPR => rewriter.rewrite_prefix_expr(self),
            PAREN_EXPR => rewriter.rewrite_paren_expr(self),
            ERROR | TOMBSTONE => rewriter.rewrite_error(self),
            kind => unreachable!("{kind:?} is a terminal kind"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GreenTrivia, SyntaxKind, SyntaxTree};

    fn token(kind: SyntaxKind, text: &str) -> Green {
        NodeOrToken::Token(GreenToken::new(
            GreenTrivia::empty(),
            kind,
            text.into(),
            GreenTrivia::empty(),
            Vec::new(),
        ))
    }

    fn literal(text: &str) -> GreenNode {
        GreenNode::new(LITERAL, vec![token(NUMBER, text)], Vec::new())
    }

    /// `(1 + 2)`
    fn paren_sum() -> GreenNode {
        let sum = GreenNode::new(
            BINARY_EXPR,
            vec![
                NodeOrToken::Node(literal("1 ")),
                token(BINARY_OPERATOR, "+ "),
                NodeOrToken::Node(literal("2")),
            ],
            Vec::new(),
        );
        GreenNode::new(
            PAREN_EXPR,
            vec![token(LEFT_PAREN, "("), NodeOrToken::Node(sum), token(RIGHT_PAREN, ")")],
            Vec::new(),
        )
    }

    #[test]
    fn default_visitor_reaches_every_token() {
        struct TokenCollector(Vec<SyntaxKind>);

        impl Visitor for TokenCollector {
            fn visit_token(&mut self, token: SyntaxToken<'_>) {
                self.0.push(token.kind());
            }
        }

        let tree = SyntaxTree::new(paren_sum());
        let mut collector = TokenCollector(Vec::new());
        tree.root().accept(&mut collector);

        assert_eq!(
            collector.0,
            [LEFT_PAREN, NUMBER, BINARY_OPERATOR, NUMBER, RIGHT_PAREN],
        );
    }

    #[test]
    fn visitor_can_skip_subtrees() {
        struct Shallow(usize);

        impl Visitor for Shallow {
            fn visit_binary_expr(&mut self, _node: SyntaxNode<'_>) {
                // Not walking the children prunes the subtree.
                self.0 += 1;
            }

            fn visit_literal(&mut self, _node: SyntaxNode<'_>) {
                panic!("literals are inside the pruned subtree");
            }
        }

        let tree = SyntaxTree::new(paren_sum());
        let mut shallow = Shallow(0);
        tree.root().accept(&mut shallow);
        assert_eq!(shallow.0, 1);
    }

    #[test]
    fn transformer_threads_a_caller_chosen_output() {
        struct CountLiterals;

        impl Transformer for CountLiterals {
            type Output = usize;

            fn transform_token(&mut self, _token: &GreenToken) -> usize {
                0
            }

            fn transform_node(&mut self, node: &GreenNode) -> usize {
                node.children().iter().map(|child| child.apply(self)).sum()
            }

            fn transform_literal(&mut self, _node: &GreenNode) -> usize {
                1
            }
        }

        assert_eq!(paren_sum().apply(&mut CountLiterals), 2);
    }

    #[test]
    fn rewriter_preserves_sharing_for_untouched_subtrees() {
        struct RenumberTwo;

        impl Rewriter for RenumberTwo {
            fn rewrite_token(&mut self, token: &GreenToken) -> GreenToken {
                if token.kind() == NUMBER && token.text_trimmed() == "2" {
                    GreenToken::new(
                        token.leading().clone(),
                        NUMBER,
                        "9".into(),
                        token.trailing().clone(),
                        Vec::new(),
                    )
                } else {
                    token.clone()
                }
            }
        }

        let root = paren_sum();
        let rewritten = root.rewrite(&mut RenumberTwo);

        assert_eq!("(1 + 9)", rewritten.to_string());
        // The untouched left-hand literal is the same instance.
        let sum = root.children()[1].as_node().unwrap();
        let new_sum = rewritten.children()[1].as_node().unwrap();
        assert!(new_sum.children()[0].ptr_eq(&sum.children()[0]));

        // A rewrite that changes nothing returns the original instances.
        struct Identity;
        impl Rewriter for Identity {}
        let unchanged = root.rewrite(&mut Identity);
        assert!(unchanged.ptr_eq(&root));
    }
}
