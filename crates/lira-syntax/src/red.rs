//! Facade ("red") node layer: position-aware, parent-linked views.
//!
//! One `SyntaxTree` session is derived per green root. Facade entries live in
//! an arena owned by the session and are materialized lazily, slot by slot,
//! on first access; repeated access returns the cached entry for the session
//! lifetime. Handles are `Copy` and carry the session reference, so facade
//! identity is only meaningful within one session. The arena sits behind a
//! `RefCell`, which keeps the session confined to a single thread at the type
//! level while green trees remain freely shareable across threads.

use std::cell::RefCell;
use std::fmt;

use text_size::{TextRange, TextSize};

use crate::green::{Green, GreenNode, GreenToken, NodeOrToken};
use crate::{SourceDiagnostic, SyntaxKind};

struct RedData {
    green: Green,
    offset: TextSize,
    parent: Option<u32>,
    index_in_parent: u32,
    /// Lazily filled facade ids for child slots; empty for tokens.
    slots: Box<[Option<u32>]>,
}

/// Owned facade session over one green root.
pub struct SyntaxTree {
    arena: RefCell<Vec<RedData>>,
}

impl SyntaxTree {
    pub fn new(root: GreenNode) -> Self {
        let slots = vec![None; root.children().len()].into_boxed_slice();
        let root = RedData {
            green: NodeOrToken::Node(root),
            offset: TextSize::new(0),
            parent: None,
            index_in_parent: 0,
            slots,
        };
        Self { arena: RefCell::new(vec![root]) }
    }

    /// Returns the root facade node.
    pub fn root(&self) -> SyntaxNode<'_> {
        SyntaxNode { tree: self, id: 0 }
    }

    /// Flattens every node-local diagnostic into a position-tagged list in
    /// source order.
    ///
    /// Diagnostics never aggregate upward inside the tree; this walk is the
    /// only place absolute positions are attached to them.
    pub fn diagnostics(&self) -> Vec<SourceDiagnostic> {
        let mut out = Vec::new();
        for event in self.root().preorder_with_tokens() {
            match event {
                WalkEventWithTokens::EnterNode(node) => {
                    let green = node.green();
                    out.extend(
                        green.diagnostics().iter().map(|d| SourceDiagnostic::new(d, node.range())),
                    );
                }
                WalkEventWithTokens::Token(token) => {
                    let green = token.green();
                    out.extend(
                        green.diagnostics().iter().map(|d| SourceDiagnostic::new(d, token.range())),
                    );
                }
                WalkEventWithTokens::LeaveNode(_) => {}
            }
        }
        out
    }

    /// Returns the cached facade id for a child slot, materializing it on
    /// first access.
    fn child_id(&self, parent: u32, index: usize) -> u32 {
        if let Some(id) = self.arena.borrow()[parent as usize].slots[index] {
            return id;
        }

        let (green_parent, parent_offset) = {
            let arena = self.arena.borrow();
            let data = &arena[parent as usize];
            let node = data.green.as_node().expect("only nodes have child slots");
            (node.clone(), data.offset)
        };
        let children = green_parent.children();
        let offset = parent_offset
            + children[..index].iter().map(Green::width).sum::<TextSize>();
        let green = children[index].clone();
        let slots = match &green {
            NodeOrToken::Node(node) => vec![None; node.children().len()].into_boxed_slice(),
            NodeOrToken::Token(_) => Box::default(),
        };

        let mut arena = self.arena.borrow_mut();
        // The slot may have been filled while the borrow was released.
        if let Some(id) = arena[parent as usize].slots[index] {
            return id;
        }
        let id = arena.len() as u32;
        arena.push(RedData {
            green,
            offset,
            parent: Some(parent),
            index_in_parent: index as u32,
            slots,
        });
        arena[parent as usize].slots[index] = Some(id);
        id
    }

    fn green(&self, id: u32) -> Green {
        self.arena.borrow()[id as usize].green.clone()
    }

    fn offset(&self, id: u32) -> TextSize {
        self.arena.borrow()[id as usize].offset
    }

    fn parent_of(&self, id: u32) -> Option<u32> {
        self.arena.borrow()[id as usize].parent
    }

    fn index_in_parent(&self, id: u32) -> usize {
        self.arena.borrow()[id as usize].index_in_parent as usize
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree").field("root", &self.root()).finish()
    }
}

/// Facade node handle tied to the lifetime of its session.
#[derive(Clone, Copy)]
pub struct SyntaxNode<'a> {
    tree: &'a SyntaxTree,
    id: u32,
}

impl PartialEq for SyntaxNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxNode<'_> {}

impl<'a> SyntaxNode<'a> {
    /// Returns this node's green node.
    pub fn green(self) -> GreenNode {
        self.tree.green(self.id).into_node().expect("node handle wraps a green node")
    }

    pub fn kind(self) -> SyntaxKind {
        self.green().kind()
    }

    /// Absolute source offset of this node's first character.
    pub fn offset(self) -> TextSize {
        self.tree.offset(self.id)
    }

    /// Total source width spanned, trivia included.
    pub fn width(self) -> TextSize {
        self.green().width()
    }

    /// Absolute range covered by this node.
    pub fn range(self) -> TextRange {
        TextRange::at(self.offset(), self.width())
    }

    /// Reconstructs the literal source text for this span, trivia included.
    pub fn text(self) -> String {
        self.green().to_string()
    }

    /// Returns the parent node if any.
    pub fn parent(self) -> Option<Self> {
        Some(Self { tree: self.tree, id: self.tree.parent_of(self.id)? })
    }

    /// Returns an iterator of ancestors starting from this node.
    pub fn ancestors(self) -> impl Iterator<Item = SyntaxNode<'a>> + Clone {
        std::iter::successors(Some(self), |it| it.parent())
    }

    /// This node's slot index within its parent.
    pub fn index(self) -> usize {
        self.tree.index_in_parent(self.id)
    }

    /// Number of child slots.
    pub fn child_count(self) -> usize {
        self.green().children().len()
    }

    /// Materializes and returns the child at `index`, caching it for the
    /// session lifetime.
    pub fn child(self, index: usize) -> Option<SyntaxElement<'a>> {
        if index >= self.child_count() {
            return None;
        }
        let id = self.tree.child_id(self.id, index);
        let element = match self.tree.green(id) {
            NodeOrToken::Node(_) => NodeOrToken::Node(SyntaxNode { tree: self.tree, id }),
            NodeOrToken::Token(_) => NodeOrToken::Token(SyntaxToken { tree: self.tree, id }),
        };
        Some(element)
    }

    /// Iterates children including tokens.
    pub fn children_with_tokens(self) -> SyntaxElementChildren<'a> {
        SyntaxElementChildren { node: self, index: 0, len: self.child_count() }
    }

    /// Iterates child nodes, skipping tokens.
    pub fn children(self) -> impl Iterator<Item = SyntaxNode<'a>> {
        self.children_with_tokens().filter_map(SyntaxElement::into_node)
    }

    /// Returns a preorder iterator over nodes.
    pub fn preorder(self) -> Preorder<'a> {
        Preorder { inner: self.preorder_with_tokens() }
    }

    /// Returns a preorder iterator over nodes and tokens.
    pub fn preorder_with_tokens(self) -> PreorderWithTokens<'a> {
        PreorderWithTokens { stack: Vec::new(), root: Some(self), entered: false }
    }
}

impl fmt::Debug for SyntaxNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.range())
    }
}

/// Facade token handle tied to the lifetime of its session.
#[derive(Clone, Copy)]
pub struct SyntaxToken<'a> {
    tree: &'a SyntaxTree,
    id: u32,
}

impl PartialEq for SyntaxToken<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for SyntaxToken<'_> {}

impl<'a> SyntaxToken<'a> {
    /// Returns this token's green token.
    pub fn green(self) -> GreenToken {
        self.tree.green(self.id).into_token().expect("token handle wraps a green token")
    }

    pub fn kind(self) -> SyntaxKind {
        self.green().kind()
    }

    /// Absolute source offset of this token's first character, leading trivia
    /// included.
    pub fn offset(self) -> TextSize {
        self.tree.offset(self.id)
    }

    /// Total source width, trivia included.
    pub fn width(self) -> TextSize {
        self.green().width()
    }

    /// Absolute range covered by this token, trivia included.
    pub fn range(self) -> TextRange {
        TextRange::at(self.offset(), self.width())
    }

    /// Absolute range excluding leading and trailing trivia.
    pub fn trimmed_range(self) -> TextRange {
        let green = self.green();
        let range = self.range();
        TextRange::new(range.start() + green.leading().len(), range.end() - green.trailing().len())
    }

    /// Token text including attached trivia.
    pub fn text(self) -> String {
        self.green().text().to_owned()
    }

    /// Returns the parent node.
    pub fn parent(self) -> SyntaxNode<'a> {
        let id = self.tree.parent_of(self.id).expect("tokens always have a parent");
        SyntaxNode { tree: self.tree, id }
    }

    /// This token's slot index within its parent.
    pub fn index(self) -> usize {
        self.tree.index_in_parent(self.id)
    }

    /// Returns `true` for synthesized zero-width tokens.
    pub fn is_missing(self) -> bool {
        self.green().is_missing()
    }
}

impl fmt::Debug for SyntaxToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{:?}", self.kind(), self.range())
    }
}

/// Node or token element inside the facade tree.
pub type SyntaxElement<'a> = NodeOrToken<SyntaxNode<'a>, SyntaxToken<'a>>;

impl<'a> SyntaxElement<'a> {
    pub fn kind(self) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(),
            NodeOrToken::Token(token) => token.kind(),
        }
    }

    pub fn range(self) -> TextRange {
        match self {
            NodeOrToken::Node(node) => node.range(),
            NodeOrToken::Token(token) => token.range(),
        }
    }
}

/// Iterator over children including tokens.
#[derive(Clone)]
pub struct SyntaxElementChildren<'a> {
    node: SyntaxNode<'a>,
    index: usize,
    len: usize,
}

impl<'a> Iterator for SyntaxElementChildren<'a> {
    type Item = SyntaxElement<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.len {
            return None;
        }
        let child = self.node.child(self.index);
        self.index += 1;
        child
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len - self.index;
        (len, Some(len))
    }
}

impl ExactSizeIterator for SyntaxElementChildren<'_> {}

/// Preorder walk event for nodes.
#[derive(Clone, Copy, Debug)]
pub enum WalkEvent<'a> {
    Enter(SyntaxNode<'a>),
    Leave(SyntaxNode<'a>),
}

/// Preorder walk event including tokens.
#[derive(Clone, Copy, Debug)]
pub enum WalkEventWithTokens<'a> {
    EnterNode(SyntaxNode<'a>),
    LeaveNode(SyntaxNode<'a>),
    Token(SyntaxToken<'a>),
}

/// Preorder traversal over nodes.
#[derive(Clone)]
pub struct Preorder<'a> {
    inner: PreorderWithTokens<'a>,
}

impl Preorder<'_> {
    /// Skips the current subtree during traversal.
    pub fn skip_subtree(&mut self) {
        self.inner.skip_subtree();
    }
}

impl<'a> Iterator for Preorder<'a> {
    type Item = WalkEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.find_map(|event| match event {
            WalkEventWithTokens::EnterNode(it) => Some(WalkEvent::Enter(it)),
            WalkEventWithTokens::LeaveNode(it) => Some(WalkEvent::Leave(it)),
            WalkEventWithTokens::Token(_) => None,
        })
    }
}

/// Preorder traversal over nodes and tokens.
#[derive(Clone)]
pub struct PreorderWithTokens<'a> {
    stack: Vec<(SyntaxNode<'a>, SyntaxElementChildren<'a>)>,
    root: Option<SyntaxNode<'a>>,
    /// Whether the last yielded event entered a node, i.e. there is a
    /// current subtree to skip.
    entered: bool,
}

impl PreorderWithTokens<'_> {
    /// Skips the subtree of the node just entered.
    ///
    /// Only valid directly after an enter event; the skipped node gets no
    /// leave event.
    pub fn skip_subtree(&mut self) {
        assert!(self.entered, "skip_subtree must follow an enter event");
        self.entered = false;
        self.stack.pop();
    }
}

impl<'a> Iterator for PreorderWithTokens<'a> {
    type Item = WalkEventWithTokens<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = if let Some(root) = self.root.take() {
            self.stack.push((root, root.children_with_tokens()));
            WalkEventWithTokens::EnterNode(root)
        } else {
            let (_, active) = self.stack.last_mut()?;
            match active.next() {
                Some(NodeOrToken::Node(child)) => {
                    self.stack.push((child, child.children_with_tokens()));
                    WalkEventWithTokens::EnterNode(child)
                }
                Some(NodeOrToken::Token(child)) => WalkEventWithTokens::Token(child),
                None => {
                    let (node, _) = self.stack.pop().expect("should have an exited-from node");
                    WalkEventWithTokens::LeaveNode(node)
                }
            }
        };
        self.entered = matches!(event, WalkEventWithTokens::EnterNode(_));
        Some(event)
    }
}
