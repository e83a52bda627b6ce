use crate::SyntaxKind::*;
use crate::kind::Slot;
use crate::red::{SyntaxElement, SyntaxNode, SyntaxToken};

pub trait Node<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self>
    where
        Self: Sized;

    fn syntax(self) -> SyntaxNode<'a>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Module<'a>(SyntaxNode<'a>);

impl<'a> Module<'a> {
    pub fn stmts(self) -> impl Iterator<Item = Stmt<'a>> {
        self.0
            .child(Slot::MODULE_STMTS)
            .and_then(SyntaxElement::into_node)
            .into_iter()
            .flat_map(SyntaxNode::children)
            .filter_map(Stmt::cast)
    }

    pub fn eof(self) -> Option<SyntaxToken<'a>> {
        self.0.child(Slot::MODULE_EOF).and_then(SyntaxElement::into_token)
    }
}

impl<'a> Node<'a> for Module<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
        (syntax.kind() == MODULE).then_some(Self(syntax))
    }

    fn syntax(self) -> SyntaxNode<'a> {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Stmt<'a> {
    Val(ValStmt<'a>),
    Assign(AssignStmt<'a>),
    Expr(ExprStmt<'a>),
}

impl<'a> Node<'a> for Stmt<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
        match syntax.kind() {
            VAL_STMT => Stmt::Val(ValStmt(syntax)).into(),
            ASSIGN_STMT => Stmt::Assign(AssignStmt(syntax)).into(),
            EXPR_STMT => Stmt::Expr(ExprStmt(syntax)).into(),
            _ => None,
        }
    }

    fn syntax(self) -> SyntaxNode<'a> {
        match self {
            Stmt::Val(stmt) => stmt.0,
            Stmt::Assign(stmt) => stmt.0,
            Stmt::Expr(stmt) => stmt.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ValStmt<'a>(SyntaxNode<'a>);

impl<'a> ValStmt<'a> {
    pub fn name(self) -> Option<SyntaxToken<'a>> {
        self.0.child(Slot::VAL_STMT_NAME).and_then(SyntaxElement::into_token)
    }

    pub fn value(self) -> Option<Expr<'a>> {
        expr_at(self.0, Slot::VAL_STMT_VALUE)
    }
}

impl<'a> Node<'a> for ValStmt<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
        (syntax.kind() == VAL_STMT).then_some(Self(syntax))
    }

    fn syntax(self) -> SyntaxNode<'a> {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct AssignStmt<'a>(SyntaxNode<'a>);

impl<'a> AssignStmt<'a> {
    pub fn target(self) -> Option<Expr<'a>> {
        expr_at(self.0, Slot::ASSIGN_STMT_TARGET)
    }

    pub fn value(self) -> Option<Expr<'a>> {
        expr_at(self.0, Slot::ASSIGN_STMT_VALUE)
    }
}

impl<'a> Node<'a> for AssignStmt<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
        (syntax.kind() == ASSIGN_STMT).then_some(Self(syntax))
    }

    fn syntax(self) -> SyntaxNode<'a> {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ExprStmt<'a>(SyntaxNode<'a>);

impl<'a> ExprStmt<'a> {
    pub fn expr(self) -> Option<Expr<'a>> {
        expr_at(self.0, 0)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Expr<'a> {
    Literal(Literal<'a>),
    NameRef(NameRef<'a>),
    Binary(Binary<'a>),
    Prefix(Prefix<'a>),
    Paren(Paren<'a>),
}

impl<'a> Node<'a> for Expr<'a> {
    fn cast(syntax: SyntaxNode<'a>) -> Option<Self> {
        match syntax.kind() {
            LITERAL => Expr::Literal(Literal(syntax)).into(),
            NAME_REF => Expr::NameRef(NameRef(syntax)).into(),
            BINARY_EXPR => Expr::Binary(Binary(syntax)).into(),
            PREFIX_EXPR => Expr::Prefix(Prefix(syntax)).into(),
            PAREN_EXPR => Expr::Paren(Paren(syntax)).into(),
            _ => None,
        }
    }

    fn syntax(self) -> SyntaxNode<'a> {
        match self {
            Expr::Literal(expr) => expr.0,
            Expr::NameRef(expr) => expr.0,
            Expr::Binary(expr) => expr.0,
            Expr::Prefix(expr) => expr.0,
            Expr::Paren(expr) => expr.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Literal<'a>(SyntaxNode<'a>);

impl<'a> Literal<'a> {
    pub fn token(self) -> Option<SyntaxToken<'a>> {
        self.0.child(0).and_then(SyntaxElement::into_token)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct NameRef<'a>(SyntaxNode<'a>);

impl<'a> NameRef<'a> {
    pub fn token(self) -> Option<SyntaxToken<'a>> {
        self.0.child(0).and_then(SyntaxElement::into_token)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Binary<'a>(SyntaxNode<'a>);

impl<'a> Binary<'a> {
    pub fn lhs(self) -> Option<Expr<'a>> {
        expr_at(self.0, Slot::BINARY_EXPR_LHS)
    }

    pub fn op(self) -> Option<SyntaxToken<'a>> {
        self.0.child(Slot::BINARY_EXPR_OP).and_then(SyntaxElement::into_token)
    }

    pub fn rhs(self) -> Option<Expr<'a>> {
        expr_at(self.0, Slot::BINARY_EXPR_RHS)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Prefix<'a>(SyntaxNode<'a>);

impl<'a> Prefix<'a> {
    pub fn op(self) -> Option<SyntaxToken<'a>> {
        self.0.child(Slot::PREFIX_EXPR_OP).and_then(SyntaxElement::into_token)
    }

    pub fn expr(self) -> Option<Expr<'a>> {
        expr_at(self.0, Slot::PREFIX_EXPR_EXPR)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Paren<'a>(SyntaxNode<'a>);

impl<'a> Paren<'a> {
    pub fn expr(self) -> Option<Expr<'a>> {
        expr_at(self.0, Slot::PAREN_EXPR_EXPR)
    }
}

fn expr_at(syntax: SyntaxNode<'_>, slot: usize) -> Option<Expr<'_>> {
    syntax.child(slot).and_then(SyntaxElement::into_node).and_then(Expr::cast)
}
