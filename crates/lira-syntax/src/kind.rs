#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SyntaxKind {
    LEFT_PAREN,
    RIGHT_PAREN,
    EQ,

    VAL_KW,
    NAME,

    NUMBER,
    BINARY_OPERATOR,
    PREFIX_OPERATOR,

    UNKNOWN,
    EOF,

    MODULE,
    STMT_LIST,
    VAL_STMT,
    ASSIGN_STMT,
    EXPR_STMT,
    LITERAL,
    NAME_REF,
    BINARY_EXPR,
    PREFIX_EXPR,
    PAREN_EXPR,
    ERROR,
    TOMBSTONE,
}

/// Number of child slots a non-terminal kind admits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Arity {
    /// Exactly this many slots, always present (missing syntax is filled by
    /// zero-width missing tokens).
    Fixed(usize),
    /// Any number of slots, e.g. statement lists.
    Variadic,
}

impl SyntaxKind {
    /// The slot catalog consulted by generic construction and `modify` code.
    ///
    /// Returns `None` for terminal kinds, which have no slots at all.
    pub fn arity(self) -> Option<Arity> {
        use SyntaxKind::*;

        let arity = match self {
            MODULE => Arity::Fixed(Slot::MODULE_COUNT),
            STMT_LIST => Arity::Variadic,
            VAL_STMT => Arity::Fixed(Slot::VAL_STMT_COUNT),
            ASSIGN_STMT => Arity::Fixed(Slot::ASSIGN_STMT_COUNT),
            EXPR_STMT => Arity::Fixed(1),
            LITERAL => Arity::Fixed(1),
            NAME_REF => Arity::Fixed(1),
            BINARY_EXPR => Arity::Fixed(Slot::BINARY_EXPR_COUNT),
            PREFIX_EXPR => Arity::Fixed(2),
            PAREN_EXPR => Arity::Fixed(Slot::PAREN_EXPR_COUNT),
            ERROR => Arity::Variadic,
            TOMBSTONE => Arity::Variadic,
            _ => return None,
        };
        Some(arity)
    }

    /// Returns `true` for terminal kinds.
    pub fn is_token(self) -> bool {
        self.arity().is_none()
    }
}

/// Named slot indices for the fixed-arity kinds.
pub struct Slot;

impl Slot {
    pub const MODULE_STMTS: usize = 0;
    pub const MODULE_EOF: usize = 1;
    pub const MODULE_COUNT: usize = 2;

    pub const VAL_STMT_VAL_KW: usize = 0;
    pub const VAL_STMT_NAME: usize = 1;
    pub const VAL_STMT_EQ: usize = 2;
    pub const VAL_STMT_VALUE: usize = 3;
    pub const VAL_STMT_COUNT: usize = 4;

    pub const ASSIGN_STMT_TARGET: usize = 0;
    pub const ASSIGN_STMT_EQ: usize = 1;
    pub const ASSIGN_STMT_VALUE: usize = 2;
    pub const ASSIGN_STMT_COUNT: usize = 3;

    pub const BINARY_EXPR_LHS: usize = 0;
    pub const BINARY_EXPR_OP: usize = 1;
    pub const BINARY_EXPR_RHS: usize = 2;
    pub const BINARY_EXPR_COUNT: usize = 3;

    pub const PREFIX_EXPR_OP: usize = 0;
    pub const PREFIX_EXPR_EXPR: usize = 1;

    pub const PAREN_EXPR_LEFT: usize = 0;
    pub const PAREN_EXPR_EXPR: usize = 1;
    pub const PAREN_EXPR_RIGHT: usize = 2;
    pub const PAREN_EXPR_COUNT: usize = 3;
}
