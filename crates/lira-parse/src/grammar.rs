use lira_syntax::SyntaxKind::*;

use crate::parser::{CompletedMarker, Parser};

pub(crate) fn module(p: &mut Parser<'_>) {
    let module = p.start();

    let stmts = p.start();
    while !p.at(EOF) {
        stmt(p);
    }
    stmts.complete(p, STMT_LIST);

    p.eof();
    module.complete(p, MODULE);
}

fn stmt(p: &mut Parser<'_>) {
    if p.at(VAL_KW) {
        val_stmt(p);
        return;
    }

    let Some(lhs) = expr(p) else {
        // Not the start of any statement. Wrap the offender in an error
        // node so the text survives and move on.
        let m = p.start();
        p.diagnostic(format!("unexpected token `{}`", p.peek_text()));
        p.advance();
        m.complete(p, ERROR);
        return;
    };

    if p.at(EQ) {
        let m = lhs.precede(p);
        p.advance();
        expr_or_missing(p);
        m.complete(p, ASSIGN_STMT);
    } else {
        let m = lhs.precede(p);
        m.complete(p, EXPR_STMT);
    }
}

fn val_stmt(p: &mut Parser<'_>) {
    let m = p.start();
    p.advance();
    p.expect(NAME, "expected a name after `val`");
    p.expect(EQ, "expected `=`");
    expr_or_missing(p);
    m.complete(p, VAL_STMT);
}

fn expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let mut lhs = unary_expr(p)?;

    while p.at(BINARY_OPERATOR) {
        let m = lhs.precede(p);
        p.advance();
        expr_or_missing(p);
        lhs = m.complete(p, BINARY_EXPR);
    }

    Some(lhs)
}

fn unary_expr(p: &mut Parser<'_>) -> Option<CompletedMarker> {
    let cm = match p.peek_kind() {
        NUMBER => {
            let m = p.start();
            p.advance();
            m.complete(p, LITERAL)
        }
        NAME => {
            let m = p.start();
            p.advance();
            m.complete(p, NAME_REF)
        }
        PREFIX_OPERATOR => {
            let m = p.start();
            p.advance();
            if unary_expr(p).is_none() {
                missing_expr(p);
            }
            m.complete(p, PREFIX_EXPR)
        }
        LEFT_PAREN => {
            let m = p.start();
            p.advance();
            expr_or_missing(p);
            p.expect(RIGHT_PAREN, "expected `)`");
            m.complete(p, PAREN_EXPR)
        }
        _ => return None,
    };

    Some(cm)
}

fn expr_or_missing(p: &mut Parser<'_>) {
    if expr(p).is_none() {
        missing_expr(p);
    }
}

/// A name reference around a zero-width name token stands in for an
/// expression the source never provided.
fn missing_expr(p: &mut Parser<'_>) {
    let m = p.start();
    p.missing(NAME, "expected an expression");
    m.complete(p, NAME_REF);
}
