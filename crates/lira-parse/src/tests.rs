use std::fmt::Write;

use expect_test::{Expect, expect};
use lira_syntax::ast::{self, Node as _};
use lira_syntax::{
    GreenNode, GreenToken, SyntaxKind, SyntaxTree, TokenCache, WalkEventWithTokens,
};
use text_size::{TextRange, TextSize};

fn check(text: &str, expected: Expect) {
    let root = crate::module(text);
    assert_eq!(root.to_string(), text);

    let tree = SyntaxTree::new(root);
    let mut out = String::new();
    let mut depth = 0usize;
    for event in tree.root().preorder_with_tokens() {
        match event {
            WalkEventWithTokens::EnterNode(node) => {
                writeln!(out, "{:indent$}{node:?}", "", indent = depth * 2).unwrap();
                depth += 1;
            }
            WalkEventWithTokens::Token(token) => {
                let text = token.text();
                writeln!(out, "{:indent$}{token:?} {text:?}", "", indent = depth * 2).unwrap();
            }
            WalkEventWithTokens::LeaveNode(_) => depth -= 1,
        }
    }
    expected.assert_eq(&out);
}

#[test]
fn val_statement() {
    check(
        "val x = 1 + 2\n",
        expect![[r#"
            MODULE@0..14
              STMT_LIST@0..14
                VAL_STMT@0..14
                  VAL_KW@0..4 "val "
                  NAME@4..6 "x "
                  EQ@6..8 "= "
                  BINARY_EXPR@8..14
                    LITERAL@8..10
                      NUMBER@8..10 "1 "
                    BINARY_OPERATOR@10..12 "+ "
                    LITERAL@12..14
                      NUMBER@12..14 "2\n"
              EOF@14..14 ""
        "#]],
    );
}

#[test]
fn assignment_with_missing_value() {
    check(
        "x = ",
        expect![[r#"
            MODULE@0..4
              STMT_LIST@0..4
                ASSIGN_STMT@0..4
                  NAME_REF@0..2
                    NAME@0..2 "x "
                  EQ@2..4 "= "
                  NAME_REF@4..4
                    NAME@4..4 ""
              EOF@4..4 ""
        "#]],
    );
}

#[test]
fn round_trip_preserves_every_byte() {
    let inputs = [
        "",
        "val x = 1",
        "x = -y\n",
        "// a comment\nval x = (1 + 2) * 3\n",
        "val = 1",
        "x = )",
        "# @ $",
        "  \n\t ",
    ];
    for input in inputs {
        assert_eq!(crate::module(input).to_string(), input, "round trip failed for {input:?}");
    }
}

#[test]
fn missing_expression_keeps_arity() {
    let root = crate::module("x = ");
    let tree = SyntaxTree::new(root);

    let module = ast::Module::cast(tree.root()).unwrap();
    let stmt = module.stmts().next().unwrap();
    let ast::Stmt::Assign(assign) = stmt else { panic!("expected an assignment") };

    // The value slot is occupied even though the source ends at `=`.
    assert_eq!(assign.syntax().child_count(), 3);
    let Some(ast::Expr::NameRef(value)) = assign.value() else {
        panic!("expected a name reference placeholder")
    };
    let token = value.token().unwrap();
    assert!(token.is_missing());
    assert_eq!(token.width(), TextSize::new(0));

    let diagnostics = tree.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message(), "expected an expression");
    assert_eq!(diagnostics[0].range(), TextRange::empty(4.into()));
}

#[test]
fn val_statement_with_missing_name() {
    let root = crate::module("val = 1");
    assert_eq!(root.to_string(), "val = 1");

    let tree = SyntaxTree::new(root);
    let module = ast::Module::cast(tree.root()).unwrap();
    let ast::Stmt::Val(val) = module.stmts().next().unwrap() else {
        panic!("expected a val statement")
    };

    assert_eq!(val.syntax().child_count(), 4);
    assert!(val.name().unwrap().is_missing());
    assert!(matches!(val.value(), Some(ast::Expr::Literal(_))));
    assert_eq!(tree.diagnostics().len(), 1);
}

#[test]
fn unexpected_tokens_survive_in_error_nodes() {
    let root = crate::module("x = )");
    assert_eq!(root.to_string(), "x = )");

    let tree = SyntaxTree::new(root);
    let diagnostics = tree.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert_eq!(diagnostics[0].message(), "expected an expression");
    assert_eq!(diagnostics[0].range(), TextRange::empty(4.into()));
    assert_eq!(diagnostics[1].message(), "unexpected token `)`");
    assert_eq!(diagnostics[1].range(), TextRange::new(4.into(), 5.into()));

    let stmts = tree.root().child(0).unwrap().into_node().unwrap();
    let kinds: Vec<_> = stmts.children().map(|node| node.kind()).collect();
    assert_eq!(kinds, [SyntaxKind::ASSIGN_STMT, SyntaxKind::ERROR]);
}

#[test]
fn unclosed_paren_synthesizes_the_closer() {
    let root = crate::module("val x = (1");
    assert_eq!(root.to_string(), "val x = (1");

    let tree = SyntaxTree::new(root);
    let diagnostics = tree.diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].message(), "expected `)`");
    assert_eq!(diagnostics[0].range(), TextRange::empty(10.into()));
}

fn operator_of(root: &GreenNode) -> GreenToken {
    let stmts = root.children()[0].as_node().unwrap();
    let stmt = stmts.children()[0].as_node().unwrap();
    let binary = stmt.children()[0].as_node().unwrap();
    binary.children()[1].as_token().unwrap().clone()
}

#[test]
fn shared_cache_dedups_terminals_across_files() {
    let mut cache = TokenCache::new();
    let first = crate::module_with_cache("1 + 2", &mut cache);
    let second = crate::module_with_cache("2 + 1", &mut cache);

    assert!(operator_of(&first).ptr_eq(&operator_of(&second)));
}

#[test]
fn expression_statements_stack_up() {
    let root = crate::module("1\n2\nx\n");
    let tree = SyntaxTree::new(root);
    let module = ast::Module::cast(tree.root()).unwrap();

    let stmts: Vec<_> = module.stmts().collect();
    assert_eq!(stmts.len(), 3);
    assert!(stmts.iter().all(|stmt| matches!(stmt, ast::Stmt::Expr(_))));
    assert_eq!(module.eof().unwrap().kind(), SyntaxKind::EOF);
}
