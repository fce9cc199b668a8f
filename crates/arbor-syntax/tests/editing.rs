use arbor_syntax::SyntaxKind::*;
use arbor_syntax::ast::{Expr, Module, Node as _, Stmt};
use arbor_syntax::{Builder, RedNode, TriviaPiece, TriviaPieceKind, WalkEvent};
use expect_test::expect;
use salsa::DatabaseImpl;
use text_size::TextRange;

fn ws(len: u32) -> TriviaPiece {
    TriviaPiece::new(TriviaPieceKind::Whitespace, len.into())
}

fn nl(len: u32) -> TriviaPiece {
    TriviaPiece::new(TriviaPieceKind::Newline, len.into())
}

fn push_let_stmt(builder: &mut Builder<'_>, name: &str, value: &str) {
    builder.start_node(LET_STMT);
    builder.token(&[], LET_KW, "let ", &[ws(1)]);
    builder.token(&[], NAME, &format!("{name} "), &[ws(1)]);
    builder.token(&[], EQ, "= ", &[ws(1)]);
    builder.start_node(LITERAL);
    builder.token(&[], NUMBER, value, &[]);
    builder.finish_node();
    builder.token(&[], SEMICOLON, ";\n", &[nl(1)]);
    builder.finish_node();
}

fn sample_module<'db>(db: &'db DatabaseImpl, stmts: &[(&str, &str)]) -> Module<'db> {
    let mut builder = Builder::new(db);
    builder.start_node(MODULE);
    builder.start_node(STMT_LIST);
    for (name, value) in stmts {
        push_let_stmt(&mut builder, name, value);
    }
    builder.finish_node();
    builder.finish_node();
    Module::new(builder.finish())
}

fn detached_let_stmt<'db>(db: &'db DatabaseImpl, name: &str, value: &str) -> Stmt<'db> {
    let mut builder = Builder::new(db);
    push_let_stmt(&mut builder, name, value);
    Stmt::cast(db, RedNode::new_root(builder.finish())).expect("a statement")
}

fn detached_literal<'db>(db: &'db DatabaseImpl, text: &str) -> Expr<'db> {
    let mut builder = Builder::new(db);
    builder.start_node(LITERAL);
    builder.token(&[], NUMBER, text, &[]);
    builder.finish_node();
    Expr::cast(db, RedNode::new_root(builder.finish())).expect("an expression")
}

#[test]
fn reconstructs_the_source_byte_for_byte() {
    let db = DatabaseImpl::new();

    let module = sample_module(&db, &[("x", "1"), ("y", "2")]);
    assert_eq!(module.syntax().text(&db), "let x = 1;\nlet y = 2;\n");
}

#[test]
fn tree_shape_snapshot() {
    let db = DatabaseImpl::new();

    let module = sample_module(&db, &[("x", "1"), ("y", "2")]);
    expect![[r#"
        MODULE@0..22
          STMT_LIST@0..22
            LET_STMT@0..11
              LET_KW@0..4 "let "
              NAME@4..6 "x "
              EQ@6..8 "= "
              LITERAL@8..9
                NUMBER@8..9 "1"
              SEMICOLON@9..11 ";\n"
            LET_STMT@11..22
              LET_KW@11..15 "let "
              NAME@15..17 "y "
              EQ@17..19 "= "
              LITERAL@19..20
                NUMBER@19..20 "2"
              SEMICOLON@20..22 ";\n"
    "#]]
    .assert_eq(&module.syntax().debug_dump(&db));
}

#[test]
fn typed_wrappers_reach_through_the_list() {
    let db = DatabaseImpl::new();

    let module = sample_module(&db, &[("x", "1"), ("y", "2")]);
    let stmts = module.stmts(&db).expect("a statement list");
    assert_eq!(stmts.len(&db), 2);

    let Stmt::Let(first) = stmts.at(&db, 0) else {
        panic!("expected a let statement");
    };
    assert_eq!(first.name(&db).expect("a name").text_trimmed(&db), "x");

    let Expr::Literal(value) = first.value(&db).expect("an initializer") else {
        panic!("expected a literal initializer");
    };
    assert_eq!(value.token(&db).expect("a token").text(&db), "1");
}

#[test]
fn appending_builds_a_new_version_and_keeps_the_old() {
    let db = DatabaseImpl::new();

    let module = sample_module(&db, &[("x", "1"), ("y", "2")]);
    let stmts = module.stmts(&db).expect("a statement list");

    let grown = stmts.appending(&db, detached_let_stmt(&db, "z", "3"));
    let new_module = Module::cast(&db, grown.syntax().root().clone()).expect("a module");

    assert_eq!(new_module.syntax().text(&db), "let x = 1;\nlet y = 2;\nlet z = 3;\n");
    assert_eq!(module.syntax().text(&db), "let x = 1;\nlet y = 2;\n");

    // The untouched statements are the same green nodes in both versions.
    for index in 0..stmts.len(&db) {
        assert_eq!(
            grown.at(&db, index).syntax().green(),
            stmts.at(&db, index).syntax().green(),
        );
    }

    assert_eq!(
        grown.at(&db, 2).syntax().text_range(&db),
        TextRange::new(22.into(), 33.into()),
    );
}

#[test]
fn argument_lists_use_the_same_generic_core() {
    let db = DatabaseImpl::new();

    let mut builder = Builder::new(&db);
    builder.start_node(CALL_EXPR);
    builder.start_node(NAME_REF);
    builder.token(&[], NAME, "f", &[]);
    builder.finish_node();
    builder.token(&[], LEFT_PAREN, "(", &[]);
    builder.start_node(ARG_LIST);
    builder.start_node(LITERAL);
    builder.token(&[], NUMBER, "1 ", &[ws(1)]);
    builder.finish_node();
    builder.start_node(LITERAL);
    builder.token(&[], NUMBER, "2", &[]);
    builder.finish_node();
    builder.finish_node();
    builder.token(&[], RIGHT_PAREN, ")", &[]);
    builder.finish_node();

    let expr = Expr::cast(&db, RedNode::new_root(builder.finish())).expect("an expression");
    let Expr::Call(call) = expr else {
        panic!("expected a call expression");
    };
    assert_eq!(call.syntax().text(&db), "f(1 2)");

    let args = call.args(&db).expect("an argument list");
    let widened = args.inserting(&db, 1, detached_literal(&db, "9 "));

    assert_eq!(widened.syntax().root().text(&db), "f(1 9 2)");
    assert_eq!(call.syntax().text(&db), "f(1 2)");
}

#[test]
fn preorder_visits_nodes_in_source_order() {
    let db = DatabaseImpl::new();

    let module = sample_module(&db, &[("x", "1"), ("y", "2")]);
    let entered: Vec<_> = module
        .syntax()
        .preorder(&db)
        .filter_map(|event| match event {
            WalkEvent::Enter(node) => Some(node.kind(&db)),
            WalkEvent::Leave(_) => None,
        })
        .collect();

    assert_eq!(entered, [MODULE, STMT_LIST, LET_STMT, LITERAL, LET_STMT, LITERAL]);
}

#[test]
fn skipping_a_subtree_leaves_it_unvisited() {
    let db = DatabaseImpl::new();

    let module = sample_module(&db, &[("x", "1"), ("y", "2")]);
    let mut walk = module.syntax().preorder(&db);

    let Some(WalkEvent::Enter(root)) = walk.next() else {
        panic!("expected to enter the root");
    };
    assert_eq!(root.kind(&db), MODULE);

    let Some(WalkEvent::Enter(list)) = walk.next() else {
        panic!("expected to enter the statement list");
    };
    assert_eq!(list.kind(&db), STMT_LIST);

    walk.skip_subtree();
    let Some(WalkEvent::Leave(left)) = walk.next() else {
        panic!("expected to leave the statement list");
    };
    assert_eq!(left.kind(&db), STMT_LIST);

    let Some(WalkEvent::Leave(left)) = walk.next() else {
        panic!("expected to leave the root");
    };
    assert_eq!(left.kind(&db), MODULE);
    assert!(walk.next().is_none());
}
