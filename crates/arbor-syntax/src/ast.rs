use salsa::Database;

use crate::SyntaxKind::{self, *};
use crate::list::SyntaxList;
use crate::{GreenNode, Red, RedNode, RedToken};

/// Typed view over a red node, guarded by a kind check before wrapping.
pub trait Node<'db>: Sized {
    fn cast(db: &'db dyn Database, syntax: RedNode<'db>) -> Option<Self>;

    fn syntax(&self) -> &RedNode<'db>;
}

/// Element type of a homogeneous list, naming the kind of the list node that
/// holds runs of it.
pub trait ListElement<'db>: Node<'db> {
    const LIST_KIND: SyntaxKind;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module<'db>(RedNode<'db>);

impl<'db> Module<'db> {
    pub fn new(root: GreenNode<'db>) -> Self {
        Self(RedNode::new_root(root))
    }

    pub fn stmts(&self, db: &'db dyn Database) -> Option<SyntaxList<'db, Stmt<'db>>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .find_map(|syntax| SyntaxList::cast(db, syntax))
    }
}

impl<'db> Node<'db> for Module<'db> {
    fn cast(db: &'db dyn Database, syntax: RedNode<'db>) -> Option<Self> {
        (syntax.kind(db) == MODULE).then_some(Self(syntax))
    }

    fn syntax(&self) -> &RedNode<'db> {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt<'db> {
    Let(LetStmt<'db>),
    Expr(ExprStmt<'db>),
}

impl<'db> Node<'db> for Stmt<'db> {
    fn cast(db: &'db dyn Database, syntax: RedNode<'db>) -> Option<Self> {
        match syntax.kind(db) {
            LET_STMT => Stmt::Let(LetStmt(syntax)).into(),
            EXPR_STMT => Stmt::Expr(ExprStmt(syntax)).into(),
            _ => None,
        }
    }

    fn syntax(&self) -> &RedNode<'db> {
        match self {
            Stmt::Let(stmt) => &stmt.0,
            Stmt::Expr(stmt) => &stmt.0,
        }
    }
}

impl<'db> ListElement<'db> for Stmt<'db> {
    const LIST_KIND: SyntaxKind = STMT_LIST;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LetStmt<'db>(RedNode<'db>);

impl<'db> LetStmt<'db> {
    pub fn name(&self, db: &'db dyn Database) -> Option<RedToken<'db>> {
        self.0.children(db).filter_map(Red::into_token).find(|token| token.kind(db) == NAME)
    }

    pub fn value(&self, db: &'db dyn Database) -> Option<Expr<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .find_map(|syntax| Expr::cast(db, syntax))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExprStmt<'db>(RedNode<'db>);

impl<'db> ExprStmt<'db> {
    pub fn expr(&self, db: &'db dyn Database) -> Option<Expr<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .find_map(|syntax| Expr::cast(db, syntax))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr<'db> {
    Literal(Literal<'db>),
    Name(NameRef<'db>),
    Binary(Binary<'db>),
    Paren(ParenExpr<'db>),
    Call(CallExpr<'db>),
}

impl<'db> Node<'db> for Expr<'db> {
    fn cast(db: &'db dyn Database, syntax: RedNode<'db>) -> Option<Self> {
        match syntax.kind(db) {
            LITERAL => Expr::Literal(Literal(syntax)).into(),
            NAME_REF => Expr::Name(NameRef(syntax)).into(),
            BINARY_EXPR => Expr::Binary(Binary(syntax)).into(),
            PAREN_EXPR => Expr::Paren(ParenExpr(syntax)).into(),
            CALL_EXPR => Expr::Call(CallExpr(syntax)).into(),
            _ => None,
        }
    }

    fn syntax(&self) -> &RedNode<'db> {
        match self {
            Expr::Literal(expr) => &expr.0,
            Expr::Name(expr) => &expr.0,
            Expr::Binary(expr) => &expr.0,
            Expr::Paren(expr) => &expr.0,
            Expr::Call(expr) => &expr.0,
        }
    }
}

impl<'db> ListElement<'db> for Expr<'db> {
    const LIST_KIND: SyntaxKind = ARG_LIST;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal<'db>(RedNode<'db>);

impl<'db> Literal<'db> {
    pub fn token(&self, db: &'db dyn Database) -> Option<RedToken<'db>> {
        self.0.children(db).filter_map(Red::into_token).next()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRef<'db>(RedNode<'db>);

impl<'db> NameRef<'db> {
    pub fn ident(&self, db: &'db dyn Database) -> Option<RedToken<'db>> {
        self.0.children(db).filter_map(Red::into_token).find(|token| token.kind(db) == NAME)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binary<'db>(RedNode<'db>);

impl<'db> Binary<'db> {
    pub fn lhs(&self, db: &'db dyn Database) -> Option<Expr<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .next()
            .and_then(|syntax| Expr::cast(db, syntax))
    }

    pub fn op(&self, db: &'db dyn Database) -> Option<&'db str> {
        self.0
            .children(db)
            .filter_map(Red::into_token)
            .find(|token| token.kind(db) == OPERATOR)
            .map(|token| token.text_trimmed(db))
    }

    pub fn rhs(&self, db: &'db dyn Database) -> Option<Expr<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .nth(1)
            .and_then(|syntax| Expr::cast(db, syntax))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParenExpr<'db>(RedNode<'db>);

impl<'db> ParenExpr<'db> {
    pub fn expr(&self, db: &'db dyn Database) -> Option<Expr<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .find_map(|syntax| Expr::cast(db, syntax))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallExpr<'db>(RedNode<'db>);

impl<'db> CallExpr<'db> {
    pub fn callee(&self, db: &'db dyn Database) -> Option<Expr<'db>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .find_map(|syntax| Expr::cast(db, syntax))
    }

    pub fn args(&self, db: &'db dyn Database) -> Option<SyntaxList<'db, Expr<'db>>> {
        self.0
            .children(db)
            .filter_map(Red::into_node)
            .find_map(|syntax| SyntaxList::cast(db, syntax))
    }
}

impl<'db> Node<'db> for CallExpr<'db> {
    fn cast(db: &'db dyn Database, syntax: RedNode<'db>) -> Option<Self> {
        (syntax.kind(db) == CALL_EXPR).then_some(Self(syntax))
    }

    fn syntax(&self) -> &RedNode<'db> {
        &self.0
    }
}
