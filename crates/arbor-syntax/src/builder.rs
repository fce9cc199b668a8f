//! Event-driven construction of green trees.

use salsa::Database;

use crate::green::GreenChild;
use crate::{Green, GreenNode, GreenToken, GreenTrivia, Presence, SyntaxKind, TriviaPiece};

/// Builds a green tree from parser events.
///
/// `start_node`/`finish_node` calls must balance, and the finished build must
/// consist of a single root node spanning everything else.
pub struct Builder<'db> {
    db: &'db dyn Database,
    parents: Vec<(SyntaxKind, usize)>,
    children: Vec<GreenChild<'db>>,
}

impl Drop for Builder<'_> {
    fn drop(&mut self) {
        if !std::thread::panicking() && !self.parents.is_empty() {
            panic!("you should call `Builder::finish()`");
        }
    }
}

impl<'db> Builder<'db> {
    pub fn new(db: &'db dyn Database) -> Self {
        Self { db, parents: Vec::new(), children: Vec::new() }
    }

    /// Starts a new node of the given kind.
    pub fn start_node(&mut self, kind: SyntaxKind) {
        self.parents.push((kind, self.children.len()));
    }

    /// Finishes the most recently started node.
    pub fn finish_node(&mut self) {
        let (kind, first_child) = self.parents.pop().expect("no started node to finish");
        let children = self.children.drain(first_child..).collect();
        let node = GreenNode::new(self.db, kind, children, Presence::Present);
        self.children.push(Some(Green::Node(node)));
    }

    /// Adds a token. `text` is the full token text, including the trivia
    /// described by `leading` and `trailing`.
    pub fn token(
        &mut self,
        leading: &[TriviaPiece],
        kind: SyntaxKind,
        text: &str,
        trailing: &[TriviaPiece],
    ) {
        let token = GreenToken::new(
            self.db,
            GreenTrivia::new(leading),
            kind,
            Box::<str>::from(text),
            GreenTrivia::new(trailing),
        );
        self.children.push(Some(Green::Token(token)));
    }

    /// Leaves a hole where an optional element is absent from the source.
    pub fn absent(&mut self) {
        assert!(!self.parents.is_empty(), "a hole needs an enclosing node");
        self.children.push(None);
    }

    /// Records a construct the grammar expects but the source lacks.
    pub fn missing(&mut self, kind: SyntaxKind) {
        assert!(!self.parents.is_empty(), "a missing node needs an enclosing node");
        self.children.push(Some(Green::Node(GreenNode::missing(self.db, kind))));
    }

    /// Finishes building and returns the root green node.
    pub fn finish(mut self) -> GreenNode<'db> {
        assert!(self.parents.is_empty(), "unfinished node at end of build");
        assert!(self.children.len() == 1, "build must produce exactly one root");
        match self.children.pop() {
            Some(Some(Green::Node(root))) => root,
            _ => panic!("the root must be a present node"),
        }
    }
}
