use salsa::Database;
use text_size::TextSize;
use triomphe::ThinArc;

use crate::SyntaxKind;

/// Node-or-token wrapper shared by the green and red layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeOrToken<N, T> {
    Node(N),
    Token(T),
}

impl<N, T> NodeOrToken<N, T> {
    pub fn into_node(self) -> Option<N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    pub fn into_token(self) -> Option<T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }

    pub fn as_node(&self) -> Option<&N> {
        match self {
            NodeOrToken::Node(node) => Some(node),
            NodeOrToken::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&T> {
        match self {
            NodeOrToken::Node(_) => None,
            NodeOrToken::Token(token) => Some(token),
        }
    }
}

/// Marks whether a node stands for source that is actually there.
///
/// A `Missing` node is distinct from a present node that happens to span
/// zero bytes.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Presence {
    Present,
    Missing,
}

pub type Green<'db> = NodeOrToken<GreenNode<'db>, GreenToken<'db>>;

/// Child slot of a green node. `None` is a hole left by error recovery for
/// an optional element the source lacks; it contributes zero length.
pub type GreenChild<'db> = Option<Green<'db>>;

impl<'db> Green<'db> {
    pub fn kind(&self, db: &dyn Database) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(db),
            NodeOrToken::Token(token) => token.kind(db),
        }
    }

    pub fn text_len(&self, db: &dyn Database) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.text_len(db),
            NodeOrToken::Token(token) => token.text_len(db),
        }
    }

    pub(crate) fn write_text(&self, db: &'db dyn Database, out: &mut String) {
        match self {
            NodeOrToken::Node(node) => {
                for slot in node.children(db) {
                    if let Some(child) = slot {
                        child.write_text(db, out);
                    }
                }
            }
            NodeOrToken::Token(token) => out.push_str(token.text(db)),
        }
    }
}

/// Immutable syntax node, interned in `db`.
///
/// The database owns every node of a tree family; nodes are never freed
/// individually, and the interned id is the node's identity. No field ever
/// changes after allocation, so any number of tree versions can share a node.
#[salsa::interned(constructor = alloc, debug)]
pub struct GreenNode<'db> {
    pub kind: SyntaxKind,
    #[returns(ref)]
    pub children: Vec<GreenChild<'db>>,
    pub text_len: TextSize,
    pub presence: Presence,
}

impl<'db> GreenNode<'db> {
    /// Allocates a node in `db`, deriving `text_len` from the children.
    /// Holes contribute zero length.
    pub fn new(
        db: &'db dyn Database,
        kind: SyntaxKind,
        children: Vec<GreenChild<'db>>,
        presence: Presence,
    ) -> Self {
        let text_len: TextSize = children
            .iter()
            .map(|slot| slot.as_ref().map_or(TextSize::new(0), |child| child.text_len(db)))
            .sum();
        Self::alloc(db, kind, children, text_len, presence)
    }

    /// A childless node standing in for a construct the source does not have.
    pub fn missing(db: &'db dyn Database, kind: SyntaxKind) -> Self {
        Self::new(db, kind, Vec::new(), Presence::Missing)
    }

    /// Returns a node of the same kind and presence with slot `index`
    /// substituted. The other slots keep their identity.
    ///
    /// Panics when `index` is out of bounds.
    #[track_caller]
    pub fn replacing_child(self, db: &'db dyn Database, index: usize, slot: GreenChild<'db>) -> Self {
        let mut children = self.children(db).clone();
        children[index] = slot;
        Self::new(db, self.kind(db), children, self.presence(db))
    }

    /// Reconstructs the source text spanned by this node, trivia included.
    pub fn text(self, db: &'db dyn Database) -> String {
        let mut text = String::with_capacity(self.text_len(db).into());
        Green::Node(self).write_text(db, &mut text);
        text
    }
}

#[salsa::interned(debug)]
pub struct GreenToken<'db> {
    pub leading: GreenTrivia,
    pub kind: SyntaxKind,
    #[returns(ref)]
    pub text: Box<str>,
    pub trailing: GreenTrivia,
}

impl<'db> GreenToken<'db> {
    pub fn text_len(self, db: &'db dyn Database) -> TextSize {
        TextSize::new(self.text(db).len() as u32)
    }

    fn leading_trailing_total_len(self, db: &'db dyn Database) -> (TextSize, TextSize, TextSize) {
        let leading_len = self.leading(db).len();
        let trailing_len = self.trailing(db).len();
        let total_len = self.text(db).len() as u32;

        (leading_len, trailing_len, total_len.into())
    }

    pub fn text_trimmed(self, db: &'db dyn Database) -> &'db str {
        let (leading_len, trailing_len, total_len) = self.leading_trailing_total_len(db);

        let start: usize = leading_len.into();
        let end: usize = (total_len - trailing_len).into();

        &self.text(db)[start..end]
    }
}

#[derive(Clone, Eq, Hash, PartialEq)]
pub struct GreenTrivia {
    ptr: Option<ThinArc<TextSize, TriviaPiece>>,
}

impl std::fmt::Debug for GreenTrivia {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GreenTrivia")
            .field("pieces", &self.pieces())
            .field("total_len", &self.len())
            .finish()
    }
}

impl GreenTrivia {
    pub fn new(pieces: &[TriviaPiece]) -> Self {
        if pieces.is_empty() {
            return Self::empty();
        }
        let total_len = pieces.iter().map(|piece| piece.len).sum();
        Self { ptr: Some(ThinArc::from_header_and_slice(total_len, pieces)) }
    }

    pub const fn empty() -> Self {
        Self { ptr: None }
    }

    pub fn len(&self) -> TextSize {
        match self.ptr {
            None => TextSize::new(0),
            Some(ref ptr) => ptr.header.header,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pieces().is_empty()
    }

    pub fn pieces(&self) -> &[TriviaPiece] {
        match &self.ptr {
            None => &[],
            Some(ptr) => &ptr.slice,
        }
    }
}

/// A trivia fragment with its kind and length.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TriviaPiece {
    pub kind: TriviaPieceKind,
    pub len: TextSize,
}

impl TriviaPiece {
    pub fn new(kind: TriviaPieceKind, len: TextSize) -> Self {
        Self { kind, len }
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum TriviaPieceKind {
    Whitespace,
    Newline,
    LineComment,
}
