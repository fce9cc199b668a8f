use std::fmt::Write as _;

use salsa::Database;
use text_size::{TextRange, TextSize};
use triomphe::Arc;

use crate::cursor::Preorder;
use crate::{Green, GreenNode, GreenToken, NodeOrToken, Presence, SyntaxKind};

pub type Red<'db> = NodeOrToken<RedNode<'db>, RedToken<'db>>;

impl<'db> Red<'db> {
    pub fn kind(&self, db: &'db dyn Database) -> SyntaxKind {
        match self {
            NodeOrToken::Node(node) => node.kind(db),
            NodeOrToken::Token(token) => token.kind(db),
        }
    }

    pub fn text_offset(&self) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.text_offset(),
            NodeOrToken::Token(token) => token.text_offset(),
        }
    }

    pub fn text_len(&self, db: &'db dyn Database) -> TextSize {
        match self {
            NodeOrToken::Node(node) => node.text_len(db),
            NodeOrToken::Token(token) => token.text_len(db),
        }
    }

    pub fn text_range(&self, db: &'db dyn Database) -> TextRange {
        TextRange::at(self.text_offset(), self.text_len(db))
    }

    pub fn parent(&self) -> Option<&RedNode<'db>> {
        match self {
            NodeOrToken::Node(node) => node.parent(),
            NodeOrToken::Token(token) => token.parent(),
        }
    }

    fn new_child(
        parent: &Arc<RedNode<'db>>,
        index_in_parent: u32,
        text_offset: TextSize,
        green: Green<'db>,
    ) -> Self {
        match green {
            NodeOrToken::Node(green) => NodeOrToken::Node(RedNode {
                parent: Some(parent.clone()),
                index_in_parent,
                text_offset,
                green,
            }),
            NodeOrToken::Token(green) => NodeOrToken::Token(RedToken {
                parent: Some(parent.clone()),
                index_in_parent,
                text_offset,
                green,
            }),
        }
    }
}

/// Positioned facade over a green node: the node paired with its absolute
/// offset in one particular tree version and a link to the parent facade.
///
/// Facades are transient values rebuilt on every descent. Nothing here is
/// stored in the green layer, which is what lets a green node sit at
/// different offsets in different versions. Two facades are the same tree
/// position only when their greens, offsets, and ancestor chains all agree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedNode<'db> {
    parent: Option<Arc<RedNode<'db>>>,
    index_in_parent: u32,
    text_offset: TextSize,
    green: GreenNode<'db>,
}

impl<'db> RedNode<'db> {
    pub fn new_root(green: GreenNode<'db>) -> Self {
        Self { parent: None, index_in_parent: 0, text_offset: TextSize::new(0), green }
    }

    pub fn green(&self) -> GreenNode<'db> {
        self.green
    }

    pub fn kind(&self, db: &'db dyn Database) -> SyntaxKind {
        self.green.kind(db)
    }

    pub fn presence(&self, db: &'db dyn Database) -> Presence {
        self.green.presence(db)
    }

    pub fn text_offset(&self) -> TextSize {
        self.text_offset
    }

    pub fn text_len(&self, db: &'db dyn Database) -> TextSize {
        self.green.text_len(db)
    }

    pub fn text_range(&self, db: &'db dyn Database) -> TextRange {
        TextRange::at(self.text_offset, self.text_len(db))
    }

    /// Reconstructs the source text spanned by this node, trivia included.
    pub fn text(&self, db: &'db dyn Database) -> String {
        self.green.text(db)
    }

    pub fn parent(&self) -> Option<&RedNode<'db>> {
        self.parent.as_deref()
    }

    /// Slot index of this node in its parent.
    pub fn index(&self) -> usize {
        self.index_in_parent as usize
    }

    pub fn ancestors(&self) -> impl Iterator<Item = &RedNode<'db>> {
        std::iter::successors(Some(self), |node| node.parent())
    }

    pub fn root(&self) -> &RedNode<'db> {
        let mut node = self;
        while let Some(parent) = node.parent() {
            node = parent;
        }
        node
    }

    /// Number of child slots, holes included.
    pub fn child_count(&self, db: &'db dyn Database) -> usize {
        self.green.children(db).len()
    }

    /// Facade for slot `index`, or `None` when the slot is a hole.
    ///
    /// Panics when `index` is out of bounds.
    #[track_caller]
    pub fn child(&self, db: &'db dyn Database, index: usize) -> Option<Red<'db>> {
        let slots = self.green.children(db);
        let green = slots[index]?;
        let offset = self.text_offset
            + slots[..index]
                .iter()
                .flatten()
                .map(|child| child.text_len(db))
                .sum::<TextSize>();
        Some(Red::new_child(&Arc::new(self.clone()), index as u32, offset, green))
    }

    /// Iterates facades for the present children, in source order. Child `i`
    /// starts where the slots before it end.
    pub fn children(&self, db: &'db dyn Database) -> impl Iterator<Item = Red<'db>> + use<'db> {
        let parent = Arc::new(self.clone());
        let mut offset = self.text_offset;
        self.green.children(db).iter().enumerate().filter_map(move |(index, slot)| {
            let green = (*slot)?;
            let child_offset = offset;
            offset += green.text_len(db);
            Some(Red::new_child(&parent, index as u32, child_offset, green))
        })
    }

    pub fn first_child(&self, db: &'db dyn Database) -> Option<RedNode<'db>> {
        self.children(db).find_map(Red::into_node)
    }

    pub fn next_sibling(&self, db: &'db dyn Database) -> Option<RedNode<'db>> {
        let parent = self.parent.clone()?;
        let slots = parent.green.children(db);
        let mut offset = self.text_offset + self.text_len(db);

        for (index, slot) in slots.iter().enumerate().skip(self.index_in_parent as usize + 1) {
            let Some(green) = slot else { continue };
            match green {
                NodeOrToken::Node(green) => {
                    return Some(Self {
                        parent: Some(parent),
                        index_in_parent: index as u32,
                        text_offset: offset,
                        green: *green,
                    });
                }
                NodeOrToken::Token(_) => offset += green.text_len(db),
            }
        }

        None
    }

    /// Returns the facade for this same position in a brand-new tree version
    /// whose slot for this node holds `green`.
    ///
    /// Works slot-by-slot up the ancestor chain: the parent is reallocated
    /// with the replacement substituted, then the grandparent with the new
    /// parent, and so on until the root. One green node is allocated per
    /// ancestor; every subtree off that path keeps its identity, so the cost
    /// is proportional to depth, not tree size.
    pub fn replacing_self(&self, db: &'db dyn Database, green: GreenNode<'db>) -> Self {
        match &self.parent {
            None => Self::new_root(green),
            Some(parent) => {
                let new_parent_green = parent.green.replacing_child(
                    db,
                    self.index_in_parent as usize,
                    Some(Green::Node(green)),
                );
                let new_parent = parent.replacing_self(db, new_parent_green);
                Self {
                    parent: Some(Arc::new(new_parent)),
                    index_in_parent: self.index_in_parent,
                    // Preceding siblings are untouched, so the offset carries over.
                    text_offset: self.text_offset,
                    green,
                }
            }
        }
    }

    pub fn preorder(&self, db: &'db dyn Database) -> Preorder<'db> {
        Preorder::new(db, self.clone())
    }

    /// Renders the subtree with kinds, ranges, and token text, one element
    /// per line. Meant for snapshot tests.
    pub fn debug_dump(&self, db: &'db dyn Database) -> String {
        let mut out = String::new();
        self.dump_into(db, 0, &mut out);
        out
    }

    fn dump_into(&self, db: &'db dyn Database, depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        let missing = if self.presence(db) == Presence::Missing { " (missing)" } else { "" };
        let _ = writeln!(out, "{indent}{:?}@{:?}{missing}", self.kind(db), self.text_range(db));

        for child in self.children(db) {
            match child {
                NodeOrToken::Node(node) => node.dump_into(db, depth + 1, out),
                NodeOrToken::Token(token) => {
                    let _ = writeln!(
                        out,
                        "{indent}  {:?}@{:?} {:?}",
                        token.kind(db),
                        token.text_range(db),
                        token.text(db),
                    );
                }
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedToken<'db> {
    parent: Option<Arc<RedNode<'db>>>,
    index_in_parent: u32,
    text_offset: TextSize,
    green: GreenToken<'db>,
}

impl<'db> RedToken<'db> {
    pub fn green(&self) -> GreenToken<'db> {
        self.green
    }

    pub fn kind(&self, db: &'db dyn Database) -> SyntaxKind {
        self.green.kind(db)
    }

    pub fn parent(&self) -> Option<&RedNode<'db>> {
        self.parent.as_deref()
    }

    /// Slot index of this token in its parent.
    pub fn index(&self) -> usize {
        self.index_in_parent as usize
    }

    pub fn text_offset(&self) -> TextSize {
        self.text_offset
    }

    pub fn text_len(&self, db: &'db dyn Database) -> TextSize {
        self.green.text_len(db)
    }

    /// Token range including attached trivia.
    pub fn text_range(&self, db: &'db dyn Database) -> TextRange {
        TextRange::at(self.text_offset, self.text_len(db))
    }

    /// Token range excluding attached trivia.
    pub fn text_trimmed_range(&self, db: &'db dyn Database) -> TextRange {
        let green = self.green;
        let leading_len = green.leading(db).len();
        let trailing_len = green.trailing(db).len();

        let range = self.text_range(db);
        TextRange::new(range.start() + leading_len, range.end() - trailing_len)
    }

    /// Token text including attached trivia.
    pub fn text(&self, db: &'db dyn Database) -> &'db str {
        self.green.text(db)
    }

    /// Token text excluding attached trivia.
    pub fn text_trimmed(&self, db: &'db dyn Database) -> &'db str {
        self.green.text_trimmed(db)
    }
}
