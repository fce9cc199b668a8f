//! Homogeneous runs of sibling nodes with persistent, non-destructive edits.

use std::fmt;
use std::marker::PhantomData;

use salsa::Database;

use crate::ast::{ListElement, Node};
use crate::green::GreenChild;
use crate::{Green, GreenNode, Presence, RedNode};

/// Typed view over a node whose children are a run of `N` elements.
///
/// The view owns nothing beyond the facade it wraps; it is a projection, not
/// a separate entity. Every edit is pure: it shallow-copies the child slots,
/// allocates one new green list node, and splices it into a new tree version
/// through replacement propagation. Prior versions, and every element subtree
/// the edit did not touch, stay valid and keep their identity.
pub struct SyntaxList<'db, N> {
    syntax: RedNode<'db>,
    _marker: PhantomData<N>,
}

impl<N> Clone for SyntaxList<'_, N> {
    fn clone(&self) -> Self {
        Self { syntax: self.syntax.clone(), _marker: PhantomData }
    }
}

impl<N> PartialEq for SyntaxList<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.syntax == other.syntax
    }
}

impl<N> Eq for SyntaxList<'_, N> {}

impl<N> fmt::Debug for SyntaxList<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxList").field("syntax", &self.syntax).finish()
    }
}

impl<'db, N: ListElement<'db>> SyntaxList<'db, N> {
    /// Builds a detached list holding `elements`, as the root of its own
    /// tree. There is no prior version to splice into.
    pub fn new(db: &'db dyn Database, elements: impl IntoIterator<Item = N>) -> Self {
        let children = elements
            .into_iter()
            .map(|element| Some(Green::Node(element.syntax().green())))
            .collect();
        let green = GreenNode::new(db, N::LIST_KIND, children, Presence::Present);
        Self { syntax: RedNode::new_root(green), _marker: PhantomData }
    }

    /// Number of child slots in the underlying node.
    pub fn len(&self, db: &'db dyn Database) -> usize {
        self.syntax.child_count(db)
    }

    pub fn is_empty(&self, db: &'db dyn Database) -> bool {
        self.len(db) == 0
    }

    /// Element at `index`, or `None` past the end, for a hole, or for a node
    /// no `N` casts from.
    pub fn get(&self, db: &'db dyn Database, index: usize) -> Option<N> {
        if index >= self.len(db) {
            return None;
        }
        let child = self.syntax.child(db, index)?;
        N::cast(db, child.into_node()?)
    }

    /// Element at `index`.
    ///
    /// Panics when `index` is out of bounds or when the slot does not hold an
    /// element.
    #[track_caller]
    pub fn at(&self, db: &'db dyn Database, index: usize) -> N {
        let len = self.len(db);
        assert!(index < len, "index {index} out of bounds in a list of length {len}");
        self.get(db, index)
            .unwrap_or_else(|| panic!("slot {index} does not hold a list element"))
    }

    /// Returns a fresh cursor over this list value. Edits produce new list
    /// values, so a cursor never observes them.
    pub fn iter(&self, db: &'db dyn Database) -> SyntaxListIter<'db, N> {
        SyntaxListIter { db, list: self.clone(), index: 0, len: self.len(db) }
    }

    /// New version with `element` added at the end.
    pub fn appending(&self, db: &'db dyn Database, element: N) -> Self {
        let mut slots = self.slots(db);
        slots.push(Some(Green::Node(element.syntax().green())));
        self.with_slots(db, slots)
    }

    /// New version with `element` added at the front.
    pub fn prepending(&self, db: &'db dyn Database, element: N) -> Self {
        self.inserting(db, 0, element)
    }

    /// New version with `element` inserted before `index`.
    ///
    /// Panics when `index > len`.
    #[track_caller]
    pub fn inserting(&self, db: &'db dyn Database, index: usize, element: N) -> Self {
        let mut slots = self.slots(db);
        let len = slots.len();
        assert!(index <= len, "insertion index {index} out of bounds in a list of length {len}");
        slots.insert(index, Some(Green::Node(element.syntax().green())));
        self.with_slots(db, slots)
    }

    /// New version with the element at `index` removed.
    ///
    /// Panics when `index >= len`.
    #[track_caller]
    pub fn removing(&self, db: &'db dyn Database, index: usize) -> Self {
        let mut slots = self.slots(db);
        let len = slots.len();
        assert!(index < len, "removal index {index} out of bounds in a list of length {len}");
        slots.remove(index);
        self.with_slots(db, slots)
    }

    /// New version without the first element.
    ///
    /// Panics when the list is empty.
    #[track_caller]
    pub fn removing_first(&self, db: &'db dyn Database) -> Self {
        assert!(!self.is_empty(db), "cannot remove from an empty list");
        self.removing(db, 0)
    }

    /// New version without the last element.
    ///
    /// Panics when the list is empty.
    #[track_caller]
    pub fn removing_last(&self, db: &'db dyn Database) -> Self {
        let len = self.len(db);
        assert!(len != 0, "cannot remove from an empty list");
        self.removing(db, len - 1)
    }

    /// New empty version of the same kind.
    pub fn cleared(&self, db: &'db dyn Database) -> Self {
        self.with_slots(db, Vec::new())
    }

    fn slots(&self, db: &'db dyn Database) -> Vec<GreenChild<'db>> {
        self.syntax.green().children(db).clone()
    }

    fn with_slots(&self, db: &'db dyn Database, slots: Vec<GreenChild<'db>>) -> Self {
        let old = self.syntax.green();
        let green = GreenNode::new(db, old.kind(db), slots, old.presence(db));
        Self { syntax: self.syntax.replacing_self(db, green), _marker: PhantomData }
    }
}

impl<'db, N: ListElement<'db>> Node<'db> for SyntaxList<'db, N> {
    fn cast(db: &'db dyn Database, syntax: RedNode<'db>) -> Option<Self> {
        (syntax.kind(db) == N::LIST_KIND)
            .then(|| Self { syntax, _marker: PhantomData })
    }

    fn syntax(&self) -> &RedNode<'db> {
        &self.syntax
    }
}

/// Cursor over one specific list value, finite and forward-only.
///
/// Two cursors compare equal only when they are bound to the same list
/// position in the same tree version and sit at the same index.
pub struct SyntaxListIter<'db, N> {
    db: &'db dyn Database,
    list: SyntaxList<'db, N>,
    index: usize,
    len: usize,
}

impl<N> Clone for SyntaxListIter<'_, N> {
    fn clone(&self) -> Self {
        Self { db: self.db, list: self.list.clone(), index: self.index, len: self.len }
    }
}

impl<N> PartialEq for SyntaxListIter<'_, N> {
    fn eq(&self, other: &Self) -> bool {
        self.list == other.list && self.index == other.index
    }
}

impl<N> Eq for SyntaxListIter<'_, N> {}

impl<N> fmt::Debug for SyntaxListIter<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxListIter")
            .field("list", &self.list)
            .field("index", &self.index)
            .field("len", &self.len)
            .finish()
    }
}

impl<'db, N: ListElement<'db>> Iterator for SyntaxListIter<'db, N> {
    type Item = N;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index == self.len {
            return None;
        }
        let element = self.list.at(self.db, self.index);
        self.index += 1;
        Some(element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.len - self.index;
        (len, Some(len))
    }
}

impl<'db, N: ListElement<'db>> ExactSizeIterator for SyntaxListIter<'db, N> {
    fn len(&self) -> usize {
        self.len - self.index
    }
}
