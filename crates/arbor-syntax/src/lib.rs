//! Persistent, lossless syntax tree.
//!
//! Structure lives in immutable, interned "green" nodes that carry kinds and
//! text lengths but no positions, so any number of tree versions can share
//! them. Absolute offsets and parent links live in transient "red" facades
//! rebuilt during traversal. Edits never mutate: they reallocate the spine
//! from the edited node to the root and leave every other subtree shared.

/// Typed AST wrappers around the raw syntax tree.
pub mod ast;
mod builder;
mod cursor;
mod green;
mod list;
mod red;
mod syntax_kind;

/// Event-driven construction of green trees.
pub use builder::Builder;
/// Depth-first traversal over red nodes.
pub use cursor::{Preorder, WalkEvent};
/// Immutable raw layer: nodes, tokens, trivia, and child slots.
pub use green::{
    Green, GreenChild, GreenNode, GreenToken, GreenTrivia, NodeOrToken, Presence, TriviaPiece,
    TriviaPieceKind,
};
/// Homogeneous collections and their cursors.
pub use list::{SyntaxList, SyntaxListIter};
/// Positioned facades over green nodes and tokens.
pub use red::{Red, RedNode, RedToken};
/// Token and node kinds used throughout the tree.
pub use syntax_kind::SyntaxKind;
