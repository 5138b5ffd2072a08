//! Concrete syntax tree and the stack it is assembled on.
//!
//! The parser pushes terminals as leaves and reduces the top entries of the
//! stack into a single tree whenever a rule completes. Reductions name
//! entries by their 1-based distance from the top, so a token parsed late
//! (an infix operator, say) can become the root over operands parsed before
//! it.

use crate::error::ParseError;
use crate::lexer::Token;

/// A node with one payload token and an ordered list of children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    value: Token,
    children: Vec<Tree>,
}

impl Tree {
    pub fn new(value: Token) -> Self {
        Tree {
            value,
            children: Vec::new(),
        }
    }

    pub fn with_children(value: Token, children: Vec<Tree>) -> Self {
        Tree { value, children }
    }

    pub fn value(&self) -> &Token {
        &self.value
    }

    /// Shorthand for `value().text`.
    pub fn text(&self) -> &str {
        &self.value.text
    }

    pub fn children(&self) -> &[Tree] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Tree> {
        self.children.get(index)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn add_child(&mut self, child: Tree) {
        self.children.push(child);
    }

    /// Number of nodes in the tree, including this one.
    pub fn size(&self) -> usize {
        1 + self.children.iter().map(Tree::size).sum::<usize>()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParseStack {
    entries: Vec<Tree>,
}

impl ParseStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, tree: Tree) {
        self.entries.push(tree);
    }

    pub fn push_leaf(&mut self, token: Token) {
        self.entries.push(Tree::new(token));
    }

    pub fn pop(&mut self) -> Result<Tree, ParseError> {
        self.entries
            .pop()
            .ok_or_else(|| ParseError::internal("pop from an empty parse stack"))
    }

    pub fn top(&self) -> Option<&Tree> {
        self.entries.last()
    }

    /// Entries from bottom to top.
    pub fn entries(&self) -> &[Tree] {
        &self.entries
    }

    /// Reduce the top `children.len() + 1` entries into one tree.
    ///
    /// `root` and `children` are 1-based positions counted from the top and
    /// must together cover exactly `1..=children.len() + 1`. The entries at
    /// `children` are appended to the root entry in argument order.
    pub fn make_tree(&mut self, root: usize, children: &[usize]) -> Result<(), ParseError> {
        let count = children.len() + 1;
        if count > self.entries.len() {
            return Err(ParseError::internal(format!(
                "reduction of {} entries on a stack of {}",
                count,
                self.entries.len()
            )));
        }
        let mut seen = vec![false; count];
        for &index in std::iter::once(&root).chain(children) {
            if index == 0 || index > count || seen[index - 1] {
                return Err(ParseError::internal(format!(
                    "bad reduction indices: root {} children {:?}",
                    root, children
                )));
            }
            seen[index - 1] = true;
        }

        // Drain keeps bottom-to-top order, so position `i` from the top sits
        // at `count - i` in the drained slots.
        let base = self.entries.len() - count;
        let mut slots: Vec<Option<Tree>> = self.entries.drain(base..).map(Some).collect();
        let mut tree = slots[count - root]
            .take()
            .ok_or_else(|| ParseError::internal("reduction root missing"))?;
        for &index in children {
            let child = slots[count - index]
                .take()
                .ok_or_else(|| ParseError::internal("reduction child missing"))?;
            tree.add_child(child);
        }
        self.entries.push(tree);
        Ok(())
    }

    pub fn into_entries(self) -> Vec<Tree> {
        self.entries
    }
}
