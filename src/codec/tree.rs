//! Binary-tree match finder.
//!
//! Every window position is a node in one of 256 binary search trees, one per
//! first byte, ordered by the 18 bytes that start at that position. Nodes live
//! in flat link arrays indexed by window position; indices 4097..4353 are the
//! tree roots and `NIL` (4096) marks a missing link or an unlinked node.
//!
//! Inserting a position walks its tree from the root, which is also the
//! longest-match search: the deepest prefix seen on the way down is the match
//! candidate for that position.

use std::cmp::Ordering;

use super::constants::{MAX_MATCH, NIL, ROOT_BASE, TREE_ROOTS, WINDOW_SIZE};
use super::window::HistoryWindow;

const ARENA_SIZE: usize = ROOT_BASE + TREE_ROOTS;

/// Longest match found while inserting a position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Match {
    /// Window position where the match starts
    pub position: usize,
    /// Number of matching bytes (0-18)
    pub length: usize,
}

pub struct MatchTree {
    left: Box<[usize]>,
    right: Box<[usize]>,
    parent: Box<[usize]>,
}

impl MatchTree {
    /// Create a tree with all roots empty and every position unlinked
    pub fn new() -> Self {
        Self {
            left: vec![NIL; ARENA_SIZE].into_boxed_slice(),
            right: vec![NIL; ARENA_SIZE].into_boxed_slice(),
            parent: vec![NIL; ARENA_SIZE].into_boxed_slice(),
        }
    }

    /// Insert window position `r` and return the longest match seen on the way.
    ///
    /// On a full 18-byte match the older node is replaced by `r` and unlinked,
    /// so each distinct key is held by its most recent position.
    pub fn insert(&mut self, window: &HistoryWindow, r: usize) -> Match {
        debug_assert!(r < WINDOW_SIZE);

        let key = window.key(r);
        let mut p = ROOT_BASE + key[0] as usize;
        let mut cmp = Ordering::Greater;
        let mut best = Match::default();

        self.left[r] = NIL;
        self.right[r] = NIL;

        loop {
            if cmp != Ordering::Less {
                if self.right[p] != NIL {
                    p = self.right[p];
                } else {
                    self.right[p] = r;
                    self.parent[r] = p;
                    return best;
                }
            } else if self.left[p] != NIL {
                p = self.left[p];
            } else {
                self.left[p] = r;
                self.parent[r] = p;
                return best;
            }

            let candidate = window.key(p);
            let mut i = 1;
            while i < MAX_MATCH {
                cmp = key[i].cmp(&candidate[i]);
                if cmp != Ordering::Equal {
                    break;
                }
                i += 1;
            }

            if i > best.length {
                best = Match { position: p, length: i };
                if i >= MAX_MATCH {
                    break;
                }
            }
        }

        // Full match: r takes over p's place in the tree
        self.parent[r] = self.parent[p];
        self.left[r] = self.left[p];
        self.right[r] = self.right[p];
        self.set_parent(self.left[p], r);
        self.set_parent(self.right[p], r);
        self.replace_child(self.parent[p], p, r);
        self.parent[p] = NIL;

        best
    }

    /// Remove window position `p` from its tree. Unlinked positions are ignored.
    pub fn delete(&mut self, p: usize) {
        if self.parent[p] == NIL {
            return;
        }

        let q = if self.right[p] == NIL {
            self.left[p]
        } else if self.left[p] == NIL {
            self.right[p]
        } else {
            // In-order predecessor: rightmost node of the left subtree
            let mut q = self.left[p];
            while self.right[q] != NIL {
                q = self.right[q];
            }

            if q != self.left[p] {
                let q_parent = self.parent[q];
                let q_left = self.left[q];
                self.right[q_parent] = q_left;
                self.set_parent(q_left, q_parent);
                self.left[q] = self.left[p];
                self.set_parent(self.left[p], q);
            }
            self.right[q] = self.right[p];
            self.set_parent(self.right[p], q);
            q
        };

        self.set_parent(q, self.parent[p]);
        self.replace_child(self.parent[p], p, q);
        self.parent[p] = NIL;
    }

    /// Whether window position `p` is currently linked into a tree
    pub fn contains(&self, p: usize) -> bool {
        self.parent[p] != NIL
    }

    #[inline]
    fn set_parent(&mut self, node: usize, parent: usize) {
        if node != NIL {
            self.parent[node] = parent;
        }
    }

    /// Point whichever child link of `parent` held `old` at `new`
    #[inline]
    fn replace_child(&mut self, parent: usize, old: usize, new: usize) {
        if self.right[parent] == old {
            self.right[parent] = new;
        } else {
            self.left[parent] = new;
        }
    }
}

impl Default for MatchTree {
    fn default() -> Self {
        Self::new()
    }
}
