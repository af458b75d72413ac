use std::error::Error;
use std::fmt::{self, Display};

use crate::pool::{Handle, Pool};

/// One element of the chain: a value and the handle of its successor.
pub struct Node {
    value: u32,
    next: Option<Handle>,
}

/// Why a list operation failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ListError {
    OutOfBounds { index: usize, size: usize },
    AllocFailed,
}

impl Display for ListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListError::OutOfBounds { index, size } => {
                write!(f, "index {} out of bounds for list of size {}", index, size)
            }
            ListError::AllocFailed => write!(f, "pool could not acquire a node"),
        }
    }
}

impl Error for ListError {}

/// Singly-linked list of `u32` values whose nodes live in a caller-supplied
/// pool. The list owns the pool, and with it every node in the chain.
pub struct List<A: Pool<Node>> {
    pool: A,
    head: Option<Handle>,
    size: usize,
}

impl<A: Pool<Node>> List<A> {
    pub fn new(pool: A) -> List<A> {
        List {
            pool,
            head: None,
            size: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn pool(&self) -> &A {
        &self.pool
    }

    fn node(&self, handle: Handle) -> &Node {
        self.pool.get(handle).expect("chain handle not live in pool")
    }

    fn node_mut(&mut self, handle: Handle) -> &mut Node {
        self.pool
            .get_mut(handle)
            .expect("chain handle not live in pool")
    }

    /// Skips `index` nodes from the head, returning the handles of the node
    /// before the target position and the node at it. Fails if the chain ends
    /// before `index` nodes were skipped.
    fn walk(&self, index: usize) -> Result<(Option<Handle>, Option<Handle>), ListError> {
        let mut prev: Option<Handle> = None;
        let mut current = self.head;
        for _ in 0..index {
            let handle = current.ok_or(ListError::OutOfBounds {
                index,
                size: self.size,
            })?;
            prev = Some(handle);
            current = self.node(handle).next;
        }
        Ok((prev, current))
    }

    /// Links `value` in just before the node currently at `index`, so index 0
    /// becomes the new head and `index == len()` appends. The new node is
    /// acquired before any link is touched, so a failed acquire leaves the
    /// chain exactly as it was.
    pub fn insert(&mut self, index: usize, value: u32) -> Result<(), ListError> {
        let (prev, current) = self.walk(index)?;

        let node = Node {
            value,
            next: current,
        };
        let handle = self.pool.acquire(node).ok_or(ListError::AllocFailed)?;

        match prev {
            None => self.head = Some(handle),
            Some(prev) => self.node_mut(prev).next = Some(handle),
        }
        self.size += 1;
        Ok(())
    }

    pub fn push_front(&mut self, value: u32) -> Result<(), ListError> {
        self.insert(0, value)
    }

    pub fn push_back(&mut self, value: u32) -> Result<(), ListError> {
        self.insert(self.size, value)
    }

    /// Unlinks exactly the node at `index`, releases its slot and returns its
    /// value. `index == len()` is out of bounds here: there is no node there.
    pub fn remove(&mut self, index: usize) -> Result<u32, ListError> {
        let (prev, current) = self.walk(index)?;
        let target = current.ok_or(ListError::OutOfBounds {
            index,
            size: self.size,
        })?;

        let next = self.node(target).next;
        match prev {
            None => self.head = next,
            Some(prev) => self.node_mut(prev).next = next,
        }
        let node = self
            .pool
            .release(target)
            .expect("chain handle not live in pool");
        self.size -= 1;
        Ok(node.value)
    }

    /// Zero-based position of the first node holding `value`.
    pub fn find(&self, value: u32) -> Option<usize> {
        self.iter().position(|&v| v == value)
    }

    /// Releases every node back to the pool, leaving the list empty. Dropping
    /// the list frees everything anyway; `clear` is for reusing the pool.
    pub fn clear(&mut self) {
        let mut current = self.head.take();
        while let Some(handle) = current {
            let node = self
                .pool
                .release(handle)
                .expect("chain handle not live in pool");
            current = node.next;
        }
        self.size = 0;
    }

    /// Cursor positioned on the node at `index`, or `None` when the list is
    /// empty or `index` is past the last node.
    pub fn cursor_at(&self, index: usize) -> Option<Cursor<'_, A>> {
        let (_, current) = self.walk(index).ok()?;
        let current = current?;
        Some(Cursor {
            list: self,
            current,
            index,
            value: self.node(current).value,
        })
    }

    pub fn iter(&self) -> Iter<'_, A> {
        Iter {
            list: self,
            next: self.head,
        }
    }

    pub fn into_iter(self) -> IntoIter<A> {
        IntoIter(self)
    }
}

/// External cursor over a list. Holds a shared borrow, so the list cannot be
/// mutated while the cursor is alive.
pub struct Cursor<'a, A: Pool<Node>> {
    list: &'a List<A>,
    current: Handle,
    index: usize,
    value: u32,
}

impl<'a, A: Pool<Node>> Cursor<'a, A> {
    /// Value cached when the cursor last moved.
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Steps to the successor node, refreshing the cached value and index.
    /// Returns false, with the cursor unchanged, when already at the tail.
    pub fn advance(&mut self) -> bool {
        match self.list.node(self.current).next {
            Some(next) => {
                self.current = next;
                self.index += 1;
                self.value = self.list.node(next).value;
                true
            }
            None => false,
        }
    }
}

pub struct Iter<'a, A: Pool<Node>> {
    list: &'a List<A>,
    next: Option<Handle>,
}

impl<'a, A: Pool<Node>> Iterator for Iter<'a, A> {
    type Item = &'a u32;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.next?;
        let node = self.list.node(handle);
        self.next = node.next;
        Some(&node.value)
    }
}

pub struct IntoIter<A: Pool<Node>>(List<A>);

impl<A: Pool<Node>> Iterator for IntoIter<A> {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.remove(0).ok()
    }
}
