//! # Iterator Subscription Registry
//!
//! A multiset of cursor handles keyed by the identity of the cell each handle
//! currently references. `replace` consults it to move every subscribed
//! iterator inside a spliced-out range to a well-defined position; outside
//! `replace`, subscriptions are inert bookkeeping.
//!
//! Keying by cell identity instead of logical position makes relocation
//! O(|subscribers in range|) regardless of chromosome length.

use std::collections::HashMap;

use crate::data::cell::CellId;
use crate::data::chunk_list::{ChunkList, Cursor};
use crate::store::strand::StrandIterator;

/// Zero-cost newtype naming one subscription
///
/// Duplicate subscriptions of the same iterator get distinct ids and are
/// relocated independently.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// The subscription multiset
#[derive(Debug, Default)]
pub struct IteratorRegistry {
    /// Current position of every subscription
    entries: HashMap<SubscriptionId, StrandIterator>,
    /// Subscriptions grouped by the cell they currently reference
    by_cell: HashMap<CellId, Vec<SubscriptionId>>,
    next_id: u64,
}

impl IteratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a cursor handle; returns its subscription id
    pub fn subscribe(&mut self, it: StrandIterator) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, it);
        if let Cursor::At(cell) = it.base() {
            self.by_cell.entry(cell).or_default().push(id);
        }
        id
    }

    /// Remove one subscription, returning its current position
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> Option<StrandIterator> {
        let it = self.entries.remove(&id)?;
        if let Cursor::At(cell) = it.base() {
            self.detach(cell, id);
        }
        Some(it)
    }

    /// The subscription's current (possibly relocated) position
    pub fn current(&self, id: SubscriptionId) -> Option<StrandIterator> {
        self.entries.get(&id).copied()
    }

    /// Number of live subscriptions
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All subscriptions whose current cell lies in `[begin, end)`
    pub fn in_range(&self, buffer: &ChunkList, begin: Cursor, end: Cursor) -> Vec<SubscriptionId> {
        let mut cells = Vec::new();
        let mut cur = match begin {
            Cursor::Front => buffer.next(Cursor::Front),
            other => other,
        };
        while cur != end {
            match cur {
                Cursor::At(id) => cells.push(id),
                _ => break,
            }
            cur = buffer.next(cur);
        }
        self.in_cells(&cells)
    }

    /// All subscriptions currently keyed at one of the given cells
    pub(crate) fn in_cells(&self, cells: &[CellId]) -> Vec<SubscriptionId> {
        let mut out = Vec::new();
        for cell in cells {
            if let Some(subs) = self.by_cell.get(cell) {
                out.extend_from_slice(subs);
            }
        }
        out
    }

    /// Move one subscription to a new cursor, preserving its direction
    pub(crate) fn relocate(&mut self, id: SubscriptionId, to: Cursor) {
        let Some(it) = self.entries.get(&id).copied() else {
            return;
        };
        if let Cursor::At(cell) = it.base() {
            self.detach(cell, id);
        }
        let moved = it.with_cursor(to);
        self.entries.insert(id, moved);
        if let Cursor::At(cell) = to {
            self.by_cell.entry(cell).or_default().push(id);
        }
    }

    fn detach(&mut self, cell: CellId, id: SubscriptionId) {
        if let Some(subs) = self.by_cell.get_mut(&cell) {
            if let Some(i) = subs.iter().position(|s| *s == id) {
                subs.swap_remove(i);
            }
            if subs.is_empty() {
                self.by_cell.remove(&cell);
            }
        }
    }
}
