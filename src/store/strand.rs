//! # Strand Iterators
//!
//! A direction-tagged cursor presenting a uniform bidirectional interface
//! over the sequence store. Positive iterators read bases as stored and walk
//! the buffer forward; negative iterators read Watson-Crick complements and
//! walk backward, so either strand of a chromosome reads 5' to 3'.
//!
//! Iterators are plain `Copy` handles; every observation goes through the
//! owning [`DnaSequence`]. Equality compares cursor and direction, so the two
//! orientations of one cell are distinct iterators.

use crate::data::cell::{complement, DELETED_POS};
use crate::data::chunk_list::Cursor;
use crate::store::DnaSequence;

/// Strand orientation of an iterator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// 5' to 3' on the stored strand
    Positive,
    /// 5' to 3' on the complementary strand
    Negative,
}

impl Direction {
    /// The opposite orientation
    #[inline]
    pub fn opposite(self) -> Self {
        match self {
            Direction::Positive => Direction::Negative,
            Direction::Negative => Direction::Positive,
        }
    }
}

/// A direction-tagged cursor into a [`DnaSequence`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StrandIterator {
    cursor: Cursor,
    direction: Direction,
}

impl StrandIterator {
    pub(crate) fn new(cursor: Cursor, direction: Direction) -> Self {
        Self { cursor, direction }
    }

    pub(crate) fn with_cursor(self, cursor: Cursor) -> Self {
        Self { cursor, ..self }
    }

    /// The underlying buffer cursor
    #[inline]
    pub fn base(self) -> Cursor {
        self.cursor
    }

    #[inline]
    pub fn direction(self) -> Direction {
        self.direction
    }

    /// The iterator of the opposite direction at the same cell
    ///
    /// Dereferencing the result yields the complement of this iterator's
    /// letter. Inverting twice returns the original iterator.
    #[inline]
    pub fn invert(self) -> Self {
        Self {
            cursor: self.cursor,
            direction: self.direction.opposite(),
        }
    }

    /// Advance one step forward in this iterator's own direction
    pub fn next(self, seq: &DnaSequence) -> Self {
        let cursor = match self.direction {
            Direction::Positive => seq.buffer().next(self.cursor),
            Direction::Negative => seq.buffer().prev(self.cursor),
        };
        Self { cursor, ..self }
    }

    /// Step one back in this iterator's own direction
    pub fn prev(self, seq: &DnaSequence) -> Self {
        let cursor = match self.direction {
            Direction::Positive => seq.buffer().prev(self.cursor),
            Direction::Negative => seq.buffer().next(self.cursor),
        };
        Self { cursor, ..self }
    }

    /// Advance `n` steps forward
    pub fn advanced(self, seq: &DnaSequence, n: usize) -> Self {
        let mut cur = self;
        for _ in 0..n {
            cur = cur.next(seq);
        }
        cur
    }

    /// The letter at the current position, complemented for negative
    /// direction; `None` off the ends, at separators and on dead cells
    pub fn spell(self, seq: &DnaSequence) -> Option<u8> {
        let id = match self.cursor {
            Cursor::At(id) => id,
            _ => return None,
        };
        let cell = seq.buffer().cell(id)?;
        if cell.is_tombstone() || cell.is_separator() {
            return None;
        }
        Some(match self.direction {
            Direction::Positive => cell.base,
            Direction::Negative => complement(cell.base),
        })
    }

    /// True iff the iterator references a live, non-separator cell
    #[inline]
    pub fn at_valid_position(self, seq: &DnaSequence) -> bool {
        self.spell(seq).is_some()
    }

    /// Stable identity of the referenced cell, `None` off the live sequence
    pub fn element_id(self, seq: &DnaSequence) -> Option<u64> {
        match self.cursor {
            Cursor::At(id) if seq.buffer().is_live(id) => Some(id.as_u64()),
            _ => None,
        }
    }

    /// The referenced cell's original input position, or [`DELETED_POS`] for
    /// synthetic cells and sentinel positions
    pub fn original_position(self, seq: &DnaSequence) -> u32 {
        match self.cursor {
            Cursor::At(id) => seq.buffer().cell(id).map_or(DELETED_POS, |c| c.pos),
            _ => DELETED_POS,
        }
    }

    /// Strand-order comparison; only meaningful between same-direction
    /// iterators on one chromosome
    pub fn comes_before(self, other: StrandIterator, seq: &DnaSequence) -> bool {
        debug_assert_eq!(self.direction, other.direction);
        let order = seq.buffer().cursor_order(self.cursor, other.cursor);
        match self.direction {
            Direction::Positive => order == std::cmp::Ordering::Less,
            Direction::Negative => order == std::cmp::Ordering::Greater,
        }
    }
}
