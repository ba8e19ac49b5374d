//! # The Replace Protocol
//!
//! The store's single mutation path. Execution is strictly sequenced:
//! validate, snapshot subscribers inside the source range, fire `before`,
//! splice (insert target cells, tombstone source cells), relocate the
//! snapshotted subscribers, fire `after`. Validation precedes every mutation,
//! so a rejected call leaves the store untouched.
//!
//! Callbacks receive a shared borrow of the store; `replace` itself holds the
//! unique borrow for the whole call, so a callback can read freely but can
//! never re-enter `replace`.

use tracing::trace;

use crate::data::cell::{complement, normalize_base, CellId, DELETED_POS, SEPARATOR_BASE};
use crate::data::chunk_list::Cursor;
use crate::error::{DynaseqError, Result};
use crate::store::strand::{Direction, StrandIterator};
use crate::store::DnaSequence;

/// Notification hook fired around a splice with iterators spanning the
/// removed (`before`) or inserted (`after`) range
pub type Notify<'a> = &'a mut dyn FnMut(&DnaSequence, StrandIterator, StrandIterator);

impl DnaSequence {
    /// Splice `target_len` cells starting at `target` over the `source_len`
    /// cells starting at `source`
    ///
    /// Both ranges walk in their own iterator's direction; the new content
    /// reads in the source direction exactly as the target range spelled.
    /// `target` must reference this store; content from another store goes
    /// through [`DnaSequence::replace_with`].
    ///
    /// Inserted cells carry the deleted-position sentinel. Subscribed
    /// iterators inside the removed range are relocated to the first inserted
    /// cell, or to the first still-live cell after the removed range when
    /// nothing is inserted.
    pub fn replace(
        &mut self,
        source: StrandIterator,
        source_len: usize,
        target: StrandIterator,
        target_len: usize,
        before: Option<Notify<'_>>,
        after: Option<Notify<'_>>,
    ) -> Result<()> {
        let mut letters = Vec::with_capacity(target_len);
        let mut cur = target;
        for _ in 0..target_len {
            let letter = cur.spell(self).ok_or_else(|| {
                DynaseqError::rejected_edit("target range is not a valid strand range")
            })?;
            letters.push(letter);
            cur = cur.next(self);
        }
        self.replace_with(source, source_len, &letters, before, after)
    }

    /// Splice raw target letters over the `source_len` cells at `source`
    ///
    /// `letters` are read in the source iterator's direction; bases outside
    /// the alphabet are coerced to the unknown sentinel, and separator
    /// sentinels are rejected.
    pub fn replace_with(
        &mut self,
        source: StrandIterator,
        source_len: usize,
        letters: &[u8],
        mut before: Option<Notify<'_>>,
        mut after: Option<Notify<'_>>,
    ) -> Result<()> {
        if letters.contains(&SEPARATOR_BASE) {
            return Err(DynaseqError::rejected_edit(
                "inserted content may not contain the separator sentinel",
            ));
        }
        match source.base() {
            Cursor::At(id) if self.buffer().is_live(id) => {}
            _ => {
                return Err(DynaseqError::rejected_edit(
                    "source iterator is outside the chromosomal regions",
                ))
            }
        }

        // 0. Validate the source range and collect it in walk order.
        let (source_ids, source_end) = self.collect_source(source, source_len)?;

        // Positive-order view of the edit.
        let (first_cell, last_cell) = match source.direction() {
            Direction::Positive => (source_ids.first(), source_ids.last()),
            Direction::Negative => (source_ids.last(), source_ids.first()),
        };
        let stored: Vec<u8> = match source.direction() {
            Direction::Positive => letters.iter().map(|&b| normalize_base(b)).collect(),
            Direction::Negative => letters
                .iter()
                .rev()
                .map(|&b| complement(normalize_base(b)))
                .collect(),
        };
        let anchor = match first_cell {
            Some(&id) => Cursor::At(id),
            // Pure insert: before the cursor in its own direction.
            None => match source.direction() {
                Direction::Positive => source.base(),
                Direction::Negative => self.buffer().next(source.base()),
            },
        };
        // Continuation points on either side, taken while everything is live.
        let after_range = match last_cell {
            Some(&id) => self.buffer().next(Cursor::At(id)),
            None => anchor,
        };
        let before_range = self.buffer().prev(anchor);

        // 1. Snapshot subscribers inside the source range.
        let subscribers = self.registry.in_cells(&source_ids);

        // 2. Notify before, spanning the range to be removed.
        if let Some(cb) = before.as_mut() {
            cb(self, source, source_end);
        }

        // 3. Splice: insert the new cells, then tombstone the old ones.
        let mut inserted = Vec::with_capacity(stored.len());
        for &base in &stored {
            inserted.push(self.seq.insert_before(anchor, base, DELETED_POS));
        }
        for &id in &source_ids {
            self.seq.erase(id);
        }

        // 4. Relocate the snapshotted subscribers.
        let relocation = match inserted.first() {
            Some(&id) => Cursor::At(id),
            None => after_range,
        };
        for sub in &subscribers {
            self.registry.relocate(*sub, relocation);
        }

        // 5. Notify after, spanning the inserted range.
        if let Some(cb) = after.as_mut() {
            let (begin, end) = self.inserted_span(source.direction(), &inserted, after_range, before_range);
            cb(self, begin, end);
        }

        trace!(
            direction = ?source.direction(),
            removed = source_len,
            inserted = stored.len(),
            relocated = subscribers.len(),
            "replace"
        );
        Ok(())
    }

    /// Walk and validate the source range, returning its cell ids in walk
    /// order plus the iterator one past the range
    fn collect_source(
        &self,
        source: StrandIterator,
        source_len: usize,
    ) -> Result<(Vec<CellId>, StrandIterator)> {
        let mut ids = Vec::with_capacity(source_len);
        let mut cur = source;
        for _ in 0..source_len {
            let id = match cur.base() {
                Cursor::At(id) => id,
                _ => {
                    return Err(DynaseqError::rejected_edit(
                        "source range leaves the sequence",
                    ))
                }
            };
            let cell = self
                .buffer()
                .cell(id)
                .filter(|c| !c.is_tombstone())
                .ok_or_else(|| DynaseqError::rejected_edit("source range references a dead cell"))?;
            if cell.is_separator() {
                return Err(DynaseqError::rejected_edit(
                    "source range crosses a chromosome separator",
                ));
            }
            ids.push(id);
            cur = cur.next(self);
        }
        Ok((ids, cur))
    }

    /// Iterators spanning the inserted range in the source direction; both
    /// collapse onto the continuation point when nothing was inserted
    fn inserted_span(
        &self,
        direction: Direction,
        inserted: &[CellId],
        after_range: Cursor,
        before_range: Cursor,
    ) -> (StrandIterator, StrandIterator) {
        match direction {
            Direction::Positive => {
                let begin = inserted.first().map_or(after_range, |&id| Cursor::At(id));
                let end = inserted
                    .last()
                    .map_or(after_range, |&id| self.buffer().next(Cursor::At(id)));
                (
                    StrandIterator::new(begin, Direction::Positive),
                    StrandIterator::new(end, Direction::Positive),
                )
            }
            Direction::Negative => {
                let begin = inserted.last().map_or(before_range, |&id| Cursor::At(id));
                let end = inserted
                    .first()
                    .map_or(before_range, |&id| self.buffer().prev(Cursor::At(id)));
                (
                    StrandIterator::new(begin, Direction::Negative),
                    StrandIterator::new(end, Direction::Negative),
                )
            }
        }
    }
}
