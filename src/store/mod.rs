//! # Sequence Store
//!
//! ## Role
//! The dynamic DNA sequence store: one chunked buffer holding every
//! chromosome of the input, separated by sentinel cells, plus the strand
//! iterator model and the subscription registry that together give the graph
//! simplification layer a mutation-stable view of the sequence.
//!
//! ## Sub-modules
//! - `strand`: direction-tagged cursors with complementing dereference
//! - `registry`: the subscription multiset consulted during `replace`
//! - `replace`: the splice protocol with before/after notifications

pub mod registry;
mod replace;
pub mod strand;

pub use replace::Notify;

use tracing::debug;

use crate::config::StoreConfig;
use crate::data::cell::{normalize_base, CellId, DELETED_POS, SEPARATOR_BASE};
use crate::data::chunk_list::{ChunkList, Cursor};
use crate::error::{DynaseqError, Result};
use crate::io::fasta::FastaRecord;
use crate::store::registry::{IteratorRegistry, SubscriptionId};
use crate::store::strand::{Direction, StrandIterator};

/// One chromosomal region of the store
#[derive(Debug)]
struct Chromosome {
    /// FASTA description of the source record
    name: String,
    /// The separator cell terminating this chromosome; never edited
    separator: CellId,
}

/// The dynamic DNA sequence store
///
/// Chromosomes are concatenated in one [`ChunkList`], each terminated by a
/// separator cell (the final one included, for uniform iteration). All
/// mutation goes through [`DnaSequence::replace`]; iterators handed out are
/// plain handles that stay meaningful across edits outside their range, and
/// subscribed handles are relocated across edits that remove their cell.
#[derive(Debug)]
pub struct DnaSequence {
    seq: ChunkList,
    chromosomes: Vec<Chromosome>,
    registry: IteratorRegistry,
    config: StoreConfig,
}

impl DnaSequence {
    /// Construct from FASTA records, assigning original positions `0..len`
    /// within each record
    pub fn from_records(config: StoreConfig, records: &[FastaRecord]) -> Result<Self> {
        let original: Vec<Vec<u32>> = records
            .iter()
            .map(|r| (0..r.letters.len() as u32).collect())
            .collect();
        Self::from_records_with_positions(config, records, &original)
    }

    /// Construct from FASTA records with explicit per-chromosome original
    /// positions (used when the letters are a cleaned view of the raw input)
    pub fn from_records_with_positions(
        config: StoreConfig,
        records: &[FastaRecord],
        original: &[Vec<u32>],
    ) -> Result<Self> {
        config.validate()?;
        if records.len() != original.len() {
            return Err(DynaseqError::invalid_data(format!(
                "{} records but {} position vectors",
                records.len(),
                original.len()
            )));
        }
        let total: u64 = records.iter().map(|r| r.letters.len() as u64).sum();
        if total > config.max_input_bases {
            return Err(DynaseqError::InputTooLarge {
                total,
                limit: config.max_input_bases,
            });
        }

        let mut seq = ChunkList::new(config.chunk_capacity);
        let mut chromosomes = Vec::with_capacity(records.len());
        for (record, positions) in records.iter().zip(original) {
            if record.letters.len() != positions.len() {
                return Err(DynaseqError::invalid_data(format!(
                    "record '{}' has {} letters but {} positions",
                    record.name,
                    record.letters.len(),
                    positions.len()
                )));
            }
            for (&raw, &pos) in record.letters.iter().zip(positions) {
                seq.push_back(normalize_base(raw), pos);
            }
            let separator = seq.push_back(SEPARATOR_BASE, DELETED_POS);
            chromosomes.push(Chromosome {
                name: record.name.clone(),
                separator,
            });
        }
        debug!(
            chromosomes = chromosomes.len(),
            total_bases = total,
            chunk_capacity = config.chunk_capacity,
            "constructed sequence store"
        );
        Ok(Self {
            seq,
            chromosomes,
            registry: IteratorRegistry::new(),
            config,
        })
    }

    /// The configuration this store was built with
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Live bases across all chromosomal regions, excluding separators
    pub fn total_size(&self) -> usize {
        self.seq.live_len() - self.chromosomes.len()
    }

    /// Number of chromosomal regions
    pub fn chr_count(&self) -> usize {
        self.chromosomes.len()
    }

    /// FASTA description of a chromosome
    pub fn chr_name(&self, chr: usize) -> &str {
        &self.chromosomes[chr].name
    }

    /// Positive-strand iterator at the chromosome's 5' end
    pub fn positive_begin(&self, chr: usize) -> StrandIterator {
        let cursor = if chr == 0 {
            self.seq.begin()
        } else {
            self.seq
                .next(Cursor::At(self.chromosomes[chr - 1].separator))
        };
        StrandIterator::new(cursor, Direction::Positive)
    }

    /// Positive-strand end anchor: the chromosome's separator cell
    pub fn positive_end(&self, chr: usize) -> StrandIterator {
        StrandIterator::new(
            Cursor::At(self.chromosomes[chr].separator),
            Direction::Positive,
        )
    }

    /// Negative-strand iterator at the chromosome's 3' end
    pub fn negative_begin(&self, chr: usize) -> StrandIterator {
        let cursor = self.seq.prev(Cursor::At(self.chromosomes[chr].separator));
        StrandIterator::new(cursor, Direction::Negative)
    }

    /// Negative-strand end anchor: one before the chromosome's first cell
    pub fn negative_end(&self, chr: usize) -> StrandIterator {
        let cursor = if chr == 0 {
            Cursor::Front
        } else {
            Cursor::At(self.chromosomes[chr - 1].separator)
        };
        StrandIterator::new(cursor, Direction::Negative)
    }

    /// Strand begin for the given direction
    pub fn begin(&self, direction: Direction, chr: usize) -> StrandIterator {
        match direction {
            Direction::Positive => self.positive_begin(chr),
            Direction::Negative => self.negative_begin(chr),
        }
    }

    /// Strand end for the given direction
    pub fn end(&self, direction: Direction, chr: usize) -> StrandIterator {
        match direction {
            Direction::Positive => self.positive_end(chr),
            Direction::Negative => self.negative_end(chr),
        }
    }

    /// Process-lifetime-stable identity of the referenced cell
    pub fn global_index(&self, it: StrandIterator) -> Option<u64> {
        it.element_id(self)
    }

    /// Half-open original-position interval covered by `[it1, it2)`
    ///
    /// Both iterators must share a direction and bracket a range on one
    /// chromosome. Synthetic (inserted) cells inside the range are skipped
    /// when locating the interval endpoints; a range containing only
    /// synthetic cells maps to the empty interval `(0, 0)`.
    pub fn spell_original(
        &self,
        it1: StrandIterator,
        it2: StrandIterator,
    ) -> Result<(usize, usize)> {
        if it1.direction() != it2.direction() {
            return Err(DynaseqError::invalid_data(
                "spell_original requires same-direction iterators",
            ));
        }
        let mut first_real: Option<u32> = None;
        let mut last_real: Option<u32> = None;
        let mut cur = it1;
        while cur != it2 {
            if !cur.at_valid_position(self) {
                return Err(DynaseqError::invalid_data(
                    "spell_original range leaves the chromosome",
                ));
            }
            let pos = cur.original_position(self);
            if pos != DELETED_POS {
                if first_real.is_none() {
                    first_real = Some(pos);
                }
                last_real = Some(pos);
            }
            cur = cur.next(self);
        }
        Ok(match (first_real, last_real, it1.direction()) {
            (Some(f), Some(l), Direction::Positive) => (f as usize, l as usize + 1),
            (Some(f), Some(l), Direction::Negative) => (l as usize, f as usize + 1),
            _ => (0, 0),
        })
    }

    /// True iff `k` consecutive positions starting at `it` are all valid
    /// (live, non-separator); does not mutate `it`
    pub fn proper_kmer(&self, it: StrandIterator, k: usize) -> bool {
        let mut cur = it;
        for _ in 0..k {
            if !cur.at_valid_position(self) {
                return false;
            }
            cur = cur.next(self);
        }
        true
    }

    /// Letters readable from `it` while it stays at valid positions
    pub fn letters(&self, it: StrandIterator) -> Letters<'_> {
        Letters { seq: self, it }
    }

    /// Register a cursor handle for relocation across `replace` calls
    pub fn subscribe(&mut self, it: StrandIterator) -> SubscriptionId {
        self.registry.subscribe(it)
    }

    /// Drop one subscription, returning its current position
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> Option<StrandIterator> {
        self.registry.unsubscribe(id)
    }

    /// The current (possibly relocated) position of a subscription
    pub fn subscribed(&self, id: SubscriptionId) -> Option<StrandIterator> {
        self.registry.current(id)
    }

    /// Subscriptions whose current cell lies in `[begin, end)` of the buffer
    pub fn subscribers_in_range(
        &self,
        begin: StrandIterator,
        end: StrandIterator,
    ) -> Vec<SubscriptionId> {
        self.registry.in_range(&self.seq, begin.base(), end.base())
    }

    #[inline]
    pub(crate) fn buffer(&self) -> &ChunkList {
        &self.seq
    }
}

/// Iterator over the letters readable from a strand iterator
pub struct Letters<'a> {
    seq: &'a DnaSequence,
    it: StrandIterator,
}

impl Iterator for Letters<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let letter = self.it.spell(self.seq)?;
        self.it = self.it.next(self.seq);
        Some(letter)
    }
}
