//! # Store Configuration
//!
//! Construction-time tuning knobs for the sequence store, validated up front.

use serde::{Deserialize, Serialize};

use crate::error::{DynaseqError, Result};

/// Default chunk capacity of the chunked buffer
pub const DEFAULT_CHUNK_CAPACITY: usize = 1000;

/// Default input size cap (1 GiB of bases)
pub const DEFAULT_MAX_INPUT_BASES: u64 = 1 << 30;

/// Sequence store configuration
///
/// Chunk capacity trades linked-list overhead against per-split cost: larger
/// chunks amortize relink work, smaller chunks make splits cheaper.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Number of cell slots per chunk
    pub chunk_capacity: usize,

    /// Maximum total number of input bases accepted at construction
    pub max_input_bases: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            max_input_bases: DEFAULT_MAX_INPUT_BASES,
        }
    }
}

impl StoreConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk capacity
    pub fn with_chunk_capacity(mut self, chunk_capacity: usize) -> Self {
        self.chunk_capacity = chunk_capacity;
        self
    }

    /// Set the input size cap
    pub fn with_max_input_bases(mut self, max_input_bases: u64) -> Self {
        self.max_input_bases = max_input_bases;
        self
    }

    /// Validate the configuration
    ///
    /// Slot indices are stored as `u16`, so the chunk capacity is bounded
    /// above by `u16::MAX`; a capacity below 2 would make splits degenerate.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_capacity < 2 || self.chunk_capacity > u16::MAX as usize {
            return Err(DynaseqError::config(format!(
                "chunk capacity must be in 2..={}, got {}",
                u16::MAX,
                self.chunk_capacity
            )));
        }
        if self.max_input_bases == 0 {
            return Err(DynaseqError::config("input size cap must be nonzero"));
        }
        Ok(())
    }
}
