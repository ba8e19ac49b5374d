//! # Data Module
//!
//! ## Role
//! The physical storage layer underneath the sequence store.
//!
//! ## Design Philosophy
//! - **Arena + identity:** chunks and cells live in arenas whose indices are
//!   never reused, so a `CellId` is a process-lifetime-stable handle that
//!   survives chunk splits and compaction.
//! - **Tombstoning over removal:** deletion marks a slot dead in place;
//!   storage is reclaimed lazily when a whole chunk empties. Other cells keep
//!   their identity throughout.
//! - **Zero-cost newtypes:** `CellId` and `ChunkId` keep the two index spaces
//!   apart at compile time.
//!
//! ## Sub-modules
//! - `cell`: the character cell, alphabet sentinels, complement map
//! - `chunk_list`: the chunked bidirectional buffer and its cursors

pub mod cell;
pub mod chunk_list;

pub use cell::{complement, normalize_base, Cell, CellId};
pub use cell::{ALPHABET, DELETED_POS, SEPARATOR_BASE, UNKNOWN_BASE};
pub use chunk_list::{ChunkId, ChunkList, Cursor, LiveCells};
