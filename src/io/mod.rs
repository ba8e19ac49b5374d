//! # I/O Module
//!
//! File reading boundaries. Converts between disk formats and the in-memory
//! record representation handed to the sequence store.

pub mod fasta;

pub use fasta::{read_fasta, read_fasta_from, FastaRecord};
