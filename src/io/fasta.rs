//! # FASTA Reading
//!
//! Parse nucleotide FASTA files into records for store construction. Files
//! ending in `.gz` are decompressed transparently. Letters are kept raw here;
//! alphabet coercion happens when the store is built.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{DynaseqError, Result};

/// One FASTA record: header name plus raw sequence letters
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FastaRecord {
    /// First whitespace-delimited token of the `>` header
    pub name: String,
    /// Sequence letters as they appeared in the input
    pub letters: Vec<u8>,
}

impl FastaRecord {
    pub fn new(name: impl Into<String>, letters: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            letters,
        }
    }

    /// Number of letters in the record
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

/// Read all records from a FASTA file, decompressing `.gz` inputs
pub fn read_fasta(path: impl AsRef<Path>) -> Result<Vec<FastaRecord>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = if path.extension().is_some_and(|e| e == "gz") {
        read_fasta_from(BufReader::new(MultiGzDecoder::new(BufReader::new(file))))?
    } else {
        read_fasta_from(BufReader::new(file))?
    };
    let total: usize = records.iter().map(FastaRecord::len).sum();
    info!(
        path = %path.display(),
        records = records.len(),
        bases = total,
        "loaded FASTA input"
    );
    Ok(records)
}

/// Read all records from any buffered reader
pub fn read_fasta_from<R: BufRead>(reader: R) -> Result<Vec<FastaRecord>> {
    let mut records: Vec<FastaRecord> = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(header) = line.strip_prefix('>') {
            let name = header.split_whitespace().next().unwrap_or("");
            if name.is_empty() {
                return Err(DynaseqError::parse(index + 1, "empty FASTA header"));
            }
            records.push(FastaRecord::new(name, Vec::new()));
        } else {
            let record = records.last_mut().ok_or_else(|| {
                DynaseqError::parse(index + 1, "sequence data before the first FASTA header")
            })?;
            record
                .letters
                .extend(line.bytes().filter(|b| !b.is_ascii_whitespace()));
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parses_multiple_records() {
        let input = b">chrA extra description\nACGT\nacgt\n\n>chrB\nTT GG\n";
        let records = read_fasta_from(Cursor::new(&input[..])).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "chrA");
        assert_eq!(records[0].letters, b"ACGTacgt".to_vec());
        assert_eq!(records[1].name, "chrB");
        assert_eq!(records[1].letters, b"TTGG".to_vec());
    }

    #[test]
    fn test_rejects_headerless_sequence() {
        let err = read_fasta_from(Cursor::new(&b"ACGT\n"[..])).unwrap_err();
        assert!(matches!(err, DynaseqError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_rejects_empty_header() {
        let err = read_fasta_from(Cursor::new(&b">\nACGT\n"[..])).unwrap_err();
        assert!(matches!(err, DynaseqError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_empty_record_is_kept() {
        let records = read_fasta_from(Cursor::new(&b">empty\n>full\nAC\n"[..])).unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].is_empty());
        assert_eq!(records[1].letters, b"AC".to_vec());
    }

    #[test]
    fn test_reads_plain_file() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::with_suffix(".fa").unwrap();
        file.write_all(b">c1\nACGT\n>c2\nGG\n").unwrap();
        let records = read_fasta(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].letters, b"ACGT".to_vec());
    }

    #[test]
    fn test_reads_gzipped_file() {
        use flate2::write::GzEncoder;
        use flate2::Compression;
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::with_suffix(".fa.gz").unwrap();
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(b">c1\nACGT\n").unwrap();
        file.write_all(&encoder.finish().unwrap()).unwrap();
        file.flush().unwrap();

        let records = read_fasta(file.path()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].letters, b"ACGT".to_vec());
    }
}
