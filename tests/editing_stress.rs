//! Scripted edit sequences checked against a plain vector mirror, run across
//! chunk capacities so splits, tombstone reuse and chunk reclamation all get
//! exercised.

use dynaseq::{complement, DnaSequence, FastaRecord, StoreConfig, StrandIterator};

fn build(letters: &[u8], chunk_capacity: usize) -> DnaSequence {
    let records = [FastaRecord::new("chr0", letters.to_vec())];
    let config = StoreConfig::new().with_chunk_capacity(chunk_capacity);
    DnaSequence::from_records(config, &records).unwrap()
}

fn spelled(seq: &DnaSequence) -> Vec<u8> {
    seq.letters(seq.positive_begin(0)).collect()
}

fn positive_at(seq: &DnaSequence, index: usize) -> StrandIterator {
    seq.positive_begin(0).advanced(seq, index)
}

/// Apply a positive-direction edit to both the store and the mirror
fn edit(seq: &mut DnaSequence, mirror: &mut Vec<u8>, at: usize, del: usize, ins: &[u8]) {
    let source = positive_at(seq, at);
    seq.replace_with(source, del, ins, None, None).unwrap();
    mirror.splice(at..at + del, ins.iter().copied());
    assert_eq!(spelled(seq), *mirror, "divergence after edit at {}", at);
}

/// Apply a negative-direction edit; `at` is the positive index of the source
/// cell, the range runs `del` cells toward the 5' end
fn edit_negative(seq: &mut DnaSequence, mirror: &mut Vec<u8>, at: usize, del: usize, ins: &[u8]) {
    let source = positive_at(seq, at).invert();
    seq.replace_with(source, del, ins, None, None).unwrap();
    let stored: Vec<u8> = ins.iter().rev().map(|&b| complement(b)).collect();
    mirror.splice(at + 1 - del..at + 1, stored);
    assert_eq!(spelled(seq), *mirror, "divergence after negative edit at {}", at);
}

fn run_script(chunk_capacity: usize) -> Vec<u8> {
    let input = b"ACGTACGTACGTACGTACGTACGTACGTACGTACGTACGT";
    let mut seq = build(input, chunk_capacity);
    let mut mirror = input.to_vec();

    // point edits, bulk inserts, bulk deletes, edits at both boundaries
    edit(&mut seq, &mut mirror, 0, 1, b"T");
    edit(&mut seq, &mut mirror, 10, 4, b"");
    edit(&mut seq, &mut mirror, 5, 0, b"GGGGGGGGGG");
    edit(&mut seq, &mut mirror, 20, 10, b"AC");
    edit(&mut seq, &mut mirror, 0, 0, b"NN");
    edit(&mut seq, &mut mirror, 2, 6, b"TTTTTTTTTTTT");
    let len = mirror.len();
    edit(&mut seq, &mut mirror, len - 1, 1, b"");
    let len = mirror.len();
    edit(&mut seq, &mut mirror, len - 4, 4, b"ACGT");
    edit_negative(&mut seq, &mut mirror, 8, 3, b"AAA");
    edit_negative(&mut seq, &mut mirror, 15, 1, b"CG");
    edit(&mut seq, &mut mirror, 12, 0, b"A");
    edit(&mut seq, &mut mirror, 3, 9, b"G");
    // shrink to almost nothing and grow back
    let len = mirror.len();
    edit(&mut seq, &mut mirror, 1, len - 2, b"");
    edit(&mut seq, &mut mirror, 1, 0, b"ACGTACGTACGTACGTACGT");

    assert_eq!(seq.total_size(), mirror.len());
    spelled(&seq)
}

#[test]
fn scripted_edits_match_mirror_small_chunks() {
    run_script(4);
}

#[test]
fn scripted_edits_match_mirror_medium_chunks() {
    run_script(16);
}

#[test]
fn scripted_edits_match_mirror_default_chunks() {
    run_script(1000);
}

#[test]
fn final_state_agrees_across_capacities() {
    let small = run_script(4);
    let medium = run_script(16);
    let default = run_script(1000);
    assert_eq!(small, medium);
    assert_eq!(medium, default);
}

#[test]
fn neighboring_chromosomes_untouched_under_churn() {
    let records = [
        FastaRecord::new("left", b"AAAA".to_vec()),
        FastaRecord::new("mid", b"CCCCCCCC".to_vec()),
        FastaRecord::new("right", b"GGGG".to_vec()),
    ];
    let config = StoreConfig::new().with_chunk_capacity(4);
    let mut seq = DnaSequence::from_records(config, &records).unwrap();

    for round in 0..8 {
        let source = seq.positive_begin(1);
        let del = if round % 2 == 0 { 2 } else { 0 };
        seq.replace_with(source, del, b"TA", None, None).unwrap();
    }

    let left: Vec<u8> = seq.letters(seq.positive_begin(0)).collect();
    let right: Vec<u8> = seq.letters(seq.positive_begin(2)).collect();
    assert_eq!(left, b"AAAA".to_vec());
    assert_eq!(right, b"GGGG".to_vec());
    assert_eq!(seq.chr_count(), 3);

    let reverse_left: Vec<u8> = seq.letters(seq.negative_begin(0)).collect();
    assert_eq!(reverse_left, b"TTTT".to_vec());
}

#[test]
fn empty_chromosome_grows_back() {
    let records = [
        FastaRecord::new("a", b"ACGT".to_vec()),
        FastaRecord::new("b", b"TT".to_vec()),
    ];
    let config = StoreConfig::new().with_chunk_capacity(4);
    let mut seq = DnaSequence::from_records(config, &records).unwrap();

    // delete all of chromosome 0, then repopulate through its end anchor
    let begin = seq.positive_begin(0);
    seq.replace_with(begin, 4, b"", None, None).unwrap();
    assert_eq!(seq.positive_begin(0), seq.positive_end(0));
    assert_eq!(seq.total_size(), 2);

    let anchor = seq.positive_end(0);
    seq.replace_with(anchor, 0, b"GATC", None, None).unwrap();
    let restored: Vec<u8> = seq.letters(seq.positive_begin(0)).collect();
    assert_eq!(restored, b"GATC".to_vec());
    let other: Vec<u8> = seq.letters(seq.positive_begin(1)).collect();
    assert_eq!(other, b"TT".to_vec());
}
