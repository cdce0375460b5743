use consensus_rs::alignment::{AlignmentRecord, ExonStructure, Interval, Tier};
use consensus_rs::bins::TranscriptBin;
use consensus_rs::candidates::CandidateSet;
use consensus_rs::g2t::{GeneTranscriptMap, TranscriptInfo};
use consensus_rs::select::TranscriptSelector;
use consensus_rs::ConsensusConfig;

fn reference() -> GeneTranscriptMap {
    let mut map = GeneTranscriptMap::new();
    map.insert(TranscriptInfo {
        id: "ENST01".into(),
        gene_id: "ENSG01".into(),
        biotype: "protein_coding".into(),
        chrom: "chr1".into(),
        reference_span: Some(1000),
    });
    map
}

fn record(id: &str, coverage: f64, identity: f64, tier: Tier, start: u32) -> AlignmentRecord {
    let exons = ExonStructure::new(vec![Interval::new("chr1", '+', start, start + 900)]);
    AlignmentRecord::new(id, coverage, identity, tier, exons)
}

fn candidates(records: Vec<AlignmentRecord>) -> CandidateSet {
    CandidateSet::from_records(records, &reference()).expect("valid candidates")
}

fn bin(excellent: &[&str], pass: &[&str], fail: &[&str], supplementary: &[&str]) -> TranscriptBin {
    let ids = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    let mut bin = TranscriptBin::new("ENST01", "ENSG01");
    bin.excellent = ids(excellent);
    bin.pass = ids(pass);
    bin.fail = ids(fail);
    bin.supplementary = ids(supplementary);
    bin.candidates = ids(&[excellent, pass, fail, supplementary].concat());
    bin
}

/// Exact identity ties across origins go to the Alternate candidate.
#[test]
fn tie_favours_alternate_and_sets_flag() {
    let set = candidates(vec![
        record("ENST01-1", 99.0, 98.0, Tier::Excellent, 100),
        record("augTM-ENST01-1", 99.0, 98.0, Tier::Excellent, 200),
    ]);
    let config = ConsensusConfig::default();
    let entry = TranscriptSelector::new(&config, &set)
        .select(&bin(&["ENST01-1"], &[], &[], &["augTM-ENST01-1"]));

    assert_eq!(entry.chosen.as_deref(), Some("augTM-ENST01-1"));
    assert_eq!(entry.tier, Tier::Excellent);
    assert!(entry.tie);
}

#[test]
fn tie_within_one_origin_is_not_flagged() {
    let set = candidates(vec![
        record("ENST01-1", 99.0, 98.0, Tier::Pass, 100),
        record("ENST01-2", 95.0, 98.0, Tier::Pass, 200),
    ]);
    let config = ConsensusConfig::default();
    let entry = TranscriptSelector::new(&config, &set)
        .select(&bin(&[], &["ENST01-1", "ENST01-2"], &[], &[]));

    assert_eq!(entry.chosen.as_deref(), Some("ENST01-2"));
    assert!(!entry.tie);
}

#[test]
fn identity_differences_below_rounding_are_ties() {
    let set = candidates(vec![
        record("ENST01-1", 99.0, 98.000_000_1, Tier::Excellent, 100),
        record("ENST01-2", 99.0, 98.0, Tier::Excellent, 200),
    ]);
    let config = ConsensusConfig::default();
    let entry = TranscriptSelector::new(&config, &set)
        .select(&bin(&["ENST01-1", "ENST01-2"], &[], &[], &[]));

    // Rounded identities are equal, so the greater id wins.
    assert_eq!(entry.chosen.as_deref(), Some("ENST01-2"));
}

#[test]
fn empty_pool_is_no_data() {
    let set = candidates(vec![]);
    let config = ConsensusConfig::default();
    let entry = TranscriptSelector::new(&config, &set).select(&bin(&[], &[], &[], &[]));

    assert_eq!(entry.tier, Tier::NoData);
    assert_eq!(entry.chosen, None);
    assert!(!entry.tie);
    assert!(!entry.is_included());
}

#[test]
fn supplementary_alone_does_not_establish_a_tier() {
    let set = candidates(vec![record("augTM-ENST01-1", 99.0, 99.0, Tier::Excellent, 100)]);
    let config = ConsensusConfig::default();
    let entry = TranscriptSelector::new(&config, &set)
        .select(&bin(&[], &[], &[], &["augTM-ENST01-1"]));

    assert_eq!(entry.tier, Tier::NoData);
    assert_eq!(entry.chosen, None);
}

#[test]
fn nothing_above_coverage_cutoff_keeps_tier() {
    let set = candidates(vec![
        record("ENST01-1", 70.0, 99.0, Tier::Pass, 100),
        record("ENST01-2", 79.9, 99.0, Tier::Pass, 200),
    ]);
    let config = ConsensusConfig::default();
    let entry = TranscriptSelector::new(&config, &set)
        .select(&bin(&[], &["ENST01-1", "ENST01-2"], &[], &[]));

    assert_eq!(entry.tier, Tier::Pass);
    assert_eq!(entry.chosen, None);
    assert!(!entry.is_included());
}

#[test]
fn only_highest_tier_competes() {
    let set = candidates(vec![
        record("ENST01-1", 85.0, 90.0, Tier::Excellent, 100),
        record("ENST01-2", 99.0, 99.9, Tier::Pass, 200),
    ]);
    let config = ConsensusConfig::default();
    let entry = TranscriptSelector::new(&config, &set)
        .select(&bin(&["ENST01-1"], &["ENST01-2"], &[], &[]));

    assert_eq!(entry.tier, Tier::Excellent);
    assert_eq!(entry.chosen.as_deref(), Some("ENST01-1"));
}

#[test]
fn supplementary_candidate_can_win_on_identity() {
    let set = candidates(vec![
        record("ENST01-1", 95.0, 97.0, Tier::Pass, 100),
        record("augTM-ENST01-1", 95.0, 99.5, Tier::Excellent, 200),
    ]);
    let config = ConsensusConfig::default();
    let entry = TranscriptSelector::new(&config, &set)
        .select(&bin(&[], &["ENST01-1"], &[], &["augTM-ENST01-1"]));

    assert_eq!(entry.tier, Tier::Pass);
    assert_eq!(entry.chosen.as_deref(), Some("augTM-ENST01-1"));
    assert!(!entry.tie);
}

#[test]
fn selection_is_deterministic() {
    let set = candidates(vec![
        record("ENST01-1", 90.0, 97.0, Tier::Fail, 100),
        record("ENST01-2", 91.0, 97.0, Tier::Fail, 200),
        record("augCM-ENST01-1", 92.0, 97.0, Tier::Pass, 300),
    ]);
    let config = ConsensusConfig::default();
    let selector = TranscriptSelector::new(&config, &set);
    let bin = bin(&[], &[], &["ENST01-1", "ENST01-2"], &["augCM-ENST01-1"]);

    let first = selector.select(&bin);
    for _ in 0..10 {
        assert_eq!(selector.select(&bin), first);
    }
    assert_eq!(first.tier, Tier::Fail);
    assert_eq!(first.chosen.as_deref(), Some("augCM-ENST01-1"));
    assert!(first.tie);
}
