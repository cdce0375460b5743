use consensus_rs::alignment::{source_transcript_of, AlignmentRecord, ExonStructure, Interval, Origin, Tier};
use consensus_rs::ConsensusConfig;

#[test]
fn source_transcript_is_derived_from_alignment_id() {
    assert_eq!(source_transcript_of("ENST00000335137.4-1"), "ENST00000335137.4");
    assert_eq!(source_transcript_of("augTM-ENST00000335137.4-12"), "ENST00000335137.4");
    assert_eq!(source_transcript_of("augCM-NM_001-2"), "NM_001");
    // No trailing counter: the id is the transcript itself.
    assert_eq!(source_transcript_of("ENST01"), "ENST01");
    assert_eq!(source_transcript_of("GENE-A"), "GENE-A");
}

#[test]
fn origin_follows_id_prefix() {
    assert_eq!(Origin::of_id("ENST01-1"), Origin::Primary);
    assert_eq!(Origin::of_id("augPB-ENST01-1"), Origin::Alternate);
    // Alternate ids sort after Primary ones.
    assert!("augTM-ENST01-1" > "ENST01-1");
}

#[test]
fn tier_ordering_and_parsing() {
    assert!(Tier::Excellent > Tier::Pass);
    assert!(Tier::Pass > Tier::Fail);
    assert!(Tier::Fail > Tier::NoData);
    assert_eq!("excellent".parse::<Tier>(), Ok(Tier::Excellent));
    assert_eq!("PASS".parse::<Tier>(), Ok(Tier::Pass));
    assert_eq!("Fail".parse::<Tier>(), Ok(Tier::Fail));
    // NoData is an outcome of selection, never a classifier verdict.
    assert!("NoData".parse::<Tier>().is_err());
    assert!("nodata".parse::<Tier>().is_err());
    assert!("great".parse::<Tier>().is_err());
}

#[test]
fn record_derives_span_and_origin() {
    let exons = ExonStructure::new(vec![
        Interval::new("chr1", '-', 500, 700),
        Interval::new("chr1", '-', 100, 200),
    ]);
    let record = AlignmentRecord::new("augTM-ENST01-3", 90.0, 95.0, Tier::Pass, exons);

    assert_eq!(record.origin, Origin::Alternate);
    assert_eq!(record.source_transcript_id, "ENST01");
    assert_eq!(record.genomic_span, 600);
    assert_eq!(record.exons.intervals()[0].start, 100);
}

#[test]
fn default_config_values() {
    let cfg = ConsensusConfig::default();
    assert!((cfg.coverage_cutoff - 80.0).abs() < 1e-9, "coverage_cutoff");
    assert!((cfg.rescue_coverage_cutoff - 60.0).abs() < 1e-9, "rescue_coverage_cutoff");
    assert!((cfg.rescue_identity_cutoff - 80.0).abs() < 1e-9, "rescue_identity_cutoff");
    assert!((cfg.short_percentage - 60.0).abs() < 1e-9, "short_percentage");
    assert_eq!(cfg.rescue_origin, None, "rescue_origin");
    assert_eq!(cfg.threads, 1, "threads");
    assert!(cfg.alternate_channel_open("protein_coding"));
    assert!(!cfg.alternate_channel_open("lncRNA"));
    assert!(cfg.filter_chroms.iter().any(|c| c == "chrY"));
}
