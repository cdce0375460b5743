use consensus_rs::alignment::{AlignmentRecord, ExonStructure, Interval, Tier};
use consensus_rs::bins::BinBuilder;
use consensus_rs::candidates::CandidateSet;
use consensus_rs::g2t::{GeneTranscriptMap, TranscriptInfo};
use consensus_rs::ConsensusError;

fn info(tx: &str, gene: &str, biotype: &str, chrom: &str) -> TranscriptInfo {
    TranscriptInfo {
        id: tx.into(),
        gene_id: gene.into(),
        biotype: biotype.into(),
        chrom: chrom.into(),
        reference_span: Some(1000),
    }
}

fn reference() -> GeneTranscriptMap {
    let mut map = GeneTranscriptMap::new();
    map.insert(info("ENST01", "ENSG01", "protein_coding", "chr1"));
    map.insert(info("ENST02", "ENSG01", "protein_coding", "chr1"));
    map.insert(info("ENST03", "ENSG02", "lncRNA", "chr2"));
    map.insert(info("ENST04", "ENSG03", "protein_coding", "chrY"));
    map
}

fn record(id: &str, tier: Tier) -> AlignmentRecord {
    let exons = ExonStructure::new(vec![Interval::new("chr1", '+', 100, 1000)]);
    AlignmentRecord::new(id, 95.0, 95.0, tier, exons)
}

#[test]
fn every_transcript_gets_a_bin() {
    let map = reference();
    let part = map.partition("protein_coding").unwrap();
    let set = CandidateSet::from_records(vec![record("ENST01-1", Tier::Pass)], &map).unwrap();
    let binned = BinBuilder::new(&part, false).build(&set);

    let genes: Vec<&str> = binned.genes.iter().map(|g| g.gene_id.as_str()).collect();
    assert_eq!(genes, vec!["ENSG01", "ENSG03"]);
    assert_eq!(binned.genes[0].transcripts.len(), 2);
    assert_eq!(binned.genes[0].transcripts[0].pass, vec!["ENST01-1".to_string()]);
    assert_eq!(binned.genes[0].transcripts[1].highest_tier(), Tier::NoData);
    assert_eq!(binned.genes[1].transcripts[0].candidates.len(), 0);
}

#[test]
fn only_closed_channel_alternates_count_as_discards() {
    let map = reference();
    let part = map.partition("protein_coding").unwrap();
    let set = CandidateSet::from_records(
        vec![
            record("ENST01-1", Tier::Excellent),
            record("augTM-ENST01-1", Tier::Excellent),
            record("ENST03-1", Tier::Excellent),
        ],
        &map,
    )
    .unwrap();
    let binned = BinBuilder::new(&part, false).build(&set);

    // ENST03 belongs to another biotype's pass and is not a discard here.
    assert_eq!(binned.discarded, 1);
    let binned_ids: usize = binned
        .genes
        .iter()
        .flat_map(|g| g.transcripts.iter())
        .map(|b| b.candidates.len())
        .sum();
    assert_eq!(binned_ids, 1);

    let open = BinBuilder::new(&part, true).build(&set);
    assert_eq!(open.discarded, 0);
}

#[test]
fn filtered_chromosome_transcripts_keep_their_bin() {
    let map = reference();
    let part = map.partition("protein_coding").unwrap();
    let set = CandidateSet::from_records(
        vec![
            record("ENST01-1", Tier::Excellent),
            record("ENST04-1", Tier::Excellent),
            record("augTM-ENST04-1", Tier::Pass),
        ],
        &map,
    )
    .unwrap();
    let filter = vec!["chrY".to_string()];
    let binned = BinBuilder::new(&part, true).filter_chroms(&filter).build(&set);

    assert!(part.contains("ENST04"));
    assert_eq!(binned.genes.len(), 2);
    assert_eq!(binned.genes[1].gene_id, "ENSG03");
    assert_eq!(binned.genes[1].reference_span, Some(1000));

    let chr_y = &binned.genes[1].transcripts[0];
    assert_eq!(chr_y.transcript_id, "ENST04");
    assert!(chr_y.excellent.is_empty());
    assert_eq!(chr_y.fail, vec!["ENST04-1".to_string()]);
    assert!(chr_y.supplementary.is_empty());
    assert_eq!(chr_y.candidates.len(), 2);
    assert_eq!(chr_y.highest_tier(), Tier::Fail);

    let kept = &binned.genes[0].transcripts[0];
    assert_eq!(kept.excellent, vec!["ENST01-1".to_string()]);
}

#[test]
fn fail_and_unclassified_primary_land_in_fail() {
    let map = reference();
    let part = map.partition("protein_coding").unwrap();
    let set = CandidateSet::from_records(
        vec![record("ENST01-1", Tier::Fail), record("ENST01-2", Tier::NoData)],
        &map,
    )
    .unwrap();
    let binned = BinBuilder::new(&part, false).build(&set);

    let bin = &binned.genes[0].transcripts[0];
    assert_eq!(bin.fail.len(), 2);
    assert_eq!(bin.highest_tier(), Tier::Fail);
}

#[test]
fn alternate_candidates_need_an_open_channel() {
    let map = reference();
    let part = map.partition("protein_coding").unwrap();
    let set = CandidateSet::from_records(
        vec![
            record("ENST01-1", Tier::Pass),
            record("augTM-ENST01-1", Tier::Excellent),
            record("augTM-ENST01-2", Tier::Fail),
        ],
        &map,
    )
    .unwrap();

    let closed = BinBuilder::new(&part, false).build(&set);
    let bin = &closed.genes[0].transcripts[0];
    assert!(bin.supplementary.is_empty());
    assert_eq!(bin.candidates, vec!["ENST01-1".to_string()]);

    let open = BinBuilder::new(&part, true).build(&set);
    let bin = &open.genes[0].transcripts[0];
    assert_eq!(bin.supplementary, vec!["augTM-ENST01-1".to_string()]);
    // Failing Alternate candidates only reach the rescue pool.
    assert_eq!(bin.candidates.len(), 3);
    assert!(bin.excellent.is_empty());
}

#[test]
fn unknown_biotype_is_rejected() {
    let map = reference();
    let err = map.partition("snRNA").unwrap_err();
    assert_eq!(err, ConsensusError::UnknownBiotype("snRNA".into()));
}

#[test]
fn contract_violations_are_fatal() {
    let map = reference();

    let err = CandidateSet::from_records(vec![record("ENST99-1", Tier::Pass)], &map).unwrap_err();
    assert!(matches!(err, ConsensusError::UnknownTranscript { ref transcript_id, .. } if transcript_id == "ENST99"));

    let err = CandidateSet::from_records(
        vec![record("ENST01-1", Tier::Pass), record("ENST01-1", Tier::Fail)],
        &map,
    )
    .unwrap_err();
    assert_eq!(err, ConsensusError::DuplicateAlignment("ENST01-1".into()));

    let mut bad = record("ENST01-1", Tier::Pass);
    bad.coverage = 100.5;
    let err = CandidateSet::from_records(vec![bad], &map).unwrap_err();
    assert!(matches!(err, ConsensusError::MetricOutOfRange { .. }));

    let mut nan = record("ENST01-1", Tier::Pass);
    nan.identity = f64::NAN;
    assert!(CandidateSet::from_records(vec![nan], &map).is_err());

    let empty = AlignmentRecord::new("ENST01-1", 90.0, 90.0, Tier::Pass, ExonStructure::new(vec![]));
    let err = CandidateSet::from_records(vec![empty], &map).unwrap_err();
    assert_eq!(err, ConsensusError::EmptyExonStructure("ENST01-1".into()));
}
