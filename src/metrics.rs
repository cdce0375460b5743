use crate::alignment::{Origin, Tier};
use crate::gene::{GeneOutcome, RescueOutcome};
use crate::select::ConsensusEntry;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TierCounts {
    pub excellent: u64,
    pub pass: u64,
    pub fail: u64,
    pub no_data: u64,
}

impl TierCounts {
    pub fn add(&mut self, tier: Tier) {
        *self.slot(tier) += 1;
    }

    pub fn get(&self, tier: Tier) -> u64 {
        match tier {
            Tier::Excellent => self.excellent,
            Tier::Pass => self.pass,
            Tier::Fail => self.fail,
            Tier::NoData => self.no_data,
        }
    }

    pub fn total(&self) -> u64 {
        self.excellent + self.pass + self.fail + self.no_data
    }

    fn slot(&mut self, tier: Tier) -> &mut u64 {
        match tier {
            Tier::Excellent => &mut self.excellent,
            Tier::Pass => &mut self.pass,
            Tier::Fail => &mut self.fail,
            Tier::NoData => &mut self.no_data,
        }
    }

    fn merge(&mut self, other: &TierCounts) {
        self.excellent += other.excellent;
        self.pass += other.pass;
        self.fail += other.fail;
        self.no_data += other.no_data;
    }
}

/// Where a transcript's representative came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Primary,
    Alternate,
    Tie,
    /// Tier known, but nothing cleared the coverage cutoff.
    Unresolved,
}

impl Source {
    pub fn of(entry: &ConsensusEntry) -> Self {
        match entry.chosen_origin() {
            None => Self::Unresolved,
            Some(_) if entry.tie => Self::Tie,
            Some(Origin::Primary) => Self::Primary,
            Some(Origin::Alternate) => Self::Alternate,
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "Primary"),
            Self::Alternate => write!(f, "Alternate"),
            Self::Tie => write!(f, "Tie"),
            Self::Unresolved => write!(f, "Unresolved"),
        }
    }
}

/// Label used in the per-source transcript breakdown, e.g. `PassTie`.
pub fn source_label(entry: &ConsensusEntry) -> String {
    match entry.tier {
        Tier::NoData => Tier::NoData.to_string(),
        tier => format!("{tier}{}", Source::of(entry)),
    }
}

/// Outcome of rescue for genes whose transcripts were all at tier Fail.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FailCounts {
    pub rescued: u64,
    pub unrescued: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RescueCounts {
    pub invoked: u64,
    pub succeeded: u64,
}

/// Tallies for one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConsensusMetrics {
    pub transcript: TierCounts,
    /// `<Tier><Source>` counts, only filled while the Alternate channel is open.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub transcript_by_source: BTreeMap<String, u64>,
    pub gene: TierCounts,
    pub gene_fail: FailCounts,
    pub rescue: RescueCounts,
    /// Alternate candidates dropped because the channel is closed.
    pub discarded: u64,
    pub duplicate_groups: u64,
    pub final_alignments: u64,
    pub final_transcripts: u64,
    pub final_genes: u64,
}

impl ConsensusMetrics {
    pub fn record_gene(&mut self, outcome: &GeneOutcome, split_by_source: bool) {
        for entry in &outcome.entries {
            self.transcript.add(entry.tier);
            if split_by_source {
                *self
                    .transcript_by_source
                    .entry(source_label(entry))
                    .or_insert(0) += 1;
            }
        }

        self.gene.add(outcome.tier);

        if outcome.rescue.attempted() {
            self.rescue.invoked += 1;
        }
        let rescued = matches!(outcome.rescue, RescueOutcome::Rescued(_));
        if rescued {
            self.rescue.succeeded += 1;
        }
        if outcome.entry_tier() == Tier::Fail {
            if rescued {
                self.gene_fail.rescued += 1;
            } else {
                self.gene_fail.unrescued += 1;
            }
        }
    }

    /// Fold a partial tally (e.g. from one worker) into this one.
    pub fn merge(&mut self, other: &ConsensusMetrics) {
        self.transcript.merge(&other.transcript);
        for (label, count) in &other.transcript_by_source {
            *self.transcript_by_source.entry(label.clone()).or_insert(0) += count;
        }
        self.gene.merge(&other.gene);
        self.gene_fail.rescued += other.gene_fail.rescued;
        self.gene_fail.unrescued += other.gene_fail.unrescued;
        self.rescue.invoked += other.rescue.invoked;
        self.rescue.succeeded += other.rescue.succeeded;
        self.discarded += other.discarded;
        self.duplicate_groups += other.duplicate_groups;
        self.final_alignments += other.final_alignments;
        self.final_transcripts += other.final_transcripts;
        self.final_genes += other.final_genes;
    }
}
