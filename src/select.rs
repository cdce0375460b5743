use crate::alignment::{round6, AlignmentRecord, Origin, Tier};
use crate::bins::TranscriptBin;
use crate::candidates::CandidateSet;
use crate::config::ConsensusConfig;
use crate::types::{AlignmentId, GeneId, TranscriptId};

/// Outcome for one transcript bin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsensusEntry {
    pub gene_id: GeneId,
    pub transcript_id: TranscriptId,
    /// `None` when the pool was empty or nothing cleared the coverage cutoff.
    pub chosen: Option<AlignmentId>,
    pub tier: Tier,
    /// The best-identity candidates came from more than one origin.
    pub tie: bool,
}

impl ConsensusEntry {
    fn unresolved(bin: &TranscriptBin, tier: Tier) -> Self {
        Self {
            gene_id: bin.gene_id.clone(),
            transcript_id: bin.transcript_id.clone(),
            chosen: None,
            tier,
            tie: false,
        }
    }

    /// Counts towards the gene being represented in the consensus.
    pub fn is_included(&self) -> bool {
        self.tier.is_passing() && self.chosen.is_some()
    }

    pub fn chosen_origin(&self) -> Option<Origin> {
        self.chosen.as_deref().map(Origin::of_id)
    }
}

/// Picks the representative alignment of a transcript.
///
/// The pool is the highest non-empty tier plus the supplementary Alternate
/// candidates. Candidates below the coverage cutoff are dropped; among the
/// rest the highest identity (rounded to 6 places) wins. Exact ties go to the
/// greatest alignment id, which favours Alternate ids over Primary ones.
pub struct TranscriptSelector<'a> {
    config: &'a ConsensusConfig,
    candidates: &'a CandidateSet,
}

impl<'a> TranscriptSelector<'a> {
    pub fn new(config: &'a ConsensusConfig, candidates: &'a CandidateSet) -> Self {
        Self { config, candidates }
    }

    pub fn select(&self, bin: &TranscriptBin) -> ConsensusEntry {
        // Supplementary candidates alone never establish a tier.
        let tier = bin.highest_tier();
        if tier == Tier::NoData {
            return ConsensusEntry::unresolved(bin, Tier::NoData);
        }

        let pool: Vec<&AlignmentRecord> = bin
            .members(tier)
            .iter()
            .chain(bin.supplementary.iter())
            .filter_map(|id| self.candidates.get(id))
            .collect();
        if pool.is_empty() {
            return ConsensusEntry::unresolved(bin, Tier::NoData);
        }

        let cleared: Vec<(&AlignmentRecord, f64)> = pool
            .into_iter()
            .filter(|r| round6(r.coverage) >= self.config.coverage_cutoff)
            .map(|r| (r, round6(r.identity)))
            .collect();
        if cleared.is_empty() {
            return ConsensusEntry::unresolved(bin, tier);
        }

        let best_identity = cleared
            .iter()
            .map(|&(_, identity)| identity)
            .fold(f64::NEG_INFINITY, f64::max);
        let mut best: Vec<&AlignmentRecord> = cleared
            .into_iter()
            .filter(|&(_, identity)| identity >= best_identity)
            .map(|(r, _)| r)
            .collect();
        best.sort_by(|a, b| b.id.cmp(&a.id));

        let winner = best[0];
        let tie = best.iter().any(|r| r.origin != winner.origin);

        ConsensusEntry {
            gene_id: bin.gene_id.clone(),
            transcript_id: bin.transcript_id.clone(),
            chosen: Some(winner.id.clone()),
            tier,
            tie,
        }
    }
}
