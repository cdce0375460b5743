use crate::alignment::Tier;
use crate::bins::GeneBins;
use crate::candidates::CandidateSet;
use crate::config::ConsensusConfig;
use crate::rescue::RescueSelector;
use crate::select::{ConsensusEntry, TranscriptSelector};
use crate::types::{AlignmentId, GeneId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RescueOutcome {
    /// The gene had a full-length passing representative.
    NotAttempted,
    /// Rescue ran and nothing cleared the relaxed cutoffs.
    Failed,
    /// Rescue contributed this alignment, at tier Fail.
    Rescued(AlignmentId),
}

impl RescueOutcome {
    pub fn attempted(&self) -> bool {
        !matches!(self, Self::NotAttempted)
    }
}

/// Gene-level result of one resolution pass.
#[derive(Debug, Clone)]
pub struct GeneOutcome {
    pub gene_id: GeneId,
    /// One entry per transcript bin, in bin order.
    pub entries: Vec<ConsensusEntry>,
    /// At least one entry is Excellent/Pass with a chosen alignment.
    pub included: bool,
    /// Every included alignment is short relative to the reference span.
    pub only_short: bool,
    pub rescue: RescueOutcome,
    /// Highest tier over the entries and any rescue addition.
    pub tier: Tier,
    /// Alignments this gene contributes to the consensus, before deduplication.
    pub members: Vec<AlignmentId>,
}

impl GeneOutcome {
    /// Gene tier from the transcript entries alone.
    pub fn entry_tier(&self) -> Tier {
        highest_tier(&self.entries)
    }
}

fn highest_tier(entries: &[ConsensusEntry]) -> Tier {
    entries
        .iter()
        .map(|e| e.tier)
        .max()
        .unwrap_or(Tier::NoData)
}

/// Rolls transcript entries up to a gene and decides whether to rescue.
pub struct GeneAggregator<'a> {
    config: &'a ConsensusConfig,
    candidates: &'a CandidateSet,
    selector: TranscriptSelector<'a>,
    rescuer: RescueSelector<'a>,
}

impl<'a> GeneAggregator<'a> {
    pub fn new(config: &'a ConsensusConfig, candidates: &'a CandidateSet) -> Self {
        Self {
            config,
            candidates,
            selector: TranscriptSelector::new(config, candidates),
            rescuer: RescueSelector::new(config, candidates),
        }
    }

    pub fn resolve(&self, gene: &GeneBins) -> GeneOutcome {
        let entries: Vec<ConsensusEntry> = gene
            .transcripts
            .iter()
            .map(|bin| self.selector.select(bin))
            .collect();

        let mut members: Vec<AlignmentId> = Vec::new();
        for id in entries
            .iter()
            .filter(|e| e.is_included())
            .filter_map(|e| e.chosen.as_ref())
        {
            if !members.contains(id) {
                members.push(id.clone());
            }
        }
        let included = !members.is_empty();
        let only_short = self.only_short(&members, gene.reference_span);

        let mut tier = highest_tier(&entries);
        let rescue = if !included || only_short {
            match self.rescuer.rescue(gene) {
                Some(record) => {
                    tracing::debug!(
                        gene = %gene.gene_id,
                        alignment = %record.id,
                        included,
                        only_short,
                        "gene rescued"
                    );
                    if !members.contains(&record.id) {
                        members.push(record.id.clone());
                    }
                    tier = tier.max(Tier::Fail);
                    RescueOutcome::Rescued(record.id.clone())
                }
                None => RescueOutcome::Failed,
            }
        } else {
            RescueOutcome::NotAttempted
        };

        GeneOutcome {
            gene_id: gene.gene_id.clone(),
            entries,
            included,
            only_short,
            rescue,
            tier,
            members,
        }
    }

    /// True when every included alignment spans less than
    /// `short_percentage` of the gene's reference span. Without a reference
    /// span nothing can vouch for length, so the gene counts as short.
    fn only_short(&self, included: &[AlignmentId], reference_span: Option<u32>) -> bool {
        let Some(reference_span) = reference_span else {
            return true;
        };
        included
            .iter()
            .filter_map(|id| self.candidates.get(id))
            .all(|r| {
                100.0 * f64::from(r.genomic_span) / f64::from(reference_span)
                    < self.config.short_percentage
            })
    }
}
