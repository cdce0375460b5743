use crate::alignment::{Origin, Tier};
use crate::candidates::CandidateSet;
use crate::g2t::GeneTranscriptMap;
use crate::types::{AlignmentId, GeneId, TranscriptId};

/// Candidates of one known source transcript, split by tier.
#[derive(Debug, Clone, Default)]
pub struct TranscriptBin {
    pub transcript_id: TranscriptId,
    pub gene_id: GeneId,
    pub excellent: Vec<AlignmentId>,
    pub pass: Vec<AlignmentId>,
    pub fail: Vec<AlignmentId>,
    /// Alternate-origin candidates offered to the selector whatever the tier.
    pub supplementary: Vec<AlignmentId>,
    /// Every candidate admitted for this transcript, in input order.
    pub candidates: Vec<AlignmentId>,
}

impl TranscriptBin {
    pub fn new(transcript_id: impl Into<String>, gene_id: impl Into<String>) -> Self {
        Self {
            transcript_id: transcript_id.into(),
            gene_id: gene_id.into(),
            ..Self::default()
        }
    }

    pub fn members(&self, tier: Tier) -> &[AlignmentId] {
        match tier {
            Tier::Excellent => &self.excellent,
            Tier::Pass => &self.pass,
            Tier::Fail => &self.fail,
            Tier::NoData => &[],
        }
    }

    /// Highest tier with at least one member, or `NoData`.
    pub fn highest_tier(&self) -> Tier {
        Tier::RANKED
            .into_iter()
            .find(|&tier| !self.members(tier).is_empty())
            .unwrap_or(Tier::NoData)
    }
}

/// All transcript bins of one gene; the unit of work for resolution.
#[derive(Debug, Clone)]
pub struct GeneBins {
    pub gene_id: GeneId,
    pub reference_span: Option<u32>,
    pub transcripts: Vec<TranscriptBin>,
}

#[derive(Debug, Default)]
pub struct Binned {
    pub genes: Vec<GeneBins>,
    /// Candidates of mapped transcripts that reached no bin: Alternate
    /// candidates while the supplementary channel is closed.
    pub discarded: usize,
}

pub struct BinBuilder<'a> {
    map: &'a GeneTranscriptMap,
    alternate_channel: bool,
    filter_chroms: &'a [String],
}

impl<'a> BinBuilder<'a> {
    /// `alternate_channel` opens the supplementary channel for this map's biotype.
    pub fn new(map: &'a GeneTranscriptMap, alternate_channel: bool) -> Self {
        Self {
            map,
            alternate_channel,
            filter_chroms: &[],
        }
    }

    /// Transcripts on these reference chromosomes keep their bin, but their
    /// Primary candidates are held at Fail and their Alternate candidates stay
    /// out of the supplementary channel.
    pub fn filter_chroms(mut self, filter_chroms: &'a [String]) -> Self {
        self.filter_chroms = filter_chroms;
        self
    }

    /// One bin per transcript of the map, in map order, including transcripts
    /// without any candidate.
    pub fn build(&self, candidates: &CandidateSet) -> Binned {
        let mut genes = Vec::with_capacity(self.map.num_genes());
        let mut discarded = 0;

        for (gene_id, txs) in self.map.genes() {
            let mut bins = Vec::with_capacity(txs.len());
            for tx in txs {
                let filtered = self
                    .map
                    .transcript(tx)
                    .is_some_and(|info| self.filter_chroms.contains(&info.chrom));
                let mut bin = TranscriptBin::new(tx.as_str(), gene_id);
                for record in candidates.for_transcript(tx) {
                    match record.origin {
                        Origin::Primary => {
                            let tier = if filtered { Tier::Fail } else { record.tier };
                            match tier {
                                Tier::Excellent => bin.excellent.push(record.id.clone()),
                                Tier::Pass => bin.pass.push(record.id.clone()),
                                Tier::Fail | Tier::NoData => bin.fail.push(record.id.clone()),
                            }
                            bin.candidates.push(record.id.clone());
                        }
                        Origin::Alternate if self.alternate_channel => {
                            if record.tier.is_passing() && !filtered {
                                bin.supplementary.push(record.id.clone());
                            }
                            bin.candidates.push(record.id.clone());
                        }
                        Origin::Alternate => discarded += 1,
                    }
                }
                bins.push(bin);
            }
            genes.push(GeneBins {
                gene_id: gene_id.to_string(),
                reference_span: self.map.reference_span(gene_id),
                transcripts: bins,
            });
        }

        if discarded > 0 {
            tracing::debug!(discarded, "alternate candidates discarded, channel closed");
        }

        Binned { genes, discarded }
    }
}
