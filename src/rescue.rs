use crate::alignment::AlignmentRecord;
use crate::bins::GeneBins;
use crate::candidates::CandidateSet;
use crate::config::ConsensusConfig;

/// Relaxed fallback for genes without a usable representative.
///
/// Looks at every candidate of every transcript of the gene, keeps those that
/// clear the rescue cutoffs (and the origin restriction, if any) and returns
/// the one with the longest genomic span. Equal spans go to the first one met.
pub struct RescueSelector<'a> {
    config: &'a ConsensusConfig,
    candidates: &'a CandidateSet,
}

impl<'a> RescueSelector<'a> {
    pub fn new(config: &'a ConsensusConfig, candidates: &'a CandidateSet) -> Self {
        Self { config, candidates }
    }

    pub fn rescue(&self, gene: &GeneBins) -> Option<&'a AlignmentRecord> {
        let candidates = self.candidates;
        gene.transcripts
            .iter()
            .flat_map(|bin| bin.candidates.iter())
            .filter_map(|id| candidates.get(id))
            .filter(|r| self.admits(r))
            .fold(None, |longest: Option<&AlignmentRecord>, r| match longest {
                Some(l) if l.genomic_span >= r.genomic_span => Some(l),
                _ => Some(r),
            })
    }

    fn admits(&self, record: &AlignmentRecord) -> bool {
        if let Some(origin) = self.config.rescue_origin
            && record.origin != origin
        {
            return false;
        }
        record.coverage >= self.config.rescue_coverage_cutoff
            && record.identity >= self.config.rescue_identity_cutoff
    }
}
