use crate::alignment::Origin;

/// Cutoffs and switches for one resolution pass.
#[derive(Debug, Clone)]
pub struct ConsensusConfig {
    /// Minimum coverage (%) for a candidate to represent its transcript.
    pub coverage_cutoff: f64,
    /// Minimum coverage (%) for the per-gene rescue.
    pub rescue_coverage_cutoff: f64,
    /// Minimum identity (%) for the per-gene rescue.
    pub rescue_identity_cutoff: f64,
    /// A chosen alignment whose span is below this percentage of the gene's
    /// reference span counts as short.
    pub short_percentage: f64,
    /// Restrict the rescue pool to one origin.
    pub rescue_origin: Option<Origin>,
    /// Biotypes for which the supplementary Alternate channel is open.
    pub alternate_biotypes: Vec<String>,
    /// Reference chromosomes whose transcripts are held at Fail and get no
    /// supplementary candidates.
    pub filter_chroms: Vec<String>,
    /// Worker threads for gene resolution.
    pub threads: usize,
}

impl ConsensusConfig {
    /// Rescue considers Alternate-origin candidates only.
    pub fn alternate_rescue() -> Self {
        Self {
            rescue_origin: Some(Origin::Alternate),
            ..Self::default()
        }
    }

    pub fn alternate_channel_open(&self, biotype: &str) -> bool {
        self.alternate_biotypes.iter().any(|b| b == biotype)
    }
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            coverage_cutoff: 80.0,
            rescue_coverage_cutoff: 60.0,
            rescue_identity_cutoff: 80.0,
            short_percentage: 60.0,
            rescue_origin: None,
            alternate_biotypes: vec!["protein_coding".to_string()],
            filter_chroms: vec!["Y".to_string(), "chrY".to_string()],
            threads: 1,
        }
    }
}
