//! Public library API for building a consensus gene set.
//!
//! # Example
//!
//! ```no_run
//! use consensus_rs::annotation::load_transcripts;
//! use consensus_rs::g2t::build_g2t;
//! use consensus_rs::stats::{attach_stats, load_stats};
//! use consensus_rs::{ConsensusConfig, ConsensusRun};
//! use std::path::Path;
//!
//! let reference = build_g2t(&load_transcripts(Path::new("reference.gtf"))?);
//! let models = load_transcripts(Path::new("projections.gtf"))?;
//! let records = attach_stats(&models, &load_stats(Path::new("classifier.tsv"))?)?;
//!
//! let run = ConsensusRun::new(&reference, records, ConsensusConfig::default())?;
//! let result = run.resolve("protein_coding")?;
//! println!("{} alignments in the consensus", result.consensus.len());
//! # Ok::<(), anyhow::Error>(())
//! ```

use crate::alignment::AlignmentRecord;
use crate::candidates::CandidateSet;
use crate::config::ConsensusConfig;
use crate::error::ConsensusError;
use crate::g2t::GeneTranscriptMap;
use crate::pipeline::{self, ConsensusResult};
use anyhow::Result;

/// One genome's resolution session.
///
/// Owns the validated candidates for the lifetime of the run; each call to
/// [`ConsensusRun::resolve`] is an independent pass over one biotype.
pub struct ConsensusRun<'a> {
    reference: &'a GeneTranscriptMap,
    candidates: CandidateSet,
    config: ConsensusConfig,
}

impl<'a> ConsensusRun<'a> {
    /// Validate `config` and `records` against the full reference map.
    ///
    /// Fails on the first contract violation: an Alternate biotype gate naming
    /// no reference biotype, duplicate ids, empty exon structures, metrics
    /// outside [0, 100] or transcripts unknown to the reference.
    pub fn new<I>(
        reference: &'a GeneTranscriptMap,
        records: I,
        config: ConsensusConfig,
    ) -> Result<Self, ConsensusError>
    where
        I: IntoIterator<Item = AlignmentRecord>,
    {
        let known = reference.biotypes();
        if let Some(gate) = config
            .alternate_biotypes
            .iter()
            .find(|b| !known.contains(b.as_str()))
        {
            return Err(ConsensusError::UnknownBiotype(gate.clone()));
        }
        let candidates = CandidateSet::from_records(records, reference)?;
        Ok(Self {
            reference,
            candidates,
            config,
        })
    }

    pub fn candidates(&self) -> &CandidateSet {
        &self.candidates
    }

    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }

    pub fn resolve(&self, biotype: &str) -> Result<ConsensusResult> {
        pipeline::run(self.reference, &self.candidates, biotype, &self.config)
    }

    /// Resolve several biotypes. Every biotype is checked against the
    /// reference before any work starts.
    pub fn resolve_all<S: AsRef<str>>(&self, biotypes: &[S]) -> Result<Vec<ConsensusResult>> {
        let known = self.reference.biotypes();
        if let Some(unknown) = biotypes.iter().find(|b| !known.contains(b.as_ref())) {
            return Err(ConsensusError::UnknownBiotype(unknown.as_ref().to_string()).into());
        }
        biotypes.iter().map(|b| self.resolve(b.as_ref())).collect()
    }
}
