//! Contract violations raised by the consensus core.
//!
//! Everything in here points at a defect in whatever loaded the inputs. A gene
//! without a usable candidate is never an error; it is reported through
//! [`Tier::NoData`](crate::alignment::Tier) or an entry without a chosen alignment.

use crate::alignment::Metric;
use thiserror::Error;

/// Fatal input errors. Any of these aborts the whole run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsensusError {
    /// A requested biotype does not occur in the reference annotation.
    #[error("unknown biotype: {0}")]
    UnknownBiotype(String),

    /// A candidate names a source transcript the reference does not know.
    #[error("alignment {alignment_id} refers to transcript {transcript_id}, which is not in the reference")]
    UnknownTranscript {
        alignment_id: String,
        transcript_id: String,
    },

    /// Coverage or identity outside [0, 100], or NaN.
    #[error("alignment {alignment_id}: {metric} {value} is outside [0, 100]")]
    MetricOutOfRange {
        alignment_id: String,
        metric: Metric,
        value: f64,
    },

    /// The same alignment id was supplied twice.
    #[error("duplicate alignment id: {0}")]
    DuplicateAlignment(String),

    /// A candidate without any exon intervals.
    #[error("alignment {0} has no exons")]
    EmptyExonStructure(String),

    /// A candidate alignment has no classifier row.
    #[error("no classifier stats for alignment {0}")]
    MissingStats(String),
}
