//! consensus-rs: resolve competing transcript projections into one consensus gene set.
//!
//! Candidates from one or more pipelines (a Primary projection and, optionally,
//! Alternate model-based predictions) are binned per source transcript, the
//! best representative is chosen per transcript under the tier hierarchy,
//! genes without a usable representative are rescued under relaxed cutoffs,
//! and structurally identical results are collapsed.
//!
//! # Library usage
//!
//! ```no_run
//! use consensus_rs::{ConsensusConfig, ConsensusRun};
//! use consensus_rs::alignment::{AlignmentRecord, ExonStructure, Interval, Tier};
//! use consensus_rs::g2t::{GeneTranscriptMap, TranscriptInfo};
//!
//! let mut reference = GeneTranscriptMap::new();
//! reference.insert(TranscriptInfo {
//!     id: "ENST01".into(),
//!     gene_id: "ENSG01".into(),
//!     biotype: "protein_coding".into(),
//!     chrom: "chr1".into(),
//!     reference_span: Some(1000),
//! });
//!
//! let exons = ExonStructure::new(vec![Interval::new("chr1", '+', 100, 1100)]);
//! let records = vec![AlignmentRecord::new("ENST01-1", 99.0, 98.0, Tier::Excellent, exons)];
//!
//! let run = ConsensusRun::new(&reference, records, ConsensusConfig::default())?;
//! let result = run.resolve("protein_coding")?;
//! assert_eq!(result.consensus, vec!["ENST01-1".to_string()]);
//! # Ok::<(), anyhow::Error>(())
//! ```

// Internal modules, not part of the public API.
pub(crate) mod types;

// Public modules.
pub mod alignment;
pub mod annotation;
pub mod bins;
pub mod candidates;
pub mod config;
pub mod dedup;
pub mod error;
pub mod g2t;
pub mod gene;
pub mod metrics;
pub mod output;
pub mod pipeline;
pub mod rescue;
pub mod select;
pub mod stats;

mod api;

// Flat re-exports for the most commonly used public types.
pub use alignment::{AlignmentRecord, Origin, Tier};
pub use api::ConsensusRun;
pub use config::ConsensusConfig;
pub use error::ConsensusError;
pub use pipeline::ConsensusResult;
