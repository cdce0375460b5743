use crate::alignment::{AlignmentRecord, Metric};
use crate::error::ConsensusError;
use crate::g2t::GeneTranscriptMap;
use crate::types::{AlignmentId, HashMap, HashMapExt, TranscriptId};

/// Every classified candidate of a run, indexed by alignment id and grouped
/// by source transcript. Insertion order is preserved in both views.
#[derive(Debug, Default)]
pub struct CandidateSet {
    records: HashMap<AlignmentId, AlignmentRecord>,
    by_transcript: HashMap<TranscriptId, Vec<AlignmentId>>,
    order: Vec<AlignmentId>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
            by_transcript: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Validate all records against `reference` and collect them.
    pub fn from_records<I>(records: I, reference: &GeneTranscriptMap) -> Result<Self, ConsensusError>
    where
        I: IntoIterator<Item = AlignmentRecord>,
    {
        let mut set = Self::new();
        for record in records {
            set.insert(record, reference)?;
        }
        Ok(set)
    }

    /// Add one record, rejecting anything an upstream loader should never emit.
    pub fn insert(
        &mut self,
        record: AlignmentRecord,
        reference: &GeneTranscriptMap,
    ) -> Result<(), ConsensusError> {
        if self.records.contains_key(&record.id) {
            return Err(ConsensusError::DuplicateAlignment(record.id));
        }
        if record.exons.is_empty() {
            return Err(ConsensusError::EmptyExonStructure(record.id));
        }
        for metric in [Metric::Coverage, Metric::Identity] {
            let value = metric.of(&record);
            if !(0.0..=100.0).contains(&value) {
                return Err(ConsensusError::MetricOutOfRange {
                    alignment_id: record.id,
                    metric,
                    value,
                });
            }
        }
        if !reference.contains(&record.source_transcript_id) {
            return Err(ConsensusError::UnknownTranscript {
                alignment_id: record.id,
                transcript_id: record.source_transcript_id,
            });
        }

        self.by_transcript
            .entry(record.source_transcript_id.clone())
            .or_default()
            .push(record.id.clone());
        self.order.push(record.id.clone());
        self.records.insert(record.id.clone(), record);
        Ok(())
    }

    pub fn get(&self, alignment_id: &str) -> Option<&AlignmentRecord> {
        self.records.get(alignment_id)
    }

    /// Candidates of one source transcript, in insertion order.
    pub fn for_transcript<'a>(
        &'a self,
        transcript_id: &str,
    ) -> impl Iterator<Item = &'a AlignmentRecord> + use<'a> {
        self.by_transcript
            .get(transcript_id)
            .into_iter()
            .flatten()
            .filter_map(move |id| self.records.get(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &AlignmentRecord> {
        self.order.iter().filter_map(move |id| self.records.get(id))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
