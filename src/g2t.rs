use crate::annotation::Transcript;
use crate::error::ConsensusError;
use crate::types::{GeneId, HashMap, HashMapExt, TranscriptId};
use std::collections::BTreeSet;

/// What the reference annotation says about one source transcript.
#[derive(Debug, Clone)]
pub struct TranscriptInfo {
    pub id: TranscriptId,
    pub gene_id: GeneId,
    pub biotype: String,
    pub chrom: String,
    /// Genomic span of the source transcript, when known.
    pub reference_span: Option<u32>,
}

/// Authoritative gene <-> source transcript map.
///
/// Genes and their transcripts keep first-insertion order so that every pass
/// over the map is deterministic.
#[derive(Debug, Clone, Default)]
pub struct GeneTranscriptMap {
    genes: Vec<GeneId>,
    gene_transcripts: HashMap<GeneId, Vec<TranscriptId>>,
    transcripts: HashMap<TranscriptId, TranscriptInfo>,
    // Longest reference span per gene, over every transcript ever inserted.
    gene_spans: HashMap<GeneId, u32>,
}

impl GeneTranscriptMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transcript. A transcript id seen before is ignored.
    pub fn insert(&mut self, info: TranscriptInfo) {
        if self.transcripts.contains_key(&info.id) {
            return;
        }
        if let Some(span) = info.reference_span {
            let longest = self.gene_spans.entry(info.gene_id.clone()).or_insert(0);
            *longest = (*longest).max(span);
        }
        match self.gene_transcripts.get_mut(&info.gene_id) {
            Some(txs) => txs.push(info.id.clone()),
            None => {
                self.genes.push(info.gene_id.clone());
                self.gene_transcripts
                    .insert(info.gene_id.clone(), vec![info.id.clone()]);
            }
        }
        self.transcripts.insert(info.id.clone(), info);
    }

    pub fn contains(&self, transcript_id: &str) -> bool {
        self.transcripts.contains_key(transcript_id)
    }

    pub fn transcript(&self, transcript_id: &str) -> Option<&TranscriptInfo> {
        self.transcripts.get(transcript_id)
    }

    pub fn gene_of(&self, transcript_id: &str) -> Option<&str> {
        self.transcripts
            .get(transcript_id)
            .map(|info| info.gene_id.as_str())
    }

    /// Genes in insertion order, each with its transcripts.
    pub fn genes(&self) -> impl Iterator<Item = (&str, &[TranscriptId])> {
        self.genes.iter().map(|gene| {
            let txs = self
                .gene_transcripts
                .get(gene)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            (gene.as_str(), txs)
        })
    }

    /// Longest known source-transcript span of the gene.
    pub fn reference_span(&self, gene_id: &str) -> Option<u32> {
        self.gene_spans.get(gene_id).copied().filter(|&s| s > 0)
    }

    pub fn num_genes(&self) -> usize {
        self.genes.len()
    }

    pub fn num_transcripts(&self) -> usize {
        self.transcripts.len()
    }

    pub fn biotypes(&self) -> BTreeSet<&str> {
        self.transcripts
            .values()
            .map(|info| info.biotype.as_str())
            .collect()
    }

    /// Sub-map of the transcripts with `biotype`. Gene reference spans are
    /// carried over from the full map unchanged.
    pub fn partition(&self, biotype: &str) -> Result<GeneTranscriptMap, ConsensusError> {
        if !self.transcripts.values().any(|info| info.biotype == biotype) {
            return Err(ConsensusError::UnknownBiotype(biotype.to_string()));
        }

        let mut part = GeneTranscriptMap::new();
        for (gene, txs) in self.genes() {
            for tx in txs {
                let Some(info) = self.transcripts.get(tx) else {
                    continue;
                };
                if info.biotype != biotype {
                    continue;
                }
                part.insert(info.clone());
            }
            if let Some(span) = self.gene_spans.get(gene)
                && part.gene_transcripts.contains_key(gene)
            {
                part.gene_spans.insert(gene.to_string(), *span);
            }
        }
        Ok(part)
    }
}

/// Build the map from reference transcripts, in slice order.
pub fn build_g2t(transcripts: &[Transcript]) -> GeneTranscriptMap {
    let mut g2t = GeneTranscriptMap {
        genes: Vec::new(),
        gene_transcripts: HashMap::with_capacity(transcripts.len()),
        transcripts: HashMap::with_capacity(transcripts.len()),
        gene_spans: HashMap::new(),
    };
    for tx in transcripts {
        let span = tx.span();
        g2t.insert(TranscriptInfo {
            id: tx.id.clone(),
            gene_id: tx.gene_id.clone(),
            biotype: tx.biotype.clone(),
            chrom: tx.seqname.clone(),
            reference_span: (span > 0).then_some(span),
        });
    }
    g2t
}
