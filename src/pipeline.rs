use crate::bins::{BinBuilder, GeneBins};
use crate::candidates::CandidateSet;
use crate::config::ConsensusConfig;
use crate::dedup::deduplicate;
use crate::g2t::GeneTranscriptMap;
use crate::gene::{GeneAggregator, GeneOutcome};
use crate::metrics::ConsensusMetrics;
use crate::select::ConsensusEntry;
use crate::types::{AlignmentId, HashSet, HashSetExt};
use anyhow::{anyhow, Result};
use crossfire::mpmc;
use std::collections::BTreeMap;
use std::thread;

/// Everything one resolution pass produces for a biotype.
#[derive(Debug, Clone)]
pub struct ConsensusResult {
    pub biotype: String,
    /// One outcome per gene of the partition, in map order.
    pub genes: Vec<GeneOutcome>,
    /// Final deduplicated consensus set.
    pub consensus: Vec<AlignmentId>,
    pub metrics: ConsensusMetrics,
}

impl ConsensusResult {
    /// Every transcript entry, gene by gene.
    pub fn entries(&self) -> impl Iterator<Item = &ConsensusEntry> {
        self.genes.iter().flat_map(|g| g.entries.iter())
    }

    pub fn gene(&self, gene_id: &str) -> Option<&GeneOutcome> {
        self.genes.iter().find(|g| g.gene_id == gene_id)
    }
}

/// Resolve the `biotype` partition of `reference` against `candidates`.
pub fn run(
    reference: &GeneTranscriptMap,
    candidates: &CandidateSet,
    biotype: &str,
    config: &ConsensusConfig,
) -> Result<ConsensusResult> {
    let partition = reference.partition(biotype)?;
    let alternate_channel = config.alternate_channel_open(biotype);
    let binned = BinBuilder::new(&partition, alternate_channel)
        .filter_chroms(&config.filter_chroms)
        .build(candidates);
    let aggregator = GeneAggregator::new(config, candidates);

    let (genes, mut metrics) = if config.threads > 1 {
        resolve_parallel(binned.genes, &aggregator, alternate_channel, config.threads)?
    } else {
        resolve_serial(&binned.genes, &aggregator, alternate_channel)
    };
    metrics.discarded = binned.discarded as u64;

    let members: Vec<AlignmentId> = genes
        .iter()
        .flat_map(|g| g.members.iter().cloned())
        .collect();
    let deduplicated = deduplicate(&members, candidates);
    metrics.duplicate_groups = deduplicated.duplicate_groups as u64;

    let mut final_transcripts = HashSet::new();
    let mut final_genes = HashSet::new();
    for record in deduplicated.ids.iter().filter_map(|id| candidates.get(id)) {
        final_transcripts.insert(record.source_transcript_id.as_str());
        if let Some(gene) = partition.gene_of(&record.source_transcript_id) {
            final_genes.insert(gene);
        }
    }
    metrics.final_alignments = deduplicated.ids.len() as u64;
    metrics.final_transcripts = final_transcripts.len() as u64;
    metrics.final_genes = final_genes.len() as u64;

    tracing::info!(
        biotype,
        genes = genes.len(),
        transcripts = metrics.transcript.total(),
        rescued = metrics.rescue.succeeded,
        duplicate_groups = metrics.duplicate_groups,
        consensus = metrics.final_alignments,
        "consensus resolved"
    );

    Ok(ConsensusResult {
        biotype: biotype.to_string(),
        genes,
        consensus: deduplicated.ids,
        metrics,
    })
}

fn resolve_serial(
    genes: &[GeneBins],
    aggregator: &GeneAggregator<'_>,
    split_by_source: bool,
) -> (Vec<GeneOutcome>, ConsensusMetrics) {
    let mut metrics = ConsensusMetrics::default();
    let outcomes = genes
        .iter()
        .map(|gene| {
            let outcome = aggregator.resolve(gene);
            metrics.record_gene(&outcome, split_by_source);
            outcome
        })
        .collect();
    (outcomes, metrics)
}

struct WorkItem {
    idx: usize,
    gene: GeneBins,
}

struct ResultItem {
    idx: usize,
    outcome: GeneOutcome,
}

/// Genes are independent: workers pull them from a shared queue, keep their
/// own partial metrics, and the outcomes are put back in gene order.
fn resolve_parallel(
    genes: Vec<GeneBins>,
    aggregator: &GeneAggregator<'_>,
    split_by_source: bool,
    worker_count: usize,
) -> Result<(Vec<GeneOutcome>, ConsensusMetrics)> {
    crossfire::detect_backoff_cfg();
    let cap = worker_count.saturating_mul(4).max(8);
    let (tx_work, rx_work) = mpmc::bounded_blocking::<WorkItem>(cap);
    let (tx_res, rx_res) = mpmc::unbounded_blocking::<ResultItem>();
    let total = genes.len();

    thread::scope(|scope| -> Result<(Vec<GeneOutcome>, ConsensusMetrics)> {
        let mut handles = Vec::with_capacity(worker_count);
        for _ in 0..worker_count {
            let rx_work = rx_work.clone();
            let tx_res = tx_res.clone();
            handles.push(scope.spawn(move || {
                let mut partial = ConsensusMetrics::default();
                while let Ok(item) = rx_work.recv() {
                    let outcome = aggregator.resolve(&item.gene);
                    partial.record_gene(&outcome, split_by_source);
                    if tx_res.send(ResultItem { idx: item.idx, outcome }).is_err() {
                        break;
                    }
                }
                partial
            }));
        }
        drop(rx_work);
        drop(tx_res);

        for (idx, gene) in genes.into_iter().enumerate() {
            tx_work
                .send(WorkItem { idx, gene })
                .map_err(|_| anyhow!("gene work channel closed"))?;
        }
        drop(tx_work);

        let mut pending: BTreeMap<usize, GeneOutcome> = BTreeMap::new();
        while pending.len() < total {
            let res = rx_res
                .recv()
                .map_err(|_| anyhow!("worker result channel closed"))?;
            pending.insert(res.idx, res.outcome);
        }

        let mut metrics = ConsensusMetrics::default();
        for handle in handles {
            let partial = handle
                .join()
                .map_err(|_| anyhow!("consensus worker panicked"))?;
            metrics.merge(&partial);
        }

        Ok((pending.into_values().collect(), metrics))
    })
}
