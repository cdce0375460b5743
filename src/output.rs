use crate::alignment::Tier;
use crate::candidates::CandidateSet;
use crate::gene::RescueOutcome;
use crate::metrics::ConsensusMetrics;
use crate::pipeline::ConsensusResult;
use crate::types::{HashMap, HashMapExt};
use anyhow::{anyhow, Result};
use std::collections::BTreeMap;
use std::io::Write;

const SOURCE: &str = "consensus";

/// Gene and reported tier of every alignment in the consensus.
fn placements(result: &ConsensusResult) -> HashMap<&str, (&str, Tier)> {
    let mut placed = HashMap::new();
    for gene in &result.genes {
        for entry in gene.entries.iter().filter(|e| e.is_included()) {
            if let Some(id) = entry.chosen.as_deref() {
                placed.insert(id, (gene.gene_id.as_str(), entry.tier));
            }
        }
        if let RescueOutcome::Rescued(id) = &gene.rescue {
            placed
                .entry(id.as_str())
                .or_insert((gene.gene_id.as_str(), Tier::Fail));
        }
    }
    placed
}

/// Write the consensus set as GTF, sorted by chromosome then start.
///
/// `transcript_id` is the source transcript; the alignment id and tier travel
/// as extra attributes.
pub fn write_gtf<W: Write>(
    writer: &mut W,
    result: &ConsensusResult,
    candidates: &CandidateSet,
) -> Result<()> {
    let placed = placements(result);
    let mut records = result
        .consensus
        .iter()
        .map(|id| {
            candidates
                .get(id)
                .ok_or_else(|| anyhow!("consensus alignment {id} has no record"))
        })
        .collect::<Result<Vec<_>>>()?;
    records.sort_by(|a, b| {
        let ka = a.exons.intervals().first().map(|iv| (&iv.chrom, iv.start));
        let kb = b.exons.intervals().first().map(|iv| (&iv.chrom, iv.start));
        ka.cmp(&kb).then_with(|| a.id.cmp(&b.id))
    });

    for record in records {
        let (gene_id, tier) = placed
            .get(record.id.as_str())
            .copied()
            .ok_or_else(|| anyhow!("consensus alignment {} has no gene", record.id))?;
        let exons = record.exons.intervals();
        let (Some(first), Some(last)) = (exons.first(), exons.last()) else {
            continue;
        };
        let attrs = format!(
            "gene_id \"{gene_id}\"; transcript_id \"{}\"; alignment_id \"{}\"; tier \"{tier}\";",
            record.source_transcript_id, record.id
        );
        let end = exons.iter().map(|iv| iv.end).max().unwrap_or(last.end);
        writeln!(
            writer,
            "{}\t{SOURCE}\ttranscript\t{}\t{}\t.\t{}\t.\t{attrs}",
            first.chrom,
            first.start,
            end.saturating_sub(1),
            first.strand
        )?;
        for (n, exon) in exons.iter().enumerate() {
            writeln!(
                writer,
                "{}\t{SOURCE}\texon\t{}\t{}\t.\t{}\t.\t{attrs} exon_number \"{}\";",
                exon.chrom,
                exon.start,
                exon.end.saturating_sub(1),
                exon.strand,
                n + 1
            )?;
        }
    }
    Ok(())
}

/// Summary report for all biotypes, as pretty-printed JSON keyed by biotype.
pub fn write_summary<W: Write>(writer: W, results: &[ConsensusResult]) -> Result<()> {
    let report: BTreeMap<&str, &ConsensusMetrics> = results
        .iter()
        .map(|r| (r.biotype.as_str(), &r.metrics))
        .collect();
    serde_json::to_writer_pretty(writer, &report)?;
    Ok(())
}
