use crate::alignment::{ExonStructure, Interval};
use anyhow::{anyhow, Result};
use crate::types::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Attribute keys consulted, in order, for a transcript's biotype.
const BIOTYPE_KEYS: [&[u8]; 5] = [
    b"transcript_type",
    b"transcript_biotype",
    b"gene_type",
    b"gene_biotype",
    b"biotype",
];

const UNKNOWN_BIOTYPE: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Gtf,
    Gff3,
}

#[derive(Debug, Clone)]
pub struct Exon {
    pub start: u32,
    pub end: u32,
}

/// A transcript model read from GTF/GFF3. For candidate annotations `id` is
/// the alignment id.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub id: String,
    pub gene_id: String,
    pub biotype: String,
    pub seqname: String,
    pub strand: char,
    pub exons: Vec<Exon>,
}

impl Transcript {
    /// Genomic span from the first exon start to the last exon end.
    pub fn span(&self) -> u32 {
        let start = self.exons.iter().map(|e| e.start).min().unwrap_or(0);
        let end = self.exons.iter().map(|e| e.end).max().unwrap_or(0);
        end.saturating_sub(start)
    }

    pub fn exon_structure(&self) -> ExonStructure {
        ExonStructure::new(
            self.exons
                .iter()
                .map(|e| Interval::new(self.seqname.clone(), self.strand, e.start, e.end))
                .collect(),
        )
    }
}

pub fn detect_format(path: &Path) -> Result<InputFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "gtf" => Ok(InputFormat::Gtf),
        "gff" | "gff3" => Ok(InputFormat::Gff3),
        _ => Err(anyhow!(
            "unable to detect annotation format from extension: .{}",
            ext
        )),
    }
}

/// Load transcript and exon features from GTF/GFF3, in file order.
///
/// GTF/GFF are 1-based inclusive; intervals are stored 1-based half-open
/// `[start, end + 1)` so that `end - start` is the length.
pub fn load_transcripts(path: &Path) -> Result<Vec<Transcript>> {
    let transcripts = match detect_format(path)? {
        InputFormat::Gtf => load_gtf(path)?,
        InputFormat::Gff3 => load_gff3(path)?,
    };
    tracing::debug!(
        path = %path.display(),
        transcripts = transcripts.len(),
        "loaded annotation"
    );
    Ok(transcripts)
}

/// Transcripts keyed by id, remembering first-seen order.
#[derive(Default)]
struct TranscriptTable {
    order: Vec<String>,
    by_id: HashMap<String, Transcript>,
}

impl TranscriptTable {
    fn entry(&mut self, id: &str, seqname: &str, strand: char) -> &mut Transcript {
        if !self.by_id.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.by_id.entry(id.to_string()).or_insert_with(|| Transcript {
            id: id.to_string(),
            gene_id: String::new(),
            biotype: UNKNOWN_BIOTYPE.to_string(),
            seqname: seqname.to_string(),
            strand,
            exons: Vec::new(),
        })
    }

    fn into_vec(mut self) -> Vec<Transcript> {
        self.order
            .iter()
            .filter_map(|id| self.by_id.remove(id))
            .collect()
    }
}

fn load_gtf(path: &Path) -> Result<Vec<Transcript>> {
    let reader = File::open(path)?;
    let mut reader = noodles::gtf::io::Reader::new(BufReader::new(reader));

    let mut table = TranscriptTable::default();

    for result in reader.record_bufs() {
        let record = result?;

        let feature_type: &[u8] = record.ty().as_ref();
        if feature_type != b"transcript" && feature_type != b"exon" {
            continue;
        }

        let seqname = record.reference_sequence_name().to_string();
        let strand = strand_to_char(record.strand());
        let (start, end) = half_open(record.start().get(), record.end().get(), "GTF")?;

        let attrs = record.attributes();
        let transcript_id = get_record_buf_attribute(attrs, b"transcript_id")
            .ok_or_else(|| anyhow!("missing transcript_id in GTF attributes"))?;
        let gene_id = get_record_buf_attribute(attrs, b"gene_id")
            .ok_or_else(|| anyhow!("missing gene_id for {transcript_id} in GTF attributes"))?;

        let entry = table.entry(&transcript_id, &seqname, strand);
        entry.gene_id = gene_id;
        if let Some(biotype) = biotype_of(attrs) {
            entry.biotype = biotype;
        }
        if feature_type == b"exon" {
            entry.exons.push(Exon { start, end });
        }
    }

    Ok(table.into_vec())
}

fn load_gff3(path: &Path) -> Result<Vec<Transcript>> {
    let reader = File::open(path)?;
    let mut reader = noodles::gff::io::Reader::new(BufReader::new(reader));

    let mut table = TranscriptTable::default();

    for result in reader.record_bufs() {
        let record = result?;

        let feature_type: &[u8] = record.ty().as_ref();
        let is_transcript = feature_type == b"transcript" || feature_type == b"mRNA";
        if !is_transcript && feature_type != b"exon" {
            continue;
        }

        let seqname = record.reference_sequence_name().to_string();
        let strand = strand_to_char(record.strand());
        let (start, end) = half_open(record.start().get(), record.end().get(), "GFF3")?;

        let attrs = record.attributes();
        let transcript_id = if is_transcript {
            get_record_buf_attribute(attrs, b"ID")
        } else {
            get_record_buf_attribute(attrs, b"Parent")
        }
        .ok_or_else(|| anyhow!("missing transcript id in GFF3 attributes"))?;

        let entry = table.entry(&transcript_id, &seqname, strand);
        if is_transcript {
            entry.gene_id = get_record_buf_attribute(attrs, b"Parent")
                .ok_or_else(|| anyhow!("transcript {transcript_id} has no Parent gene"))?;
            if let Some(biotype) = biotype_of(attrs) {
                entry.biotype = biotype;
            }
        } else {
            entry.exons.push(Exon { start, end });
        }
    }

    Ok(table.into_vec())
}

fn half_open(start_1: usize, end_1: usize, format: &str) -> Result<(u32, u32)> {
    let start = u32::try_from(start_1).map_err(|_| anyhow!("{format} start out of range"))?;
    let end = u32::try_from(end_1.saturating_add(1))
        .map_err(|_| anyhow!("{format} end out of range"))?;
    Ok((start, end))
}

fn biotype_of(attrs: &noodles::gff::feature::record_buf::Attributes) -> Option<String> {
    BIOTYPE_KEYS
        .iter()
        .find_map(|key| get_record_buf_attribute(attrs, key))
}

fn get_record_buf_attribute(
    attrs: &noodles::gff::feature::record_buf::Attributes,
    key: &[u8],
) -> Option<String> {
    let value = attrs.get(key)?;
    value.iter().next().map(|v| v.to_string())
}

fn strand_to_char(strand: noodles::gff::feature::record::Strand) -> char {
    use noodles::gff::feature::record::Strand;
    match strand {
        Strand::Forward => '+',
        Strand::Reverse => '-',
        Strand::None => '.',
        Strand::Unknown => '?',
    }
}
