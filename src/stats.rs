//! Classifier output: per-alignment coverage, identity and tier.
//!
//! Tab-separated, one alignment per line:
//!
//! ```text
//! #alignment_id   coverage    identity    tier
//! ENST01.1-1      99.2        98.5        Excellent
//! augTM-ENST01.1-1    97.0    99.1        Pass
//! ```
//!
//! Lines starting with `#` are ignored. An empty metric column reads as 0.

use crate::alignment::{AlignmentRecord, Tier};
use crate::annotation::Transcript;
use crate::error::ConsensusError;
use crate::types::{HashMap, HashMapExt};
use anyhow::{anyhow, Context, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentStats {
    pub coverage: f64,
    pub identity: f64,
    pub tier: Tier,
}

pub type StatsTable = HashMap<String, AlignmentStats>;

pub fn load_stats(path: &Path) -> Result<StatsTable> {
    let file = File::open(path)
        .with_context(|| format!("failed to open classifier table {}", path.display()))?;
    parse_stats(BufReader::new(file))
        .with_context(|| format!("failed to parse classifier table {}", path.display()))
}

pub fn parse_stats<R: BufRead>(reader: R) -> Result<StatsTable> {
    let mut table = StatsTable::new();
    for (n, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 4 {
            return Err(anyhow!(
                "line {}: expected 4 tab-separated fields, found {}",
                n + 1,
                fields.len()
            ));
        }
        let stats = AlignmentStats {
            coverage: parse_metric(fields[1]).with_context(|| format!("line {}", n + 1))?,
            identity: parse_metric(fields[2]).with_context(|| format!("line {}", n + 1))?,
            tier: fields[3]
                .trim()
                .parse()
                .map_err(|e: String| anyhow!("line {}: {e}", n + 1))?,
        };
        table.insert(fields[0].trim().to_string(), stats);
    }
    Ok(table)
}

fn parse_metric(field: &str) -> Result<f64> {
    let field = field.trim();
    if field.is_empty() {
        return Ok(0.0);
    }
    field
        .parse::<f64>()
        .map_err(|e| anyhow!("invalid metric {field:?}: {e}"))
}

/// Join candidate transcript models (whose ids are alignment ids) with their
/// classifier rows.
pub fn attach_stats(
    models: &[Transcript],
    stats: &StatsTable,
) -> Result<Vec<AlignmentRecord>, ConsensusError> {
    models
        .iter()
        .map(|model| {
            let s = stats
                .get(&model.id)
                .ok_or_else(|| ConsensusError::MissingStats(model.id.clone()))?;
            Ok(AlignmentRecord::new(
                model.id.clone(),
                s.coverage,
                s.identity,
                s.tier,
                model.exon_structure(),
            ))
        })
        .collect()
}
