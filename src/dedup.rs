use crate::alignment::{AlignmentRecord, ExonStructure};
use crate::candidates::CandidateSet;
use crate::types::{AlignmentId, HashMap, HashMapExt};
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deduplicated {
    /// Surviving alignment ids, in order of each structure's first appearance.
    pub ids: Vec<AlignmentId>,
    /// Number of structures that had more than one alignment.
    pub duplicate_groups: usize,
}

/// Collapse alignments with identical exon structure, keeping the one with
/// the greatest `(identity, coverage)`. Ids are expected to be unique; ids
/// missing from `candidates` are dropped.
pub fn deduplicate(ids: &[AlignmentId], candidates: &CandidateSet) -> Deduplicated {
    let mut groups: Vec<Vec<&AlignmentRecord>> = Vec::new();
    let mut index: HashMap<&ExonStructure, usize> = HashMap::new();

    for record in ids.iter().filter_map(|id| candidates.get(id)) {
        match index.get(&record.exons) {
            Some(&g) => groups[g].push(record),
            None => {
                index.insert(&record.exons, groups.len());
                groups.push(vec![record]);
            }
        }
    }

    let mut out = Deduplicated::default();
    for group in groups {
        if group.len() > 1 {
            out.duplicate_groups += 1;
        }
        let best = group
            .iter()
            .copied()
            .reduce(|best, r| match score_cmp(r, best) {
                Ordering::Greater => r,
                _ => best,
            });
        if let Some(best) = best {
            out.ids.push(best.id.clone());
        }
    }
    out
}

fn score_cmp(a: &AlignmentRecord, b: &AlignmentRecord) -> Ordering {
    a.identity
        .total_cmp(&b.identity)
        .then(a.coverage.total_cmp(&b.coverage))
}
