use std::fmt;
use std::str::FromStr;

/// Prefix carried by every Alternate-origin alignment id (`aug<mode>-<tx>-<n>`).
///
/// Lowercase letters sort after the uppercase accession prefixes used for
/// Primary ids, which is what makes exact ties fall to Alternate candidates.
pub const ALTERNATE_PREFIX: &str = "aug";

/// Which pipeline produced a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Origin {
    /// Cross-genome projection of the source transcript.
    Primary,
    /// Independent model-based prediction seeded by the source transcript.
    Alternate,
}

impl Origin {
    /// Origin encoded in an alignment id.
    pub fn of_id(alignment_id: &str) -> Self {
        if alignment_id.starts_with(ALTERNATE_PREFIX) {
            Self::Alternate
        } else {
            Self::Primary
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "Primary"),
            Self::Alternate => write!(f, "Alternate"),
        }
    }
}

/// Quality classification. Variant order is rank order: `Excellent` is greatest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    NoData,
    Fail,
    Pass,
    Excellent,
}

impl Tier {
    /// Classified tiers from best to worst.
    pub const RANKED: [Tier; 3] = [Tier::Excellent, Tier::Pass, Tier::Fail];

    /// Excellent or Pass.
    pub fn is_passing(self) -> bool {
        matches!(self, Self::Excellent | Self::Pass)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoData => write!(f, "NoData"),
            Self::Fail => write!(f, "Fail"),
            Self::Pass => write!(f, "Pass"),
            Self::Excellent => write!(f, "Excellent"),
        }
    }
}

/// Parses classifier verdicts: Excellent, Pass or Fail, in any case.
/// `NoData` is an outcome, never a verdict, so it does not parse.
impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "excellent" => Ok(Self::Excellent),
            "pass" => Ok(Self::Pass),
            "fail" => Ok(Self::Fail),
            _ => Err(format!("unrecognized tier: {s}")),
        }
    }
}

/// One exon of an alignment, 1-based half-open `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Interval {
    pub chrom: String,
    pub strand: char,
    pub start: u32,
    pub end: u32,
}

impl Interval {
    pub fn new(chrom: impl Into<String>, strand: char, start: u32, end: u32) -> Self {
        Self {
            chrom: chrom.into(),
            strand,
            start,
            end,
        }
    }
}

/// Exon intervals of an alignment, normalised to a sorted set.
///
/// Two structures compare equal iff they hold the same intervals, whatever
/// order they were supplied in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ExonStructure(Vec<Interval>);

impl ExonStructure {
    pub fn new(mut intervals: Vec<Interval>) -> Self {
        intervals.sort();
        intervals.dedup();
        Self(intervals)
    }

    pub fn intervals(&self) -> &[Interval] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bases between the first exon start and the last exon end.
    pub fn span(&self) -> u32 {
        let start = self.0.iter().map(|iv| iv.start).min().unwrap_or(0);
        let end = self.0.iter().map(|iv| iv.end).max().unwrap_or(0);
        end.saturating_sub(start)
    }
}

/// A candidate alignment of a source transcript, already classified.
#[derive(Debug, Clone)]
pub struct AlignmentRecord {
    pub id: String,
    pub source_transcript_id: String,
    pub origin: Origin,
    pub coverage: f64,
    pub identity: f64,
    pub genomic_span: u32,
    pub exons: ExonStructure,
    pub tier: Tier,
}

impl AlignmentRecord {
    /// Build a record; origin, source transcript and span are derived from
    /// the id and exons.
    pub fn new(
        id: impl Into<String>,
        coverage: f64,
        identity: f64,
        tier: Tier,
        exons: ExonStructure,
    ) -> Self {
        let id = id.into();
        Self {
            source_transcript_id: source_transcript_of(&id).to_string(),
            origin: Origin::of_id(&id),
            coverage,
            identity,
            genomic_span: exons.span(),
            exons,
            tier,
            id,
        }
    }
}

/// Typed accessor for the ranking metrics of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Coverage,
    Identity,
}

impl Metric {
    pub fn of(self, record: &AlignmentRecord) -> f64 {
        match self {
            Self::Coverage => record.coverage,
            Self::Identity => record.identity,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Coverage => write!(f, "coverage"),
            Self::Identity => write!(f, "identity"),
        }
    }
}

/// Source transcript id encoded in an alignment id.
///
/// `ENST01.2-1` -> `ENST01.2`, `augTM-ENST01.2-3` -> `ENST01.2`.
pub fn source_transcript_of(alignment_id: &str) -> &str {
    let mut id = alignment_id;
    if id.starts_with(ALTERNATE_PREFIX)
        && let Some((_, rest)) = id.split_once('-')
    {
        id = rest;
    }
    match id.rsplit_once('-') {
        Some((head, n)) if !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) => head,
        _ => id,
    }
}

/// Round to 6 decimal places so that float noise cannot split a tie.
pub(crate) fn round6(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}
