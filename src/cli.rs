use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RescueOrigin {
    Any,
    Primary,
    Alternate,
}

#[derive(Parser, Debug)]
#[command(
    name = "consensus-rs",
    about = "Resolve competing transcript projections into a consensus gene set",
    version
)]
pub struct Args {
    /// Reference annotation with gene_id, transcript_id and biotype (GTF/GFF)
    #[arg(short = 'R', long = "reference", value_name = "GTF/GFF")]
    pub reference: PathBuf,

    /// Primary-origin candidate alignments (GTF/GFF)
    #[arg(short = 'P', long = "primary", value_name = "GTF/GFF")]
    pub primary: PathBuf,

    /// Alternate-origin candidate predictions (GTF/GFF, optional)
    #[arg(short = 'A', long = "alternate", value_name = "GTF/GFF")]
    pub alternate: Option<PathBuf>,

    /// Classifier table: alignment_id, coverage, identity, tier (TSV)
    #[arg(short = 'S', long = "stats", value_name = "TSV")]
    pub stats: PathBuf,

    /// Output directory for per-biotype GTFs and the summary report
    #[arg(short = 'o', long = "out-dir", value_name = "DIR")]
    pub out_dir: PathBuf,

    /// Biotypes to resolve (default: every biotype in the reference)
    #[arg(short = 'b', long = "biotype", value_name = "BIOTYPE")]
    pub biotypes: Vec<String>,

    /// Biotypes for which Alternate candidates compete with Primary ones
    #[arg(long = "alternate-biotype", value_name = "BIOTYPE", default_values_t = [String::from("protein_coding")])]
    pub alternate_biotypes: Vec<String>,

    /// Reference chromosomes to leave out
    #[arg(long = "filter-chrom", value_name = "CHROM", default_values_t = [String::from("Y"), String::from("chrY")])]
    pub filter_chroms: Vec<String>,

    /// Minimum coverage for a transcript representative
    #[arg(long, default_value_t = 80.0)]
    pub coverage_cutoff: f64,

    /// Minimum coverage for the per-gene rescue
    #[arg(long, default_value_t = 60.0)]
    pub rescue_coverage: f64,

    /// Minimum identity for the per-gene rescue
    #[arg(long, default_value_t = 80.0)]
    pub rescue_identity: f64,

    /// Percentage of the reference span below which a representative is short
    #[arg(long, default_value_t = 60.0)]
    pub short_percentage: f64,

    /// Candidate origin allowed in the per-gene rescue
    #[arg(long, value_enum, default_value_t = RescueOrigin::Any)]
    pub rescue_origin: RescueOrigin,

    /// Number of threads (CPUs) to use
    #[arg(short = 'p', long = "threads", default_value_t = 1)]
    pub threads: u8,

    /// Set logging level to WARN
    #[arg(short = 'q', long)]
    pub quiet: bool,
}
