mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use consensus_rs::alignment::Origin;
use consensus_rs::annotation::load_transcripts;
use consensus_rs::g2t::build_g2t;
use consensus_rs::output::{write_gtf, write_summary};
use consensus_rs::stats::{attach_stats, load_stats};
use consensus_rs::{ConsensusConfig, ConsensusRun};
use mimalloc::MiMalloc;
use std::fs::{self, File};
use std::io::BufWriter;
use tracing_subscriber::EnvFilter;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> Result<()> {
    let args = cli::Args::parse();

    // Initialize tracing subscriber
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| {
            if args.quiet {
                EnvFilter::new("warn")
            } else {
                EnvFilter::new("info")
            }
        });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();

    let config = ConsensusConfig {
        coverage_cutoff: args.coverage_cutoff,
        rescue_coverage_cutoff: args.rescue_coverage,
        rescue_identity_cutoff: args.rescue_identity,
        short_percentage: args.short_percentage,
        rescue_origin: match args.rescue_origin {
            cli::RescueOrigin::Any => None,
            cli::RescueOrigin::Primary => Some(Origin::Primary),
            cli::RescueOrigin::Alternate => Some(Origin::Alternate),
        },
        alternate_biotypes: args.alternate_biotypes.clone(),
        filter_chroms: args.filter_chroms.clone(),
        threads: usize::from(args.threads.max(1)),
    };

    let reference = build_g2t(&load_transcripts(&args.reference)?);
    tracing::info!(
        genes = reference.num_genes(),
        transcripts = reference.num_transcripts(),
        "reference loaded"
    );

    let stats = load_stats(&args.stats)?;
    let mut models = load_transcripts(&args.primary)?;
    if let Some(path) = &args.alternate {
        models.extend(load_transcripts(path)?);
    }
    let records = attach_stats(&models, &stats)?;

    let run = ConsensusRun::new(&reference, records, config)?;
    let biotypes: Vec<String> = if args.biotypes.is_empty() {
        reference.biotypes().into_iter().map(str::to_string).collect()
    } else {
        args.biotypes.clone()
    };
    let results = run.resolve_all(&biotypes)?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;
    for result in &results {
        let path = args.out_dir.join(format!("{}.consensus.gtf", result.biotype));
        let mut writer = BufWriter::new(File::create(&path)?);
        write_gtf(&mut writer, result, run.candidates())?;
    }
    let summary = args.out_dir.join("consensus_summary.json");
    write_summary(BufWriter::new(File::create(&summary)?), &results)?;

    tracing::info!(
        biotypes = results.len(),
        consensus = results.iter().map(|r| r.consensus.len()).sum::<usize>(),
        "consensus-rs: processing complete"
    );
    Ok(())
}
