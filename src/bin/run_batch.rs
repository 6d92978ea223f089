//! Run projections for every request in a batch CSV
//!
//! Each row is validated and projected independently; rows that fail are
//! reported by row number and the rest of the batch still runs.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use rayon::prelude::*;

use pension_projection::request::load_requests;
use pension_projection::{
    CorpusProjector, EngineError, ProjectionConfig, ProjectionRequest, ProjectionResult, RuleSet,
    Validator,
};

#[derive(Debug, Parser)]
#[command(name = "run_batch")]
#[command(about = "Project every request in a CSV file")]
struct Args {
    /// Input CSV (MonthlyContribution,CurrentAge[,RetirementAge,RiskProfile,InflationAdjusted])
    input: PathBuf,

    #[arg(short, long, default_value = "batch_projection_output.csv")]
    output: PathBuf,

    /// Directory holding regulatory.csv and risk_profiles.csv (built-in rules if omitted)
    #[arg(long)]
    rules: Option<PathBuf>,
}

fn project_one(
    validator: &Validator,
    projector: &CorpusProjector,
    request: &ProjectionRequest,
) -> Result<ProjectionResult, EngineError> {
    let validated = validator.validate(request)?;
    projector.project(&validated)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let start = Instant::now();
    let rules = match &args.rules {
        Some(dir) => RuleSet::from_csv_path(dir)?,
        None => RuleSet::default_rules(),
    };

    let rows = load_requests(&args.input)?;
    log::info!("Loaded {} rows from {}", rows.len(), args.input.display());

    let validator = Validator::new(&rules.regulatory);
    let projector = CorpusProjector::new(&rules, ProjectionConfig::starting_this_year());

    // Order of results matches order of rows
    let results: Vec<(usize, Result<ProjectionResult, String>)> = rows
        .par_iter()
        .map(|(row, parsed)| {
            let outcome = match parsed {
                Ok(request) => project_one(&validator, &projector, request).map_err(|e| e.to_string()),
                Err(e) => Err(format!("{:#}", e)),
            };
            (*row, outcome)
        })
        .collect();

    let mut file = File::create(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    writeln!(
        file,
        "Row,RiskProfile,Years,TotalCorpus,TotalContributed,WealthGained,RealCorpus,AnnuityCorpus,LumpSum,MonthlyPension,Error"
    )?;

    let mut failed = 0usize;
    let mut total_corpus = 0.0;
    for (row, result) in &results {
        match result {
            Ok(r) => {
                total_corpus += r.total_corpus;
                writeln!(
                    file,
                    "{},{},{},{:.0},{:.0},{:.0},{:.0},{:.0},{:.0},{:.0},",
                    row,
                    r.risk_profile(),
                    r.years(),
                    r.total_corpus,
                    r.total_contributed,
                    r.wealth_gained,
                    r.reported_real_corpus(),
                    r.annuity_corpus,
                    r.lump_sum,
                    r.monthly_pension,
                )?;
            }
            Err(e) => {
                failed += 1;
                log::warn!("Row {}: {}", row, e);
                writeln!(file, "{},,,,,,,,,,\"{}\"", row, e.replace('"', "'"))?;
            }
        }
    }

    let succeeded = results.len() - failed;
    println!("Projected {} of {} requests in {:?}", succeeded, results.len(), start.elapsed());
    if failed > 0 {
        println!("  {} rows rejected or unreadable (see Error column)", failed);
    }
    if succeeded > 0 {
        println!("  Average corpus: {:.0}", total_corpus / succeeded as f64);
    }
    println!("Output written to {}", args.output.display());

    Ok(())
}
