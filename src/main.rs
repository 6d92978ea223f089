//! Pension Projection CLI
//!
//! Command-line interface for corpus projections, contribution targets,
//! profile comparisons and tax benefits

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pension_projection::format::{format_inr, format_percent};
use pension_projection::{
    calculate_tax_benefit, ContributionSolver, CorpusProjector, ProjectionConfig,
    ProjectionRequest, RuleSet, ScenarioComparator, TargetRequest, TimelineStep, Validator,
};

#[derive(Debug, Parser)]
#[command(name = "pension_projection")]
#[command(about = "Retirement corpus projections for defined-contribution pensions")]
struct Cli {
    /// Directory holding regulatory.csv and risk_profiles.csv (built-in rules if omitted)
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Project the corpus and pension for a monthly contribution
    Project {
        #[arg(long)]
        contribution: f64,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        retire: Option<u32>,
        #[arg(long)]
        profile: Option<String>,
        /// Report the corpus in today's money as well
        #[arg(long)]
        inflation_adjusted: bool,
        /// Write the yearly timeline to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Monthly contribution needed to reach a target corpus
    Optimize {
        #[arg(long)]
        target: f64,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        retire: Option<u32>,
        #[arg(long)]
        profile: Option<String>,
    },
    /// Compare all risk profiles for the same contribution
    Compare {
        #[arg(long)]
        contribution: f64,
        #[arg(long)]
        age: u32,
        #[arg(long)]
        retire: Option<u32>,
    },
    /// Tax saved by a year of contributions
    Tax {
        #[arg(long)]
        annual: f64,
        #[arg(long, default_value_t = 0.30)]
        bracket: f64,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let rules = match &cli.rules {
        Some(dir) => RuleSet::from_csv_path(dir)?,
        None => RuleSet::default_rules(),
    };
    let config = ProjectionConfig::starting_this_year();

    match cli.command {
        Command::Project { contribution, age, retire, profile, inflation_adjusted, csv } => {
            let request = ProjectionRequest {
                monthly_contribution: Some(contribution),
                current_age: age,
                retirement_age: retire,
                risk_profile: profile,
                inflation_adjusted,
            };
            run_project(&rules, config, &request, csv)
        }
        Command::Optimize { target, age, retire, profile } => {
            let request = TargetRequest {
                target_corpus: target,
                current_age: age,
                retirement_age: retire,
                risk_profile: profile,
            };
            run_optimize(&rules, config, &request)
        }
        Command::Compare { contribution, age, retire } => {
            let mut request = ProjectionRequest::new(contribution, age);
            request.retirement_age = retire;
            run_compare(&rules, config, &request)
        }
        Command::Tax { annual, bracket } => {
            let result = calculate_tax_benefit(&rules.regulatory, annual, bracket);
            println!("Tax Benefit ({} bracket):", format_percent(bracket));
            println!("  Annual contribution:   {}", format_inr(result.annual_contribution));
            println!("  Primary deduction:     {}", format_inr(result.primary_deduction));
            println!("  Additional deduction:  {}", format_inr(result.supplementary_deduction));
            println!("  Total deduction:       {}", format_inr(result.total_deduction));
            println!("  Tax saved:             {}", format_inr(result.tax_saved.round()));
            println!("  Effective cost:        {}", format_inr(result.effective_cost.round()));
            Ok(())
        }
    }
}

fn run_project(
    rules: &RuleSet,
    config: ProjectionConfig,
    request: &ProjectionRequest,
    csv: Option<PathBuf>,
) -> Result<()> {
    let validated = Validator::new(&rules.regulatory).validate(request)?;
    let result = CorpusProjector::new(rules, config).project(&validated)?;
    let span = validated.span();

    println!("Projection: ₹{}/month, age {} to {} ({} years), {} at {}",
        validated.monthly_contribution(),
        span.current_age(),
        span.retirement_age(),
        span.years(),
        validated.risk_profile().label(),
        format_percent(result.annual_return_rate),
    );
    println!();
    println!("  Total corpus:      {}", format_inr(result.total_corpus.round()));
    println!("  Total contributed: {}", format_inr(result.total_contributed.round()));
    println!("  Wealth gained:     {}", format_inr(result.wealth_gained.round()));
    if let Some(real) = result.real_corpus {
        println!("  Real corpus:       {} (today's money)", format_inr(real.round()));
    }
    println!("  Growth multiplier: {:.2}x", result.growth_multiplier);
    println!("  Annuity corpus:    {}", format_inr(result.annuity_corpus.round()));
    println!("  Lump sum:          {}", format_inr(result.lump_sum.round()));
    println!("  Monthly pension:   {}", format_inr(result.monthly_pension.round()));
    println!();

    println!("{:>4} {:>5} {:>14} {:>14} {:>14}", "Age", "Year", "Corpus", "Contributed", "Gains");
    println!("{}", "-".repeat(55));
    for point in &result.timeline {
        println!("{:>4} {:>5} {:>14.0} {:>14.0} {:>14.0}",
            point.age, point.year, point.corpus, point.contributed, point.gains);
    }

    if let Some(path) = csv {
        let mut file = File::create(&path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        writeln!(file, "Age,Year,Corpus,Contributed,Gains")?;
        for point in &result.timeline {
            writeln!(file, "{},{},{:.0},{:.0},{:.0}",
                point.age, point.year, point.corpus, point.contributed, point.gains)?;
        }
        println!("\nTimeline written to: {}", path.display());
    }

    Ok(())
}

fn run_optimize(rules: &RuleSet, config: ProjectionConfig, request: &TargetRequest) -> Result<()> {
    let validated = Validator::new(&rules.regulatory).validate_target(request)?;
    let recommendation = ContributionSolver::new(rules).solve(&validated)?;
    let span = validated.span();

    println!("Target {} by age {} ({} years)",
        format_inr(validated.target_corpus()), span.retirement_age(), span.years());
    println!();
    println!("{:<14} {:>8} {:>14} {:>12}", "Profile", "Return", "Monthly", "Equity/Debt");
    println!("{}", "-".repeat(52));

    let entries = ScenarioComparator::new(rules, config)
        .compare_contributions(&validated)?;
    for entry in &entries {
        println!("{:<14} {:>8} {:>14} {:>5.0}/{:<6.0}",
            entry.label,
            format_percent(entry.annual_return_rate),
            format_inr(entry.outcome.required_monthly_contribution),
            entry.equity * 100.0,
            entry.debt * 100.0,
        );
    }

    println!();
    println!("Recommended ({}): {}/month",
        recommendation.risk_profile().label(),
        format_inr(recommendation.required_monthly_contribution));
    Ok(())
}

fn run_compare(rules: &RuleSet, config: ProjectionConfig, request: &ProjectionRequest) -> Result<()> {
    let validated = Validator::new(&rules.regulatory).validate(request)?;
    let config = config.with_step(TimelineStep::COARSE);
    let entries = ScenarioComparator::new(rules, config).compare_projections(&validated)?;

    println!("{:<14} {:>8} {:>14} {:>12} {:>14} {:>8}",
        "Profile", "Return", "Corpus", "Pension", "Lump sum", "Growth");
    println!("{}", "-".repeat(75));
    for entry in &entries {
        let r = &entry.outcome;
        println!("{:<14} {:>8} {:>14} {:>12} {:>14} {:>7.2}x",
            entry.label,
            format_percent(entry.annual_return_rate),
            format_inr(r.total_corpus.round()),
            format_inr(r.monthly_pension.round()),
            format_inr(r.lump_sum.round()),
            r.growth_multiplier,
        );
    }
    Ok(())
}
