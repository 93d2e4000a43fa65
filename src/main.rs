use clap::{Args, Parser, Subcommand, ValueEnum};
use fundraising_advisor::assessment::StrategyAssessment;
use fundraising_advisor::config::AppConfig;
use fundraising_advisor::error::{AppError, OutputError};
use fundraising_advisor::recommend::RecommendationMode;
use fundraising_advisor::report::RecommendationReport;
use fundraising_advisor::similarity::{group_by_donor_category, DEFAULT_SIMILARITY_THRESHOLD};
use fundraising_advisor::telemetry;
use fundraising_advisor::{AnswerSet, NgoProfile, RecommendationEngine, StrategyCatalog};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "fundraising-advisor",
    about = "Recommend fundraising strategies for a nonprofit from its questionnaire answers",
    version
)]
struct Cli {
    /// Strategy catalog JSON to use instead of the built-in catalog
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank strategies for an organization
    Recommend(RecommendArgs),
    /// Show the derived organization profile
    Profile(AnswerArgs),
    /// Score every catalog strategy in detail
    Assess(AssessArgs),
    /// List the strategy catalog (default command)
    Strategies(StrategiesArgs),
    /// Find strategies similar to one catalog strategy
    Similar(SimilarArgs),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl OutputFormat {
    const fn label(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

#[derive(Args, Debug)]
struct AnswerArgs {
    /// Answers JSON file, or `-` for stdin
    #[arg(long)]
    answers: PathBuf,
    /// Reference year for organization age (defaults to the configured or current year)
    #[arg(long)]
    year: Option<i32>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct RecommendArgs {
    #[command(flatten)]
    input: AnswerArgs,
    /// scoring, rule, collaborative or combined
    #[arg(long, value_parser = parse_mode)]
    mode: Option<RecommendationMode>,
    /// Number of recommendations to report
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    top: Option<u16>,
}

#[derive(Args, Debug)]
struct AssessArgs {
    #[command(flatten)]
    input: AnswerArgs,
    /// Only show the best N assessments
    #[arg(long)]
    top: Option<usize>,
}

#[derive(Args, Debug)]
struct StrategiesArgs {
    /// Group strategies by donor category
    #[arg(long)]
    group: bool,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Args, Debug)]
struct SimilarArgs {
    /// Catalog id of the anchor strategy
    strategy: String,
    #[arg(long, default_value_t = DEFAULT_SIMILARITY_THRESHOLD)]
    threshold: f64,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Debug, Serialize)]
struct AssessmentRow<'a> {
    id: &'a str,
    score: u8,
    risk_level: &'static str,
    risk_score: u8,
    compliance_score: u8,
    network: f64,
    stage: f64,
    resources: f64,
    location: i32,
    funding: f64,
}

impl<'a> From<&'a StrategyAssessment> for AssessmentRow<'a> {
    fn from(assessment: &'a StrategyAssessment) -> Self {
        Self {
            id: assessment.strategy_id.as_str(),
            score: assessment.score,
            risk_level: assessment.risk.level.label(),
            risk_score: assessment.risk.score,
            compliance_score: assessment.compliance.score,
            network: assessment.breakdown.network,
            stage: assessment.breakdown.stage,
            resources: assessment.breakdown.resources,
            location: assessment.breakdown.location,
            funding: assessment.breakdown.funding,
        }
    }
}

#[derive(Debug, Serialize)]
struct SimilarEntry<'a> {
    id: &'a str,
    name: &'a str,
    score: f64,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let mut engine = RecommendationEngine::new(config.engine);
    if let Some(path) = &cli.catalog {
        engine = engine.with_catalog(load_catalog(path)?);
    }

    let command = cli.command.unwrap_or(Command::Strategies(StrategiesArgs {
        group: false,
        format: OutputFormat::Text,
    }));

    match command {
        Command::Recommend(args) => run_recommend(engine, args),
        Command::Profile(args) => run_profile(&engine, args),
        Command::Assess(args) => run_assess(&engine, args),
        Command::Strategies(args) => run_strategies(engine.catalog(), args),
        Command::Similar(args) => run_similar(&engine, args),
    }
}

fn parse_mode(raw: &str) -> Result<RecommendationMode, String> {
    raw.parse::<RecommendationMode>()
        .map_err(|err| err.to_string())
}

fn load_catalog(path: &Path) -> Result<StrategyCatalog, AppError> {
    let file = File::open(path)?;
    let catalog = StrategyCatalog::from_reader(BufReader::new(file))?;
    info!(path = %path.display(), strategies = catalog.len(), "loaded strategy catalog");
    Ok(catalog)
}

fn load_answers(path: &Path) -> Result<AnswerSet, AppError> {
    let answers = if path == Path::new("-") {
        AnswerSet::from_reader(io::stdin().lock())?
    } else {
        AnswerSet::from_reader(BufReader::new(File::open(path)?))?
    };
    Ok(answers)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn unsupported(command: &'static str, format: OutputFormat) -> AppError {
    AppError::Output(OutputError::Unsupported {
        command,
        format: format.label(),
    })
}

fn run_recommend(engine: RecommendationEngine, args: RecommendArgs) -> Result<(), AppError> {
    let RecommendArgs { input, mode, top } = args;
    let answers = load_answers(&input.answers)?;

    let engine = match top {
        Some(top) => engine.with_top_n(usize::from(top)),
        None => engine,
    };
    let mode = mode.unwrap_or(engine.config().default_mode);

    let year = input.year.unwrap_or_else(|| engine.reference_year());
    let report = engine.recommend_for_year(&answers, mode, year);

    match input.format {
        OutputFormat::Text => render_report(&report),
        OutputFormat::Json => print_json(&report)?,
        OutputFormat::Csv => report.write_csv(io::stdout().lock())?,
    }
    Ok(())
}

fn run_profile(engine: &RecommendationEngine, args: AnswerArgs) -> Result<(), AppError> {
    let answers = load_answers(&args.answers)?;
    let year = args.year.unwrap_or_else(|| engine.reference_year());
    let profile = engine.profile(&answers, year);

    match args.format {
        OutputFormat::Text => render_profile(&profile),
        OutputFormat::Json => print_json(&profile)?,
        OutputFormat::Csv => return Err(unsupported("profile", args.format)),
    }
    Ok(())
}

fn run_assess(engine: &RecommendationEngine, args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs { input, top } = args;
    let answers = load_answers(&input.answers)?;
    let year = input.year.unwrap_or_else(|| engine.reference_year());

    let mut assessments = engine.assess(&answers, year);
    if let Some(top) = top {
        assessments.truncate(top);
    }

    match input.format {
        OutputFormat::Text => {
            println!("Strategy assessment ({} strategies)", assessments.len());
            for assessment in &assessments {
                println!(
                    "- {:<20} score {:>3}  risk {} ({}/20)  compliance {}/10",
                    assessment.strategy_id.as_str(),
                    assessment.score,
                    assessment.risk.level.label(),
                    assessment.risk.score,
                    assessment.compliance.score
                );
                for insight in &assessment.risk.insights {
                    println!("    * {insight}");
                }
                for insight in &assessment.foreign_insights {
                    println!("    * {insight}");
                }
            }
        }
        OutputFormat::Json => print_json(&assessments)?,
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(io::stdout().lock());
            for assessment in &assessments {
                writer.serialize(AssessmentRow::from(assessment))?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn run_strategies(catalog: &StrategyCatalog, args: StrategiesArgs) -> Result<(), AppError> {
    match (args.format, args.group) {
        (OutputFormat::Text, false) => {
            for strategy in catalog {
                println!(
                    "{:<20} {:<40} {}",
                    strategy.id.as_str(),
                    strategy.name,
                    strategy.donor_category.label()
                );
            }
        }
        (OutputFormat::Text, true) => {
            for (category, strategies) in group_by_donor_category(catalog) {
                println!("{} ({})", category.label(), strategies.len());
                for strategy in strategies {
                    println!("  - {} ({})", strategy.name, strategy.id);
                }
            }
        }
        (OutputFormat::Json, false) => println!("{}", catalog.to_json_pretty()?),
        (OutputFormat::Json, true) => {
            let grouped: BTreeMap<&'static str, Vec<&str>> = group_by_donor_category(catalog)
                .into_iter()
                .map(|(category, strategies)| {
                    (
                        category.key(),
                        strategies
                            .into_iter()
                            .map(|strategy| strategy.id.as_str())
                            .collect(),
                    )
                })
                .collect();
            print_json(&grouped)?;
        }
        (OutputFormat::Csv, _) => return Err(unsupported("strategies", args.format)),
    }
    Ok(())
}

fn run_similar(engine: &RecommendationEngine, args: SimilarArgs) -> Result<(), AppError> {
    let similar = engine.similar(&args.strategy, args.threshold);
    let entries: Vec<SimilarEntry<'_>> = similar
        .iter()
        .map(|entry| SimilarEntry {
            id: entry.strategy.id.as_str(),
            name: &entry.strategy.name,
            score: entry.score,
        })
        .collect();

    match args.format {
        OutputFormat::Text => {
            if !engine.catalog().contains(&args.strategy) {
                println!("Unknown strategy '{}'", args.strategy);
                return Ok(());
            }
            println!(
                "Strategies similar to {} (threshold {:.2})",
                args.strategy, args.threshold
            );
            for entry in &entries {
                println!("- {:<20} {:.2}  {}", entry.id, entry.score, entry.name);
            }
        }
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(io::stdout().lock());
            for entry in &entries {
                writer.serialize(entry)?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}

fn render_profile(profile: &NgoProfile) {
    println!("Organization profile (reference year {})", profile.reference_year);
    println!(
        "Stage: {} ({} years), size: {}",
        profile.maturity.label(),
        profile.age_years,
        profile.size.label()
    );
    println!(
        "Budget: {} local (~{:.0} USD), staff: {}",
        profile.budget, profile.budget_usd, profile.staff
    );
    println!(
        "Capacity: digital {}/8, volunteer {}/10, event {}/10, fundraising {}/12",
        profile.digital_capacity,
        profile.volunteer_capacity,
        profile.event_capacity,
        profile.fundraising_capacity
    );
    println!(
        "Networks: corporate {}, individual {}, foundation {}",
        profile.networks.corporate, profile.networks.individual, profile.networks.foundation
    );
    if profile.compliance_status.is_empty() {
        println!("Compliance: none reported");
    } else {
        println!("Compliance: {}", profile.compliance_status.join(", "));
    }
    println!(
        "Foreign funding: {}",
        profile.foreign_funding.access_level.label()
    );
}

fn render_report(report: &RecommendationReport) {
    println!(
        "Fundraising recommendations ({}) for a {} / {} organization",
        report.mode_label, report.profile.maturity_label, report.profile.size_label
    );

    if report.is_empty() {
        println!("No strategies are currently suitable for this organization.");
        return;
    }

    for record in &report.records {
        println!();
        println!(
            "{}. {} [{}] score {}, confidence {} ({:.2})",
            record.rank,
            record.name,
            record.donor_category_label,
            record.score,
            record.confidence_label,
            record.confidence
        );
        println!(
            "   {} | {} | {} | {}",
            record.descriptors.timeline_context,
            record.descriptors.implementation_phase,
            record.descriptors.trend,
            record.descriptors.funding_range
        );
        println!(
            "   Risk: {} ({}/20), compliance readiness {}/10",
            record.risk.level.label(),
            record.risk.score,
            record.compliance.score
        );
        for highlight in &record.highlights {
            println!("   + {highlight}");
        }
        for insight in record.risk.insights.iter().chain(&record.foreign_insights) {
            println!("   * {insight}");
        }
        if record.rank > 1 && !record.similarity.synergies.is_empty() {
            println!(
                "   Synergies with {}: {}",
                record.similarity.primary_strategy,
                record.similarity.synergies.join("; ")
            );
        }
    }
}
