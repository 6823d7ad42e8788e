// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! `barback`: which ingredients make the most cocktails?
//!
//! Reads a CSV file of `cocktail,ingredient,ingredient,...` rows, searches for
//! the set of at most `--ingredients` ingredients that completes the largest
//! number of cocktails, and prints the result as a table, plain text or JSON.

use barback_bnb::{
    bnb::{BnbSolver, DEFAULT_MAX_SIZE, DEFAULT_SEARCH_BUDGET, SolverConfig},
    bound::BoundSet,
    branching::{amortized::MinAmortizedCostRule, random::SeededRandomRule, rule::BranchingRule},
    monitor::{
        composite::CompositeTreeSearchMonitor, log::LogTreeSearchMonitor,
        time_limit::TimeLimitMonitor,
    },
    result::{BnbSolverOutcome, TerminationReason},
};
use barback_model::{
    loading::{ItemLoader, ItemLoaderError},
    model::Model,
};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use std::{
    path::PathBuf,
    process::ExitCode,
    time::{Duration, Instant},
};

const TABLE_WIDTH: usize = 55;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Simple,
    Json,
}

/// Find the ingredient list that makes the most cocktails.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of ingredients to select
    #[arg(short, long, default_value_t = DEFAULT_MAX_SIZE)]
    ingredients: usize,

    /// Maximum number of search nodes to visit
    #[arg(short, long, default_value_t = DEFAULT_SEARCH_BUDGET)]
    max_calls: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// CSV file with one cocktail per row: name followed by its ingredients
    #[arg(long, default_value = "cocktails.csv")]
    input: PathBuf,

    /// Stop the search after this many seconds
    #[arg(long)]
    time_limit: Option<f64>,

    /// Branch on a random candidate drawn from this seed
    #[arg(long)]
    seed: Option<u64>,

    /// Also prune with the amortized cost bound
    #[arg(long)]
    extended_bounds: bool,

    /// Print search progress
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug)]
enum CliError {
    Load(ItemLoaderError),
    InvalidArgument(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Load(e) => write!(f, "failed to load cocktails: {}", e),
            CliError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Load(e) => Some(e),
            CliError::InvalidArgument(_) => None,
        }
    }
}

impl From<ItemLoaderError> for CliError {
    fn from(e: ItemLoaderError) -> Self {
        CliError::Load(e)
    }
}

#[derive(Debug, Serialize)]
struct Report<'m> {
    target_ingredients: usize,
    search_iterations: u64,
    execution_time_ms: f64,
    optimal: bool,
    termination: String,
    optimal_cocktails: usize,
    ingredients_used: usize,
    ingredients: Vec<&'m str>,
    cocktails: Vec<&'m str>,
}

impl<'m> Report<'m> {
    fn new(args: &Args, model: &'m Model, outcome: &BnbSolverOutcome, elapsed: Duration) -> Self {
        let solution = outcome.solution();
        let ingredients = solution.sorted_element_labels(model);
        let cocktails = solution.sorted_item_labels(model);
        Self {
            target_ingredients: args.ingredients,
            search_iterations: outcome.statistics().nodes_explored,
            execution_time_ms: elapsed.as_secs_f64() * 1000.0,
            optimal: outcome.is_optimal(),
            termination: outcome.termination_reason().to_string(),
            optimal_cocktails: cocktails.len(),
            ingredients_used: ingredients.len(),
            ingredients,
            cocktails,
        }
    }
}

fn solve(args: &Args, model: &Model) -> BnbSolverOutcome {
    let config = SolverConfig::new(args.ingredients).with_search_budget(args.max_calls);

    let mut monitor = CompositeTreeSearchMonitor::with_capacity(2);
    if let Some(secs) = args.time_limit {
        monitor.add_monitor(TimeLimitMonitor::with_default_check_interval(
            Duration::from_secs_f64(secs),
        ));
    }
    if args.verbose {
        monitor.add_monitor(LogTreeSearchMonitor::default());
    }

    let mut bounds = if args.extended_bounds {
        BoundSet::extended()
    } else {
        BoundSet::default()
    };
    let mut rule: Box<dyn BranchingRule> = match args.seed {
        Some(seed) => Box::new(SeededRandomRule::new(seed)),
        None => Box::new(MinAmortizedCostRule::new()),
    };

    let mut solver = BnbSolver::preallocated(model.num_items());
    let outcome = solver.solve(model, &config, rule.as_mut(), &mut bounds, monitor);
    if args.verbose {
        println!("{}", outcome.statistics());
    }
    outcome
}

fn print_table(report: &Report<'_>) {
    let border = "─".repeat(TABLE_WIDTH + 2);
    println!("\n┌{}┐", border);
    println!("│ {:^width$} │", "Cocktail Optimiser Results", width = TABLE_WIDTH);
    println!("├{}┤", border);
    for line in [
        format!("Target ingredients: {}", report.target_ingredients),
        format!("Search iterations: {}", report.search_iterations),
        format!("Execution time: {:.1}ms", report.execution_time_ms),
        format!("Termination: {}", report.termination),
        format!("Optimal cocktails: {}", report.optimal_cocktails),
        format!("Ingredients used: {}", report.ingredients_used),
    ] {
        println!("│ {:<width$} │", line, width = TABLE_WIDTH);
    }
    println!("└{}┘", border);

    println!("\nIngredient List ({}):", report.ingredients_used);
    for (i, ingredient) in report.ingredients.iter().enumerate() {
        println!("  {:2}. {}", i + 1, ingredient);
    }

    println!("\nPossible Cocktails ({}):", report.optimal_cocktails);
    for (i, cocktail) in report.cocktails.iter().enumerate() {
        println!("  {:2}. {}", i + 1, cocktail);
    }
}

fn print_simple(report: &Report<'_>) {
    println!("Target: {} ingredients", report.target_ingredients);
    println!("Iterations: {}", report.search_iterations);
    println!("Time: {:.1}ms", report.execution_time_ms);
    println!("Cocktails: {}", report.optimal_cocktails);
    println!("Ingredients: {}", report.ingredients_used);

    println!("\nIngredients:");
    for ingredient in &report.ingredients {
        println!("  {}", ingredient);
    }

    println!("\nCocktails:");
    for cocktail in &report.cocktails {
        println!("  {}", cocktail);
    }
}

fn print_json(report: &Report<'_>) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.ingredients == 0 {
        return Err(CliError::InvalidArgument("--ingredients must be at least 1".to_string()).into());
    }
    if let Some(secs) = args.time_limit
        && !(secs.is_finite() && secs > 0.0)
    {
        return Err(CliError::InvalidArgument(format!(
            "--time-limit must be a positive number of seconds, got {}",
            secs
        ))
        .into());
    }

    let model = ItemLoader::new()
        .from_path(&args.input)
        .map_err(CliError::from)?;

    if args.format != OutputFormat::Json {
        println!(
            "Optimizing for {} ingredients over {} cocktails with up to {} search iterations...",
            args.ingredients,
            model.num_items(),
            args.max_calls
        );
    }

    let start = Instant::now();
    let outcome = solve(args, &model);
    let report = Report::new(args, &model, &outcome, start.elapsed());

    if let TerminationReason::Aborted(reason) = outcome.termination_reason()
        && args.format != OutputFormat::Json
    {
        println!("Search stopped early: {}", reason);
    }

    match args.format {
        OutputFormat::Table => print_table(&report),
        OutputFormat::Simple => print_simple(&report),
        OutputFormat::Json => print_json(&report)?,
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("barback").chain(argv.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_defaults() {
        let args = parse(&[]);
        assert_eq!(args.ingredients, 12);
        assert_eq!(args.max_calls, 8_000_000);
        assert_eq!(args.format, OutputFormat::Table);
        assert_eq!(args.input, PathBuf::from("cocktails.csv"));
        assert!(args.seed.is_none());
        assert!(!args.extended_bounds);
    }

    #[test]
    fn test_short_flags() {
        let args = parse(&["-i", "3", "-m", "100", "-f", "json"]);
        assert_eq!(args.ingredients, 3);
        assert_eq!(args.max_calls, 100);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        assert!(Args::try_parse_from(["barback", "-f", "xml"]).is_err());
    }

    #[test]
    fn test_report_lists_sorted_labels() {
        let model = ItemLoader::new()
            .from_str("sour,lemon,whisky,sugar\nneat,whisky\ngin tonic,gin,tonic,lime\n")
            .expect("valid csv");
        let args = parse(&["-i", "3", "--input", "unused.csv"]);
        let outcome = solve(&args, &model);
        let report = Report::new(&args, &model, &outcome, Duration::from_millis(2));

        assert!(report.optimal);
        assert_eq!(report.cocktails, vec!["neat", "sour"]);
        assert_eq!(report.ingredients, vec!["lemon", "sugar", "whisky"]);
        assert_eq!(report.optimal_cocktails, 2);

        let json = serde_json::to_value(&report).expect("serializable");
        assert_eq!(json["ingredients_used"], 3);
        assert_eq!(json["cocktails"][1], "sour");
    }

    #[test]
    fn test_zero_ingredients_is_an_error() {
        let args = parse(&["-i", "0", "--input", "missing.csv"]);
        assert!(run(&args).is_err());
    }
}
