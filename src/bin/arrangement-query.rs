//! arrangement-query — render group arrangement SELECT statements
//!
//! # Usage
//!
//! ```bash
//! # Literal SQL
//! arrangement-query -f 'name~spring' -f 'member[teacher]=g1,g2' --sort mentor:desc
//!
//! # Placeholders plus bound values
//! arrangement-query -f 'start>=2024-09-01T00:00:00Z' --page 2 --params
//! ```

use anyhow::Context;
use arrangement_query::prelude::*;
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "arrangement-query")]
#[command(version)]
#[command(about = "Build SELECT statements over group arrangements", long_about = None)]
#[command(after_help = "EXAMPLES:
    arrangement-query -f 'name~spring' --sort start_day:desc
    arrangement-query -f 'member[intern]=g1,g2' --page 3 --size 15
    arrangement-query -f 'name~spring' --params --format json")]
struct Cli {
    /// SELECT list (defaults to the config value)
    #[arg(long)]
    select: Option<String>,

    /// Source table (defaults to the config value)
    #[arg(long)]
    table: Option<String>,

    /// Filter expression, repeatable; ANDed in order
    #[arg(short, long = "filter")]
    filters: Vec<String>,

    /// Sort expression: start_day[:asc|:desc] or mentor[:asc|:desc]
    #[arg(short, long)]
    sort: Option<String>,

    /// 1-based page number
    #[arg(short, long)]
    page: Option<u64>,

    /// Page size (defaults to the config value)
    #[arg(long)]
    size: Option<u64>,

    /// Emit $n placeholders and list the bound values
    #[arg(long)]
    params: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Config file path
    #[arg(short, long, env = "ARRANGEMENT_QUERY_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the filter and sort expression reference
    Syntax,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Some(Commands::Syntax) => show_syntax(),
        None => {
            if let Err(e) = run(&cli) {
                eprintln!("{} {:#}", "Error:".red().bold(), e);
                std::process::exit(1);
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = QueryConfig::load(cli.config.as_deref()).context("failed to load config")?;
    let builder = configure(cli, &config)?;

    if cli.params {
        let query = builder.build_parameterized()?;
        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&query)?),
            OutputFormat::Text => {
                println!("{}", query.sql.white());
                if !query.params.is_empty() {
                    println!();
                    println!("{}", "Bindings:".cyan());
                    for (i, p) in query.params.iter().enumerate() {
                        println!("  ${} = {}", i + 1, p.to_string().yellow());
                    }
                }
            }
        }
    } else {
        let sql = builder.build()?;
        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "sql": sql }))?)
            }
            OutputFormat::Text => println!("{}", sql.white()),
        }
    }

    Ok(())
}

fn configure(cli: &Cli, config: &QueryConfig) -> anyhow::Result<QueryBuilder> {
    let mut builder = config.query_builder();
    if let Some(select) = &cli.select {
        builder = builder.select(select);
    }
    if let Some(table) = &cli.table {
        builder = builder.from(table);
    }

    for expr in &cli.filters {
        let filter = parse_filter(expr).with_context(|| format!("bad filter '{}'", expr))?;
        builder = builder.filter(filter);
    }

    if let Some(expr) = &cli.sort {
        let sorting = parse_sorting(expr).with_context(|| format!("bad sort '{}'", expr))?;
        builder = builder.order_by(sorting);
    }

    if cli.page.is_some() || cli.size.is_some() {
        let page = cli.page.unwrap_or(1);
        let size = cli.size.unwrap_or(config.page_size);
        builder = builder.page(page, size)?;
    }

    Ok(builder)
}

fn show_syntax() {
    println!("{}", "Expression Reference".cyan().bold());
    println!();

    let filters = [
        ("name~<term>", "name ILIKE '%term%'"),
        ("start>=<rfc3339>", "scheduled_for >= 'ts'"),
        ("start<=<rfc3339>", "scheduled_for <= 'ts'"),
        ("start=<rfc3339>", "scheduled_for = 'ts'"),
        ("member[<role>]=<guid>,..", "EXISTS (... guid = ANY(..) AND role = ..)"),
    ];
    let sorts = [
        ("start_day[:asc|:desc]", "ORDER BY scheduled_for"),
        ("mentor[:asc|:desc]", "ORDER BY teacher lastName"),
    ];

    println!("{:32} {}", "Filter".white().bold(), "SQL".white().bold());
    println!("{}", "─".repeat(80).dimmed());
    for (expr, sql) in filters {
        println!("{:32} {}", expr.yellow(), sql.dimmed());
    }
    println!();
    println!("{:32} {}", "Sort".white().bold(), "SQL".white().bold());
    println!("{}", "─".repeat(80).dimmed());
    for (expr, sql) in sorts {
        println!("{:32} {}", expr.yellow(), sql.dimmed());
    }
    println!();
    println!("Roles: {}", "teacher, mentor, intern".cyan());
}
