use anyhow::{Context, Result, bail};
use chrono::{Month, NaiveDate};
use clap::{Args, Parser, Subcommand};
use moneymgr_core::{
    CanonicalIndex, CategoryRecord, CategoryType, Transaction, build_canonical_index,
    normalize_for_matching, prettify_category,
};
use moneymgr_finance::{
    Analysis, CategorySlice, LabelStyle, Period, export_file_name, export_to_path,
    filter_by_date_range, shares,
};
use moneymgr_ingest::{ApiClient, SourceKind, load_categories, load_transactions_file};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

mod config;
mod state;

const LONG_VERSION: &str =
    concat!(env!("CARGO_PKG_VERSION"), " (", env!("MONEYMGR_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(
    name = "moneymgr",
    version,
    long_version = LONG_VERSION,
    about = "Money manager category tools"
)]
struct Cli {
    /// Debug logging on stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve free-form labels to canonical categories
    Classify {
        #[arg(required = true)]
        labels: Vec<String>,

        /// JSON file with the user's categories (bare array or {"data": [...]})
        #[arg(long)]
        categories: Option<PathBuf>,

        /// Show the matching key and the rule that fired
        #[arg(long)]
        explain: bool,

        /// One JSON object per label
        #[arg(long)]
        json: bool,
    },

    /// Print the matching key and display name of each label
    Normalize {
        #[arg(required = true)]
        labels: Vec<String>,
    },

    /// List the canonical index in matching order
    Catalog {
        #[arg(long)]
        categories: Option<PathBuf>,
    },

    /// Income, expense and per-category totals
    Summary {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long)]
        year: Option<i32>,

        /// Month name or number; requires --year
        #[arg(long)]
        month: Option<String>,
    },

    /// January..December totals for one side of the ledger
    Monthly {
        #[command(flatten)]
        source: SourceArgs,

        #[arg(long)]
        year: i32,

        #[arg(long = "type", default_value = "Expense")]
        kind: CategoryType,
    },

    /// Write a date range to CSV
    Export {
        #[command(flatten)]
        source: SourceArgs,

        /// First day, YYYY-MM-DD (inclusive)
        #[arg(long)]
        from: NaiveDate,

        /// Last day, YYYY-MM-DD (inclusive)
        #[arg(long)]
        to: NaiveDate,

        /// Output path (default: moneyMgr_export_<from>_<to>.csv)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Category column: "pretty" strips every emoji (digits too),
        /// "after-emoji" only drops a leading pictograph run
        #[arg(long, default_value = "pretty")]
        labels: LabelStyle,
    },

    /// Manage ~/.moneymgr/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

#[derive(Args, Debug)]
struct SourceArgs {
    /// Transactions file: JSON payload or an exported CSV
    #[arg(long, conflicts_with = "remote")]
    input: Option<PathBuf>,

    /// Fetch from the configured backend instead of a file
    #[arg(long)]
    remote: bool,

    #[arg(long)]
    categories: Option<PathBuf>,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Classify { labels, categories, explain, json } => {
            let index = build_canonical_index(&read_categories(categories.as_ref())?);
            classify_labels(&index, &labels, explain, json)?;
        }

        Command::Normalize { labels } => {
            for label in &labels {
                println!(
                    "{:?}\t{}\t{}",
                    label,
                    normalize_for_matching(label),
                    prettify_category(label)
                );
            }
        }

        Command::Catalog { categories } => {
            let index = build_canonical_index(&read_categories(categories.as_ref())?);
            print_catalog(&index);
        }

        Command::Summary { source, year, month } => {
            let period = period_from_args(year, month.as_deref())?;
            let cfg = config::load_config()?;
            let tz = cfg.timezone()?;
            let (txns, records) = load_inputs(&source, &cfg, period).await?;
            let index = build_canonical_index(&records);
            let analysis = Analysis::new(&txns, &index, tz);

            let s = analysis.summary(period);
            let cur = &cfg.display.currency;
            println!("Period: {}", describe_period(period));
            println!("Transactions: {}", s.count);
            println!("Income:  {:>12.2} {cur}", s.income);
            println!("Expense: {:>12.2} {cur}", s.expense);
            println!("Net:     {:>12.2} {cur}", s.net);

            for side in [CategoryType::Expense, CategoryType::Income] {
                let slices = analysis.breakdown(side, period);
                if !slices.is_empty() {
                    println!("\n{side} by category");
                    print_breakdown(&slices, cur);
                }
            }
        }

        Command::Monthly { source, year, kind } => {
            let cfg = config::load_config()?;
            let tz = cfg.timezone()?;
            let (txns, records) = load_inputs(&source, &cfg, Period::Year(year)).await?;
            let index = build_canonical_index(&records);
            let analysis = Analysis::new(&txns, &index, tz);

            println!("{kind} per month, {year}");
            for bar in analysis.monthly(kind, year) {
                println!("  {:<10} {:>12.2} {}", bar.month, bar.value, cfg.display.currency);
            }
        }

        Command::Export { source, from, to, out, labels } => {
            if from > to {
                bail!("--from {from} is after --to {to}");
            }
            let cfg = config::load_config()?;
            let tz = cfg.timezone()?;
            let (txns, _) = load_inputs(&source, &cfg, Period::All).await?;

            let selected = filter_by_date_range(&txns, from, to, &tz);
            let path = out.unwrap_or_else(|| PathBuf::from(export_file_name(from, to)));
            let rows = export_to_path(&path, &selected, &tz, labels)?;
            println!("Wrote {} rows to {}", rows, path.display());
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = config::load_config()?;
                println!("# {}", config::config_path()?.display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn read_categories(path: Option<&PathBuf>) -> Result<Vec<CategoryRecord>> {
    match path {
        Some(p) => load_categories(p),
        None => Ok(Vec::new()),
    }
}

/// Transactions plus the user's categories, from a file or the backend.
async fn load_inputs(
    source: &SourceArgs,
    cfg: &config::Config,
    period: Period,
) -> Result<(Vec<Transaction>, Vec<CategoryRecord>)> {
    if source.remote {
        let client = ApiClient::new(cfg.api.base_url.as_str());
        let txns = match period {
            Period::Month { year, month } => client.fetch_month(year, month).await?,
            _ => client.fetch_all_transactions().await?,
        };
        let records = match &source.categories {
            Some(p) => load_categories(p)?,
            None => client.fetch_categories().await?,
        };
        info!(source = ?SourceKind::Remote, count = txns.len(), "loaded transactions");
        return Ok((txns, records));
    }

    let Some(input) = &source.input else {
        bail!("no transactions source (pass --input <file> or --remote)");
    };
    let tz = cfg.timezone()?;
    let (txns, kind) = load_transactions_file(input, &tz)?;
    info!(source = ?kind, count = txns.len(), path = %input.display(), "loaded transactions");
    Ok((txns, read_categories(source.categories.as_ref())?))
}

fn classify_labels(
    index: &CanonicalIndex,
    labels: &[String],
    explain: bool,
    json: bool,
) -> Result<()> {
    for label in labels {
        let c = index.explain(label);
        if json {
            println!("{}", serde_json::to_string(&c).context("serialize classification")?);
        } else if explain {
            println!(
                "{:?} -> {} [{}] key={}",
                label,
                c.name,
                c.rule.as_str(),
                c.key.as_deref().unwrap_or("-")
            );
        } else {
            println!("{}\t{}", label, c.name);
        }
    }
    Ok(())
}

fn print_catalog(index: &CanonicalIndex) {
    for (key, entry) in index.iter() {
        println!("{:<26} {:<28} {}", key, entry.name, entry.category_type);
    }
    if !index.shadowed().is_empty() {
        println!("\nShadowed (same key as an earlier entry):");
        for s in index.shadowed() {
            println!("  {} ({}) -> {}", s.name, s.category_type, s.kept_name);
        }
    }
}

fn print_breakdown(slices: &[CategorySlice], currency: &str) {
    for (slice, share) in slices.iter().zip(shares(slices)) {
        println!(
            "  {:<28} {:>12.2} {currency} {:>5.1}%  ({})",
            slice.pretty_label, slice.value, share, slice.count
        );
    }
}

fn parse_month(s: &str) -> Result<u32> {
    let s = s.trim();
    if let Ok(n) = s.parse::<u32>() {
        if (1..=12).contains(&n) {
            return Ok(n);
        }
        bail!("month out of range: {n}");
    }
    let month: Month = s.parse().map_err(|_| anyhow::anyhow!("unknown month: {s:?}"))?;
    Ok(month.number_from_month())
}

fn period_from_args(year: Option<i32>, month: Option<&str>) -> Result<Period> {
    match (year, month) {
        (Some(year), Some(m)) => Ok(Period::Month { year, month: parse_month(m)? }),
        (Some(year), None) => Ok(Period::Year(year)),
        (None, Some(_)) => bail!("--month needs --year"),
        (None, None) => Ok(Period::All),
    }
}

fn describe_period(period: Period) -> String {
    match period {
        Period::Month { year, month } => {
            let name = u8::try_from(month)
                .ok()
                .and_then(|m| Month::try_from(m).ok())
                .map(|m| m.name())
                .unwrap_or("?");
            format!("{name} {year}")
        }
        Period::Year(year) => year.to_string(),
        Period::All => "all time".to_string(),
    }
}
