//! Email finder CLI
//!
//! Looks up email addresses for one domain or a whole seed list and writes
//! the results out as CSV/JSON exports.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use email_finder::export::{read_results_json, write_exports};
use email_finder::ingest::{load_seed_file, seeds_from_lines, LoadedSeeds};
use email_finder::lookup::{error_message, HunterLookup, Lookup, LookupRequest};
use email_finder::{
    normalize_domain, BatchDriver, BatchProgress, BatchSummary, Config, ExportPaths, LookupResult,
};
use hunter_client::{ApiKey, HunterClient};
use tokio::io::AsyncReadExt;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "email-finder")]
#[command(about = "Find email addresses for company domains via Hunter.io")]
struct Cli {
    /// Overrides HUNTER_API_KEY
    #[arg(long, global = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a single domain
    Search {
        domain: String,
        /// Company name to show instead of the provider's organization
        #[arg(long)]
        company: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Look up every domain from a list and/or a seed file, then export
    Batch {
        /// One domain per line; `-` reads stdin
        #[arg(long)]
        domains: Option<String>,
        /// Seed file (.csv or .txt)
        #[arg(long)]
        file: Option<PathBuf>,
        /// Pause between lookups
        #[arg(long)]
        delay_ms: Option<u64>,
        #[arg(long)]
        limit: Option<u32>,
        /// Export directory
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Show the seeds recovered from a file without looking anything up
    Parse { file: PathBuf },

    /// Rebuild exports from a saved results JSON
    Export {
        results: PathBuf,
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Verify the API key and show remaining searches
    CheckKey,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,email_finder=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(key) = cli.api_key.filter(|k| !k.trim().is_empty()) {
        config.api_key = Some(ApiKey::new(key.trim()));
    }

    match cli.command {
        Commands::Search {
            domain,
            company,
            limit,
        } => search(&config, &domain, company.as_deref(), limit).await,
        Commands::Batch {
            domains,
            file,
            delay_ms,
            limit,
            output,
        } => {
            if let Some(ms) = delay_ms {
                config.delay = std::time::Duration::from_millis(ms);
            }
            if let Some(limit) = limit {
                config.limit = limit;
            }
            if let Some(dir) = output {
                config.output_dir = dir;
            }
            batch(&config, domains.as_deref(), file.as_deref()).await
        }
        Commands::Parse { file } => parse(&file).await,
        Commands::Export { results, output } => {
            let results = read_results_json(&results)
                .await
                .with_context(|| format!("Failed to read {}", results.display()))?;
            let dir = output.unwrap_or(config.output_dir);
            let paths = write_exports(&results, &dir).await?;
            print_exports(&paths);
            Ok(())
        }
        Commands::CheckKey => check_key(&config).await,
    }
}

fn hunter_client(config: &Config) -> Result<HunterClient> {
    Ok(HunterClient::new(config.require_api_key()?.expose())
        .with_base_url(config.base_url.as_str())
        .with_timeout(config.timeout))
}

async fn search(
    config: &Config,
    domain: &str,
    company: Option<&str>,
    limit: Option<u32>,
) -> Result<()> {
    let lookup = HunterLookup::new(hunter_client(config)?);
    let request = LookupRequest::new(normalize_domain(domain))
        .with_company(company.unwrap_or_default())
        .with_limit(limit.unwrap_or(config.limit));

    let result = lookup.lookup(&request).await;
    print_result(&result);

    if let Some(err) = result.error() {
        bail!("{}", err);
    }
    Ok(())
}

async fn batch(config: &Config, domains: Option<&str>, file: Option<&Path>) -> Result<()> {
    let mut loaded = LoadedSeeds::default();

    if let Some(source) = domains {
        let text = if source == "-" {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .context("Failed to read domains from stdin")?;
            text
        } else {
            tokio::fs::read_to_string(source)
                .await
                .with_context(|| format!("Failed to read {}", source))?
        };
        loaded.seeds.extend(seeds_from_lines(&text));
    }

    if let Some(path) = file {
        loaded.extend(load_seed_file(path).await?);
    }

    for diagnostic in &loaded.diagnostics {
        println!("{} {}", style("!").yellow(), diagnostic);
    }
    if loaded.seeds.is_empty() {
        bail!("No domains to look up");
    }

    let lookup = HunterLookup::new(hunter_client(config)?);
    let cancel = CancellationToken::new();
    let driver = BatchDriver::new(lookup, config.batch_options()).with_cancellation(cancel.clone());

    let ctrl_c = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            println!("{}", style("Stopping after the current lookup...").yellow());
            cancel.cancel();
        }
    });

    println!(
        "{} {} domains",
        style("Looking up").bold(),
        loaded.seeds.len()
    );
    let outcome = driver.run(&loaded.seeds, print_progress).await;
    ctrl_c.abort();

    if outcome.cancelled {
        println!(
            "{} after {} of {} domains",
            style("Cancelled").red(),
            outcome.results.len(),
            loaded.seeds.len()
        );
    }
    if outcome.results.is_empty() {
        return Ok(());
    }

    print_summary(&BatchSummary::from_results(&outcome.results));
    let paths = write_exports(&outcome.results, &config.output_dir).await?;
    print_exports(&paths);
    Ok(())
}

async fn parse(file: &Path) -> Result<()> {
    let loaded = load_seed_file(file).await?;

    for seed in &loaded.seeds {
        if seed.company_name.is_empty() {
            println!("{}", seed.domain);
        } else {
            println!("{} {}", seed.domain, style(&seed.company_name).dim());
        }
    }
    for diagnostic in &loaded.diagnostics {
        println!("{} {}", style("!").yellow(), diagnostic);
    }
    println!(
        "{} seeds, {} diagnostics",
        style(loaded.seeds.len()).bold(),
        loaded.diagnostics.len()
    );
    Ok(())
}

async fn check_key(config: &Config) -> Result<()> {
    let account = hunter_client(config)?
        .account()
        .await
        .map_err(|e| anyhow!(error_message(&e)))?;

    println!("{} API key is valid", style("✓").green());
    if let Some(email) = &account.email {
        println!("  Account: {}", email);
    }
    if let Some(plan) = &account.plan_name {
        println!("  Plan: {}", plan);
    }
    let searches = &account.requests.searches;
    println!(
        "  Searches: {} used, {} available",
        searches.used, searches.available
    );
    Ok(())
}

fn print_progress(progress: BatchProgress<'_>) {
    if let Some(result) = progress.latest() {
        print!(
            "{} ",
            style(format!("[{}/{}]", progress.completed, progress.total)).dim()
        );
        print_result(result);
    }
}

fn print_result(result: &LookupResult) {
    match result.error() {
        Some(err) => println!(
            "{} {} {}",
            style("✗").red(),
            result.domain,
            style(err).red()
        ),
        None => println!(
            "{} {} ({}): {} emails",
            style("✓").green(),
            result.domain,
            result.company_name,
            result.emails().len()
        ),
    }
}

fn print_summary(summary: &BatchSummary) {
    println!();
    println!("{}", style("Summary").bold());
    println!("  Processed: {}", summary.total);
    println!("  Successful: {}", style(summary.successful).green());
    println!("  Failed: {}", style(summary.failed).red());
    println!("  Emails found: {}", summary.total_emails);
    println!("  Success rate: {}%", summary.success_rate);
}

fn print_exports(paths: &ExportPaths) {
    println!();
    println!("{}", style("Exports").bold());
    for path in [&paths.json, &paths.contacts_csv, &paths.full_csv, &paths.summary] {
        println!("  {}", path.display());
    }
}
