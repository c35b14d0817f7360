//! CLI argument parsing and run orchestration

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use order_bench_core::config::{DEFAULT_REQUEST_COUNT, DEFAULT_TARGET_URL};
use order_bench_core::{
    DispatcherBuilder, LoadConfig, Outcome, RequestExecutor, Sampler, WorkItem,
};
use order_bench_report::{JsonExporter, TextReport, RULE_WIDTH};
use order_bench_samplers::OrderSampler;
use order_bench_vendors::HttpTransport;

/// Orders shown before the run starts
const PREVIEW_ORDERS: usize = 3;

/// order-bench - fire synthetic orders at an HTTP endpoint and report how it coped
#[derive(Parser, Debug)]
#[command(name = "order-bench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Endpoint receiving the POSTed orders
    #[arg(long, env = "ORDER_BENCH_URL", default_value = DEFAULT_TARGET_URL)]
    pub url: String,

    /// Number of orders to send
    #[arg(short = 'n', long, env = "ORDER_BENCH_REQUESTS", default_value_t = DEFAULT_REQUEST_COUNT)]
    pub requests: usize,

    /// Maximum number of requests in flight (default: one per order)
    #[arg(short = 'w', long, env = "ORDER_BENCH_MAX_WORKERS")]
    pub max_workers: Option<usize>,

    /// Per-request timeout in seconds
    #[arg(short, long, env = "ORDER_BENCH_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    /// Seed for reproducible payloads
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write a JSON summary to this path
    #[arg(long)]
    pub json: Option<PathBuf>,

    /// Only show the progress bar, not one line per order
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Load configuration described by the flags
    pub fn load_config(&self) -> Result<LoadConfig> {
        let mut config = LoadConfig::new(self.url.clone(), self.requests)
            .with_timeout(Duration::from_secs(self.timeout_secs));
        config.max_workers = self.max_workers;
        config.validate().context("Invalid command-line configuration")?;
        Ok(config)
    }

    /// Run the load test based on CLI arguments
    pub async fn run(&self) -> Result<()> {
        let config = self.load_config()?;
        let concurrency = config.effective_concurrency();

        print!("{}", TextReport::banner(&config.target_url, config.requests, concurrency));

        let mut sampler = match self.seed {
            Some(seed) => OrderSampler::seeded(seed),
            None => OrderSampler::from_entropy(),
        };
        let items = sampler.sample_batch(config.requests);
        debug_assert!(items.iter().all(|item| item.validate().is_ok()));
        print_preview(&items)?;

        println!("\nSending {} orders...", config.requests);
        println!("{}", "-".repeat(RULE_WIDTH));

        let transport = HttpTransport::with_pool_size(concurrency)
            .context("Failed to create HTTP transport")?;
        let executor = RequestExecutor::new(Arc::new(transport), config.target_url.clone())
            .with_timeout(config.timeout);
        let dispatcher = DispatcherBuilder::new()
            .config(config.dispatch_config())
            .executor(Arc::new(executor))
            .build()
            .context("Failed to build dispatcher")?;

        let pb = progress_bar(config.requests)?;
        let total = config.requests;
        let quiet = self.quiet;
        let report = dispatcher
            .run_with_signal_handling(items, |idx, outcome| {
                if !quiet {
                    pb.println(outcome_line(idx, total, outcome));
                }
                pb.inc(1);
            })
            .await
            .context("Load run failed")?;
        pb.finish_and_clear();

        println!("{}", "-".repeat(RULE_WIDTH));
        print!("{}", TextReport::render(&report));

        if let Some(path) = &self.json {
            JsonExporter::export(&report, path)?;
            tracing::info!(path = %path.display(), "JSON summary written");
        }

        Ok(())
    }
}

fn print_preview(items: &[WorkItem]) -> Result<()> {
    println!("\nSample generated orders:");
    for (idx, item) in items.iter().take(PREVIEW_ORDERS).enumerate() {
        let json = order_json(item)?;
        println!("Order {}: {}", idx + 1, json);
    }
    if items.len() > PREVIEW_ORDERS {
        println!("...");
    }
    Ok(())
}

fn order_json(item: &WorkItem) -> Result<String> {
    let bytes = item.to_json_bytes().context("Failed to serialize order")?;
    String::from_utf8(bytes).context("Serialized order is not UTF-8")
}

fn progress_bar(total: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(total as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec}, {eta})",
            )
            .context("Invalid progress bar template")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

/// One console line per completed order
fn outcome_line(idx: usize, total: usize, outcome: &Outcome) -> String {
    match outcome {
        Outcome::Success {
            work_item_id,
            status_code,
            latency,
            ..
        } => format!(
            "OK  Order {}/{}: ID={}... Status={} Time={:.3}s",
            idx,
            total,
            work_item_id.short(),
            status_code,
            latency.as_secs_f64()
        ),
        Outcome::Failure {
            work_item_id,
            error_description,
        } => format!(
            "ERR Order {}/{}: ID={}... ERROR: {}",
            idx,
            total,
            work_item_id.short(),
            error_description
        ),
    }
}
