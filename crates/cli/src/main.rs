use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use metrics::{HealthStatus, MetricsConfig, ReadinessStatus};
use profile::{RecommendationResponse, RiskTolerance, Submission, UserProfile};
use server::{RecommendationOrchestrator, ServiceConfig, StoreConfig};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{debug, info};

/// CoverRecs - Life Insurance Recommendation Engine
#[derive(Parser)]
#[command(name = "cover-recs")]
#[command(about = "Rule-based life insurance coverage recommendations", long_about = None)]
struct Cli {
    /// Path to the submissions file (JSON Lines)
    #[arg(short, long, env = "COVER_RECS_STORE", default_value = "data/submissions.jsonl")]
    store: PathBuf,

    /// Keep submissions in memory only (nothing is written to disk)
    #[arg(long)]
    in_memory: bool,

    /// Memory usage percentage at which the service reports unhealthy
    #[arg(long, env = "COVER_RECS_MEMORY_THRESHOLD", default_value_t = 90.0)]
    memory_threshold: f64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Get a coverage recommendation for an applicant
    Recommend {
        /// Applicant age (18-100)
        #[arg(long)]
        age: u32,

        /// Income figure (non-negative)
        #[arg(long)]
        income: f64,

        /// Number of dependents (0-10)
        #[arg(long, default_value = "0")]
        dependents: u32,

        /// Risk tolerance: Low, Medium or High
        #[arg(long, default_value = "Medium")]
        risk: RiskTolerance,

        /// Owner to file the submission under
        #[arg(long)]
        owner: Option<String>,

        /// Print the response as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show stored submissions, newest first
    History {
        /// Only show submissions for this owner
        #[arg(long)]
        owner: Option<String>,

        /// Print the submissions as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recommend for every profile in a JSON array file
    Batch {
        /// File containing `[{"age":..,"annualIncome":..,"dependents":..,"riskTolerance":..}, ...]`
        #[arg(long)]
        file: PathBuf,

        /// Owner to file the submissions under
        #[arg(long)]
        owner: Option<String>,
    },

    /// Print the health report
    Health,

    /// Print the readiness report
    Ready,

    /// Print the metrics snapshot
    Metrics,

    /// Run benchmark to test performance
    Benchmark {
        /// Number of requests to make
        #[arg(long, default_value = "1000")]
        requests: usize,

        /// Number of concurrent requests
        #[arg(long, default_value = "10")]
        concurrent: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = ServiceConfig {
        store: if cli.in_memory {
            StoreConfig::InMemory
        } else {
            StoreConfig::JsonFile(cli.store.clone())
        },
        metrics: MetricsConfig {
            memory_threshold_percent: cli.memory_threshold,
            ..MetricsConfig::default()
        },
    };

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Recommend {
            age,
            income,
            dependents,
            risk,
            owner,
            json,
        } => {
            let profile = UserProfile::new(age, income, dependents, risk);
            handle_recommend(config.build(), profile, owner, json).await?
        }
        Commands::History { owner, json } => handle_history(config.build(), owner, json).await?,
        Commands::Batch { file, owner } => handle_batch(config.build(), file, owner).await?,
        Commands::Health => handle_health(config.build())?,
        Commands::Ready => handle_ready(config.build()),
        Commands::Metrics => handle_metrics(config.build())?,
        Commands::Benchmark {
            requests,
            concurrent,
        } => {
            // Benchmark traffic never touches the submissions file
            let config = ServiceConfig {
                store: StoreConfig::InMemory,
                ..config
            };
            handle_benchmark(config.build(), requests, concurrent).await?
        }
    }

    Ok(())
}

/// Handle the 'recommend' command
async fn handle_recommend(
    orchestrator: RecommendationOrchestrator,
    profile: UserProfile,
    owner: Option<String>,
    json: bool,
) -> Result<()> {
    let submission = orchestrator.submit(profile, owner).await?;

    if json {
        let response = RecommendationResponse::from(&submission.recommendation);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        print_submission(&submission);
    }
    Ok(())
}

/// Handle the 'history' command
async fn handle_history(
    orchestrator: RecommendationOrchestrator,
    owner: Option<String>,
    json: bool,
) -> Result<()> {
    let submissions = match &owner {
        Some(owner) => orchestrator.history(owner).await?,
        None => orchestrator.all_submissions().await?,
    };
    debug!("Fetched {} submissions", submissions.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&submissions)?);
        return Ok(());
    }

    let heading = match &owner {
        Some(owner) => format!("Submissions for '{}':", owner),
        None => "All submissions:".to_string(),
    };
    println!("{}", heading.bold().blue());
    if submissions.is_empty() {
        println!("  (none)");
    }
    for submission in &submissions {
        println!(
            "{} {} [age {}, {} dependents, {} risk]",
            submission.created_at.format("%Y-%m-%d %H:%M:%S").to_string().dimmed(),
            submission.recommendation.summary_text,
            submission.profile.age,
            submission.profile.dependents,
            submission.profile.risk_tolerance
        );
    }
    Ok(())
}

/// Handle the 'batch' command
async fn handle_batch(
    orchestrator: RecommendationOrchestrator,
    file: PathBuf,
    owner: Option<String>,
) -> Result<()> {
    let contents = tokio::fs::read_to_string(&file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let profiles: Vec<UserProfile> = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse profiles in {}", file.display()))?;
    info!("Loaded {} profiles from {}", profiles.len(), file.display());

    let submissions = orchestrator.submit_batch(profiles, owner).await?;
    println!(
        "{} Stored {} recommendations",
        "✓".green(),
        submissions.len()
    );
    for (i, submission) in submissions.iter().enumerate() {
        println!(
            "{}. {}",
            (i + 1).to_string().green(),
            submission.recommendation.summary_text
        );
    }
    Ok(())
}

/// Handle the 'health' command
fn handle_health(orchestrator: RecommendationOrchestrator) -> Result<()> {
    let health = orchestrator.health();
    let status = match health.status {
        HealthStatus::Healthy => health.status.to_string().green(),
        HealthStatus::Unhealthy => health.status.to_string().red(),
    };
    println!("Status: {} (up {})", status.bold(), health.uptime.formatted);
    println!("{}", serde_json::to_string_pretty(&health)?);
    Ok(())
}

/// Handle the 'ready' command
fn handle_ready(orchestrator: RecommendationOrchestrator) {
    let readiness = orchestrator.readiness();
    let status = match readiness.status {
        ReadinessStatus::Ready => readiness.status.to_string().green(),
        ReadinessStatus::NotReady => readiness.status.to_string().red(),
    };
    println!("{} at {}", status.bold(), readiness.timestamp.to_rfc3339());
}

/// Handle the 'metrics' command
fn handle_metrics(orchestrator: RecommendationOrchestrator) -> Result<()> {
    let snapshot = orchestrator.metrics_snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Handle the 'benchmark' command
async fn handle_benchmark(
    orchestrator: RecommendationOrchestrator,
    requests: usize,
    concurrent: usize,
) -> Result<()> {
    // Random applicants; a few out-of-range ages exercise the failure path
    let profiles: Vec<UserProfile> = (0..requests)
        .map(|_| {
            let age = rand::random::<u32>() % 86 + 16;
            let income = (rand::random::<u32>() % 200_000) as f64;
            let dependents = rand::random::<u32>() % 11;
            let risk = match rand::random::<u32>() % 3 {
                0 => RiskTolerance::Low,
                1 => RiskTolerance::Medium,
                _ => RiskTolerance::High,
            };
            UserProfile::new(age, income, dependents, risk)
        })
        .collect();

    info!(
        "Starting benchmark: {} requests, {} concurrent",
        requests, concurrent
    );

    // Use tokio::spawn to make concurrent requests, bounded by a semaphore
    let limiter = Arc::new(Semaphore::new(concurrent.max(1)));
    let started = Instant::now();
    let mut handles = Vec::with_capacity(requests);
    for profile in profiles {
        let orchestrator = orchestrator.clone();
        let limiter = limiter.clone();
        handles.push(tokio::spawn(async move {
            let _permit = limiter.acquire_owned().await?;
            let start = Instant::now();
            let outcome = orchestrator.submit(profile, None).await;
            Ok::<_, anyhow::Error>((start.elapsed(), outcome.is_ok()))
        }));
    }

    // Wait for all tasks to complete and collect timings
    let mut timings: Vec<Duration> = Vec::with_capacity(requests);
    let mut failures = 0usize;
    for handle in handles {
        let (elapsed, ok) = handle.await??;
        timings.push(elapsed);
        if !ok {
            failures += 1;
        }
    }
    let wall_time = started.elapsed();

    if timings.is_empty() {
        println!("No requests were made.");
        return Ok(());
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let percentile = |p: f64| timings[((timings.len() as f64 * p) as usize).min(timings.len() - 1)];
    let throughput = requests as f64 / wall_time.as_secs_f64();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Wall time: {:?}", wall_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", percentile(0.50));
    println!("P95 latency: {:?}", percentile(0.95));
    println!("P99 latency: {:?}", percentile(0.99));
    println!("Throughput: {:.2} requests/second", throughput);
    println!("Rejected profiles: {}", failures);

    let snapshot = orchestrator.metrics_snapshot();
    println!("{}", "Aggregated metrics:".bold().blue());
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Helper function to format and print one recommendation
fn print_submission(submission: &Submission) {
    let recommendation = &submission.recommendation;
    println!("{}", "Coverage Recommendation:".bold().blue());
    println!("{}", recommendation.summary_text.green());
    println!("   {}", recommendation.explanation_text);
    if let Some(owner) = &submission.owner_id {
        println!("   Filed under {} ({})", owner, submission.id);
    }
}
