// LogBERT CLI - log anomaly detection with root cause hints

mod render;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use logbert_anomaly::{
    load_config, AnalysisPipeline, AnalysisReport, AnalysisSession, EngineConfig, EngineError,
    FeedGenerator, MonitorEvent, MonitorRunner, SeededRandom, ThreadRandom, SAMPLE_LOGS,
};
use logbert_anomaly::{start_feed, stop_feed};
use logbert_core::{parse, LevelFilter, LogLevel};
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "logbert")]
#[command(version = "0.1.0")]
#[command(about = "Log anomaly detection with root cause analysis", long_about = None)]
struct Cli {
    /// TOML config file (detection + monitor settings)
    #[arg(short, long, global = true, env = "LOGBERT_CONFIG")]
    config: Option<PathBuf>,

    /// Verbose engine logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a log file once
    Analyze {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        detection: DetectionArgs,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Real-time monitoring with a synthetic log feed
    Monitor {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        detection: DetectionArgs,

        /// Stop after this many seconds (default: until Ctrl+C)
        #[arg(short, long)]
        duration: Option<u64>,
    },

    /// Print the built-in sample logs
    Sample,

    /// Print synthetic log lines
    Feed {
        /// Number of lines
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Emit on the monitor timer instead of all at once
        #[arg(long)]
        live: bool,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Log file to read ("-" for stdin). Defaults to the sample logs.
    file: Option<PathBuf>,
}

#[derive(Args)]
struct DetectionArgs {
    /// Anomaly threshold (0.1 - 0.9)
    #[arg(short, long)]
    threshold: Option<f64>,

    /// Minimum level: all, error, warn, info
    #[arg(short, long)]
    level: Option<String>,

    /// Hide root cause analysis
    #[arg(long)]
    no_rca: bool,

    /// Match keywords regardless of case
    #[arg(long)]
    case_insensitive: bool,

    /// Seed for reproducible scores
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => {
            let config = load_config(path)?;
            info!(path = %path.display(), "loaded config");
            config
        }
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Analyze { input, detection, json } => {
            let config = merge_config(config, &detection)?;
            let text = read_input(&input)?;
            analyze(text, &config, detection.seed, json).await?;
        }
        Commands::Monitor { input, detection, duration } => {
            let config = merge_config(config, &detection)?;
            let text = read_input(&input)?;
            monitor(text, &config, detection.seed, duration).await;
        }
        Commands::Sample => {
            println!("{}", SAMPLE_LOGS);
        }
        Commands::Feed { count, live, seed } => {
            feed(&config, count, live, seed).await;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// command line flags override the config file
fn merge_config(
    mut config: EngineConfig,
    args: &DetectionArgs,
) -> Result<EngineConfig, Box<dyn std::error::Error>> {
    if let Some(threshold) = args.threshold {
        config.detection.threshold = threshold;
    }
    if let Some(level) = &args.level {
        config.detection.level_filter = LevelFilter::from_name(level);
    }
    if args.no_rca {
        config.detection.rca_enabled = false;
    }
    if args.case_insensitive {
        config.detection.case_insensitive = true;
    }
    config.validate()?;
    debug!(?config, "effective config");
    Ok(config)
}

fn read_input(input: &InputArgs) -> io::Result<String> {
    match &input.file {
        Some(path) if path.as_os_str() == "-" => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
        Some(path) => std::fs::read_to_string(path),
        None => {
            eprintln!("{}", "No file given, using sample logs.".dimmed());
            Ok(SAMPLE_LOGS.to_string())
        }
    }
}

fn build_pipeline(seed: Option<u64>) -> AnalysisPipeline {
    match seed {
        Some(seed) => AnalysisPipeline::with_random(Box::new(SeededRandom::new(seed))),
        None => AnalysisPipeline::with_random(Box::new(ThreadRandom)),
    }
}

fn build_generator(seed: Option<u64>) -> FeedGenerator {
    match seed {
        // separate stream from the scorer's
        Some(seed) => FeedGenerator::with_random(Box::new(SeededRandom::new(seed.wrapping_add(1)))),
        None => FeedGenerator::new(),
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

fn notice(err: EngineError) {
    println!("{} {}", "⚠".yellow().bold(), err.to_string().yellow());
}

async fn analyze(
    text: String,
    config: &EngineConfig,
    seed: Option<u64>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = AnalysisSession::new(config.detection, &config.monitor).with_text(text);
    let mut pipeline = build_pipeline(seed);

    let pb = if json { ProgressBar::hidden() } else { spinner("Analyzing...") };
    let outcome = session.run_full_analysis(&mut pipeline).await.map(|stats| *stats);
    pb.finish_and_clear();

    let stats = match outcome {
        Ok(stats) => stats,
        Err(e) => {
            notice(e);
            std::process::exit(1);
        }
    };

    let results = session.results().unwrap_or_default();
    if json {
        let report = AnalysisReport {
            results: results.to_vec(),
            stats: Some(stats),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_settings(config);
    render::print_stats(&stats);
    render::print_results(results, config.detection.rca_enabled);
    Ok(())
}

fn print_settings(config: &EngineConfig) {
    let d = &config.detection;
    println!(
        "\n{} {} | {} {} | {} {}",
        "Threshold:".dimmed(),
        d.threshold.to_string().yellow(),
        "Level:".dimmed(),
        d.level_filter.to_string().cyan(),
        "RCA:".dimmed(),
        if d.rca_enabled { "on".green() } else { "off".red() },
    );
}

async fn monitor(text: String, config: &EngineConfig, seed: Option<u64>, duration: Option<u64>) {
    println!("\n{}", "📡 Real-time monitoring".cyan().bold());
    println!(
        "{} every {}ms, {}",
        "Synthetic feed:".dimmed(),
        config.monitor.tick_interval_ms,
        "Ctrl+C to stop".dimmed()
    );
    print_settings(config);

    let session = AnalysisSession::new(config.detection, &config.monitor).with_text(text);
    let mut runner = MonitorRunner::new(session, build_pipeline(seed), config.monitor)
        .with_generator(build_generator(seed));

    let shutdown = async move {
        match duration {
            Some(secs) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {}
                    _ = tokio::time::sleep(Duration::from_secs(secs)) => {}
                }
            }
            None => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    };

    let rca = config.detection.rca_enabled;
    runner
        .run(shutdown, |event, session| match event {
            MonitorEvent::Line(line) => {
                let level = parse(line).first().map(|r| r.level).unwrap_or(LogLevel::Info);
                render::print_feed_line(line, level);
            }
            MonitorEvent::AutoAnalysis => {
                let results = session.results().unwrap_or_default();
                println!(
                    "{} {} anomalies (auto)",
                    "↻".cyan(),
                    results.len().to_string().red()
                );
                render::print_results(&results[..results.len().min(3)], rca);
            }
            MonitorEvent::FullAnalysis => {
                render::print_stats(session.stats());
                render::print_results(session.results().unwrap_or_default(), rca);
            }
            MonitorEvent::Rejected(e) => notice(*e),
        })
        .await;

    println!("\n{} Monitoring stopped.", "✓".green());
}

async fn feed(config: &EngineConfig, count: usize, live: bool, seed: Option<u64>) {
    let mut generator = build_generator(seed);

    if !live {
        for _ in 0..count {
            println!("{}", generator.next_line());
        }
        return;
    }

    let (tx, mut rx) = mpsc::unbounded_channel();
    let handle = start_feed(generator, config.monitor.tick_interval(), move |tick| {
        let _ = tx.send(tick.line);
    });

    for _ in 0..count {
        match rx.recv().await {
            Some(line) => println!("{}", line),
            None => break,
        }
    }
    stop_feed(handle).await;
}
