mod config;
mod report;
mod synthetic;

use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::time::Instant;

use chrono::Local;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use splat_core::pointcloud::{
    decimation::{downsample, format_count, importance_scores, suggest_ratio},
    decimation::{DownsampleOptions, Method},
    PointCloud,
};
use splat_core::DownsampleError;

use crate::report::Report;

#[derive(Parser, Debug)]
#[command(
    name = "Splat Downsample",
    about = "Reduce the number of splats in a Gaussian splat point cloud",
    author = "MIERUNE Inc.",
    version = "0.0.1"
)]
struct Cli {
    /// Number of splats in the generated input cloud
    #[arg(short, long, default_value_t = 1_000_000)]
    points: usize,

    #[arg(long, default_value_t = 0)]
    generator_seed: u64,

    /// JSON file with downsampling options; flags below override it
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(short, long, allow_negative_numbers = true)]
    target_count: Option<i64>,

    #[arg(short, long, allow_negative_numbers = true)]
    ratio: Option<f64>,

    #[arg(short, long)]
    method: Option<Method>,

    #[arg(short, long, allow_negative_numbers = true)]
    seed: Option<i64>,

    /// Pick the ratio from the point count when neither ratio nor target is set
    #[arg(long)]
    auto: bool,

    /// Run the random and importance methods side by side
    #[arg(long)]
    compare: bool,

    #[arg(long)]
    json: bool,

    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    #[arg(short, long)]
    quiet: bool,
}

fn resolve_options(args: &Cli, point_count: usize) -> Result<DownsampleOptions, Box<dyn Error>> {
    let mut options = match &args.config {
        Some(path) => config::load_options(path)?,
        None => DownsampleOptions::default(),
    };

    if args.target_count.is_some() {
        options.target_count = args.target_count;
    }
    if args.ratio.is_some() {
        options.ratio = args.ratio;
    }
    if let Some(method) = args.method {
        options.method = method;
    }
    if args.seed.is_some() {
        options.seed = args.seed;
    }

    if args.auto && options.target_count.is_none() && options.ratio.is_none() {
        let ratio = suggest_ratio(point_count);
        log::info!(
            "suggested ratio for {} points: {}",
            format_count(point_count),
            ratio
        );
        options.ratio = Some(ratio);
    }

    Ok(options)
}

// Scores for the report's importance share; the run goes on without them
fn report_scores(cloud: &PointCloud) -> Option<Vec<f64>> {
    match importance_scores(cloud.vertex()?) {
        Ok(scores) => Some(scores),
        Err(e) => {
            log::warn!("importance share unavailable: {}", e);
            None
        }
    }
}

fn run_once(
    cloud: PointCloud,
    options: &DownsampleOptions,
    scores: Option<&[f64]>,
) -> Result<Report, DownsampleError> {
    let original_count = cloud.point_count();
    let start = Instant::now();
    let result = downsample(cloud, options)?;
    let elapsed = start.elapsed();
    Ok(Report::new(options, scores, original_count, &result, elapsed))
}

fn run(args: Cli) -> Result<(), Box<dyn Error>> {
    log::info!("start generating {} splats...", format_count(args.points));
    let start_local = Instant::now();
    let cloud = synthetic::generate(args.points, args.generator_seed)?;
    log::info!("finish generating in {:?}", start_local.elapsed());

    let options = resolve_options(&args, cloud.point_count())?;
    log::info!("options: {:?}", options);

    let scores = if args.compare || options.method == Method::Importance {
        report_scores(&cloud)
    } else {
        None
    };

    let reports = if args.compare {
        let random = DownsampleOptions {
            method: Method::Random,
            ..options.clone()
        };
        let importance = DownsampleOptions {
            method: Method::Importance,
            ..options
        };
        let (a, b) = rayon::join(
            || run_once(cloud.clone(), &random, scores.as_deref()),
            || run_once(cloud.clone(), &importance, scores.as_deref()),
        );
        vec![a?, b?]
    } else {
        vec![run_once(cloud, &options, scores.as_deref())?]
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            println!("{}", report);
        }
    }

    Ok(())
}

fn main() {
    let args = Cli::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };

    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .init();

    let start = Instant::now();
    if let Err(e) = run(args) {
        log::error!("Failed to downsample point cloud: {}", e);
        std::process::exit(1);
    }
    log::info!("Elapsed: {:?}", start.elapsed());
}
